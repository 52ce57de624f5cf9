//! Command line tool to summarise SHEMAT namelist files
//!
//! Prints the model dimensions, the number of Dirichlet boundary cells for
//! each boundary condition type, and the formations used in the `GEOLOGY`
//! array. Works the same for input (`.nml`) and output (`.nlo`) files.
//!
//! # Usage
//!
//! ```text
//! Usage: nmlinfo <file> [options]
//! ```
//!
//! Help is printed with the `-h` flag, and `--help` will show examples, default
//! values, examples, and any important behaviour.
//!
//! ## Options
//!
//! By default a simple summary of the model is printed to the terminal.
//!
//! ```bash
//! # Print a summary of the model
//! nmlinfo model.nml
//! ```
//!
//! ### List all variables
//!
//! Every header found in the file can be listed with `--variables`.
//!
//! ```bash
//! nmlinfo model.nml --variables
//! ```
//!
//! ### Convert the summary to JSON
//!
//! The same summary can be written to a JSON file for use elsewhere.
//!
//! ```bash
//! # Output a file named 'model.json'
//! nmlinfo model.nml --json model.json
//! ```
//!
//! ### Strict interpretation
//!
//! Malformed array tokens and short arrays are warnings by default. The
//! `--strict` flag turns them into errors, which is useful for checking a
//! model before a long run.
//!
//! ```bash
//! nmlinfo model.nml --strict
//! ```

// standard libraries
use std::fs::File;
use std::io::BufWriter;

// crate modules
use shemat::namelist::{BoundaryKind, Dimensions, NamelistFile};
use shemat::readers::NamelistReader;
use shemat::utils::f;

// external crates
use anyhow::{Context, Result};
use clap::{arg, Parser};
use log::*;
use serde::Serialize;

#[doc(hidden)]
fn main() -> Result<()> {
    // set up the command line interface and match arguments
    let cli: Cli = Cli::parse();

    // set up logging (+2 to make 'Info' the default)
    let verbosity = cli.verbose as usize + 2;
    logging_init(verbosity, cli.quiet);

    // read the file with the requested interpretation
    info!("Reading {}", &cli.file);
    let reader = match cli.strict {
        true => NamelistReader::new().strict(),
        false => NamelistReader::new(),
    };
    let mut nml = reader
        .parse(&cli.file)
        .with_context(|| f!("Failed to read \"{}\"", cli.file))?;

    let summary = Summary::new(&cli.file, &mut nml)?;

    if !cli.quiet {
        print_summary(&summary);
    }

    if cli.variables {
        print_variables(&summary);
    }

    if let Some(path) = &cli.json {
        write_json(&summary, path)?;
    }

    Ok(())
}

/// Summarise SHEMAT namelist files
///
/// Prints the model dimensions, Dirichlet boundary cell counts, and the
/// formations used in GEOLOGY. Input (.nml) and output (.nlo) files are
/// treated the same.
///
/// Examples
/// --------
///
///  Print a summary of the model
///     $ nmlinfo model.nml
///
///  Also list every variable in the file
///     $ nmlinfo model.nml --variables
///
///  Write the summary to a JSON file
///     $ nmlinfo model.nml --json summary.json
///
///  Fail on malformed or short arrays
///     $ nmlinfo model.nml --strict
///
/// Notes
/// -----
///
/// Boundary conditions are read from the signs of POR (temperature),
/// PRES (concentration), and PERM (head). A negative value marks a
/// Dirichlet cell.
#[doc(hidden)]
#[derive(Parser)]
#[command(
    verbatim_doc_comment,
    arg_required_else_help(true),
    before_help(banner()),
    after_help("Typical use: nmlinfo model.nml\n\nNOTE: --help shows more detail and examples"),
    term_width(70),
    hide_possible_values(true),
    override_usage("nmlinfo <file> [options]")
)]
struct Cli {
    // * Positional
    /// Path to SHEMAT .nml/.nlo file
    #[arg(name = "file")]
    file: String,

    /// List every variable found in the file
    #[arg(help_heading("Summary options"))]
    #[arg(short = 'l', long)]
    variables: bool,

    /// Write the summary to a JSON file
    #[arg(help_heading("Summary options"))]
    #[arg(short, long)]
    #[arg(value_name = "path")]
    json: Option<String>,

    /// Treat malformed tokens and short arrays as errors
    ///
    /// By default these are logged as warnings, malformed tokens skipped, and
    /// short arrays padded with zeros.
    #[arg(help_heading("Summary options"))]
    #[arg(short, long)]
    strict: bool,

    // * Flags
    /// Verbose logging (-v, -vv)
    ///
    /// If specified, the default log level of INFO is increased to DEBUG (-v)
    /// or TRACE (-vv). Errors and Warnings are always logged unless in quiet
    /// (-q) mode.
    #[arg(short, long)]
    #[arg(action = clap::ArgAction::Count)]
    verbose: u8,

    /// Supress all log output (overrules --verbose)
    #[arg(short, long)]
    quiet: bool,
}

/// Everything reported about a model
#[doc(hidden)]
#[derive(Debug, Serialize)]
struct Summary {
    file: String,
    dimensions: Dimensions,
    extent: (f64, f64, f64),
    formations: Vec<i64>,
    boundary_conditions: Vec<(BoundaryKind, usize)>,
    variables: Vec<String>,
}

impl Summary {
    fn new(file: &str, nml: &mut NamelistFile) -> Result<Self> {
        let dimensions = nml.dimensions().context("Model dimensions not found")?;

        // geometry and formations are optional for a quick look
        let extent = nml.model_extent().unwrap_or_else(|e| {
            warn!("Unable to compute model extent: {e}");
            (0.0, 0.0, 0.0)
        });
        let formations = nml.formation_ids().unwrap_or_else(|e| {
            warn!("Unable to find formations: {e}");
            Vec::new()
        });

        let bcs = nml.get_bcs().context("Failed to read boundary conditions")?;
        let boundary_conditions = BoundaryKind::ALL
            .iter()
            .map(|kind| (*kind, bcs.count(*kind)))
            .collect();

        Ok(Self {
            file: file.to_string(),
            dimensions,
            extent,
            formations,
            boundary_conditions,
            variables: nml.variables(),
        })
    }
}

/// Sets up logging at runtime to allow for multiple verbosity levels
#[doc(hidden)]
fn logging_init(verbosity: usize, quiet: bool) {
    stderrlog::new()
        .modules(vec![module_path!(), "shemat"])
        .quiet(quiet)
        .verbosity(verbosity)
        .show_level(false)
        .color(stderrlog::ColorChoice::Never)
        .timestamp(stderrlog::Timestamp::Off)
        .init()
        .unwrap();
}

/// Creates a banner for the command line
#[doc(hidden)]
fn banner() -> String {
    let mut s = f!("{:-<1$}\n", "", 70);
    s += &f!("{:^70}\n", "SHEMAT :: Namelist Inspector");
    s += &f!("{:-<1$}", "", 70);
    s
}

#[doc(hidden)]
/// Write summary to the terminal
fn print_summary(summary: &Summary) {
    let d = &summary.dimensions;
    let mut s = f!("Summary of {}\n", summary.file);
    s += &f!("cells      : {} ({d})\n", d.volume());
    s += &f!(
        "extent     : {} x {} x {}\n",
        summary.extent.0,
        summary.extent.1,
        summary.extent.2
    );
    s += &f!("formations : {}\n", summary.formations.len());
    s += "dirichlet  :";
    for (kind, count) in &summary.boundary_conditions {
        s += &f!(" {kind}={count}");
    }
    println!("{s}")
}

#[doc(hidden)]
/// List the variable names, wrapped for the terminal
fn print_variables(summary: &Summary) {
    let s = summary.variables.join(" ");
    println!(
        "\n{} variables:\n{}",
        summary.variables.len(),
        textwrap::fill(&s, 80)
    );
}

#[doc(hidden)]
/// Write summary to json
fn write_json(summary: &Summary, path: &str) -> Result<()> {
    debug!("Writing JSON summary to {path}");
    let file = File::create(path).with_context(|| f!("Unable to create \"{path}\""))?;
    Ok(serde_json::to_writer_pretty(BufWriter::new(file), summary)?)
}
