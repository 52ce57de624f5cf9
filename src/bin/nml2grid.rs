//! Command line tool to export SHEMAT properties as ASCII grids
//!
//! Reduces a 3D property of a namelist file to a map and writes it as an ESRI
//! style ASCII grid, ready for any GIS package.
//!
//! # Usage
//!
//! ```text
//! Usage: nml2grid <file> <property> [options]
//! ```
//!
//! Help is printed with the `-h` flag, and `--help` will show examples, default
//! values, examples, and any important behaviour.
//!
//! ## Options
//!
//! By default the vertical mean of the property is taken over every layer.
//!
//! ```bash
//! # Mean temperature, written to 'TEMP.txt'
//! nml2grid model.nlo TEMP
//! ```
//!
//! ### > How to reduce the property
//!
//! Only one reduction may be chosen.
//!
//! ```bash
//! # Mean temperature of the cells in formation 2
//! nml2grid model.nlo TEMP --formation 2
//!
//! # Temperature of the cells in the bottom layer
//! nml2grid model.nlo TEMP --layer 0
//!
//! # Thickness of formation 2 (the property is ignored)
//! nml2grid model.nml GEOLOGY --isopach 2
//! ```
//!
//! ### > How to blank out values
//!
//! Values strictly between two limits can be replaced with NODATA, for example
//! to hide the zeros left where a formation is absent.
//!
//! ```bash
//! nml2grid model.nlo TEMP --formation 2 --nodata -0.1 0.1
//! ```
//!
//! ### > How to change the file name
//!
//! ```bash
//! nml2grid model.nlo TEMP --output mean_temperature.txt
//! ```

// crate modules
use shemat::grid::AsciiGrid;
use shemat::namelist::{Axis, NamelistFile};
use shemat::read_namelist;
use shemat::utils::f;

// external crates
use anyhow::{Context, Result};
use clap::{arg, Parser};
use log::*;

#[doc(hidden)]
fn main() -> Result<()> {
    // set up the command line interface and match arguments
    let cli: Cli = Cli::parse();

    // set up logging (+2 to make 'Info' the default)
    let verbosity = cli.verbose as usize + 2;
    logging_init(verbosity, cli.quiet);

    info!("Reading {}", &cli.file);
    let mut nml =
        read_namelist(&cli.file).with_context(|| f!("Failed to read \"{}\"", cli.file))?;

    let property_xy = reduce_property(&mut nml, &cli)?;

    let mut grid = AsciiGrid::from_property_xy(&nml, &property_xy)
        .context("Unable to build a grid from the model header")?;

    if let [min, max] = cli.nodata[..] {
        debug!("Replacing values between {min} and {max} with NODATA");
        grid.set_nodata_in_range(min, max);
    }

    let output = match &cli.output {
        Some(o) => o.clone(),
        None => f!("{}.txt", cli.property),
    };
    info!("Writing {output}");
    grid.write(&output)?;

    Ok(())
}

/// Export SHEMAT properties as ASCII grids
///
/// Reduces a 3D property to a map and writes it as an ESRI style ASCII
/// grid. The grid header is taken from IDIM, JDIM, I0, J0, and the first
/// DELX value.
///
/// Examples
/// --------
///
///  Vertical mean of the temperature
///     $ nml2grid model.nlo TEMP
///
///  Mean temperature of formation 2 only
///     $ nml2grid model.nlo TEMP --formation 2
///
///  Temperature of a single layer
///     $ nml2grid model.nlo TEMP --layer 0
///
///  Thickness of formation 2
///     $ nml2grid model.nml GEOLOGY --isopach 2
///
///  Hide values close to zero
///     $ nml2grid model.nlo TEMP --formation 2 --nodata -0.1 0.1
///
/// Notes
/// -----
///
/// ASCII grids need square cells, so the export is only meaningful for a
/// regular mesh with equal DELX and DELY spacing.
#[doc(hidden)]
#[derive(Parser)]
#[command(
    verbatim_doc_comment,
    arg_required_else_help(true),
    before_help(banner()),
    after_help("Typical use: nml2grid model.nlo TEMP\n\nNOTE: --help shows more detail and examples"),
    term_width(70),
    hide_possible_values(true),
    override_usage("nml2grid <file> <property> [options]")
)]
struct Cli {
    // * Positional
    /// Path to SHEMAT .nml/.nlo file
    #[arg(name = "file")]
    file: String,

    /// Name of the property to export (e.g. TEMP)
    #[arg(name = "property")]
    property: String,

    /// Mean over the cells of one formation only
    #[arg(help_heading("Reduction options"))]
    #[arg(short, long)]
    #[arg(value_name = "id")]
    #[arg(conflicts_with_all(["layer", "isopach"]))]
    formation: Option<i64>,

    /// Values of a single layer (k index from 0)
    #[arg(help_heading("Reduction options"))]
    #[arg(short, long)]
    #[arg(value_name = "k")]
    #[arg(conflicts_with("isopach"))]
    layer: Option<usize>,

    /// Thickness of one formation from DELZ
    #[arg(help_heading("Reduction options"))]
    #[arg(short, long)]
    #[arg(value_name = "id")]
    isopach: Option<i64>,

    /// Replace values strictly between two limits with NODATA
    #[arg(help_heading("Grid options"))]
    #[arg(short, long)]
    #[arg(num_args = 2, allow_negative_numbers(true))]
    #[arg(value_names = ["min", "max"])]
    nodata: Vec<f64>,

    /// Name of output file ('<property>.txt' default)
    #[arg(help_heading("Grid options"))]
    #[arg(short, long)]
    #[arg(value_name = "path")]
    output: Option<String>,

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
    s += &f!("{:^70}\n", "SHEMAT :: ASCII Grid Export");
    s += &f!("{:-<1$}", "", 70);
    s
}

#[doc(hidden)]
/// Collapse the property to one value per (i, j) as requested
fn reduce_property(nml: &mut NamelistFile, cli: &Cli) -> Result<Vec<f64>> {
    let property = cli.property.as_str();
    let property_xy = if let Some(id) = cli.isopach {
        debug!("Isopach of formation {id}");
        nml.formation_isopach(id)?
    } else if let Some(id) = cli.formation {
        debug!("Mean {property} of formation {id}");
        nml.mean_formation_value(id, property)?
    } else if let Some(k) = cli.layer {
        debug!("{property} of layer {k}");
        nml.to_xyz(property)?.slice(Axis::Z, k)?
    } else {
        debug!("Mean {property} over all layers");
        nml.global_mean_value(property)?
    };
    Ok(property_xy)
}
