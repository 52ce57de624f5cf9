//! # The SHEMAT crate
//!
//! Tools for reading, editing, and writing input and output files of the
//! SHEMAT heat and fluid flow simulator
//!
//! ## Installation
//!
//! Direct install from github:
//!
//! ```shell
//! cargo install --git https://github.com/repositony/shemat.git
//! ```
//!
//! ## Overview
//!
//! SHEMAT models are set up in namelist files (`.nml`), and SHEMAT writes its
//! results in the same layout (`.nlo`). The crate handles the packed array
//! format of these files, including the negative-value convention used for
//! boundary conditions, so that models can be built and post-processed from
//! Rust.
//!
//! | Command line | Description                                           |
//! | ------------ | ----------------------------------------------------- |
//! | `nmlinfo`    | Summarise the variables and boundary conditions       |
//! | `nml2grid`   | Reduce a 3D property to a map and write an ASCII grid |
//!
//! All tools are fully documented with detailed `--help` messages, including
//! examples for common use cases.
//!
//! ### Supported files
//!
//! | File                  | Read | Write | Type                                   |
//! | --------------------- | ---- | ----- | -------------------------------------- |
//! | SHEMAT input `.nml`   | yes  | yes   | [NamelistFile](crate::namelist::NamelistFile) |
//! | SHEMAT output `.nlo`  | yes  | yes   | [NamelistFile](crate::namelist::NamelistFile) |
//! | ESRI ASCII grid       | yes  | yes   | [AsciiGrid](crate::grid::AsciiGrid)   |
//!
//! ## Advanced use
//!
//! Reading a file is a one-liner, and every variable is then available by
//! name.
//!
//! ```rust
//! use shemat::read_namelist;
//! use shemat::namelist::BoundaryKind;
//! use shemat::options::WriteOptions;
//!
//! let mut nml = read_namelist("./data/simple_model.nml").unwrap();
//!
//! // scalars and arrays by name
//! let dims = nml.dimensions().unwrap();
//! let geology = nml.get_array("GEOLOGY").unwrap();
//! assert_eq!(geology.len(), dims.volume());
//!
//! // boundary conditions are decoded from the signs of POR, PRES, and PERM
//! let fixed = nml.get_bcs().unwrap().count(BoundaryKind::Temperature);
//! assert!(fixed > 0);
//!
//! // write the temperature straight back with full precision
//! let temp = nml.get_array("TEMP").unwrap();
//! nml.set_array("TEMP", &temp, &WriteOptions::new().high_res(true)).unwrap();
//! ```
//!
//! As an overview:
//! - The [namelist] module contains the [NamelistFile](crate::namelist::NamelistFile)
//! and everything needed to interpret its contents.
//! - The [analysis] module adds formation based edits and maps to the
//! namelist file.
//! - The [grid] module reads and writes ESRI style ASCII grids, for exporting
//! 2D results.
//! - The [options] module holds the settings for reading and writing.
//!
//! In the background, the `nom` parser combinator library is used for the
//! array tokens and grid headers, `clap` for the command line interface, and
//! `thiserror` for the library errors.
//!
//! All of the useful functionality from the file readers and core data
//! structures are re-exported for convenience.

// Public facing modules
pub mod analysis;
pub mod error;
pub mod grid;
pub mod namelist;
pub mod options;
pub mod utils;

// note that docs are hidden to prevent confusing the current simple API
pub mod readers;

// Re-exports of useful data structures
#[doc(inline)]
pub use crate::error::{Error, Result};

#[doc(inline)]
pub use crate::readers::{read_ascii_grid, read_namelist};
