#![doc(hidden)]
//! Library of readers for the supported file formats

// internal modules
use crate::error::Result;
use crate::grid::AsciiGrid;
use crate::namelist::NamelistFile;

// standard library
use std::path::Path;

// files under the readers module
mod ascii_grid_file;
mod namelist_file;

// inline the readers for a nice API
#[doc(inline)]
pub use crate::readers::ascii_grid_file::AsciiGridReader;

#[doc(inline)]
pub use crate::readers::namelist_file::NamelistReader;

/// Read a SHEMAT namelist file
///
/// Returns a result containing the [NamelistFile] read from `path`, with
/// the default lenient interpretation. Use [NamelistReader] for more control.
///
/// - `path` - Path to the `.nml`/`.nlo` file, can be [&str], [String], [Path], etc...
///
/// Example
/// ```ignore
/// let mut nml = shemat::read_namelist("path/to/model.nml")?;
/// let geology = nml.get_array("GEOLOGY")?;
/// ```
pub fn read_namelist<P: AsRef<Path>>(path: P) -> Result<NamelistFile> {
    NamelistReader::new().parse(path)
}

/// Read an ESRI style ASCII grid file
///
/// Returns a result containing the [AsciiGrid] read from `path`.
///
/// - `path` - Path to the grid file, can be [&str], [String], [Path], etc...
///
/// Example
/// ```ignore
/// let grid = shemat::read_ascii_grid("path/to/grid.txt")?;
/// let (x_min, x_max, y_min, y_max) = grid.extent();
/// ```
pub fn read_ascii_grid<P: AsRef<Path>>(path: P) -> Result<AsciiGrid> {
    AsciiGridReader::new().parse(path)
}
