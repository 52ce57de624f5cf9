//! ESRI style ASCII grids
//!
//! A simple regular raster format, used here to export 2D results such as
//! formation isopachs or mean temperatures:
//!
//! ```text
//! ncols 3
//! nrows 2
//! xllcorner 1000
//! yllcorner 2000
//! cellsize 100
//! NODATA_value -9999
//! 4.000000 5.000000 6.000000
//! 1.000000 2.000000 3.000000
//! ```
//!
//! Rows are listed north to south, so the first data row of the file is the
//! *last* row of a SHEMAT layer. The conversions to and from "property_xy"
//! vectors take care of this.
//!
//! An ASCII grid needs square cells, so exporting a SHEMAT model is only
//! meaningful for a regular mesh with equal `DELX` and `DELY` spacing.

// internal modules
use crate::error::{Error, Result};
use crate::namelist::NamelistFile;
use crate::utils::*;

// standard library
use std::path::Path;

// external crates
use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};

/// NODATA value used for grids built from SHEMAT results
pub const DEFAULT_NODATA: f64 = -9999.0;

/// The six line header of an ASCII grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridHeader {
    /// Number of columns
    pub ncols: usize,
    /// Number of rows
    pub nrows: usize,
    /// x coordinate of the lower left corner
    pub xllcorner: f64,
    /// y coordinate of the lower left corner
    pub yllcorner: f64,
    /// Width and height of every cell
    pub cellsize: f64,
    /// Value marking cells without data
    pub nodata_value: f64,
}

impl Default for GridHeader {
    fn default() -> Self {
        Self {
            ncols: 0,
            nrows: 0,
            xllcorner: 0.0,
            yllcorner: 0.0,
            cellsize: 1.0,
            nodata_value: DEFAULT_NODATA,
        }
    }
}

impl std::fmt::Display for GridHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "ncols {}", self.ncols)?;
        writeln!(f, "nrows {}", self.nrows)?;
        writeln!(f, "xllcorner {}", self.xllcorner)?;
        writeln!(f, "yllcorner {}", self.yllcorner)?;
        writeln!(f, "cellsize {}", self.cellsize)?;
        writeln!(f, "NODATA_value {}", self.nodata_value)
    }
}

/// ASCII grid with rows stored north to south, as in the file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsciiGrid {
    pub header: GridHeader,
    pub rows: Vec<Vec<f64>>,
}

impl AsciiGrid {
    /// Combine a header with rows, checking they agree
    pub fn new(header: GridHeader, rows: Vec<Vec<f64>>) -> Result<Self> {
        if rows.len() != header.nrows {
            return Err(Error::InvalidGrid(f!(
                "expected {} rows, found {}",
                header.nrows,
                rows.len()
            )));
        }
        if let Some((n, row)) = rows.iter().find_position(|r| r.len() != header.ncols) {
            return Err(Error::InvalidGrid(f!(
                "expected {} values in row {}, found {}",
                header.ncols,
                n + 1,
                row.len()
            )));
        }
        Ok(Self { header, rows })
    }

    /// Grid from a 2D SHEMAT result
    ///
    /// The header is taken from the model: `IDIM` columns, `JDIM` rows, the
    /// corner at (`I0`, `J0`), cells the size of the first `DELX`, and a NODATA
    /// value of -9999. The `property_xy` values are in layer order (`i`
    /// fastest, south to north).
    ///
    /// ```rust
    /// # use shemat::namelist::NamelistFile;
    /// # use shemat::grid::AsciiGrid;
    /// let nml = NamelistFile::parse_str(
    ///     "# IDIM\n2\n# JDIM\n2\n# I0\n100.0\n# J0\n200.0\n# DELX\n2*50.00\n",
    /// );
    /// let grid = AsciiGrid::from_property_xy(&nml, &[1.0, 2.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(grid.rows, vec![vec![3.0, 4.0], vec![1.0, 2.0]]);
    /// assert_eq!(grid.header.cellsize, 50.0);
    /// ```
    pub fn from_property_xy(nml: &NamelistFile, property_xy: &[f64]) -> Result<Self> {
        let header = GridHeader {
            ncols: nml.get_value("IDIM")?,
            nrows: nml.get_value("JDIM")?,
            xllcorner: nml.get_value("I0")?,
            yllcorner: nml.get_value("J0")?,
            cellsize: nml.get_array_raw("DELX")?[0],
            nodata_value: DEFAULT_NODATA,
        };

        let expected = header.ncols * header.nrows;
        if property_xy.len() < expected {
            return Err(Error::DimensionMismatch {
                variable: "property_xy".to_string(),
                expected,
                found: property_xy.len(),
            });
        }

        let mut rows: Vec<Vec<f64>> = property_xy[..expected]
            .chunks(header.ncols.max(1))
            .map(|row| row.to_vec())
            .collect();
        rows.reverse();
        debug!("Built {} x {} grid", header.ncols, header.nrows);
        Self::new(header, rows)
    }

    /// Values in layer order, `i` fastest and south to north
    pub fn to_property_xy(&self) -> Vec<f64> {
        self.rows.iter().rev().flatten().copied().collect()
    }

    /// Write the grid to a file
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_string()).map_err(|e| Error::file_access(path, e))?;
        debug!("Wrote grid to {}", path.display());
        Ok(())
    }

    /// Bounding box as `(x_min, x_max, y_min, y_max)`
    pub fn extent(&self) -> (f64, f64, f64, f64) {
        let h = &self.header;
        (
            h.xllcorner,
            h.xllcorner + h.ncols as f64 * h.cellsize,
            h.yllcorner,
            h.yllcorner + h.nrows as f64 * h.cellsize,
        )
    }

    /// x coordinate of every column centre, west to east
    pub fn x_coords(&self) -> Vec<f64> {
        let h = &self.header;
        (0..h.ncols)
            .map(|col| h.xllcorner + (col as f64 + 0.5) * h.cellsize)
            .collect()
    }

    /// y coordinate of every row centre, north to south like the rows
    pub fn y_coords(&self) -> Vec<f64> {
        let h = &self.header;
        (0..h.nrows)
            .map(|row| h.yllcorner + ((h.nrows - row) as f64 - 0.5) * h.cellsize)
            .collect()
    }

    /// Check the headers of two grids are identical
    pub fn same_header(&self, other: &AsciiGrid) -> bool {
        self.header == other.header
    }

    /// Replace every value strictly between `min` and `max` with NODATA
    pub fn set_nodata_in_range(&mut self, min: f64, max: f64) {
        let nodata = self.header.nodata_value;
        self.rows
            .iter_mut()
            .flatten()
            .filter(|v| **v > min && **v < max)
            .for_each(|v| *v = nodata);
    }
}

impl std::fmt::Display for AsciiGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.header)?;
        for row in &self.rows {
            writeln!(f, "{}", row.iter().map(|v| f!("{v:.6}")).join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn grid() -> AsciiGrid {
        let header = GridHeader {
            ncols: 3,
            nrows: 2,
            xllcorner: 1000.0,
            yllcorner: 2000.0,
            cellsize: 100.0,
            ..Default::default()
        };
        AsciiGrid::new(header, vec![vec![4.0, 5.0, 6.0], vec![1.0, 2.0, 3.0]]).unwrap()
    }

    #[rstest]
    fn display(grid: AsciiGrid) {
        let expected = "\
ncols 3
nrows 2
xllcorner 1000
yllcorner 2000
cellsize 100
NODATA_value -9999
4.000000 5.000000 6.000000
1.000000 2.000000 3.000000
";
        assert_eq!(grid.to_string(), expected);
    }

    #[rstest]
    fn layer_order(grid: AsciiGrid) {
        assert_eq!(grid.to_property_xy(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[rstest]
    fn coordinates(grid: AsciiGrid) {
        assert_eq!(grid.extent(), (1000.0, 1300.0, 2000.0, 2200.0));
        assert_eq!(grid.x_coords(), vec![1050.0, 1150.0, 1250.0]);
        assert_eq!(grid.y_coords(), vec![2150.0, 2050.0]);
    }

    #[rstest]
    fn nodata_range(mut grid: AsciiGrid) {
        grid.set_nodata_in_range(1.0, 4.0);
        assert_eq!(grid.to_property_xy(), vec![1.0, -9999.0, -9999.0, 4.0, 5.0, 6.0]);
    }

    #[rstest]
    fn header_comparison(grid: AsciiGrid) {
        let mut other = grid.clone();
        assert!(grid.same_header(&other));
        other.header.cellsize = 50.0;
        assert!(!grid.same_header(&other));
    }

    #[test]
    fn mismatched_rows() {
        let header = GridHeader {
            ncols: 2,
            nrows: 1,
            ..Default::default()
        };
        assert!(AsciiGrid::new(header, vec![vec![1.0]]).is_err());
        assert!(AsciiGrid::new(header, vec![]).is_err());
    }

    #[test]
    fn short_property_xy() {
        let nml = NamelistFile::parse_str(
            "# IDIM\n2\n# JDIM\n2\n# I0\n0\n# J0\n0\n# DELX\n2*1.00\n",
        );
        assert!(matches!(
            AsciiGrid::from_property_xy(&nml, &[1.0, 2.0]),
            Err(Error::DimensionMismatch { .. })
        ));
    }
}
