//! Reader for ESRI style ASCII grid files
//!
//! The six header lines are expected in the usual order, with keys matched
//! case insensitively. Data values may be wrapped over any number of lines.

// internal modules
use crate::error::{Error, Result};
use crate::grid::{AsciiGrid, GridHeader};
use crate::utils::*;

// standard library
use std::path::Path;
use std::str::FromStr;

// external crates
use log::{debug, trace};
use nom::bytes::complete::{tag_no_case, take_till1};
use nom::character::complete::{space0, space1};
use nom::combinator::all_consuming;
use nom::sequence::{delimited, preceded, tuple};
use nom::IResult;

/// Reader for ASCII grid files
#[derive(Debug, Default, Clone, Copy)]
pub struct AsciiGridReader {}

impl AsciiGridReader {
    /// Just calls Default::default(), nothing special to be initialised
    pub fn new() -> Self {
        Default::default()
    }

    /// Read the grid in the file at `path`
    pub fn parse<P: AsRef<Path>>(&self, path: P) -> Result<AsciiGrid> {
        let path = path.as_ref();
        debug!("Reading ASCII grid from {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|e| Error::file_access(path, e))?;
        self.parse_str(&text)
    }

    /// Read a grid from text already in memory
    pub fn parse_str(&self, text: &str) -> Result<AsciiGrid> {
        let mut lines = text.lines();
        let mut next_value = |key: &'static str| -> Result<String> {
            let line = lines
                .next()
                .ok_or_else(|| Error::InvalidGrid(f!("missing \"{key}\" header line")))?;
            match header_line(key)(line.trim_end()) {
                Ok((_, value)) => Ok(value.to_string()),
                Err(_) => Err(Error::InvalidGrid(f!(
                    "expected \"{key}\" header, found \"{}\"",
                    line.trim()
                ))),
            }
        };

        let header = GridHeader {
            ncols: interpret("ncols", &next_value("ncols")?)?,
            nrows: interpret("nrows", &next_value("nrows")?)?,
            xllcorner: interpret("xllcorner", &next_value("xllcorner")?)?,
            yllcorner: interpret("yllcorner", &next_value("yllcorner")?)?,
            cellsize: interpret("cellsize", &next_value("cellsize")?)?,
            nodata_value: interpret("NODATA_value", &next_value("NODATA_value")?)?,
        };
        trace!("{header:?}");

        let values = lines
            .flat_map(str::split_whitespace)
            .map(|word| interpret::<f64>("data", word))
            .collect::<Result<Vec<f64>>>()?;

        let expected = header.ncols * header.nrows;
        if values.len() != expected {
            return Err(Error::InvalidGrid(f!(
                "expected {expected} values for {} x {} grid, found {}",
                header.ncols,
                header.nrows,
                values.len()
            )));
        }

        let rows = match header.ncols {
            0 => vec![Vec::new(); header.nrows],
            n => values.chunks(n).map(|row| row.to_vec()).collect(),
        };
        AsciiGrid::new(header, rows)
    }
}

/// `<key> <value>` with the key matched case insensitively
fn header_line<'a>(key: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    all_consuming(delimited(
        tuple((space0, tag_no_case(key))),
        preceded(space1, take_till1(char::is_whitespace)),
        space0,
    ))
}

fn interpret<T: FromStr>(what: &str, value: &str) -> Result<T> {
    value
        .parse::<T>()
        .map_err(|_| Error::InvalidGrid(f!("could not interpret {what} value \"{value}\"")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const GRID: &str = "\
ncols 3
NROWS 2
xllcorner 1000.5
yllcorner 2000
cellsize 100
NODATA_value -9999
4 5 6
1 2
3
";

    #[test]
    fn reads_header_and_wrapped_rows() {
        let grid = AsciiGridReader::new().parse_str(GRID).unwrap();
        assert_eq!(grid.header.ncols, 3);
        assert_eq!(grid.header.nrows, 2);
        assert_eq!(grid.header.xllcorner, 1000.5);
        assert_eq!(grid.header.nodata_value, -9999.0);
        assert_eq!(grid.rows, vec![vec![4.0, 5.0, 6.0], vec![1.0, 2.0, 3.0]]);
    }

    #[rstest]
    #[case("ncols 3", Some("3"))]
    #[case("  NCOLS\t3  ", Some("3"))]
    #[case("ncols", None)]
    #[case("ncols 3 4", None)]
    #[case("nrows 3", None)]
    fn header_lines(#[case] line: &str, #[case] expected: Option<&str>) {
        assert_eq!(header_line("ncols")(line).ok().map(|(_, v)| v), expected);
    }

    #[rstest]
    #[case(GRID.replace("cellsize 100", "cellsize abc"))]
    #[case(GRID.replace("ncols 3", "columns 3"))]
    #[case(GRID.replace("\n3\n", "\n"))]
    #[case(GRID.replace("\n3\n", "\n3 7\n"))]
    #[case(GRID.replace("4 5 6", "4 x 6"))]
    #[case("ncols 3\nnrows 2\n".to_string())]
    fn invalid_grids(#[case] text: String) {
        assert!(matches!(
            AsciiGridReader::new().parse_str(&text),
            Err(Error::InvalidGrid(_))
        ));
    }
}
