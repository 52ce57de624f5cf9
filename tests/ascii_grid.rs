//! Integration tests for exporting model maps as ASCII grids

use shemat::grid::{AsciiGrid, DEFAULT_NODATA};
use shemat::{read_ascii_grid, read_namelist, Error};

use tempfile::tempdir;

const MODEL_PATH: &str = "./data/simple_model.nml";

const MEAN_TEMPERATURE: &str = "\
ncols 3
nrows 2
xllcorner 1000
yllcorner 2000
cellsize 100
NODATA_value -9999
26.500000 27.000000 27.500000
25.000000 25.500000 26.000000
";

#[test]
fn mean_temperature_grid() {
    let mut nml = read_namelist(MODEL_PATH).unwrap();
    let mean = nml.global_mean_value("TEMP").unwrap();
    let grid = AsciiGrid::from_property_xy(&nml, &mean).unwrap();

    // northern row first
    assert_eq!(grid.to_string(), MEAN_TEMPERATURE);
    assert_eq!(grid.to_property_xy(), mean);
    assert_eq!(grid.extent(), (1000.0, 1300.0, 2000.0, 2200.0));
    assert_eq!(grid.y_coords(), vec![2150.0, 2050.0]);
}

#[test]
fn write_then_read() {
    let mut nml = read_namelist(MODEL_PATH).unwrap();
    let isopach = nml.formation_isopach(3).unwrap();
    let mut grid = AsciiGrid::from_property_xy(&nml, &isopach).unwrap();
    grid.set_nodata_in_range(-1.0, 1.0);
    assert_eq!(grid.rows[1], vec![DEFAULT_NODATA, DEFAULT_NODATA, 50.0]);

    let dir = tempdir().unwrap();
    let path = dir.path().join("isopach.txt");
    grid.write(&path).unwrap();

    let read = read_ascii_grid(&path).unwrap();
    assert!(read.same_header(&grid));
    assert_eq!(read, grid);
}

#[test]
fn short_property_is_rejected() {
    let nml = read_namelist(MODEL_PATH).unwrap();
    let result = AsciiGrid::from_property_xy(&nml, &[1.0; 5]);
    assert!(matches!(
        result,
        Err(Error::DimensionMismatch {
            expected: 6,
            found: 5,
            ..
        })
    ));
}

#[test]
fn missing_grid_file() {
    let dir = tempdir().unwrap();
    let result = read_ascii_grid(dir.path().join("nothing.txt"));
    assert!(matches!(result, Err(Error::FileAccess { .. })));
}
