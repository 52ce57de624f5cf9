//! Model geometry derived from the cell spacing arrays
//!
//! SHEMAT meshes are rectilinear, with cell widths along each axis given by
//! the `DELX`, `DELY`, and `DELZ` arrays. Boundaries are relative to the model
//! origin, which is not stored in the file itself and so has to be provided
//! wherever real world coordinates are involved.

// internal modules
use crate::error::{Error, Result};
use crate::namelist::file::NamelistFile;
use crate::namelist::xyz::Axis;
use crate::options::WriteOptions;
use crate::utils::*;

// external crates
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Cell boundaries along each axis, starting at zero
///
/// ```rust
/// # use shemat::namelist::{Axis, CellBoundaries};
/// let bounds = CellBoundaries::from_spacing(&[10.0, 20.0], &[5.0], &[1.0, 1.0, 2.0]);
/// assert_eq!(bounds.x, vec![0.0, 10.0, 30.0]);
/// assert_eq!(bounds.centres(Axis::X), vec![5.0, 20.0]);
/// assert_eq!(bounds.extent(), (30.0, 5.0, 4.0));
/// ```
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellBoundaries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl CellBoundaries {
    /// Boundaries from cell widths along each axis
    pub fn from_spacing(delx: &[f64], dely: &[f64], delz: &[f64]) -> Self {
        Self {
            x: cumulative_bounds(delx),
            y: cumulative_bounds(dely),
            z: cumulative_bounds(delz),
        }
    }

    /// Boundaries along a single axis
    pub fn axis(&self, axis: Axis) -> &[f64] {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }

    /// Cell widths along a single axis
    pub fn spacing(&self, axis: Axis) -> Vec<f64> {
        self.axis(axis)
            .iter()
            .tuple_windows()
            .map(|(lower, upper)| upper - lower)
            .collect()
    }

    /// Cell centres along a single axis
    pub fn centres(&self, axis: Axis) -> Vec<f64> {
        self.axis(axis)
            .iter()
            .tuple_windows()
            .map(|(lower, upper)| lower + (upper - lower) / 2.0)
            .collect()
    }

    /// Model size along each axis
    pub fn extent(&self) -> (f64, f64, f64) {
        let size = |b: &[f64]| match (vec_f64_min(b), vec_f64_max(b)) {
            (Some(min), Some(max)) => max - min,
            _ => 0.0,
        };
        (size(&self.x), size(&self.y), size(&self.z))
    }

    /// Index of the cell containing a coordinate along one axis
    ///
    /// The `origin` is the real world coordinate of the first boundary. A
    /// coordinate exactly on a boundary belongs to the cell above it, except
    /// for the last boundary which belongs to the last cell.
    ///
    /// ```rust
    /// # use shemat::namelist::{Axis, CellBoundaries};
    /// let bounds = CellBoundaries::from_spacing(&[10.0, 20.0], &[], &[]);
    /// assert_eq!(bounds.cell_index(Axis::X, 1005.0, 1000.0).unwrap(), 0);
    /// assert_eq!(bounds.cell_index(Axis::X, 1010.0, 1000.0).unwrap(), 1);
    /// assert_eq!(bounds.cell_index(Axis::X, 1030.0, 1000.0).unwrap(), 1);
    /// assert!(bounds.cell_index(Axis::X, 999.0, 1000.0).is_err());
    /// ```
    pub fn cell_index(&self, axis: Axis, position: f64, origin: f64) -> Result<usize> {
        let bounds = self.axis(axis);
        let relative = position - origin;
        let max = bounds.last().copied().unwrap_or(0.0);

        if bounds.len() < 2 || relative < 0.0 || relative > max {
            return Err(Error::OutOfBounds(f!(
                "position {position} is outside of the model along {axis:?} ({origin} to {})",
                origin + max
            )));
        }

        let cell = match bounds.iter().position(|b| *b > relative) {
            Some(upper) => upper - 1,
            None => bounds.len() - 2,
        };
        Ok(cell)
    }
}

impl NamelistFile {
    /// Cell boundaries from `DELX`, `DELY`, and `DELZ`
    pub fn cell_boundaries(&self) -> Result<CellBoundaries> {
        Ok(CellBoundaries::from_spacing(
            &self.get_array_raw("DELX")?,
            &self.get_array_raw("DELY")?,
            &self.get_array_raw("DELZ")?,
        ))
    }

    /// Cell centres along x, y, and z, relative to the model origin
    pub fn cell_centres(&self) -> Result<(Vec<f64>, Vec<f64>, Vec<f64>)> {
        let bounds = self.cell_boundaries()?;
        Ok((
            bounds.centres(Axis::X),
            bounds.centres(Axis::Y),
            bounds.centres(Axis::Z),
        ))
    }

    /// Model size along x, y, and z
    pub fn model_extent(&self) -> Result<(f64, f64, f64)> {
        Ok(self.cell_boundaries()?.extent())
    }

    /// Volume of every cell, in file order
    pub fn block_volumes(&self) -> Result<Vec<f64>> {
        let delx = self.get_array_raw("DELX")?;
        let dely = self.get_array_raw("DELY")?;
        let delz = self.get_array_raw("DELZ")?;

        let volumes = delz
            .iter()
            .cartesian_product(dely.iter())
            .cartesian_product(delx.iter())
            .map(|((z, y), x)| x * y * z)
            .collect();
        Ok(volumes)
    }

    /// Write new cell boundaries back as `DELX`, `DELY`, and `DELZ`
    pub fn update_spacing(&mut self, bounds: &CellBoundaries, options: &WriteOptions) -> Result<()> {
        self.set_array("DELX", &bounds.spacing(Axis::X), options)?;
        self.set_array("DELY", &bounds.spacing(Axis::Y), options)?;
        self.set_array("DELZ", &bounds.spacing(Axis::Z), options)
    }

    /// Index of the cell containing a coordinate along one axis
    pub fn cell_index_at(&self, axis: Axis, position: f64, origin: f64) -> Result<usize> {
        self.cell_boundaries()?.cell_index(axis, position, origin)
    }

    /// Cell `(i, j, k)` containing a real world point
    pub fn cell_at(&self, point: [f64; 3], origin: [f64; 3]) -> Result<(usize, usize, usize)> {
        let bounds = self.cell_boundaries()?;
        Ok((
            bounds.cell_index(Axis::X, point[0], origin[0])?,
            bounds.cell_index(Axis::Y, point[1], origin[1])?,
            bounds.cell_index(Axis::Z, point[2], origin[2])?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn nml() -> NamelistFile {
        NamelistFile::parse_str(
            "# DELX\n2*10.00 20.00\n# DELY\n5.00\n# DELZ\n2*1.00\n# IDIM\n3\n",
        )
    }

    #[rstest]
    fn boundaries(nml: NamelistFile) {
        let bounds = nml.cell_boundaries().unwrap();
        assert_eq!(bounds.x, vec![0.0, 10.0, 20.0, 40.0]);
        assert_eq!(bounds.y, vec![0.0, 5.0]);
        assert_eq!(bounds.z, vec![0.0, 1.0, 2.0]);
    }

    #[rstest]
    fn centres_and_extent(nml: NamelistFile) {
        let (x, y, z) = nml.cell_centres().unwrap();
        assert_eq!(x, vec![5.0, 15.0, 30.0]);
        assert_eq!(y, vec![2.5]);
        assert_eq!(z, vec![0.5, 1.5]);
        assert_eq!(nml.model_extent().unwrap(), (40.0, 5.0, 2.0));
    }

    #[rstest]
    fn volumes_in_file_order(nml: NamelistFile) {
        assert_eq!(
            nml.block_volumes().unwrap(),
            vec![50.0, 50.0, 100.0, 50.0, 50.0, 100.0]
        );
    }

    #[rstest]
    fn spacing_round_trip(mut nml: NamelistFile) {
        let mut bounds = nml.cell_boundaries().unwrap();
        bounds.x = vec![0.0, 5.0, 20.0, 40.0];
        nml.update_spacing(&bounds, &WriteOptions::new()).unwrap();
        assert_eq!(nml.get("DELX").unwrap(), "5.00 15.00 20.00\n");
        assert_eq!(nml.get("DELZ").unwrap(), "2*1.00\n");
    }

    #[rstest]
    #[case(Axis::X, 0.0, Some(0))]
    #[case(Axis::X, 19.9, Some(1))]
    #[case(Axis::X, 20.0, Some(2))]
    #[case(Axis::X, 40.0, Some(2))]
    #[case(Axis::X, 40.1, None)]
    #[case(Axis::Z, -0.1, None)]
    fn cell_lookup(
        nml: NamelistFile,
        #[case] axis: Axis,
        #[case] position: f64,
        #[case] expected: Option<usize>,
    ) {
        assert_eq!(nml.cell_index_at(axis, position, 0.0).ok(), expected);
    }

    #[rstest]
    fn cell_lookup_with_origin(nml: NamelistFile) {
        let cell = nml
            .cell_at([1015.0, 2002.0, -499.5], [1000.0, 2000.0, -500.0])
            .unwrap();
        assert_eq!(cell, (1, 0, 0));
    }
}
