//! Three dimensional view of flat model arrays
//!
//! SHEMAT stores cell properties as flat arrays with the `x` index varying
//! fastest, then `y`, then `z`. [Xyz] keeps that storage order and provides
//! `(i, j, k)` access on top of it, so converting between the two never
//! reorders anything.

// internal modules
use crate::error::{Error, Result};
use crate::utils::*;

// standard library
use std::ops::{Index, IndexMut};

// external crates
use serde::{Deserialize, Serialize};

/// Model dimensions, `IDIM`, `JDIM`, `KDIM`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Number of cells along x
    pub idim: usize,
    /// Number of cells along y
    pub jdim: usize,
    /// Number of cells along z
    pub kdim: usize,
}

impl Dimensions {
    pub fn new(idim: usize, jdim: usize, kdim: usize) -> Self {
        Self { idim, jdim, kdim }
    }

    /// Total number of cells
    pub fn volume(&self) -> usize {
        self.idim * self.jdim * self.kdim
    }

    /// Number of cells in a single horizontal layer
    pub fn layer(&self) -> usize {
        self.idim * self.jdim
    }

    /// Flat array position of cell `(i, j, k)`
    ///
    /// ```rust
    /// # use shemat::namelist::Dimensions;
    /// let dims = Dimensions::new(3, 2, 2);
    /// assert_eq!(dims.position(0, 0, 0), 0);
    /// assert_eq!(dims.position(2, 0, 0), 2);
    /// assert_eq!(dims.position(0, 1, 0), 3);
    /// assert_eq!(dims.position(0, 0, 1), 6);
    /// ```
    pub fn position(&self, i: usize, j: usize, k: usize) -> usize {
        i + self.idim * j + self.idim * self.jdim * k
    }

    /// Cell `(i, j, k)` for a flat array position
    pub fn cell(&self, position: usize) -> (usize, usize, usize) {
        // empty models have no cells, avoid dividing by zero
        let layer = self.layer().max(1);
        let idim = self.idim.max(1);
        let rem = position % layer;
        (rem % idim, rem / idim, position / layer)
    }

    /// Check a cell lies within the model
    pub fn contains(&self, i: usize, j: usize, k: usize) -> bool {
        i < self.idim && j < self.jdim && k < self.kdim
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} x {} x {}", self.idim, self.jdim, self.kdim)
    }
}

/// Coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Cell values addressable by `(i, j, k)`
///
/// ```rust
/// # use shemat::namelist::{Dimensions, Xyz};
/// let flat: Vec<f64> = (0..12).map(|n| n as f64).collect();
/// let xyz = Xyz::from_flat(Dimensions::new(3, 2, 2), &flat);
///
/// assert_eq!(xyz[(1, 0, 0)], 1.0);
/// assert_eq!(xyz[(0, 1, 0)], 3.0);
/// assert_eq!(xyz[(0, 0, 1)], 6.0);
/// assert_eq!(xyz.to_flat(), flat);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Xyz {
    dims: Dimensions,
    values: Vec<f64>,
}

impl Xyz {
    /// All cells set to the same value
    pub fn filled(dims: Dimensions, value: f64) -> Self {
        Self {
            dims,
            values: vec![value; dims.volume()],
        }
    }

    /// Arrange a flat array in file order into cells
    ///
    /// Cells beyond the end of a short array are left at zero, and values
    /// beyond the number of cells are ignored. Callers wanting to treat either
    /// as an error should compare lengths first.
    pub fn from_flat(dims: Dimensions, flat: &[f64]) -> Self {
        let mut values = flat.to_vec();
        values.resize(dims.volume(), 0.0);
        Self { dims, values }
    }

    /// Build from nested vectors indexed as `nested[i][j][k]`
    ///
    /// The nesting must be rectangular, otherwise a
    /// [DimensionMismatch](Error::DimensionMismatch) is returned.
    pub fn from_nested(nested: &[Vec<Vec<f64>>]) -> Result<Self> {
        let idim = nested.len();
        let jdim = nested.first().map_or(0, |x| x.len());
        let kdim = nested
            .first()
            .and_then(|x| x.first())
            .map_or(0, |y| y.len());
        let dims = Dimensions::new(idim, jdim, kdim);

        let mut xyz = Self::filled(dims, 0.0);
        for (i, plane) in nested.iter().enumerate() {
            check_length("nested x", jdim, plane.len())?;
            for (j, column) in plane.iter().enumerate() {
                check_length("nested y", kdim, column.len())?;
                for (k, value) in column.iter().enumerate() {
                    xyz[(i, j, k)] = *value;
                }
            }
        }
        Ok(xyz)
    }

    /// Nested vectors indexed as `nested[i][j][k]`
    pub fn to_nested(&self) -> Vec<Vec<Vec<f64>>> {
        (0..self.dims.idim)
            .map(|i| {
                (0..self.dims.jdim)
                    .map(|j| self.column(i, j))
                    .collect()
            })
            .collect()
    }

    /// Values in file order, `x` fastest then `y` then `z`
    pub fn to_flat(&self) -> Vec<f64> {
        self.values.clone()
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    /// Values in file order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, i: usize, j: usize, k: usize) -> Option<f64> {
        match self.dims.contains(i, j, k) {
            true => Some(self.values[self.dims.position(i, j, k)]),
            false => None,
        }
    }

    /// Vertical column of values at `(i, j)`, bottom to top
    pub fn column(&self, i: usize, j: usize) -> Vec<f64> {
        (0..self.dims.kdim).map(|k| self[(i, j, k)]).collect()
    }

    /// All values on the plane at `index` normal to `axis`
    ///
    /// The plane is returned flat, with the lower remaining axis varying
    /// fastest. For example a z slice has `x` fastest and `y` slowest.
    pub fn slice(&self, axis: Axis, index: usize) -> Result<Vec<f64>> {
        let Dimensions { idim, jdim, kdim } = self.dims;
        let limit = match axis {
            Axis::X => idim,
            Axis::Y => jdim,
            Axis::Z => kdim,
        };
        if index >= limit {
            return Err(Error::OutOfBounds(f!(
                "{axis:?} slice {index} outside of model with {limit} cells"
            )));
        }

        let slice = match axis {
            Axis::X => (0..kdim)
                .flat_map(|k| (0..jdim).map(move |j| (index, j, k)))
                .map(|c| self[c])
                .collect(),
            Axis::Y => (0..kdim)
                .flat_map(|k| (0..idim).map(move |i| (i, index, k)))
                .map(|c| self[c])
                .collect(),
            Axis::Z => (0..jdim)
                .flat_map(|j| (0..idim).map(move |i| (i, j, index)))
                .map(|c| self[c])
                .collect(),
        };
        Ok(slice)
    }
}

impl Index<(usize, usize, usize)> for Xyz {
    type Output = f64;

    fn index(&self, (i, j, k): (usize, usize, usize)) -> &Self::Output {
        &self.values[self.dims.position(i, j, k)]
    }
}

impl IndexMut<(usize, usize, usize)> for Xyz {
    fn index_mut(&mut self, (i, j, k): (usize, usize, usize)) -> &mut Self::Output {
        let position = self.dims.position(i, j, k);
        &mut self.values[position]
    }
}

fn check_length(variable: &str, expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(Error::DimensionMismatch {
            variable: variable.to_string(),
            expected,
            found,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn xyz() -> Xyz {
        let flat: Vec<f64> = (0..12).map(|n| n as f64).collect();
        Xyz::from_flat(Dimensions::new(3, 2, 2), &flat)
    }

    #[rstest]
    #[case(0, (0, 0, 0))]
    #[case(5, (2, 1, 0))]
    #[case(7, (1, 0, 1))]
    #[case(11, (2, 1, 1))]
    fn position_and_cell_agree(#[case] position: usize, #[case] cell: (usize, usize, usize)) {
        let dims = Dimensions::new(3, 2, 2);
        assert_eq!(dims.cell(position), cell);
        assert_eq!(dims.position(cell.0, cell.1, cell.2), position);
    }

    #[rstest]
    fn flat_order_is_x_fastest(xyz: Xyz) {
        let dims = xyz.dimensions();
        for k in 0..dims.kdim {
            for j in 0..dims.jdim {
                for i in 0..dims.idim {
                    assert_eq!(xyz[(i, j, k)], dims.position(i, j, k) as f64);
                }
            }
        }
    }

    #[test]
    fn short_arrays_are_zero_filled() {
        let xyz = Xyz::from_flat(Dimensions::new(2, 2, 1), &[1.0, 2.0, 3.0]);
        assert_eq!(xyz.to_flat(), vec![1.0, 2.0, 3.0, 0.0]);
    }

    #[test]
    fn long_arrays_are_truncated() {
        let xyz = Xyz::from_flat(Dimensions::new(1, 1, 2), &[1.0, 2.0, 3.0]);
        assert_eq!(xyz.to_flat(), vec![1.0, 2.0]);
    }

    #[rstest]
    fn nested_round_trip(xyz: Xyz) {
        let nested = xyz.to_nested();
        assert_eq!(nested.len(), 3);
        assert_eq!(nested[1][1], vec![4.0, 10.0]);
        assert_eq!(Xyz::from_nested(&nested).unwrap(), xyz);
    }

    #[test]
    fn ragged_nesting_rejected() {
        let nested = vec![vec![vec![1.0, 2.0]], vec![vec![1.0]]];
        assert!(matches!(
            Xyz::from_nested(&nested),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[rstest]
    fn columns(xyz: Xyz) {
        assert_eq!(xyz.column(2, 1), vec![5.0, 11.0]);
        assert_eq!(xyz.get(3, 0, 0), None);
        assert_eq!(xyz.get(2, 1, 1), Some(11.0));
    }

    #[rstest]
    #[case(Axis::X, 1, vec![1.0, 4.0, 7.0, 10.0])]
    #[case(Axis::Y, 0, vec![0.0, 1.0, 2.0, 6.0, 7.0, 8.0])]
    #[case(Axis::Z, 1, vec![6.0, 7.0, 8.0, 9.0, 10.0, 11.0])]
    fn slices(xyz: Xyz, #[case] axis: Axis, #[case] index: usize, #[case] expected: Vec<f64>) {
        assert_eq!(xyz.slice(axis, index).unwrap(), expected);
    }

    #[rstest]
    fn slice_out_of_bounds(xyz: Xyz) {
        assert!(xyz.slice(Axis::Z, 2).is_err());
    }
}
