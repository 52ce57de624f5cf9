//! Dirichlet boundary condition flags
//!
//! SHEMAT has no separate storage for fixed-value (Dirichlet) boundary
//! conditions. Instead, a cell is flagged by storing the *negative* of a
//! property value in a carrier array:
//!
//! | Boundary      | Carrier array |
//! | ------------- | ------------- |
//! | Temperature   | `POR`         |
//! | Concentration | `PRES`        |
//! | Head          | `PERM`        |
//!
//! Within this crate values are always handled as a magnitude plus a flag
//! ([CellValue]), and the sign convention is only applied when reading or
//! writing the file.

// external crates
use serde::{Deserialize, Serialize};

/// Kind of Dirichlet boundary condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundaryKind {
    Temperature,
    Concentration,
    Head,
}

impl BoundaryKind {
    /// Every kind, in a fixed order
    pub const ALL: [BoundaryKind; 3] = [
        BoundaryKind::Temperature,
        BoundaryKind::Concentration,
        BoundaryKind::Head,
    ];

    /// Name of the array carrying the flags for this kind
    pub fn carrier(&self) -> &'static str {
        match self {
            BoundaryKind::Temperature => "POR",
            BoundaryKind::Concentration => "PRES",
            BoundaryKind::Head => "PERM",
        }
    }

    /// Kind whose flags are carried by a variable, if any
    ///
    /// ```rust
    /// # use shemat::namelist::BoundaryKind;
    /// assert_eq!(BoundaryKind::from_carrier("PERM"), Some(BoundaryKind::Head));
    /// assert_eq!(BoundaryKind::from_carrier("TEMP"), None);
    /// ```
    pub fn from_carrier(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.carrier() == name)
    }
}

impl std::fmt::Display for BoundaryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BoundaryKind::Temperature => "temperature",
            BoundaryKind::Concentration => "concentration",
            BoundaryKind::Head => "head",
        };
        write!(f, "{name}")
    }
}

/// A property value with its boundary flag made explicit
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellValue {
    /// Physical value, never negative for a value read from a file
    pub magnitude: f64,
    /// Cell is a fixed-value boundary
    pub dirichlet: bool,
}

impl CellValue {
    pub fn new(magnitude: f64, dirichlet: bool) -> Self {
        Self {
            magnitude,
            dirichlet,
        }
    }

    /// Interpret a value as stored in a carrier array
    ///
    /// ```rust
    /// # use shemat::namelist::CellValue;
    /// assert_eq!(CellValue::from_raw(-0.25), CellValue::new(0.25, true));
    /// assert_eq!(CellValue::from_raw(0.25), CellValue::new(0.25, false));
    /// ```
    pub fn from_raw(raw: f64) -> Self {
        if raw < 0.0 {
            Self::new(-raw, true)
        } else {
            Self::new(raw, false)
        }
    }

    /// Value as it should be stored in a carrier array
    ///
    /// Only the flag decides the sign, a negative magnitude is written as if
    /// it were positive.
    ///
    /// ```rust
    /// # use shemat::namelist::CellValue;
    /// assert_eq!(CellValue::new(0.5, true).to_raw(), -0.5);
    /// assert_eq!(CellValue::new(-0.5, false).to_raw(), 0.5);
    /// ```
    pub fn to_raw(&self) -> f64 {
        signed(self.magnitude, self.dirichlet)
    }
}

/// Boundary flags for every cell, one mask per kind
///
/// Masks are in file order and have one entry per value of the carrier array.
/// A missing carrier array gives an empty mask.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryConditions {
    pub temperature: Vec<bool>,
    pub concentration: Vec<bool>,
    pub head: Vec<bool>,
}

impl BoundaryConditions {
    pub fn mask(&self, kind: BoundaryKind) -> &[bool] {
        match kind {
            BoundaryKind::Temperature => &self.temperature,
            BoundaryKind::Concentration => &self.concentration,
            BoundaryKind::Head => &self.head,
        }
    }

    pub fn mask_mut(&mut self, kind: BoundaryKind) -> &mut Vec<bool> {
        match kind {
            BoundaryKind::Temperature => &mut self.temperature,
            BoundaryKind::Concentration => &mut self.concentration,
            BoundaryKind::Head => &mut self.head,
        }
    }

    /// Number of flagged cells for a kind
    pub fn count(&self, kind: BoundaryKind) -> usize {
        self.mask(kind).iter().filter(|f| **f).count()
    }

    /// Check whether a cell is flagged, out of range cells are not
    pub fn is_dirichlet(&self, kind: BoundaryKind, cell: usize) -> bool {
        self.mask(kind).get(cell).copied().unwrap_or(false)
    }
}

/// Build a mask from the signed values of a carrier array
pub fn mask_from_raw(raw: &[f64]) -> Vec<bool> {
    raw.iter().map(|v| *v < 0.0).collect()
}

/// Strip the sign convention from carrier values
///
/// Every value is returned as its magnitude, flagged or not. The sign only
/// marks a boundary and never describes the property itself.
pub fn strip_signs(raw: &[f64]) -> Vec<f64> {
    raw.iter().map(|v| v.abs()).collect()
}

/// Apply the sign convention to values about to be written
///
/// A flagged value is always written as `-|v|`, even if it was passed in
/// negative. Every other value is written as `|v|`, including values beyond
/// the end of the mask.
///
/// ```rust
/// # use shemat::namelist::bc::apply_signs;
/// let signed = apply_signs(&[0.1, 0.2, 0.3], &[false, true]);
/// assert_eq!(signed, vec![0.1, -0.2, 0.3]);
///
/// // the sign passed in is ignored
/// assert_eq!(apply_signs(&[-0.2, -0.3], &[true, false]), vec![-0.2, 0.3]);
/// ```
pub fn apply_signs(values: &[f64], mask: &[bool]) -> Vec<f64> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| signed(*v, mask.get(i).copied().unwrap_or(false)))
        .collect()
}

fn signed(value: f64, dirichlet: bool) -> f64 {
    match dirichlet {
        true => -value.abs(),
        false => value.abs(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carriers_round_trip() {
        for kind in BoundaryKind::ALL {
            assert_eq!(BoundaryKind::from_carrier(kind.carrier()), Some(kind));
        }
    }

    #[test]
    fn raw_values_decoded() {
        let cells: Vec<CellValue> = [-0.2, 0.1, 0.0]
            .into_iter()
            .map(CellValue::from_raw)
            .collect();
        assert_eq!(cells[0], CellValue::new(0.2, true));
        assert_eq!(cells[1], CellValue::new(0.1, false));
        assert!(!cells[2].dirichlet);
        assert_eq!(cells[0].to_raw(), -0.2);
    }

    #[test]
    fn mask_from_signed_values() {
        assert_eq!(mask_from_raw(&[0.1, -0.2, 0.0]), vec![false, true, false]);
    }

    #[test]
    fn strip_and_apply_are_inverse() {
        let mask = vec![true, false, true];
        let raw = vec![-1.0, 2.0, -3.0];
        let stripped = strip_signs(&raw);
        assert_eq!(stripped, vec![1.0, 2.0, 3.0]);
        assert_eq!(apply_signs(&stripped, &mask), raw);
    }

    #[test]
    fn unflagged_values_are_never_negative() {
        let mask = vec![true, false, false];
        assert_eq!(strip_signs(&[0.1, -0.2, 0.3]), vec![0.1, 0.2, 0.3]);
        assert_eq!(
            apply_signs(&[0.1, -0.2, -0.3, -0.4], &mask),
            vec![-0.1, 0.2, 0.3, 0.4]
        );
        assert_eq!(CellValue::new(-0.5, false).to_raw(), 0.5);
        assert_eq!(CellValue::new(-0.5, true).to_raw(), -0.5);
    }

    #[test]
    fn counts_and_lookups() {
        let bcs = BoundaryConditions {
            temperature: vec![true, false, true],
            ..Default::default()
        };
        assert_eq!(bcs.count(BoundaryKind::Temperature), 2);
        assert_eq!(bcs.count(BoundaryKind::Head), 0);
        assert!(bcs.is_dirichlet(BoundaryKind::Temperature, 2));
        assert!(!bcs.is_dirichlet(BoundaryKind::Temperature, 10));
    }
}
