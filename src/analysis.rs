//! Formation based queries and edits
//!
//! The `GEOLOGY` array assigns every cell to a formation, numbered from 1.
//! The methods here use it to edit properties one formation at a time, and
//! to reduce 3D properties to maps.
//!
//! Maps are returned as flat "property_xy" vectors of `IDIM*JDIM` values with
//! `i` varying fastest, the same layout as a single layer of a SHEMAT array.
//! These can be written straight to an [AsciiGrid](crate::grid::AsciiGrid).

// internal modules
use crate::error::{Error, Result};
use crate::namelist::{Axis, BoundaryKind, NamelistFile, Xyz};
use crate::options::WriteOptions;
use crate::utils::*;

// standard library
use std::collections::{BTreeMap, HashMap};

// external crates
use log::debug;

/// Formation id of a `GEOLOGY` value
fn formation_of(value: f64) -> i64 {
    value.trunc() as i64
}

impl NamelistFile {
    /// Formation ids `1..=max(GEOLOGY)`
    ///
    /// SHEMAT numbers formations from 1, so every id up to the largest in use
    /// is included even if no cell is assigned to it.
    pub fn formation_ids(&self) -> Result<Vec<i64>> {
        let geology = self.get_array_raw("GEOLOGY")?;
        let max = vec_f64_max(&geology).map_or(0, formation_of);
        Ok((1..=max).collect())
    }

    /// Mask of the cells belonging to each formation present in `GEOLOGY`
    pub fn formation_masks(&self) -> Result<BTreeMap<i64, Vec<bool>>> {
        let geology = self.get_array_raw("GEOLOGY")?;
        let mut masks = BTreeMap::new();
        for (n, value) in geology.iter().enumerate() {
            let mask = masks
                .entry(formation_of(*value))
                .or_insert_with(|| vec![false; geology.len()]);
            mask[n] = true;
        }
        Ok(masks)
    }

    /// Set a property to the same value in every cell of one formation
    pub fn assign_value_to_formation(
        &mut self,
        property: &str,
        value: f64,
        formation: i64,
        options: &WriteOptions,
    ) -> Result<()> {
        let map = HashMap::from([(formation, value)]);
        self.update_property_from_map(property, &map, options)
    }

    /// Set a property per formation
    ///
    /// Cells in formations missing from the map keep their current value.
    ///
    /// ```rust
    /// # use std::collections::HashMap;
    /// # use shemat::namelist::NamelistFile;
    /// # use shemat::options::WriteOptions;
    /// let mut nml = NamelistFile::parse_str("# GEOLOGY\n1 2 3\n# LZ\n3*2.00\n");
    /// let map = HashMap::from([(1, 3.1), (3, 1.5)]);
    /// nml.update_property_from_map("LZ", &map, &WriteOptions::new()).unwrap();
    /// assert_eq!(nml.get("LZ").unwrap(), "3.10 2.00 1.50\n");
    /// ```
    pub fn update_property_from_map(
        &mut self,
        property: &str,
        map: &HashMap<i64, f64>,
        options: &WriteOptions,
    ) -> Result<()> {
        let geology = self.get_array_raw("GEOLOGY")?;
        let mut values = self.get_array(property)?;
        let mut changed = 0;
        for (value, g) in values.iter_mut().zip(&geology) {
            if let Some(new) = map.get(&formation_of(*g)) {
                *value = *new;
                changed += 1;
            }
        }
        debug!("Updated {changed} cells of {property} by formation");
        self.set_array(property, &values, options)
    }

    /// Vertical mean of a property at every `(i, j)`, considering only the
    /// cells of one formation
    ///
    /// Locations where the formation is absent are 0.
    pub fn mean_formation_value(&mut self, formation: i64, property: &str) -> Result<Vec<f64>> {
        let geology = self.to_xyz("GEOLOGY")?;
        let values = self.to_xyz(property)?;
        Ok(property_xy(&values, |i, j, k| {
            formation_of(geology[(i, j, k)]) == formation
        }))
    }

    /// Vertical mean of a property at every `(i, j)`
    pub fn global_mean_value(&mut self, property: &str) -> Result<Vec<f64>> {
        let values = self.to_xyz(property)?;
        Ok(property_xy(&values, |_, _, _| true))
    }

    /// Thickness of one formation at every `(i, j)`, from `DELZ`
    pub fn formation_isopach(&mut self, formation: i64) -> Result<Vec<f64>> {
        let geology = self.to_xyz("GEOLOGY")?;
        let delz = self.get_array_raw("DELZ")?;
        let dims = geology.dimensions();
        if delz.len() < dims.kdim {
            return Err(Error::DimensionMismatch {
                variable: "DELZ".to_string(),
                expected: dims.kdim,
                found: delz.len(),
            });
        }

        let mut isopach = Vec::with_capacity(dims.layer());
        for j in 0..dims.jdim {
            for i in 0..dims.idim {
                let thickness = (0..dims.kdim)
                    .filter(|&k| formation_of(geology[(i, j, k)]) == formation)
                    .map(|k| delz[k])
                    .sum::<f64>();
                isopach.push(thickness);
            }
        }
        Ok(isopach)
    }

    /// Values of a property on the plane through a real world coordinate
    ///
    /// See [Xyz::slice] for the ordering of the values, and
    /// [cell_index_at](Self::cell_index_at) for how the position is resolved.
    pub fn slice(
        &mut self,
        property: &str,
        axis: Axis,
        position: f64,
        origin: f64,
    ) -> Result<Vec<f64>> {
        let index = self.cell_index_at(axis, position, origin)?;
        self.to_xyz(property)?.slice(axis, index)
    }

    /// Flag every cell of one formation as a Dirichlet boundary
    ///
    /// For example to hold the temperature fixed in an "air" or "ocean"
    /// formation above the topography.
    pub fn fix_dirichlet_for_formation(&mut self, kind: BoundaryKind, formation: i64) -> Result<()> {
        let cells: Vec<usize> = self
            .get_array_raw("GEOLOGY")?
            .iter()
            .enumerate()
            .filter(|(_, g)| formation_of(**g) == formation)
            .map(|(n, _)| n)
            .collect();
        debug!("Fixing {kind} for {} cells of formation {formation}", cells.len());
        self.set_dirichlet_cells(kind, &cells, true)
    }
}

/// Mean over `k` of the cells accepted by the filter, `j` outer and `i` inner
fn property_xy<F>(values: &Xyz, accept: F) -> Vec<f64>
where
    F: Fn(usize, usize, usize) -> bool,
{
    let dims = values.dimensions();
    let mut xy = Vec::with_capacity(dims.layer());
    for j in 0..dims.jdim {
        for i in 0..dims.idim {
            let (sum, n) = (0..dims.kdim)
                .filter(|&k| accept(i, j, k))
                .fold((0.0, 0), |(sum, n), k| (sum + values[(i, j, k)], n + 1));
            xy.push(if n == 0 { 0.0 } else { sum / n as f64 });
        }
    }
    xy
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    /// 2 x 1 x 3 model, formation 2 sandwiched in the middle of column 0
    #[fixture]
    fn nml() -> NamelistFile {
        NamelistFile::parse_str(
            "\
# IDIM
2
# JDIM
1
# KDIM
3
# DELX
2*100.00
# DELY
100.00
# DELZ
10.00 20.00 30.00
# GEOLOGY
1 1 2 1 3 3
# TEMP
10.00 12.00 20.00 22.00 30.00 32.00
# POR
6*0.10
",
        )
    }

    #[rstest]
    fn ids_and_masks(nml: NamelistFile) {
        assert_eq!(nml.formation_ids().unwrap(), vec![1, 2, 3]);
        let masks = nml.formation_masks().unwrap();
        assert_eq!(masks.len(), 3);
        assert_eq!(masks[&2], vec![false, false, true, false, false, false]);
        assert_eq!(masks[&1].iter().filter(|m| **m).count(), 3);
    }

    #[rstest]
    fn assign_to_one_formation(mut nml: NamelistFile) {
        nml.assign_value_to_formation("TEMP", 5.0, 3, &WriteOptions::new())
            .unwrap();
        assert_eq!(
            nml.get_array("TEMP").unwrap(),
            vec![10.0, 12.0, 20.0, 22.0, 5.0, 5.0]
        );
    }

    #[rstest]
    fn formation_means(mut nml: NamelistFile) {
        assert_eq!(nml.mean_formation_value(1, "TEMP").unwrap(), vec![10.0, 17.0]);
        assert_eq!(nml.mean_formation_value(2, "TEMP").unwrap(), vec![20.0, 0.0]);
        assert_eq!(nml.global_mean_value("TEMP").unwrap(), vec![20.0, 22.0]);
    }

    #[rstest]
    fn isopach(mut nml: NamelistFile) {
        assert_eq!(nml.formation_isopach(1).unwrap(), vec![10.0, 30.0]);
        assert_eq!(nml.formation_isopach(3).unwrap(), vec![30.0, 30.0]);
        assert_eq!(nml.formation_isopach(4).unwrap(), vec![0.0, 0.0]);
    }

    #[rstest]
    fn slices_through_model(mut nml: NamelistFile) {
        let z = nml.slice("TEMP", Axis::Z, 1015.0, 1000.0).unwrap();
        assert_eq!(z, vec![20.0, 22.0]);
        let x = nml.slice("TEMP", Axis::X, 150.0, 0.0).unwrap();
        assert_eq!(x, vec![12.0, 22.0, 32.0]);
        assert!(nml.slice("TEMP", Axis::Y, 200.0, 0.0).is_err());
    }

    #[rstest]
    fn fix_formation_boundary(mut nml: NamelistFile) {
        nml.fix_dirichlet_for_formation(BoundaryKind::Temperature, 3)
            .unwrap();
        assert_eq!(nml.get("POR").unwrap(), "4*0.10 2*-0.10\n");
        assert_eq!(nml.get_bcs().unwrap().count(BoundaryKind::Temperature), 2);
        // magnitudes unaffected
        assert_eq!(nml.get_array("POR").unwrap(), vec![0.1; 6]);
    }
}
