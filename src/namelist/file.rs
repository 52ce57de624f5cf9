//! The [NamelistFile] type and its variable accessors
//!
//! A namelist file is kept as its raw lines, exactly as read, so that a file
//! that is not modified is written back byte for byte. Variables are only
//! interpreted when asked for.

// internal modules
use crate::error::{Error, Result};
use crate::namelist::bc::{self, BoundaryConditions, BoundaryKind, CellValue};
use crate::namelist::index::{is_header_line, HeaderIndex};
use crate::namelist::rle::{self, ValueFormat};
use crate::namelist::xyz::{Dimensions, Xyz};
use crate::options::{CodecOptions, WriteOptions};
use crate::readers::NamelistReader;
use crate::utils::*;

// standard library
use std::path::{Path, PathBuf};
use std::str::FromStr;

// external crates
use log::{debug, trace, warn};

/// Name used in messages for files that were never on disk
const IN_MEMORY: &str = "<in-memory namelist>";

/// SHEMAT namelist file (`.nml` input or `.nlo` output)
///
/// Variables are addressed by name using the rule in
/// [header_matches](crate::namelist::header_matches), and the first matching
/// header always wins.
///
/// Reading a boundary condition carrier (`POR`, `PRES`, `PERM`) caches the
/// Dirichlet flags of all three, which are then re-applied whenever one of
/// them is written. See [BoundaryConditions].
///
/// ```rust
/// # use shemat::namelist::NamelistFile;
/// # use shemat::options::WriteOptions;
/// let text = "# IDIM\n       10 \n# GEOLOGY\n3*1 1*2\n";
/// let mut nml: NamelistFile = text.parse().unwrap();
///
/// assert_eq!(nml.get("IDIM").unwrap(), "       10 \n");
/// assert_eq!(nml.get_value::<usize>("IDIM").unwrap(), 10);
/// assert_eq!(nml.get_array("GEOLOGY").unwrap(), vec![1.0, 1.0, 1.0, 2.0]);
///
/// nml.set_array("GEOLOGY", &[4.0, 4.0, 1.0, 1.0], &WriteOptions::new()).unwrap();
/// assert_eq!(nml.to_string(), "# IDIM\n       10 \n# GEOLOGY\n2*4 2*1\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct NamelistFile {
    /// Raw lines including their terminators
    lines: Vec<String>,
    /// Positions of every header line
    index: HeaderIndex,
    /// Where the file was read from, if anywhere
    path: Option<PathBuf>,
    /// Interpretation options
    options: CodecOptions,
    /// Cached Dirichlet flags, decoded on first use
    bcs: Option<BoundaryConditions>,
}

impl NamelistFile {
    /// Load namelist text from memory with default options
    pub fn parse_str(text: &str) -> Self {
        Self::with_options(text, CodecOptions::default())
    }

    /// Load namelist text from memory
    pub fn with_options(text: &str, options: CodecOptions) -> Self {
        let lines: Vec<String> = text.split_inclusive('\n').map(String::from).collect();
        let index = HeaderIndex::build(&lines);
        debug!(
            "Loaded {} lines with {} variable headers",
            lines.len(),
            index.headers().len()
        );
        Self {
            lines,
            index,
            path: None,
            options,
            bcs: None,
        }
    }

    /// Load namelist text read from a file
    pub(crate) fn from_source(text: &str, path: PathBuf, options: CodecOptions) -> Self {
        let mut nml = Self::with_options(text, options);
        nml.path = Some(path);
        nml
    }

    /// Path the file was read from
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn options(&self) -> CodecOptions {
        self.options
    }

    pub fn set_options(&mut self, options: CodecOptions) {
        self.options = options;
    }

    /// Raw lines, terminators included
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Names of every variable header, in file order
    ///
    /// Header lines are trimmed and have their leading `#` removed.
    pub fn variables(&self) -> Vec<String> {
        self.index
            .headers()
            .iter()
            .map(|&i| self.lines[i].trim().trim_start_matches('#').trim().to_string())
            .collect()
    }

    /// Check whether a header exists for the variable
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Re-read the file from disk, discarding all changes
    ///
    /// Also clears the cached boundary conditions, so that they are decoded
    /// from the fresh data on next use.
    pub fn reload(&mut self) -> Result<()> {
        let Some(path) = self.path.clone() else {
            return Err(Error::file_access(
                IN_MEMORY,
                std::io::Error::new(std::io::ErrorKind::NotFound, "namelist has no source file"),
            ));
        };
        *self = NamelistReader::new().options(self.options).parse(path)?;
        Ok(())
    }

    /// Write every line to a file
    ///
    /// The `.nml` extension is appended if the path does not already end with
    /// it. Returns the path actually written.
    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> Result<PathBuf> {
        let path = with_nml_extension(path.as_ref());
        std::fs::write(&path, self.to_string()).map_err(|e| Error::file_access(&path, e))?;
        debug!("Wrote {} lines to {}", self.lines.len(), path.display());
        Ok(path)
    }

    /// Line after the header of a variable, verbatim
    pub fn get(&self, name: &str) -> Result<String> {
        let header = self.require(name)?;
        self.lines
            .get(header + 1)
            .cloned()
            .ok_or_else(|| self.not_found(name))
    }

    /// Up to `n` lines following the header of a variable, verbatim
    pub fn get_lines(&self, name: &str, n: usize) -> Result<Vec<String>> {
        let header = self.require(name)?;
        let start = (header + 1).min(self.lines.len());
        let end = (start + n).min(self.lines.len());
        Ok(self.lines[start..end].to_vec())
    }

    /// Parse the trimmed line after the header of a variable
    ///
    /// ```rust
    /// # use shemat::namelist::NamelistFile;
    /// let nml = NamelistFile::parse_str("# TITLE\n model one \n# I0\n 2.5e3\n");
    /// assert_eq!(nml.get_value::<String>("TITLE").unwrap(), "model one");
    /// assert_eq!(nml.get_value::<f64>("I0").unwrap(), 2500.0);
    /// assert!(nml.get_value::<usize>("TITLE").is_err());
    /// ```
    pub fn get_value<T: FromStr>(&self, name: &str) -> Result<T> {
        let line = self.get(name)?;
        let value = line.trim();
        value.parse::<T>().map_err(|_| Error::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        })
    }

    /// Overwrite the line after the header of a variable
    pub fn set<V: std::fmt::Display>(&mut self, name: &str, value: V) -> Result<()> {
        self.set_line(name, value, 1)
    }

    /// Overwrite the line `offset` lines after the header of a variable
    pub fn set_line<V: std::fmt::Display>(
        &mut self,
        name: &str,
        value: V,
        offset: usize,
    ) -> Result<()> {
        let header = self.require(name)?;
        let target = header + offset;
        if target >= self.lines.len() {
            return Err(Error::OutOfBounds(f!(
                "line {offset} after \"{name}\" is past the end of {}",
                self.label()
            )));
        }

        let line = f!("{value}\n");
        let rebuild = is_header_line(&self.lines[target]) || is_header_line(&line);
        self.lines[target] = line;
        if rebuild {
            self.index = HeaderIndex::build(&self.lines);
        }
        if BoundaryKind::from_carrier(name).is_some() {
            self.invalidate_bcs();
        }
        trace!("Set line {target} for {name}");
        Ok(())
    }

    /// Model dimensions from the `IDIM`, `JDIM`, and `KDIM` scalars
    pub fn dimensions(&self) -> Result<Dimensions> {
        Ok(Dimensions::new(
            self.get_value("IDIM")?,
            self.get_value("JDIM")?,
            self.get_value("KDIM")?,
        ))
    }

    /// Array values exactly as stored, signs included
    pub fn get_array_raw(&self, name: &str) -> Result<Vec<f64>> {
        let header = self.require(name)?;
        let span = self.index.data_span(header, name);
        let text = self.lines[span].concat();
        let decoded = rle::decode(&text);

        for token in &decoded.malformed {
            if self.options.is_strict() {
                return Err(Error::MalformedToken {
                    variable: name.to_string(),
                    token: token.to_string(),
                    file: self.label(),
                });
            }
            warn!("Skipping malformed token \"{token}\" in {name}");
        }

        if decoded.values.is_empty() {
            return Err(self.not_found(name));
        }
        trace!("Decoded {} values for {name}", decoded.values.len());
        Ok(decoded.values)
    }

    /// Array values with boundary condition flags removed
    ///
    /// For the carriers `POR`, `PRES`, and `PERM` every value is returned as
    /// its magnitude, and the flags are cached (see [get_bcs](Self::get_bcs)).
    /// Any other variable is returned as stored.
    pub fn get_array(&mut self, name: &str) -> Result<Vec<f64>> {
        let raw = self.get_array_raw(name)?;
        match BoundaryKind::from_carrier(name) {
            Some(_) => {
                self.bcs_mut()?;
                Ok(bc::strip_signs(&raw))
            }
            None => Ok(raw),
        }
    }

    /// Array values as magnitudes with explicit Dirichlet flags
    ///
    /// Flags are taken from the signs as stored, ignoring the cache.
    pub fn get_cells(&self, name: &str) -> Result<Vec<CellValue>> {
        let raw = self.get_array_raw(name)?;
        Ok(raw.into_iter().map(CellValue::from_raw).collect())
    }

    /// Dirichlet boundary condition flags for every cell
    ///
    /// Decoded from the carriers on first use and cached until
    /// [reload](Self::reload) or [invalidate_bcs](Self::invalidate_bcs).
    pub fn get_bcs(&mut self) -> Result<&BoundaryConditions> {
        self.bcs_mut().map(|bcs| &*bcs)
    }

    /// Forget the cached boundary conditions
    pub fn invalidate_bcs(&mut self) {
        self.bcs = None;
    }

    /// Replace the data of an array variable
    ///
    /// Values are run-length encoded onto a single line, replacing all the
    /// data lines of the variable. The number format depends on the variable
    /// name (see [ValueFormat]). Values written to a carrier array are
    /// re-signed according to the cached boundary condition flags.
    ///
    /// Fails with [ArrayNotFound](Error::ArrayNotFound) without changing
    /// anything if there is no header for the variable.
    pub fn set_array(&mut self, name: &str, values: &[f64], options: &WriteOptions) -> Result<()> {
        let header = self.require_array(name)?;
        let signed = match BoundaryKind::from_carrier(name) {
            Some(kind) => self.apply_bcs(name, kind, values)?,
            None => values.to_vec(),
        };
        self.write_data(header, name, &signed, options);
        Ok(())
    }

    /// Replace the data of an array variable with explicitly flagged values
    ///
    /// If the variable is a boundary condition carrier, the cached flags for
    /// that kind are replaced by the flags given here. The sign of each
    /// magnitude is ignored, only the flag decides what is written.
    pub fn set_cells(
        &mut self,
        name: &str,
        cells: &[CellValue],
        options: &WriteOptions,
    ) -> Result<()> {
        let header = self.require_array(name)?;
        if let Some(kind) = BoundaryKind::from_carrier(name) {
            *self.bcs_mut()?.mask_mut(kind) = cells.iter().map(|c| c.dirichlet).collect();
        }
        let raw: Vec<f64> = cells.iter().map(CellValue::to_raw).collect();
        self.write_data(header, name, &raw, options);
        Ok(())
    }

    /// Replace the data of an array variable from a 3D structure
    ///
    /// The structure must have the dimensions of the model, otherwise a
    /// [DimensionMismatch](Error::DimensionMismatch) is returned and nothing
    /// is written.
    pub fn set_array_from_xyz(&mut self, name: &str, xyz: &Xyz, options: &WriteOptions) -> Result<()> {
        let dims = self.dimensions()?;
        if xyz.dimensions() != dims {
            warn!("{name} is {} but the model is {dims}", xyz.dimensions());
            return Err(Error::DimensionMismatch {
                variable: name.to_string(),
                expected: dims.volume(),
                found: xyz.dimensions().volume(),
            });
        }
        self.set_array(name, xyz.values(), options)
    }

    /// Volume variable as a 3D structure
    ///
    /// Short arrays are zero filled in lenient mode, with a warning, and are an
    /// error in strict mode. Long arrays are truncated.
    pub fn to_xyz(&mut self, name: &str) -> Result<Xyz> {
        let dims = self.dimensions()?;
        let values = self.get_array(name)?;
        self.check_length(name, dims.volume(), values.len())?;
        Ok(Xyz::from_flat(dims, &values))
    }

    /// Layer variable (`IDIM*JDIM` values) as a single layer 3D structure
    pub fn to_xy(&mut self, name: &str) -> Result<Xyz> {
        let dims = self.dimensions()?;
        let layer = Dimensions::new(dims.idim, dims.jdim, 1);
        let values = self.get_array(name)?;
        self.check_length(name, layer.volume(), values.len())?;
        Ok(Xyz::from_flat(layer, &values))
    }

    /// Set or clear the Dirichlet flag of a single cell
    ///
    /// The carrier array is rewritten straight away with default formatting.
    pub fn set_dirichlet(&mut self, kind: BoundaryKind, cell: usize, flag: bool) -> Result<()> {
        self.set_dirichlet_cells(kind, &[cell], flag)
    }

    /// Set or clear the Dirichlet flag of many cells at once
    pub fn set_dirichlet_cells(
        &mut self,
        kind: BoundaryKind,
        cells: &[usize],
        flag: bool,
    ) -> Result<()> {
        let carrier = kind.carrier();
        let magnitudes = self.get_array(carrier)?;
        let n_values = magnitudes.len();

        let mask = self.bcs_mut()?.mask_mut(kind);
        mask.resize(n_values, false);
        for &cell in cells {
            match mask.get_mut(cell) {
                Some(m) => *m = flag,
                None => {
                    return Err(Error::OutOfBounds(f!(
                        "cell {cell} outside of {carrier} with {n_values} values"
                    )))
                }
            }
        }
        debug!("Set {} {kind} boundary flags to {flag}", cells.len());

        self.set_array(carrier, &magnitudes, &WriteOptions::default())
    }

    /// Resize an array, filling every cell with its first value
    ///
    /// Used after changing the model dimensions.
    pub fn change_array_length(
        &mut self,
        name: &str,
        length: usize,
        options: &WriteOptions,
    ) -> Result<()> {
        let first = self.get_array(name)?[0];
        self.set_array(name, &vec![first; length], options)
    }

    /// First header matching the variable name
    pub(crate) fn find(&self, name: &str) -> Option<usize> {
        self.index.find(&self.lines, name)
    }

    fn require(&self, name: &str) -> Result<usize> {
        self.find(name).ok_or_else(|| self.not_found(name))
    }

    fn require_array(&self, name: &str) -> Result<usize> {
        self.find(name).ok_or_else(|| Error::ArrayNotFound {
            name: name.to_string(),
            file: self.label(),
        })
    }

    fn not_found(&self, name: &str) -> Error {
        Error::VariableNotFound {
            name: name.to_string(),
            file: self.label(),
        }
    }

    /// Source path or placeholder for use in messages
    fn label(&self) -> String {
        match &self.path {
            Some(p) => p.display().to_string(),
            None => IN_MEMORY.to_string(),
        }
    }

    /// Cached flags, decoding them from the carriers if needed
    fn bcs_mut(&mut self) -> Result<&mut BoundaryConditions> {
        let bcs = match self.bcs.take() {
            Some(bcs) => bcs,
            None => self.decode_bcs()?,
        };
        Ok(self.bcs.insert(bcs))
    }

    fn decode_bcs(&self) -> Result<BoundaryConditions> {
        let mut bcs = BoundaryConditions::default();
        for kind in BoundaryKind::ALL {
            match self.get_array_raw(kind.carrier()) {
                Ok(raw) => *bcs.mask_mut(kind) = bc::mask_from_raw(&raw),
                Err(Error::VariableNotFound { .. }) => {
                    debug!("No {} array, no {kind} boundary conditions", kind.carrier())
                }
                Err(e) => return Err(e),
            }
        }
        debug!(
            "Boundary conditions: {} temperature, {} concentration, {} head",
            bcs.count(BoundaryKind::Temperature),
            bcs.count(BoundaryKind::Concentration),
            bcs.count(BoundaryKind::Head)
        );
        Ok(bcs)
    }

    /// Negate the values of flagged cells of a carrier
    fn apply_bcs(&mut self, name: &str, kind: BoundaryKind, values: &[f64]) -> Result<Vec<f64>> {
        let strict = self.options.is_strict();
        let mask = self.bcs_mut()?.mask(kind);
        if mask.len() < values.len() {
            if strict {
                return Err(Error::DimensionMismatch {
                    variable: name.to_string(),
                    expected: mask.len(),
                    found: values.len(),
                });
            }
            warn!(
                "Writing {} values to {name} with {} {kind} flags, extra cells unflagged",
                values.len(),
                mask.len()
            );
        }
        Ok(bc::apply_signs(values, mask))
    }

    /// Replace all data lines of a variable with a single encoded line
    fn write_data(&mut self, header: usize, name: &str, values: &[f64], options: &WriteOptions) {
        let format = ValueFormat::for_variable(name, options);
        let line = f!("{}\n", rle::encode(values, format));
        let span = self.index.data_span(header, name);
        let replaced = span.len();
        self.lines.splice(span, [line]);
        if replaced != 1 {
            self.index = HeaderIndex::build(&self.lines);
        }
        debug!("Wrote {} values to {name} as {format:?}", values.len());
    }

    /// Compare an array length to the expected number of cells
    fn check_length(&self, name: &str, expected: usize, found: usize) -> Result<()> {
        if found < expected {
            if self.options.is_strict() {
                return Err(Error::DimensionMismatch {
                    variable: name.to_string(),
                    expected,
                    found,
                });
            }
            warn!(
                "{name} has {found} values, expected {expected}, the last {} cells are 0",
                expected - found
            );
        } else if found > expected {
            debug!("{name} has {found} values, ignoring all after the first {expected}");
        }
        Ok(())
    }
}

impl FromStr for NamelistFile {
    type Err = Error;

    /// Never fails, all interpretation is deferred to the accessors
    fn from_str(s: &str) -> Result<Self> {
        Ok(Self::parse_str(s))
    }
}

impl std::fmt::Display for NamelistFile {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for line in &self.lines {
            f.write_str(line)?;
        }
        Ok(())
    }
}

/// Append `.nml` to a path unless it already ends with it
fn with_nml_extension(path: &Path) -> PathBuf {
    let text = path.to_string_lossy();
    match text.ends_with(".nml") {
        true => path.to_path_buf(),
        false => PathBuf::from(f!("{text}.nml")),
    }
}
