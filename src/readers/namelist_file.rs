//! Reader for SHEMAT namelist files
//!
//! Files are small (tens of thousands of values at most), so the whole file is
//! read in one go and interpretation is left to the [NamelistFile] accessors.

// internal modules
use crate::error::{Error, Result};
use crate::namelist::NamelistFile;
use crate::options::{CodecOptions, Leniency};

// standard library
use std::path::Path;

// external crates
use log::debug;

/// Reader for `.nml` and `.nlo` files, with optional strict interpretation
///
/// ```rust,no_run
/// # use shemat::readers::NamelistReader;
/// let nml = NamelistReader::new()
///     .strict()
///     .parse("path/to/model.nml")
///     .unwrap();
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct NamelistReader {
    options: CodecOptions,
}

impl NamelistReader {
    /// Just calls Default::default(), nothing special to be initialised
    pub fn new() -> Self {
        Default::default()
    }

    /// Treat malformed tokens and short arrays as errors
    pub fn strict(mut self) -> Self {
        self.options.leniency = Leniency::Strict;
        self
    }

    /// Replace all interpretation options at once
    pub fn options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    /// Read every line of the file at `path`
    pub fn parse<P: AsRef<Path>>(&self, path: P) -> Result<NamelistFile> {
        let path = path.as_ref();
        debug!("Reading namelist from {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|e| Error::file_access(path, e))?;
        Ok(NamelistFile::from_source(
            &text,
            path.to_path_buf(),
            self.options,
        ))
    }
}
