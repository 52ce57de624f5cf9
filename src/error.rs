//! Error types for reading and writing SHEMAT and ASCII grid files
//!
//! Several of these conditions are only *reported* in the default lenient mode
//! (see [Leniency](crate::options::Leniency)), in which case they are logged as
//! warnings and the operation carries on. In strict mode they are returned.

use std::path::PathBuf;

use thiserror::Error;

/// The error type for all fallible operations in this crate
#[derive(Debug, Error)]
pub enum Error {
    /// A file could not be opened, read, or written
    #[error("could not access {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No header line matches the variable, or it holds no data
    #[error("variable \"{name}\" not found in {file}")]
    VariableNotFound { name: String, file: String },

    /// A data token is neither a number nor a `count*value` pair
    #[error("malformed token \"{token}\" in variable \"{variable}\" of {file}")]
    MalformedToken {
        variable: String,
        token: String,
        file: String,
    },

    /// Array length disagrees with the model dimensions
    #[error("variable \"{variable}\" has {found} values, expected {expected}")]
    DimensionMismatch {
        variable: String,
        expected: usize,
        found: usize,
    },

    /// Target of a write has no header line to anchor the replacement
    #[error("array \"{name}\" not found in {file}, nothing written")]
    ArrayNotFound { name: String, file: String },

    /// A scalar could not be interpreted as the requested type
    #[error("could not interpret \"{value}\" for variable \"{name}\"")]
    InvalidValue { name: String, value: String },

    /// ASCII grid file is not structured as expected
    #[error("invalid ASCII grid: {0}")]
    InvalidGrid(String),

    /// Coordinate or index lies outside of the model
    #[error("{0}")]
    OutOfBounds(String),
}

/// A convenience `Result` type alias using the crate's [Error] type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Helper for wrapping io errors with the offending path
    pub(crate) fn file_access<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }
}
