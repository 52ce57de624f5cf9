//! Options controlling how files are interpreted and written
//!
//! Every option has a documented default so that the common case needs no
//! configuration at all. Option sets can also be loaded from JSON, where any
//! unrecognised key is rejected rather than silently ignored.
//!
//! ```rust
//! # use shemat::options::{CodecOptions, Leniency, WriteOptions};
//! let codec = CodecOptions::from_json(r#"{ "leniency": "strict" }"#).unwrap();
//! assert_eq!(codec.leniency, Leniency::Strict);
//!
//! // typos are caught
//! assert!(WriteOptions::from_json(r#"{ "highres": true }"#).is_err());
//! ```

// external crates
use serde::{Deserialize, Serialize};

/// How to treat irregular data in a file
///
/// SHEMAT output files are not always perfectly regular, and existing tooling
/// depends on the reader tolerating this. The default is therefore lenient.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Leniency {
    /// Skip malformed tokens and zero-fill short arrays, with warnings
    #[default]
    Lenient,
    /// Any malformed token or dimension shortfall is a hard error
    Strict,
}

/// Options applied to every read of a namelist file
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecOptions {
    /// Policy for malformed tokens and short arrays (default lenient)
    pub leniency: Leniency,
}

impl CodecOptions {
    /// Just calls Default::default(), nothing special to be initialised
    pub fn new() -> Self {
        Default::default()
    }

    /// Shortcut for strict options
    pub fn strict() -> Self {
        Self {
            leniency: Leniency::Strict,
        }
    }

    /// Parse options from a JSON object, rejecting unknown keys
    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    pub fn is_strict(&self) -> bool {
        self.leniency == Leniency::Strict
    }
}

/// Options applied when writing an array back into a namelist file
///
/// ```rust
/// # use shemat::options::WriteOptions;
/// let options = WriteOptions::new().high_res(true);
/// assert!(options.high_res);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WriteOptions {
    /// Write general floats as full precision scientific (`%e`) rather than
    /// two decimal fixed point (`%.2f`). Does not affect `PERM`, `HPR`,
    /// `GEOLOGY`, or `QBASAL3D`, which have fixed formats. Default false.
    pub high_res: bool,
}

impl WriteOptions {
    /// Just calls Default::default(), nothing special to be initialised
    pub fn new() -> Self {
        Default::default()
    }

    /// Toggle full precision output for general floats
    pub fn high_res(mut self, high_res: bool) -> Self {
        self.high_res = high_res;
        self
    }

    /// Parse options from a JSON object, rejecting unknown keys
    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_lenient_and_normal_precision() {
        assert_eq!(CodecOptions::new().leniency, Leniency::Lenient);
        assert!(!WriteOptions::new().high_res);
    }

    #[test]
    fn empty_json_gives_defaults() {
        assert_eq!(CodecOptions::from_json("{}").unwrap(), CodecOptions::new());
        assert_eq!(WriteOptions::from_json("{}").unwrap(), WriteOptions::new());
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(CodecOptions::from_json(r#"{"strict": true}"#).is_err());
        assert!(CodecOptions::from_json(r#"{"leniency": "sloppy"}"#).is_err());
    }

    #[test]
    fn high_res_from_json() {
        let options = WriteOptions::from_json(r#"{"high_res": true}"#).unwrap();
        assert!(options.high_res);
    }
}
