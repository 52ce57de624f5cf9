//! Run-length decoding and encoding of array data
//!
//! Decoding expands every [Token] into its values in file order. Encoding
//! collapses consecutive identical values into `count*value` tokens, each
//! value formatted according to the variable being written (see
//! [ValueFormat]).

// internal modules
use crate::namelist::lexer::{Lexer, Token};
use crate::options::WriteOptions;
use crate::utils::*;

// external crates
use itertools::Itertools;

/// Expanded values plus any tokens that could not be interpreted
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Decoded<'a> {
    /// Every value in file order, run-length items expanded
    pub values: Vec<f64>,
    /// Tokens that were skipped, verbatim
    pub malformed: Vec<&'a str>,
}

/// Expand packed array text into values
///
/// Malformed tokens, including runs longer than
/// [MAX_RUN](crate::namelist::MAX_RUN), contribute nothing to the
/// values and are collected for reporting instead.
///
/// ```rust
/// # use shemat::namelist::decode;
/// let decoded = decode("3*1.5 2, oops\n 0.25");
/// assert_eq!(decoded.values, vec![1.5, 1.5, 1.5, 2.0, 0.25]);
/// assert_eq!(decoded.malformed, vec!["oops"]);
/// ```
pub fn decode(text: &str) -> Decoded<'_> {
    let mut decoded = Decoded::default();
    for token in Lexer::new(text) {
        match token {
            Token::Value(value) => decoded.values.push(value),
            Token::Run { count, value } => {
                decoded.values.extend(std::iter::repeat(value).take(count))
            }
            Token::Malformed(word) => decoded.malformed.push(word),
        }
    }
    decoded
}

/// Collapse values into a single line of packed array text
///
/// Consecutive equal values become `count*value`, single values are written
/// bare, and tokens are joined by single spaces. No line terminator is added.
///
/// ```rust
/// # use shemat::namelist::{encode, ValueFormat};
/// let text = encode(&[1.0, 1.0, 1.0, 2.0], ValueFormat::Fixed);
/// assert_eq!(text, "3*1.00 2.00");
///
/// let text = encode(&[0.0, 0.0, 1.0e-12], ValueFormat::Permeability);
/// assert_eq!(text, "2*0 1.00e-12");
/// ```
pub fn encode(values: &[f64], format: ValueFormat) -> String {
    values
        .iter()
        .dedup_with_count()
        .map(|(count, value)| match count {
            1 => format.apply(*value),
            _ => f!("{count}*{}", format.apply(*value)),
        })
        .join(" ")
}

/// Number format used for writing values of a variable
///
/// Chosen by the exact variable name, see [ValueFormat::for_variable].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    /// Scientific with 2 decimals, zero written as a plain `0` (`PERM`, `HPR`)
    Permeability,
    /// Truncated integer (`GEOLOGY`)
    Integer,
    /// Scientific with 3 decimals (`QBASAL3D`)
    HeatFlow,
    /// Full precision scientific with 6 decimals (any other, high resolution)
    Precise,
    /// Fixed point with 2 decimals (any other, the default)
    Fixed,
}

impl ValueFormat {
    /// Pick the format for a variable name
    ///
    /// The fixed formats for specific variables take precedence over the
    /// `high_res` option, which only affects the general case.
    ///
    /// ```rust
    /// # use shemat::namelist::ValueFormat;
    /// # use shemat::options::WriteOptions;
    /// let options = WriteOptions::new().high_res(true);
    /// assert_eq!(ValueFormat::for_variable("PERM", &options), ValueFormat::Permeability);
    /// assert_eq!(ValueFormat::for_variable("TEMP", &options), ValueFormat::Precise);
    /// ```
    pub fn for_variable(name: &str, options: &WriteOptions) -> Self {
        match name {
            "PERM" | "HPR" => Self::Permeability,
            "GEOLOGY" => Self::Integer,
            "QBASAL3D" => Self::HeatFlow,
            _ if options.high_res => Self::Precise,
            _ => Self::Fixed,
        }
    }

    /// Format a single value
    pub fn apply(&self, value: f64) -> String {
        match self {
            Self::Permeability if value == 0.0 => "0".to_string(),
            Self::Permeability => value.sci(2, 2),
            Self::Integer => f!("{}", value.trunc() as i64),
            Self::HeatFlow => value.sci(3, 2),
            Self::Precise => value.sci(6, 2),
            Self::Fixed => f!("{value:.2}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ValueFormat::Permeability, 0.0, "0")]
    #[case(ValueFormat::Permeability, 1.0e-12, "1.00e-12")]
    #[case(ValueFormat::Permeability, 3.456e-15, "3.46e-15")]
    #[case(ValueFormat::Integer, 2.0, "2")]
    #[case(ValueFormat::Integer, 2.9, "2")]
    #[case(ValueFormat::Integer, -1.5, "-1")]
    #[case(ValueFormat::HeatFlow, 0.06, "6.000e-02")]
    #[case(ValueFormat::Precise, 12.5, "1.250000e+01")]
    #[case(ValueFormat::Fixed, 0.1, "0.10")]
    #[case(ValueFormat::Fixed, 273.159, "273.16")]
    #[case(ValueFormat::Fixed, 1.0e5, "100000.00")]
    fn value_formats(#[case] format: ValueFormat, #[case] value: f64, #[case] expected: &str) {
        assert_eq!(format.apply(value), expected);
    }

    #[rstest]
    #[case("PERM", false, ValueFormat::Permeability)]
    #[case("HPR", true, ValueFormat::Permeability)]
    #[case("GEOLOGY", true, ValueFormat::Integer)]
    #[case("QBASAL3D", false, ValueFormat::HeatFlow)]
    #[case("TEMP", false, ValueFormat::Fixed)]
    #[case("TEMP", true, ValueFormat::Precise)]
    #[case("PERMX", false, ValueFormat::Fixed)]
    fn format_selection(#[case] name: &str, #[case] high_res: bool, #[case] expected: ValueFormat) {
        let options = WriteOptions::new().high_res(high_res);
        assert_eq!(ValueFormat::for_variable(name, &options), expected);
    }

    #[test]
    fn decode_runs_and_values() {
        let decoded = decode("2*-1.00e-12 1.00e-12\n");
        assert_eq!(decoded.values, vec![-1.0e-12, -1.0e-12, 1.0e-12]);
        assert!(decoded.malformed.is_empty());
    }

    #[test]
    fn decode_zero_count_run() {
        assert!(decode("0*5").values.is_empty());
    }

    #[test]
    fn oversized_runs_are_malformed() {
        let decoded = decode("1.5 18446744073709551615*1 99999999999*2 2*3");
        assert_eq!(decoded.values, vec![1.5, 3.0, 3.0]);
        assert_eq!(
            decoded.malformed,
            vec!["18446744073709551615*1", "99999999999*2"]
        );
    }

    #[test]
    fn encode_empty() {
        assert_eq!(encode(&[], ValueFormat::Fixed), "");
    }

    #[test]
    fn encode_does_not_merge_non_adjacent() {
        assert_eq!(encode(&[1.0, 2.0, 1.0], ValueFormat::Integer), "1 2 1");
    }

    #[test]
    fn encoding_is_shorter_for_runs() {
        let values = vec![0.25; 100];
        assert_eq!(encode(&values, ValueFormat::Fixed), "100*0.25");
    }

    #[test]
    fn decode_inverts_encode_for_two_decimal_values() {
        let values: Vec<f64> = [15, 15, 15, 20, -3, -3, 0, 12345, 12345]
            .iter()
            .map(|n| *n as f64 / 100.0)
            .collect();
        let text = encode(&values, ValueFormat::Fixed);
        assert_eq!(decode(&text).values, values);
    }
}
