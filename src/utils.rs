//! Common small functions used throughout the crate
//!
//! These are left public for the convenience of the user. For example the
//! C-style number formatting needed to write values SHEMAT will accept.

use std::fmt::LowerExp;

// Alias for the format! macro out of laziness
pub use std::format as f;

/// Extends primitives with more specific formatting options
pub trait NumberFmt {
    /// Better scientific number formatting
    ///
    /// The default is not very consistent for scientific in particular, so this
    /// allows easy definition. The output matches the C `%.<precision>e`
    /// convention used by SHEMAT and its Python tooling, i.e. the exponent is
    /// always signed and padded.
    ///
    /// Works for anything that can be represented as scientific using the
    /// LowerExp trait.
    ///
    /// ```rust
    /// # use shemat::utils::NumberFmt;
    /// let number = -1.0;
    /// assert_eq!(number.sci(5, 2), "-1.00000e+00".to_string());
    /// assert_eq!((1.0e-12).sci(2, 2), "1.00e-12".to_string());
    /// ```
    fn sci(&self, precision: usize, exp_pad: usize) -> String;
}

impl<T: LowerExp> NumberFmt for T {
    fn sci(&self, precision: usize, exp_pad: usize) -> String {
        let mut num = f!("{:.precision$e}", &self, precision = precision);
        // inf and NaN have no exponent to fix up
        let Some(position) = num.find('e') else {
            return num;
        };
        let exp = num.split_off(position);
        // Make sure the exponent is signed
        let (sign, exp) = match exp.strip_prefix("e-") {
            Some(exp) => ('-', exp),
            None => ('+', &exp[1..]),
        };
        // Pad the exponent with zeros if needed and put it back on the number
        num.push_str(&f!("e{}{:0>pad$}", sign, exp, pad = exp_pad));
        num
    }
}

/// Find the maximum value of a slice of f64
///
/// Rust only has a built-in max method for types that implement Ord. However,
/// floating-point types do not implement Ord because of NaN, so this is the
/// workaround. Returns `None` for an empty slice.
///
/// ```rust
/// # use shemat::utils::vec_f64_max;
/// let vector = vec![1.0, 2.0, 3.0];
/// assert_eq!(vec_f64_max(&vector), Some(3.0));
/// assert_eq!(vec_f64_max(&[]), None);
/// ```
pub fn vec_f64_max(vector: &[f64]) -> Option<f64> {
    vector.iter().copied().max_by(|a, b| a.total_cmp(b))
}

/// Find the minimum value of a slice of f64
///
/// ```rust
/// # use shemat::utils::vec_f64_min;
/// let vector = vec![1.0, 2.0, 3.0];
/// assert_eq!(vec_f64_min(&vector), Some(1.0))
/// ```
pub fn vec_f64_min(vector: &[f64]) -> Option<f64> {
    vector.iter().copied().min_by(|a, b| a.total_cmp(b))
}

/// Running sum of cell widths, starting at zero
///
/// Turns a list of cell widths (e.g. `DELX`) into the list of cell boundaries.
///
/// ```rust
/// # use shemat::utils::cumulative_bounds;
/// assert_eq!(cumulative_bounds(&[10.0, 20.0, 5.0]), vec![0.0, 10.0, 30.0, 35.0]);
/// ```
pub fn cumulative_bounds(widths: &[f64]) -> Vec<f64> {
    let mut bounds = Vec::with_capacity(widths.len() + 1);
    let mut last = 0.0;
    bounds.push(last);
    for w in widths {
        last += w;
        bounds.push(last);
    }
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 2, "0.00e+00")]
    #[case(1.5e-12, 2, "1.50e-12")]
    #[case(-2.0e5, 3, "-2.000e+05")]
    #[case(123.456, 6, "1.234560e+02")]
    fn scientific_formatting(#[case] value: f64, #[case] precision: usize, #[case] expected: &str) {
        assert_eq!(value.sci(precision, 2), expected);
    }

    #[test]
    fn scientific_formatting_non_finite() {
        assert_eq!(f64::INFINITY.sci(2, 2), "inf");
    }

    #[test]
    fn bounds_of_empty_widths() {
        assert_eq!(cumulative_bounds(&[]), vec![0.0]);
    }
}
