//! Tokeniser for packed array data
//!
//! Array data are split on commas and any whitespace (including the line
//! breaks between data lines). Each resulting token is one of:
//!
//! | Token           | Example        | Meaning                       |
//! | --------------- | -------------- | ----------------------------- |
//! | `<value>`       | `0.25`         | a single value                |
//! | `<count>*<value>` | `3*1.00e-12` | the value repeated count times |
//!
//! Anything else is kept as [Token::Malformed] so that the caller can decide
//! whether to warn or fail. This includes runs longer than [MAX_RUN].

// external crates
use nom::branch::alt;
use nom::character::complete::{char, digit1};
use nom::combinator::{all_consuming, map, map_res, verify};
use nom::number::complete::double;
use nom::sequence::separated_pair;
use nom::IResult;

/// Longest run accepted in a `count*value` token
///
/// Far beyond the cell count of any real model, but small enough that
/// expanding the run cannot exhaust memory.
pub const MAX_RUN: usize = 10_000_000;

/// A single item of packed array data
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'a> {
    /// Plain numeric value
    Value(f64),
    /// Run-length item, `count*value`
    Run { count: usize, value: f64 },
    /// Neither of the above, kept verbatim
    Malformed(&'a str),
}

impl Token<'_> {
    /// Number of values this token expands to
    pub fn len(&self) -> usize {
        match self {
            Token::Value(_) => 1,
            Token::Run { count, .. } => *count,
            Token::Malformed(_) => 0,
        }
    }

    /// True only for tokens that expand to nothing
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Forward-only iterator over the tokens of some array text
///
/// ```rust
/// # use shemat::namelist::{Lexer, Token};
/// let tokens: Vec<Token> = Lexer::new("3*1.5, 2\n  abc").collect();
/// assert_eq!(
///     tokens,
///     vec![
///         Token::Run { count: 3, value: 1.5 },
///         Token::Value(2.0),
///         Token::Malformed("abc"),
///     ]
/// );
/// ```
pub struct Lexer<'a> {
    words: Box<dyn Iterator<Item = &'a str> + 'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str) -> Self {
        let words = text
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|w| !w.is_empty());
        Self {
            words: Box::new(words),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.words.next().map(classify)
    }
}

/// Interpret a single whitespace/comma free word
pub fn classify(word: &str) -> Token<'_> {
    match all_consuming(token)(word) {
        Ok((_, t)) => t,
        Err(_) => Token::Malformed(word),
    }
}

/// `<count>*<value>` or `<value>`
fn token(i: &str) -> IResult<&str, Token<'_>> {
    alt((
        map(run, |(count, value)| Token::Run { count, value }),
        map(double, Token::Value),
    ))(i)
}

/// Unsigned integer count and float value separated by `*`
fn run(i: &str) -> IResult<&str, (usize, f64)> {
    let count = verify(map_res(digit1, str::parse::<usize>), |c| *c <= MAX_RUN);
    separated_pair(count, char('*'), double)(i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", Token::Value(1.0))]
    #[case("-0.25", Token::Value(-0.25))]
    #[case("1.00e-12", Token::Value(1.0e-12))]
    #[case("1.", Token::Value(1.0))]
    #[case("3*1.5", Token::Run { count: 3, value: 1.5 })]
    #[case("2*-1.00e-12", Token::Run { count: 2, value: -1.0e-12 })]
    #[case("10*0", Token::Run { count: 10, value: 0.0 })]
    #[case("0*4", Token::Run { count: 0, value: 4.0 })]
    #[case("abc", Token::Malformed("abc"))]
    #[case("3*", Token::Malformed("3*"))]
    #[case("*3", Token::Malformed("*3"))]
    #[case("-2*1", Token::Malformed("-2*1"))]
    #[case("1.5*2", Token::Malformed("1.5*2"))]
    #[case("1.0x", Token::Malformed("1.0x"))]
    #[case("10000000*1", Token::Run { count: MAX_RUN, value: 1.0 })]
    #[case("10000001*1", Token::Malformed("10000001*1"))]
    #[case("99999999999*1", Token::Malformed("99999999999*1"))]
    #[case("18446744073709551615*1", Token::Malformed("18446744073709551615*1"))]
    #[case("99999999999999999999999*1", Token::Malformed("99999999999999999999999*1"))]
    fn classify_words(#[case] word: &str, #[case] expected: Token) {
        assert_eq!(classify(word), expected);
    }

    #[test]
    fn splits_on_commas_and_whitespace() {
        let tokens: Vec<Token> = Lexer::new(" 1,2 ,, 3\t4\n5\r\n").collect();
        assert_eq!(tokens.len(), 5);
        assert!(tokens.iter().all(|t| matches!(t, Token::Value(_))));
    }

    #[test]
    fn empty_text_has_no_tokens() {
        assert_eq!(Lexer::new("  \n ,").count(), 0);
    }

    #[test]
    fn token_lengths() {
        assert_eq!(Token::Value(1.0).len(), 1);
        assert_eq!(Token::Run { count: 4, value: 1.0 }.len(), 4);
        assert!(Token::Malformed("x").is_empty());
    }
}
