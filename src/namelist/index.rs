//! Index of variable header lines
//!
//! SHEMAT files have no grammar beyond "a line containing `#` introduces a
//! variable, the following lines hold its data". Lines containing `#` are
//! therefore recorded once when a file is loaded, and every lookup goes
//! through [header_matches] so the matching rule lives in exactly one place.

// standard library
use std::ops::Range;

// external crates
use log::trace;

/// Variable whose payload is exactly one line, regardless of what follows
const SINGLE_LINE_VARIABLE: &str = "AREAKT";

/// Decide whether a line is the header for the queried variable
///
/// Matching is by substring, which is how SHEMAT files have always been
/// addressed:
///
/// - a query starting with `#` must appear literally in the line
/// - any other query must appear as `"# " + query`
///
/// The second rule stops e.g. `PERM` matching a line that merely mentions
/// the word, but note that a query is still allowed to match a longer name.
///
/// ```rust
/// # use shemat::namelist::header_matches;
/// assert!(header_matches("IDIM", "# IDIM\n"));
/// assert!(header_matches("# TEMP", "# TEMP\n"));
/// assert!(!header_matches("TEMP", "TEMP\n"));
/// assert!(!header_matches("IDIM", "# JDIM\n"));
///
/// // substring semantics are kept on purpose
/// assert!(header_matches("TEMP", "# TEMPERATURE\n"));
/// ```
pub fn header_matches(query: &str, line: &str) -> bool {
    if query.starts_with('#') {
        line.contains(query)
    } else {
        line.contains(&format!("# {query}"))
    }
}

/// Check for the `#` that separates one variable from the next
pub fn is_header_line(line: &str) -> bool {
    line.contains('#')
}

/// Positions of every header line in a file
///
/// Built once per load, and only rebuilt if a header line is edited.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct HeaderIndex {
    /// Line numbers of every line containing `#`, in file order
    headers: Vec<usize>,
    /// Total number of lines in the file when indexed
    n_lines: usize,
}

impl HeaderIndex {
    /// Record every header line of the file
    pub fn build<S: AsRef<str>>(lines: &[S]) -> Self {
        let headers: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, l)| is_header_line(l.as_ref()))
            .map(|(i, _)| i)
            .collect();
        trace!("Indexed {} header lines", headers.len());
        Self {
            headers,
            n_lines: lines.len(),
        }
    }

    /// Line number of the first header matching the query
    pub fn find<S: AsRef<str>>(&self, lines: &[S], query: &str) -> Option<usize> {
        self.headers
            .iter()
            .copied()
            .find(|&i| header_matches(query, lines[i].as_ref()))
    }

    /// Lines holding the data of the variable whose header is at `header`
    ///
    /// The data run up to the next header or the end of the file, except for
    /// `AREAKT` which is always a single line.
    pub fn data_span(&self, header: usize, query: &str) -> Range<usize> {
        let start = header + 1;
        if query.contains(SINGLE_LINE_VARIABLE) {
            return start..(start + 1).min(self.n_lines);
        }
        let end = self
            .headers
            .iter()
            .copied()
            .find(|&h| h > header)
            .unwrap_or(self.n_lines);
        start..end
    }

    /// All header line numbers, in file order
    pub fn headers(&self) -> &[usize] {
        &self.headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn lines() -> Vec<&'static str> {
        vec![
            "# IDIM\n",     // 0
            "   2\n",       // 1
            "# TEMP\n",     // 2
            "1 2\n",        // 3
            "3 4\n",        // 4
            "# AREAKT\n",   // 5
            "5 6\n",        // 6
            "7 8\n",        // 7
            "# PERM\n",     // 8
            "2*1.00e-12\n", // 9
        ]
    }

    #[rstest]
    #[case("IDIM", "# IDIM", true)]
    #[case("IDIM", "#IDIM", false)]
    #[case("#IDIM", "#IDIM", true)]
    #[case("POR", "# PORE", true)]
    #[case("POR", "value POR", false)]
    #[case("# TEMP", "# TEMP", true)]
    fn matching_rules(#[case] query: &str, #[case] line: &str, #[case] expected: bool) {
        assert_eq!(header_matches(query, line), expected);
    }

    #[test]
    fn finds_first_matching_header() {
        let lines = lines();
        let index = HeaderIndex::build(&lines);
        assert_eq!(index.headers(), &[0, 2, 5, 8]);
        assert_eq!(index.find(&lines, "TEMP"), Some(2));
        assert_eq!(index.find(&lines, "# PERM"), Some(8));
        assert_eq!(index.find(&lines, "GEOLOGY"), None);
    }

    #[test]
    fn data_runs_to_next_header_or_end() {
        let lines = lines();
        let index = HeaderIndex::build(&lines);
        assert_eq!(index.data_span(2, "TEMP"), 3..5);
        assert_eq!(index.data_span(8, "PERM"), 9..10);
    }

    #[test]
    fn areakt_is_single_line() {
        let lines = lines();
        let index = HeaderIndex::build(&lines);
        assert_eq!(index.data_span(5, "AREAKT"), 6..7);
    }

    #[test]
    fn header_at_end_of_file_has_no_data() {
        let lines = vec!["# IDIM\n"];
        let index = HeaderIndex::build(&lines);
        assert!(index.data_span(0, "IDIM").is_empty());
        assert!(index.data_span(0, "AREAKT").is_empty());
    }
}
