//! Delimiter detection for tabular input.
//!
//! The field separator is chosen by maximum column yield on the header
//! line. The heuristic can misfire on prose that happens to contain a
//! frequent candidate (commas inside a pipe-delimited table); that
//! behavior is deliberate and must not be "fixed" with extra tie-breaks.

/// Candidate separators, in tie-break priority order.
pub const DELIMITER_CANDIDATES: [char; 4] = [',', ';', '\t', '|'];

/// Picks the candidate splitting `header` into the most columns.
///
/// Ties keep the earlier candidate in [`DELIMITER_CANDIDATES`] order.
/// Returns `None` when no candidate yields at least two columns, i.e. the
/// header contains no usable separator at all.
pub fn detect_delimiter(header: &str) -> Option<(char, usize)> {
    let mut best = None;
    let mut max_cols = 0usize;

    for candidate in DELIMITER_CANDIDATES {
        let cols = header.split(candidate).count();
        if cols > max_cols {
            max_cols = cols;
            best = Some(candidate);
        }
    }

    if max_cols < 2 {
        return None;
    }
    best.map(|delimiter| (delimiter, max_cols))
}

#[cfg(test)]
mod tests {
    use super::detect_delimiter;

    #[test]
    fn highest_column_yield_wins() {
        // Semicolon gives 3 columns, comma only 2.
        assert_eq!(detect_delimiter("a;b;c,d"), Some((';', 3)));
    }

    #[test]
    fn ties_resolve_in_candidate_order() {
        // Comma and pipe both give 2 columns; comma is listed first.
        assert_eq!(detect_delimiter("a,b|c"), Some((',', 2)));
    }

    #[test]
    fn tab_and_pipe_are_recognized() {
        assert_eq!(detect_delimiter("a\tb\tc"), Some(('\t', 3)));
        assert_eq!(detect_delimiter("a|b"), Some(('|', 2)));
    }

    #[test]
    fn header_without_separator_is_rejected() {
        assert_eq!(detect_delimiter("plain header"), None);
        assert_eq!(detect_delimiter(""), None);
    }
}
