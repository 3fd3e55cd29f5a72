//! JSON parse-error position extraction.
//!
//! # Responsibility
//! - Turn a parser error into a best-effort absolute char offset into the
//!   original input, so a one-character caret can be highlighted.
//!
//! # Invariants
//! - Extraction is best-effort: `None` means "no range", never an error.
//! - Extracted offsets are clamped into the input's char length.
//!
//! Scraping positions out of parser errors is fragile across parser
//! implementations, so the capability is a trait: the validator carries an
//! injected extractor and falls back to no range when it yields nothing.

use crate::validate::lines::line_table;
use once_cell::sync::Lazy;
use regex::Regex;

static AT_POSITION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"at position (\d+)").expect("valid position regex"));

/// Injectable capability mapping a parser error to a char offset.
pub trait PositionExtractor {
    fn extract(&self, err: &serde_json::Error, input: &str) -> Option<usize>;
}

/// Default extractor: converts `serde_json`'s 1-based line/column error
/// coordinates into an absolute char offset via the line table.
///
/// `serde_json` columns count bytes within the line, so the byte offset is
/// clamped to a char boundary before converting to a char offset.
pub struct LineColumnExtractor;

impl PositionExtractor for LineColumnExtractor {
    fn extract(&self, err: &serde_json::Error, input: &str) -> Option<usize> {
        if err.line() == 0 {
            return None;
        }
        let table = line_table(input);
        let line = table.get(err.line() - 1)?;

        let byte_in_line = err.column().saturating_sub(1).min(line.text.len());
        let chars_before = line.text
            .char_indices()
            .take_while(|(byte, _)| *byte < byte_in_line)
            .count();

        let total_chars = input.chars().count();
        Some((line.start + chars_before).min(total_chars.saturating_sub(1)))
    }
}

/// Extractor for parser front-ends whose error text embeds an absolute
/// position in the form `at position <digits>`.
pub struct MessageScrapeExtractor;

impl MessageScrapeExtractor {
    /// Scrapes a position out of arbitrary error text. Shared with FFI
    /// callers that validate using a host-side parser.
    pub fn scrape(message: &str) -> Option<usize> {
        AT_POSITION_RE
            .captures(message)
            .and_then(|captures| captures.get(1))
            .and_then(|digits| digits.as_str().parse::<usize>().ok())
    }
}

impl PositionExtractor for MessageScrapeExtractor {
    fn extract(&self, err: &serde_json::Error, _input: &str) -> Option<usize> {
        Self::scrape(&err.to_string())
    }
}
