//! Format classification and structural validation of raw input text.
//!
//! # Responsibility
//! - Decide whether pasted/uploaded text is well-formed enough to analyze:
//!   JSON object/array, or a column-consistent delimited table.
//! - Localize failures to char ranges of the original input.
//!
//! # Invariants
//! - Pure and deterministic: no I/O, no shared state, safe to call on every
//!   keystroke.
//! - Decision order is fixed: emptiness, mode exemption, JSON sniff,
//!   tabular checks. Each step short-circuits.
//! - Emptiness is checked before mode exemption, so whitespace-only input
//!   is rejected in every mode.

pub mod delimiter;
pub mod json_pos;
pub mod lines;

use crate::model::mode::AnalysisMode;
use crate::model::outcome::{ErrorRange, ValidationError, ValidationOutcome};
use delimiter::detect_delimiter;
use json_pos::{LineColumnExtractor, PositionExtractor};
use lines::line_table;
use serde_json::Value;

/// Format classifier with a pluggable JSON error-position extractor.
///
/// The default extractor understands `serde_json` line/column coordinates;
/// callers wrapping a different parser front-end can supply their own.
pub struct Validator {
    extractor: Box<dyn PositionExtractor + Send + Sync>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    pub fn new() -> Self {
        Self::with_extractor(Box::new(LineColumnExtractor))
    }

    pub fn with_extractor(extractor: Box<dyn PositionExtractor + Send + Sync>) -> Self {
        Self { extractor }
    }

    /// Validates `input` against `mode`, returning the UI-facing outcome.
    pub fn validate(&self, input: &str, mode: AnalysisMode) -> ValidationOutcome {
        self.check(input, mode).into()
    }

    /// Typed variant of [`Validator::validate`].
    pub fn check(&self, input: &str, mode: AnalysisMode) -> Result<(), ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyInput);
        }

        // Code and internet submissions are routinely unstructured text.
        if !mode.requires_structure() {
            return Ok(());
        }

        if trimmed.starts_with('{') || trimmed.starts_with('[') {
            return self.check_json(input);
        }

        check_tabular(input)
    }

    /// JSON branch: the untrimmed input is parsed so extracted positions
    /// are offsets into the original string.
    fn check_json(&self, input: &str) -> Result<(), ValidationError> {
        match serde_json::from_str::<Value>(input) {
            Ok(Value::Object(_)) | Ok(Value::Array(_)) => Ok(()),
            Ok(_) => Err(ValidationError::StructuralType),
            Err(err) => {
                let position = self.extractor.extract(&err, input);
                Err(ValidationError::Syntax {
                    detail: err.to_string(),
                    position,
                })
            }
        }
    }
}

/// Validates with the default extractor. Convenience for callers that do
/// not customize position extraction.
pub fn validate(input: &str, mode: AnalysisMode) -> ValidationOutcome {
    Validator::new().validate(input, mode)
}

/// Tabular branch: delimiter detection on the first data line, then column
/// consistency for every following data line.
///
/// Blank lines are not data rows and are skipped for column logic, but
/// their chars still count toward the offsets of the lines after them.
fn check_tabular(input: &str) -> Result<(), ValidationError> {
    let lines = line_table(input);
    let data_lines: Vec<_> = lines
        .iter()
        .filter(|line| !line.text.trim().is_empty())
        .collect();

    if data_lines.len() < 2 {
        return Err(ValidationError::TooFewRows);
    }

    let (delimiter, expected_cols) =
        detect_delimiter(data_lines[0].text).ok_or(ValidationError::NoDelimiter)?;

    let mut rows = Vec::new();
    let mut ranges = Vec::new();
    for (index, line) in data_lines.iter().enumerate().skip(1) {
        let cols = line.text.split(delimiter).count();
        if cols != expected_cols {
            // 1-based data-row numbering, header = row 1.
            rows.push(index + 1);
            ranges.push(ErrorRange::new(line.start, line.start + line.chars));
        }
    }

    if rows.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::RaggedRows {
            expected_cols,
            rows,
            ranges,
        })
    }
}
