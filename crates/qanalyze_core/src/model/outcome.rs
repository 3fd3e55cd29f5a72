//! Validation outcome, error taxonomy and error ranges.
//!
//! # Responsibility
//! - Define the half-open char-offset interval flagged by validation.
//! - Define the typed failure taxonomy and its user-facing rendering.
//!
//! # Invariants
//! - `ValidationOutcome.ranges` is non-empty only when `message` is present.
//! - `Display` output for each failure is stable; the UI shows it verbatim.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A half-open interval `[start, end)` over char offsets of the original
/// input, identifying a substring responsible for a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRange {
    pub start: usize,
    pub end: usize,
}

impl ErrorRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Typed validation failure.
///
/// Every variant is user-correctable and blocks only the submission step;
/// failures are returned as data, never panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Input is blank after trimming. Checked before mode exemption, so
    /// this applies to every mode.
    EmptyInput,
    /// Input parses as JSON but is a scalar, not an object or array.
    StructuralType,
    /// JSON parse failure with the parser's message and a best-effort
    /// char position extracted from it.
    Syntax {
        detail: String,
        position: Option<usize>,
    },
    /// Fewer than a header plus one data row.
    TooFewRows,
    /// No candidate delimiter yields at least two columns on the header.
    NoDelimiter,
    /// Data rows whose column count differs from the header's.
    ///
    /// `rows` are 1-based data-row numbers (header = row 1); `ranges`
    /// span each offending row's full line. Both are parallel and sorted.
    RaggedRows {
        expected_cols: usize,
        rows: Vec<usize>,
        ranges: Vec<ErrorRange>,
    },
}

/// Number of offending row numbers spelled out in the ragged-rows message.
/// Ranges are never capped, only the message text is.
const RAGGED_ROWS_MESSAGE_LIMIT: usize = 5;

impl ValidationError {
    /// Ranges to flag in the input for this failure.
    ///
    /// Empty for failures with no computable localization (empty input,
    /// structural type mismatch, shape errors).
    pub fn ranges(&self) -> Vec<ErrorRange> {
        match self {
            Self::EmptyInput | Self::StructuralType | Self::TooFewRows | Self::NoDelimiter => {
                Vec::new()
            }
            Self::Syntax { position, .. } => position
                .map(|pos| vec![ErrorRange::new(pos, pos + 1)])
                .unwrap_or_default(),
            Self::RaggedRows { ranges, .. } => ranges.clone(),
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput => f.write_str("Input is empty."),
            Self::StructuralType => {
                f.write_str("Valid JSON detected, but it must be an Object or Array.")
            }
            Self::Syntax { detail, .. } => write!(f, "JSON Syntax Error: {detail}"),
            Self::TooFewRows => f.write_str(
                "Format Error: Provide at least a header and data row for CSV, or valid JSON.",
            ),
            Self::NoDelimiter => f.write_str("CSV Error: Unable to detect a valid delimiter."),
            Self::RaggedRows {
                expected_cols,
                rows,
                ..
            } => {
                let preview = rows
                    .iter()
                    .take(RAGGED_ROWS_MESSAGE_LIMIT)
                    .map(usize::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                let suffix = if rows.len() > RAGGED_ROWS_MESSAGE_LIMIT {
                    format!("...and {} more", rows.len() - RAGGED_ROWS_MESSAGE_LIMIT)
                } else {
                    String::new()
                };
                write!(
                    f,
                    "CSV Structure Error: Rows {preview}{suffix} do not match header column count ({expected_cols})."
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Flat result of validating one input against one mode, in the shape the
/// surrounding UI consumes: an optional message plus the ranges to flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// Human-readable failure description; `None` means the input is
    /// acceptable.
    pub message: Option<String>,
    /// Char-offset spans responsible for the failure, sorted by `start`.
    /// Empty whenever `message` is `None`.
    pub ranges: Vec<ErrorRange>,
}

impl ValidationOutcome {
    /// Outcome for acceptable input.
    pub fn ok() -> Self {
        Self {
            message: None,
            ranges: Vec::new(),
        }
    }

    /// Whether the input was accepted.
    pub fn is_ok(&self) -> bool {
        self.message.is_none()
    }
}

impl From<Result<(), ValidationError>> for ValidationOutcome {
    fn from(value: Result<(), ValidationError>) -> Self {
        match value {
            Ok(()) => Self::ok(),
            Err(err) => Self {
                ranges: err.ranges(),
                message: Some(err.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorRange, ValidationError, ValidationOutcome};

    #[test]
    fn ragged_rows_message_caps_listed_rows_at_five() {
        let rows = vec![2, 3, 4, 5, 6, 7, 8];
        let ranges = rows
            .iter()
            .map(|row| ErrorRange::new(row * 10, row * 10 + 4))
            .collect::<Vec<_>>();
        let err = ValidationError::RaggedRows {
            expected_cols: 3,
            rows,
            ranges,
        };

        assert_eq!(
            err.to_string(),
            "CSV Structure Error: Rows 2, 3, 4, 5, 6...and 2 more do not match header column count (3)."
        );
        // All seven rows stay localized even though the message lists five.
        assert_eq!(err.ranges().len(), 7);
    }

    #[test]
    fn syntax_error_without_position_has_no_ranges() {
        let err = ValidationError::Syntax {
            detail: "unexpected end of input".to_string(),
            position: None,
        };
        assert!(err.ranges().is_empty());
        assert!(err.to_string().starts_with("JSON Syntax Error: "));
    }

    #[test]
    fn outcome_from_error_keeps_message_and_ranges_paired() {
        let outcome = ValidationOutcome::from(Err(ValidationError::Syntax {
            detail: "expected value at line 1 column 3".to_string(),
            position: Some(2),
        }));
        assert!(!outcome.is_ok());
        assert_eq!(outcome.ranges, vec![ErrorRange::new(2, 3)]);

        let ok = ValidationOutcome::from(Ok(()));
        assert!(ok.is_ok());
        assert!(ok.ranges.is_empty());
    }
}
