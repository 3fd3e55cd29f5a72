//! Analysis submission use-case service.
//!
//! # Responsibility
//! - Gate every submission on structural validation.
//! - Invoke the external analyzer exactly once per accepted submission.
//! - Record successful analyses in bounded history with monotonic ids.
//!
//! # Invariants
//! - The analyzer is never called for input that fails validation.
//! - A record is appended only after the analyzer succeeds.
//! - Validation failures surface their exact message; analyzer failures
//!   surface one generic retry-able message.

use crate::analyzer::{AnalyzeError, DataAnalyzer};
use crate::model::mode::AnalysisMode;
use crate::model::outcome::{ValidationError, ValidationOutcome};
use crate::model::record::{
    allocate_record_id, derive_input_snippet, now_epoch_ms, AnalysisRecord, RecordId,
};
use crate::repo::history_repo::{HistoryRepository, RepoError, RepoResult};
use crate::validate::Validator;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Message shown for any external-analysis failure. The only failure class
/// originating outside the core's control, and the only retry-able one.
const ANALYZER_FAILURE_MESSAGE: &str = "An error occurred during analysis. Please try again.";

/// Service error for the submission flow.
#[derive(Debug)]
pub enum AnalysisServiceError {
    /// Input failed structural validation; submission blocked.
    Rejected(ValidationError),
    /// The external analysis call failed.
    Analyzer(AnalyzeError),
    /// History persistence failed after a successful analysis.
    Repo(RepoError),
}

impl Display for AnalysisServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected(err) => write!(f, "{err}"),
            Self::Analyzer(_) => f.write_str(ANALYZER_FAILURE_MESSAGE),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AnalysisServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Rejected(err) => Some(err),
            Self::Analyzer(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ValidationError> for AnalysisServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Rejected(value)
    }
}

impl From<AnalyzeError> for AnalysisServiceError {
    fn from(value: AnalyzeError) -> Self {
        Self::Analyzer(value)
    }
}

impl From<RepoError> for AnalysisServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service wrapping analyzer and history store behind one
/// submission API.
pub struct AnalysisService<A: DataAnalyzer, R: HistoryRepository> {
    analyzer: A,
    history: R,
    validator: Validator,
}

impl<A: DataAnalyzer, R: HistoryRepository> AnalysisService<A, R> {
    pub fn new(analyzer: A, history: R) -> Self {
        Self {
            analyzer,
            history,
            validator: Validator::new(),
        }
    }

    /// Replaces the default JSON position extractor.
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    /// Validates without submitting. Safe to call on every keystroke.
    pub fn validate(&self, input: &str, mode: AnalysisMode) -> ValidationOutcome {
        self.validator.validate(input, mode)
    }

    /// Runs one full submission: validate, analyze, record.
    ///
    /// Returns the stored record on success. On failure nothing is
    /// persisted and no partial result is returned.
    pub fn analyze(
        &self,
        input: &str,
        mode: AnalysisMode,
        file_name: Option<&str>,
    ) -> Result<AnalysisRecord, AnalysisServiceError> {
        if let Err(err) = self.validator.check(input, mode) {
            info!(
                "event=submission_rejected module=service status=rejected mode={} ranges={}",
                mode,
                err.ranges().len()
            );
            return Err(err.into());
        }

        let results = match self.analyzer.analyze(input, mode) {
            Ok(results) => results,
            Err(err) => {
                warn!(
                    "event=analysis_call module=service status=error mode={} error={}",
                    mode, err.detail
                );
                return Err(err.into());
            }
        };

        let id = allocate_record_id(self.history.latest_id()?, now_epoch_ms());
        let record = AnalysisRecord {
            id,
            timestamp_ms: id,
            file_name: file_name.map(str::to_string),
            input_snippet: derive_input_snippet(input),
            mode,
            results,
        };
        self.history.append(&record)?;

        info!(
            "event=analysis_call module=service status=ok mode={} record_id={}",
            mode, record.id
        );
        Ok(record)
    }

    /// Full history, newest first.
    pub fn history(&self) -> RepoResult<Vec<AnalysisRecord>> {
        self.history.list()
    }

    /// Deletes one history entry; unknown ids are a no-op.
    pub fn delete_record(&self, id: RecordId) -> RepoResult<()> {
        self.history.remove(id)
    }
}
