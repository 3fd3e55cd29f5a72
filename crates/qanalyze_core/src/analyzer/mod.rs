//! External generative-analysis collaborator contract.
//!
//! # Responsibility
//! - Define the trait the core calls to obtain insights for validated
//!   input, and the opaque failure type it maps to a generic user message.
//! - Provide the per-mode analysis brief an implementation prepends to the
//!   submitted text.
//!
//! # Invariants
//! - The core never retries, cancels or times out an analysis call; one
//!   submission is one in-flight request owned by the implementation.
//! - A failure carries no partial result.

use crate::model::mode::AnalysisMode;
use crate::model::report::AnalysisReport;
use std::fmt::{Display, Formatter};

/// Opaque failure of the external analysis call.
///
/// The `detail` is for logs only; users see one generic retry-able message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeError {
    pub detail: String,
}

impl AnalyzeError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

impl Display for AnalyzeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "analysis call failed: {}", self.detail)
    }
}

impl std::error::Error for AnalyzeError {}

/// The generative-analysis service as seen by the core: text + mode in,
/// structured insight object out.
///
/// Implementations own all transport concerns (HTTP client, auth, request
/// shaping). Callers run validation first and only invoke this on
/// well-formed input.
pub trait DataAnalyzer {
    fn analyze(&self, input: &str, mode: AnalysisMode) -> Result<AnalysisReport, AnalyzeError>;
}

/// Analysis brief for one mode, prepended to the submitted text by
/// analyzer implementations.
pub fn analysis_brief(mode: AnalysisMode) -> &'static str {
    match mode {
        AnalysisMode::Quantum => {
            "Perform a quantum-inspired data analysis. Identify patterns, \
             potential quantum tunneling-like anomalies, and correlations."
        }
        AnalysisMode::Code => {
            "Perform a code review and calculation analysis. Identify \
             algorithmic complexity (Big O), potential bugs, security \
             vulnerabilities, and optimizations. Treat the input as code or \
             pseudocode."
        }
        AnalysisMode::Weather => {
            "Analyze this weather data. Summarize forecasts, identify \
             meteorological anomalies, trends, and potential impacts on \
             operations."
        }
        AnalysisMode::Internet => {
            "Analyze this internet/web data. specific tasks: Sentiment \
             analysis, keyword extraction, fact verification, and \
             summarization of key topics."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::analysis_brief;
    use crate::model::mode::AnalysisMode;

    #[test]
    fn every_mode_has_a_distinct_brief() {
        let briefs: Vec<_> = AnalysisMode::ALL.iter().map(|m| analysis_brief(*m)).collect();
        for (i, brief) in briefs.iter().enumerate() {
            assert!(!brief.is_empty());
            for other in &briefs[i + 1..] {
                assert_ne!(brief, other);
            }
        }
    }
}
