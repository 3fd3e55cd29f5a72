//! Core domain logic for qanalyze.
//!
//! Validation and error localization of raw analysis input, highlight
//! overlay segmentation, the external-analyzer contract and the bounded
//! analysis history store. This crate is the single source of truth for
//! those invariants; rendering and the generative call itself live in the
//! host application.

pub mod analyzer;
pub mod db;
pub mod highlight;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validate;

pub use analyzer::{analysis_brief, AnalyzeError, DataAnalyzer};
pub use highlight::{render_highlights, HighlightOverlay, Segment};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::mode::AnalysisMode;
pub use model::outcome::{ErrorRange, ValidationError, ValidationOutcome};
pub use model::record::{AnalysisRecord, RecordId, HISTORY_CAP};
pub use model::report::{AnalysisReport, Insight, InsightKind};
pub use repo::history_repo::{
    HistoryRepository, RepoError, RepoResult, SqliteHistoryRepository, HISTORY_STORAGE_KEY,
};
pub use service::analysis_service::{AnalysisService, AnalysisServiceError};
pub use validate::{validate, Validator};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
