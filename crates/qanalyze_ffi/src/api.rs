//! FFI use-case API for host-UI-facing calls.
//!
//! # Responsibility
//! - Expose validation, highlight segmentation and analysis history to the
//!   host UI as stable, use-case-level functions.
//! - Keep error semantics simple: envelope responses, never exceptions.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - The generative analysis call stays on the host side; this layer only
//!   validates input and records results it is handed.

use log::warn;
use qanalyze_core::db::open_db;
use qanalyze_core::model::record::{allocate_record_id, derive_input_snippet, now_epoch_ms};
use qanalyze_core::validate::json_pos::MessageScrapeExtractor;
use qanalyze_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    render_highlights, validate, AnalysisMode, AnalysisRecord, AnalysisReport, ErrorRange,
    HistoryRepository, SqliteHistoryRepository,
};
use std::path::PathBuf;
use std::sync::OnceLock;

const HISTORY_DB_FILE_NAME: &str = "qanalyze_history.sqlite3";
static HISTORY_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking, never throws.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking, never throws.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Idempotent for identical `level + log_dir`; conflicts return an error.
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Char-offset span flagged by validation, in FFI-friendly form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanDto {
    pub start: u64,
    pub end: u64,
}

impl From<ErrorRange> for SpanDto {
    fn from(range: ErrorRange) -> Self {
        Self {
            start: range.start as u64,
            end: range.end as u64,
        }
    }
}

impl From<SpanDto> for ErrorRange {
    fn from(span: SpanDto) -> Self {
        ErrorRange::new(span.start as usize, span.end as usize)
    }
}

/// Validation envelope for the host UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResponse {
    /// Whether the input is acceptable for submission.
    pub ok: bool,
    /// Failure description to show verbatim; `None` when `ok`.
    pub message: Option<String>,
    /// Spans to highlight, sorted by start. Empty when `ok`.
    pub ranges: Vec<SpanDto>,
}

/// Validates raw input text against a mode tag.
///
/// # FFI contract
/// - Sync, pure, safe to call on every keystroke.
/// - Unknown mode tags fail the envelope instead of throwing.
#[flutter_rust_bridge::frb(sync)]
pub fn validate_input(text: String, mode: String) -> ValidationResponse {
    let mode = match mode.parse::<AnalysisMode>() {
        Ok(mode) => mode,
        Err(err) => {
            return ValidationResponse {
                ok: false,
                message: Some(err.to_string()),
                ranges: Vec::new(),
            };
        }
    };

    let outcome = validate(&text, mode);
    ValidationResponse {
        ok: outcome.is_ok(),
        ranges: outcome.ranges.iter().copied().map(SpanDto::from).collect(),
        message: outcome.message,
    }
}

/// One overlay segment for the highlight backdrop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlaySegmentDto {
    pub marked: bool,
    pub text: String,
}

/// Overlay envelope: ordered segments plus the trailing-break flag the
/// host needs to keep overlay and input line counts identical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayResponse {
    pub segments: Vec<OverlaySegmentDto>,
    pub trailing_break: bool,
}

/// Produces the highlight overlay segmentation for `text` and `ranges`.
///
/// # FFI contract
/// - Sync, pure; malformed ranges are clamped, never throw.
#[flutter_rust_bridge::frb(sync)]
pub fn highlight_segments(text: String, ranges: Vec<SpanDto>) -> OverlayResponse {
    let ranges: Vec<ErrorRange> = ranges.into_iter().map(ErrorRange::from).collect();
    let overlay = render_highlights(&text, &ranges);
    OverlayResponse {
        segments: overlay
            .segments
            .iter()
            .map(|segment| OverlaySegmentDto {
                marked: segment.is_mark(),
                text: segment.text().to_string(),
            })
            .collect(),
        trailing_break: overlay.trailing_break,
    }
}

/// Scrapes an `at position <digits>` char offset out of a host-side
/// parser's error text, for hosts validating with their own JSON parser.
///
/// # FFI contract
/// - Sync, pure; `None` when no position is embedded.
#[flutter_rust_bridge::frb(sync)]
pub fn scrape_error_position(message: String) -> Option<u64> {
    MessageScrapeExtractor::scrape(&message).map(|pos| pos as u64)
}

/// One history entry in list form.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntryDto {
    pub id: i64,
    pub timestamp_ms: i64,
    pub file_name: Option<String>,
    pub input_snippet: String,
    pub mode: String,
    pub summary: String,
    /// Full report JSON for detail rendering and export.
    pub results_json: String,
}

/// History list envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryListResponse {
    pub items: Vec<HistoryEntryDto>,
    pub message: String,
}

/// Generic action envelope for history mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryActionResponse {
    pub ok: bool,
    pub record_id: Option<i64>,
    pub message: String,
}

impl HistoryActionResponse {
    fn success(message: impl Into<String>, record_id: i64) -> Self {
        Self {
            ok: true,
            record_id: Some(record_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            record_id: None,
            message: message.into(),
        }
    }
}

/// Records one completed analysis in bounded history.
///
/// The host runs the generative call itself and hands the resulting report
/// JSON here; the input is re-validated so malformed submissions can never
/// enter history.
///
/// # FFI contract
/// - Sync call, DB-backed execution. Never panics.
/// - Returns the allocated record id on success.
#[flutter_rust_bridge::frb(sync)]
pub fn record_analysis(
    text: String,
    mode: String,
    file_name: Option<String>,
    report_json: String,
) -> HistoryActionResponse {
    let mode = match mode.parse::<AnalysisMode>() {
        Ok(mode) => mode,
        Err(err) => return HistoryActionResponse::failure(err.to_string()),
    };

    let outcome = validate(&text, mode);
    if let Some(message) = outcome.message {
        return HistoryActionResponse::failure(message);
    }

    let results: AnalysisReport = match serde_json::from_str(&report_json) {
        Ok(results) => results,
        Err(err) => {
            return HistoryActionResponse::failure(format!("invalid analysis report: {err}"));
        }
    };

    let appended = with_history_repo(|repo| {
        let id = allocate_record_id(repo.latest_id()?, now_epoch_ms());
        let record = AnalysisRecord {
            id,
            timestamp_ms: id,
            file_name: file_name.clone(),
            input_snippet: derive_input_snippet(&text),
            mode,
            results: results.clone(),
        };
        repo.append(&record)?;
        Ok(id)
    });

    match appended {
        Ok(id) => HistoryActionResponse::success("Analysis recorded.", id),
        Err(err) => {
            warn!("event=record_analysis module=ffi status=error error={err}");
            HistoryActionResponse::failure(format!("record_analysis failed: {err}"))
        }
    }
}

/// Lists the analysis history, newest first.
///
/// # FFI contract
/// - Sync call, DB-backed execution. Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn history_list() -> HistoryListResponse {
    let listed = with_history_repo(|repo| {
        let records = repo.list()?;
        let mut items = Vec::with_capacity(records.len());
        for record in records {
            let results_json = serde_json::to_string(&record.results)
                .unwrap_or_else(|_| "{}".to_string());
            items.push(HistoryEntryDto {
                id: record.id,
                timestamp_ms: record.timestamp_ms,
                file_name: record.file_name,
                input_snippet: record.input_snippet,
                mode: record.mode.to_string(),
                summary: record.results.summary,
                results_json,
            });
        }
        Ok(items)
    });

    match listed {
        Ok(items) => {
            let message = if items.is_empty() {
                "No analysis history found.".to_string()
            } else {
                format!("{} record(s).", items.len())
            };
            HistoryListResponse { items, message }
        }
        Err(err) => {
            warn!("event=history_list module=ffi status=error error={err}");
            HistoryListResponse {
                items: Vec::new(),
                message: format!("history_list failed: {err}"),
            }
        }
    }
}

/// Deletes one history entry by id; unknown ids are a no-op.
///
/// # FFI contract
/// - Sync call, DB-backed execution. Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn history_delete(id: i64) -> HistoryActionResponse {
    match with_history_repo(|repo| {
        repo.remove(id)?;
        Ok(id)
    }) {
        Ok(id) => HistoryActionResponse::success("Record deleted.", id),
        Err(err) => HistoryActionResponse::failure(format!("history_delete failed: {err}")),
    }
}

fn resolve_history_db_path() -> PathBuf {
    HISTORY_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("QANALYZE_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(HISTORY_DB_FILE_NAME)
        })
        .clone()
}

fn with_history_repo<T>(
    f: impl FnOnce(&SqliteHistoryRepository<'_>) -> Result<T, qanalyze_core::RepoError>,
) -> Result<T, String> {
    let db_path = resolve_history_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("history DB open failed: {err}"))?;
    let repo = SqliteHistoryRepository::new(&conn);
    f(&repo).map_err(|err| err.to_string())
}
