//! Analysis history record.
//!
//! # Responsibility
//! - Define the persisted history entry for one successful analysis.
//! - Derive the truncated input preview stored with each entry.
//!
//! # Invariants
//! - `id` is the creation epoch-millisecond timestamp and is unique within
//!   one history list, including across rapid successive saves.
//! - History is bounded: at most [`HISTORY_CAP`] newest-first entries.

use crate::model::mode::AnalysisMode;
use crate::model::report::AnalysisReport;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Stable identity of a history entry (creation time in epoch ms).
pub type RecordId = i64;

/// Maximum number of history entries retained; oldest beyond this are
/// discarded on append.
pub const HISTORY_CAP: usize = 50;

/// Char length of the stored input preview before truncation.
pub const SNIPPET_CHAR_LIMIT: usize = 100;

/// One saved analysis: identity, provenance and the opaque result object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: RecordId,
    /// Creation time in epoch milliseconds. Equals `id` in practice; kept
    /// as its own field so identity and display time can diverge later.
    pub timestamp_ms: i64,
    /// Name of the ingested file, when the input came from one.
    pub file_name: Option<String>,
    /// Truncated preview of the analyzed input.
    pub input_snippet: String,
    pub mode: AnalysisMode,
    /// Result object returned by the external analysis call, stored as-is.
    pub results: AnalysisReport,
}

/// Derives the stored input preview: the first [`SNIPPET_CHAR_LIMIT`] chars
/// with a `...` marker when the input was longer.
pub fn derive_input_snippet(input: &str) -> String {
    let mut snippet: String = input.chars().take(SNIPPET_CHAR_LIMIT).collect();
    if input.chars().count() > SNIPPET_CHAR_LIMIT {
        snippet.push_str("...");
    }
    snippet
}

/// Allocates a record id that is monotonically distinct from `last_id`.
///
/// Ids are creation timestamps, so two saves inside the same millisecond
/// would collide; the allocator bumps past the last known id instead.
pub fn allocate_record_id(last_id: Option<RecordId>, now_ms: i64) -> RecordId {
    match last_id {
        Some(last) if now_ms <= last => last + 1,
        _ => now_ms,
    }
}

/// Current wall-clock time in epoch milliseconds.
///
/// Clamps to zero for clocks before the epoch rather than failing; record
/// ids only need to be distinct, not astronomically correct.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
