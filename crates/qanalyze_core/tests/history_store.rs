use qanalyze_core::db::{open_db, open_db_in_memory};
use qanalyze_core::{
    AnalysisMode, AnalysisRecord, AnalysisReport, HistoryRepository, SqliteHistoryRepository,
    HISTORY_CAP, HISTORY_STORAGE_KEY,
};
use rusqlite::params;

fn sample_record(id: i64) -> AnalysisRecord {
    AnalysisRecord {
        id,
        timestamp_ms: id,
        file_name: None,
        input_snippet: format!("input {id}"),
        mode: AnalysisMode::Quantum,
        results: AnalysisReport {
            summary: format!("summary {id}"),
            insights: Vec::new(),
            recommendations: Vec::new(),
        },
    }
}

#[test]
fn append_prepends_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHistoryRepository::new(&conn);

    repo.append(&sample_record(1)).unwrap();
    repo.append(&sample_record(2)).unwrap();
    repo.append(&sample_record(3)).unwrap();

    let records = repo.list().unwrap();
    let ids: Vec<_> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[test]
fn history_never_exceeds_the_cap() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHistoryRepository::new(&conn);

    for id in 0..(HISTORY_CAP as i64 + 10) {
        repo.append(&sample_record(id)).unwrap();
    }

    let records = repo.list().unwrap();
    assert_eq!(records.len(), HISTORY_CAP);
    // Oldest entries fell off; the newest survives at the front.
    assert_eq!(records[0].id, HISTORY_CAP as i64 + 9);
    assert_eq!(records.last().unwrap().id, 10);
}

#[test]
fn remove_deletes_by_identity_and_ignores_unknown_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHistoryRepository::new(&conn);

    repo.append(&sample_record(1)).unwrap();
    repo.append(&sample_record(2)).unwrap();

    repo.remove(1).unwrap();
    assert_eq!(repo.list().unwrap().len(), 1);

    // Unknown id is a no-op, not an error.
    repo.remove(999).unwrap();
    assert_eq!(repo.list().unwrap().len(), 1);
    assert_eq!(repo.list().unwrap()[0].id, 2);
}

#[test]
fn empty_store_lists_nothing_and_has_no_latest_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHistoryRepository::new(&conn);

    assert!(repo.list().unwrap().is_empty());
    assert_eq!(repo.latest_id().unwrap(), None);
    repo.remove(42).unwrap();
}

#[test]
fn latest_id_is_the_maximum_stored_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHistoryRepository::new(&conn);

    repo.append(&sample_record(10)).unwrap();
    repo.append(&sample_record(30)).unwrap();
    repo.append(&sample_record(20)).unwrap();

    assert_eq!(repo.latest_id().unwrap(), Some(30));
}

#[test]
fn history_survives_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.db");

    {
        let conn = open_db(&path).unwrap();
        let repo = SqliteHistoryRepository::new(&conn);
        repo.append(&sample_record(7)).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let repo = SqliteHistoryRepository::new(&conn);
    let records = repo.list().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, 7);
    assert_eq!(records[0].results.summary, "summary 7");
}

#[test]
fn list_is_stored_as_one_json_document_under_the_well_known_key() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHistoryRepository::new(&conn);
    repo.append(&sample_record(5)).unwrap();

    let raw: String = conn
        .query_row(
            "SELECT value FROM storage WHERE key = ?1;",
            params![HISTORY_STORAGE_KEY],
            |row| row.get(0),
        )
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(parsed.is_array());
    assert_eq!(parsed[0]["id"], 5);
    assert_eq!(parsed[0]["mode"], "quantum");
}
