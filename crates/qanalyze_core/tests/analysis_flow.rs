use qanalyze_core::db::open_db_in_memory;
use qanalyze_core::{
    AnalysisMode, AnalysisReport, AnalysisService, AnalysisServiceError, AnalyzeError,
    DataAnalyzer, Insight, InsightKind, SqliteHistoryRepository,
};
use std::cell::Cell;

/// Scripted analyzer: counts calls and returns a canned report or failure.
struct StubAnalyzer {
    calls: Cell<u32>,
    fail: bool,
}

impl StubAnalyzer {
    fn ok() -> Self {
        Self {
            calls: Cell::new(0),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            calls: Cell::new(0),
            fail: true,
        }
    }
}

impl DataAnalyzer for &StubAnalyzer {
    fn analyze(&self, _input: &str, mode: AnalysisMode) -> Result<AnalysisReport, AnalyzeError> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            return Err(AnalyzeError::new("upstream 503"));
        }
        Ok(AnalysisReport {
            summary: format!("{mode} summary"),
            insights: vec![Insight {
                kind: InsightKind::Trend,
                title: "Upward drift".to_string(),
                description: "values rise steadily".to_string(),
                confidence: 0.9,
            }],
            recommendations: vec!["keep sampling".to_string()],
        })
    }
}

#[test]
fn successful_submission_is_recorded_in_history() {
    let conn = open_db_in_memory().unwrap();
    let analyzer = StubAnalyzer::ok();
    let service = AnalysisService::new(&analyzer, SqliteHistoryRepository::new(&conn));

    let record = service
        .analyze("a,b\n1,2", AnalysisMode::Quantum, Some("data.csv"))
        .unwrap();

    assert_eq!(record.mode, AnalysisMode::Quantum);
    assert_eq!(record.file_name.as_deref(), Some("data.csv"));
    assert_eq!(record.input_snippet, "a,b\n1,2");
    assert_eq!(record.results.insights.len(), 1);
    assert_eq!(analyzer.calls.get(), 1);

    let history = service.history().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0], record);
}

#[test]
fn invalid_input_blocks_submission_before_the_analyzer() {
    let conn = open_db_in_memory().unwrap();
    let analyzer = StubAnalyzer::ok();
    let service = AnalysisService::new(&analyzer, SqliteHistoryRepository::new(&conn));

    let err = service
        .analyze("a,b,c\n1,2", AnalysisMode::Quantum, None)
        .unwrap_err();

    match &err {
        AnalysisServiceError::Rejected(validation) => {
            assert_eq!(
                validation.to_string(),
                "CSV Structure Error: Rows 2 do not match header column count (3)."
            );
            assert_eq!(validation.ranges().len(), 1);
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    assert_eq!(analyzer.calls.get(), 0, "analyzer must not run");
    assert!(service.history().unwrap().is_empty());
}

#[test]
fn analyzer_failure_surfaces_one_generic_message_and_records_nothing() {
    let conn = open_db_in_memory().unwrap();
    let analyzer = StubAnalyzer::failing();
    let service = AnalysisService::new(&analyzer, SqliteHistoryRepository::new(&conn));

    let err = service
        .analyze(r#"{"a": 1}"#, AnalysisMode::Quantum, None)
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "An error occurred during analysis. Please try again."
    );
    assert_eq!(analyzer.calls.get(), 1);
    assert!(service.history().unwrap().is_empty());
}

#[test]
fn rapid_submissions_get_distinct_monotonic_ids() {
    let conn = open_db_in_memory().unwrap();
    let analyzer = StubAnalyzer::ok();
    let service = AnalysisService::new(&analyzer, SqliteHistoryRepository::new(&conn));

    let mut ids = Vec::new();
    for _ in 0..5 {
        let record = service
            .analyze("free text", AnalysisMode::Code, None)
            .unwrap();
        ids.push(record.id);
    }

    for pair in ids.windows(2) {
        assert!(pair[1] > pair[0], "ids must strictly increase: {ids:?}");
    }
}

#[test]
fn delete_record_removes_only_the_named_entry() {
    let conn = open_db_in_memory().unwrap();
    let analyzer = StubAnalyzer::ok();
    let service = AnalysisService::new(&analyzer, SqliteHistoryRepository::new(&conn));

    let first = service
        .analyze("notes", AnalysisMode::Internet, None)
        .unwrap();
    let second = service
        .analyze("more notes", AnalysisMode::Internet, None)
        .unwrap();

    service.delete_record(first.id).unwrap();
    let history = service.history().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, second.id);

    // Deleting again is a no-op.
    service.delete_record(first.id).unwrap();
    assert_eq!(service.history().unwrap().len(), 1);
}

#[test]
fn long_input_is_snippeted_in_the_record() {
    let conn = open_db_in_memory().unwrap();
    let analyzer = StubAnalyzer::ok();
    let service = AnalysisService::new(&analyzer, SqliteHistoryRepository::new(&conn));

    let input = "z".repeat(300);
    let record = service.analyze(&input, AnalysisMode::Code, None).unwrap();
    assert!(record.input_snippet.ends_with("..."));
    assert!(record.input_snippet.chars().count() < input.chars().count());
}
