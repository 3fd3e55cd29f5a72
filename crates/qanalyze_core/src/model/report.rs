//! Analysis report payload returned by the external analyzer.
//!
//! # Responsibility
//! - Define the typed shape of the generative-analysis response the core
//!   stores and hands back to the UI.
//!
//! # Invariants
//! - `Insight::confidence` is expected in `[0, 1]`; `clamped_confidence`
//!   is the defensive accessor for display math.

use serde::{Deserialize, Serialize};

/// Coarse insight category tags produced by the analyzer.
///
/// Unknown tags from newer analyzer versions decode as `Other` instead of
/// failing the whole report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InsightKind {
    Trend,
    Anomaly,
    QuantumSync,
    Recommendation,
    BugRisk,
    Performance,
    Forecast,
    Sentiment,
    #[serde(other)]
    Other,
}

/// One insight item inside an [`AnalysisReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    /// Serialized as `type` to match the analyzer response schema.
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    /// Analyzer-reported confidence in `[0, 1]`.
    pub confidence: f64,
}

impl Insight {
    /// Confidence clamped into `[0, 1]` for percentage rendering.
    pub fn clamped_confidence(&self) -> f64 {
        self.confidence.clamp(0.0, 1.0)
    }
}

/// Structured insight object returned by one external analysis call.
///
/// The core treats this as opaque cargo: it is stored in history and
/// returned to the caller, never interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub summary: String,
    pub insights: Vec<Insight>,
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::{AnalysisReport, InsightKind};

    #[test]
    fn report_decodes_analyzer_response_shape() {
        let raw = r#"{
            "summary": "Stable signal.",
            "insights": [
                {"type": "ANOMALY", "title": "Spike", "description": "t=3", "confidence": 0.82},
                {"type": "SOMETHING_NEW", "title": "?", "description": "", "confidence": 1.4}
            ],
            "recommendations": ["recalibrate"]
        }"#;

        let report: AnalysisReport = serde_json::from_str(raw).unwrap();
        assert_eq!(report.insights[0].kind, InsightKind::Anomaly);
        assert_eq!(report.insights[1].kind, InsightKind::Other);
        assert_eq!(report.insights[1].clamped_confidence(), 1.0);
        assert_eq!(report.recommendations.len(), 1);
    }
}
