//! Analysis mode tags.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Declared analysis category for one submission.
///
/// The mode controls whether strict structural validation is enforced:
/// `Code` and `Internet` accept arbitrary unstructured text, while
/// `Quantum` and `Weather` inputs must parse as JSON or a consistent
/// delimited table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    Quantum,
    Code,
    Weather,
    Internet,
}

impl AnalysisMode {
    /// All modes, in UI presentation order.
    pub const ALL: [AnalysisMode; 4] = [
        AnalysisMode::Quantum,
        AnalysisMode::Code,
        AnalysisMode::Weather,
        AnalysisMode::Internet,
    ];

    /// Whether inputs in this mode must be structurally valid JSON or CSV.
    ///
    /// `Code` and `Internet` are exempt: they routinely carry free-form
    /// text. The emptiness check still applies to every mode.
    pub fn requires_structure(self) -> bool {
        !matches!(self, AnalysisMode::Code | AnalysisMode::Internet)
    }

    /// Stable lowercase tag used in persistence and FFI payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisMode::Quantum => "quantum",
            AnalysisMode::Code => "code",
            AnalysisMode::Weather => "weather",
            AnalysisMode::Internet => "internet",
        }
    }
}

impl Display for AnalysisMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for unknown mode tags received from storage or FFI callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownModeError(pub String);

impl Display for UnknownModeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown analysis mode `{}`; expected quantum|code|weather|internet",
            self.0
        )
    }
}

impl std::error::Error for UnknownModeError {}

impl FromStr for AnalysisMode {
    type Err = UnknownModeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "quantum" => Ok(AnalysisMode::Quantum),
            "code" => Ok(AnalysisMode::Code),
            "weather" => Ok(AnalysisMode::Weather),
            "internet" => Ok(AnalysisMode::Internet),
            other => Err(UnknownModeError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AnalysisMode;

    #[test]
    fn structural_modes_are_quantum_and_weather() {
        assert!(AnalysisMode::Quantum.requires_structure());
        assert!(AnalysisMode::Weather.requires_structure());
        assert!(!AnalysisMode::Code.requires_structure());
        assert!(!AnalysisMode::Internet.requires_structure());
    }

    #[test]
    fn mode_tags_round_trip_through_from_str() {
        for mode in AnalysisMode::ALL {
            assert_eq!(mode.as_str().parse::<AnalysisMode>().unwrap(), mode);
        }
        assert!(" QUANTUM ".parse::<AnalysisMode>().is_ok());
        assert!("sql".parse::<AnalysisMode>().is_err());
    }
}
