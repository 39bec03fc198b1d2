//! Analyzer data model — input methods, safety ratings, and the report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the ingredient list is provided. One tab per method in the UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMethod {
    /// Camera capture of a label.
    #[default]
    Scan,
    /// Photo upload of a label.
    Upload,
    /// Typed, comma-separated list.
    Type,
}

impl std::fmt::Display for InputMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scan => write!(f, "scan"),
            Self::Upload => write!(f, "upload"),
            Self::Type => write!(f, "type"),
        }
    }
}

/// Safety rating of a single ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyLevel {
    Safe,
    Moderate,
    Caution,
}

impl std::fmt::Display for SafetyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Safe => write!(f, "safe"),
            Self::Moderate => write!(f, "moderate"),
            Self::Caution => write!(f, "caution"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientReport {
    pub name: String,
    pub safety: SafetyLevel,
    pub description: String,
}

impl IngredientReport {
    pub fn new(name: &str, safety: SafetyLevel, description: &str) -> Self {
        Self {
            name: name.to_string(),
            safety,
            description: description.to_string(),
        }
    }
}

/// A request from the analyzer page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub method: InputMethod,
    #[serde(default)]
    pub ingredients: String,
}

/// Result of an analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Overall safety score, 0–100.
    pub overall_score: u8,
    pub ingredients: Vec<IngredientReport>,
    pub recommendations: Vec<String>,
    pub alternatives: Vec<String>,
    /// The list the user entered, split on commas.
    pub submitted: Vec<String>,
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisReport {
    /// Count of ingredients at `level`.
    pub fn count(&self, level: SafetyLevel) -> usize {
        self.ingredients.iter().filter(|i| i.safety == level).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_method_defaults_to_scan() {
        assert_eq!(InputMethod::default(), InputMethod::Scan);
        let req: AnalysisRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.method, InputMethod::Scan);
        assert!(req.ingredients.is_empty());
    }

    #[test]
    fn safety_level_serde() {
        let level: SafetyLevel = serde_json::from_str("\"caution\"").unwrap();
        assert_eq!(level, SafetyLevel::Caution);
        assert_eq!(serde_json::to_string(&SafetyLevel::Safe).unwrap(), "\"safe\"");
    }
}
