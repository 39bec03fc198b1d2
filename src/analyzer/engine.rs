//! Analyzer engine — validates the input and produces the sample report.
//!
//! There is no real analysis yet: every accepted request gets the same
//! five-ingredient report after a simulated processing delay.

use std::time::Duration;

use chrono::Utc;
use tracing::info;

use super::model::{AnalysisReport, AnalysisRequest, IngredientReport, InputMethod, SafetyLevel};
use crate::error::AnalyzerError;

/// Score reported for the sample analysis.
const SAMPLE_SCORE: u8 = 75;

pub struct Analyzer {
    delay: Duration,
}

impl Analyzer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Check that a request can be analyzed without waiting.
    pub fn validate(request: &AnalysisRequest) -> Result<(), AnalyzerError> {
        match request.method {
            InputMethod::Type => {}
            method @ (InputMethod::Scan | InputMethod::Upload) => {
                return Err(AnalyzerError::UnsupportedInput {
                    method: method.to_string(),
                });
            }
        }
        if request.ingredients.trim().is_empty() {
            return Err(AnalyzerError::EmptyInput);
        }
        Ok(())
    }

    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisReport, AnalyzerError> {
        Self::validate(request)?;
        let submitted = parse_ingredients(&request.ingredients);
        info!(count = submitted.len(), "Analyzing ingredient list");

        tokio::time::sleep(self.delay).await;

        Ok(AnalysisReport {
            overall_score: SAMPLE_SCORE,
            ingredients: sample_ingredients(),
            recommendations: vec![
                "Consider sulfate-free alternatives".to_string(),
                "Patch test before full use".to_string(),
                "Avoid if you have sensitive skin".to_string(),
            ],
            alternatives: vec![
                "CeraVe Gentle Cleanser".to_string(),
                "Vanicream Gentle Facial Cleanser".to_string(),
                "Neutrogena Ultra Gentle".to_string(),
            ],
            submitted,
            analyzed_at: Utc::now(),
        })
    }
}

/// Split a typed list on commas, dropping blanks.
pub fn parse_ingredients(text: &str) -> Vec<String> {
    text.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn sample_ingredients() -> Vec<IngredientReport> {
    vec![
        IngredientReport::new(
            "Water (Aqua)",
            SafetyLevel::Safe,
            "Universal solvent, completely safe",
        ),
        IngredientReport::new(
            "Sodium Lauryl Sulfate",
            SafetyLevel::Caution,
            "Can cause skin irritation in sensitive individuals",
        ),
        IngredientReport::new(
            "Glycerin",
            SafetyLevel::Safe,
            "Natural humectant, safe for all skin types",
        ),
        IngredientReport::new(
            "Parabens (Methylparaben)",
            SafetyLevel::Moderate,
            "Preservative with potential endocrine effects",
        ),
        IngredientReport::new(
            "Fragrance (Parfum)",
            SafetyLevel::Caution,
            "May contain allergens, not fully disclosed",
        ),
    ]
}
