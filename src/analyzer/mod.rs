//! Ingredient analyzer.

pub mod engine;
pub mod model;
pub mod routes;

pub use engine::{Analyzer, parse_ingredients};
pub use model::{AnalysisReport, AnalysisRequest, IngredientReport, InputMethod, SafetyLevel};
pub use routes::{AnalyzerRouteState, analyzer_routes};
