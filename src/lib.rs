//! IngredientIQ — backend for the ingredient safety demo site.

pub mod analyzer;
pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod onboarding;
pub mod site;
