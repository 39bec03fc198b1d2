//! Router assembly — every feature's routes behind one axum `Router`.

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;

use crate::analyzer::{Analyzer, AnalyzerRouteState, analyzer_routes};
use crate::auth::{AuthFlow, AuthRouteState, auth_routes};
use crate::config::SiteConfig;
use crate::onboarding::{
    CompletionHandler, OnboardingRouteState, QuestionCatalog, WizardSessions, onboarding_routes,
};
use crate::site::{QuoteRotator, SiteRouteState, site_routes};

/// Handles shared between the router and whoever built it.
pub struct App {
    pub router: Router,
    pub sessions: Arc<WizardSessions>,
}

/// Build the full API router.
pub fn build_app(config: &SiteConfig, on_complete: Arc<dyn CompletionHandler>) -> App {
    let sessions = WizardSessions::new(Arc::new(QuestionCatalog::ingredient_profile()), on_complete);

    let router = Router::new()
        .merge(site_routes(SiteRouteState::new(QuoteRotator::new(
            config.quote_interval,
        ))))
        .merge(onboarding_routes(OnboardingRouteState {
            sessions: Arc::clone(&sessions),
        }))
        .merge(analyzer_routes(AnalyzerRouteState {
            analyzer: Arc::new(Analyzer::new(config.analysis_delay)),
        }))
        .merge(auth_routes(AuthRouteState {
            flow: Arc::new(AuthFlow::new(config.auth_delay)),
        }))
        .layer(CorsLayer::permissive());

    App { router, sessions }
}
