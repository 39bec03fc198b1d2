use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use ingredient_iq::app::build_app;
use ingredient_iq::config::SiteConfig;
use ingredient_iq::onboarding::{
    ChannelCompletion, CompletionHandler, FanOut, LogCompletion, WebhookCompletion,
    spawn_expiry_task,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = SiteConfig::from_env().context("invalid configuration")?;

    eprintln!("🧪 IngredientIQ v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   API: http://0.0.0.0:{}/api", config.port);
    eprintln!(
        "   Analysis delay: {}ms, auth delay: {}ms",
        config.analysis_delay.as_millis(),
        config.auth_delay.as_millis()
    );
    eprintln!(
        "   Wizard idle timeout: {}s",
        config.session_idle_timeout.as_secs()
    );

    // ── Onboarding completion ───────────────────────────────────────────
    let (channel, mut completed_rx) = ChannelCompletion::new();
    let mut handlers = FanOut::new()
        .with(Arc::new(LogCompletion))
        .with(Arc::new(channel));
    match &config.submit_url {
        Some(url) => {
            eprintln!("   Answer submission: {}", url);
            handlers = handlers.with(Arc::new(WebhookCompletion::new(url.clone())));
        }
        None => eprintln!("   Answer submission: disabled"),
    }
    let on_complete: Arc<dyn CompletionHandler> = Arc::new(handlers);

    // Summarize finished profiles
    tokio::spawn(async move {
        while let Some(snapshot) = completed_rx.recv().await {
            tracing::info!(
                wizard_id = %snapshot.wizard_id,
                allergies = ?snapshot.selections("allergies"),
                avoiding = ?snapshot.selections("avoiding"),
                products = ?snapshot.selections("products"),
                "Ingredient profile ready"
            );
        }
    });

    let app = build_app(&config, on_complete);

    // Discard abandoned wizards
    spawn_expiry_task(
        Arc::clone(&app.sessions),
        config.session_idle_timeout,
        Duration::from_secs(60),
    );

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("failed to bind port {}", config.port))?;
    tracing::info!(port = config.port, "HTTP server started");
    axum::serve(listener, app.router)
        .await
        .context("server error")?;

    Ok(())
}
