//! Configuration types.

use std::time::Duration;

use crate::error::ConfigError;

/// Site backend configuration, built from environment variables.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Port the HTTP API listens on.
    pub port: u16,
    /// Simulated "analyzing" delay before the mock report is returned.
    pub analysis_delay: Duration,
    /// Simulated sign-in / sign-up delay.
    pub auth_delay: Duration,
    /// How long each hero quote stays up.
    pub quote_interval: Duration,
    /// Where finished onboarding answers are POSTed, if anywhere.
    pub submit_url: Option<String>,
    /// Unfinished wizards untouched this long are discarded.
    pub session_idle_timeout: Duration,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            analysis_delay: Duration::from_millis(3000),
            auth_delay: Duration::from_millis(2000),
            quote_interval: Duration::from_secs(4),
            submit_url: None,
            session_idle_timeout: Duration::from_secs(60 * 60),
        }
    }
}

impl SiteConfig {
    /// Build config from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// Unset keys fall back to defaults; set-but-unparseable keys are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = parse_or(&lookup, "INGREDIENT_IQ_PORT", defaults.port)?;

        let analysis_delay = parse_or(
            &lookup,
            "INGREDIENT_IQ_ANALYSIS_DELAY_MS",
            defaults.analysis_delay.as_millis() as u64,
        )
        .map(Duration::from_millis)?;

        let auth_delay = parse_or(
            &lookup,
            "INGREDIENT_IQ_AUTH_DELAY_MS",
            defaults.auth_delay.as_millis() as u64,
        )
        .map(Duration::from_millis)?;

        let quote_secs = parse_or(
            &lookup,
            "INGREDIENT_IQ_QUOTE_INTERVAL_SECS",
            defaults.quote_interval.as_secs(),
        )?;
        if quote_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "INGREDIENT_IQ_QUOTE_INTERVAL_SECS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        let idle_secs = parse_or(
            &lookup,
            "INGREDIENT_IQ_SESSION_IDLE_SECS",
            defaults.session_idle_timeout.as_secs(),
        )?;
        if idle_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "INGREDIENT_IQ_SESSION_IDLE_SECS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        let submit_url = lookup("INGREDIENT_IQ_SUBMIT_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(Self {
            port,
            analysis_delay,
            auth_delay,
            quote_interval: Duration::from_secs(quote_secs),
            submit_url,
            session_idle_timeout: Duration::from_secs(idle_secs),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            }),
        None => Ok(default),
    }
}
