use std::env;
use std::fmt;

use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Session length applied when `session_token_days` is absent or unusable.
pub const FALLBACK_SESSION_DAYS: f64 = 2.0;

/// Upper bound on the configured session length (one century). Values
/// above it count as unusable and take the fallback; the cap keeps the
/// expiry arithmetic `now + duration` representable.
pub const MAX_SESSION_DAYS: f64 = 36_500.0;

/// Configuration for the credential and token core.
///
/// Loaded once at startup. A missing or empty secret fails the load
/// outright; a bad session length does not, it falls back with a warning,
/// so a typo in a non-critical knob cannot take logins down.
///
/// # Security Notes
/// The `Debug` representation redacts the secret.
#[derive(Deserialize, Clone)]
pub struct AuthConfig {
    /// HMAC signing secret shared by issuer and validator. Required.
    pub secret: String,

    /// Session length in days, as written in configuration. Fractional
    /// values are accepted ("0.5" is twelve hours). Kept as raw text so an
    /// unparsable value degrades to the fallback instead of failing the
    /// whole load.
    pub session_token_days: Option<String>,
}

impl AuthConfig {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (AUTH_SECRET, AUTH_SESSION_TOKEN_DAYS)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// # Errors
    /// Fails when no secret is configured or the configured secret is
    /// empty: a process that cannot sign tokens must refuse to start.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables
            // Example: AUTH_SECRET=... overrides secret
            .add_source(Environment::with_prefix("AUTH"))
            .build()?;

        let config: AuthConfig = configuration.try_deserialize()?;

        if config.secret.is_empty() {
            return Err(ConfigError::Message(
                "signing secret must not be empty".to_string(),
            ));
        }

        Ok(config)
    }

    /// Session duration for issued tokens.
    ///
    /// Parses `session_token_days` as fractional days. Values that are
    /// absent, unparsable, not positive, or beyond [`MAX_SESSION_DAYS`]
    /// fall back to [`FALLBACK_SESSION_DAYS`], and the fallback is logged
    /// as a warning so a misconfiguration stays visible to operators.
    pub fn session_duration(&self) -> Duration {
        let configured = self
            .session_token_days
            .as_deref()
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|days| *days > 0.0 && *days <= MAX_SESSION_DAYS);

        let days = match configured {
            Some(days) => days,
            None => {
                tracing::warn!(
                    configured = self.session_token_days.as_deref().unwrap_or("<unset>"),
                    fallback_days = FALLBACK_SESSION_DAYS,
                    "session_token_days missing or invalid, using fallback"
                );
                FALLBACK_SESSION_DAYS
            }
        };

        Duration::seconds((days * 86_400.0) as i64)
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"<redacted>")
            .field("session_token_days", &self.session_token_days)
            .finish()
    }
}
