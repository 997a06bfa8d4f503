use portal_events::RevalidateConfig;
use portal_upstream::UpstreamBases;

use crate::auth::token::AuthConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the auth secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// Time allowed for an upstream to start answering, in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Base URL per upstream family.
    pub upstreams: UpstreamBases,
    /// Public CDN / object-storage URL, reported to clients as-is.
    pub cdn_url: Option<String>,
    /// Session token validation settings.
    pub auth: AuthConfig,
    /// Cache revalidation hook.
    pub revalidate: RevalidateConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `*_API_URL`            | `http://localhost:8080`    |
    /// | `CDN_URL`              | unset                      |
    ///
    /// See [`AuthConfig::from_env`] and [`RevalidateConfig::from_env`] for
    /// the remaining variables.
    ///
    /// # Panics
    ///
    /// Panics on malformed values; misconfiguration should stop startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let upstreams = UpstreamBases::from_env()
            .unwrap_or_else(|e| panic!("Upstream configuration is invalid: {e}"));

        let cdn_url = std::env::var("CDN_URL").ok().filter(|v| !v.trim().is_empty());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            upstreams,
            cdn_url,
            auth: AuthConfig::from_env(),
            revalidate: RevalidateConfig::from_env(),
        }
    }
}
