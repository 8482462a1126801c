use std::env;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_u16(key: &str, default: u16) -> u16 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_u32(key: &str, default: u32) -> u32 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub postgres: PostgresConfig,
    pub normalizer: NormalizerConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            upstream: UpstreamConfig::from_env(),
            postgres: PostgresConfig::from_env(),
            normalizer: NormalizerConfig::from_env(),
        }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  server:     {}:{}", self.server.host, self.server.port);
        tracing::info!("  upstream:   {}", self.upstream.feed_url);
        tracing::info!("  postgres:   host={}, db={}", self.postgres.host, self.postgres.database);
        tracing::info!("  normalizer: classify={}", self.normalizer.classify);
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_u16("PORT", 3001),
        }
    }
}

// ── Upstream feed ─────────────────────────────────────────────

/// Where the announcements feed lives and what we present ourselves as.
///
/// The landing URL is fetched first to obtain session cookies; the feed
/// URL is only valid with those cookies attached. Both are overridable
/// so tests can point the client at a local mock server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    pub landing_url: String,
    pub feed_url: String,
    pub user_agent: String,
    pub accept: String,
    pub referer: String,
}

impl UpstreamConfig {
    fn from_env() -> Self {
        Self {
            landing_url: env_or("NSE_LANDING_URL", "https://www.nseindia.com"),
            feed_url: env_or(
                "NSE_FEED_URL",
                "https://www.nseindia.com/api/corporate-announcements?index=equities",
            ),
            user_agent: env_or("NSE_USER_AGENT", "Mozilla/5.0"),
            accept: env_or("NSE_ACCEPT", "application/json"),
            referer: env_or("NSE_REFERER", "https://www.nseindia.com/"),
        }
    }
}

// ── PostgreSQL ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostgresConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub ssl_mode: String,
    pub max_connections: u32,
}

impl PostgresConfig {
    fn from_env() -> Self {
        Self {
            host: env_or("PG_HOST", "localhost"),
            port: env_u16("PG_PORT", 5432),
            database: env_or("PG_DATABASE", "filings"),
            username: env_opt("PG_USERNAME"),
            password: env_opt("PG_PASSWORD"),
            ssl_mode: env_or("PG_SSL_MODE", "prefer"),
            max_connections: env_u32("PG_MAX_CONNECTIONS", 10),
        }
    }

    pub fn connection_string(&self) -> String {
        let user = self.username.as_deref().unwrap_or("postgres");
        let pass = self.password.as_deref().unwrap_or("");
        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode={}",
            user, pass, self.host, self.port, self.database, self.ssl_mode
        )
    }
}

// ── Normalizer ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// When false, records are stored without a `bucket` label.
    pub classify: bool,
}

impl NormalizerConfig {
    fn from_env() -> Self {
        Self {
            classify: env_or("CLASSIFY_ANNOUNCEMENTS", "true") != "false",
        }
    }
}
