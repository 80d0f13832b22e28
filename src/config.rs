// src/config.rs

use std::env;
use dotenvy::dotenv;

use crate::review::DEFAULT_QUEUE_LIMIT;

/// Upper bound applied to any `limit` requested over HTTP.
pub const MAX_QUEUE_LIMIT: usize = 100;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
    pub app_addr: String,
    pub log_dir: String,
    pub cors_origins: Vec<String>,
    pub default_queue_limit: usize,
    pub max_queue_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://review.db".to_string(),
            rust_log: "info".to_string(),
            app_addr: "0.0.0.0:3000".to_string(),
            log_dir: "logs".to_string(),
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
            default_queue_limit: DEFAULT_QUEUE_LIMIT,
            max_queue_limit: MAX_QUEUE_LIMIT,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let defaults = Self::default();

        let database_url = env::var("DATABASE_URL").unwrap_or(defaults.database_url);

        let rust_log = env::var("RUST_LOG").unwrap_or(defaults.rust_log);

        let app_addr = env::var("APP_ADDR").unwrap_or(defaults.app_addr);

        let log_dir = env::var("LOG_DIR").unwrap_or(defaults.log_dir);

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or(defaults.cors_origins);

        let default_queue_limit =
            parse_limit("REVIEW_DEFAULT_LIMIT").unwrap_or(defaults.default_queue_limit);
        let max_queue_limit = parse_limit("REVIEW_MAX_LIMIT").unwrap_or(defaults.max_queue_limit);

        Self {
            database_url,
            rust_log,
            app_addr,
            log_dir,
            cors_origins,
            default_queue_limit: default_queue_limit.min(max_queue_limit),
            max_queue_limit,
        }
    }

    /// Resolves a client-supplied limit: missing means the default,
    /// negative means an empty queue, anything else is capped.
    pub fn resolve_limit(&self, requested: Option<i64>) -> usize {
        match requested {
            None => self.default_queue_limit,
            Some(n) => usize::try_from(n).unwrap_or(0).min(self.max_queue_limit),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_limit(key: &str) -> Option<usize> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse::<usize>() {
        Ok(n) => Some(n),
        Err(e) => {
            tracing::warn!("Ignoring invalid {}={:?}: {}", key, raw, e);
            None
        }
    }
}
