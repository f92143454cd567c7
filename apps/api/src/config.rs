use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; a malformed value stops startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the four fitted model artifacts.
    pub model_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on an uploaded resume, in bytes.
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            model_dir: PathBuf::from(env_or("MODEL_DIR", "models")),
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", "10485760")
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            model_dir: PathBuf::from("models"),
            port: 8080,
            rust_log: "info".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
