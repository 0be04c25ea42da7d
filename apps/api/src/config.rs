use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub bcrypt_cost: u32,
    pub reports_dir: PathBuf,
    pub chrome_bin: String,
    /// Extra browser flags, whitespace-separated in `CHROME_ARGS`.
    pub chrome_args: Vec<String>,
    pub render_timeout_secs: u64,
    /// Optional JSON file merged over the bundled assessment configs.
    pub assessment_config_path: Option<PathBuf>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 5000)?,
            jwt_secret: require_env("JWT_SECRET")?,
            token_ttl_hours: parse_env("TOKEN_TTL_HOURS", 24)?,
            bcrypt_cost: parse_env("BCRYPT_COST", 10)?,
            reports_dir: std::env::var("REPORTS_DIR")
                .unwrap_or_else(|_| "reports".to_string())
                .into(),
            chrome_bin: std::env::var("CHROME_BIN").unwrap_or_else(|_| "chromium".to_string()),
            chrome_args: std::env::var("CHROME_ARGS")
                .map(|raw| raw.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default(),
            render_timeout_secs: parse_env("RENDER_TIMEOUT_SECS", 30)?,
            assessment_config_path: std::env::var("ASSESSMENT_CONFIG_PATH").ok().map(PathBuf::from),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Minimal config for handler tests. Uses the lowest bcrypt cost.
    pub fn for_tests(reports_dir: impl Into<PathBuf>) -> Self {
        Config {
            port: 0,
            jwt_secret: "test-secret".to_string(),
            token_ttl_hours: 24,
            bcrypt_cost: 4,
            reports_dir: reports_dir.into(),
            chrome_bin: "chromium".to_string(),
            chrome_args: Vec::new(),
            render_timeout_secs: 5,
            assessment_config_path: None,
            rust_log: "debug".to_string(),
        }
    }
}
