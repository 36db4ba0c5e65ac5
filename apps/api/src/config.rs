use std::str::FromStr;

use anyhow::{bail, Context, Result};
use chrono::Duration;
use jsonwebtoken::Algorithm;

/// Where users and resumes are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres { database_url: String },
    Memory,
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub storage: StorageBackend,
    pub jwt_secret: String,
    pub jwt_algorithm: Algorithm,
    pub access_token_ttl: Duration,
    pub bcrypt_cost: u32,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let optional_env = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let require_env = |key: &str| {
            optional_env(key)
                .with_context(|| format!("Required environment variable '{key}' is not set"))
        };

        let storage = match optional_env("STORAGE_BACKEND")
            .unwrap_or_else(|| "postgres".to_string())
            .as_str()
        {
            "postgres" => StorageBackend::Postgres {
                database_url: require_env("DATABASE_URL")?,
            },
            "memory" => StorageBackend::Memory,
            other => bail!("STORAGE_BACKEND must be 'postgres' or 'memory', got '{other}'"),
        };

        let jwt_algorithm = parse_hmac_algorithm(
            &optional_env("JWT_ALGORITHM").unwrap_or_else(|| "HS256".to_string()),
        )?;

        let access_token_ttl = parse_ttl_minutes(
            &optional_env("ACCESS_TOKEN_EXPIRE_MINUTES").unwrap_or_else(|| "30".to_string()),
        )?;

        let bcrypt_cost = match optional_env("BCRYPT_COST") {
            Some(cost) => cost.parse::<u32>().context("BCRYPT_COST must be an integer")?,
            None => bcrypt::DEFAULT_COST,
        };
        if !(4..=31).contains(&bcrypt_cost) {
            bail!("BCRYPT_COST must be between 4 and 31, got {bcrypt_cost}");
        }

        Ok(Config {
            storage,
            jwt_secret: require_env("JWT_SECRET")?,
            jwt_algorithm,
            access_token_ttl,
            bcrypt_cost,
            port: optional_env("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

/// Tokens are signed with a shared secret, so only the HMAC family applies.
pub fn parse_hmac_algorithm(name: &str) -> Result<Algorithm> {
    let algorithm = Algorithm::from_str(name)
        .with_context(|| format!("JWT_ALGORITHM '{name}' is not a known algorithm"))?;
    match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(algorithm),
        _ => bail!("JWT_ALGORITHM must be one of HS256, HS384, HS512, got '{name}'"),
    }
}

/// A positive number of minutes that `chrono::Duration` can represent.
fn parse_ttl_minutes(raw: &str) -> Result<Duration> {
    let minutes = raw
        .parse::<i64>()
        .context("ACCESS_TOKEN_EXPIRE_MINUTES must be an integer")?;
    if minutes <= 0 {
        bail!("ACCESS_TOKEN_EXPIRE_MINUTES must be positive, got {minutes}");
    }
    Duration::try_minutes(minutes)
        .with_context(|| format!("ACCESS_TOKEN_EXPIRE_MINUTES {minutes} is out of range"))
}
