//! Process configuration, loaded once at startup

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;
use tracing::warn;

const DEV_SECRET: &str = "dev-secret-change-in-production-minimum-32-characters";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub port: u16,
    pub secret: String,
    /// `None` means issued tokens never expire.
    pub token_ttl: Option<Duration>,
    pub bcrypt_cost: u32,
}

impl Config {
    /// Read from the process environment. `.env` is loaded by `main`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_path = get("DATABASE_PATH").unwrap_or_else(|| "./bloglist.db".to_string());

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse().context("Invalid PORT")?,
            None => 3003,
        };

        let secret = get("SECRET").unwrap_or_else(|| {
            warn!("SECRET not set, signing tokens with the development secret");
            DEV_SECRET.to_string()
        });

        let token_ttl = get("TOKEN_TTL_SECONDS")
            .map(|raw| raw.trim().parse::<u64>().context("Invalid TOKEN_TTL_SECONDS"))
            .transpose()?
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs);

        let bcrypt_cost = match get("BCRYPT_COST") {
            Some(raw) => raw.trim().parse().context("Invalid BCRYPT_COST")?,
            None => 10,
        };
        if !(4..=31).contains(&bcrypt_cost) {
            anyhow::bail!("BCRYPT_COST must be between 4 and 31, got {}", bcrypt_cost);
        }

        Ok(Self {
            database_path,
            port,
            secret,
            token_ttl,
            bcrypt_cost,
        })
    }
}
