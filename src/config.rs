//! Server configuration resolved once from the environment.

use std::path::PathBuf;

use anyhow::Context;
use api_shared::MutationGate;
use recipes_core::config::recipe_data_dir_from_env_value;

pub const DEFAULT_PORT: &str = "3000";
pub const DEFAULT_BIND_HOST: &str = "0.0.0.0";
pub const DEFAULT_WEB_ASSETS_DIR: &str = "web/assets";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub recipe_data_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub gate: MutationGate,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, so tests need not touch the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = normalise_port(lookup("PORT").as_deref())?;
        let host = lookup("RECIPES_BIND_HOST")
            .filter(|host| !host.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_HOST.into());

        let password_hash = lookup("PASSWORD_HASH")
            .filter(|hash| !hash.trim().is_empty())
            .context("PASSWORD_HASH must be set to the hex SHA-256 of the shared password")?;
        let gate = MutationGate::new(password_hash).context("PASSWORD_HASH is not usable")?;

        let assets_dir = lookup("WEB_ASSETS_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_WEB_ASSETS_DIR));

        Ok(Self {
            bind_addr: format!("{host}:{port}"),
            recipe_data_dir: recipe_data_dir_from_env_value(lookup("RECIPE_DATA_DIR")),
            assets_dir,
            gate,
        })
    }
}

/// Accepts `8080` or `:8080`; an unset or blank value means the default port.
fn normalise_port(value: Option<&str>) -> anyhow::Result<u16> {
    let raw = value.map(str::trim).unwrap_or_default();
    let raw = raw.strip_prefix(':').unwrap_or(raw);
    let raw = if raw.is_empty() { DEFAULT_PORT } else { raw };
    raw.parse::<u16>()
        .with_context(|| format!("PORT {raw:?} is not a valid port number"))
}
