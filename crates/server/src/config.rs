use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use anyhow::{Context, Result, anyhow};
use tracing::info;

/// Server settings read from `FOOD_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_path: PathBuf,
    /// Optional JSON file with engine thresholds, weights and rules
    pub engine_config: Option<PathBuf>,
    /// Treat malformed catalog JSON as an empty catalog
    pub lenient_json: bool,
}

impl ServerConfig {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `load` uses the process environment
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            host: try_load(&lookup, "FOOD_HOST", "0.0.0.0")?,
            port: try_load(&lookup, "FOOD_PORT", "5000")?,
            data_path: try_load(&lookup, "FOOD_DATA_PATH", "fastfood_items.json")?,
            engine_config: lookup("FOOD_ENGINE_CONFIG")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            lenient_json: parse_flag(&lookup, "FOOD_LENIENT_JSON")?,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn try_load<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.trim()
        .parse()
        .map_err(|e| anyhow!("{e}"))
        .with_context(|| format!("Invalid {key} value: {raw:?}"))
}

fn parse_flag(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<bool> {
    match lookup(key).map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(false),
        Some(v) => match v.as_str() {
            "" | "0" | "false" | "no" | "off" => Ok(false),
            "1" | "true" | "yes" | "on" => Ok(true),
            _ => Err(anyhow!("Invalid {key} value: {v:?}")),
        },
    }
}
