use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use data_loader::{CatalogStore, LoadPolicy};
use pipeline::EngineConfig;

use crate::config::ServerConfig;
use crate::engine::SuggestionEngine;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SuggestionEngine>,
}

impl AppState {
    pub fn new(engine: SuggestionEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Build the engine described by `config` and try to warm the catalog.
    ///
    /// A catalog that fails to load here is retried on the first request.
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let engine_config = match &config.engine_config {
            Some(path) => EngineConfig::from_json_file(path)
                .with_context(|| format!("Failed to load engine config {}", path.display()))?,
            None => EngineConfig::default(),
        };

        let policy = if config.lenient_json {
            LoadPolicy::Lenient
        } else {
            LoadPolicy::Strict
        };
        let store = Arc::new(CatalogStore::new(&config.data_path, policy));

        match store.get() {
            Ok(catalog) => info!("Catalog ready: {} items", catalog.len()),
            Err(e) => warn!("Catalog not loaded yet: {}", e),
        }

        Ok(Self::new(SuggestionEngine::new(store, engine_config)))
    }
}
