//! Catalog building, file loading and the load-once store.
//!
//! - `Catalog::load_from_file` reads and normalizes a JSON source
//! - `build_restaurant_index` groups row positions by restaurant
//! - `CatalogStore` caches the first successful load for the process lifetime

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::{info, warn};

/// How to treat a catalog file that exists but is not usable JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Malformed JSON is an error
    #[default]
    Strict,
    /// Malformed JSON degrades to an empty catalog (a missing file is still an error)
    Lenient,
}

impl Catalog {
    /// Load and normalize a catalog from a JSON file.
    pub fn load_from_file(path: &Path, policy: LoadPolicy) -> Result<Self> {
        info!("Loading menu catalog from {:?}", path);

        if !path.exists() {
            return Err(DataLoadError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let json = fs::read_to_string(path)?;
        let source_name = path.display().to_string();

        let items = match parser::parse_catalog(&json, &source_name) {
            Ok(items) => items,
            Err(e @ (DataLoadError::Malformed { .. } | DataLoadError::UnexpectedShape(_)))
                if policy == LoadPolicy::Lenient =>
            {
                warn!("{}; continuing with an empty catalog", e);
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        let catalog = Catalog::from_items(items);
        info!(
            "Loaded {} menu items across {} restaurants",
            catalog.len(),
            catalog.restaurants().len()
        );
        Ok(catalog)
    }

    /// Group row positions by trimmed restaurant name.
    ///
    /// Positions inside each group keep catalog order, which is what the
    /// "first N raw rows" fallback relies on.
    pub(crate) fn build_restaurant_index(&mut self) {
        self.restaurant_index.clear();
        for (position, item) in self.items.iter().enumerate() {
            self.restaurant_index
                .entry(item.restaurant.trim().to_string())
                .or_default()
                .push(position);
        }
    }
}

/// Lazily loaded, never invalidated catalog.
///
/// The first successful `get` fixes the catalog for the rest of the process.
/// A failed load is not cached, so a file that appears later is picked up by
/// the next call.
#[derive(Debug)]
pub struct CatalogStore {
    path: PathBuf,
    policy: LoadPolicy,
    catalog: OnceLock<Arc<Catalog>>,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>, policy: LoadPolicy) -> Self {
        Self {
            path: path.into(),
            policy,
            catalog: OnceLock::new(),
        }
    }

    /// A store that is already initialized with `catalog`
    pub fn from_catalog(catalog: Catalog) -> Self {
        let store = Self::new(PathBuf::new(), LoadPolicy::Strict);
        // Freshly created lock, so this cannot already be set
        let _ = store.catalog.set(Arc::new(catalog));
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.catalog.get().is_some()
    }

    /// Get the catalog, loading it on first use
    pub fn get(&self) -> Result<Arc<Catalog>> {
        if let Some(catalog) = self.catalog.get() {
            return Ok(Arc::clone(catalog));
        }

        let loaded = Arc::new(Catalog::load_from_file(&self.path, self.policy)?);
        // Two racing first calls both load; whichever lands first wins and both
        // return the cached value.
        Ok(Arc::clone(self.catalog.get_or_init(|| loaded)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_catalog(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_restaurant_index_keeps_order() {
        let catalog = Catalog::from_items(vec![
            MenuItem::new("Wendy's", "Dave's Single"),
            MenuItem::new("Arby's", "Classic Roast Beef"),
            MenuItem::new(" Wendy's ", "Chili"),
        ]);

        let wendys: Vec<_> = catalog.items_for("Wendy's").into_iter().map(|i| i.name.as_str()).collect();
        assert_eq!(wendys, vec!["Dave's Single", "Chili"]);
        assert_eq!(catalog.restaurants(), vec!["Arby's", "Wendy's"]);
    }

    #[test]
    fn test_restaurants_are_case_sensitive_and_skip_empty() {
        let catalog = Catalog::from_items(vec![
            MenuItem::new("subway", "a"),
            MenuItem::new("Subway", "b"),
            MenuItem::new("", "c"),
            MenuItem::new("Subway", "d"),
        ]);
        assert_eq!(catalog.restaurants(), vec!["Subway", "subway"]);
    }

    #[test]
    fn test_find_item_ignores_case() {
        let catalog = Catalog::from_items(vec![MenuItem::new("KFC", "Famous Bowl")]);
        assert!(catalog.find_item("KFC", "famous bowl").is_some());
        assert!(catalog.find_item("KFC", "Popcorn Nuggets").is_none());
        assert!(catalog.find_item("Popeyes", "Famous Bowl").is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let result = Catalog::load_from_file(Path::new("/definitely/not/here.json"), LoadPolicy::Lenient);
        assert!(matches!(result, Err(DataLoadError::FileNotFound { .. })));
    }

    #[test]
    fn test_load_malformed_file_by_policy() {
        let file = write_catalog("[{\"restaurant\": ");

        let strict = Catalog::load_from_file(file.path(), LoadPolicy::Strict);
        assert!(matches!(strict, Err(DataLoadError::Malformed { .. })));

        let lenient = Catalog::load_from_file(file.path(), LoadPolicy::Lenient).unwrap();
        assert!(lenient.is_empty());
    }

    #[test]
    fn test_store_loads_once() {
        let file = write_catalog(r#"[{"restaurant": "A", "item": "Burger", "kcal": 500}]"#);
        let store = CatalogStore::new(file.path(), LoadPolicy::Strict);
        assert!(!store.is_loaded());

        let first = store.get().unwrap();
        assert!(store.is_loaded());

        // Rewriting the source does not affect the cached catalog
        std::fs::write(file.path(), "[]").unwrap();
        let second = store.get().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn test_store_retries_after_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fastfood_items.json");
        let store = CatalogStore::new(&path, LoadPolicy::Strict);

        assert!(store.get().is_err());
        assert!(!store.is_loaded());

        std::fs::write(&path, r#"[{"restaurant": "A", "item": "Wrap"}]"#).unwrap();
        assert_eq!(store.get().unwrap().len(), 1);
    }
}
