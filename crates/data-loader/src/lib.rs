//! # Data Loader Crate
//!
//! This crate loads the fast-food menu catalog and normalizes it into one
//! canonical shape.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (MenuItem, Goal, Catalog)
//! - **parser**: Parse catalog JSON and reconcile heterogeneous field names
//! - **index**: Restaurant index, file loading and the load-once `CatalogStore`
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{CatalogStore, LoadPolicy};
//!
//! let store = CatalogStore::new("fastfood_items.json", LoadPolicy::Strict);
//! let catalog = store.get()?;
//!
//! for restaurant in catalog.restaurants() {
//!     println!("{} ({} items)", restaurant, catalog.items_for(restaurant).len());
//! }
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use index::{CatalogStore, LoadPolicy};
pub use parser::{lenient_flag, lenient_number};
pub use types::{Catalog, Goal, ItemPosition, MenuItem, UnknownGoal};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_creation() {
        let catalog = Catalog::new();
        assert!(catalog.is_empty());
        assert!(catalog.restaurants().is_empty());
        assert!(catalog.items_for("Anywhere").is_empty());
    }

    #[test]
    fn test_goal_parsing() {
        assert_eq!(Goal::parse_lenient("Bulking"), Goal::Bulking);
        assert_eq!(Goal::parse_lenient("  KETO "), Goal::Keto);
        assert_eq!(Goal::parse_lenient("maintenance"), Goal::Cutting);
        assert_eq!(Goal::parse_lenient(""), Goal::Cutting);

        assert!("paleo".parse::<Goal>().is_err());
        assert_eq!("cutting".parse::<Goal>(), Ok(Goal::Cutting));
        assert_eq!(Goal::Keto.to_string(), "keto");
    }

    #[test]
    fn test_menu_item_builder() {
        let item = MenuItem::new("Chipotle", "Chicken Bowl")
            .with_category("Bowl")
            .with_macros(630.0, 51.0, 40.0, 24.0)
            .with_serving_size("1 bowl");

        assert_eq!(item.category_lower(), "bowl");
        assert_eq!(item.name_lower(), "chicken bowl");
        assert_eq!(item.protein_g, 51.0);
        assert_eq!(item.is_main_candidate, None);
    }

    #[test]
    fn test_catalog_from_iterator() {
        let catalog: Catalog = vec![
            MenuItem::new("A", "one"),
            MenuItem::new("B", "two"),
        ]
        .into_iter()
        .collect();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(1).map(|i| i.name.as_str()), Some("two"));
    }
}
