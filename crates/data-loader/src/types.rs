//! Core domain types for the menu catalog.
//!
//! This module defines the fundamental data structures used throughout the system:
//! - `MenuItem`, the canonical row every source format is normalized into
//! - `Goal`, the dietary objective driving filtering and scoring
//! - `Catalog`, the immutable in-memory store with a restaurant index

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Type Aliases
// =============================================================================

/// Position of a row inside the catalog (0-based, load order)
pub type ItemPosition = usize;

// =============================================================================
// Menu Item
// =============================================================================

/// A single menu row in canonical shape.
///
/// Numeric fields are already coerced: anything absent or unparseable in the
/// source is `0.0`. Nothing here is validated for sign or range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub restaurant: String,
    pub name: String,
    /// Free text, may be empty
    pub category: String,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub sodium_mg: f64,
    /// Explicit main-dish override; `None` means "let the classifier decide"
    pub is_main_candidate: Option<bool>,
    pub serving_size: Option<String>,
}

impl MenuItem {
    /// Create an item with zeroed macros.
    ///
    /// Mostly useful for tests and fixtures; loaded rows come from the parser.
    pub fn new(restaurant: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            restaurant: restaurant.into(),
            name: name.into(),
            category: String::new(),
            calories: 0.0,
            protein_g: 0.0,
            carbs_g: 0.0,
            fat_g: 0.0,
            sodium_mg: 0.0,
            is_main_candidate: None,
            serving_size: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set calories and macro grams in one go: kcal, protein, carbs, fat
    pub fn with_macros(mut self, calories: f64, protein_g: f64, carbs_g: f64, fat_g: f64) -> Self {
        self.calories = calories;
        self.protein_g = protein_g;
        self.carbs_g = carbs_g;
        self.fat_g = fat_g;
        self
    }

    pub fn with_sodium(mut self, sodium_mg: f64) -> Self {
        self.sodium_mg = sodium_mg;
        self
    }

    pub fn with_main_override(mut self, is_main: bool) -> Self {
        self.is_main_candidate = Some(is_main);
        self
    }

    pub fn with_serving_size(mut self, serving_size: impl Into<String>) -> Self {
        self.serving_size = Some(serving_size.into());
        self
    }

    /// Lower-cased category, used by every keyword matcher
    pub fn category_lower(&self) -> String {
        self.category.to_lowercase()
    }

    /// Lower-cased name, used by every keyword matcher
    pub fn name_lower(&self) -> String {
        self.name.to_lowercase()
    }
}

// =============================================================================
// Goal
// =============================================================================

/// The user's dietary objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    #[default]
    Cutting,
    Bulking,
    Keto,
}

impl Goal {
    pub const ALL: [Goal; 3] = [Goal::Cutting, Goal::Bulking, Goal::Keto];

    /// Parse a goal the way request handlers do: trimmed, case-insensitive,
    /// and anything unrecognized (including empty) means cutting.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::Cutting => "cutting",
            Goal::Bulking => "bulking",
            Goal::Keto => "keto",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by the strict `FromStr` parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGoal(pub String);

impl fmt::Display for UnknownGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown goal '{}' (expected cutting, bulking or keto)", self.0)
    }
}

impl std::error::Error for UnknownGoal {}

impl FromStr for Goal {
    type Err = UnknownGoal;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cutting" => Ok(Goal::Cutting),
            "bulking" => Ok(Goal::Bulking),
            "keto" => Ok(Goal::Keto),
            _ => Err(UnknownGoal(s.to_string())),
        }
    }
}

// =============================================================================
// Catalog - The In-Memory Menu Store
// =============================================================================

/// Every menu row, in load order, plus a restaurant index.
///
/// Built once and never mutated afterwards; share it behind an `Arc`.
#[derive(Debug, Default)]
pub struct Catalog {
    pub(crate) items: Vec<MenuItem>,
    /// Trimmed restaurant name -> positions of its rows (catalog order)
    pub(crate) restaurant_index: HashMap<String, Vec<ItemPosition>>,
}

impl Catalog {
    /// Creates a new, empty Catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from already-normalized rows
    pub fn from_items(items: Vec<MenuItem>) -> Self {
        let mut catalog = Self {
            items,
            restaurant_index: HashMap::new(),
        };
        catalog.build_restaurant_index();
        catalog
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MenuItem> {
        self.items.iter()
    }

    /// Get a row by its catalog position
    pub fn get(&self, position: ItemPosition) -> Option<&MenuItem> {
        self.items.get(position)
    }

    /// All rows of a restaurant, in catalog order.
    ///
    /// Matching is exact on the trimmed name; returns an empty Vec when the
    /// restaurant is unknown.
    pub fn items_for(&self, restaurant: &str) -> Vec<&MenuItem> {
        self.restaurant_index
            .get(restaurant.trim())
            .map(|positions| positions.iter().map(|&p| &self.items[p]).collect())
            .unwrap_or_default()
    }

    /// Distinct restaurant names, sorted and case-sensitive as stored.
    pub fn restaurants(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .restaurant_index
            .keys()
            .map(String::as_str)
            .filter(|name| !name.is_empty())
            .collect();
        names.sort_unstable();
        names
    }

    /// Look up a row by restaurant and (case-insensitive) item name
    pub fn find_item(&self, restaurant: &str, name: &str) -> Option<&MenuItem> {
        let wanted = name.trim().to_lowercase();
        self.items_for(restaurant)
            .into_iter()
            .find(|item| item.name.trim().to_lowercase() == wanted)
    }
}

impl FromIterator<MenuItem> for Catalog {
    fn from_iter<I: IntoIterator<Item = MenuItem>>(iter: I) -> Self {
        Self::from_items(iter.into_iter().collect())
    }
}
