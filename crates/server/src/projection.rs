//! Client-facing shape of a ranked menu item.

use data_loader::MenuItem;
use serde::Serialize;

/// One suggested item as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    pub name: String,
    pub description: String,
    pub calories: i64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub sodium_mg: f64,
    pub restaurant: String,
}

impl Projection {
    pub fn from_item(item: &MenuItem) -> Self {
        let name = if item.name.trim().is_empty() {
            "Unknown Item".to_string()
        } else {
            item.name.clone()
        };

        let mut description = if item.category.trim().is_empty() {
            "Main".to_string()
        } else {
            item.category.clone()
        };
        if let Some(serving) = item.serving_size.as_deref().filter(|s| !s.trim().is_empty()) {
            description.push_str(" · ");
            description.push_str(serving);
        }

        Self {
            name,
            description,
            // `as` truncates toward zero and saturates out-of-range values
            calories: item.calories as i64,
            protein_g: item.protein_g,
            carbs_g: item.carbs_g,
            fat_g: item.fat_g,
            sodium_mg: item.sodium_mg,
            restaurant: item.restaurant.clone(),
        }
    }
}

impl From<&MenuItem> for Projection {
    fn from(item: &MenuItem) -> Self {
        Self::from_item(item)
    }
}

/// Response of a suggestion request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SuggestionResult {
    pub suggestions: Vec<Projection>,
    pub runner_ups: Vec<Projection>,
}
