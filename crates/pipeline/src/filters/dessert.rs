//! Filter to drop desserts.
//!
//! Desserts are recognised by the classifier's dessert keywords on either
//! the category or the name ("Sweets", "McFlurry Cookie", "Apple Pie").

use crate::classifier::MainDishClassifier;
use crate::traits::{Candidate, Filter};
use std::sync::Arc;

/// Removes candidates that look like desserts.
pub struct DessertFilter {
    classifier: Arc<MainDishClassifier>,
}

impl DessertFilter {
    pub fn new(classifier: Arc<MainDishClassifier>) -> Self {
        Self { classifier }
    }
}

impl Filter for DessertFilter {
    fn name(&self) -> &str {
        "DessertFilter"
    }

    fn apply<'a>(&self, candidates: Vec<Candidate<'a>>) -> Vec<Candidate<'a>> {
        candidates
            .into_iter()
            .filter(|candidate| !self.classifier.is_dessert(candidate.item))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::MenuItem;

    #[test]
    fn test_dessert_filter() {
        let items = vec![
            MenuItem::new("X", "Baked Apple Pie"),
            MenuItem::new("X", "Spicy Chicken Sandwich"),
            MenuItem::new("X", "Frosty").with_category("Sweet Treats"),
            MenuItem::new("X", "Chocolate Shake"),
        ];
        let refs: Vec<&MenuItem> = items.iter().collect();

        let filter = DessertFilter::new(Arc::new(MainDishClassifier::default()));
        let filtered = filter.apply(Candidate::from_menu(&refs));

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].item.name, "Spicy Chicken Sandwich");
    }
}
