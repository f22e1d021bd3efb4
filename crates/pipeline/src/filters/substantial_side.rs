//! Filter to find sides hearty enough to stand in for a main.
//!
//! Used by the backfill step when a restaurant has too few mains: a side
//! qualifies only when its category looks like a side ("Sides",
//! "Appetizers", "Snacks") and its name looks like food with substance
//! (nuggets, wings, salad, soup, chili).

use crate::classifier::MainDishClassifier;
use crate::traits::{Candidate, Filter};
use std::sync::Arc;

/// Keeps substantial sides only.
pub struct SubstantialSideFilter {
    classifier: Arc<MainDishClassifier>,
}

impl SubstantialSideFilter {
    pub fn new(classifier: Arc<MainDishClassifier>) -> Self {
        Self { classifier }
    }
}

impl Filter for SubstantialSideFilter {
    fn name(&self) -> &str {
        "SubstantialSideFilter"
    }

    fn apply<'a>(&self, candidates: Vec<Candidate<'a>>) -> Vec<Candidate<'a>> {
        candidates
            .into_iter()
            .filter(|candidate| self.classifier.is_substantial_side(candidate.item))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::MenuItem;

    #[test]
    fn test_substantial_side_filter() {
        let items = vec![
            MenuItem::new("X", "4pc Chicken Nuggets").with_category("Snacks & Sides"),
            MenuItem::new("X", "Small Fries").with_category("Sides"),
            MenuItem::new("X", "Bowl of Chili").with_category("Soups"),
            MenuItem::new("X", "Buffalo Wings").with_category("Appetizers"),
        ];
        let refs: Vec<&MenuItem> = items.iter().collect();

        let filter = SubstantialSideFilter::new(Arc::new(MainDishClassifier::default()));
        let filtered = filter.apply(Candidate::from_menu(&refs));

        let positions: Vec<usize> = filtered.iter().map(|c| c.position).collect();
        assert_eq!(positions, vec![0, 3]);
    }
}
