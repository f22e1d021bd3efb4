//! Filters on single macro values.
//!
//! Each filter compares one already-coerced field against a fixed bound.
//! Items with missing data carry `0.0`, so they fail minimums and pass
//! maximums.

use crate::traits::{Candidate, Filter};

/// Keeps candidates with at least `min_protein` grams of protein.
pub struct MinimumProteinFilter {
    min_protein: f64,
}

impl MinimumProteinFilter {
    pub fn new(min_protein: f64) -> Self {
        Self { min_protein }
    }
}

impl Filter for MinimumProteinFilter {
    fn name(&self) -> &str {
        "MinimumProteinFilter"
    }

    fn apply<'a>(&self, candidates: Vec<Candidate<'a>>) -> Vec<Candidate<'a>> {
        candidates
            .into_iter()
            .filter(|candidate| candidate.item.protein_g >= self.min_protein)
            .collect()
    }
}

/// Keeps candidates with at least `min_calories` kcal.
pub struct MinimumCaloriesFilter {
    min_calories: f64,
}

impl MinimumCaloriesFilter {
    pub fn new(min_calories: f64) -> Self {
        Self { min_calories }
    }
}

impl Filter for MinimumCaloriesFilter {
    fn name(&self) -> &str {
        "MinimumCaloriesFilter"
    }

    fn apply<'a>(&self, candidates: Vec<Candidate<'a>>) -> Vec<Candidate<'a>> {
        candidates
            .into_iter()
            .filter(|candidate| candidate.item.calories >= self.min_calories)
            .collect()
    }
}

/// Keeps candidates with at most `max_carbs` grams of carbohydrate.
pub struct MaximumCarbsFilter {
    max_carbs: f64,
}

impl MaximumCarbsFilter {
    pub fn new(max_carbs: f64) -> Self {
        Self { max_carbs }
    }
}

impl Filter for MaximumCarbsFilter {
    fn name(&self) -> &str {
        "MaximumCarbsFilter"
    }

    fn apply<'a>(&self, candidates: Vec<Candidate<'a>>) -> Vec<Candidate<'a>> {
        candidates
            .into_iter()
            .filter(|candidate| candidate.item.carbs_g <= self.max_carbs)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::MenuItem;

    fn items() -> Vec<MenuItem> {
        vec![
            // kcal, protein, carbs, fat
            MenuItem::new("X", "Hash Brown").with_macros(140.0, 1.0, 15.0, 8.0),
            MenuItem::new("X", "McDouble").with_macros(400.0, 22.0, 33.0, 20.0),
            MenuItem::new("X", "Bunless Quarter Pounder").with_macros(300.0, 26.0, 10.0, 21.0),
            MenuItem::new("X", "Unknown"),
        ]
    }

    fn names<'a>(candidates: &[Candidate<'a>]) -> Vec<&'a str> {
        candidates.iter().map(|c| c.item.name.as_str()).collect()
    }

    #[test]
    fn test_minimum_protein_is_inclusive() {
        let items = items();
        let refs: Vec<&MenuItem> = items.iter().collect();

        let filtered = MinimumProteinFilter::new(22.0).apply(Candidate::from_menu(&refs));
        assert_eq!(names(&filtered), vec!["McDouble", "Bunless Quarter Pounder"]);
    }

    #[test]
    fn test_minimum_calories() {
        let items = items();
        let refs: Vec<&MenuItem> = items.iter().collect();

        let filtered = MinimumCaloriesFilter::new(200.0).apply(Candidate::from_menu(&refs));
        assert_eq!(names(&filtered), vec!["McDouble", "Bunless Quarter Pounder"]);
    }

    #[test]
    fn test_maximum_carbs_keeps_missing_data() {
        let items = items();
        let refs: Vec<&MenuItem> = items.iter().collect();

        let filtered = MaximumCarbsFilter::new(30.0).apply(Candidate::from_menu(&refs));
        assert_eq!(names(&filtered), vec!["Hash Brown", "Bunless Quarter Pounder", "Unknown"]);
    }
}
