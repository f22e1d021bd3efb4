//! Filter to keep only main dishes.
//!
//! Usually the first filter in every goal pipeline: drinks, sauces and
//! anything else the classifier rejects never get scored.

use crate::classifier::MainDishClassifier;
use crate::traits::{Candidate, Filter};
use std::sync::Arc;

/// Keeps candidates the classifier treats as main dishes.
pub struct MainDishFilter {
    classifier: Arc<MainDishClassifier>,
}

impl MainDishFilter {
    pub fn new(classifier: Arc<MainDishClassifier>) -> Self {
        Self { classifier }
    }
}

impl Filter for MainDishFilter {
    fn name(&self) -> &str {
        "MainDishFilter"
    }

    fn apply<'a>(&self, candidates: Vec<Candidate<'a>>) -> Vec<Candidate<'a>> {
        candidates
            .into_iter()
            .filter(|candidate| self.classifier.is_main(candidate.item))
            .collect()
    }
}
