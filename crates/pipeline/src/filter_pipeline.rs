//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::traits::{Candidate, Filter};

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(MainDishFilter::new(classifier.clone()))
///     .add_filter(DessertFilter::new(classifier.clone()))
///     .add_filter(MinimumProteinFilter::new(10.0));
///
/// let filtered = pipeline.apply(candidates);
/// ```
pub struct FilterPipeline {
    label: String,
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self::labeled("pipeline")
    }

    /// Create an empty pipeline whose log lines carry `label`
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Names of the filters in application order
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Apply all filters in sequence to the candidates.
    ///
    /// ## Algorithm
    /// 1. Start with the input candidates
    /// 2. For each filter in order:
    ///    a. Log filter name and input count
    ///    b. Apply the filter
    ///    c. Log output count
    /// 3. Return final filtered set
    pub fn apply<'a>(&self, candidates: Vec<Candidate<'a>>) -> Vec<Candidate<'a>> {
        let mut current = candidates;
        for filter in &self.filters {
            tracing::debug!(
                "[{}] Applying filter: {} (input count: {})",
                self.label,
                filter.name(),
                current.len()
            );
            current = filter.apply(current);
            tracing::debug!(
                "[{}] Filter applied: {} (output count: {})",
                self.label,
                filter.name(),
                current.len()
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
