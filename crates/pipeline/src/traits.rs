//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to a restaurant's menu, and the
//! `Candidate` view those filters pass along.

use data_loader::MenuItem;

/// A menu row under consideration, borrowed from the catalog.
///
/// `position` is the row's index within its restaurant's menu, which keeps
/// identity checks cheap when tiers are combined.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub position: usize,
    pub item: &'a MenuItem,
}

impl<'a> Candidate<'a> {
    pub fn new(position: usize, item: &'a MenuItem) -> Self {
        Self { position, item }
    }

    /// Wrap a whole menu, numbering rows in menu order
    pub fn from_menu(menu: &[&'a MenuItem]) -> Vec<Candidate<'a>> {
        menu.iter()
            .enumerate()
            .map(|(position, &item)| Candidate::new(position, item))
            .collect()
    }
}

/// Core trait for filtering candidates.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` lets a configured pipeline sit in shared server state
/// - Filters take ownership of the Vec<Candidate> and return a filtered Vec
/// - Filtering never fails: a filter that cannot judge an item keeps it
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of candidates, preserving their order.
    fn apply<'a>(&self, candidates: Vec<Candidate<'a>>) -> Vec<Candidate<'a>>;
}
