//! Filter implementations for the candidate pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod dessert;
pub mod macro_limits;
pub mod main_dish;
pub mod substantial_side;

// Re-export for convenience
pub use dessert::DessertFilter;
pub use macro_limits::{MaximumCarbsFilter, MinimumCaloriesFilter, MinimumProteinFilter};
pub use main_dish::MainDishFilter;
pub use substantial_side::SubstantialSideFilter;
