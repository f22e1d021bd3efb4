//! Pipeline for classifying, filtering and ranking menu items.
//!
//! This crate provides:
//! - `MainDishClassifier`, a data-driven keyword classifier
//! - Filter trait and implementations for candidate filtering
//! - FilterPipeline for composing filters
//! - `GoalFilter`, the per-goal exclusion policy with its degradation ladder
//! - `Scorer`, the goal-specific scoring function and ranking
//! - `EngineConfig`, every threshold and weight in one deserializable struct
//!
//! ## Architecture
//! The pipeline processes one restaurant's menu in stages:
//! 1. GoalFilter selects candidates (strict -> relaxed -> raw rows, plus side backfill)
//! 2. Scorer ranks the candidates for the goal
//! 3. The caller takes the top of the ranking
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{EngineConfig, GoalFilter, MainDishClassifier, Scorer};
//! use std::sync::Arc;
//!
//! let config = EngineConfig::default();
//! let classifier = Arc::new(MainDishClassifier::new(config.rules.clone()));
//! let goal_filter = GoalFilter::new(classifier, config.filter.clone());
//! let scorer = Scorer::new(config.scoring.clone(), &config.ranking);
//!
//! let menu = catalog.items_for("Chipotle");
//! let selection = goal_filter.filter_for_goal(&menu, Goal::Keto);
//! let ranked = scorer.rank(selection.candidates, Goal::Keto);
//! ```

pub mod classifier;
pub mod config;
pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod goal_filter;
pub mod scoring;

// Re-export main types
pub use classifier::{Classification, ClassifierRules, KeywordSet, MainDishClassifier, Rule, Verdict};
pub use config::{EngineConfig, FilterThresholds, RankingConfig, ScoringWeights, TieBreak};
pub use traits::{Candidate, Filter};
pub use filter_pipeline::FilterPipeline;
pub use goal_filter::{FilterTier, GoalFilter, GoalSelection};
pub use scoring::{DISQUALIFIED, RankedCandidate, Scorer};
