//! Tunable thresholds, weights and rules for the suggestion pipeline.
//!
//! Every constant the filters and the scorer use lives here so it can be
//! overridden from a JSON file. Missing sections and fields keep their
//! defaults, so a config file only needs to mention what it changes:
//!
//! ```json
//! { "scoring": { "keto": { "soft_max_carbs": 20.0 } } }
//! ```

use crate::classifier::ClassifierRules;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Root configuration consumed by `GoalFilter`, `Scorer` and the engine.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub filter: FilterThresholds,
    pub scoring: ScoringWeights,
    pub ranking: RankingConfig,
    pub rules: ClassifierRules,
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid engine configuration")
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read engine config {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Failed to parse engine config {}", path.display()))
    }
}

// =============================================================================
// Goal pre-filter
// =============================================================================

/// Thresholds for the goal pre-filter and its degradation ladder.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterThresholds {
    /// Fewer strict survivors than this triggers the relaxed tier
    pub min_candidates: usize,
    /// Fewer candidates than this triggers the substantial-side backfill
    pub backfill_below: usize,
    /// Most sides the backfill may append
    pub backfill_limit: usize,
    /// Rows taken verbatim when every filtered tier comes back empty
    pub raw_fallback_limit: usize,

    pub cutting_min_protein: f64,
    pub keto_max_carbs: f64,
    pub keto_min_calories: f64,
    pub bulking_min_calories: f64,

    /// Carb ceiling for the relaxed keto tier and the keto backfill
    pub keto_relaxed_max_carbs: f64,
    /// Protein floor for sides backfilled under the cutting goal
    pub backfill_cutting_min_protein: f64,
}

impl Default for FilterThresholds {
    fn default() -> Self {
        Self {
            min_candidates: 3,
            backfill_below: 5,
            backfill_limit: 10,
            raw_fallback_limit: 20,
            cutting_min_protein: 10.0,
            keto_max_carbs: 30.0,
            keto_min_calories: 200.0,
            bulking_min_calories: 300.0,
            keto_relaxed_max_carbs: 40.0,
            backfill_cutting_min_protein: 15.0,
        }
    }
}

// =============================================================================
// Scoring
// =============================================================================

/// Weights and penalty scores for every goal.
///
/// Penalties are returned as the whole score (not added to a formula), so
/// they rank a flagged item below every unflagged one of the same goal.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Below this protein an item is disqualified for every goal
    pub min_protein: f64,
    /// Below these calories an item is disqualified for every goal
    pub min_calories: f64,
    pub cutting: CuttingWeights,
    pub bulking: BulkingWeights,
    pub keto: KetoWeights,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            min_protein: 10.0,
            min_calories: 200.0,
            cutting: CuttingWeights::default(),
            bulking: BulkingWeights::default(),
            keto: KetoWeights::default(),
        }
    }
}

/// `density·(protein per 100 kcal) + protein_weight·protein − calorie_weight·kcal − fat_weight·fat`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CuttingWeights {
    pub max_calories: f64,
    pub high_calorie_penalty: f64,
    pub max_fat: f64,
    pub high_fat_penalty: f64,
    pub density_weight: f64,
    pub protein_weight: f64,
    pub calorie_weight: f64,
    pub fat_weight: f64,
}

impl Default for CuttingWeights {
    fn default() -> Self {
        Self {
            max_calories: 600.0,
            high_calorie_penalty: -200.0,
            max_fat: 30.0,
            high_fat_penalty: -100.0,
            density_weight: 10.0,
            protein_weight: 2.0,
            calorie_weight: 0.1,
            fat_weight: 0.5,
        }
    }
}

/// `protein_weight·protein + calorie_weight·kcal − fat_weight·fat`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BulkingWeights {
    pub min_calories: f64,
    pub low_calorie_penalty: f64,
    pub protein_weight: f64,
    pub calorie_weight: f64,
    pub fat_weight: f64,
}

impl Default for BulkingWeights {
    fn default() -> Self {
        Self {
            min_calories: 400.0,
            low_calorie_penalty: -100.0,
            protein_weight: 3.0,
            calorie_weight: 0.05,
            fat_weight: 0.2,
        }
    }
}

/// `fat_weight·fat + protein_weight·protein − carb_weight·carbs`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KetoWeights {
    pub hard_max_carbs: f64,
    pub hard_carb_penalty: f64,
    pub soft_max_carbs: f64,
    pub soft_carb_penalty: f64,
    pub min_fat: f64,
    pub low_fat_penalty: f64,
    pub fat_weight: f64,
    pub protein_weight: f64,
    pub carb_weight: f64,
}

impl Default for KetoWeights {
    fn default() -> Self {
        Self {
            hard_max_carbs: 30.0,
            hard_carb_penalty: -1000.0,
            soft_max_carbs: 25.0,
            soft_carb_penalty: -800.0,
            min_fat: 15.0,
            low_fat_penalty: -400.0,
            fat_weight: 4.0,
            protein_weight: 1.5,
            carb_weight: 10.0,
        }
    }
}

// =============================================================================
// Ranking
// =============================================================================

/// Secondary ordering for items with equal scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Higher protein first, then fewer calories
    #[default]
    ProteinThenCalories,
    /// Keep menu order
    InputOrder,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub tie_break: TieBreak,
    pub suggestions: usize,
    pub runner_ups: usize,
    /// Cross-restaurant picks: how many restaurants to sample
    pub picks_restaurant_limit: usize,
    /// Cross-restaurant picks: how many top mains per restaurant
    pub picks_per_restaurant: usize,
    /// Cross-restaurant picks: overall cap
    pub picks_total: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            tie_break: TieBreak::default(),
            suggestions: 3,
            runner_ups: 2,
            picks_restaurant_limit: 25,
            picks_per_restaurant: 2,
            picks_total: 12,
        }
    }
}
