//! Goal-specific pre-filtering with a degradation ladder.
//!
//! ## Algorithm
//! 1. **Strict** tier: the goal's full exclusion policy
//!    - cutting: mains, no desserts, protein >= 10 g
//!    - keto: mains, carbs <= 30 g, calories >= 200
//!    - bulking: mains, calories >= 300
//! 2. **Relaxed** tier when the strict tier leaves fewer than 3 items:
//!    - cutting: mains without desserts
//!    - keto: mains with carbs <= 40 g
//!    - bulking: all mains
//! 3. **Raw fallback** when the relaxed tier is empty: the first 20 menu rows
//! 4. **Backfill** when fewer than 5 remain: substantial sides not already
//!    selected (cutting requires protein >= 15 g, keto keeps the relaxed carb
//!    ceiling), at most 10
//!
//! A non-empty menu therefore always produces a non-empty selection.

use crate::classifier::MainDishClassifier;
use crate::config::FilterThresholds;
use crate::filter_pipeline::FilterPipeline;
use crate::filters::*;
use crate::traits::Candidate;
use data_loader::{Goal, MenuItem};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Which rung of the ladder produced the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterTier {
    Strict,
    Relaxed,
    RawFallback,
}

impl fmt::Display for FilterTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FilterTier::Strict => "strict",
            FilterTier::Relaxed => "relaxed",
            FilterTier::RawFallback => "raw fallback",
        };
        f.write_str(label)
    }
}

/// Output of `GoalFilter::filter_for_goal`.
#[derive(Debug, Clone)]
pub struct GoalSelection<'a> {
    pub candidates: Vec<Candidate<'a>>,
    pub tier: FilterTier,
    /// How many of `candidates` (at the end) came from the side backfill
    pub backfilled: usize,
}

impl<'a> GoalSelection<'a> {
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// The three pipelines one goal needs.
struct GoalPipelines {
    strict: FilterPipeline,
    relaxed: FilterPipeline,
    backfill: FilterPipeline,
}

/// Applies the per-goal exclusion policy and its fallbacks.
pub struct GoalFilter {
    thresholds: FilterThresholds,
    cutting: GoalPipelines,
    bulking: GoalPipelines,
    keto: GoalPipelines,
}

impl GoalFilter {
    pub fn new(classifier: Arc<MainDishClassifier>, thresholds: FilterThresholds) -> Self {
        let t = &thresholds;
        let mains = |label: &str| {
            FilterPipeline::labeled(label).add_filter(MainDishFilter::new(classifier.clone()))
        };
        let sides = |label: &str| {
            FilterPipeline::labeled(label).add_filter(SubstantialSideFilter::new(classifier.clone()))
        };

        let cutting = GoalPipelines {
            strict: mains("cutting/strict")
                .add_filter(DessertFilter::new(classifier.clone()))
                .add_filter(MinimumProteinFilter::new(t.cutting_min_protein)),
            relaxed: mains("cutting/relaxed").add_filter(DessertFilter::new(classifier.clone())),
            backfill: sides("cutting/backfill")
                .add_filter(MinimumProteinFilter::new(t.backfill_cutting_min_protein)),
        };

        let keto = GoalPipelines {
            strict: mains("keto/strict")
                .add_filter(MaximumCarbsFilter::new(t.keto_max_carbs))
                .add_filter(MinimumCaloriesFilter::new(t.keto_min_calories)),
            relaxed: mains("keto/relaxed").add_filter(MaximumCarbsFilter::new(t.keto_relaxed_max_carbs)),
            backfill: sides("keto/backfill").add_filter(MaximumCarbsFilter::new(t.keto_relaxed_max_carbs)),
        };

        let bulking = GoalPipelines {
            strict: mains("bulking/strict").add_filter(MinimumCaloriesFilter::new(t.bulking_min_calories)),
            relaxed: mains("bulking/relaxed"),
            backfill: sides("bulking/backfill"),
        };

        Self {
            thresholds,
            cutting,
            bulking,
            keto,
        }
    }

    fn pipelines(&self, goal: Goal) -> &GoalPipelines {
        match goal {
            Goal::Cutting => &self.cutting,
            Goal::Bulking => &self.bulking,
            Goal::Keto => &self.keto,
        }
    }

    /// Select the candidates worth scoring for `goal` from one restaurant's menu.
    pub fn filter_for_goal<'a>(&self, menu: &[&'a MenuItem], goal: Goal) -> GoalSelection<'a> {
        let t = &self.thresholds;
        let pipelines = self.pipelines(goal);
        let all = Candidate::from_menu(menu);

        let mut tier = FilterTier::Strict;
        let mut selected = pipelines.strict.apply(all.clone());

        if selected.len() < t.min_candidates {
            debug!(
                "{} strict tier kept {} of {} items, relaxing",
                goal,
                selected.len(),
                menu.len()
            );
            tier = FilterTier::Relaxed;
            selected = pipelines.relaxed.apply(all.clone());
        }

        if selected.is_empty() {
            debug!("{} relaxed tier is empty, taking raw menu rows", goal);
            tier = FilterTier::RawFallback;
            selected = all.iter().take(t.raw_fallback_limit).copied().collect();
        }

        let mut backfilled = 0;
        if selected.len() < t.backfill_below {
            let taken: HashSet<usize> = selected.iter().map(|c| c.position).collect();
            let remaining: Vec<Candidate<'a>> = all
                .into_iter()
                .filter(|c| !taken.contains(&c.position))
                .collect();

            let mut extra = pipelines.backfill.apply(remaining);
            extra.truncate(t.backfill_limit);
            backfilled = extra.len();
            selected.extend(extra);
        }

        debug!(
            "{} selection: {} candidates ({} tier, {} backfilled)",
            goal,
            selected.len(),
            tier,
            backfilled
        );

        GoalSelection {
            candidates: selected,
            tier,
            backfilled,
        }
    }
}

impl Default for GoalFilter {
    fn default() -> Self {
        Self::new(Arc::new(MainDishClassifier::default()), FilterThresholds::default())
    }
}
