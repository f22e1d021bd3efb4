//! Goal-specific scoring and ranking.
//!
//! `Scorer::score` is a pure function of one item and a goal; higher is
//! better. Items that miss the shared protein or calorie floor are not
//! removed, they score `f64::NEG_INFINITY`. Every other item scores a
//! finite value (overflow is clamped), so a disqualified item always
//! ranks below a valid one whatever its macros.

use crate::config::{RankingConfig, ScoringWeights, TieBreak};
use crate::traits::Candidate;
use data_loader::{Goal, MenuItem};
use rayon::prelude::*;
use std::cmp::Ordering;

/// Score of an item below the protein or calorie floor
pub const DISQUALIFIED: f64 = f64::NEG_INFINITY;

/// A candidate together with its score for one goal.
#[derive(Debug, Clone, Copy)]
pub struct RankedCandidate<'a> {
    pub candidate: Candidate<'a>,
    pub score: f64,
}

impl<'a> RankedCandidate<'a> {
    pub fn item(&self) -> &'a MenuItem {
        self.candidate.item
    }
}

/// Scores and ranks menu items for a goal.
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    weights: ScoringWeights,
    tie_break: TieBreak,
}

impl Scorer {
    pub fn new(weights: ScoringWeights, ranking: &RankingConfig) -> Self {
        Self {
            weights,
            tie_break: ranking.tie_break,
        }
    }

    /// Fails the protein or calorie floor shared by every goal
    pub fn is_disqualified(&self, item: &MenuItem) -> bool {
        item.protein_g < self.weights.min_protein || item.calories < self.weights.min_calories
    }

    pub fn score(&self, item: &MenuItem, goal: Goal) -> f64 {
        if self.is_disqualified(item) {
            return DISQUALIFIED;
        }

        let score = self.goal_score(item, goal);
        if score.is_nan() { f64::MIN } else { score.clamp(f64::MIN, f64::MAX) }
    }

    fn goal_score(&self, item: &MenuItem, goal: Goal) -> f64 {
        let kcal = item.calories;
        let protein = item.protein_g;
        let carbs = item.carbs_g;
        let fat = item.fat_g;

        match goal {
            Goal::Cutting => {
                let w = &self.weights.cutting;
                if kcal > w.max_calories {
                    return w.high_calorie_penalty;
                }
                if fat > w.max_fat {
                    return w.high_fat_penalty;
                }
                // grams of protein per 100 kcal
                let density = protein / kcal.max(1.0) * 100.0;
                w.density_weight * density + w.protein_weight * protein
                    - w.calorie_weight * kcal
                    - w.fat_weight * fat
            }
            Goal::Bulking => {
                let w = &self.weights.bulking;
                if kcal < w.min_calories {
                    return w.low_calorie_penalty;
                }
                w.protein_weight * protein + w.calorie_weight * kcal - w.fat_weight * fat
            }
            Goal::Keto => {
                let w = &self.weights.keto;
                if carbs > w.hard_max_carbs {
                    return w.hard_carb_penalty;
                }
                if carbs > w.soft_max_carbs {
                    return w.soft_carb_penalty;
                }
                if fat < w.min_fat {
                    return w.low_fat_penalty;
                }
                w.fat_weight * fat + w.protein_weight * protein - w.carb_weight * carbs
            }
        }
    }

    /// Score every candidate and sort best first.
    ///
    /// The sort is stable; equal scores are ordered by the configured
    /// `TieBreak`, so the same input always yields the same ranking.
    pub fn rank<'a>(&self, candidates: Vec<Candidate<'a>>, goal: Goal) -> Vec<RankedCandidate<'a>> {
        let mut ranked: Vec<RankedCandidate<'a>> = candidates
            .into_par_iter()
            .map(|candidate| RankedCandidate {
                candidate,
                score: self.score(candidate.item, goal),
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| self.tie_break(a.item(), b.item()))
        });
        ranked
    }

    fn tie_break(&self, a: &MenuItem, b: &MenuItem) -> Ordering {
        match self.tie_break {
            TieBreak::ProteinThenCalories => b
                .protein_g
                .total_cmp(&a.protein_g)
                .then_with(|| a.calories.total_cmp(&b.calories)),
            TieBreak::InputOrder => Ordering::Equal,
        }
    }
}
