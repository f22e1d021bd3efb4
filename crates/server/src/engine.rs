//! # Suggestion Engine
//!
//! Coordinates one suggestion request end to end:
//! 1. Validate the restaurant name (before touching the catalog)
//! 2. Fetch the shared catalog from the load-once store
//! 3. Collect the restaurant's rows
//! 4. Goal pre-filter with the degradation ladder
//! 5. Score and rank
//! 6. Split into suggestions and runner-ups, then project
//!
//! Everything after step 2 is synchronous and infallible; the only errors
//! are a missing name, an unknown restaurant and an unavailable catalog.

use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, error, info, instrument};

use data_loader::{Catalog, CatalogStore, DataLoadError, Goal, MenuItem};
use pipeline::{
    Candidate, EngineConfig, FilterTier, GoalFilter, MainDishClassifier, RankedCandidate,
    RankingConfig, Scorer,
};

use crate::projection::{Projection, SuggestionResult};

/// Errors returned by the suggestion engine
#[derive(Error, Debug)]
pub enum SuggestError {
    #[error("restaurant is required")]
    MissingRestaurant,

    /// The catalog could not be loaded; the cause is logged, not shown to clients
    #[error("data unavailable")]
    DataUnavailable(#[source] DataLoadError),

    #[error("No items found for restaurant: {0}")]
    UnknownRestaurant(String),

    #[error("No item named {name} at {restaurant}")]
    ItemNotFound { restaurant: String, name: String },
}

pub type Result<T> = std::result::Result<T, SuggestError>;

/// A ranked item with its score, for `--explain` style output.
#[derive(Debug, Clone)]
pub struct ScoredItem {
    pub projection: Projection,
    pub score: f64,
}

/// The full ranking behind one suggestion.
#[derive(Debug, Clone)]
pub struct Explanation {
    pub restaurant: String,
    pub goal: Goal,
    pub menu_size: usize,
    pub tier: FilterTier,
    pub backfilled: usize,
    pub ranked: Vec<ScoredItem>,
}

struct RankedMenu<'a> {
    menu_size: usize,
    tier: FilterTier,
    backfilled: usize,
    ranked: Vec<RankedCandidate<'a>>,
}

/// Ranks menu items against a dietary goal.
pub struct SuggestionEngine {
    store: Arc<CatalogStore>,
    classifier: Arc<MainDishClassifier>,
    goal_filter: GoalFilter,
    scorer: Scorer,
    ranking: RankingConfig,
}

impl SuggestionEngine {
    pub fn new(store: Arc<CatalogStore>, config: EngineConfig) -> Self {
        let classifier = Arc::new(MainDishClassifier::new(config.rules));
        let goal_filter = GoalFilter::new(classifier.clone(), config.filter);
        let scorer = Scorer::new(config.scoring, &config.ranking);

        Self {
            store,
            classifier,
            goal_filter,
            scorer,
            ranking: config.ranking,
        }
    }

    /// Engine over an in-memory catalog
    pub fn from_catalog(catalog: Catalog, config: EngineConfig) -> Self {
        Self::new(Arc::new(CatalogStore::from_catalog(catalog)), config)
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    fn catalog(&self) -> Result<Arc<Catalog>> {
        self.store.get().map_err(|e| {
            error!("Catalog unavailable ({}): {}", self.store.path().display(), e);
            SuggestError::DataUnavailable(e)
        })
    }

    /// Three suggestions and up to two runner-ups for `restaurant`.
    #[instrument(skip(self))]
    pub fn suggest(&self, restaurant: &str, goal: Goal) -> Result<SuggestionResult> {
        let start = Instant::now();
        let restaurant = required(restaurant)?;
        let catalog = self.catalog()?;
        let ranked = self.rank_restaurant(&catalog, restaurant, goal)?;

        let mut projected = ranked.ranked.iter().map(|r| Projection::from_item(r.item()));
        let suggestions: Vec<Projection> = projected.by_ref().take(self.ranking.suggestions).collect();
        let runner_ups: Vec<Projection> = projected.take(self.ranking.runner_ups).collect();

        info!(
            "{} ({}): {} suggestions, {} runner-ups from {} rows in {:.2?}",
            restaurant,
            goal,
            suggestions.len(),
            runner_ups.len(),
            ranked.menu_size,
            start.elapsed()
        );

        Ok(SuggestionResult {
            suggestions,
            runner_ups,
        })
    }

    /// Every candidate that survived filtering, with its score.
    #[instrument(skip(self))]
    pub fn explain(&self, restaurant: &str, goal: Goal) -> Result<Explanation> {
        let restaurant = required(restaurant)?;
        let catalog = self.catalog()?;
        let ranked = self.rank_restaurant(&catalog, restaurant, goal)?;

        Ok(Explanation {
            restaurant: restaurant.to_string(),
            goal,
            menu_size: ranked.menu_size,
            tier: ranked.tier,
            backfilled: ranked.backfilled,
            ranked: ranked
                .ranked
                .iter()
                .map(|r| ScoredItem {
                    projection: Projection::from_item(r.item()),
                    score: r.score,
                })
                .collect(),
        })
    }

    fn rank_restaurant<'a>(
        &self,
        catalog: &'a Catalog,
        restaurant: &str,
        goal: Goal,
    ) -> Result<RankedMenu<'a>> {
        let menu = catalog.items_for(restaurant);
        if menu.is_empty() {
            return Err(SuggestError::UnknownRestaurant(restaurant.to_string()));
        }

        let selection = self.goal_filter.filter_for_goal(&menu, goal);
        debug!(
            "{} of {} rows selected ({} tier)",
            selection.len(),
            menu.len(),
            selection.tier
        );

        Ok(RankedMenu {
            menu_size: menu.len(),
            tier: selection.tier,
            backfilled: selection.backfilled,
            ranked: self.scorer.rank(selection.candidates, goal),
        })
    }

    /// Distinct restaurant names, sorted
    pub fn restaurants(&self) -> Result<Vec<String>> {
        let catalog = self.catalog()?;
        Ok(catalog.restaurants().into_iter().map(str::to_string).collect())
    }

    /// Raw rows for a restaurant; unknown or blank names give an empty menu
    pub fn menu(&self, restaurant: &str) -> Result<Vec<MenuItem>> {
        let catalog = self.catalog()?;
        Ok(catalog
            .items_for(restaurant)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Nutrition lookup by case-insensitive item name.
    pub fn item(&self, restaurant: &str, name: &str) -> Result<Projection> {
        let restaurant = required(restaurant)?;
        let name = name.trim();
        let catalog = self.catalog()?;

        catalog
            .find_item(restaurant, name)
            .map(Projection::from_item)
            .ok_or_else(|| SuggestError::ItemNotFound {
                restaurant: restaurant.to_string(),
                name: name.to_string(),
            })
    }

    /// Cross-restaurant carousel: the best mains of the first few restaurants.
    #[instrument(skip(self))]
    pub fn top_picks(&self, goal: Goal) -> Result<Vec<Projection>> {
        let catalog = self.catalog()?;
        let mut picks = Vec::new();

        for restaurant in catalog
            .restaurants()
            .into_iter()
            .take(self.ranking.picks_restaurant_limit)
        {
            if picks.len() >= self.ranking.picks_total {
                break;
            }

            let mains: Vec<&MenuItem> = catalog
                .items_for(restaurant)
                .into_iter()
                .filter(|item| self.classifier.is_main(item))
                .collect();

            picks.extend(
                self.scorer
                    .rank(Candidate::from_menu(&mains), goal)
                    .iter()
                    .take(self.ranking.picks_per_restaurant)
                    .map(|r| Projection::from_item(r.item())),
            );
        }

        picks.truncate(self.ranking.picks_total);
        debug!("{} top picks for {}", picks.len(), goal);
        Ok(picks)
    }
}

fn required(restaurant: &str) -> Result<&str> {
    let restaurant = restaurant.trim();
    if restaurant.is_empty() {
        return Err(SuggestError::MissingRestaurant);
    }
    Ok(restaurant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::LoadPolicy;

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    fn build_test_catalog() -> Catalog {
        Catalog::from_items(vec![
            MenuItem::new("Bowl Co", "Grilled Chicken Bowl")
                .with_category("Bowls")
                .with_macros(450.0, 40.0, 20.0, 10.0),
            MenuItem::new("Burger Barn", "Grilled Chicken Sandwich")
                .with_category("Sandwiches")
                .with_macros(380.0, 37.0, 44.0, 7.0),
            MenuItem::new("Burger Barn", "Bunless Cheeseburger")
                .with_category("Burgers")
                .with_macros(330.0, 27.0, 4.0, 24.0),
            MenuItem::new("Burger Barn", "Cobb Salad")
                .with_category("Salads")
                .with_macros(450.0, 40.0, 12.0, 27.0),
            MenuItem::new("Burger Barn", "Chicken Tenders")
                .with_category("Chicken")
                .with_macros(520.0, 44.0, 30.0, 26.0),
            MenuItem::new("Burger Barn", "Crispy Chicken Sandwich")
                .with_category("Sandwiches")
                .with_macros(560.0, 30.0, 50.0, 28.0),
            MenuItem::new("Burger Barn", "Texas Toast Burger")
                .with_category("Burgers")
                .with_macros(690.0, 35.0, 50.0, 38.0),
            MenuItem::new("Burger Barn", "Cola")
                .with_category("Beverages")
                .with_macros(210.0, 0.0, 58.0, 0.0),
            MenuItem::new("Taco Stand", "Steak Burrito")
                .with_category("Burritos")
                .with_macros(850.0, 45.0, 90.0, 30.0),
        ])
    }

    fn build_test_engine() -> SuggestionEngine {
        SuggestionEngine::from_catalog(build_test_catalog(), EngineConfig::default())
    }

    fn names(projections: &[Projection]) -> Vec<&str> {
        projections.iter().map(|p| p.name.as_str()).collect()
    }

    // ============================================================================
    // suggest
    // ============================================================================

    #[test]
    fn test_single_bowl_is_the_only_suggestion() {
        let engine = build_test_engine();

        let result = engine.suggest("Bowl Co", Goal::Cutting).unwrap();

        assert_eq!(names(&result.suggestions), vec!["Grilled Chicken Bowl"]);
        assert!(result.runner_ups.is_empty());
        assert_eq!(result.suggestions[0].calories, 450);
        assert_eq!(result.suggestions[0].description, "Bowls");
    }

    #[test]
    fn test_suggestions_and_runner_ups_split() {
        let engine = build_test_engine();

        let result = engine.suggest("  Burger Barn ", Goal::Cutting).unwrap();

        assert_eq!(result.suggestions.len(), 3);
        assert_eq!(result.runner_ups.len(), 2);
        assert_eq!(result.suggestions[0].name, "Grilled Chicken Sandwich");
        let all: Vec<&str> = names(&result.suggestions)
            .into_iter()
            .chain(names(&result.runner_ups))
            .collect();
        assert!(!all.contains(&"Cola"));
    }

    #[test]
    fn test_keto_skips_high_carb_items() {
        let engine = build_test_engine();

        let result = engine.suggest("Burger Barn", Goal::Keto).unwrap();
        assert_eq!(result.suggestions[0].name, "Bunless Cheeseburger");
        for projection in result.suggestions.iter().chain(&result.runner_ups) {
            assert!(projection.carbs_g <= 30.0, "{} has too many carbs", projection.name);
        }
    }

    #[test]
    fn test_unknown_restaurant() {
        let engine = build_test_engine();

        let err = engine.suggest("Nowhere Diner", Goal::Bulking).unwrap_err();
        assert!(matches!(err, SuggestError::UnknownRestaurant(ref r) if r == "Nowhere Diner"));
        assert_eq!(err.to_string(), "No items found for restaurant: Nowhere Diner");
    }

    #[test]
    fn test_blank_restaurant_never_touches_catalog() {
        let store = Arc::new(CatalogStore::new("/no/such/catalog.json", LoadPolicy::Strict));
        let engine = SuggestionEngine::new(store, EngineConfig::default());

        let err = engine.suggest("   ", Goal::Cutting).unwrap_err();
        assert!(matches!(err, SuggestError::MissingRestaurant));
        assert_eq!(err.to_string(), "restaurant is required");
        assert!(!engine.store().is_loaded());
    }

    #[test]
    fn test_missing_catalog_is_data_unavailable() {
        let store = Arc::new(CatalogStore::new("/no/such/catalog.json", LoadPolicy::Lenient));
        let engine = SuggestionEngine::new(store, EngineConfig::default());

        let err = engine.suggest("Burger Barn", Goal::Cutting).unwrap_err();
        assert!(matches!(err, SuggestError::DataUnavailable(_)));
        assert_eq!(err.to_string(), "data unavailable");
        assert!(engine.restaurants().is_err());
    }

    #[test]
    fn test_explain_reports_tier_and_scores() {
        let engine = build_test_engine();

        let explanation = engine.explain("Taco Stand", Goal::Keto).unwrap();
        assert_eq!(explanation.tier, FilterTier::RawFallback);
        assert_eq!(explanation.menu_size, 1);
        assert_eq!(explanation.ranked.len(), 1);
        assert_eq!(explanation.ranked[0].score, -1000.0);
    }

    // ============================================================================
    // Lookups
    // ============================================================================

    #[test]
    fn test_restaurants_and_menu() {
        let engine = build_test_engine();

        assert_eq!(
            engine.restaurants().unwrap(),
            vec!["Bowl Co", "Burger Barn", "Taco Stand"]
        );
        assert_eq!(engine.menu("Burger Barn").unwrap().len(), 7);
        assert!(engine.menu("Nowhere Diner").unwrap().is_empty());
    }

    #[test]
    fn test_item_lookup() {
        let engine = build_test_engine();

        let cobb = engine.item("Burger Barn", " cobb salad ").unwrap();
        assert_eq!(cobb.name, "Cobb Salad");
        assert_eq!(cobb.restaurant, "Burger Barn");

        let err = engine.item("Burger Barn", "Pizza").unwrap_err();
        assert_eq!(err.to_string(), "No item named Pizza at Burger Barn");
    }

    // ============================================================================
    // top_picks
    // ============================================================================

    #[test]
    fn test_top_picks_takes_best_mains_per_restaurant() {
        let engine = build_test_engine();

        let picks = engine.top_picks(Goal::Bulking).unwrap();
        let restaurants: Vec<&str> = picks.iter().map(|p| p.restaurant.as_str()).collect();

        assert_eq!(
            restaurants,
            vec!["Bowl Co", "Burger Barn", "Burger Barn", "Taco Stand"]
        );
        assert!(!names(&picks).contains(&"Cola"));
    }

    #[test]
    fn test_top_picks_respects_caps() {
        let mut config = EngineConfig::default();
        config.ranking.picks_restaurant_limit = 2;
        config.ranking.picks_per_restaurant = 3;
        config.ranking.picks_total = 3;
        let engine = SuggestionEngine::from_catalog(build_test_catalog(), config);

        let picks = engine.top_picks(Goal::Cutting).unwrap();
        assert_eq!(picks.len(), 3);
        assert_eq!(picks[0].restaurant, "Bowl Co");
        assert!(picks.iter().all(|p| p.restaurant != "Taco Stand"));
    }
}
