//! JSON HTTP API over the suggestion engine.
//!
//! | method    | path               | input                     |
//! |-----------|--------------------|---------------------------|
//! | GET       | `/api/health`      |                           |
//! | GET       | `/api/restaurants` |                           |
//! | GET       | `/api/items`       | `?restaurant=`            |
//! | GET       | `/api/item`        | `?restaurant=&name=`      |
//! | POST, GET | `/api/suggestions` | JSON body, or `?restaurant=&goal=` |
//! | GET       | `/api/top-picks`   | `?goal=`                  |
//!
//! Errors are `{"error": message}` with the status from `ApiError`.

use std::collections::HashMap;
use std::time::Duration;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query, State},
    http::{Method, header::CONTENT_TYPE},
    routing::get,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::debug;

use data_loader::Goal;

use crate::engine::{SuggestError, SuggestionEngine};
use crate::error::ApiError;
use crate::projection::SuggestionResult;
use crate::state::AppState;

/// Accepted names for the goal field, first present wins
pub const GOAL_KEYS: [&str; 4] = ["fitnessGoals", "fitnessGoal", "fitness_goals", "goal"];

/// A suggestion request after alias resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionRequest {
    pub restaurant: String,
    pub goal: Goal,
}

impl SuggestionRequest {
    /// Parse a request body; anything that is not a JSON object is an empty request
    pub fn from_body(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => Self::resolve(|key| map.get(key).and_then(text)),
            _ => Self::resolve(|_| None),
        }
    }

    pub fn from_query(params: &HashMap<String, String>) -> Self {
        Self::resolve(|key| params.get(key).cloned())
    }

    fn resolve(field: impl Fn(&str) -> Option<String>) -> Self {
        let goal = GOAL_KEYS
            .iter()
            .find_map(|key| field(key).filter(|v| !v.trim().is_empty()))
            .map(|v| Goal::parse_lenient(&v))
            .unwrap_or_default();

        Self {
            restaurant: field("restaurant").unwrap_or_default(),
            goal,
        }
    }
}

/// String value, or the first string of an array
fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(values) => values.iter().find_map(|v| v.as_str().map(str::to_string)),
        _ => None,
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RestaurantQuery {
    pub restaurant: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ItemQuery {
    pub restaurant: String,
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GoalQuery {
    pub goal: String,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/restaurants", get(restaurants_handler))
        .route("/api/items", get(items_handler))
        .route("/api/item", get(item_handler))
        .route(
            "/api/suggestions",
            get(suggestions_query_handler).post(suggestions_body_handler),
        )
        .route("/api/top-picks", get(top_picks_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// Run an engine call on the blocking pool; a cold store reads the catalog file
async fn run_engine<T, F>(state: &AppState, call: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&SuggestionEngine) -> Result<T, SuggestError> + Send + 'static,
{
    let engine = state.engine.clone();
    Ok(tokio::task::spawn_blocking(move || call(&engine)).await??)
}

async fn restaurants_handler(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let restaurants = run_engine(&state, |engine| engine.restaurants()).await?;
    Ok(Json(json!({ "restaurants": restaurants })))
}

async fn items_handler(
    State(state): State<AppState>,
    Query(query): Query<RestaurantQuery>,
) -> Result<Json<Value>, ApiError> {
    let restaurant = query.restaurant.trim().to_string();
    let items = run_engine(&state, {
        let restaurant = restaurant.clone();
        move |engine| engine.menu(&restaurant)
    })
    .await?;
    Ok(Json(json!({ "restaurant": restaurant, "items": items })))
}

async fn item_handler(
    State(state): State<AppState>,
    Query(query): Query<ItemQuery>,
) -> Result<Json<Value>, ApiError> {
    let restaurant = query.restaurant.trim().to_string();
    let item = run_engine(&state, {
        let restaurant = restaurant.clone();
        move |engine| engine.item(&restaurant, &query.name)
    })
    .await?;
    Ok(Json(json!({ "restaurant": restaurant, "item": item })))
}

async fn suggestions_body_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SuggestionResult>, ApiError> {
    suggest(&state, SuggestionRequest::from_body(&body)).await
}

async fn suggestions_query_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<SuggestionResult>, ApiError> {
    suggest(&state, SuggestionRequest::from_query(&params)).await
}

async fn suggest(state: &AppState, request: SuggestionRequest) -> Result<Json<SuggestionResult>, ApiError> {
    debug!("Suggestion request: {:?}", request);
    let result = run_engine(state, move |engine| engine.suggest(&request.restaurant, request.goal)).await?;
    Ok(Json(result))
}

async fn top_picks_handler(
    State(state): State<AppState>,
    Query(query): Query<GoalQuery>,
) -> Result<Json<Value>, ApiError> {
    let goal = Goal::parse_lenient(&query.goal);
    let picks = run_engine(&state, move |engine| engine.top_picks(goal)).await?;
    Ok(Json(json!({ "goal": goal, "picks": picks })))
}
