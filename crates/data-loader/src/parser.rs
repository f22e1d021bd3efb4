//! Parser for menu catalog JSON.
//!
//! Source files come from several scrapers and disagree on field names
//! (`kcal` vs `calories`, `protein` vs `protein_g`, `item` vs `name`, ...).
//! Everything is reconciled here so the rest of the system only ever sees
//! the canonical `MenuItem`.
//!
//! Numeric fields are coerced leniently: a value that cannot be read as a
//! number becomes `0.0` instead of failing the row.

use crate::error::{DataLoadError, Result};
use crate::types::MenuItem;
use rayon::prelude::*;
use serde_json::{Map, Value};
use tracing::warn;

type Row = Map<String, Value>;

const NAME_KEYS: &[&str] = &["item", "name", "menu_item_name", "product_name"];
const CALORIE_KEYS: &[&str] = &["calories", "kcal"];
const PROTEIN_KEYS: &[&str] = &["protein_g", "protein"];
const CARB_KEYS: &[&str] = &["carbs_g", "carbs", "carbohydrates_g"];
const FAT_KEYS: &[&str] = &["fat_g", "fat", "total_fat_g"];
const SODIUM_KEYS: &[&str] = &["sodium_mg", "sodium"];
const SERVING_KEYS: &[&str] = &["serving_size", "serving_size_text"];

/// Coerce any JSON value to a finite `f64`, never failing.
///
/// Example: `450` -> 450.0, `" 12.5 "` -> 12.5, `"n/a"` -> 0.0, `null` -> 0.0
pub fn lenient_number(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Null | Value::Array(_) | Value::Object(_) => 0.0,
    };

    // NaN/inf would poison every comparison downstream
    if parsed.is_finite() { parsed } else { 0.0 }
}

/// Truthiness of an override flag.
///
/// A present key always overrides classification: `null`, `0`, empty
/// containers and the strings `false/no/n/0/""` are false, everything else
/// is true.
pub fn lenient_flag(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !matches!(
            s.trim().to_lowercase().as_str(),
            "false" | "no" | "n" | "0" | ""
        ),
        Value::Array(values) => !values.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// First key whose value is present and not null
fn first_present<'a>(row: &'a Row, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| row.get(*key))
        .find(|value| !value.is_null())
}

/// First key holding a non-empty string (numbers are stringified)
fn first_text(row: &Row, keys: &[&str]) -> Option<String> {
    keys.iter().filter_map(|key| row.get(*key)).find_map(|value| {
        let text = match value {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        (!text.is_empty()).then_some(text)
    })
}

fn number_field(row: &Row, keys: &[&str]) -> f64 {
    first_present(row, keys).map(lenient_number).unwrap_or(0.0)
}

/// Normalize one raw JSON object into a `MenuItem`
pub fn normalize_row(row: &Row) -> MenuItem {
    MenuItem {
        restaurant: first_text(row, &["restaurant"]).unwrap_or_default(),
        name: first_text(row, NAME_KEYS).unwrap_or_default(),
        category: first_text(row, &["category"]).unwrap_or_default(),
        calories: number_field(row, CALORIE_KEYS),
        protein_g: number_field(row, PROTEIN_KEYS),
        carbs_g: number_field(row, CARB_KEYS),
        fat_g: number_field(row, FAT_KEYS),
        sodium_mg: number_field(row, SODIUM_KEYS),
        is_main_candidate: row.get("is_main_candidate").map(lenient_flag),
        serving_size: first_text(row, SERVING_KEYS),
    }
}

/// Parse a catalog document.
///
/// Accepts either a top-level array of rows or an object with an `items`
/// array. Rows that are not JSON objects are skipped with a warning.
/// Rows are normalized in parallel; output order matches input order.
pub fn parse_catalog(json: &str, source_name: &str) -> Result<Vec<MenuItem>> {
    let document: Value = serde_json::from_str(json).map_err(|e| DataLoadError::Malformed {
        source_name: source_name.to_string(),
        reason: e.to_string(),
    })?;

    let rows = match document {
        Value::Array(rows) => rows,
        Value::Object(mut object) => match object.remove("items") {
            Some(Value::Array(rows)) => rows,
            _ => {
                return Err(DataLoadError::UnexpectedShape(
                    "object without an `items` array".to_string(),
                ));
            }
        },
        other => {
            return Err(DataLoadError::UnexpectedShape(format!(
                "expected an array of rows, found {}",
                json_kind(&other)
            )));
        }
    };

    let skipped = rows.iter().filter(|row| !row.is_object()).count();
    if skipped > 0 {
        warn!("Skipped {} non-object rows in {}", skipped, source_name);
    }

    let items = rows
        .par_iter()
        .filter_map(Value::as_object)
        .map(normalize_row)
        .collect();

    Ok(items)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_lenient_number() {
        assert_eq!(lenient_number(&json!(450)), 450.0);
        assert_eq!(lenient_number(&json!(12.5)), 12.5);
        assert_eq!(lenient_number(&json!(" 31 ")), 31.0);
        assert_eq!(lenient_number(&json!("n/a")), 0.0);
        assert_eq!(lenient_number(&json!(null)), 0.0);
        assert_eq!(lenient_number(&json!([1, 2])), 0.0);
        assert_eq!(lenient_number(&json!(true)), 1.0);
        assert_eq!(lenient_number(&json!("NaN")), 0.0);
        assert_eq!(lenient_number(&json!("inf")), 0.0);
    }

    #[test]
    fn test_lenient_flag() {
        assert!(lenient_flag(&json!(true)));
        assert!(!lenient_flag(&json!(0)));
        assert!(lenient_flag(&json!(2.5)));
        assert!(lenient_flag(&json!("Yes")));
        assert!(lenient_flag(&json!("maybe")));
        assert!(!lenient_flag(&json!(" False ")));
        assert!(!lenient_flag(&json!("")));
        assert!(!lenient_flag(&json!(null)));
        assert!(!lenient_flag(&json!([])));
        assert!(lenient_flag(&json!(["x"])));
    }

    #[test]
    fn test_present_override_key_always_decides() {
        let null_flag = normalize_row(&row(json!({
            "item": "Chicken Sandwich",
            "is_main_candidate": null
        })));
        assert_eq!(null_flag.is_main_candidate, Some(false));

        let vague_flag = normalize_row(&row(json!({
            "item": "Diet Soda",
            "is_main_candidate": "maybe"
        })));
        assert_eq!(vague_flag.is_main_candidate, Some(true));

        let absent = normalize_row(&row(json!({ "item": "Chicken Sandwich" })));
        assert_eq!(absent.is_main_candidate, None);
    }

    #[test]
    fn test_normalize_reconciles_field_names() {
        let item = normalize_row(&row(json!({
            "restaurant": " Taco Bell ",
            "menu_item_name": "Power Bowl",
            "kcal": "470",
            "protein": 26,
            "carbs": 50.5,
            "fat": null,
            "sodium": "1200",
            "serving_size_text": "1 bowl"
        })));

        assert_eq!(item.restaurant, "Taco Bell");
        assert_eq!(item.name, "Power Bowl");
        assert_eq!(item.category, "");
        assert_eq!(item.calories, 470.0);
        assert_eq!(item.protein_g, 26.0);
        assert_eq!(item.carbs_g, 50.5);
        assert_eq!(item.fat_g, 0.0);
        assert_eq!(item.sodium_mg, 1200.0);
        assert_eq!(item.serving_size.as_deref(), Some("1 bowl"));
        assert_eq!(item.is_main_candidate, None);
    }

    #[test]
    fn test_normalize_prefers_canonical_keys() {
        let item = normalize_row(&row(json!({
            "item": "Double Stack",
            "name": "ignored",
            "calories": 430,
            "kcal": 999,
            "protein_g": 25,
            "protein": 1
        })));

        assert_eq!(item.name, "Double Stack");
        assert_eq!(item.calories, 430.0);
        assert_eq!(item.protein_g, 25.0);
    }

    #[test]
    fn test_empty_name_falls_through_to_next_key() {
        let item = normalize_row(&row(json!({ "item": "", "name": "Chili" })));
        assert_eq!(item.name, "Chili");
    }

    #[test]
    fn test_parse_catalog_shapes() {
        let array = r#"[{"restaurant": "A", "item": "x"}, 7, {"restaurant": "B", "item": "y"}]"#;
        let items = parse_catalog(array, "inline").unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].restaurant, "A");
        assert_eq!(items[1].restaurant, "B");

        let object = r#"{"items": [{"restaurant": "A", "item": "x"}]}"#;
        assert_eq!(parse_catalog(object, "inline").unwrap().len(), 1);
    }

    #[test]
    fn test_parse_catalog_rejects_bad_documents() {
        assert!(matches!(
            parse_catalog("{not json", "inline"),
            Err(DataLoadError::Malformed { .. })
        ));
        assert!(matches!(
            parse_catalog(r#""just a string""#, "inline"),
            Err(DataLoadError::UnexpectedShape(_))
        ));
        assert!(matches!(
            parse_catalog(r#"{"rows": []}"#, "inline"),
            Err(DataLoadError::UnexpectedShape(_))
        ));
    }
}
