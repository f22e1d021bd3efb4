//! Keyword-based item classification.
//!
//! Menu taxonomies differ between chains, so classification is a list of
//! keyword rules evaluated top to bottom against the lower-cased category and
//! name. The first rule that fires decides; when nothing fires the item is
//! treated as a main, so sparse metadata never starves the pipeline.
//!
//! The rules are plain data (`ClassifierRules` deserializes from JSON) and
//! can be swapped without touching code.

use data_loader::MenuItem;
use serde::Deserialize;

/// Keywords matched as substrings of the lower-cased category and name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct KeywordSet {
    pub category: Vec<String>,
    pub name: Vec<String>,
}

impl KeywordSet {
    pub fn new(category: &[&str], name: &[&str]) -> Self {
        Self {
            category: category.iter().map(|s| s.to_string()).collect(),
            name: name.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn matches_category(&self, category_lower: &str) -> bool {
        self.category.iter().any(|kw| category_lower.contains(kw.as_str()))
    }

    pub fn matches_name(&self, name_lower: &str) -> bool {
        self.name.iter().any(|kw| name_lower.contains(kw.as_str()))
    }

    /// Category keyword OR name keyword
    pub fn matches_either(&self, category_lower: &str, name_lower: &str) -> bool {
        self.matches_category(category_lower) || self.matches_name(name_lower)
    }

    /// Category keyword AND name keyword
    pub fn matches_both(&self, category_lower: &str, name_lower: &str) -> bool {
        self.matches_category(category_lower) && self.matches_name(name_lower)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Include,
    Exclude,
}

/// One classification rule.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Rule {
    pub label: String,
    pub verdict: Verdict,
    #[serde(flatten)]
    pub keywords: KeywordSet,
}

impl Rule {
    fn new(label: &str, verdict: Verdict, category: &[&str], name: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            verdict,
            keywords: KeywordSet::new(category, name),
        }
    }
}

/// All keyword data used by the classifier and the keyword-driven filters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClassifierRules {
    /// Ordered main-dish rules; first match wins
    pub main_dish: Vec<Rule>,
    /// Matches either the category or the name
    pub dessert: KeywordSet,
    /// Requires a category hint AND a name hint
    pub substantial_side: KeywordSet,
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self {
            main_dish: vec![
                // "tea" is not a name keyword: it would match "steak"
                Rule::new(
                    "beverage",
                    Verdict::Exclude,
                    &["drink", "beverage", "soda", "juice", "coffee", "tea", "water"],
                    &["drink", "soda", "juice", "coffee", "iced tea", "sweet tea", "water", "beverage", "lemonade"],
                ),
                Rule::new(
                    "condiment",
                    Verdict::Exclude,
                    &["sauce", "condiment", "dip", "spread", "dressing"],
                    &["sauce", "dip", "spread", "condiment", "dressing"],
                ),
                Rule::new(
                    "main-dish",
                    Verdict::Include,
                    &[
                        "main", "burger", "sandwich", "wrap", "bowl", "entree", "combo", "taco",
                        "pizza", "nugget", "wing", "salad", "chicken", "beef", "fish", "pork",
                    ],
                    &[
                        "burger", "sandwich", "wrap", "bowl", "taco", "pizza", "nugget", "wing",
                        "salad", "chicken", "beef", "fish", "pork", "meal", "combo",
                    ],
                ),
            ],
            dessert: KeywordSet::new(
                &["dessert", "sweet", "treat"],
                &["pie", "cake", "sundae", "shake", "ice cream", "cookie", "brownie", "donut"],
            ),
            substantial_side: KeywordSet::new(
                &["side", "appetizer", "snack"],
                &["nugget", "wing", "salad", "soup", "chili"],
            ),
        }
    }
}

impl ClassifierRules {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Why an item was (or was not) treated as a main dish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// `is_main_candidate` was set on the row
    Override(bool),
    Excluded(String),
    Included(String),
    /// No rule fired
    Default,
}

impl Classification {
    pub fn is_main(&self) -> bool {
        match self {
            Classification::Override(is_main) => *is_main,
            Classification::Excluded(_) => false,
            Classification::Included(_) | Classification::Default => true,
        }
    }
}

/// Applies `ClassifierRules` to menu items.
#[derive(Debug, Clone, Default)]
pub struct MainDishClassifier {
    rules: ClassifierRules,
}

impl MainDishClassifier {
    pub fn new(rules: ClassifierRules) -> Self {
        Self { rules }
    }

    pub fn classify(&self, item: &MenuItem) -> Classification {
        if let Some(is_main) = item.is_main_candidate {
            return Classification::Override(is_main);
        }

        let category = item.category_lower();
        let name = item.name_lower();

        self.rules
            .main_dish
            .iter()
            .find(|rule| rule.keywords.matches_either(&category, &name))
            .map(|rule| match rule.verdict {
                Verdict::Include => Classification::Included(rule.label.clone()),
                Verdict::Exclude => Classification::Excluded(rule.label.clone()),
            })
            .unwrap_or(Classification::Default)
    }

    pub fn is_main(&self, item: &MenuItem) -> bool {
        self.classify(item).is_main()
    }

    pub fn is_dessert(&self, item: &MenuItem) -> bool {
        self.rules
            .dessert
            .matches_either(&item.category_lower(), &item.name_lower())
    }

    pub fn is_substantial_side(&self, item: &MenuItem) -> bool {
        self.rules
            .substantial_side
            .matches_both(&item.category_lower(), &item.name_lower())
    }
}
