//! Ingredient names extracted from SR Legacy search results

use serde::{Deserialize, Serialize};

use super::search::{FoodDataType, SearchResultFood};
use crate::codec::closest_match;

const ALCOHOLIC_PREFIXES: [&str; 2] = ["Alcoholic beverages, ", "Alcoholic beverage, "];

/// One ingredient, keyed by FDC id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientEntry {
    pub fdc_id: Option<i64>,
    pub common_names: Option<String>,
    pub description: Option<String>,
}

impl IngredientEntry {
    /// Entry for an SR Legacy search hit; other data sets yield nothing
    pub fn from_search_result(food: &SearchResultFood) -> Option<Self> {
        if food.data_type() != Some(FoodDataType::Legacy) {
            return None;
        }
        Some(Self {
            fdc_id: food.fdc_id(),
            common_names: food.common_names().map(str::to_string),
            description: food.description().map(parse_description),
        })
    }

    /// Common name when present, else the description
    pub fn match_name(&self) -> Option<&str> {
        self.common_names.as_deref().or(self.description.as_deref())
    }
}

/// The entry whose name best matches a recipe ingredient line
pub fn match_ingredient<'a>(
    line: &str,
    entries: &'a [IngredientEntry],
) -> Option<&'a IngredientEntry> {
    let name = closest_match(line, entries.iter().filter_map(IngredientEntry::match_name))?;
    entries.iter().find(|entry| entry.match_name() == Some(name))
}

/// Drop the "Alcoholic beverage(s), " lead-in FDC puts on drink names
///
/// ```
/// use datatrans::fooddata::parse_description;
///
/// assert_eq!(parse_description("Alcoholic beverage, wine, table, red"), "wine, table, red");
/// assert_eq!(parse_description("Cheese, cheddar"), "Cheese, cheddar");
/// ```
pub fn parse_description(description: &str) -> String {
    ALCOHOLIC_PREFIXES
        .iter()
        .find_map(|prefix| description.split_once(prefix).map(|(_, rest)| rest))
        .unwrap_or(description)
        .to_string()
}
