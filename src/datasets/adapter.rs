//! Per-dataset field mappings onto the Recipe wire mapping
//!
//! Adapters never fail. A missing or unreadable source field is left out
//! of the mapping and noted as a warning; whether the recipe is still usable
//! is up to [`Recipe::build`](crate::structured_data::Recipe::build).

use serde_json::{Map, Value};

use crate::structured_data::{Duration, parse_date_or_datetime};

/// A raw dataset line mapped onto camelCase Recipe keys
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Adapted {
    pub mapping: Map<String, Value>,
    pub warnings: Vec<String>,
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

struct Extractor<'a> {
    source: &'a Map<String, Value>,
    adapted: Adapted,
}

impl<'a> Extractor<'a> {
    fn new(source: &'a Map<String, Value>) -> Self {
        Self {
            source,
            adapted: Adapted::default(),
        }
    }

    fn warn(&mut self, message: String) {
        self.adapted.warnings.push(message);
    }

    fn set(&mut self, to: &str, value: Value) {
        self.adapted.mapping.insert(to.to_string(), value);
    }

    /// Non-null source value; a missing key is a warning
    fn raw(&mut self, key: &str) -> Option<&'a Value> {
        match self.source.get(key) {
            None => {
                self.warn(format!("missing key '{}'", key));
                None
            }
            Some(Value::Null) => None,
            Some(value) => Some(value),
        }
    }

    fn copy(&mut self, from: &str, to: &str) {
        if let Some(value) = self.raw(from) {
            self.set(to, value.clone());
        }
    }

    /// Copy only non-empty, non-zero values
    fn copy_filled(&mut self, from: &str, to: &str) {
        if let Some(value) = self.raw(from).filter(|value| is_truthy(value)) {
            self.set(to, value.clone());
        }
    }

    fn copy_date(&mut self, from: &str, to: &str) {
        let Some(value) = self.raw(from) else {
            return;
        };
        match value.as_str().map(parse_date_or_datetime) {
            Some(Ok(_)) => self.set(to, value.clone()),
            Some(Err(e)) => self.warn(format!("unreadable date in '{}': {}", from, e)),
            None => self.warn(format!("'{}' is not a date string", from)),
        }
    }

    /// A non-zero minute count as an ISO 8601 duration
    fn copy_minutes(&mut self, from: &str, to: &str) {
        let Some(value) = self.raw(from) else {
            return;
        };
        match value.as_u64().map(Duration::try_from_minutes) {
            Some(Ok(duration)) if duration.is_zero() => {}
            Some(Ok(duration)) => self.set(to, Value::String(duration.iso_format())),
            Some(Err(e)) => self.warn(format!("unreadable minute count in '{}': {}", from, e)),
            None => self.warn(format!("'{}' is not a minute count: {}", from, value)),
        }
    }

    /// Aggregate rating, only when its count is non-zero
    fn copy_rating(&mut self, value_key: &str, count_key: &str, count_wire: &str) {
        let Some(count) = self.raw(count_key).filter(|count| is_truthy(count)) else {
            return;
        };
        if let Some(rating) = self.raw(value_key) {
            let mut aggregate = Map::new();
            aggregate.insert("ratingValue".to_string(), rating.clone());
            aggregate.insert(count_wire.to_string(), count.clone());
            self.set("aggregateRating", Value::Object(aggregate));
        }
    }

    fn finish(self) -> Adapted {
        self.adapted
    }
}

pub fn adapt_allrecipes(source: &Map<String, Value>) -> Adapted {
    let mut x = Extractor::new(source);
    x.copy("author", "author");
    x.copy("description", "description");
    x.copy("ingredients", "recipeIngredient");
    x.copy("instructions", "recipeInstructions");
    x.copy("title", "name");
    x.copy_minutes("prep_time_minutes", "prepTime");
    x.copy_minutes("cook_time_minutes", "cookTime");
    x.copy_minutes("total_time_minutes", "totalTime");
    x.copy_rating("rating_stars", "review_count", "reviewCount");
    x.finish()
}

pub fn adapt_bbccouk(source: &Map<String, Value>) -> Adapted {
    let mut x = Extractor::new(source);
    x.copy("chef", "author");
    x.copy("ingredients", "recipeIngredient");
    x.copy("instructions", "recipeInstructions");
    x.copy("title", "name");
    x.copy_filled("description", "description");
    x.copy_minutes("preparation_time_minutes", "prepTime");
    x.copy_minutes("cooking_time_minutes", "cookTime");
    x.copy_minutes("total_time_minutes", "totalTime");
    if let Some(serves) = source.get("serves").filter(|serves| is_truthy(serves)) {
        x.set("recipeYield", serves.clone());
    }
    x.finish()
}

pub fn adapt_cookstr(source: &Map<String, Value>) -> Adapted {
    let mut x = Extractor::new(source);
    x.copy("cooking_method", "cookingMethod");
    x.copy_date("date_modified", "datePublished");
    x.copy("ingredients", "recipeIngredient");
    x.copy("instructions", "recipeInstructions");
    x.copy("title", "name");
    x.copy_filled("chef", "author");
    x.copy_filled("description", "description");
    x.copy_rating("rating_value", "rating_count", "ratingCount");
    x.finish()
}

pub fn adapt_epicurious(source: &Map<String, Value>) -> Adapted {
    let mut x = Extractor::new(source);
    x.copy_date("pubDate", "datePublished");
    x.copy("hed", "name");
    x.copy("prepSteps", "recipeInstructions");
    x.copy_rating("aggregateRating", "reviewsCount", "reviewCount");

    match x.raw("author") {
        Some(Value::Array(authors)) => {
            let names: Vec<Value> = authors
                .iter()
                .filter_map(|author| author.get("name").cloned())
                .collect();
            if !names.is_empty() {
                x.set("author", Value::Array(names));
            }
        }
        Some(other) => x.warn(format!("'author' is not a list: {}", other)),
        None => {}
    }

    let tag = source.get("tag").and_then(Value::as_object);
    let tagged = |category: &str| {
        tag.filter(|tag| tag.get("category").and_then(Value::as_str) == Some(category))
            .and_then(|tag| tag.get("name"))
            .cloned()
    };

    match source.get("ingredients") {
        Some(ingredients) if !ingredients.is_null() => {
            x.set("recipeIngredient", ingredients.clone())
        }
        _ => {
            x.warn("missing key 'ingredients'".to_string());
            if let Some(ingredient) = tagged("ingredient") {
                x.set("recipeIngredient", ingredient);
            }
        }
    }

    if tag.is_none() {
        x.warn("missing key 'tag'".to_string());
    } else if let Some(cuisine) = tagged("cuisine") {
        x.set("recipeCuisine", cuisine);
    }
    x.finish()
}
