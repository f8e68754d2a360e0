//! schema.org Recipe and NutritionInformation
//!
//! Follows the subset of Recipe that Google's recipe rich results read.
//! `name` and `image` are required; a caller may opt into `suppress` mode to
//! keep records that lack them, with a warning instead of an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::person::{Person, people};
use super::review::AggregateRating;
use super::video::VideoObject;
use crate::data_class;
use crate::schema::init::{clean_text, date_or_datetime};
use crate::schema::{
    ConstructOptions, ConstructionError, ConstructionResult, DataClass, FieldType, FieldValue,
    Record, Schema, nested, nested_all,
};
use crate::structured_data::{Duration, Energy};

data_class! {
    /// Nutrition facts per serving
    pub struct NutritionInformation => Schema::builder("NutritionInformation")
        .field("calories", FieldType::Energy)
        .field("serving_size", FieldType::Mass)
        .field("carbohydrate_content", FieldType::Mass)
        .field("cholesterol_content", FieldType::Mass)
        .field("fat_content", FieldType::Mass)
        .field("fiber_content", FieldType::Mass)
        .field("protein_content", FieldType::Mass)
        .field("saturated_fat_content", FieldType::Mass)
        .field("sodium_content", FieldType::Mass)
        .field("sugar_content", FieldType::Mass)
        .field("trans_fat_content", FieldType::Mass)
        .field("unsaturated_fat_content", FieldType::Mass)
        .thing(&[
            "calories",
            "servingSize",
            "carbohydrateContent",
            "cholesterolContent",
            "fatContent",
            "fiberContent",
            "proteinContent",
            "saturatedFatContent",
            "sodiumContent",
            "sugarContent",
            "transFatContent",
            "unsaturatedFatContent",
        ])
        .validate(|record| {
            if record.is_set("calories") {
                Ok(())
            } else {
                Err("required property 'calories' unfilled".to_string())
            }
        })
        .build();
}

impl NutritionInformation {
    pub fn calories(&self) -> Option<Energy> {
        match self.record().get("calories") {
            Some(FieldValue::Energy(energy)) => Some(*energy),
            _ => None,
        }
    }
}

/// Fields a Recipe cannot go without, in the order they are checked
const REQUIRED_PROPERTIES: [&str; 2] = ["image", "name"];

/// Options for building a [`Recipe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeOptions {
    pub construct: ConstructOptions,
    /// Keep recipes missing a required property, with a warning
    pub suppress: bool,
}

impl RecipeOptions {
    /// Strict keys, required properties enforced
    pub fn new() -> Self {
        Self::default()
    }

    pub fn suppress(mut self, suppress: bool) -> Self {
        self.suppress = suppress;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.construct.strict = strict;
        self
    }
}

/// A recipe
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe(Record);

static RECIPE_SCHEMA: once_cell::sync::Lazy<Schema> = once_cell::sync::Lazy::new(|| {
    let schema = Schema::builder("Recipe")
        .field("name", FieldType::Text)
        .field("image", FieldType::property_of(FieldType::Url))
        .field_with("author", FieldType::property_of(FieldType::Record(Person::schema)), people, &[])
        .field_with("date_published", FieldType::DateTime, date_or_datetime, &[])
        .field_with("description", FieldType::Text, clean_text, &[])
        .field("prep_time", FieldType::Duration)
        .field("cook_time", FieldType::Duration)
        .field("total_time", FieldType::Duration)
        .field("keywords", FieldType::Text)
        .field("recipe_yield", FieldType::Text)
        .field("recipe_category", FieldType::Text)
        .field("recipe_cuisine", FieldType::Text)
        .field("nutrition", FieldType::Record(NutritionInformation::schema))
        .field("recipe_ingredient", FieldType::property_of(FieldType::Text))
        .field("recipe_instructions", FieldType::property_of(FieldType::Text))
        .field("aggregate_rating", FieldType::Record(AggregateRating::schema))
        .field("video", FieldType::Record(VideoObject::schema))
        .field("cooking_method", FieldType::Text)
        .thing(&[
            "name",
            "image",
            "author",
            "datePublished",
            "description",
            "prepTime",
            "cookTime",
            "totalTime",
            "keywords",
            "recipeYield",
            "recipeCategory",
            "recipeCuisine",
            "nutrition",
            "recipeIngredient",
            "recipeInstructions",
            "aggregateRating",
            "video",
            "cookingMethod",
        ])
        .build();
    match schema {
        Ok(schema) => schema,
        Err(e) => panic!("{}", e),
    }
});

impl DataClass for Recipe {
    fn schema() -> &'static Schema {
        &RECIPE_SCHEMA
    }

    fn wrap(record: Record) -> Self {
        Self(record)
    }

    fn record(&self) -> &Record {
        &self.0
    }

    fn into_record(self) -> Record {
        self.0
    }

    /// Enforces the required properties, never suppressing
    fn construct(source: Value, options: &ConstructOptions) -> ConstructionResult<Self> {
        Self::build(
            source,
            &RecipeOptions {
                construct: *options,
                suppress: false,
            },
        )
    }
}

fn is_filled(record: &Record, name: &str) -> bool {
    match record.get(name) {
        Some(FieldValue::Text(text)) => !text.trim().is_empty(),
        Some(FieldValue::Property(property)) => !property.is_empty(),
        Some(_) => true,
        None => false,
    }
}

impl Recipe {
    /// Build a recipe in one pass.
    ///
    /// A missing or empty `image` or `name` fails with
    /// [`ConstructionError::MissingRequiredField`], unless
    /// [`RecipeOptions::suppress`] is set, in which case the field is left
    /// unset and a warning is recorded.
    pub fn build(source: Value, options: &RecipeOptions) -> ConstructionResult<Self> {
        let schema = Self::schema();
        let mut record = schema.construct(source, &options.construct)?;

        for required in REQUIRED_PROPERTIES {
            if is_filled(&record, required) {
                continue;
            }
            if !options.suppress {
                return Err(ConstructionError::MissingRequiredField {
                    record: schema.name().to_string(),
                    field: required.to_string(),
                });
            }
            warn!(field = required, "Required Recipe property unfilled");
            record = record.without(required);
            record.push_warning(format!("required property '{}' unfilled", required));
        }

        Ok(Self(record))
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get_str("name")
    }

    pub fn images(&self) -> Vec<&str> {
        self.0
            .get_property("image")
            .map(|property| property.iter().filter_map(FieldValue::as_str).collect())
            .unwrap_or_default()
    }

    pub fn authors(&self) -> Vec<Person> {
        nested_all(&self.0, "author")
    }

    pub fn prep_time(&self) -> Option<Duration> {
        self.0.get_duration("prep_time")
    }

    pub fn cook_time(&self) -> Option<Duration> {
        self.0.get_duration("cook_time")
    }

    pub fn total_time(&self) -> Option<Duration> {
        self.0.get_duration("total_time")
    }

    pub fn ingredients(&self) -> Vec<&str> {
        self.0
            .get_property("recipe_ingredient")
            .map(|property| property.iter().filter_map(FieldValue::as_str).collect())
            .unwrap_or_default()
    }

    pub fn nutrition(&self) -> Option<NutritionInformation> {
        nested(&self.0, "nutrition")
    }

    pub fn aggregate_rating(&self) -> Option<AggregateRating> {
        nested(&self.0, "aggregate_rating")
    }

    pub fn video(&self) -> Option<VideoObject> {
        nested(&self.0, "video")
    }

    /// Attach a JSON-LD `@context`
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self(self.0.with_context(context))
    }
}
