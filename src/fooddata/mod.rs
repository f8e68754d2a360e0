//! USDA FoodData Central models
//!
//! Typed records for the search and food detail endpoints, the standard
//! reference tables, and (with the `api-backend` feature) a blocking client.

#[cfg(feature = "api-backend")]
pub mod api;
pub mod detail;
pub mod error;
pub mod ingredients;
pub mod nutrient;
pub mod reference;
pub mod search;

#[cfg(feature = "api-backend")]
pub use api::{FoodDataClient, collect_legacy_ingredients};
pub use detail::{
    BrandedFood, Food, FoodAttribute, FoodAttributeType, FoodCategory, FoodClass, FoodDetail,
    FoodPortion, FoundationFood, MeasureUnit, SrLegacyFood, SurveyFnddsFood,
};
pub use error::{FoodDataError, FoodDataResult};
pub use ingredients::{IngredientEntry, match_ingredient, parse_description};
pub use nutrient::{
    FoodNutrient, FoodNutrientDerivation, FoodNutrientSource, Nutrient, NutrientConversionFactor,
    NutrientConversionFactorType,
};
pub use reference::{FoodAttributeTypeTable, FoodCategoryTable};
pub use search::{
    FoodDataType, FoodSearchCriteria, FoodSearchCriteriaBuilder, FoodSearchResponse,
    SearchResultFood, SortDirection, SortField,
};
