//! Food Search endpoint models
//!
//! See <https://fdc.nal.usda.gov/api-guide.html#food-search-endpoint>.

use serde_json::{Map, Value};

use super::error::{FoodDataError, FoodDataResult};
use crate::codec::json_kind;
use crate::data_class;
use crate::enums::WireEnum;
use crate::schema::init::delimited_date;
use crate::schema::{
    CoercionError, ConstructOptions, ConstructionResult, DataClass, FieldType, FieldValue,
    InitContext, Schema, nested, nested_all,
};
use crate::wire_enum;

wire_enum! {
    /// FoodData Central data set
    pub enum FoodDataType {
        Foundation => "Foundation",
        Survey => "Survey (FNDDS)",
        Branded => "Branded",
        Legacy => "SR Legacy",
    }
}

wire_enum! {
    pub enum SortField {
        Description => "lowercaseDescription.keyword",
        DataType => "dataType.keyword",
        PublishedDate => "publishedDate",
        FdcId => "fdcId",
    }
}

wire_enum! {
    pub enum SortDirection {
        Asc => "asc",
        Desc => "desc",
    }
}

/// Normalize `includedDataTypes` to all four data sets, absent ones `false`
fn included_data_types(raw: Value, _ctx: &InitContext<'_>) -> Result<FieldValue, CoercionError> {
    let given = match raw {
        Value::Object(given) => given,
        other => return Err(CoercionError::mismatch("mapping", json_kind(&other))),
    };
    for (key, included) in &given {
        FoodDataType::parse(key)?;
        if !included.is_boolean() {
            return Err(CoercionError::mismatch("boolean", json_kind(included)));
        }
    }
    let normalized = FoodDataType::ALL
        .iter()
        .map(|data_type| {
            let wire = data_type.as_wire();
            let included = given.get(wire).and_then(Value::as_bool).unwrap_or(false);
            (wire.to_string(), Value::Bool(included))
        })
        .collect();
    Ok(FieldValue::Map(normalized))
}

data_class! {
    /// Search criteria sent to, and echoed back by, the search endpoint
    pub struct FoodSearchCriteria => Schema::builder("FoodSearchCriteria")
        .field("general_search_input", FieldType::Text)
        .field_with("included_data_types", FieldType::Map, included_data_types, &[])
        .field("ingredients", FieldType::Text)
        .field("brand_owner", FieldType::Text)
        .field("require_all_words", FieldType::Boolean)
        .field("page_number", FieldType::Integer)
        .field("sort_field", FieldType::Enum(SortField::DESCRIPTOR))
        .field("sort_direction", FieldType::Enum(SortDirection::DESCRIPTOR))
        .build();
}

impl FoodSearchCriteria {
    pub fn builder() -> FoodSearchCriteriaBuilder {
        FoodSearchCriteriaBuilder::default()
    }

    pub fn general_search_input(&self) -> Option<&str> {
        self.record().get_str("general_search_input")
    }

    /// Data sets switched on, in declaration order
    pub fn included_data_types(&self) -> Vec<FoodDataType> {
        let Some(included) = self.record().get_map("included_data_types") else {
            return Vec::new();
        };
        FoodDataType::ALL
            .iter()
            .copied()
            .filter(|data_type| included.get(data_type.as_wire()) == Some(&Value::Bool(true)))
            .collect()
    }

    pub fn page_number(&self) -> Option<i64> {
        self.record().get_i64("page_number")
    }

    pub fn sort_field(&self) -> Option<SortField> {
        self.record().get_enum("sort_field")
    }

    pub fn sort_direction(&self) -> Option<SortDirection> {
        self.record().get_enum("sort_direction")
    }

    /// JSON body for the search endpoint; unset criteria are left out
    pub fn request_body(&self) -> FoodDataResult<Map<String, Value>> {
        let body = self.to_wire_mapping();
        if body.is_empty() {
            return Err(FoodDataError::EmptyCriteria);
        }
        Ok(body)
    }
}

/// Typed construction of [`FoodSearchCriteria`]
#[derive(Debug, Clone, Default)]
pub struct FoodSearchCriteriaBuilder {
    source: Map<String, Value>,
}

impl FoodSearchCriteriaBuilder {
    fn set(mut self, key: &str, value: Value) -> Self {
        self.source.insert(key.to_string(), value);
        self
    }

    pub fn general_search_input(self, query: impl Into<String>) -> Self {
        self.set("generalSearchInput", Value::String(query.into()))
    }

    /// Switch on one data set; the others stay off unless included too
    pub fn include(mut self, data_type: FoodDataType) -> Self {
        let types = self
            .source
            .entry("includedDataTypes")
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(types) = types {
            types.insert(data_type.as_wire().to_string(), Value::Bool(true));
        }
        self
    }

    pub fn ingredients(self, ingredients: impl Into<String>) -> Self {
        self.set("ingredients", Value::String(ingredients.into()))
    }

    pub fn brand_owner(self, brand_owner: impl Into<String>) -> Self {
        self.set("brandOwner", Value::String(brand_owner.into()))
    }

    pub fn require_all_words(self, require: bool) -> Self {
        self.set("requireAllWords", Value::Bool(require))
    }

    pub fn page_number(self, page: i64) -> Self {
        self.set("pageNumber", Value::from(page))
    }

    pub fn sort_field(self, field: SortField) -> Self {
        self.set("sortField", Value::String(field.as_wire().to_string()))
    }

    pub fn sort_direction(self, direction: SortDirection) -> Self {
        self.set("sortDirection", Value::String(direction.as_wire().to_string()))
    }

    pub fn build(self) -> ConstructionResult<FoodSearchCriteria> {
        FoodSearchCriteria::construct(Value::Object(self.source), &ConstructOptions::strict())
    }
}

data_class! {
    /// Abridged food returned in search results
    pub struct SearchResultFood => Schema::builder("SearchResultFood")
        .field("fdc_id", FieldType::Integer)
        .field("description", FieldType::Text)
        .field("data_type", FieldType::Enum(FoodDataType::DESCRIPTOR))
        .field_with("published_date", FieldType::Date, delimited_date, &[("sep", "-"), ("order", "YMD")])
        .field("all_highlight_fields", FieldType::Text)
        .field("score", FieldType::Float)
        .field("food_code", FieldType::Text)
        .field("gtin_upc", FieldType::Text)
        .field("brand_owner", FieldType::Text)
        .field("ingredients", FieldType::Text)
        .field("additional_descriptions", FieldType::Text)
        .field("common_names", FieldType::Text)
        .field("scientific_name", FieldType::Text)
        .field("ndb_number", FieldType::Text)
        .build();
}

impl SearchResultFood {
    pub fn fdc_id(&self) -> Option<i64> {
        self.record().get_i64("fdc_id")
    }

    pub fn description(&self) -> Option<&str> {
        self.record().get_str("description")
    }

    pub fn data_type(&self) -> Option<FoodDataType> {
        self.record().get_enum("data_type")
    }

    pub fn common_names(&self) -> Option<&str> {
        self.record().get_str("common_names")
    }
}

data_class! {
    /// One page of search results
    pub struct FoodSearchResponse => Schema::builder("FoodSearchResponse")
        .field("food_search_criteria", FieldType::Record(FoodSearchCriteria::schema))
        .field("total_hits", FieldType::Integer)
        .field("current_page", FieldType::Integer)
        .field("total_pages", FieldType::Integer)
        .field("foods", FieldType::list_of(FieldType::Record(SearchResultFood::schema)))
        .build();
}

impl FoodSearchResponse {
    pub fn criteria(&self) -> Option<FoodSearchCriteria> {
        nested(self.record(), "food_search_criteria")
    }

    pub fn total_hits(&self) -> Option<i64> {
        self.record().get_i64("total_hits")
    }

    pub fn current_page(&self) -> Option<i64> {
        self.record().get_i64("current_page")
    }

    pub fn total_pages(&self) -> Option<i64> {
        self.record().get_i64("total_pages")
    }

    pub fn foods(&self) -> Vec<SearchResultFood> {
        nested_all(self.record(), "foods")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ConstructionError;
    use serde_json::json;

    #[test]
    fn test_included_data_types_are_normalized() {
        let criteria = FoodSearchCriteria::construct(
            json!({"includedDataTypes": {"SR Legacy": true}}),
            &ConstructOptions::strict(),
        )
        .unwrap();
        assert_eq!(
            criteria.record().get_map("included_data_types").cloned(),
            json!({
                "Foundation": false,
                "Survey (FNDDS)": false,
                "Branded": false,
                "SR Legacy": true,
            })
            .as_object()
            .cloned()
        );
        assert_eq!(criteria.included_data_types(), vec![FoodDataType::Legacy]);
    }

    #[test]
    fn test_unknown_data_type_is_rejected() {
        let err = FoodSearchCriteria::construct(
            json!({"includedDataTypes": {"Legacy": true}}),
            &ConstructOptions::strict(),
        )
        .unwrap_err();
        assert!(matches!(err, ConstructionError::CoercionFailure { .. }));
        assert_eq!(err.field(), Some("included_data_types"));
    }

    #[test]
    fn test_request_body_omits_unset_criteria() {
        let criteria = FoodSearchCriteria::builder()
            .general_search_input("cheddar")
            .page_number(2)
            .sort_field(SortField::PublishedDate)
            .build()
            .unwrap();
        assert_eq!(
            Value::Object(criteria.request_body().unwrap()),
            json!({"generalSearchInput": "cheddar", "pageNumber": 2, "sortField": "publishedDate"})
        );
    }

    #[test]
    fn test_empty_criteria_has_no_body() {
        let criteria = FoodSearchCriteria::builder().build().unwrap();
        assert!(matches!(criteria.request_body(), Err(FoodDataError::EmptyCriteria)));
    }

    #[test]
    fn test_search_result_food() {
        let food = SearchResultFood::construct(
            json!({
                "fdcId": 171705,
                "description": "Alcoholic beverage, wine, table, red",
                "dataType": "SR Legacy",
                "publishedDate": "2019-04-01",
                "score": 312.5,
            }),
            &ConstructOptions::strict(),
        )
        .unwrap();
        assert_eq!(food.fdc_id(), Some(171705));
        assert_eq!(food.data_type(), Some(FoodDataType::Legacy));
        assert_eq!(
            food.record().get_date("published_date"),
            chrono::NaiveDate::from_ymd_opt(2019, 4, 1)
        );
    }
}
