//! Food Details endpoint models
//!
//! See <https://fdc.nal.usda.gov/api-guide.html#food-detail-endpoint> and the
//! FoodData Central data dictionary. Dates in detail responses are
//! `MM/DD/YYYY`.

use serde_json::{Map, Value};
use tracing::debug;

use super::error::{FoodDataError, FoodDataResult};
use super::nutrient::{FoodNutrient, NutrientConversionFactor};
use super::reference::FoodAttributeTypeTable;
use super::search::FoodDataType;
use crate::codec::json_kind;
use crate::data_class;
use crate::enums::WireEnum;
use crate::schema::init::delimited_date;
use crate::schema::{
    CoercionError, ConstructOptions, DataClass, FieldType, FieldValue, InitContext, Record,
    Schema, nested, nested_all,
};
use crate::wire_enum;

wire_enum! {
    /// Internal class tag of a detail response, used to pick its variant
    ///
    /// Foundation and SR Legacy foods share the `FinalFood` tag.
    pub enum FoodClass {
        FinalFood => "FinalFood",
        Survey => "Survey",
        Branded => "Branded",
    }
}

data_class! {
    /// Foods of defined similarity
    pub struct FoodCategory => Schema::builder("FoodCategory")
        .field("id", FieldType::Integer)
        .field("code", FieldType::Text)
        .field("description", FieldType::Text)
        .build(), identity = "id";
}

impl FoodCategory {
    pub fn code(&self) -> Option<&str> {
        self.record().get_str("code")
    }

    pub fn description(&self) -> Option<&str> {
        self.record().get_str("description")
    }
}

data_class! {
    /// A kind of attribute a food may carry
    pub struct FoodAttributeType => Schema::builder("FoodAttributeType")
        .field("id", FieldType::Integer)
        .field("name", FieldType::Text)
        .field("description", FieldType::Text)
        .build(), identity = "id";
}

impl FoodAttributeType {
    pub fn name(&self) -> Option<&str> {
        self.record().get_str("name")
    }
}

data_class! {
    /// The value of a generic property of a food
    pub struct FoodAttribute => Schema::builder("FoodAttribute")
        .field("id", FieldType::Integer)
        .field("fdc_id", FieldType::Integer)
        .field("sequence_number", FieldType::Integer)
        .field("food_attribute_type", FieldType::Record(FoodAttributeType::schema))
        .field("name", FieldType::Text)
        .field("value", FieldType::Text)
        .build(), identity = "id";
}

impl FoodAttribute {
    pub fn attribute_type(&self) -> Option<FoodAttributeType> {
        nested(self.record(), "food_attribute_type")
    }

    pub fn value(&self) -> Option<&str> {
        self.record().get_str("value")
    }
}

data_class! {
    pub struct MeasureUnit => Schema::builder("MeasureUnit")
        .field("id", FieldType::Integer)
        .field("name", FieldType::Text)
        .field("abbreviation", FieldType::Text)
        .build(), identity = "id";
}

data_class! {
    /// Discrete amount of food, e.g. one cup
    pub struct FoodPortion => Schema::builder("FoodPortion")
        .field("id", FieldType::Integer)
        .field("measure_unit", FieldType::Record(MeasureUnit::schema))
        .field("modifier", FieldType::Text)
        .field("gram_weight", FieldType::Float)
        .field("data_points", FieldType::Integer)
        .field("amount", FieldType::Float)
        .field("sequence_number", FieldType::Integer)
        .field("portion_description", FieldType::Text)
        .field("footnote", FieldType::Text)
        .field("min_year_acquired", FieldType::Integer)
        .build(), identity = "id";
}

impl FoodPortion {
    pub fn measure_unit(&self) -> Option<MeasureUnit> {
        nested(self.record(), "measure_unit")
    }

    pub fn gram_weight(&self) -> Option<f64> {
        self.record().get_f64("gram_weight")
    }
}

/// Reshape `{"calories": {"value": 130}}` into `[{"calories": 130}]`
fn label_nutrients(raw: Value, _ctx: &InitContext<'_>) -> Result<FieldValue, CoercionError> {
    let given = match raw {
        Value::Object(given) => given,
        other => return Err(CoercionError::mismatch("mapping", json_kind(&other))),
    };
    given
        .into_iter()
        .map(|(name, entry)| {
            let value = entry.get("value").cloned().ok_or_else(|| {
                CoercionError::Invalid(format!("label nutrient '{}' has no value", name))
            })?;
            let mut reshaped = Map::new();
            reshaped.insert(name, value);
            Ok(FieldValue::Map(reshaped))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(FieldValue::List)
}

fn food_nutrients() -> FieldType {
    FieldType::list_of(FieldType::Record(FoodNutrient::schema))
}

fn food_attributes() -> FieldType {
    FieldType::list_of(FieldType::Record(FoodAttribute::schema))
}

fn food_portions() -> FieldType {
    FieldType::list_of(FieldType::Record(FoodPortion::schema))
}

fn describe(record: &Record, field: &str) -> String {
    record
        .get(field)
        .map(|value| value.to_wire().to_string())
        .unwrap_or_else(|| "unset".to_string())
}

fn require_class(record: &Record, class: FoodClass) -> Result<(), String> {
    if record.get_enum::<FoodClass>("food_class") == Some(class) {
        Ok(())
    } else {
        Err(format!(
            "invalid value for 'food_class': {}",
            describe(record, "food_class")
        ))
    }
}

data_class! {
    /// Foods whose nutrient values come from label data supplied by brand owners
    pub struct BrandedFood => Schema::builder("BrandedFood")
        .field("fdc_id", FieldType::Integer)
        .field("brand_owner", FieldType::Text)
        .field("gtin_upc", FieldType::Text)
        .field("ingredients", FieldType::Text)
        .field("serving_size", FieldType::Float)
        .field("serving_size_unit", FieldType::Text)
        .field("household_serving_full_text", FieldType::Text)
        .field("branded_food_category", FieldType::Text)
        .field("data_source", FieldType::Text)
        .field_with("modified_date", FieldType::Date, delimited_date, &[])
        .field_with("available_date", FieldType::Date, delimited_date, &[])
        .field("food_class", FieldType::Enum(FoodClass::DESCRIPTOR))
        .field("description", FieldType::Text)
        .field("food_nutrients", food_nutrients())
        .field("food_components", FieldType::list_of(FieldType::Json))
        .field("food_attributes", food_attributes())
        .field("table_alias_name", FieldType::Text)
        .field_with("label_nutrients", FieldType::list_of(FieldType::Map), label_nutrients, &[])
        .field("data_type", FieldType::Enum(FoodDataType::DESCRIPTOR))
        .field_with("publication_date", FieldType::Date, delimited_date, &[])
        .field("food_portions", food_portions())
        .field("changes", FieldType::Text)
        .validate(|record| require_class(record, FoodClass::Branded))
        .build();
}

impl BrandedFood {
    pub fn brand_owner(&self) -> Option<&str> {
        self.record().get_str("brand_owner")
    }

    /// Label nutrients as `{name: value}` maps
    pub fn label_nutrients(&self) -> Vec<&Map<String, Value>> {
        self.record()
            .get_list("label_nutrients")
            .unwrap_or_default()
            .iter()
            .filter_map(|value| match value {
                FieldValue::Map(map) => Some(map),
                _ => None,
            })
            .collect()
    }
}

data_class! {
    /// Foods whose values are derived mainly by chemical analysis, with
    /// extensive sample metadata
    pub struct FoundationFood => Schema::builder("FoundationFood")
        .field("fdc_id", FieldType::Integer)
        .field("ndb_number", FieldType::Text)
        .field("footnote", FieldType::Text)
        .field("food_class", FieldType::Enum(FoodClass::DESCRIPTOR))
        .field("description", FieldType::Text)
        .field("food_nutrients", food_nutrients())
        .field("food_components", FieldType::list_of(FieldType::Json))
        .field("scientific_name", FieldType::Text)
        .field("food_attributes", food_attributes())
        .field("table_alias_name", FieldType::Text)
        .field("nutrient_conversion_factors", FieldType::list_of(FieldType::Record(NutrientConversionFactor::schema)))
        .field("is_historical_reference", FieldType::Boolean)
        .field("data_type", FieldType::Enum(FoodDataType::DESCRIPTOR))
        .field("food_category", FieldType::Record(FoodCategory::schema))
        .field("food_portions", food_portions())
        .field("input_foods", FieldType::list_of(FieldType::Json))
        .field_with("publication_date", FieldType::Date, delimited_date, &[])
        .field("changes", FieldType::Text)
        .validate(|record| require_class(record, FoodClass::FinalFood))
        .build();
}

fn check_legacy(record: &Record) -> Result<(), String> {
    require_class(record, FoodClass::FinalFood)?;
    if record.get_enum::<FoodDataType>("data_type") != Some(FoodDataType::Legacy) {
        return Err(format!(
            "invalid value for 'data_type': {}",
            describe(record, "data_type")
        ));
    }
    if record.get_str("table_alias_name") != Some("sr_legacy_food") {
        return Err(format!(
            "invalid value for 'table_alias_name': {}",
            describe(record, "table_alias_name")
        ));
    }
    Ok(())
}

data_class! {
    /// Foods from the April 2018 release of the USDA National Nutrient
    /// Database for Standard Reference
    pub struct SrLegacyFood => Schema::builder("SrLegacyFood")
        .field("ndb_number", FieldType::Text)
        .field("fdc_id", FieldType::Integer)
        .field("food_class", FieldType::Enum(FoodClass::DESCRIPTOR))
        .field("description", FieldType::Text)
        .field("food_nutrients", food_nutrients())
        .field("food_components", FieldType::list_of(FieldType::Json))
        .field("scientific_name", FieldType::Text)
        .field("food_attributes", food_attributes())
        .field("table_alias_name", FieldType::Text)
        .field("nutrient_conversion_factors", FieldType::list_of(FieldType::Record(NutrientConversionFactor::schema)))
        .field("is_historical_reference", FieldType::Boolean)
        .field("data_type", FieldType::Enum(FoodDataType::DESCRIPTOR))
        .field("food_category", FieldType::Record(FoodCategory::schema))
        .field("food_portions", food_portions())
        .field("input_foods", FieldType::list_of(FieldType::Json))
        .field_with("publication_date", FieldType::Date, delimited_date, &[])
        .field("changes", FieldType::Text)
        .validate(check_legacy)
        .build();
}

impl SrLegacyFood {
    pub fn description(&self) -> Option<&str> {
        self.record().get_str("description")
    }

    pub fn food_attributes(&self) -> Vec<FoodAttribute> {
        nested_all(self.record(), "food_attributes")
    }

    pub fn food_category(&self) -> Option<FoodCategory> {
        nested(self.record(), "food_category")
    }

    /// Value of the first attribute typed as a common name
    pub fn common_name(&self, types: &FoodAttributeTypeTable) -> Option<String> {
        let common = types.common_name()?;
        self.food_attributes()
            .into_iter()
            .find(|attribute| attribute.attribute_type().as_ref() == Some(common))
            .and_then(|attribute| attribute.value().map(str::to_string))
    }
}

data_class! {
    /// Foods reported in the What We Eat In America dietary survey
    pub struct SurveyFnddsFood => Schema::builder("SurveyFnddsFood")
        .field("fdc_id", FieldType::Integer)
        .field("food_code", FieldType::Text)
        .field("wweia_category_code", FieldType::Text)
        .field_with("start_date", FieldType::Date, delimited_date, &[])
        .field_with("end_date", FieldType::Date, delimited_date, &[])
        .field("food_class", FieldType::Enum(FoodClass::DESCRIPTOR))
        .field("description", FieldType::Text)
        .field("food_nutrients", food_nutrients())
        .field("food_attributes", food_attributes())
        .field("food_portions", food_portions())
        .field("input_foods", FieldType::list_of(FieldType::Json))
        .field("table_alias_name", FieldType::Text)
        .field("data_type", FieldType::Enum(FoodDataType::DESCRIPTOR))
        .field_with("publication_date", FieldType::Date, delimited_date, &[])
        .field("changes", FieldType::Text)
        .validate(|record| require_class(record, FoodClass::Survey))
        .build();
}

data_class! {
    /// Any substance consumed by humans for nutrition, taste or aroma
    pub struct Food => Schema::builder("Food")
        .field("fdc_id", FieldType::Integer)
        .field("food_class", FieldType::Enum(FoodClass::DESCRIPTOR))
        .field("data_type", FieldType::Enum(FoodDataType::DESCRIPTOR))
        .field("description", FieldType::Text)
        .field("food_category_id", FieldType::Text)
        .field_with("publication_date", FieldType::Date, delimited_date, &[])
        .field("scientific_name", FieldType::Text)
        .field("food_key", FieldType::Text)
        .build();
}

/// A detail response, typed by its `foodClass`
#[derive(Debug, Clone, PartialEq)]
pub enum FoodDetail {
    Foundation(FoundationFood),
    Survey(SurveyFnddsFood),
    Branded(BrandedFood),
    Legacy(SrLegacyFood),
}

impl FoodDetail {
    /// Construct the variant named by the response's `foodClass`
    ///
    /// A `FinalFood` response is told apart by its own `dataType`. See
    /// [`FoodDetail::from_response_as`].
    pub fn from_response(response: Value, options: &ConstructOptions) -> FoodDataResult<Self> {
        let hint = response
            .get("dataType")
            .and_then(Value::as_str)
            .and_then(|wire| FoodDataType::parse(wire).ok());
        Self::from_response_as(response, hint, options)
    }

    /// Construct the variant named by `foodClass`, using `data_type` to
    /// separate SR Legacy from Foundation foods
    ///
    /// Without a usable hint a `FinalFood` response is tried as an
    /// [`SrLegacyFood`] first, then as a [`FoundationFood`].
    pub fn from_response_as(
        response: Value,
        data_type: Option<FoodDataType>,
        options: &ConstructOptions,
    ) -> FoodDataResult<Self> {
        let tag = match response.get("foodClass") {
            Some(Value::String(tag)) => tag.clone(),
            Some(other) => other.to_string(),
            None => "<missing>".to_string(),
        };
        let class =
            FoodClass::parse(&tag).map_err(|_| FoodDataError::UnrecognizedVariant(tag.clone()))?;
        debug!(food_class = %class, data_type = ?data_type, "Constructing food detail");

        let detail = match (class, data_type) {
            (FoodClass::FinalFood, Some(FoodDataType::Legacy)) => {
                FoodDetail::Legacy(SrLegacyFood::construct(response, options)?)
            }
            (FoodClass::FinalFood, Some(FoodDataType::Foundation)) => {
                FoodDetail::Foundation(FoundationFood::construct(response, options)?)
            }
            (FoodClass::FinalFood, _) => {
                match SrLegacyFood::construct(response.clone(), options) {
                    Ok(food) => FoodDetail::Legacy(food),
                    Err(err) => {
                        debug!(error = %err, "Not an SR Legacy food, trying Foundation");
                        FoodDetail::Foundation(FoundationFood::construct(response, options)?)
                    }
                }
            }
            (FoodClass::Survey, _) => {
                FoodDetail::Survey(SurveyFnddsFood::construct(response, options)?)
            }
            (FoodClass::Branded, _) => {
                FoodDetail::Branded(BrandedFood::construct(response, options)?)
            }
        };
        Ok(detail)
    }

    pub fn food_class(&self) -> FoodClass {
        match self {
            FoodDetail::Foundation(_) | FoodDetail::Legacy(_) => FoodClass::FinalFood,
            FoodDetail::Survey(_) => FoodClass::Survey,
            FoodDetail::Branded(_) => FoodClass::Branded,
        }
    }

    pub fn record(&self) -> &Record {
        match self {
            FoodDetail::Foundation(food) => food.record(),
            FoodDetail::Survey(food) => food.record(),
            FoodDetail::Branded(food) => food.record(),
            FoodDetail::Legacy(food) => food.record(),
        }
    }

    pub fn fdc_id(&self) -> Option<i64> {
        self.record().get_i64("fdc_id")
    }

    pub fn description(&self) -> Option<&str> {
        self.record().get_str("description")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ConstructionError;
    use chrono::NaiveDate;
    use serde_json::json;

    fn legacy_response() -> Value {
        json!({
            "ndbNumber": 14096,
            "fdcId": 174848,
            "foodClass": "FinalFood",
            "description": "Alcoholic beverage, wine, table, red",
            "tableAliasName": "sr_legacy_food",
            "dataType": "SR Legacy",
            "foodCategory": {"id": 14, "code": "1400", "description": "Beverages"},
            "publicationDate": "4/1/2019",
            "foodAttributes": [{
                "id": 1,
                "sequenceNumber": 1,
                "value": "red wine",
                "foodAttributeType": {"id": 1000, "name": "Common Name", "description": "Common names associated with a food."}
            }]
        })
    }

    #[test]
    fn test_final_food_with_legacy_data_type_is_legacy_food() {
        let detail = FoodDetail::from_response(legacy_response(), &ConstructOptions::strict()).unwrap();
        assert_eq!(detail.food_class(), FoodClass::FinalFood);
        assert_eq!(detail.fdc_id(), Some(174848));
        let FoodDetail::Legacy(food) = detail else {
            panic!("expected a legacy food");
        };
        assert_eq!(food.food_category().unwrap().code(), Some("1400"));
        assert_eq!(
            food.record().get_date("publication_date"),
            NaiveDate::from_ymd_opt(2019, 4, 1)
        );
        assert_eq!(food.record().get_str("ndb_number"), Some("14096"));
    }

    #[test]
    fn test_final_food_without_hint_tries_legacy_then_foundation() {
        let mut response = legacy_response();
        response.as_object_mut().unwrap().remove("dataType");
        let detail = FoodDetail::from_response_as(response.clone(), None, &ConstructOptions::strict())
            .unwrap();
        assert!(matches!(detail, FoodDetail::Foundation(_)));

        let detail = FoodDetail::from_response_as(
            legacy_response(),
            None,
            &ConstructOptions::strict(),
        )
        .unwrap();
        assert!(matches!(detail, FoodDetail::Legacy(_)));
    }

    #[test]
    fn test_explicit_hint_overrides_fallback() {
        let detail = FoodDetail::from_response_as(
            legacy_response(),
            Some(FoodDataType::Foundation),
            &ConstructOptions::strict(),
        )
        .unwrap();
        assert!(matches!(detail, FoodDetail::Foundation(_)));

        let mut response = legacy_response();
        response["tableAliasName"] = json!("foundation_food");
        let err = FoodDetail::from_response_as(
            response,
            Some(FoodDataType::Legacy),
            &ConstructOptions::strict(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            FoodDataError::Construction(ConstructionError::InvariantViolation { .. })
        ));
    }

    #[test]
    fn test_unknown_tag_is_unrecognized() {
        for tag in ["Experimental", "Legacy"] {
            let err = FoodDetail::from_response(json!({"foodClass": tag}), &ConstructOptions::strict())
                .unwrap_err();
            assert!(matches!(err, FoodDataError::UnrecognizedVariant(ref found) if found == tag));
        }
        assert!(matches!(
            FoodDetail::from_response(json!({}), &ConstructOptions::strict()),
            Err(FoodDataError::UnrecognizedVariant(_))
        ));
    }

    #[test]
    fn test_legacy_invariants() {
        let mut response = legacy_response();
        response["tableAliasName"] = json!("foundation_food");
        let err = SrLegacyFood::construct(response, &ConstructOptions::strict()).unwrap_err();
        assert!(matches!(err, ConstructionError::InvariantViolation { .. }));

        let mut response = legacy_response();
        response["dataType"] = json!("Foundation");
        assert!(SrLegacyFood::construct(response, &ConstructOptions::strict()).is_err());
    }

    #[test]
    fn test_common_name_from_reference_table() {
        let food = SrLegacyFood::construct(legacy_response(), &ConstructOptions::strict()).unwrap();
        assert_eq!(
            food.common_name(FoodAttributeTypeTable::standard()),
            Some("red wine".to_string())
        );
    }

    #[test]
    fn test_label_nutrients_are_reshaped() {
        let food = BrandedFood::construct(
            json!({
                "fdcId": 534358,
                "foodClass": "Branded",
                "dataType": "Branded",
                "brandOwner": "Kar Nut Products Company",
                "modifiedDate": "8/18/2018",
                "labelNutrients": {"fat": {"value": 12.0}, "calories": {"value": 160.0}}
            }),
            &ConstructOptions::strict(),
        )
        .unwrap();
        let nutrients = food.label_nutrients();
        assert_eq!(nutrients.len(), 2);
        assert_eq!(nutrients[0].get("fat"), Some(&json!(12.0)));
        assert_eq!(nutrients[1].get("calories"), Some(&json!(160.0)));
        assert_eq!(
            food.record().get_date("modified_date"),
            NaiveDate::from_ymd_opt(2018, 8, 18)
        );
    }
}
