//! Nutrient values attached to a food

use crate::data_class;
use crate::enums::WireEnum;
use crate::schema::{DataClass, FieldType, Schema, nested};
use crate::wire_enum;

data_class! {
    /// A chemical compound measured in foods
    pub struct Nutrient => Schema::builder("Nutrient")
        .field("id", FieldType::Integer)
        .field("number", FieldType::Text)
        .field("name", FieldType::Text)
        .field("rank", FieldType::Integer)
        .field("unit_name", FieldType::Text)
        .build(), identity = "id";
}

impl Nutrient {
    pub fn name(&self) -> Option<&str> {
        self.record().get_str("name")
    }

    pub fn unit_name(&self) -> Option<&str> {
        self.record().get_str("unit_name")
    }
}

data_class! {
    pub struct FoodNutrientSource => Schema::builder("FoodNutrientSource")
        .field("id", FieldType::Integer)
        .field("code", FieldType::Text)
        .field("description", FieldType::Text)
        .build(), identity = "id";
}

data_class! {
    /// How a nutrient value was obtained, e.g. `LCCD` for label data
    pub struct FoodNutrientDerivation => Schema::builder("FoodNutrientDerivation")
        .field("id", FieldType::Integer)
        .field("code", FieldType::Text)
        .field("description", FieldType::Text)
        .field("food_nutrient_source", FieldType::Record(FoodNutrientSource::schema))
        .build(), identity = "id";
}

data_class! {
    /// Amount of one nutrient per 100 g of food
    pub struct FoodNutrient => Schema::builder("FoodNutrient")
        .field("type", FieldType::Text)
        .field("id", FieldType::Integer)
        .field("nutrient", FieldType::Record(Nutrient::schema))
        .field("amount", FieldType::Float)
        .field("data_points", FieldType::Integer)
        .field("min", FieldType::Float)
        .field("max", FieldType::Float)
        .field("median", FieldType::Float)
        .field("footnote", FieldType::Text)
        .field("min_year_acquired", FieldType::Integer)
        .field("food_nutrient_derivation", FieldType::Record(FoodNutrientDerivation::schema))
        .build(), identity = "id";
}

impl FoodNutrient {
    pub fn nutrient(&self) -> Option<Nutrient> {
        nested(self.record(), "nutrient")
    }

    pub fn amount(&self) -> Option<f64> {
        self.record().get_f64("amount")
    }

    pub fn derivation(&self) -> Option<FoodNutrientDerivation> {
        nested(self.record(), "food_nutrient_derivation")
    }
}

wire_enum! {
    pub enum NutrientConversionFactorType {
        Protein => ".ProteinConversionFactor",
        Calorie => ".CalorieConversionFactor",
    }
}

data_class! {
    /// Factor for deriving protein or calories from other nutrients
    pub struct NutrientConversionFactor => Schema::builder("NutrientConversionFactor")
        .field("type", FieldType::Enum(NutrientConversionFactorType::DESCRIPTOR))
        .field("id", FieldType::Integer)
        .field("name", FieldType::Text)
        .field("value", FieldType::Float)
        .field("protein_value", FieldType::Float)
        .field("fat_value", FieldType::Float)
        .field("carbohydrate_value", FieldType::Float)
        .build(), identity = "id";
}

impl NutrientConversionFactor {
    pub fn factor_type(&self) -> Option<NutrientConversionFactorType> {
        self.record().get_enum("type")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ConstructOptions;
    use serde_json::json;

    #[test]
    fn test_food_nutrient_nests_nutrient_and_derivation() {
        let food_nutrient = FoodNutrient::construct(
            json!({
                "type": "FoodNutrient",
                "id": 1283674,
                "nutrient": {"id": 1003, "number": "203", "name": "Protein", "rank": 600, "unitName": "g"},
                "amount": 0.07,
                "dataPoints": 4,
                "foodNutrientDerivation": {
                    "id": 1,
                    "code": "A",
                    "description": "Analytical",
                    "foodNutrientSource": {"id": 1, "code": "1", "description": "Analytical or derived from analytical"}
                }
            }),
            &ConstructOptions::strict(),
        )
        .unwrap();
        assert_eq!(food_nutrient.nutrient().unwrap().name(), Some("Protein"));
        assert_eq!(food_nutrient.amount(), Some(0.07));
        assert_eq!(food_nutrient.derivation().unwrap().record().get_str("code"), Some("A"));
    }

    #[test]
    fn test_nutrients_compare_by_id() {
        let a = Nutrient::construct(json!({"id": 1003, "name": "Protein"}), &ConstructOptions::strict()).unwrap();
        let b = Nutrient::construct(json!({"id": 1003, "name": "protein"}), &ConstructOptions::strict()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_conversion_factor_type() {
        let factor = NutrientConversionFactor::construct(
            json!({"type": ".CalorieConversionFactor", "id": 1, "proteinValue": 4.27, "fatValue": 8.79, "carbohydrateValue": 3.87}),
            &ConstructOptions::strict(),
        )
        .unwrap();
        assert_eq!(factor.factor_type(), Some(NutrientConversionFactorType::Calorie));
        assert!(NutrientConversionFactor::construct(json!({"type": "Calorie"}), &ConstructOptions::strict()).is_err());
    }
}
