//! Standard FoodData Central reference tables
//!
//! The tables are built once on first use and handed to whatever needs them,
//! e.g. [`SrLegacyFood::common_name`](super::detail::SrLegacyFood::common_name).

use once_cell::sync::Lazy;
use serde_json::json;

use super::detail::{FoodAttributeType, FoodCategory};
use crate::schema::{ConstructOptions, DataClass};

const CATEGORIES: [(i64, &str, &str); 28] = [
    (1, "0100", "Dairy and Egg Products"),
    (2, "0200", "Spices and Herbs"),
    (3, "0300", "Baby Foods"),
    (4, "0400", "Fats and Oils"),
    (5, "0500", "Poultry Products"),
    (6, "0600", "Soups, Sauces, and Gravies"),
    (7, "0700", "Sausages and Luncheon Meats"),
    (8, "0800", "Breakfast Cereals"),
    (9, "0900", "Fruits and Fruit Juices"),
    (10, "1000", "Pork Products"),
    (11, "1100", "Vegetables and Vegetable Products"),
    (12, "1200", "Nut and Seed Products"),
    (13, "1300", "Beef Products"),
    (14, "1400", "Beverages"),
    (15, "1500", "Finfish and Shellfish Products"),
    (16, "1600", "Legumes and Legume Products"),
    (17, "1700", "Lamb, Veal, and Game Products"),
    (18, "1800", "Baked Products"),
    (19, "1900", "Sweets"),
    (20, "2000", "Cereal Grains and Pasta"),
    (21, "2100", "Fast Foods"),
    (22, "2200", "Meals, Entrees, and Side Dishes"),
    (23, "2500", "Snacks"),
    (24, "3500", "American Indian/Alaska Native Foods"),
    (25, "3600", "Restaurant Foods"),
    (26, "4500", "Branded Food Products Database"),
    (27, "2600", "Quality Control Materials"),
    (28, "1410", "Alcoholic Beverages"),
];

const ATTRIBUTE_TYPES: [(i64, &str, &str); 4] = [
    (999, "Attribute", "Generic attributes"),
    (1000, "Common Name", "Common names associated with a food."),
    (1001, "Additional Description", "Additional descriptions for the food."),
    (
        1002,
        "Adjustments",
        "Adjustments made to foods, including moisture and fat changes.",
    ),
];

/// Attribute type id of common names
pub const COMMON_NAME_ID: i64 = 1000;

static STANDARD_CATEGORIES: Lazy<FoodCategoryTable> = Lazy::new(|| {
    let categories = CATEGORIES
        .iter()
        .map(|(id, code, description)| {
            FoodCategory::construct(
                json!({"id": id, "code": code, "description": description}),
                &ConstructOptions::strict(),
            )
        })
        .collect::<Result<Vec<_>, _>>();
    match categories {
        Ok(categories) => FoodCategoryTable::new(categories),
        Err(e) => panic!("{}", e),
    }
});

static STANDARD_ATTRIBUTE_TYPES: Lazy<FoodAttributeTypeTable> = Lazy::new(|| {
    let types = ATTRIBUTE_TYPES
        .iter()
        .map(|(id, name, description)| {
            FoodAttributeType::construct(
                json!({"id": id, "name": name, "description": description}),
                &ConstructOptions::strict(),
            )
        })
        .collect::<Result<Vec<_>, _>>();
    match types {
        Ok(types) => FoodAttributeTypeTable::new(types),
        Err(e) => panic!("{}", e),
    }
});

/// Food categories by id and code
#[derive(Debug, Clone)]
pub struct FoodCategoryTable {
    categories: Vec<FoodCategory>,
}

impl FoodCategoryTable {
    pub fn new(categories: Vec<FoodCategory>) -> Self {
        Self { categories }
    }

    /// The 28 categories FoodData Central ships with
    pub fn standard() -> &'static Self {
        &STANDARD_CATEGORIES
    }

    pub fn by_id(&self, id: i64) -> Option<&FoodCategory> {
        self.categories
            .iter()
            .find(|category| category.record().get_i64("id") == Some(id))
    }

    pub fn by_code(&self, code: &str) -> Option<&FoodCategory> {
        self.categories
            .iter()
            .find(|category| category.code() == Some(code))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FoodCategory> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Food attribute types by id
#[derive(Debug, Clone)]
pub struct FoodAttributeTypeTable {
    types: Vec<FoodAttributeType>,
}

impl FoodAttributeTypeTable {
    pub fn new(types: Vec<FoodAttributeType>) -> Self {
        Self { types }
    }

    pub fn standard() -> &'static Self {
        &STANDARD_ATTRIBUTE_TYPES
    }

    pub fn by_id(&self, id: i64) -> Option<&FoodAttributeType> {
        self.types
            .iter()
            .find(|attribute_type| attribute_type.record().get_i64("id") == Some(id))
    }

    pub fn common_name(&self) -> Option<&FoodAttributeType> {
        self.by_id(COMMON_NAME_ID)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FoodAttributeType> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_categories() {
        let table = FoodCategoryTable::standard();
        assert_eq!(table.len(), 28);
        assert_eq!(table.by_id(14).unwrap().description(), Some("Beverages"));
        assert_eq!(
            table.by_code("1410").unwrap().description(),
            Some("Alcoholic Beverages")
        );
        assert!(table.by_id(29).is_none());
    }

    #[test]
    fn test_standard_attribute_types() {
        let table = FoodAttributeTypeTable::standard();
        assert_eq!(table.len(), 4);
        assert_eq!(table.common_name().unwrap().name(), Some("Common Name"));
    }

    #[test]
    fn test_table_is_built_once() {
        assert!(std::ptr::eq(
            FoodCategoryTable::standard(),
            FoodCategoryTable::standard()
        ));
    }
}
