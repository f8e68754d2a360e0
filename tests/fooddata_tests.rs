//! FoodData Central model tests

use datatrans::fooddata::{
    FoodClass, FoodDataError, FoodDataType, FoodDetail, FoodNutrient, FoodSearchCriteria,
    FoodSearchResponse, IngredientEntry, SortDirection, SortField,
};
use datatrans::schema::{ConstructOptions, ConstructionError, DataClass};
use serde_json::{Value, json};

fn detail(food_class: &str, data_type: &str, table_alias: &str) -> Value {
    json!({
        "fdcId": 747447,
        "foodClass": food_class,
        "dataType": data_type,
        "description": "Milk, whole fat",
        "tableAliasName": table_alias,
        "publicationDate": "12/16/2019",
        "foodNutrients": [
            {"type": "FoodNutrient", "id": 8232563, "amount": 3.27, "nutrient": {"id": 1003, "name": "Protein", "unitName": "g"}}
        ]
    })
}

mod dispatch_tests {
    use super::*;

    #[test]
    fn test_each_class_tag_picks_its_variant() {
        let cases = [
            (detail("FinalFood", "Foundation", "foundation_food"), false),
            (detail("FinalFood", "SR Legacy", "sr_legacy_food"), true),
        ];
        for (response, legacy) in cases {
            let food = FoodDetail::from_response(response, &ConstructOptions::strict()).unwrap();
            assert_eq!(food.food_class(), FoodClass::FinalFood);
            assert_eq!(matches!(food, FoodDetail::Legacy(_)), legacy);
            assert_eq!(food.fdc_id(), Some(747447));
        }

        let survey = FoodDetail::from_response(
            json!({"fdcId": 782127, "foodClass": "Survey", "foodCode": "11111000", "startDate": "1/1/2017", "endDate": "12/31/2018"}),
            &ConstructOptions::strict(),
        )
        .unwrap();
        assert!(matches!(survey, FoodDetail::Survey(_)));

        let branded = FoodDetail::from_response(
            json!({"fdcId": 534358, "foodClass": "Branded", "brandOwner": "Kar Nut Products Company"}),
            &ConstructOptions::strict(),
        )
        .unwrap();
        assert!(matches!(branded, FoodDetail::Branded(_)));
    }

    #[test]
    fn test_unrecognized_class_tag() {
        for tag in [json!("Legacy"), json!("finalfood"), json!("SR Legacy"), json!(42)] {
            let mut response = detail("FinalFood", "SR Legacy", "sr_legacy_food");
            response["foodClass"] = tag;
            assert!(matches!(
                FoodDetail::from_response(response, &ConstructOptions::strict()),
                Err(FoodDataError::UnrecognizedVariant(_))
            ));
        }
    }

    #[test]
    fn test_legacy_alias_must_match() {
        let response = detail("FinalFood", "SR Legacy", "foundation_food");
        let err = FoodDetail::from_response(response, &ConstructOptions::strict()).unwrap_err();
        assert!(matches!(
            err,
            FoodDataError::Construction(ConstructionError::InvariantViolation { .. })
        ));
    }

    #[test]
    fn test_live_legacy_response_is_not_filed_as_foundation() {
        let response = json!({
            "fdcId": 174848,
            "ndbNumber": 14096,
            "foodClass": "FinalFood",
            "dataType": "SR Legacy",
            "tableAliasName": "sr_legacy_food",
            "description": "Alcoholic beverage, wine, table, red",
            "publicationDate": "4/1/2019"
        });
        let food = FoodDetail::from_response(response, &ConstructOptions::strict()).unwrap();
        assert!(matches!(food, FoodDetail::Legacy(_)), "got {:?}", food);
        assert_eq!(food.description(), Some("Alcoholic beverage, wine, table, red"));
    }

    #[test]
    fn test_unknown_response_keys_follow_options() {
        let mut response = detail("FinalFood", "Foundation", "foundation_food");
        response["wweiaFoodCategory"] = json!({"wweiaFoodCategoryCode": 1002});
        assert!(FoodDetail::from_response(response.clone(), &ConstructOptions::strict()).is_err());

        let food = FoodDetail::from_response(response, &ConstructOptions::lenient()).unwrap();
        assert_eq!(food.record().warnings().len(), 1);
    }
}

mod search_tests {
    use super::*;

    #[test]
    fn test_builder_body_lists_every_data_type() {
        let criteria = FoodSearchCriteria::builder()
            .general_search_input("cheddar cheese")
            .include(FoodDataType::Branded)
            .require_all_words(true)
            .sort_field(SortField::Description)
            .sort_direction(SortDirection::Asc)
            .build()
            .unwrap();
        let body = criteria.request_body().unwrap();
        assert_eq!(
            body["includedDataTypes"],
            json!({"Foundation": false, "Survey (FNDDS)": false, "Branded": true, "SR Legacy": false})
        );
        assert_eq!(body["sortField"], "lowercaseDescription.keyword");
        assert_eq!(body["sortDirection"], "asc");
        assert_eq!(criteria.included_data_types(), vec![FoodDataType::Branded]);
    }

    #[test]
    fn test_response_and_ingredient_entries() {
        let response = FoodSearchResponse::construct(
            json!({
                "foodSearchCriteria": {"generalSearchInput": "wine", "pageNumber": 1, "includedDataTypes": {"SR Legacy": true}},
                "totalHits": 2,
                "currentPage": 1,
                "totalPages": 1,
                "foods": [
                    {"fdcId": 174848, "description": "Alcoholic beverage, wine, table, red", "dataType": "SR Legacy", "commonNames": "red wine"},
                    {"fdcId": 1104801, "description": "Wine, red", "dataType": "Survey (FNDDS)"}
                ]
            }),
            &ConstructOptions::strict(),
        )
        .unwrap();
        assert_eq!(response.total_hits(), Some(2));
        assert_eq!(response.criteria().unwrap().general_search_input(), Some("wine"));

        let entries: Vec<IngredientEntry> = response
            .foods()
            .iter()
            .filter_map(IngredientEntry::from_search_result)
            .collect();
        assert_eq!(
            entries,
            vec![IngredientEntry {
                fdc_id: Some(174848),
                common_names: Some("red wine".to_string()),
                description: Some("wine, table, red".to_string()),
            }]
        );
        assert_eq!(
            serde_json::to_value(&entries[0]).unwrap(),
            json!({"fdcId": 174848, "commonNames": "red wine", "description": "wine, table, red"})
        );
    }
}

mod identity_tests {
    use super::*;

    #[test]
    fn test_food_nutrients_compare_by_id() {
        let a = FoodNutrient::construct(json!({"id": 1, "amount": 3.27}), &ConstructOptions::strict())
            .unwrap();
        let b = FoodNutrient::construct(json!({"id": 1, "amount": 9.0}), &ConstructOptions::strict())
            .unwrap();
        let c = FoodNutrient::construct(json!({"id": 2, "amount": 3.27}), &ConstructOptions::strict())
            .unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
