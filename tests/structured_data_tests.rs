//! Structured data and JSON-LD tests

use datatrans::schema::{ConstructionError, DataClass};
use datatrans::serialize::{JsonSerial, SerializeError, to_json_ld, with_context};
use datatrans::structured_data::{
    Duration, ItemList, ItemListOrderType, ListEntry, Person, Recipe, RecipeOptions,
    SCHEMA_ORG_CONTEXT, Url,
};
use serde_json::{Value, json};

fn minimal_recipe() -> Value {
    json!({
        "name": "Party Coffee Cake",
        "image": "https://example.com/photos/1x1/photo.jpg",
        "author": "Mary Stone",
        "recipeIngredient": ["2 cups of flour"],
        "recipeInstructions": ["Preheat the oven to 350 degrees F."]
    })
}

fn is_snake_case(key: &str) -> bool {
    key.contains('_')
}

mod recipe_tests {
    use super::*;

    #[test]
    fn test_minimal_recipe_serializes_whitelisted_properties() {
        let recipe = Recipe::build(minimal_recipe(), &RecipeOptions::new()).unwrap();
        let value = recipe.json_serial().unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object["@type"], "Recipe");
        assert!(!object.contains_key("@context"));
        let keys: Vec<&str> = object.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "@type",
                "name",
                "image",
                "author",
                "recipeIngredient",
                "recipeInstructions"
            ]
        );
        assert!(!keys.iter().any(|key| is_snake_case(key)));

        assert_eq!(object["image"], "https://example.com/photos/1x1/photo.jpg");
        assert_eq!(object["author"], json!({"@type": "Person", "name": "Mary Stone"}));
        assert_eq!(object["recipeIngredient"], "2 cups of flour");
    }

    #[test]
    fn test_several_values_stay_a_list() {
        let mut source = minimal_recipe();
        source["recipeIngredient"] = json!(["2 cups of flour", "3/4 cup white sugar"]);
        source["author"] = json!(["Mary Stone", {"name": "Bo Lee"}]);
        let recipe = Recipe::build(source, &RecipeOptions::new()).unwrap();
        let value = recipe.json_serial().unwrap();

        assert_eq!(value["recipeIngredient"], json!(["2 cups of flour", "3/4 cup white sugar"]));
        assert_eq!(value["author"][1]["name"], "Bo Lee");
        assert_eq!(recipe.authors().len(), 2);
    }

    #[test]
    fn test_context_is_top_level_only() {
        let recipe = Recipe::build(minimal_recipe(), &RecipeOptions::new())
            .unwrap()
            .with_context(SCHEMA_ORG_CONTEXT);
        let text = to_json_ld(&recipe).unwrap();
        assert!(text.starts_with(r#"{"@context":"https://schema.org/","@type":"Recipe""#));
        assert_eq!(text.matches("@context").count(), 1);
    }

    #[test]
    fn test_context_added_to_text() {
        let recipe = Recipe::build(minimal_recipe(), &RecipeOptions::new()).unwrap();
        let text = with_context(&to_json_ld(&recipe).unwrap(), SCHEMA_ORG_CONTEXT).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["@context"], SCHEMA_ORG_CONTEXT);
        assert!(matches!(
            with_context(&text, SCHEMA_ORG_CONTEXT),
            Err(SerializeError::ContextAlreadyPresent)
        ));
    }

    #[test]
    fn test_missing_name_fails_or_warns() {
        let mut source = minimal_recipe();
        source.as_object_mut().unwrap().remove("name");

        let err = Recipe::build(source.clone(), &RecipeOptions::new()).unwrap_err();
        assert!(matches!(
            err,
            ConstructionError::MissingRequiredField { ref field, .. } if field == "name"
        ));

        let recipe = Recipe::build(source, &RecipeOptions::new().suppress(true)).unwrap();
        assert_eq!(recipe.name(), None);
        assert_eq!(recipe.warnings(), vec!["required property 'name' unfilled".to_string()]);
        assert!(recipe.json_serial().unwrap().get("name").is_none());
    }

    #[test]
    fn test_bad_image_url_is_a_field_error() {
        let mut source = minimal_recipe();
        source["image"] = json!("not a url");
        let err = Recipe::build(source, &RecipeOptions::new().suppress(true)).unwrap_err();
        assert_eq!(err.field(), Some("image"));
    }

    #[test]
    fn test_lenient_keys_with_suppress() {
        let mut source = minimal_recipe();
        source["servings"] = json!(4);
        assert!(Recipe::build(source.clone(), &RecipeOptions::new()).is_err());

        let recipe = Recipe::build(source, &RecipeOptions::new().strict(false)).unwrap();
        assert_eq!(recipe.warnings().len(), 1);
    }

    #[test]
    fn test_times_serialize_as_iso_durations() {
        let mut source = minimal_recipe();
        source["prepTime"] = json!("PT20M");
        source["totalTime"] = json!("PT1H30M");
        let recipe = Recipe::build(source, &RecipeOptions::new()).unwrap();
        assert_eq!(recipe.total_time(), Some(Duration::from_minutes(90)));

        let value = recipe.json_serial().unwrap();
        assert_eq!(value["prepTime"], "PT20M");
        assert_eq!(value["totalTime"], "PT1H30M");
    }
}

mod duration_tests {
    use super::*;

    #[test]
    fn test_iso_round_trip() {
        for text in ["PT20M", "PT1H30M", "P1DT2H", "PT45S"] {
            assert_eq!(Duration::parse_iso(text).unwrap().iso_format(), text);
        }
        assert!(Duration::parse_iso("20 minutes").is_err());
    }
}

mod item_list_tests {
    use super::*;

    fn url(text: &str) -> ListEntry {
        ListEntry::from(Url::parse(text).unwrap())
    }

    #[test]
    fn test_summary_list_serializes_positions() {
        let list = ItemList::from_entries(
            vec![url("https://example.com/cake"), url("https://example.com/pie")],
            ItemListOrderType::Ascending,
        )
        .unwrap()
        .with_context(SCHEMA_ORG_CONTEXT);

        let value = list.json_serial().unwrap();
        assert_eq!(value["@type"], "ItemList");
        assert_eq!(value["numberOfItems"], 2);
        assert_eq!(value["itemListOrder"], "https://schema.org/ItemListOrderAscending");
        assert_eq!(
            value["itemListElement"][1],
            json!({"@type": "ListItem", "position": 2, "url": "https://example.com/pie"})
        );
    }

    #[test]
    fn test_items_must_share_a_type() {
        let mut list = ItemList::new(ItemListOrderType::Unordered);
        list.append(url("https://example.com/cake")).unwrap();
        let person = Person::named("Mary Stone").unwrap();
        assert!(list.append(person.into_record()).is_err());
        assert!(list.has_one_type_of_item());
        assert!(list.sort().is_err());
    }

    #[test]
    fn test_descending_sort() {
        let mut list = ItemList::from_entries(
            vec![url("https://example.com/a"), url("https://example.com/b")],
            ItemListOrderType::Descending,
        )
        .unwrap();
        list.sort().unwrap();
        let positions: Vec<usize> = list.elements().iter().map(|item| item.position).collect();
        assert_eq!(positions, vec![2, 1]);
    }
}
