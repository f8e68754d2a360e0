//! schema.org structured data
//!
//! Thing records carry an ordered whitelist of serializable properties and
//! serialize with `@type` set to their type name. See
//! <https://developers.google.com/search/docs/data-types/recipe>.

pub mod carousel;
pub mod data_type;
pub mod error;
pub mod interaction;
pub mod person;
pub mod quantity;
pub mod recipe;
pub mod review;
pub mod video;

/// JSON-LD context attached to top-level schema.org records
pub const SCHEMA_ORG_CONTEXT: &str = "https://schema.org/";

pub use carousel::{ItemList, ItemListOrderType, ListEntry, ListItem};
pub use data_type::{
    Url, format_datetime, parse_date_or_datetime, parse_iso_date, parse_iso_datetime,
};
pub use error::CarouselError;
pub use interaction::{Action, InteractionCounter};
pub use person::Person;
pub use quantity::{Duration, Energy, EnergyUnit, Mass, MassUnit};
pub use recipe::{NutritionInformation, Recipe, RecipeOptions};
pub use review::AggregateRating;
pub use video::VideoObject;
