//! schema.org VideoObject

use super::interaction::InteractionCounter;
use super::person::{Person, person};
use crate::data_class;
use crate::schema::{DataClass, FieldType, Record, Schema, nested};
use crate::structured_data::{Duration, Url};

data_class! {
    /// A video, e.g. one showing how to cook a recipe
    pub struct VideoObject => Schema::builder("VideoObject")
        .field("name", FieldType::Text)
        .field("description", FieldType::Text)
        .field("thumbnail_url", FieldType::property_of(FieldType::Url))
        .field("upload_date", FieldType::Date)
        .field("content_url", FieldType::Url)
        .field("duration", FieldType::Duration)
        .field("embed_url", FieldType::Url)
        .field("expires", FieldType::Date)
        .field("interaction_statistic", FieldType::Record(InteractionCounter::schema))
        .field_with("author", FieldType::Record(Person::schema), person, &[])
        .thing(&[
            "name",
            "description",
            "thumbnailUrl",
            "uploadDate",
            "contentUrl",
            "duration",
            "embedUrl",
            "expires",
            "interactionStatistic",
            "author",
        ])
        .validate(check_video)
        .build();
}

fn check_video(record: &Record) -> Result<(), String> {
    for required in ["name", "description", "thumbnail_url", "upload_date"] {
        if !record.is_set(required) {
            return Err(format!("required property '{}' unfilled", required));
        }
    }
    Ok(())
}

impl VideoObject {
    pub fn name(&self) -> Option<&str> {
        self.record().get_str("name")
    }

    pub fn content_url(&self) -> Option<&Url> {
        self.record().get_url("content_url")
    }

    pub fn duration(&self) -> Option<Duration> {
        self.record().get_duration("duration")
    }

    pub fn interaction_statistic(&self) -> Option<InteractionCounter> {
        nested(self.record(), "interaction_statistic")
    }
}
