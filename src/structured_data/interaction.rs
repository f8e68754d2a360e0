//! schema.org InteractionCounter and the actions it counts

use crate::enums::WireEnum;
use crate::schema::{DataClass, FieldType, Record, Schema};
use crate::{data_class, wire_enum};

wire_enum! {
    /// Kind of user interaction being counted
    pub enum Action {
        WatchAction => "https://schema.org/WatchAction",
    }
}

data_class! {
    /// How often users interacted with a creative work
    pub struct InteractionCounter => Schema::builder("InteractionCounter")
        .field("interaction_type", FieldType::Enum(Action::DESCRIPTOR))
        .field("user_interaction_count", FieldType::Integer)
        .field("interaction_service", FieldType::Url)
        .thing(&["interactionType", "userInteractionCount", "interactionService"])
        .validate(check_counter)
        .build();
}

fn check_counter(record: &Record) -> Result<(), String> {
    for required in ["interaction_type", "user_interaction_count"] {
        if !record.is_set(required) {
            return Err(format!("'{}' is required", required));
        }
    }
    Ok(())
}

impl InteractionCounter {
    pub fn interaction_type(&self) -> Option<Action> {
        self.record().get_enum("interaction_type")
    }

    pub fn user_interaction_count(&self) -> Option<i64> {
        self.record().get_i64("user_interaction_count")
    }
}
