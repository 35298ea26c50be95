use crate::interaction::{ApplicationCommandInteractionDataOption, OptionValue};
use crate::Snowflake;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct ApplicationCommandInteractionData {
    pub id: Snowflake,
    pub name: Box<str>,
    #[serde(default)]
    pub options: Vec<ApplicationCommandInteractionDataOption>,
}

impl ApplicationCommandInteractionData {
    pub fn option(&self, name: &str) -> Option<&OptionValue> {
        self.options
            .iter()
            .find(|option| &*option.name == name)
            .map(|option| &option.value)
    }

    pub fn string_option(&self, name: &str) -> Option<&str> {
        match self.option(name)? {
            OptionValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn integer_option(&self, name: &str) -> Option<i64> {
        match self.option(name)? {
            OptionValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn boolean_option(&self, name: &str) -> Option<bool> {
        match self.option(name)? {
            OptionValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }
}
