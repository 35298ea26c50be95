use crate::Snowflake;
use serde::Deserialize;
use serde_json::Value;
use serde_repr::{Deserialize_repr, Serialize_repr};

/// A single option passed to a command, decoded into its typed value at the wire boundary.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(try_from = "RawOption")]
pub struct ApplicationCommandInteractionDataOption {
    pub name: Box<str>,
    pub value: OptionValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    String(Box<str>),
    Integer(i64),
    Number(f64),
    Boolean(bool),
    Entity(EntityRef),
    SubCommand(Vec<ApplicationCommandInteractionDataOption>),
    SubCommandGroup(Vec<ApplicationCommandInteractionDataOption>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: Snowflake,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Channel,
    Role,
    Mentionable,
    Attachment,
}

#[derive(Serialize_repr, Deserialize_repr, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ApplicationCommandOptionType {
    SubCommand = 1,
    SubCommandGroup = 2,
    String = 3,
    Integer = 4,
    Boolean = 5,
    User = 6,
    Channel = 7,
    Role = 8,
    Mentionable = 9,
    Number = 10,
    Attachment = 11,
}

#[derive(Deserialize)]
struct RawOption {
    name: Box<str>,
    r#type: ApplicationCommandOptionType,
    value: Option<Value>,
    #[serde(default)]
    options: Vec<ApplicationCommandInteractionDataOption>,
}

impl TryFrom<RawOption> for ApplicationCommandInteractionDataOption {
    type Error = String;

    fn try_from(raw: RawOption) -> Result<Self, Self::Error> {
        use ApplicationCommandOptionType as Type;

        let name = raw.name;
        let mut raw_value = raw.value;
        let mismatch = |expected: &str| format!("option \"{}\" is not {}", name, expected);
        let mut take = || {
            raw_value
                .take()
                .ok_or_else(|| format!("option \"{}\" has no value", name))
        };

        let value = match raw.r#type {
            Type::SubCommand => OptionValue::SubCommand(raw.options),
            Type::SubCommandGroup => OptionValue::SubCommandGroup(raw.options),
            Type::String => OptionValue::String(
                take()?
                    .as_str()
                    .ok_or_else(|| mismatch("a string"))?
                    .into(),
            ),
            Type::Integer => OptionValue::Integer(take()?.as_i64().ok_or_else(|| mismatch("an integer"))?),
            Type::Number => OptionValue::Number(take()?.as_f64().ok_or_else(|| mismatch("a number"))?),
            Type::Boolean => OptionValue::Boolean(take()?.as_bool().ok_or_else(|| mismatch("a boolean"))?),
            Type::User => entity(EntityKind::User, take()?).ok_or_else(|| mismatch("a snowflake"))?,
            Type::Channel => entity(EntityKind::Channel, take()?).ok_or_else(|| mismatch("a snowflake"))?,
            Type::Role => entity(EntityKind::Role, take()?).ok_or_else(|| mismatch("a snowflake"))?,
            Type::Mentionable => entity(EntityKind::Mentionable, take()?).ok_or_else(|| mismatch("a snowflake"))?,
            Type::Attachment => entity(EntityKind::Attachment, take()?).ok_or_else(|| mismatch("a snowflake"))?,
        };

        Ok(ApplicationCommandInteractionDataOption { name, value })
    }
}

fn entity(kind: EntityKind, value: Value) -> Option<OptionValue> {
    let id = serde_json::from_value::<Snowflake>(value).ok()?;
    Some(OptionValue::Entity(EntityRef { kind, id }))
}
