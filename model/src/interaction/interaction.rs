use crate::interaction::ApplicationCommandInteractionData;
use crate::user::{Member, User};
use crate::Snowflake;
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt;

#[derive(Debug)]
pub enum Interaction {
    Ping(Box<PingInteraction>),
    ApplicationCommand(Box<ApplicationCommandInteraction>),
    MessageComponent(Box<MessageComponentInteraction>),
    ModalSubmit(Box<ModalSubmitInteraction>),
}

#[derive(Serialize_repr, Deserialize_repr, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum InteractionType {
    Ping = 1,
    ApplicationCommand = 2,
    MessageComponent = 3,
    ApplicationCommandAutoComplete = 4,
    ModalSubmit = 5,
}

impl TryFrom<u64> for InteractionType {
    type Error = Box<str>;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Ok(match value {
            1 => Self::Ping,
            2 => Self::ApplicationCommand,
            3 => Self::MessageComponent,
            4 => Self::ApplicationCommandAutoComplete,
            5 => Self::ModalSubmit,
            _ => return Err(format!("invalid interaction type \"{}\"", value).into_boxed_str()),
        })
    }
}

impl fmt::Display for InteractionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl Interaction {
    pub fn r#type(&self) -> InteractionType {
        match self {
            Interaction::Ping(_) => InteractionType::Ping,
            Interaction::ApplicationCommand(_) => InteractionType::ApplicationCommand,
            Interaction::MessageComponent(_) => InteractionType::MessageComponent,
            Interaction::ModalSubmit(_) => InteractionType::ModalSubmit,
        }
    }

    pub fn id(&self) -> Option<Snowflake> {
        match self {
            Interaction::Ping(data) => data.id,
            Interaction::ApplicationCommand(data) => Some(data.id),
            Interaction::MessageComponent(data) => Some(data.id),
            Interaction::ModalSubmit(data) => Some(data.id),
        }
    }

    /// The continuation token. Pings carry none, as they cannot be followed up.
    pub fn token(&self) -> Option<&str> {
        match self {
            Interaction::Ping(_) => None,
            Interaction::ApplicationCommand(data) => Some(&data.token),
            Interaction::MessageComponent(data) => Some(&data.token),
            Interaction::ModalSubmit(data) => Some(&data.token),
        }
    }
}

// ============================================================================
// Ping Interaction
// ============================================================================

#[derive(Deserialize, Debug)]
pub struct PingInteraction {
    pub id: Option<Snowflake>,
    pub application_id: Option<Snowflake>,
    pub r#type: InteractionType,
}

// ============================================================================
// Application Command Interaction
// ============================================================================

#[derive(Deserialize, Debug)]
pub struct ApplicationCommandInteraction {
    pub id: Snowflake,
    pub application_id: Snowflake,
    pub r#type: InteractionType,
    pub data: ApplicationCommandInteractionData,
    pub guild_id: Option<Snowflake>,
    pub channel_id: Option<Snowflake>,
    pub member: Option<Member>,
    pub user: Option<User>,
    pub token: Box<str>,
}

impl ApplicationCommandInteraction {
    /// The invoking user, whether the command was run in a guild or in DMs.
    pub fn invoker(&self) -> Option<&User> {
        self.member
            .as_ref()
            .and_then(|member| member.user.as_ref())
            .or(self.user.as_ref())
    }
}

// ============================================================================
// Message Component Interaction
// ============================================================================

#[derive(Deserialize, Debug)]
pub struct MessageComponentInteraction {
    pub id: Snowflake,
    pub application_id: Snowflake,
    pub r#type: InteractionType,
    pub data: MessageComponentInteractionData,
    pub guild_id: Option<Snowflake>,
    pub channel_id: Option<Snowflake>,
    pub member: Option<Member>,
    pub user: Option<User>,
    pub token: Box<str>,
}

#[derive(Deserialize, Debug)]
pub struct MessageComponentInteractionData {
    pub custom_id: Box<str>,
    pub component_type: u8,
}

// ============================================================================
// Modal Submit Interaction
// ============================================================================

#[derive(Deserialize, Debug)]
pub struct ModalSubmitInteraction {
    pub id: Snowflake,
    pub application_id: Snowflake,
    pub r#type: InteractionType,
    pub data: ModalInteractionData,
    pub guild_id: Option<Snowflake>,
    pub channel_id: Option<Snowflake>,
    pub member: Option<Member>,
    pub user: Option<User>,
    pub token: Box<str>,
}

#[derive(Deserialize, Debug)]
pub struct ModalInteractionData {
    pub custom_id: Box<str>,
    #[serde(default)]
    pub components: Vec<ModalInteractionActionRowData>,
}

#[derive(Deserialize, Debug)]
pub struct ModalInteractionActionRowData {
    pub r#type: u8,
    pub components: Vec<ModalInteractionComponentData>,
}

#[derive(Deserialize, Debug)]
pub struct ModalInteractionComponentData {
    pub r#type: u8,
    pub custom_id: Box<str>,
    pub value: Box<str>,
}

impl<'de> Deserialize<'de> for Interaction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;

        let interaction_type = match value.get("type") {
            None => return Err(D::Error::missing_field("type")),
            Some(t) => t
                .as_u64()
                .ok_or_else(|| Box::from("interaction type was not an integer"))
                .and_then(InteractionType::try_from)
                .map_err(D::Error::custom)?,
        };

        let interaction = match interaction_type {
            InteractionType::Ping => serde_json::from_value(value).map(Interaction::Ping),
            InteractionType::ApplicationCommand => {
                serde_json::from_value(value).map(Interaction::ApplicationCommand)
            }
            InteractionType::MessageComponent => {
                serde_json::from_value(value).map(Interaction::MessageComponent)
            }
            InteractionType::ModalSubmit => {
                serde_json::from_value(value).map(Interaction::ModalSubmit)
            }
            InteractionType::ApplicationCommandAutoComplete => {
                return Err(D::Error::custom(format!(
                    "unsupported interaction type \"{}\"",
                    interaction_type
                )))
            }
        }
        .map_err(D::Error::custom)?;

        Ok(interaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::OptionValue;

    #[test]
    fn test_decode_minimal_ping() {
        let interaction: Interaction = serde_json::from_str(r#"{"type":1}"#).unwrap();

        assert_eq!(interaction.r#type(), InteractionType::Ping);
        assert!(interaction.token().is_none());
    }

    #[test]
    fn test_decode_missing_type() {
        let err = serde_json::from_str::<Interaction>(r#"{"id":"1"}"#).unwrap_err();
        assert!(err.to_string().contains("missing field `type`"));
    }

    #[test]
    fn test_decode_unsupported_type() {
        assert!(serde_json::from_str::<Interaction>(r#"{"type":4}"#).is_err());
        assert!(serde_json::from_str::<Interaction>(r#"{"type":42}"#).is_err());
    }

    #[test]
    fn test_decode_application_command() {
        let json = r#"{
            "type": 2,
            "id": "1176261457580449812",
            "application_id": "508391840525975553",
            "token": "aW50ZXJhY3Rpb24",
            "guild_id": "508392876359680000",
            "channel_id": "508392876359680001",
            "member": {"user": {"id": "217617036749176833", "username": "randy"}, "roles": []},
            "locale": "en-GB",
            "version": 1,
            "data": {
                "id": "771825006014889984",
                "name": "weather",
                "type": 1,
                "options": [{"name": "city", "type": 3, "value": "Oslo"}]
            }
        }"#;

        let interaction: Interaction = serde_json::from_str(json).unwrap();
        let command = match interaction {
            Interaction::ApplicationCommand(command) => command,
            other => panic!("decoded as {:?}", other.r#type()),
        };

        assert_eq!(&*command.token, "aW50ZXJhY3Rpb24");
        assert_eq!(command.channel_id, Some(Snowflake(508392876359680001)));
        assert_eq!(command.invoker().map(|u| u.id), Some(Snowflake(217617036749176833)));
        assert_eq!(&*command.data.name, "weather");
        assert!(matches!(
            command.data.option("city"),
            Some(OptionValue::String(city)) if &**city == "Oslo"
        ));
    }

    #[test]
    fn test_decode_command_without_required_token() {
        let json = r#"{"type":2,"id":"1","application_id":"2","data":{"id":"3","name":"ping"}}"#;
        assert!(serde_json::from_str::<Interaction>(json).is_err());
    }

    #[test]
    fn test_decode_message_component() {
        let json = r#"{"type":3,"id":"1","application_id":"2","token":"t",
            "data":{"custom_id":"close","component_type":2},"message":{"id":"9"}}"#;

        let interaction: Interaction = serde_json::from_str(json).unwrap();
        assert_eq!(interaction.r#type(), InteractionType::MessageComponent);
        assert_eq!(interaction.token(), Some("t"));
    }
}
