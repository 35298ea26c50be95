use crate::channel::MessageFlags;
use crate::interaction::InteractionApplicationCommandCallbackData;
use serde::Serialize;
use serde_repr::{Deserialize_repr, Serialize_repr};

/// A callback sent in the body of the webhook response. Each variant carries its own `type`
/// discriminant, and variants without data serialise to `{"type":N}` only.
#[derive(Serialize, Debug, Clone)]
#[serde(untagged)]
pub enum InteractionResponse {
    PongResponse(SimpleInteractionResponse),
    ChannelMessageWithSource(ApplicationCommandResponse),
    DeferredChannelMessageWithSource(DeferredApplicationCommandResponse),
    DeferredMessageUpdate(SimpleInteractionResponse),
}

#[derive(Serialize, Debug, Clone)]
pub struct SimpleInteractionResponse {
    r#type: InteractionResponseType,
}

#[derive(Serialize, Debug, Clone)]
pub struct ApplicationCommandResponse {
    r#type: InteractionResponseType,
    data: InteractionApplicationCommandCallbackData,
}

#[derive(Serialize, Debug, Clone)]
pub struct DeferredApplicationCommandResponse {
    r#type: InteractionResponseType,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<DeferredApplicationCommandResponseData>,
}

#[derive(Serialize, Debug, Clone)]
pub struct DeferredApplicationCommandResponseData {
    pub flags: MessageFlags,
}

#[derive(Serialize_repr, Deserialize_repr, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
#[non_exhaustive]
pub enum InteractionResponseType {
    Pong = 1,
    ChannelMessageWithSource = 4,
    DeferredChannelMessageWithSource = 5,
    DeferredMessageUpdate = 6,
}

impl InteractionResponse {
    pub fn new_pong() -> InteractionResponse {
        InteractionResponse::PongResponse(SimpleInteractionResponse {
            r#type: InteractionResponseType::Pong,
        })
    }

    pub fn new_channel_message_with_source(
        data: InteractionApplicationCommandCallbackData,
    ) -> InteractionResponse {
        InteractionResponse::ChannelMessageWithSource(ApplicationCommandResponse {
            r#type: InteractionResponseType::ChannelMessageWithSource,
            data,
        })
    }

    pub fn new_message(content: impl Into<Box<str>>, ephemeral: bool) -> InteractionResponse {
        Self::new_channel_message_with_source(InteractionApplicationCommandCallbackData::new(
            content, ephemeral,
        ))
    }

    pub fn new_deferred_message_with_source(ephemeral: bool) -> InteractionResponse {
        InteractionResponse::DeferredChannelMessageWithSource(DeferredApplicationCommandResponse {
            r#type: InteractionResponseType::DeferredChannelMessageWithSource,
            data: ephemeral.then(|| DeferredApplicationCommandResponseData {
                flags: MessageFlags::EPHEMERAL,
            }),
        })
    }

    pub fn new_deferred_message_update() -> InteractionResponse {
        InteractionResponse::DeferredMessageUpdate(SimpleInteractionResponse {
            r#type: InteractionResponseType::DeferredMessageUpdate,
        })
    }

    pub fn r#type(&self) -> InteractionResponseType {
        match self {
            InteractionResponse::PongResponse(res) | InteractionResponse::DeferredMessageUpdate(res) => {
                res.r#type
            }
            InteractionResponse::ChannelMessageWithSource(res) => res.r#type,
            InteractionResponse::DeferredChannelMessageWithSource(res) => res.r#type,
        }
    }

    pub fn is_ephemeral(&self) -> bool {
        match self {
            InteractionResponse::ChannelMessageWithSource(res) => {
                res.data.flags.contains(MessageFlags::EPHEMERAL)
            }
            InteractionResponse::DeferredChannelMessageWithSource(res) => res
                .data
                .as_ref()
                .map_or(false, |data| data.flags.contains(MessageFlags::EPHEMERAL)),
            _ => false,
        }
    }

    /// The message content of an immediate reply.
    pub fn content(&self) -> Option<&str> {
        match self {
            InteractionResponse::ChannelMessageWithSource(res) => Some(&res.data.content),
            _ => None,
        }
    }
}
