use crate::channel::MessageFlags;
use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
pub struct InteractionApplicationCommandCallbackData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tts: Option<bool>,
    pub content: Box<str>,
    #[serde(skip_serializing_if = "MessageFlags::is_empty")]
    pub flags: MessageFlags,
}

impl InteractionApplicationCommandCallbackData {
    pub fn new(content: impl Into<Box<str>>, ephemeral: bool) -> Self {
        Self {
            tts: None,
            content: content.into(),
            flags: MessageFlags::ephemeral(ephemeral),
        }
    }
}
