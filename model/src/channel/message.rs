use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct MessageFlags(pub u64);

impl MessageFlags {
    pub const EPHEMERAL: MessageFlags = MessageFlags(1 << 6);

    pub fn ephemeral(ephemeral: bool) -> MessageFlags {
        if ephemeral {
            MessageFlags::EPHEMERAL
        } else {
            MessageFlags::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn contains(&self, other: MessageFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

/// Body of `POST /channels/{channel_id}/messages`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateMessage {
    pub content: Box<str>,
}

/// Body of `POST /webhooks/{application_id}/{interaction_token}`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FollowupMessage {
    pub content: Box<str>,
    #[serde(default, skip_serializing_if = "MessageFlags::is_empty")]
    pub flags: MessageFlags,
}

impl FollowupMessage {
    pub fn new(content: impl Into<Box<str>>) -> FollowupMessage {
        FollowupMessage {
            content: content.into(),
            flags: MessageFlags::default(),
        }
    }

    pub fn ephemeral(mut self, ephemeral: bool) -> FollowupMessage {
        self.flags = MessageFlags::ephemeral(ephemeral);
        self
    }
}
