mod message;
pub use message::{CreateMessage, FollowupMessage, MessageFlags};
