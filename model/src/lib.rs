mod snowflake;
pub use snowflake::{Snowflake, PLATFORM_EPOCH_MILLIS};

pub mod channel;
pub mod interaction;
pub mod user;

mod util;
