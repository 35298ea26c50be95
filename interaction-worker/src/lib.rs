mod config;
pub use config::Config;

mod error;
pub use error::Error;

pub mod commands;
pub mod http;
pub mod interaction;
pub mod requester;
pub mod verify;

#[cfg(test)]
pub(crate) mod test_util;
