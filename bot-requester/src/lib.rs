mod config;
pub use config::Config;

mod error;
pub use error::Error;

pub mod forward;
pub mod http;
pub mod ratelimit;
pub mod resolver;
pub mod routes;

#[cfg(test)]
pub(crate) mod test_util;
