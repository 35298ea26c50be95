use crate::Error;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

#[derive(Deserialize)]
pub struct Config {
    #[serde(default = "default_server_addr")]
    pub server_addr: String,
    pub bot_token: String,
    #[serde(default = "default_upstream_url")]
    pub upstream_url: String,
    /// Leading path segment(s) that inbound requests are served under, e.g. `api`.
    #[serde(default = "default_base_path")]
    pub base_path: String,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_global_requests_per_second")]
    pub global_requests_per_second: u32,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Largest inbound request body accepted, in bytes.
    #[serde(default = "default_max_body_size")]
    pub max_body_size: u64,
}

impl Config {
    pub fn from_envvar() -> Result<Config, Error> {
        let mut config: Config = envy::from_env()?;
        config.bot_token = config.bot_token.trim().to_owned();

        if config.global_requests_per_second == 0 {
            return Err(Error::InvalidGlobalRatelimit);
        }

        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// `/api/` style prefix that inbound paths must start with.
    pub fn base_prefix(&self) -> String {
        let base = self.base_path.trim_matches('/');
        if base.is_empty() {
            "/".to_owned()
        } else {
            format!("/{}/", base)
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("server_addr", &self.server_addr)
            .field("upstream_url", &self.upstream_url)
            .field("base_path", &self.base_path)
            .field("max_retries", &self.max_retries)
            .field("global_requests_per_second", &self.global_requests_per_second)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_body_size", &self.max_body_size)
            .finish_non_exhaustive()
    }
}

fn default_server_addr() -> String {
    "0.0.0.0:8088".to_owned()
}

fn default_upstream_url() -> String {
    "https://discord.com/api/v10".to_owned()
}

fn default_base_path() -> String {
    "api".to_owned()
}

fn default_max_retries() -> u32 {
    3
}

fn default_global_requests_per_second() -> u32 {
    50
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_max_body_size() -> u64 {
    // attachment uploads are the largest bodies the upstream accepts
    25 * 1024 * 1024
}

#[cfg(test)]
pub(crate) fn test_config(upstream_url: &str) -> Config {
    Config {
        server_addr: "127.0.0.1:0".to_owned(),
        bot_token: "secret-token".to_owned(),
        upstream_url: upstream_url.to_owned(),
        base_path: default_base_path(),
        max_retries: default_max_retries(),
        global_requests_per_second: default_global_requests_per_second(),
        request_timeout_secs: 5,
        max_body_size: default_max_body_size(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_prefix() {
        let mut config = test_config("http://127.0.0.1:9");
        assert_eq!(config.base_prefix(), "/api/");

        config.base_path = "/proxy/v1/".to_owned();
        assert_eq!(config.base_prefix(), "/proxy/v1/");

        config.base_path = String::new();
        assert_eq!(config.base_prefix(), "/");
    }

    #[test]
    fn test_debug_redacts_token() {
        let output = format!("{:?}", test_config("http://127.0.0.1:9"));
        assert!(!output.contains("secret-token"));
        assert!(output.contains("upstream_url"));
    }
}
