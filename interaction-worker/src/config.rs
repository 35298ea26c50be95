use crate::Error;
use ed25519_dalek::PublicKey;
use serde::Deserialize;
use std::fmt;

#[derive(Deserialize)]
pub struct Config {
    #[serde(default = "default_server_addr")]
    pub server_addr: String,
    /// Hex encoded ed25519 key that the platform signs interactions with.
    pub public_key: String,
    #[serde(default = "default_requester_url")]
    pub requester_url: String,
    pub bot_token: String,
}

impl Config {
    pub fn from_envvar() -> Result<Config, Error> {
        let mut config: Config = envy::from_env()?;

        // Secrets pasted into env files on Windows often carry a trailing \r
        config.public_key = config.public_key.trim().to_owned();
        config.bot_token = config.bot_token.trim().to_owned();

        Ok(config)
    }

    pub fn read_public_key(&self) -> Result<PublicKey, Error> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(&self.public_key, &mut bytes).map_err(Error::InvalidPublicKeyFormat)?;

        PublicKey::from_bytes(&bytes).map_err(Error::InvalidPublicKey)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("server_addr", &self.server_addr)
            .field("requester_url", &self.requester_url)
            .finish_non_exhaustive()
    }
}

fn default_server_addr() -> String {
    "0.0.0.0:8080".to_owned()
}

fn default_requester_url() -> String {
    "http://localhost:8088".to_owned()
}
