use crate::interaction::Acknowledgement;
use model::interaction::{InteractionResponseType, InteractionType};
use serde::Serializer;
use std::fmt::Debug;
use std::time::Duration;
use warp::http::StatusCode;
use warp::reject::Reject;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("missing ed25519 signature header")]
    MissingSignature,

    #[error("missing signature timestamp header")]
    MissingTimestamp,

    #[error("invalid ed25519 signature length")]
    InvalidSignatureLength,

    #[error("invalid ed25519 signature: {0}")]
    InvalidSignatureFormat(#[source] hex::FromHexError),

    #[error("invalid ed25519 signature: {0}")]
    InvalidSignature(#[source] ed25519_dalek::SignatureError),

    #[error("invalid public key: {0}")]
    InvalidPublicKeyFormat(#[source] hex::FromHexError),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(#[source] ed25519_dalek::SignatureError),

    #[error("error while decoding json payload: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("error while encoding interaction response: {0}")]
    EncodeError(#[source] serde_json::Error),

    #[error("interaction was already acknowledged with {0:?}")]
    AlreadyAcknowledged(Acknowledgement),

    #[error("{response:?} is not a valid acknowledgement for a {interaction} interaction")]
    InvalidAcknowledgement {
        interaction: InteractionType,
        response: InteractionResponseType,
    },

    #[error("interaction was not acknowledged")]
    NotAcknowledged,

    #[error("acknowledgement deadline exceeded after {0:?}")]
    AcknowledgementDeadlineExceeded(Duration),

    #[error("follow-ups require a message acknowledgement first")]
    FollowupBeforeAcknowledgement,

    #[error("interaction token has expired")]
    InteractionTokenExpired,

    #[error("error while performing HTTP operation: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("requester returned {0}: {1}")]
    RequesterStatus(reqwest::StatusCode, String),

    #[error("error while loading config: {0}")]
    ConfigError(#[from] envy::Error),

    #[error("invalid server address: {0}")]
    InvalidServerAddr(#[from] std::net::AddrParseError),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingSignature
            | Error::MissingTimestamp
            | Error::InvalidSignatureLength
            | Error::InvalidSignatureFormat(..)
            | Error::InvalidSignature(..) => StatusCode::UNAUTHORIZED,
            Error::JsonError(..) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Reject for Error {}

impl serde::Serialize for Error {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{}", self)[..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::MissingSignature.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(Error::InvalidSignatureLength.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(Error::NotAcknowledged.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_rejection_carries_error() {
        let rejection = warp::reject::custom(Error::MissingTimestamp);
        assert!(matches!(rejection.find::<Error>(), Some(Error::MissingTimestamp)));

        fn verify() -> Result<(), warp::Rejection> {
            Err(Error::MissingSignature)?;
            Ok(())
        }

        let rejection = verify().unwrap_err();
        assert!(matches!(rejection.find::<Error>(), Some(Error::MissingSignature)));
    }
}
