//! Error types for `skillswap-core`.

use serde::Serialize;
use strum::Display;
use thiserror::Error;

use skillswap_types::models::UserId;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("a conversation needs two distinct participants")]
    InvalidParticipants,

    #[error("cannot request a swap with yourself")]
    SelfRequest,

    #[error("user {0} is not a participant of this conversation")]
    Unauthorized(UserId),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("a pending request for this skill already exists")]
    DuplicatePending,

    #[error("review already submitted for request {0}")]
    DuplicateReview(i64),

    #[error("swap request {0} is not completed")]
    NotCompleted(i64),

    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("storage error: {0}")]
    Storage(#[from] skillswap_db::Error),
}

/// Coarse classification handed to whatever layer renders errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    Unauthorized,
    Forbidden,
    Conflict,
    NotFound,
    Precondition,
    EncryptionFailure,
    Storage,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) | Self::InvalidParticipants | Self::SelfRequest => {
                ErrorKind::InvalidInput
            }
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::DuplicatePending | Self::DuplicateReview(_) => ErrorKind::Conflict,
            Self::NotCompleted(_) => ErrorKind::Precondition,
            Self::Encryption(_) => ErrorKind::EncryptionFailure,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }

    pub(crate) fn not_found(what: &str, id: i64) -> Self {
        Self::NotFound(format!("{} {}", what, id))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(Error::DuplicatePending.kind(), ErrorKind::Conflict);
        assert_eq!(Error::DuplicateReview(1).kind(), ErrorKind::Conflict);
        assert_eq!(Error::NotCompleted(1).kind(), ErrorKind::Precondition);
        assert_eq!(Error::SelfRequest.kind(), ErrorKind::InvalidInput);
        assert_eq!(
            Error::Storage(skillswap_db::Error::Corrupt("x".into())).kind(),
            ErrorKind::Storage
        );
        assert_eq!(ErrorKind::NotFound.to_string(), "not_found");
    }

    #[test]
    fn not_found_names_the_entity() {
        assert_eq!(Error::not_found("swap request", 9).to_string(), "swap request 9 not found");
    }
}
