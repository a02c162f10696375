//! Error types for the Reddit identity broker

use crate::constants::{INVALID_REQUESTER_MESSAGE, UNEXPECTED_ERROR_MESSAGE};
use broker_common::ConfigurationError;
use reqwest::StatusCode;
use thiserror::Error;

/// Failure while fetching or decoding a document from a Reddit endpoint
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure: connect, TLS, timeout or body read
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },

    /// Body did not have the expected JSON shape
    #[error("Malformed response: {details}")]
    Malformed { details: String },
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Malformed {
            details: err.to_string(),
        }
    }
}

/// Outcome of a failed federated-identity extraction
///
/// `AccessDenied` is a policy decision and must stay distinguishable from the two fetch
/// failures, which are infrastructure faults.
#[derive(Debug, Error)]
pub enum BrokerError {
    /// Profile endpoint unreachable, non-2xx, or returned a malformed profile
    #[error("Could not obtain user profile from reddit: {0}")]
    ProfileFetchFailed(#[source] FetchError),

    /// Moderator listing unreachable, non-2xx, or malformed
    #[error("Could not obtain subreddits the current user is a moderator of from reddit: {0}")]
    GroupFetchFailed(#[source] FetchError),

    /// User moderates none of the allowed subreddits
    #[error("Access denied: user is not a moderator of any allowed subreddit")]
    AccessDenied,

    /// Settings could not be turned into a working provider
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigurationError),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, BrokerError>;

impl BrokerError {
    /// Get error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            BrokerError::ProfileFetchFailed(_) => "REDDIT_BROKER_PROFILE_FETCH_FAILED",
            BrokerError::GroupFetchFailed(_) => "REDDIT_BROKER_GROUP_FETCH_FAILED",
            BrokerError::AccessDenied => "REDDIT_BROKER_ACCESS_DENIED",
            BrokerError::Config(_) => "REDDIT_BROKER_CONFIG_ERROR",
        }
    }

    /// HTTP status the host should answer the end user with
    pub fn status_code(&self) -> StatusCode {
        match self {
            BrokerError::AccessDenied => StatusCode::FORBIDDEN,
            BrokerError::ProfileFetchFailed(_) | BrokerError::GroupFetchFailed(_) => {
                StatusCode::BAD_GATEWAY
            }
            BrokerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Localized message key for the host's error page
    pub fn message_key(&self) -> &'static str {
        match self {
            BrokerError::AccessDenied => INVALID_REQUESTER_MESSAGE,
            _ => UNEXPECTED_ERROR_MESSAGE,
        }
    }

    pub fn is_access_denied(&self) -> bool {
        matches!(self, BrokerError::AccessDenied)
    }
}
