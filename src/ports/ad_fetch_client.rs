//! AdFetchClient port - One request/response exchange with the ad backend.
//!
//! Implementations perform exactly one network call per `fetch` and never
//! retry internally; retrying is the host's decision. Cancellation works by
//! dropping the returned future, so implementations must not rely on running
//! to completion.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::interstitial::{AdPayload, AffiliateError, Credentials, Orientation};

/// Everything the backend needs to pick an ad.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub credentials: Credentials,
    pub orientation: Orientation,
    /// Only demo ads are served in test mode.
    pub test_mode: bool,
    pub advertising_id: Option<String>,
}

/// Classified failure of a fetch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Connection failure or other transport error.
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    /// Backend answered with a server error.
    #[error("backend error {status}: {message}")]
    Backend { status: u16, message: String },

    /// Backend answered with something we could not parse.
    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("backend rejected the API key")]
    InvalidApiKey,

    #[error("backend rejected the API secret")]
    InvalidApiSecret,

    #[error("no ad inventory available")]
    NoInventory,

    #[error("event not verified")]
    EventNotVerified,
}

impl FetchError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a backend error.
    pub fn backend(status: u16, message: impl Into<String>) -> Self {
        Self::Backend {
            status,
            message: message.into(),
        }
    }

    /// Creates a malformed-response error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }
}

impl From<FetchError> for AffiliateError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Network(_)
            | FetchError::Timeout
            | FetchError::Backend { .. }
            | FetchError::Malformed(_) => AffiliateError::NetworkOperationFailed,
            FetchError::InvalidApiKey => AffiliateError::InvalidApiKey,
            FetchError::InvalidApiSecret => AffiliateError::InvalidApiSecret,
            FetchError::NoInventory => AffiliateError::NoAdvertisementAvailable,
            FetchError::EventNotVerified => AffiliateError::EventNotVerified,
        }
    }
}

/// Port for fetching one interstitial ad.
///
/// # Example
///
/// ```ignore
/// let request = FetchRequest {
///     credentials,
///     orientation: Orientation::Portrait,
///     test_mode: true,
///     advertising_id: None,
/// };
/// let payload = client.fetch(request).await?;
/// ```
#[async_trait]
pub trait AdFetchClient: Send + Sync {
    /// Fetch an ad for the request's orientation.
    async fn fetch(&self, request: FetchRequest) -> Result<AdPayload, FetchError>;
}
