//! Error kinds reported to the host application.
//!
//! Every failure of a load or show operation is classified into exactly one
//! [`AffiliateError`]. Each kind carries a stable numeric [`ErrorCode`] so
//! hosts can match on codes across SDK versions. Messages are English and
//! meant for developers, not end users.

use std::fmt;
use thiserror::Error;

/// Classified failure of a load or show operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum AffiliateError {
    /// Missing connectivity, timeout, or a failure in the ad backend.
    #[error("network operation failed")]
    NetworkOperationFailed,

    /// The operation was cancelled explicitly.
    #[error("operation cancelled")]
    OperationCancelled,

    #[error("no app credentials (API key and API secret) configured")]
    MissingAppCredentials,

    #[error("interstitials are not supported on this device")]
    UnsupportedDevice,

    #[error("advertising identifier not available")]
    MissingAdvertisingIdentifier,

    #[error("another interstitial is already being presented")]
    NoConcurrentInterstitials,

    #[error("no advertisement available")]
    NoAdvertisementAvailable,

    /// Nothing was preloaded, or the preloaded ad has expired.
    #[error("no preloaded advertisement; preload an interstitial before showing it")]
    NoAdvertisementPreloaded,

    /// The preloaded ad was fetched for a different orientation.
    #[error("preloaded advertisement has the wrong orientation; preload again")]
    WrongAdvertisementOrientation,

    #[error("invalid API key")]
    InvalidApiKey,

    #[error("invalid API secret")]
    InvalidApiSecret,

    /// Track the event once with test mode enabled to verify it.
    #[error("event has not been verified yet")]
    EventNotVerified,
}

impl AffiliateError {
    /// Returns the stable error code for this kind.
    pub fn code(&self) -> ErrorCode {
        match self {
            AffiliateError::NetworkOperationFailed => ErrorCode::NetworkOperationFailed,
            AffiliateError::OperationCancelled => ErrorCode::OperationCancelled,
            AffiliateError::MissingAppCredentials => ErrorCode::MissingAppCredentials,
            AffiliateError::UnsupportedDevice => ErrorCode::UnsupportedDevice,
            AffiliateError::MissingAdvertisingIdentifier => {
                ErrorCode::MissingAdvertisingIdentifier
            }
            AffiliateError::NoConcurrentInterstitials => ErrorCode::NoConcurrentInterstitials,
            AffiliateError::NoAdvertisementAvailable => ErrorCode::NoAdvertisementAvailable,
            AffiliateError::NoAdvertisementPreloaded => ErrorCode::NoAdvertisementPreloaded,
            AffiliateError::WrongAdvertisementOrientation => {
                ErrorCode::WrongAdvertisementOrientation
            }
            AffiliateError::InvalidApiKey => ErrorCode::InvalidApiKey,
            AffiliateError::InvalidApiSecret => ErrorCode::InvalidApiSecret,
            AffiliateError::EventNotVerified => ErrorCode::EventNotVerified,
        }
    }

    /// Returns true if the failure came from the backend rejecting the app's setup
    /// rather than from transient conditions.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            AffiliateError::MissingAppCredentials
                | AffiliateError::InvalidApiKey
                | AffiliateError::InvalidApiSecret
                | AffiliateError::EventNotVerified
        )
    }
}

/// Stable numeric error codes, grouped by hundreds:
/// 0xx transport, 1xx setup, 2xx availability, 3xx backend account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ErrorCode {
    NetworkOperationFailed = 0,
    OperationCancelled = 1,
    MissingAppCredentials = 100,
    UnsupportedDevice = 101,
    MissingAdvertisingIdentifier = 102,
    NoConcurrentInterstitials = 200,
    NoAdvertisementAvailable = 201,
    NoAdvertisementPreloaded = 202,
    WrongAdvertisementOrientation = 203,
    InvalidApiKey = 300,
    InvalidApiSecret = 301,
    EventNotVerified = 302,
}

impl ErrorCode {
    /// Returns the numeric value of the code.
    pub fn as_i32(&self) -> i32 {
        *self as i32
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::NetworkOperationFailed => "NETWORK_OPERATION_FAILED",
            ErrorCode::OperationCancelled => "OPERATION_CANCELLED",
            ErrorCode::MissingAppCredentials => "MISSING_APP_CREDENTIALS",
            ErrorCode::UnsupportedDevice => "UNSUPPORTED_DEVICE",
            ErrorCode::MissingAdvertisingIdentifier => "MISSING_ADVERTISING_IDENTIFIER",
            ErrorCode::NoConcurrentInterstitials => "NO_CONCURRENT_INTERSTITIALS",
            ErrorCode::NoAdvertisementAvailable => "NO_ADVERTISEMENT_AVAILABLE",
            ErrorCode::NoAdvertisementPreloaded => "NO_ADVERTISEMENT_PRELOADED",
            ErrorCode::WrongAdvertisementOrientation => "WRONG_ADVERTISEMENT_ORIENTATION",
            ErrorCode::InvalidApiKey => "INVALID_API_KEY",
            ErrorCode::InvalidApiSecret => "INVALID_API_SECRET",
            ErrorCode::EventNotVerified => "EVENT_NOT_VERIFIED",
        };
        write!(f, "{}", s)
    }
}
