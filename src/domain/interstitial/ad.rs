//! Fetched ads and the cache entries that wrap them.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::Orientation;
use crate::domain::foundation::Timestamp;

/// Where a tap on the ad leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AdTarget {
    /// An app store product, with a web URL for when the in-app store page
    /// cannot be shown.
    AppStore {
        product_id: String,
        fallback_url: String,
    },
    /// A plain web destination.
    Url { url: String },
}

/// Ad content as delivered by the backend.
///
/// The lifecycle core treats the payload as opaque; only the renderer looks
/// at the creative and only tap routing looks at the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdPayload {
    pub ad_id: String,
    pub creative_url: String,
    pub target: AdTarget,
    /// Backend-provided lifetime in seconds; overrides the configured ttl.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
}

impl AdPayload {
    /// Creates a payload linking to a web URL.
    pub fn new(
        ad_id: impl Into<String>,
        creative_url: impl Into<String>,
        target: AdTarget,
    ) -> Self {
        Self {
            ad_id: ad_id.into(),
            creative_url: creative_url.into(),
            target,
            expires_in: None,
        }
    }

    /// Sets the backend-provided lifetime.
    pub fn with_expires_in(mut self, secs: u64) -> Self {
        self.expires_in = Some(secs);
        self
    }

    /// Returns the backend-provided lifetime, if any.
    pub fn ttl(&self) -> Option<Duration> {
        self.expires_in.map(Duration::from_secs)
    }
}

/// Why the cache could not hand out an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheMiss {
    /// Nothing has been loaded (or the last entry was already consumed).
    Empty,
    /// The entry outlived its ttl.
    Expired,
    /// The entry was fetched for another orientation.
    WrongOrientation,
}

/// One fetched ad waiting to be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdEntry {
    payload: AdPayload,
    orientation: Orientation,
    fetched_at: Timestamp,
    ttl: Duration,
}

impl AdEntry {
    /// Creates an entry; the payload's own lifetime wins over `default_ttl`.
    pub fn new(
        payload: AdPayload,
        orientation: Orientation,
        fetched_at: Timestamp,
        default_ttl: Duration,
    ) -> Self {
        let ttl = payload.ttl().unwrap_or(default_ttl);
        Self {
            payload,
            orientation,
            fetched_at,
            ttl,
        }
    }

    pub fn payload(&self) -> &AdPayload {
        &self.payload
    }

    pub fn into_payload(self) -> AdPayload {
        self.payload
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn fetched_at(&self) -> Timestamp {
        self.fetched_at
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns true once the entry's age reaches its ttl.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now.elapsed_since(&self.fetched_at) >= self.ttl
    }

    /// Checks freshness: within ttl and fetched for `current`.
    ///
    /// Expiry is reported before an orientation mismatch.
    pub fn check_fresh(&self, now: Timestamp, current: Orientation) -> Result<(), CacheMiss> {
        if self.is_expired_at(now) {
            return Err(CacheMiss::Expired);
        }
        if self.orientation != current {
            return Err(CacheMiss::WrongOrientation);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> AdPayload {
        AdPayload::new(
            "ad-1",
            "https://cdn.example.com/ad-1.html",
            AdTarget::Url {
                url: "https://example.com".to_string(),
            },
        )
    }

    fn entry_at(secs: u64) -> AdEntry {
        AdEntry::new(
            payload(),
            Orientation::Portrait,
            Timestamp::from_unix_secs(secs),
            Duration::from_secs(300),
        )
    }

    #[test]
    fn entry_is_fresh_within_ttl_and_same_orientation() {
        let entry = entry_at(1_000);
        let now = Timestamp::from_unix_secs(1_299);
        assert_eq!(entry.check_fresh(now, Orientation::Portrait), Ok(()));
    }

    #[test]
    fn entry_expires_exactly_at_ttl() {
        let entry = entry_at(1_000);
        assert!(!entry.is_expired_at(Timestamp::from_unix_secs(1_299)));
        assert!(entry.is_expired_at(Timestamp::from_unix_secs(1_300)));
    }

    #[test]
    fn orientation_mismatch_is_reported() {
        let entry = entry_at(1_000);
        let now = Timestamp::from_unix_secs(1_010);
        assert_eq!(
            entry.check_fresh(now, Orientation::LandscapeLeft),
            Err(CacheMiss::WrongOrientation)
        );
    }

    #[test]
    fn expiry_wins_over_orientation_mismatch() {
        let entry = entry_at(1_000);
        let now = Timestamp::from_unix_secs(2_000);
        assert_eq!(
            entry.check_fresh(now, Orientation::LandscapeLeft),
            Err(CacheMiss::Expired)
        );
    }

    #[test]
    fn payload_lifetime_overrides_default_ttl() {
        let entry = AdEntry::new(
            payload().with_expires_in(30),
            Orientation::Portrait,
            Timestamp::from_unix_secs(0),
            Duration::from_secs(300),
        );
        assert_eq!(entry.ttl(), Duration::from_secs(30));
    }

    #[test]
    fn payload_deserializes_from_backend_json() {
        let json = r#"{
            "ad_id": "ad-42",
            "creative_url": "https://cdn.example.com/42.html",
            "target": {"type": "app_store", "product_id": "123456", "fallback_url": "https://apps.example.com/123456"},
            "expires_in": 120
        }"#;

        let payload: AdPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.ad_id, "ad-42");
        assert_eq!(payload.ttl(), Some(Duration::from_secs(120)));
        assert!(matches!(
            payload.target,
            AdTarget::AppStore { ref product_id, .. } if product_id == "123456"
        ));
    }
}
