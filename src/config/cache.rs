//! Preloaded ad cache configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Lifetime of preloaded ads
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Seconds a preloaded ad stays showable, unless the backend says otherwise
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ttl_secs == 0 || self.ttl_secs > 3600 {
            return Err(ValidationError::InvalidCacheTtl);
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl(),
        }
    }
}

fn default_ttl() -> u64 {
    300
}
