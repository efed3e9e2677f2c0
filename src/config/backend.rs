//! Ad backend configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Ad backend endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the ad backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl BackendConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate backend configuration
    ///
    /// Plain HTTP is only accepted while test mode is on.
    pub fn validate(&self, test_mode: bool) -> Result<(), ValidationError> {
        let is_https = self.base_url.starts_with("https://");
        let is_http = self.base_url.starts_with("http://");

        if !is_https && !is_http {
            return Err(ValidationError::InvalidBackendUrl);
        }
        if is_http && !test_mode {
            return Err(ValidationError::BackendMustBeHttps);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.jackymedia.com".to_string()
}

fn default_timeout() -> u64 {
    15
}
