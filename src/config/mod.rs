//! SDK configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `AFFILIATE_SDK` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use affiliate_sdk::config::SdkConfig;
//!
//! let config = SdkConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Ad backend at {}", config.backend.base_url);
//! ```

mod backend;
mod cache;
mod credentials;
mod error;
mod features;
mod logging;

pub use backend::BackendConfig;
pub use cache::CacheConfig;
pub use credentials::CredentialsConfig;
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use logging::LoggingConfig;

use serde::Deserialize;

/// Root SDK configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// (if credential-less) configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SdkConfig {
    /// App credentials from the affiliate dashboard
    #[serde(default)]
    pub credentials: CredentialsConfig,

    /// Ad backend endpoint and timeouts
    #[serde(default)]
    pub backend: BackendConfig,

    /// Preloaded ad cache
    #[serde(default)]
    pub cache: CacheConfig,

    /// Feature flags seeding the runtime flags
    #[serde(default)]
    pub features: FeatureFlags,

    /// Log output of the demo driver
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SdkConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `AFFILIATE_SDK` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `AFFILIATE_SDK__CREDENTIALS__API_KEY=...` -> `credentials.api_key = ...`
    /// - `AFFILIATE_SDK__CACHE__TTL_SECS=120` -> `cache.ttl_secs = 120`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("AFFILIATE_SDK")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.credentials.validate()?;
        self.backend.validate(self.features.test_mode)?;
        self.cache.validate()?;
        Ok(())
    }
}
