//! App credential configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::foundation;
use crate::domain::interstitial::Credentials;

/// API key and secret, both optional so the host can configure them later
/// through `AffiliateManager::configure`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialsConfig {
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
}

impl CredentialsConfig {
    /// Check that the key and secret are either both set or both absent
    pub fn validate(&self) -> Result<(), ValidationError> {
        match (self.has_key(), self.has_secret()) {
            (true, false) => Err(ValidationError::MissingRequired("API_SECRET")),
            (false, true) => Err(ValidationError::MissingRequired("API_KEY")),
            _ => Ok(()),
        }
    }

    /// Build domain credentials, or `None` if nothing is configured
    pub fn to_credentials(&self) -> Result<Option<Credentials>, foundation::ValidationError> {
        match (&self.api_key, &self.api_secret) {
            (None, None) => Ok(None),
            (key, secret) => Credentials::new(
                key.clone().unwrap_or_default(),
                secret.clone().unwrap_or_default(),
            )
            .map(Some),
        }
    }

    fn has_key(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    fn has_secret(&self) -> bool {
        self.api_secret.as_ref().is_some_and(|s| !s.is_empty())
    }
}
