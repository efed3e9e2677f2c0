//! CredentialStore - Holds the app's API key and secret.

use std::sync::RwLock;
use tracing::{info, warn};

use super::{read, write};
use crate::domain::foundation::ValidationError;
use crate::domain::interstitial::Credentials;

/// Holds the current app credentials.
///
/// Invalid input clears the store, so every later load or show fails with
/// `MissingAppCredentials` instead of hitting the backend.
#[derive(Debug, Default)]
pub struct CredentialStore {
    credentials: RwLock<Option<Credentials>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `credentials`.
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            credentials: RwLock::new(Some(credentials)),
        }
    }

    /// Validates and stores new credentials, replacing any previous ones.
    pub fn configure(
        &self,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Result<(), ValidationError> {
        match Credentials::new(api_key, api_secret) {
            Ok(credentials) => {
                *write(&self.credentials) = Some(credentials);
                info!("App credentials configured");
                Ok(())
            }
            Err(err) => {
                *write(&self.credentials) = None;
                warn!(error = %err, "Rejected app credentials");
                Err(err)
            }
        }
    }

    /// Returns a copy of the current credentials.
    pub fn current(&self) -> Option<Credentials> {
        read(&self.credentials).clone()
    }

    pub fn is_configured(&self) -> bool {
        read(&self.credentials).is_some()
    }
}
