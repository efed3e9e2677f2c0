//! App credentials issued by the affiliate dashboard.

use secrecy::{ExposeSecret, SecretString};

use crate::domain::foundation::ValidationError;

/// API key and secret identifying the host app to the ad backend.
///
/// Both values are held as secrets so `Debug` output and logs never reveal
/// them. Construction fails if either is empty.
#[derive(Debug, Clone)]
pub struct Credentials {
    api_key: SecretString,
    api_secret: SecretString,
}

impl Credentials {
    /// Creates credentials, rejecting empty (or whitespace-only) values.
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let api_key = api_key.into();
        let api_secret = api_secret.into();

        if api_key.trim().is_empty() {
            return Err(ValidationError::empty_field("api_key"));
        }
        if api_secret.trim().is_empty() {
            return Err(ValidationError::empty_field("api_secret"));
        }

        Ok(Self {
            api_key: SecretString::new(api_key),
            api_secret: SecretString::new(api_secret),
        })
    }

    /// Exposes the API key (for making requests).
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Exposes the API secret (for making requests).
    pub fn api_secret(&self) -> &str {
        self.api_secret.expose_secret()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_non_empty_values() {
        let creds = Credentials::new("key-123", "secret-456").unwrap();
        assert_eq!(creds.api_key(), "key-123");
        assert_eq!(creds.api_secret(), "secret-456");
    }

    #[test]
    fn rejects_empty_key() {
        let err = Credentials::new("", "secret").unwrap_err();
        assert_eq!(err, ValidationError::empty_field("api_key"));
    }

    #[test]
    fn rejects_blank_secret() {
        let err = Credentials::new("key", "   ").unwrap_err();
        assert_eq!(err, ValidationError::empty_field("api_secret"));
    }

    #[test]
    fn debug_output_hides_values() {
        let creds = Credentials::new("key-123", "secret-456").unwrap();
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("key-123"));
        assert!(!debug.contains("secret-456"));
    }
}
