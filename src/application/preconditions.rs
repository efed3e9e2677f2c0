//! Preconditions - The general checks shared by load and show.
//!
//! Check order is fixed and the first failure wins: credentials, then device
//! support, then (for loads, when a provider is wired) the advertising id.

use std::sync::Arc;

use super::CredentialStore;
use crate::domain::interstitial::{AffiliateError, Credentials};
use crate::ports::{AdvertisingIdProvider, DeviceCapabilities, InterstitialRenderer};

/// Outcome of a successful load precondition check.
#[derive(Debug, Clone)]
pub struct LoadContext {
    pub credentials: Credentials,
    pub advertising_id: Option<String>,
}

/// Evaluates the general preconditions against the injected collaborators.
pub struct Preconditions {
    credentials: Arc<CredentialStore>,
    renderer: Arc<dyn InterstitialRenderer>,
    capabilities: Option<Arc<dyn DeviceCapabilities>>,
    advertising_ids: Option<Arc<dyn AdvertisingIdProvider>>,
}

impl Preconditions {
    pub fn new(
        credentials: Arc<CredentialStore>,
        renderer: Arc<dyn InterstitialRenderer>,
        capabilities: Option<Arc<dyn DeviceCapabilities>>,
        advertising_ids: Option<Arc<dyn AdvertisingIdProvider>>,
    ) -> Self {
        Self {
            credentials,
            renderer,
            capabilities,
            advertising_ids,
        }
    }

    /// Credentials present and device supported.
    pub fn check_general(&self) -> Result<Credentials, AffiliateError> {
        let credentials = self
            .credentials
            .current()
            .ok_or(AffiliateError::MissingAppCredentials)?;

        if !self.is_device_supported() {
            return Err(AffiliateError::UnsupportedDevice);
        }

        Ok(credentials)
    }

    /// General checks plus the advertising identifier.
    pub fn check_for_load(&self) -> Result<LoadContext, AffiliateError> {
        let credentials = self.check_general()?;
        let advertising_id = self.advertising_id()?;
        Ok(LoadContext {
            credentials,
            advertising_id,
        })
    }

    /// The renderer must accept the device and the platform probe must not
    /// rule it out.
    pub fn is_device_supported(&self) -> bool {
        let platform_usable = self
            .capabilities
            .as_ref()
            .map_or(true, |probe| probe.platform_support().is_usable());

        platform_usable && self.renderer.can_present_on_this_device()
    }

    /// Looks up the identifier; `Ok(None)` when no provider is wired.
    fn advertising_id(&self) -> Result<Option<String>, AffiliateError> {
        match &self.advertising_ids {
            None => Ok(None),
            Some(provider) => provider
                .current_advertising_identifier()
                .filter(|id| !id.is_empty())
                .map(Some)
                .ok_or(AffiliateError::MissingAdvertisingIdentifier),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{RecordingRenderer, StaticAdvertisingId, StaticDeviceCapabilities};
    use crate::ports::Capability;

    fn configured_store() -> Arc<CredentialStore> {
        let store = Arc::new(CredentialStore::new());
        store.configure("key", "secret").unwrap();
        store
    }

    #[test]
    fn missing_credentials_win_over_unsupported_device() {
        let preconditions = Preconditions::new(
            Arc::new(CredentialStore::new()),
            Arc::new(RecordingRenderer::unsupported()),
            None,
            None,
        );
        assert_eq!(
            preconditions.check_general().unwrap_err(),
            AffiliateError::MissingAppCredentials
        );
    }

    #[test]
    fn renderer_refusal_means_unsupported_device() {
        let preconditions = Preconditions::new(
            configured_store(),
            Arc::new(RecordingRenderer::unsupported()),
            None,
            None,
        );
        assert_eq!(
            preconditions.check_general().unwrap_err(),
            AffiliateError::UnsupportedDevice
        );
    }

    #[test]
    fn unsupported_platform_probe_blocks_but_unknown_does_not() {
        let blocked = Preconditions::new(
            configured_store(),
            Arc::new(RecordingRenderer::new()),
            Some(Arc::new(StaticDeviceCapabilities::new(
                Capability::Unsupported,
                Capability::Supported,
            ))),
            None,
        );
        assert!(!blocked.is_device_supported());

        let unknown = Preconditions::new(
            configured_store(),
            Arc::new(RecordingRenderer::new()),
            Some(Arc::new(StaticDeviceCapabilities::new(
                Capability::Unknown,
                Capability::Unknown,
            ))),
            None,
        );
        assert!(unknown.is_device_supported());
    }

    #[test]
    fn missing_identifier_blocks_loads() {
        let preconditions = Preconditions::new(
            configured_store(),
            Arc::new(RecordingRenderer::new()),
            None,
            Some(Arc::new(StaticAdvertisingId::unavailable())),
        );
        assert!(preconditions.check_general().is_ok());
        assert_eq!(
            preconditions.check_for_load().unwrap_err(),
            AffiliateError::MissingAdvertisingIdentifier
        );
    }

    #[test]
    fn identifier_is_forwarded_when_available() {
        let preconditions = Preconditions::new(
            configured_store(),
            Arc::new(RecordingRenderer::new()),
            None,
            Some(Arc::new(StaticAdvertisingId::new("idfa-1"))),
        );
        let context = preconditions.check_for_load().unwrap();
        assert_eq!(context.advertising_id.as_deref(), Some("idfa-1"));
    }

    #[test]
    fn no_provider_means_no_identifier_check() {
        let preconditions = Preconditions::new(
            configured_store(),
            Arc::new(RecordingRenderer::new()),
            None,
            None,
        );
        assert!(preconditions.check_for_load().unwrap().advertising_id.is_none());
    }
}
