//! Fixed answers for device probes.

use std::sync::{PoisonError, RwLock};

use crate::ports::{AdvertisingIdProvider, Capability, DeviceCapabilities};

/// Capability probe with preset answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticDeviceCapabilities {
    platform: Capability,
    store_page: Capability,
}

impl StaticDeviceCapabilities {
    pub fn new(platform: Capability, store_page: Capability) -> Self {
        Self {
            platform,
            store_page,
        }
    }
}

impl DeviceCapabilities for StaticDeviceCapabilities {
    fn platform_support(&self) -> Capability {
        self.platform
    }

    fn store_page_support(&self) -> Capability {
        self.store_page
    }
}

/// Advertising identifier that can be swapped at runtime (e.g. when the user
/// toggles ad tracking).
#[derive(Debug, Default)]
pub struct StaticAdvertisingId {
    id: RwLock<Option<String>>,
}

impl StaticAdvertisingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: RwLock::new(Some(id.into())),
        }
    }

    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn set(&self, id: Option<String>) {
        *self.id.write().unwrap_or_else(PoisonError::into_inner) = id;
    }
}

impl AdvertisingIdProvider for StaticAdvertisingId {
    fn current_advertising_identifier(&self) -> Option<String> {
        self.id
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
