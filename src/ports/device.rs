//! Device ports - Identifier lookup and capability probes.
//!
//! These replace compile-time links against platform frameworks: the core
//! only asks questions and never assumes a framework is present.

/// Result of a capability probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Capability {
    Supported,
    Unsupported,
    /// The platform cannot tell; callers treat this as "try it".
    #[default]
    Unknown,
}

impl Capability {
    /// Returns true unless the capability is known to be missing.
    pub fn is_usable(&self) -> bool {
        !matches!(self, Capability::Unsupported)
    }
}

/// Port for probing what the device can do.
pub trait DeviceCapabilities: Send + Sync {
    /// Can this platform show interstitials at all?
    fn platform_support(&self) -> Capability;

    /// Can the platform show an in-app store page?
    fn store_page_support(&self) -> Capability;
}

/// Port for the platform's advertising identifier.
pub trait AdvertisingIdProvider: Send + Sync {
    /// Returns the identifier, or `None` when the platform does not expose one.
    fn current_advertising_identifier(&self) -> Option<String>;
}
