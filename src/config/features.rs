//! Feature flags configuration

use serde::Deserialize;

/// Initial values of the runtime flags; the host may change them later.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Serve demo ads only
    #[serde(default)]
    pub test_mode: bool,

    /// Show advertised apps in an in-app store page rather than externally
    #[serde(default = "default_true")]
    pub allow_in_app_store_screen: bool,

    /// Refetch the preloaded ad when the orientation changes
    #[serde(default = "default_true")]
    pub auto_reload_on_orientation_change: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            test_mode: false,
            allow_in_app_store_screen: default_true(),
            auto_reload_on_orientation_change: default_true(),
        }
    }
}

fn default_true() -> bool {
    true
}
