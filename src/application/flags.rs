//! RuntimeFlags - Process-wide switches read at each decision point.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::FeatureFlags;

/// Mutable feature flags with last-write-wins semantics.
#[derive(Debug)]
pub struct RuntimeFlags {
    test_mode: AtomicBool,
    allow_in_app_store_screen: AtomicBool,
    auto_reload_on_orientation_change: AtomicBool,
}

impl RuntimeFlags {
    pub fn new(initial: &FeatureFlags) -> Self {
        Self {
            test_mode: AtomicBool::new(initial.test_mode),
            allow_in_app_store_screen: AtomicBool::new(initial.allow_in_app_store_screen),
            auto_reload_on_orientation_change: AtomicBool::new(
                initial.auto_reload_on_orientation_change,
            ),
        }
    }

    pub fn test_mode(&self) -> bool {
        self.test_mode.load(Ordering::SeqCst)
    }

    pub fn set_test_mode(&self, enabled: bool) {
        self.test_mode.store(enabled, Ordering::SeqCst);
    }

    pub fn allow_in_app_store_screen(&self) -> bool {
        self.allow_in_app_store_screen.load(Ordering::SeqCst)
    }

    pub fn set_allow_in_app_store_screen(&self, allowed: bool) {
        self.allow_in_app_store_screen.store(allowed, Ordering::SeqCst);
    }

    pub fn auto_reload_on_orientation_change(&self) -> bool {
        self.auto_reload_on_orientation_change.load(Ordering::SeqCst)
    }

    pub fn set_auto_reload_on_orientation_change(&self, enabled: bool) {
        self.auto_reload_on_orientation_change
            .store(enabled, Ordering::SeqCst);
    }
}

impl Default for RuntimeFlags {
    fn default() -> Self {
        Self::new(&FeatureFlags::default())
    }
}
