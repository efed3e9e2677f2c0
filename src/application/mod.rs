//! Application layer - The interstitial lifecycle core.
//!
//! Composes the ports into the components the host talks to:
//!
//! - `CredentialStore` - App credentials, validated on entry
//! - `RuntimeFlags` - Test mode, store screen and auto-reload switches
//! - `InterstitialCache` - At most one preloaded ad
//! - `LoadController` - Single-flight, cancellable preloads
//! - `OrientationWatcher` - Refetches on rotation
//! - `PresentationGate` - One interstitial on screen at a time
//! - `AffiliateManager` - Facade over all of the above
//!
//! Shared state lives behind short, non-async critical sections. No lock is
//! held across an `.await` or while calling a listener or collaborator.

mod cache;
mod credential_store;
mod flags;
mod load_controller;
mod manager;
mod orientation_watcher;
mod preconditions;
mod presentation_gate;

pub use cache::InterstitialCache;
pub use credential_store::CredentialStore;
pub use flags::RuntimeFlags;
pub use load_controller::LoadController;
pub use manager::{AffiliateManager, AffiliateManagerBuilder, BuildError};
pub use orientation_watcher::OrientationWatcher;
pub use preconditions::Preconditions;
pub use presentation_gate::PresentationGate;

use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

// A panicking listener must not wedge the SDK, so poisoned locks are
// recovered rather than propagated.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
