//! InterstitialCache - Holds at most one preloaded ad.
//!
//! Entries are checked lazily: a stale entry stays in memory until the next
//! `put` or `invalidate`, but is never handed out.

use std::sync::{Arc, Mutex};
use tracing::debug;

use super::lock;
use crate::domain::interstitial::{AdEntry, CacheMiss, Orientation};
use crate::ports::Clock;

/// Single-slot cache of the next ad to show.
pub struct InterstitialCache {
    slot: Mutex<Option<AdEntry>>,
    clock: Arc<dyn Clock>,
}

impl InterstitialCache {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            slot: Mutex::new(None),
            clock,
        }
    }

    /// Stores `entry`, replacing whatever was cached.
    pub fn put(&self, entry: AdEntry) {
        let replaced = lock(&self.slot).replace(entry).is_some();
        if replaced {
            debug!("Replaced cached interstitial");
        }
    }

    /// Returns a copy of the entry if it is fresh for `current`.
    pub fn peek(&self, current: Orientation) -> Result<AdEntry, CacheMiss> {
        let now = self.clock.now();
        let slot = lock(&self.slot);
        let entry = slot.as_ref().ok_or(CacheMiss::Empty)?;
        entry.check_fresh(now, current)?;
        Ok(entry.clone())
    }

    /// Takes the entry out if it is fresh for `current`; otherwise leaves the
    /// slot untouched.
    pub fn consume(&self, current: Orientation) -> Result<AdEntry, CacheMiss> {
        let now = self.clock.now();
        let mut slot = lock(&self.slot);
        slot.as_ref()
            .ok_or(CacheMiss::Empty)?
            .check_fresh(now, current)?;
        slot.take().ok_or(CacheMiss::Empty)
    }

    /// Drops the cached entry unconditionally.
    pub fn invalidate(&self) {
        if lock(&self.slot).take().is_some() {
            debug!("Invalidated cached interstitial");
        }
    }

    /// Returns true if nothing is stored (fresh or not).
    pub fn is_empty(&self) -> bool {
        lock(&self.slot).is_none()
    }
}
