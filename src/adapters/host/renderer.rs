//! Recording renderer and store page presenter.
//!
//! Keep every presentation they are handed so callers can inspect what was
//! shown and drive dismissal or taps afterwards.

use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

use crate::ports::{InterstitialRenderer, Presentation, StorePagePresenter};

/// Renderer that records presentations instead of drawing them.
///
/// The record only grows; long-running hosts call [`clear`](Self::clear)
/// once a presentation has been dismissed.
#[derive(Debug)]
pub struct RecordingRenderer {
    supported: bool,
    presentations: Mutex<Vec<Presentation>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self {
            supported: true,
            presentations: Mutex::new(Vec::new()),
        }
    }

    /// A renderer that refuses the device.
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::new()
        }
    }

    pub fn presentation_count(&self) -> usize {
        guard(&self.presentations).len()
    }

    pub fn last(&self) -> Option<Presentation> {
        guard(&self.presentations).last().cloned()
    }

    /// Dismisses the most recent presentation, as a user closing it would.
    pub fn dismiss_last(&self) {
        if let Some(presentation) = self.last() {
            presentation.dismiss();
        }
    }

    /// Forgets every recorded presentation.
    pub fn clear(&self) {
        guard(&self.presentations).clear();
    }
}

impl Default for RecordingRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl InterstitialRenderer for RecordingRenderer {
    fn can_present_on_this_device(&self) -> bool {
        self.supported
    }

    fn present(&self, presentation: Presentation) {
        debug!(ad_id = %presentation.payload.ad_id, "Recording presentation");
        guard(&self.presentations).push(presentation);
    }
}

/// Store page presenter that records the product ids it "showed".
#[derive(Debug)]
pub struct RecordingStorePagePresenter {
    available: bool,
    shown: Mutex<Vec<String>>,
}

impl RecordingStorePagePresenter {
    /// `available` decides whether store pages can be shown at all.
    pub fn new(available: bool) -> Self {
        Self {
            available,
            shown: Mutex::new(Vec::new()),
        }
    }

    pub fn shown(&self) -> Vec<String> {
        guard(&self.shown).clone()
    }
}

impl StorePagePresenter for RecordingStorePagePresenter {
    fn present_store_page(&self, product_id: &str) -> bool {
        if self.available {
            guard(&self.shown).push(product_id.to_string());
        }
        self.available
    }
}

fn guard<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
