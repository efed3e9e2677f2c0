//! InterstitialRenderer port - Host-side drawing of the interstitial.
//!
//! The core decides *whether* an ad may be shown; the renderer decides *how*.
//! A presentation carries callbacks so the renderer can report back when the
//! user closes the interstitial or taps the ad.

use std::fmt;
use std::sync::Arc;

use crate::domain::interstitial::{AdPayload, Appearance};

/// What the host should do after the user tapped the ad.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TapOutcome {
    /// The in-app store page was presented; nothing left to do.
    InAppStore,
    /// The host should open this URL externally.
    OpenExternally(String),
}

/// Callbacks from the renderer into the core for one presentation.
pub trait PresentationCallbacks: Send + Sync {
    /// The user closed the interstitial. Only the first call has an effect.
    fn on_dismiss(&self);

    /// The user tapped the ad.
    fn on_tap(&self) -> TapOutcome;
}

/// One ad handed to the renderer.
#[derive(Clone)]
pub struct Presentation {
    pub payload: AdPayload,
    pub appearance: Appearance,
    callbacks: Arc<dyn PresentationCallbacks>,
}

impl Presentation {
    /// Creates a presentation.
    pub fn new(
        payload: AdPayload,
        appearance: Appearance,
        callbacks: Arc<dyn PresentationCallbacks>,
    ) -> Self {
        Self {
            payload,
            appearance,
            callbacks,
        }
    }

    /// Reports that the interstitial was closed.
    pub fn dismiss(&self) {
        self.callbacks.on_dismiss();
    }

    /// Reports a tap on the ad and returns where it leads.
    pub fn open_advertised_app(&self) -> TapOutcome {
        self.callbacks.on_tap()
    }
}

impl fmt::Debug for Presentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Presentation")
            .field("payload", &self.payload)
            .field("appearance", &self.appearance)
            .finish_non_exhaustive()
    }
}

/// Port for the host's interstitial renderer.
pub trait InterstitialRenderer: Send + Sync {
    /// Can this device display interstitials (screen size, OS version, ...)?
    fn can_present_on_this_device(&self) -> bool;

    /// Displays the interstitial.
    ///
    /// Must not block; the renderer keeps `presentation` and calls
    /// [`Presentation::dismiss`] once the user closes it.
    fn present(&self, presentation: Presentation);
}
