//! PresentationGate - One interstitial on screen at a time.
//!
//! `show` claims the presenting flag, consumes a fresh cache entry and hands
//! it to the renderer together with callbacks that release the flag when the
//! user closes the ad. A failed show releases the flag before returning.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

use super::{read, write, InterstitialCache, Preconditions, RuntimeFlags};
use crate::domain::interstitial::{AdEntry, AdTarget, AffiliateError, Appearance, CacheMiss};
use crate::ports::{
    DeviceCapabilities, InterstitialRenderer, OrientationSource, Presentation,
    PresentationCallbacks, StorePagePresenter, TapOutcome,
};

/// Decides where a tap on the ad leads.
#[derive(Clone)]
struct TapRouter {
    store_pages: Option<Arc<dyn StorePagePresenter>>,
    capabilities: Option<Arc<dyn DeviceCapabilities>>,
    flags: Arc<RuntimeFlags>,
}

impl TapRouter {
    fn route(&self, target: &AdTarget) -> TapOutcome {
        match target {
            AdTarget::AppStore {
                product_id,
                fallback_url,
            } => {
                if self.in_app_store_allowed() {
                    if let Some(store_pages) = &self.store_pages {
                        if store_pages.present_store_page(product_id) {
                            return TapOutcome::InAppStore;
                        }
                        debug!(%product_id, "Store page unavailable, falling back to URL");
                    }
                }
                TapOutcome::OpenExternally(fallback_url.clone())
            }
            AdTarget::Url { url } => TapOutcome::OpenExternally(url.clone()),
        }
    }

    fn in_app_store_allowed(&self) -> bool {
        self.flags.allow_in_app_store_screen()
            && self
                .capabilities
                .as_ref()
                .map_or(true, |probe| probe.store_page_support().is_usable())
    }
}

/// Callbacks for the interstitial currently on screen.
struct ActivePresentation {
    ad_id: String,
    target: AdTarget,
    router: TapRouter,
    presenting: Arc<AtomicBool>,
    dismissed: AtomicBool,
}

impl PresentationCallbacks for ActivePresentation {
    fn on_dismiss(&self) {
        if self.dismissed.swap(true, Ordering::AcqRel) {
            return;
        }
        self.presenting.store(false, Ordering::Release);
        info!(ad_id = %self.ad_id, "Interstitial dismissed");
    }

    fn on_tap(&self) -> TapOutcome {
        let outcome = self.router.route(&self.target);
        info!(ad_id = %self.ad_id, ?outcome, "Interstitial tapped");
        outcome
    }
}

impl Drop for ActivePresentation {
    fn drop(&mut self) {
        // Only dismissal reopens the gate; the ad may still be on screen.
        if !self.dismissed.load(Ordering::Acquire) {
            warn!(ad_id = %self.ad_id, "Presentation released without dismissal");
        }
    }
}

/// Guards the renderer.
pub struct PresentationGate {
    cache: Arc<InterstitialCache>,
    preconditions: Arc<Preconditions>,
    orientation: Arc<dyn OrientationSource>,
    renderer: Arc<dyn InterstitialRenderer>,
    router: TapRouter,
    default_appearance: RwLock<Appearance>,
    presenting: Arc<AtomicBool>,
}

impl PresentationGate {
    pub fn new(
        cache: Arc<InterstitialCache>,
        preconditions: Arc<Preconditions>,
        orientation: Arc<dyn OrientationSource>,
        renderer: Arc<dyn InterstitialRenderer>,
        flags: Arc<RuntimeFlags>,
    ) -> Self {
        Self {
            cache,
            preconditions,
            orientation,
            renderer,
            router: TapRouter {
                store_pages: None,
                capabilities: None,
                flags,
            },
            default_appearance: RwLock::new(Appearance::default()),
            presenting: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Routes app store taps through the in-app store page.
    pub fn with_store_page_presenter(mut self, presenter: Arc<dyn StorePagePresenter>) -> Self {
        self.router.store_pages = Some(presenter);
        self
    }

    /// Consults the store page probe before using the in-app store page.
    pub fn with_device_capabilities(mut self, capabilities: Arc<dyn DeviceCapabilities>) -> Self {
        self.router.capabilities = Some(capabilities);
        self
    }

    /// Presents the preloaded interstitial.
    ///
    /// Uses `appearance` when given, the default appearance otherwise. The
    /// cache entry is consumed only when the ad actually reaches the renderer.
    pub fn show(&self, appearance: Option<Appearance>) -> Result<(), AffiliateError> {
        if self
            .presenting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Show rejected, an interstitial is already on screen");
            return Err(AffiliateError::NoConcurrentInterstitials);
        }

        let entry = match self.take_entry() {
            Ok(entry) => entry,
            Err(err) => {
                self.presenting.store(false, Ordering::Release);
                debug!(error_code = %err.code(), "Show failed");
                return Err(err);
            }
        };

        let appearance = appearance.unwrap_or_else(|| self.default_appearance());
        let orientation = entry.orientation();
        let payload = entry.into_payload();
        let callbacks = Arc::new(ActivePresentation {
            ad_id: payload.ad_id.clone(),
            target: payload.target.clone(),
            router: self.router.clone(),
            presenting: Arc::clone(&self.presenting),
            dismissed: AtomicBool::new(false),
        });

        info!(ad_id = %payload.ad_id, %orientation, "Presenting interstitial");
        self.renderer
            .present(Presentation::new(payload, appearance, callbacks));
        Ok(())
    }

    /// True from a successful `show` until the renderer reports dismissal.
    pub fn is_presenting(&self) -> bool {
        self.presenting.load(Ordering::Acquire)
    }

    pub fn default_appearance(&self) -> Appearance {
        *read(&self.default_appearance)
    }

    pub fn set_default_appearance(&self, appearance: Appearance) {
        *write(&self.default_appearance) = appearance;
    }

    fn take_entry(&self) -> Result<AdEntry, AffiliateError> {
        self.preconditions.check_general()?;
        self.cache
            .consume(self.orientation.current())
            .map_err(|miss| match miss {
                CacheMiss::Empty | CacheMiss::Expired => AffiliateError::NoAdvertisementPreloaded,
                CacheMiss::WrongOrientation => AffiliateError::WrongAdvertisementOrientation,
            })
    }
}
