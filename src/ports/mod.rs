//! Ports - Interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! interstitial lifecycle core and the outside world. Adapters implement these
//! ports; the host platform supplies its own where it must (rendering,
//! orientation, store pages).
//!
//! ## Backend
//!
//! - `AdFetchClient` - One network exchange with the ad backend
//!
//! ## Host Platform
//!
//! - `InterstitialRenderer` - Draws the interstitial and reports dismissal/taps
//! - `StorePagePresenter` - Optional in-app store page for advertised apps
//! - `AdvertisingIdProvider` - Advertising identifier lookup
//! - `DeviceCapabilities` - Tri-state capability probes
//! - `OrientationSource` - Current orientation and change notifications
//!
//! ## Time
//!
//! - `Clock` - Source of "now" for cache expiry

mod ad_fetch_client;
mod clock;
mod device;
mod orientation_source;
mod renderer;
mod store_page;

pub use ad_fetch_client::{AdFetchClient, FetchError, FetchRequest};
pub use clock::Clock;
pub use device::{AdvertisingIdProvider, Capability, DeviceCapabilities};
pub use orientation_source::OrientationSource;
pub use renderer::{InterstitialRenderer, Presentation, PresentationCallbacks, TapOutcome};
pub use store_page::StorePagePresenter;
