//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the lifecycle core to external systems:
//! - `fetch` - Ad backend clients (HTTP, mock)
//! - `host` - Orientation, rendering and device stand-ins
//! - `clock` - System and manual clocks

mod clock;
pub mod fetch;
pub mod host;

pub use clock::{ManualClock, SystemClock};
pub use fetch::{HttpAdFetchClient, HttpAdFetchConfig, MockAdFetchClient, MockResponse};
pub use host::{
    InMemoryOrientationSource, RecordingRenderer, RecordingStorePagePresenter,
    StaticAdvertisingId, StaticDeviceCapabilities,
};
