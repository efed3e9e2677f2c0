//! Host adapters - In-process stand-ins for platform collaborators.
//!
//! Real hosts plug in their own renderer, orientation feed and device probes.
//! These implementations back tests, the demo binary and headless hosts.

mod device;
mod orientation;
mod renderer;

pub use device::{StaticAdvertisingId, StaticDeviceCapabilities};
pub use orientation::InMemoryOrientationSource;
pub use renderer::{RecordingRenderer, RecordingStorePagePresenter};
