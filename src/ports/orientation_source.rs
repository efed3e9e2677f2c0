//! OrientationSource port - Interface orientation and its changes.
//!
//! The host platform owns orientation. The core reads the current value on
//! demand and subscribes to changes instead of polling.

use tokio::sync::watch;

use crate::domain::interstitial::Orientation;

/// Port for observing the device's interface orientation.
pub trait OrientationSource: Send + Sync {
    /// Returns the orientation right now.
    fn current(&self) -> Orientation;

    /// Subscribes to orientation changes.
    ///
    /// The receiver starts at the current value. The subscription ends when
    /// the source shuts down (the sender is dropped).
    fn subscribe(&self) -> watch::Receiver<Orientation>;
}
