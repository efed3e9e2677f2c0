//! In-memory orientation feed.

use tokio::sync::watch;

use crate::domain::interstitial::Orientation;
use crate::ports::OrientationSource;

/// Orientation source driven by [`set`](Self::set).
///
/// Hosts without a native feed forward their rotation events here; tests use
/// it to rotate the "device".
#[derive(Debug)]
pub struct InMemoryOrientationSource {
    sender: watch::Sender<Orientation>,
}

impl InMemoryOrientationSource {
    pub fn new(initial: Orientation) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    /// Publishes a new orientation to every subscriber.
    pub fn set(&self, orientation: Orientation) {
        self.sender.send_replace(orientation);
    }
}

impl Default for InMemoryOrientationSource {
    fn default() -> Self {
        Self::new(Orientation::default())
    }
}

impl OrientationSource for InMemoryOrientationSource {
    fn current(&self) -> Orientation {
        *self.sender.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<Orientation> {
        self.sender.subscribe()
    }
}
