//! OrientationWatcher - Keeps the cache in step with device rotation.
//!
//! Subscribes to the `OrientationSource` and, on every transition to a new
//! orientation, drops the cached ad and asks the `LoadController` for a fresh
//! one. Runs as its own task so the host's notification path never waits on
//! the SDK.

use std::sync::{Arc, Mutex};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::{lock, InterstitialCache, LoadController, RuntimeFlags};
use crate::domain::interstitial::Orientation;
use crate::ports::OrientationSource;

/// Background subscription to orientation changes.
pub struct OrientationWatcher {
    task: Mutex<Option<JoinHandle<()>>>,
}

impl OrientationWatcher {
    /// Subscribes to `source` and starts reacting on `runtime`.
    pub fn spawn(
        source: &dyn OrientationSource,
        cache: Arc<InterstitialCache>,
        controller: Arc<LoadController>,
        flags: Arc<RuntimeFlags>,
        runtime: &Handle,
    ) -> Self {
        let mut changes = source.subscribe();
        let mut last = *changes.borrow_and_update();

        let task = runtime.spawn(async move {
            while changes.changed().await.is_ok() {
                let current = *changes.borrow_and_update();
                if current == last {
                    continue;
                }
                debug!(from = %last, to = %current, "Orientation changed");
                last = current;
                handle_transition(current, &cache, &controller, &flags);
            }
            debug!("Orientation source closed, watcher exiting");
        });

        Self {
            task: Mutex::new(Some(task)),
        }
    }

    /// Stops reacting to orientation changes. Idempotent.
    pub fn stop(&self) {
        if let Some(task) = lock(&self.task).take() {
            task.abort();
            debug!("Orientation watcher stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        lock(&self.task)
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl Drop for OrientationWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Reaction to one orientation transition.
pub(crate) fn handle_transition(
    orientation: Orientation,
    cache: &InterstitialCache,
    controller: &Arc<LoadController>,
    flags: &RuntimeFlags,
) {
    if !flags.auto_reload_on_orientation_change() {
        debug!(%orientation, "Auto reload disabled, keeping cached interstitial");
        return;
    }

    info!(%orientation, "Refreshing interstitial for new orientation");
    cache.invalidate();
    controller.refresh_for(orientation);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryOrientationSource, ManualClock, MockAdFetchClient, RecordingRenderer};
    use crate::application::{CredentialStore, Preconditions};
    use crate::domain::foundation::Timestamp;
    use crate::domain::interstitial::{AdEntry, AdPayload, AdTarget};
    use crate::ports::Clock;
    use std::time::Duration;

    struct Fixture {
        source: Arc<InMemoryOrientationSource>,
        cache: Arc<InterstitialCache>,
        controller: Arc<LoadController>,
        flags: Arc<RuntimeFlags>,
        client: Arc<MockAdFetchClient>,
        clock: Arc<ManualClock>,
    }

    fn fixture(client: MockAdFetchClient) -> Fixture {
        let client = Arc::new(client);
        let clock = Arc::new(ManualClock::new(Timestamp::from_unix_secs(5_000)));
        let cache = Arc::new(InterstitialCache::new(clock.clone()));
        let source = Arc::new(InMemoryOrientationSource::new(Orientation::Portrait));
        let flags = Arc::new(RuntimeFlags::default());
        let credentials = Arc::new(CredentialStore::new());
        credentials.configure("key", "secret").unwrap();
        let preconditions = Arc::new(Preconditions::new(
            credentials,
            Arc::new(RecordingRenderer::new()),
            None,
            None,
        ));
        let controller = Arc::new(LoadController::new(
            client.clone(),
            preconditions,
            cache.clone(),
            flags.clone(),
            source.clone(),
            clock.clone(),
            Duration::from_secs(300),
            Handle::current(),
        ));

        Fixture {
            source,
            cache,
            controller,
            flags,
            client,
            clock,
        }
    }

    fn portrait_entry(clock: &ManualClock) -> AdEntry {
        let payload = AdPayload::new(
            "portrait-ad",
            "https://cdn.example.com/p.html",
            AdTarget::Url {
                url: "https://example.com".to_string(),
            },
        );
        AdEntry::new(payload, Orientation::Portrait, clock.now(), Duration::from_secs(300))
    }

    async fn drain() {
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn transition_invalidates_and_refetches() {
        let f = fixture(MockAdFetchClient::new().held());
        f.cache.put(portrait_entry(&f.clock));

        handle_transition(Orientation::LandscapeLeft, &f.cache, &f.controller, &f.flags);

        assert!(f.cache.is_empty());
        assert_eq!(
            f.controller.pending_orientation(),
            Some(Orientation::LandscapeLeft)
        );
    }

    #[tokio::test]
    async fn disabled_auto_reload_leaves_cache_alone() {
        let f = fixture(MockAdFetchClient::new());
        f.flags.set_auto_reload_on_orientation_change(false);
        f.cache.put(portrait_entry(&f.clock));

        handle_transition(Orientation::LandscapeLeft, &f.cache, &f.controller, &f.flags);
        drain().await;

        assert!(!f.cache.is_empty());
        assert_eq!(f.client.call_count(), 0);
    }

    #[tokio::test]
    async fn watcher_reacts_to_source_changes_only_once_per_orientation() {
        let f = fixture(MockAdFetchClient::new());
        let watcher = OrientationWatcher::spawn(
            f.source.as_ref(),
            f.cache.clone(),
            f.controller.clone(),
            f.flags.clone(),
            &Handle::current(),
        );
        drain().await;

        f.source.set(Orientation::LandscapeRight);
        drain().await;
        f.source.set(Orientation::LandscapeRight);
        drain().await;

        assert_eq!(f.client.call_count(), 1);
        assert!(f.cache.peek(Orientation::LandscapeRight).is_ok());
        assert!(watcher.is_running());
    }

    #[tokio::test]
    async fn stopped_watcher_ignores_changes() {
        let f = fixture(MockAdFetchClient::new());
        let watcher = OrientationWatcher::spawn(
            f.source.as_ref(),
            f.cache.clone(),
            f.controller.clone(),
            f.flags.clone(),
            &Handle::current(),
        );

        watcher.stop();
        watcher.stop();
        f.source.set(Orientation::LandscapeLeft);
        drain().await;

        assert_eq!(f.client.call_count(), 0);
        assert!(!watcher.is_running());
    }
}
