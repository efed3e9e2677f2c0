//! LoadController - Single-flight, cancellable preloading.
//!
//! # Operation slot
//!
//! ```text
//! Idle --[preload]--> Pending --[fetch ok]----> Succeeded --> Idle
//!                        |    --[fetch error]-> Failed ----> Idle
//!                        |    --[cancel]------> Cancelled -> Idle
//!                        +--[preload]--> (listener attached, same fetch)
//! ```
//!
//! At most one operation is pending. The fetch runs on a spawned task and
//! its result is applied only while the slot still holds the operation that
//! started it; results of cancelled or retargeted fetches are dropped.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::preconditions::LoadContext;
use super::{lock, InterstitialCache, Preconditions, RuntimeFlags};
use crate::domain::foundation::OperationId;
use crate::domain::interstitial::{
    AdEntry, AdPayload, AffiliateError, Completion, LoadOperation, LoadStatus, Orientation,
};
use crate::ports::{AdFetchClient, Clock, FetchError, FetchRequest, OrientationSource};

/// The pending operation and the task running its fetch.
struct InFlight {
    operation: LoadOperation,
    task: JoinHandle<()>,
}

/// Drives fetch-and-cache cycles.
pub struct LoadController {
    fetch_client: Arc<dyn AdFetchClient>,
    preconditions: Arc<Preconditions>,
    cache: Arc<InterstitialCache>,
    flags: Arc<RuntimeFlags>,
    orientation: Arc<dyn OrientationSource>,
    clock: Arc<dyn Clock>,
    default_ttl: Duration,
    runtime: Handle,
    slot: Mutex<Option<InFlight>>,
}

impl LoadController {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        fetch_client: Arc<dyn AdFetchClient>,
        preconditions: Arc<Preconditions>,
        cache: Arc<InterstitialCache>,
        flags: Arc<RuntimeFlags>,
        orientation: Arc<dyn OrientationSource>,
        clock: Arc<dyn Clock>,
        default_ttl: Duration,
        runtime: Handle,
    ) -> Self {
        Self {
            fetch_client,
            preconditions,
            cache,
            flags,
            orientation,
            clock,
            default_ttl,
            runtime,
            slot: Mutex::new(None),
        }
    }

    /// Starts a preload for the current orientation, or joins the pending one.
    ///
    /// Precondition failures are reported to `completion` before this returns
    /// and never reach the network.
    pub fn preload(self: &Arc<Self>, completion: Option<Completion>) {
        let context = match self.preconditions.check_for_load() {
            Ok(context) => context,
            Err(err) => {
                debug!(error_code = %err.code(), "Preload rejected by preconditions");
                if let Some(completion) = completion {
                    completion(Err(err));
                }
                return;
            }
        };

        let mut slot = lock(&self.slot);
        if let Some(in_flight) = slot.as_mut() {
            if let Some(completion) = completion {
                in_flight.operation.attach(completion);
            }
            debug!(
                operation_id = %in_flight.operation.id(),
                listeners = in_flight.operation.listener_count(),
                "Joined pending preload"
            );
            return;
        }

        let mut operation = LoadOperation::new(self.orientation.current(), self.clock.now());
        if let Some(completion) = completion {
            operation.attach(completion);
        }
        *slot = Some(self.start(operation, context));
    }

    /// Preloads and waits for the outcome.
    pub async fn preload_async(self: &Arc<Self>) -> Result<(), AffiliateError> {
        let (tx, rx) = oneshot::channel();
        self.preload(Some(Box::new(move |result: Result<(), AffiliateError>| {
            let _ = tx.send(result);
        })));

        // The sender only disappears unanswered if the controller is torn down.
        rx.await.unwrap_or(Err(AffiliateError::OperationCancelled))
    }

    /// Abandons the pending fetch and tells its listeners it was cancelled.
    ///
    /// No-op when nothing is pending.
    pub fn cancel(&self) {
        let Some(mut in_flight) = lock(&self.slot).take() else {
            return;
        };

        in_flight.task.abort();
        let listeners = settle_listeners(&mut in_flight.operation, LoadStatus::Cancelled);
        info!(
            operation_id = %in_flight.operation.id(),
            listeners = listeners.len(),
            "Cancelled preload"
        );
        notify(listeners, Err(AffiliateError::OperationCancelled));
    }

    /// Makes sure a fetch for `orientation` is pending.
    ///
    /// A pending fetch for another orientation is aborted and replaced; its
    /// listeners move to the replacement and hear its outcome. Precondition
    /// failures are swallowed since nobody is waiting on this call.
    pub fn refresh_for(self: &Arc<Self>, orientation: Orientation) {
        let context = match self.preconditions.check_for_load() {
            Ok(context) => context,
            Err(err) => {
                debug!(error_code = %err.code(), %orientation, "Skipping orientation refresh");
                return;
            }
        };

        let mut slot = lock(&self.slot);
        let replacement = match slot.take() {
            None => LoadOperation::new(orientation, self.clock.now()),
            Some(in_flight) if in_flight.operation.orientation() == orientation => {
                *slot = Some(in_flight);
                return;
            }
            Some(mut in_flight) => {
                in_flight.task.abort();
                let previous = in_flight.operation.id();
                let replacement = self.retarget(&mut in_flight.operation, orientation);
                debug!(
                    previous_operation_id = %previous,
                    operation_id = %replacement.id(),
                    %orientation,
                    "Retargeted pending preload"
                );
                replacement
            }
        };
        *slot = Some(self.start(replacement, context));
    }

    /// Returns true while a fetch is pending.
    pub fn is_loading(&self) -> bool {
        lock(&self.slot).is_some()
    }

    /// Orientation of the pending fetch, if any.
    pub fn pending_orientation(&self) -> Option<Orientation> {
        lock(&self.slot)
            .as_ref()
            .map(|in_flight| in_flight.operation.orientation())
    }

    fn start(self: &Arc<Self>, operation: LoadOperation, context: LoadContext) -> InFlight {
        let id = operation.id();
        let request = FetchRequest {
            credentials: context.credentials,
            orientation: operation.orientation(),
            test_mode: self.flags.test_mode(),
            advertising_id: context.advertising_id,
        };
        info!(
            operation_id = %id,
            orientation = %request.orientation,
            test_mode = request.test_mode,
            "Preloading interstitial"
        );

        let controller = Arc::clone(self);
        let task = self.runtime.spawn(async move {
            let result = controller.fetch_client.fetch(request).await;
            controller.settle(id, result);
        });

        InFlight { operation, task }
    }

    fn retarget(&self, operation: &mut LoadOperation, orientation: Orientation) -> LoadOperation {
        let now = self.clock.now();
        operation.retarget(orientation, now).unwrap_or_else(|err| {
            warn!(operation_id = %operation.id(), error = %err, "Retargeting a settled operation");
            let mut replacement = LoadOperation::new(orientation, now);
            for listener in operation.take_listeners() {
                replacement.attach(listener);
            }
            replacement
        })
    }

    /// Applies a fetch result if `id` is still the pending operation.
    fn settle(&self, id: OperationId, result: Result<AdPayload, FetchError>) {
        let (listeners, outcome) = {
            let mut slot = lock(&self.slot);
            let mut in_flight = match slot.take() {
                Some(in_flight) if in_flight.operation.id() == id => in_flight,
                other => {
                    *slot = other;
                    debug!(operation_id = %id, "Discarding result of abandoned preload");
                    return;
                }
            };

            let (status, outcome) = match result {
                Ok(payload) => {
                    let entry = AdEntry::new(
                        payload,
                        in_flight.operation.orientation(),
                        self.clock.now(),
                        self.default_ttl,
                    );
                    self.cache.put(entry);
                    (LoadStatus::Succeeded, Ok(()))
                }
                Err(err) => {
                    warn!(operation_id = %id, error = %err, "Preload failed");
                    (LoadStatus::Failed, Err(AffiliateError::from(err)))
                }
            };

            (settle_listeners(&mut in_flight.operation, status), outcome)
        };

        info!(
            operation_id = %id,
            listeners = listeners.len(),
            success = outcome.is_ok(),
            "Preload settled"
        );
        notify(listeners, outcome);
    }
}

fn settle_listeners(operation: &mut LoadOperation, status: LoadStatus) -> Vec<Completion> {
    operation.finish(status).unwrap_or_else(|err| {
        warn!(operation_id = %operation.id(), error = %err, "Settling a settled operation");
        operation.take_listeners()
    })
}

fn notify(listeners: Vec<Completion>, outcome: Result<(), AffiliateError>) {
    for listener in listeners {
        listener(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryOrientationSource, ManualClock, MockAdFetchClient, RecordingRenderer};
    use crate::application::CredentialStore;
    use crate::domain::foundation::Timestamp;
    use crate::domain::interstitial::AdTarget;

    type Log = Arc<Mutex<Vec<(usize, Result<(), AffiliateError>)>>>;

    struct Harness {
        controller: Arc<LoadController>,
        client: Arc<MockAdFetchClient>,
        cache: Arc<InterstitialCache>,
        orientation: Arc<InMemoryOrientationSource>,
        flags: Arc<RuntimeFlags>,
        log: Log,
    }

    impl Harness {
        fn new(client: MockAdFetchClient) -> Self {
            Self::with_credentials(client, ("key", "secret"))
        }

        fn with_credentials(client: MockAdFetchClient, (key, secret): (&str, &str)) -> Self {
            let client = Arc::new(client);
            let credentials = Arc::new(CredentialStore::new());
            let _ = credentials.configure(key, secret);
            let clock = Arc::new(ManualClock::new(Timestamp::from_unix_secs(1_000)));
            let cache = Arc::new(InterstitialCache::new(clock.clone()));
            let orientation = Arc::new(InMemoryOrientationSource::new(Orientation::Portrait));
            let flags = Arc::new(RuntimeFlags::default());
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
                orientation.clone(),
                clock,
                Duration::from_secs(300),
                Handle::current(),
            ));

            Self {
                controller,
                client,
                cache,
                orientation,
                flags,
                log: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn listener(&self, tag: usize) -> Option<Completion> {
            let log = Arc::clone(&self.log);
            Some(Box::new(move |result| log.lock().unwrap().push((tag, result))))
        }

        fn outcomes(&self) -> Vec<(usize, Result<(), AffiliateError>)> {
            self.log.lock().unwrap().clone()
        }
    }

    async fn drain() {
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn successful_preload_fills_cache_and_notifies() {
        let h = Harness::new(MockAdFetchClient::new());

        h.controller.preload(h.listener(1));
        assert!(h.controller.is_loading());
        drain().await;

        assert_eq!(h.outcomes(), vec![(1, Ok(()))]);
        assert!(!h.controller.is_loading());
        assert!(h.cache.peek(Orientation::Portrait).is_ok());
    }

    #[tokio::test]
    async fn concurrent_preloads_share_one_fetch_in_attachment_order() {
        let h = Harness::new(MockAdFetchClient::new().held());

        h.controller.preload(h.listener(1));
        h.controller.preload(h.listener(2));
        h.controller.preload(None);
        h.controller.preload(h.listener(3));
        drain().await;
        assert!(h.outcomes().is_empty());

        h.client.release(1);
        drain().await;

        assert_eq!(h.client.call_count(), 1);
        assert_eq!(h.outcomes(), vec![(1, Ok(())), (2, Ok(())), (3, Ok(()))]);
    }

    #[tokio::test]
    async fn failure_is_classified_and_shared() {
        let h = Harness::new(MockAdFetchClient::new().with_error(FetchError::NoInventory));

        h.controller.preload(h.listener(1));
        h.controller.preload(h.listener(2));
        drain().await;

        let expected = Err(AffiliateError::NoAdvertisementAvailable);
        assert_eq!(h.outcomes(), vec![(1, expected), (2, expected)]);
        assert!(h.cache.is_empty());
        assert!(!h.controller.is_loading());
    }

    #[tokio::test]
    async fn missing_credentials_fail_before_returning() {
        let h = Harness::with_credentials(MockAdFetchClient::new(), ("", "secret"));

        h.controller.preload(h.listener(1));

        assert_eq!(h.outcomes(), vec![(1, Err(AffiliateError::MissingAppCredentials))]);
        assert!(!h.controller.is_loading());
        drain().await;
        assert_eq!(h.client.call_count(), 0);
    }

    #[tokio::test]
    async fn cancel_notifies_listeners_and_drops_late_result() {
        let h = Harness::new(MockAdFetchClient::new().held());

        h.controller.preload(h.listener(1));
        drain().await;
        h.controller.cancel();

        assert_eq!(h.outcomes(), vec![(1, Err(AffiliateError::OperationCancelled))]);
        assert!(!h.controller.is_loading());

        h.client.release(1);
        drain().await;

        assert_eq!(h.outcomes().len(), 1);
        assert!(h.cache.is_empty());
    }

    #[tokio::test]
    async fn cancel_with_nothing_pending_is_a_noop() {
        let h = Harness::new(MockAdFetchClient::new());

        h.controller.cancel();
        h.controller.cancel();

        assert!(h.outcomes().is_empty());
        assert!(!h.controller.is_loading());
    }

    #[tokio::test]
    async fn preload_after_cancel_starts_a_new_fetch() {
        let h = Harness::new(MockAdFetchClient::new().held());

        h.controller.preload(h.listener(1));
        drain().await;
        h.controller.cancel();
        h.controller.preload(h.listener(2));
        drain().await;
        h.client.release(1);
        drain().await;

        assert_eq!(h.client.call_count(), 2);
        assert_eq!(
            h.outcomes(),
            vec![(1, Err(AffiliateError::OperationCancelled)), (2, Ok(()))]
        );
        assert!(h.cache.peek(Orientation::Portrait).is_ok());
    }

    #[tokio::test]
    async fn result_for_unknown_operation_is_discarded() {
        let h = Harness::new(MockAdFetchClient::new());
        let payload = AdPayload::new(
            "stray",
            "https://cdn.example.com/stray.html",
            AdTarget::Url {
                url: "https://example.com".to_string(),
            },
        );

        h.controller.settle(OperationId::new(), Ok(payload));

        assert!(h.cache.is_empty());
    }

    #[tokio::test]
    async fn refresh_retargets_fetch_for_other_orientation() {
        let h = Harness::new(MockAdFetchClient::new().held());

        h.controller.preload(h.listener(1));
        drain().await;
        h.orientation.set(Orientation::LandscapeLeft);
        h.controller.refresh_for(Orientation::LandscapeLeft);
        drain().await;

        assert_eq!(h.client.call_count(), 2);
        assert_eq!(
            h.controller.pending_orientation(),
            Some(Orientation::LandscapeLeft)
        );

        h.client.release(1);
        drain().await;

        assert_eq!(h.outcomes(), vec![(1, Ok(()))]);
        assert!(h.cache.peek(Orientation::LandscapeLeft).is_ok());
    }

    #[tokio::test]
    async fn refresh_for_same_orientation_keeps_pending_fetch() {
        let h = Harness::new(MockAdFetchClient::new().held());

        h.controller.preload(None);
        drain().await;
        h.controller.refresh_for(Orientation::Portrait);
        drain().await;

        assert_eq!(h.client.call_count(), 1);
        assert!(h.controller.is_loading());
    }

    #[tokio::test]
    async fn request_carries_test_mode_and_orientation() {
        let h = Harness::new(MockAdFetchClient::new());
        h.flags.set_test_mode(true);
        h.orientation.set(Orientation::LandscapeRight);

        h.controller.preload(None);
        drain().await;

        let calls = h.client.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].test_mode);
        assert_eq!(calls[0].orientation, Orientation::LandscapeRight);
        assert_eq!(calls[0].credentials.api_key(), "key");
    }

    #[tokio::test]
    async fn preload_async_resolves_with_outcome() {
        let h = Harness::new(MockAdFetchClient::new().with_error(FetchError::InvalidApiSecret));

        let result = h.controller.preload_async().await;

        assert_eq!(result, Err(AffiliateError::InvalidApiSecret));
    }
}
