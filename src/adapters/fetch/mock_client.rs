//! Mock ad fetch client for testing.
//!
//! Provides a configurable implementation of the AdFetchClient port so tests
//! run without a backend.
//!
//! # Features
//!
//! - Queued responses, consumed in order, with a default ad once drained
//! - Simulated latency
//! - A gate that holds every fetch open until released
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let client = MockAdFetchClient::new()
//!     .with_error(FetchError::NoInventory)
//!     .held();
//!
//! manager.preload(None);
//! client.release(1);
//! assert_eq!(client.call_count(), 1);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::sleep;

use crate::domain::interstitial::{AdPayload, AdTarget};
use crate::ports::{AdFetchClient, FetchError, FetchRequest};

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(AdPayload),
    Error(FetchError),
}

/// Mock ad backend.
///
/// Clones share the response queue, gate and call history.
#[derive(Debug, Clone)]
pub struct MockAdFetchClient {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Served once the queue is empty.
    default_payload: AdPayload,
    /// Simulated latency per request.
    delay: Duration,
    /// Holds fetches open until permits are added.
    gate: Option<Arc<Semaphore>>,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<FetchRequest>>>,
}

impl Default for MockAdFetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAdFetchClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            default_payload: AdPayload::new(
                "mock-ad",
                "https://cdn.example.com/mock-ad.html",
                AdTarget::Url {
                    url: "https://example.com/mock-ad".to_string(),
                },
            ),
            delay: Duration::ZERO,
            gate: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a successful response.
    pub fn with_payload(self, payload: AdPayload) -> Self {
        guard(&self.responses).push_back(MockResponse::Success(payload));
        self
    }

    /// Queues an error response.
    pub fn with_error(self, error: FetchError) -> Self {
        guard(&self.responses).push_back(MockResponse::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Holds every fetch until [`release`](Self::release) lets it through.
    pub fn held(mut self) -> Self {
        self.gate = Some(Arc::new(Semaphore::new(0)));
        self
    }

    /// Lets `count` held fetches complete. No-op unless [`held`](Self::held).
    pub fn release(&self, count: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(count);
        }
    }

    /// Returns the number of fetches started, including held and aborted ones.
    pub fn call_count(&self) -> usize {
        guard(&self.calls).len()
    }

    /// Returns all recorded requests.
    pub fn calls(&self) -> Vec<FetchRequest> {
        guard(&self.calls).clone()
    }

    fn next_response(&self) -> MockResponse {
        guard(&self.responses)
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success(self.default_payload.clone()))
    }
}

#[async_trait]
impl AdFetchClient for MockAdFetchClient {
    async fn fetch(&self, request: FetchRequest) -> Result<AdPayload, FetchError> {
        guard(&self.calls).push(request);

        if let Some(gate) = &self.gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockResponse::Success(payload) => Ok(payload),
            MockResponse::Error(err) => Err(err),
        }
    }
}

fn guard<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
