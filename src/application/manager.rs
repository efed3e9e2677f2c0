//! AffiliateManager - The host-facing entry point.
//!
//! One manager owns one set of credentials, flags, cache and operation slot.
//! Hosts usually keep a single instance for the life of the process; tests
//! build as many independent ones as they like.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use affiliate_sdk::adapters::{InMemoryOrientationSource, MockAdFetchClient, RecordingRenderer};
//! use affiliate_sdk::{AffiliateManager, Orientation};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = AffiliateManager::builder()
//!     .fetch_client(Arc::new(MockAdFetchClient::new()))
//!     .renderer(Arc::new(RecordingRenderer::new()))
//!     .orientation_source(Arc::new(InMemoryOrientationSource::new(Orientation::Portrait)))
//!     .build()?;
//!
//! manager.configure("api-key", "api-secret")?;
//! manager.preload_async().await?;
//! manager.show(None)?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Handle;
use tracing::{debug, info};

use super::{
    CredentialStore, InterstitialCache, LoadController, OrientationWatcher, Preconditions,
    PresentationGate, RuntimeFlags,
};
use crate::adapters::SystemClock;
use crate::config::{SdkConfig, ValidationError as ConfigValidationError};
use crate::domain::foundation::ValidationError;
use crate::domain::interstitial::{AffiliateError, Appearance, Completion};
use crate::ports::{
    AdFetchClient, AdvertisingIdProvider, Clock, DeviceCapabilities, InterstitialRenderer,
    OrientationSource, StorePagePresenter,
};

/// Errors from [`AffiliateManagerBuilder::build`].
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("missing required collaborator: {0}")]
    MissingCollaborator(&'static str),

    #[error("no Tokio runtime available; build inside a runtime or pass a handle")]
    NoRuntime,

    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigValidationError),

    #[error("invalid credentials in configuration: {0}")]
    InvalidCredentials(#[from] ValidationError),
}

/// Collects collaborators for an [`AffiliateManager`].
#[derive(Default)]
pub struct AffiliateManagerBuilder {
    fetch_client: Option<Arc<dyn AdFetchClient>>,
    renderer: Option<Arc<dyn InterstitialRenderer>>,
    orientation_source: Option<Arc<dyn OrientationSource>>,
    store_page_presenter: Option<Arc<dyn StorePagePresenter>>,
    advertising_id_provider: Option<Arc<dyn AdvertisingIdProvider>>,
    device_capabilities: Option<Arc<dyn DeviceCapabilities>>,
    clock: Option<Arc<dyn Clock>>,
    config: Option<SdkConfig>,
    runtime: Option<Handle>,
}

impl AffiliateManagerBuilder {
    pub fn fetch_client(mut self, client: Arc<dyn AdFetchClient>) -> Self {
        self.fetch_client = Some(client);
        self
    }

    pub fn renderer(mut self, renderer: Arc<dyn InterstitialRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn orientation_source(mut self, source: Arc<dyn OrientationSource>) -> Self {
        self.orientation_source = Some(source);
        self
    }

    pub fn store_page_presenter(mut self, presenter: Arc<dyn StorePagePresenter>) -> Self {
        self.store_page_presenter = Some(presenter);
        self
    }

    /// Enables the advertising identifier precondition for loads.
    pub fn advertising_id_provider(mut self, provider: Arc<dyn AdvertisingIdProvider>) -> Self {
        self.advertising_id_provider = Some(provider);
        self
    }

    pub fn device_capabilities(mut self, capabilities: Arc<dyn DeviceCapabilities>) -> Self {
        self.device_capabilities = Some(capabilities);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Seeds credentials, flags and cache ttl.
    pub fn config(mut self, config: SdkConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Runtime for background fetches and the orientation watcher.
    ///
    /// Defaults to the runtime `build` is called from.
    pub fn runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn build(self) -> Result<AffiliateManager, BuildError> {
        let fetch_client = self
            .fetch_client
            .ok_or(BuildError::MissingCollaborator("fetch_client"))?;
        let renderer = self
            .renderer
            .ok_or(BuildError::MissingCollaborator("renderer"))?;
        let orientation = self
            .orientation_source
            .ok_or(BuildError::MissingCollaborator("orientation_source"))?;
        let runtime = match self.runtime {
            Some(runtime) => runtime,
            None => Handle::try_current().map_err(|_| BuildError::NoRuntime)?,
        };

        let config = self.config.unwrap_or_default();
        config.validate()?;
        let credentials = Arc::new(match config.credentials.to_credentials()? {
            Some(credentials) => CredentialStore::with_credentials(credentials),
            None => CredentialStore::new(),
        });
        let flags = Arc::new(RuntimeFlags::new(&config.features));
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock::new()));
        let cache = Arc::new(InterstitialCache::new(clock.clone()));
        let preconditions = Arc::new(Preconditions::new(
            credentials.clone(),
            renderer.clone(),
            self.device_capabilities.clone(),
            self.advertising_id_provider,
        ));

        let loader = Arc::new(LoadController::new(
            fetch_client,
            preconditions.clone(),
            cache.clone(),
            flags.clone(),
            orientation.clone(),
            clock,
            config.cache.ttl(),
            runtime.clone(),
        ));

        let mut gate = PresentationGate::new(
            cache.clone(),
            preconditions.clone(),
            orientation.clone(),
            renderer,
            flags.clone(),
        );
        if let Some(presenter) = self.store_page_presenter {
            gate = gate.with_store_page_presenter(presenter);
        }
        if let Some(capabilities) = self.device_capabilities {
            gate = gate.with_device_capabilities(capabilities);
        }

        let watcher = OrientationWatcher::spawn(
            orientation.as_ref(),
            cache.clone(),
            loader.clone(),
            flags.clone(),
            &runtime,
        );

        info!(
            configured = credentials.is_configured(),
            test_mode = flags.test_mode(),
            cache_ttl_secs = config.cache.ttl_secs,
            "Affiliate manager ready"
        );

        Ok(AffiliateManager {
            credentials,
            flags,
            cache,
            preconditions,
            orientation,
            loader,
            gate,
            watcher,
        })
    }
}

/// Preloads, caches and presents affiliate interstitials.
pub struct AffiliateManager {
    credentials: Arc<CredentialStore>,
    flags: Arc<RuntimeFlags>,
    cache: Arc<InterstitialCache>,
    preconditions: Arc<Preconditions>,
    orientation: Arc<dyn OrientationSource>,
    loader: Arc<LoadController>,
    gate: PresentationGate,
    watcher: OrientationWatcher,
}

impl AffiliateManager {
    pub fn builder() -> AffiliateManagerBuilder {
        AffiliateManagerBuilder::default()
    }

    /// Sets the app credentials.
    ///
    /// A blank key or secret is rejected and leaves the manager unconfigured,
    /// so later loads fail with `MissingAppCredentials`.
    pub fn configure(
        &self,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Result<(), ValidationError> {
        self.credentials.configure(api_key, api_secret)
    }

    pub fn set_test_mode(&self, enabled: bool) {
        self.flags.set_test_mode(enabled);
    }

    pub fn test_mode_enabled(&self) -> bool {
        self.flags.test_mode()
    }

    pub fn set_auto_reload_on_orientation_change(&self, enabled: bool) {
        self.flags.set_auto_reload_on_orientation_change(enabled);
    }

    pub fn set_allow_in_app_store_screen(&self, allowed: bool) {
        self.flags.set_allow_in_app_store_screen(allowed);
    }

    pub fn set_default_appearance(&self, appearance: Appearance) {
        self.gate.set_default_appearance(appearance);
    }

    pub fn default_appearance(&self) -> Appearance {
        self.gate.default_appearance()
    }

    /// True when credentials are set and the device can show interstitials.
    pub fn can_show_interstitials(&self) -> bool {
        self.preconditions.check_general().is_ok()
    }

    /// Starts (or joins) a background preload. See [`LoadController::preload`].
    pub fn preload(&self, completion: Option<Completion>) {
        self.loader.preload(completion);
    }

    /// Preloads and waits for the outcome.
    pub async fn preload_async(&self) -> Result<(), AffiliateError> {
        self.loader.preload_async().await
    }

    pub fn cancel_loading_interstitial(&self) {
        self.loader.cancel();
    }

    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }

    /// True when a fresh ad for the current orientation is cached.
    pub fn has_preloaded_interstitial(&self) -> bool {
        self.cache.peek(self.orientation.current()).is_ok()
    }

    /// Presents the preloaded interstitial. See [`PresentationGate::show`].
    pub fn show(&self, appearance: Option<Appearance>) -> Result<(), AffiliateError> {
        self.gate.show(appearance)
    }

    pub fn is_presenting(&self) -> bool {
        self.gate.is_presenting()
    }

    /// Stops the orientation watcher and cancels any pending preload.
    ///
    /// Explicit calls to `preload` and `show` keep working afterwards.
    pub fn shutdown(&self) {
        debug!("Shutting down affiliate manager");
        self.watcher.stop();
        self.loader.cancel();
    }
}

impl Drop for AffiliateManager {
    fn drop(&mut self) {
        self.shutdown();
    }
}
