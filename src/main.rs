//! Affiliate SDK demo driver
//!
//! Runs one preload/show/dismiss cycle against the configured ad backend, or
//! against the mock backend when no credentials are configured.

use std::error::Error;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use affiliate_sdk::adapters::{
    HttpAdFetchClient, HttpAdFetchConfig, InMemoryOrientationSource, MockAdFetchClient,
    RecordingRenderer,
};
use affiliate_sdk::config::{LoggingConfig, SdkConfig};
use affiliate_sdk::ports::AdFetchClient;
use affiliate_sdk::{AffiliateManager, Orientation};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = SdkConfig::load()?;
    init_tracing(&config.logging);
    config.validate()?;

    let fetch_client: Arc<dyn AdFetchClient> = if config.credentials.api_key.is_some() {
        info!(base_url = %config.backend.base_url, "Using ad backend");
        Arc::new(HttpAdFetchClient::new(HttpAdFetchConfig::from(&config.backend))?)
    } else {
        warn!("No credentials configured, using the mock backend");
        Arc::new(MockAdFetchClient::new())
    };
    let offline = config.credentials.api_key.is_none();

    let renderer = Arc::new(RecordingRenderer::new());
    let manager = AffiliateManager::builder()
        .fetch_client(fetch_client)
        .renderer(renderer.clone())
        .orientation_source(Arc::new(InMemoryOrientationSource::new(
            Orientation::Portrait,
        )))
        .config(config)
        .build()?;
    if offline {
        manager.configure("demo-key", "demo-secret")?;
        manager.set_test_mode(true);
    }

    // Concurrent preloads share one backend request.
    let outcomes = join_all((0..3).map(|_| manager.preload_async())).await;
    for (caller, outcome) in outcomes.iter().enumerate() {
        info!(caller, success = outcome.is_ok(), "Preload finished");
    }
    if let Some(Err(err)) = outcomes.first() {
        warn!(error_code = %err.code(), error = %err, "Nothing to show");
        return Ok(());
    }

    match manager.show(None) {
        Ok(()) => {
            if let Some(presentation) = renderer.last() {
                info!(
                    ad_id = %presentation.payload.ad_id,
                    creative_url = %presentation.payload.creative_url,
                    "Interstitial on screen"
                );
                let tap = presentation.open_advertised_app();
                info!(?tap, "Simulated tap");
            }
            renderer.dismiss_last();
            renderer.clear();
        }
        Err(err) => warn!(error_code = %err.code(), error = %err, "Show failed"),
    }

    manager.shutdown();
    Ok(())
}

/// `RUST_LOG` wins over the configured filter.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    if logging.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
