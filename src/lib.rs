//! Affiliate SDK - Interstitial ad lifecycle for host applications
//!
//! This crate preloads full-screen affiliate interstitials from the ad
//! backend, caches one ready ad per device orientation, and hands it to a
//! host-provided renderer on demand.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

/// Version string reported to the ad backend.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

pub use application::{AffiliateManager, AffiliateManagerBuilder, BuildError};
pub use domain::interstitial::{AffiliateError, Appearance, Completion, ErrorCode, Orientation};
