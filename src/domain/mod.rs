//! Domain layer containing the interstitial lifecycle types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (identifiers, timestamps, validation, state machines)
//! - `interstitial` - Ads, orientations, load operations, appearance and error kinds

pub mod foundation;
pub mod interstitial;
