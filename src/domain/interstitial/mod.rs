//! Interstitial module - The ad lifecycle vocabulary.
//!
//! Ads are fetched for one orientation, cached as an [`AdEntry`] with a
//! time-to-live, and shown at most once. Fetches are tracked as
//! [`LoadOperation`]s whose listeners are notified exactly once.

mod ad;
mod appearance;
mod credentials;
mod errors;
mod load_operation;
mod orientation;

pub use ad::{AdEntry, AdPayload, AdTarget, CacheMiss};
pub use appearance::{AnimationKind, Appearance, Color};
pub use credentials::Credentials;
pub use errors::{AffiliateError, ErrorCode};
pub use load_operation::{Completion, LoadOperation, LoadStatus};
pub use orientation::Orientation;
