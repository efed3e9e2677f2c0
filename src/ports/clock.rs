//! Clock port - Source of the current time.
//!
//! Cache expiry is time-dependent; injecting the clock keeps expiry checks
//! deterministic under test.

use crate::domain::foundation::Timestamp;

/// Port for reading the current time.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> Timestamp;
}
