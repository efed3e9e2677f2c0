//! Ad fetch adapters - Implementations of the AdFetchClient port.
//!
//! - `HttpAdFetchClient` - Talks to the ad backend over HTTPS
//! - `MockAdFetchClient` - Scripted responses for tests and demos

mod http_client;
mod mock_client;

pub use http_client::{HttpAdFetchClient, HttpAdFetchConfig};
pub use mock_client::{MockAdFetchClient, MockResponse};
