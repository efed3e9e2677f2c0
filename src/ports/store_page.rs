//! StorePagePresenter port - In-app store page for advertised apps.
//!
//! Optional collaborator. When it is missing, unavailable, or disabled by
//! configuration, taps fall back to opening the ad's web URL.

/// Port for presenting an app store product page inside the host app.
pub trait StorePagePresenter: Send + Sync {
    /// Presents the page for `product_id`.
    ///
    /// Returns false if the page could not be shown (framework missing,
    /// product unknown), in which case the caller falls back to the web URL.
    fn present_store_page(&self, product_id: &str) -> bool;
}
