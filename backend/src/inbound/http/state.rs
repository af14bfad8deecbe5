//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain services and ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::CartService;
use crate::domain::ports::CatalogRepository;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub cart: CartService<dyn CatalogRepository>,
}

impl HttpState {
    /// Construct state around a catalogue source with the standard coupon book
    /// and discount strategies.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use storefront::inbound::http::state::HttpState;
    /// use storefront::outbound::menu::StaticMenuRepository;
    ///
    /// let state = HttpState::new(Arc::new(StaticMenuRepository));
    /// assert_eq!(state.cart.strategies().ids().count(), 3);
    /// ```
    pub fn new(catalog: Arc<dyn CatalogRepository>) -> Self {
        Self {
            cart: CartService::new(catalog),
        }
    }

    /// Construct state from a preconfigured service.
    pub fn from_service(cart: CartService<dyn CatalogRepository>) -> Self {
        Self { cart }
    }
}
