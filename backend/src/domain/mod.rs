//! Domain primitives, aggregates and services.
//!
//! Purpose: model the storefront's menu, the client's cart and the discount
//! rules independently of HTTP or storage. Adapters reach the domain through
//! the traits in [`ports`].
//!
//! Public surface:
//! - [`Catalog`], [`MenuItem`], [`MenuCategory`]: the read-only menu.
//! - [`Cart`] and [`CartStore`]: cart mutation rules and persistence.
//! - [`CouponBook`] and [`StrategyRegistry`]: discount evaluation.
//! - [`CartService`]: the cart use cases driven by inbound adapters.
//! - [`Error`]: API error payload carried across the hexagon.

pub mod cart;
pub mod cart_service;
pub mod cart_store;
pub mod coupon;
pub mod discount_strategy;
pub mod error;
pub mod menu;
pub mod ports;
pub mod trace_id;

pub use self::cart::{Cart, CartChange, CartDocumentError, CartEntry, PricedCart, PricedLine};
pub use self::cart_service::{CartOffers, CartService, CartSummary};
pub use self::cart_store::CartStore;
pub use self::coupon::{AppliedCoupon, CouponBook, CouponCode, CouponError, INVALID_COUPON_MESSAGE};
pub use self::discount_strategy::{
    DiscountStrategy, FlatAmountAboveThreshold, OfferEvaluation, PercentAboveThreshold,
    ShippingWaiverAboveThreshold, StrategyId, StrategyRegistry,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::menu::{
    Catalog, MAX_ITEM_PRICE, MenuCategory, MenuItem, MenuItemId, MenuItemIdParseError,
    MenuValidationError,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use storefront::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such item"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
