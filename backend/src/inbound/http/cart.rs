//! Cart endpoints.
//!
//! ```text
//! GET    /api/v1/cart
//! POST   /api/v1/cart/items
//! POST   /api/v1/cart/items/{itemId}/increment
//! POST   /api/v1/cart/items/{itemId}/decrement
//! DELETE /api/v1/cart/items/{itemId}
//! PUT    /api/v1/cart/coupon
//! DELETE /api/v1/cart/coupon
//! GET    /api/v1/cart/offers
//! ```
//!
//! Every response carries the full recomputed cart so clients never derive
//! totals themselves.

use actix_web::{HttpResponse, delete, get, post, put, web};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AppliedCoupon, CartOffers, CartSummary, OfferEvaluation, PricedLine};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{missing_field_error, parse_item_id};

/// Request payload for adding an item.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    #[schema(example = 1)]
    pub item_id: Option<u32>,
}

/// Request payload for applying a coupon.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplyCouponRequest {
    #[schema(example = "SAVE10")]
    pub code: Option<String>,
}

/// A priced cart line.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartLineResponse {
    pub id: u32,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 9.99)]
    pub price: Decimal,
    pub image_url: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 19.98)]
    pub line_total: Decimal,
}

impl From<PricedLine> for CartLineResponse {
    fn from(line: PricedLine) -> Self {
        Self {
            id: line.item.id().get(),
            name: line.item.name().to_owned(),
            price: line.item.price(),
            image_url: line.item.image_ref().to_owned(),
            quantity: line.quantity,
            line_total: line.line_total,
        }
    }
}

/// The applied coupon and its effect on the current total.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiscountResponse {
    #[schema(example = "SAVE10")]
    pub code: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 0.1)]
    pub rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 3.097)]
    pub saved_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 27.873)]
    pub discounted_total: Decimal,
}

impl From<AppliedCoupon> for DiscountResponse {
    fn from(applied: AppliedCoupon) -> Self {
        Self {
            code: applied.code.into(),
            rate: applied.rate,
            saved_amount: applied.saved_amount,
            discounted_total: applied.discounted_total,
        }
    }
}

/// Cart view returned by every cart endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLineResponse>,
    /// Sum of quantities, including entries no longer on the menu.
    pub item_count: u64,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 30.97)]
    pub total: Decimal,
    pub discount: Option<DiscountResponse>,
    /// Amount due: the discounted total when a coupon applies.
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 27.873)]
    pub payable: Decimal,
    /// Cart entries that are no longer on the menu.
    pub stale_item_ids: Vec<u32>,
}

impl From<CartSummary> for CartResponse {
    fn from(summary: CartSummary) -> Self {
        Self {
            lines: summary.lines.into_iter().map(CartLineResponse::from).collect(),
            item_count: summary.item_count,
            total: summary.total,
            discount: summary.discount.map(DiscountResponse::from),
            payable: summary.payable,
            stale_item_ids: summary
                .stale_item_ids
                .into_iter()
                .map(|id| id.get())
                .collect(),
        }
    }
}

/// One discount strategy evaluated against the cart.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OfferResponse {
    #[schema(example = "FLAT_50")]
    pub id: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 50.0)]
    pub discount: Decimal,
    pub qualifies: bool,
}

impl From<OfferEvaluation> for OfferResponse {
    fn from(offer: OfferEvaluation) -> Self {
        Self {
            qualifies: offer.qualifies(),
            id: offer.id.to_string(),
            description: offer.description,
            discount: offer.discount,
        }
    }
}

/// Strategy evaluations for the current cart total.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OffersResponse {
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total: Decimal,
    pub offers: Vec<OfferResponse>,
}

impl From<CartOffers> for OffersResponse {
    fn from(value: CartOffers) -> Self {
        Self {
            total: value.total,
            offers: value.offers.into_iter().map(OfferResponse::from).collect(),
        }
    }
}

fn cart_response(summary: CartSummary) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(CartResponse::from(summary))
}

/// Fetch the current cart.
#[utoipa::path(
    get,
    path = "/api/v1/cart",
    responses(
        (
            status = 200,
            description = "Current cart",
            headers(("Cache-Control" = String, description = "Cache control header")),
            body = CartResponse
        ),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["cart"],
    operation_id = "getCart"
)]
#[get("/cart")]
pub async fn get_cart(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let summary = state.cart.view(&session).await?;
    Ok(cart_response(summary))
}

/// Add a menu item with quantity one. Items already in the cart are left as is.
#[utoipa::path(
    post,
    path = "/api/v1/cart/items",
    request_body = AddItemRequest,
    responses(
        (status = 200, description = "Updated cart", body = CartResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Item not on the menu", body = ErrorSchema),
        (status = 503, description = "Menu source unavailable", body = ErrorSchema)
    ),
    tags = ["cart"],
    operation_id = "addCartItem"
)]
#[post("/cart/items")]
pub async fn add_cart_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AddItemRequest>,
) -> ApiResult<HttpResponse> {
    let item_id = payload
        .into_inner()
        .item_id
        .ok_or_else(|| missing_field_error("itemId"))?;
    let summary = state.cart.add_item(&session, item_id.into()).await?;
    Ok(cart_response(summary))
}

/// Raise an item's quantity by one. Unknown items are ignored.
#[utoipa::path(
    post,
    path = "/api/v1/cart/items/{itemId}/increment",
    params(("itemId" = u32, Path, description = "Menu item identifier")),
    responses(
        (status = 200, description = "Updated cart", body = CartResponse),
        (status = 400, description = "Invalid item id", body = ErrorSchema)
    ),
    tags = ["cart"],
    operation_id = "incrementCartItem"
)]
#[post("/cart/items/{item_id}/increment")]
pub async fn increment_cart_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let item_id = parse_item_id(&path, "itemId")?;
    let summary = state.cart.increment(&session, item_id).await?;
    Ok(cart_response(summary))
}

/// Lower an item's quantity by one, removing it at zero.
#[utoipa::path(
    post,
    path = "/api/v1/cart/items/{itemId}/decrement",
    params(("itemId" = u32, Path, description = "Menu item identifier")),
    responses(
        (status = 200, description = "Updated cart", body = CartResponse),
        (status = 400, description = "Invalid item id", body = ErrorSchema)
    ),
    tags = ["cart"],
    operation_id = "decrementCartItem"
)]
#[post("/cart/items/{item_id}/decrement")]
pub async fn decrement_cart_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let item_id = parse_item_id(&path, "itemId")?;
    let summary = state.cart.decrement(&session, item_id).await?;
    Ok(cart_response(summary))
}

/// Drop an item from the cart regardless of quantity.
#[utoipa::path(
    delete,
    path = "/api/v1/cart/items/{itemId}",
    params(("itemId" = u32, Path, description = "Menu item identifier")),
    responses(
        (status = 200, description = "Updated cart", body = CartResponse),
        (status = 400, description = "Invalid item id", body = ErrorSchema)
    ),
    tags = ["cart"],
    operation_id = "removeCartItem"
)]
#[delete("/cart/items/{item_id}")]
pub async fn remove_cart_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let item_id = parse_item_id(&path, "itemId")?;
    let summary = state.cart.remove(&session, item_id).await?;
    Ok(cart_response(summary))
}

/// Apply a coupon code, replacing any coupon already applied.
#[utoipa::path(
    put,
    path = "/api/v1/cart/coupon",
    request_body = ApplyCouponRequest,
    responses(
        (status = 200, description = "Cart with the coupon applied", body = CartResponse),
        (status = 400, description = "Unknown coupon code", body = ErrorSchema)
    ),
    tags = ["cart"],
    operation_id = "applyCoupon"
)]
#[put("/cart/coupon")]
pub async fn apply_coupon(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ApplyCouponRequest>,
) -> ApiResult<HttpResponse> {
    let code = payload
        .into_inner()
        .code
        .ok_or_else(|| missing_field_error("code"))?;
    let summary = state.cart.apply_coupon(&session, &code).await?;
    Ok(cart_response(summary))
}

/// Remove the applied coupon.
#[utoipa::path(
    delete,
    path = "/api/v1/cart/coupon",
    responses((status = 200, description = "Cart without a coupon", body = CartResponse)),
    tags = ["cart"],
    operation_id = "clearCoupon"
)]
#[delete("/cart/coupon")]
pub async fn clear_coupon(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let summary = state.cart.clear_coupon(&session).await?;
    Ok(cart_response(summary))
}

/// Evaluate every discount strategy against the cart total.
#[utoipa::path(
    get,
    path = "/api/v1/cart/offers",
    responses((status = 200, description = "Strategy evaluations", body = OffersResponse)),
    tags = ["cart"],
    operation_id = "getCartOffers"
)]
#[get("/cart/offers")]
pub async fn get_offers(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let offers = state.cart.offers(&session).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(OffersResponse::from(offers)))
}

#[cfg(test)]
#[path = "cart_tests.rs"]
mod tests;
