//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint from the inbound layer (menu, cart,
//!   health)
//! - **Schemas**: request and response DTOs plus the domain error wrappers
//!   ([`ErrorSchema`], [`ErrorCodeSchema`]), which keep the domain types free
//!   of utoipa derives
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::cart::{
    AddItemRequest, ApplyCouponRequest, CartLineResponse, CartResponse, DiscountResponse,
    OfferResponse, OffersResponse,
};
use crate::inbound::http::menu::{MenuItemResponse, MenuSchema};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        description = "Menu catalogue, session-held cart and coupon discounts.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::menu::get_menu,
        crate::inbound::http::cart::get_cart,
        crate::inbound::http::cart::add_cart_item,
        crate::inbound::http::cart::increment_cart_item,
        crate::inbound::http::cart::decrement_cart_item,
        crate::inbound::http::cart::remove_cart_item,
        crate::inbound::http::cart::apply_coupon,
        crate::inbound::http::cart::clear_coupon,
        crate::inbound::http::cart::get_offers,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        MenuSchema,
        MenuItemResponse,
        AddItemRequest,
        ApplyCouponRequest,
        CartLineResponse,
        DiscountResponse,
        CartResponse,
        OfferResponse,
        OffersResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "menu", description = "Menu catalogue"),
        (name = "cart", description = "Cart, coupon and offer operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
