//! Menu endpoint.
//!
//! ```text
//! GET /api/v1/menu
//! ```

use std::collections::BTreeMap;

use actix_web::{HttpResponse, get, web};
use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeMap, Serializer};
use utoipa::ToSchema;

use crate::domain::{Catalog, MenuItem};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::public_short_lived_header;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// A single menu entry as presented to clients.
#[derive(Debug, Clone, PartialEq, serde::Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemResponse {
    #[schema(example = 1)]
    pub id: u32,
    #[schema(example = "Cheese Burger")]
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 9.99)]
    pub price: Decimal,
    #[schema(example = "/img/burger.png")]
    pub image_url: String,
}

impl From<&MenuItem> for MenuItemResponse {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id().get(),
            name: item.name().to_owned(),
            price: item.price(),
            image_url: item.image_ref().to_owned(),
        }
    }
}

/// Menu keyed by category name, categories in presentation order.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuResponse(Vec<(String, Vec<MenuItemResponse>)>);

impl MenuResponse {
    pub fn categories(&self) -> impl Iterator<Item = (&str, &[MenuItemResponse])> {
        self.0
            .iter()
            .map(|(name, items)| (name.as_str(), items.as_slice()))
    }
}

impl From<&Catalog> for MenuResponse {
    fn from(catalog: &Catalog) -> Self {
        Self(
            catalog
                .categories()
                .iter()
                .map(|category| {
                    (
                        category.name().to_owned(),
                        category.items().iter().map(MenuItemResponse::from).collect(),
                    )
                })
                .collect(),
        )
    }
}

impl Serialize for MenuResponse {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, items) in &self.0 {
            map.serialize_entry(name, items)?;
        }
        map.end()
    }
}

/// OpenAPI shape of [`MenuResponse`].
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MenuSchema(BTreeMap<String, Vec<MenuItemResponse>>);

/// Fetch the menu catalogue.
#[utoipa::path(
    get,
    path = "/api/v1/menu",
    description = "Menu items grouped by category, in presentation order.",
    responses(
        (
            status = 200,
            description = "Menu catalogue",
            headers(("Cache-Control" = String, description = "Cache control header")),
            body = MenuSchema
        ),
        (status = 503, description = "Menu source unavailable", body = ErrorSchema)
    ),
    tags = ["menu"],
    operation_id = "getMenu"
)]
#[get("/menu")]
pub async fn get_menu(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let catalog = state.cart.menu().await?;
    Ok(HttpResponse::Ok()
        .insert_header(public_short_lived_header())
        .json(MenuResponse::from(&catalog)))
}
