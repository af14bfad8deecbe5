//! Cart use cases.
//!
//! [`CartService`] combines the catalogue port, the coupon book and the
//! strategy registry with a request's [`CartStorage`] to answer every cart
//! operation with a freshly computed [`CartSummary`].
//!
//! Only the applied coupon's code is persisted. Its discount is recomputed
//! from the current total on every summary, so adding or removing items
//! never leaves a stale discounted total behind.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::json;
use tracing::{debug, warn};

use super::ports::{CartStorage, CartStorageError, CatalogRepository, CatalogRepositoryError};
use super::{
    AppliedCoupon, CartChange, CartStore, Catalog, CouponBook, CouponError, Error,
    INVALID_COUPON_MESSAGE, MenuItemId, OfferEvaluation, PricedLine, StrategyRegistry,
};

/// Priced view of a client's cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary {
    pub lines: Vec<PricedLine>,
    pub item_count: u64,
    pub total: Decimal,
    /// Applied coupon evaluated against `total`.
    pub discount: Option<AppliedCoupon>,
    /// Discounted total when a coupon applies, otherwise `total`.
    pub payable: Decimal,
    /// Cart entries the catalogue no longer lists.
    pub stale_item_ids: Vec<MenuItemId>,
}

/// Strategy evaluations for a cart total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartOffers {
    pub total: Decimal,
    pub offers: Vec<OfferEvaluation>,
}

/// Cart operations over a catalogue source.
pub struct CartService<C: ?Sized> {
    catalog: Arc<C>,
    coupons: CouponBook,
    strategies: StrategyRegistry,
}

impl<C: ?Sized> Clone for CartService<C> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            coupons: self.coupons.clone(),
            strategies: self.strategies.clone(),
        }
    }
}

impl<C: ?Sized> CartService<C> {
    /// Service with the standard coupon book and strategy registry.
    pub fn new(catalog: Arc<C>) -> Self {
        Self::with_policies(catalog, CouponBook::standard(), StrategyRegistry::standard())
    }

    pub fn with_policies(catalog: Arc<C>, coupons: CouponBook, strategies: StrategyRegistry) -> Self {
        Self {
            catalog,
            coupons,
            strategies,
        }
    }

    pub fn strategies(&self) -> &StrategyRegistry {
        &self.strategies
    }
}

impl<C> CartService<C>
where
    C: CatalogRepository + ?Sized,
{
    fn map_catalog_error(error: CatalogRepositoryError) -> Error {
        match error {
            CatalogRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("menu unavailable: {message}"))
            }
            CatalogRepositoryError::Query { message } => {
                Error::service_unavailable(format!("menu could not be read: {message}"))
            }
        }
    }

    fn map_storage_error(error: CartStorageError) -> Error {
        Error::internal(format!("cart could not be saved: {error}"))
    }

    /// Fetch the catalogue, failing when the source is unavailable.
    pub async fn menu(&self) -> Result<Catalog, Error> {
        self.catalog.menu().await.map_err(Self::map_catalog_error)
    }

    async fn menu_or_empty(&self) -> Catalog {
        self.catalog.menu().await.unwrap_or_else(|err| {
            warn!(error = %err, "menu unavailable; pricing cart against an empty catalogue");
            Catalog::empty()
        })
    }

    fn summarise<S: CartStorage + ?Sized>(&self, store: &CartStore<'_, S>, catalog: &Catalog) -> CartSummary {
        let priced = store.cart().price(catalog);
        let discount = store.coupon().and_then(|code| {
            self.coupons
                .apply_code(priced.total, code)
                .inspect_err(|err| debug!(error = %err, "stored coupon no longer applies"))
                .ok()
        });
        let payable = discount
            .as_ref()
            .map_or(priced.total, |applied| applied.discounted_total);
        CartSummary {
            lines: priced.lines,
            item_count: priced.item_count,
            total: priced.total,
            discount,
            payable,
            stale_item_ids: priced.stale_item_ids,
        }
    }

    async fn mutate<S, F>(&self, storage: &S, op: F) -> Result<CartSummary, Error>
    where
        S: CartStorage + ?Sized,
        F: FnOnce(&mut CartStore<'_, S>) -> Result<CartChange, CartStorageError>,
    {
        let catalog = self.menu_or_empty().await;
        let mut store = CartStore::open(storage);
        op(&mut store).map_err(Self::map_storage_error)?;
        Ok(self.summarise(&store, &catalog))
    }

    /// Current cart, priced against the catalogue.
    pub async fn view<S: CartStorage + ?Sized>(&self, storage: &S) -> Result<CartSummary, Error> {
        let catalog = self.menu_or_empty().await;
        let store = CartStore::open(storage);
        Ok(self.summarise(&store, &catalog))
    }

    /// Add a catalogue item with quantity one; existing entries are untouched.
    ///
    /// Unlike the other mutations this needs the catalogue to validate the
    /// id, so an unavailable menu is an error here.
    pub async fn add_item<S: CartStorage + ?Sized>(
        &self,
        storage: &S,
        item_id: MenuItemId,
    ) -> Result<CartSummary, Error> {
        let catalog = self.menu().await?;
        if !catalog.contains(item_id) {
            return Err(Error::not_found(format!("menu item {item_id} not found"))
                .with_details(json!({ "code": "unknown_item", "itemId": item_id })));
        }
        let mut store = CartStore::open(storage);
        store.add_item(item_id).map_err(Self::map_storage_error)?;
        Ok(self.summarise(&store, &catalog))
    }

    pub async fn increment<S: CartStorage + ?Sized>(
        &self,
        storage: &S,
        item_id: MenuItemId,
    ) -> Result<CartSummary, Error> {
        self.mutate(storage, |store| store.increment(item_id)).await
    }

    pub async fn decrement<S: CartStorage + ?Sized>(
        &self,
        storage: &S,
        item_id: MenuItemId,
    ) -> Result<CartSummary, Error> {
        self.mutate(storage, |store| store.decrement(item_id)).await
    }

    pub async fn remove<S: CartStorage + ?Sized>(
        &self,
        storage: &S,
        item_id: MenuItemId,
    ) -> Result<CartSummary, Error> {
        self.mutate(storage, |store| store.remove(item_id)).await
    }

    /// Apply a coupon code, replacing any coupon already applied.
    ///
    /// An unrecognised code leaves the cart and its current coupon untouched.
    pub async fn apply_coupon<S: CartStorage + ?Sized>(
        &self,
        storage: &S,
        raw_code: &str,
    ) -> Result<CartSummary, Error> {
        let catalog = self.menu_or_empty().await;
        let mut store = CartStore::open(storage);
        let total = store.cart().total(&catalog);
        let applied = self
            .coupons
            .apply(total, raw_code)
            .map_err(|err: CouponError| {
                debug!(error = %err, "coupon rejected");
                Error::invalid_request(INVALID_COUPON_MESSAGE)
                    .with_details(json!({ "code": "invalid_coupon", "coupon": raw_code }))
            })?;
        debug!(code = %applied.code, saved = %applied.saved_amount, "coupon applied");
        store
            .set_coupon(applied.code)
            .map_err(Self::map_storage_error)?;
        Ok(self.summarise(&store, &catalog))
    }

    /// Remove the applied coupon, if any.
    pub async fn clear_coupon<S: CartStorage + ?Sized>(&self, storage: &S) -> Result<CartSummary, Error> {
        let catalog = self.menu_or_empty().await;
        let mut store = CartStore::open(storage);
        store.clear_coupon().map_err(Self::map_storage_error)?;
        Ok(self.summarise(&store, &catalog))
    }

    /// Evaluate every registered strategy against the cart total.
    pub async fn offers<S: CartStorage + ?Sized>(&self, storage: &S) -> Result<CartOffers, Error> {
        let catalog = self.menu_or_empty().await;
        let store = CartStore::open(storage);
        let total = store.cart().total(&catalog);
        Ok(CartOffers {
            total,
            offers: self.strategies.evaluate(total),
        })
    }
}

#[cfg(test)]
#[path = "cart_service_tests.rs"]
mod tests;
