//! Persisted cart state for a single client.
//!
//! [`CartStore`] wraps a [`CartStorage`] adapter. Opening a store loads the
//! saved cart and coupon; a missing or unreadable value starts fresh rather
//! than failing. Every mutation that changes the cart is written back in
//! full before the call returns.

use tracing::{debug, warn};

use super::ports::{CartStorage, CartStorageError};
use super::{Cart, CartChange, CouponCode, MenuItemId};

/// A client's cart and applied coupon, bound to their storage.
pub struct CartStore<'s, S: ?Sized> {
    storage: &'s S,
    cart: Cart,
    coupon: Option<CouponCode>,
}

impl<'s, S> CartStore<'s, S>
where
    S: CartStorage + ?Sized,
{
    /// Load prior state from `storage`.
    ///
    /// Read or decode failures are logged and treated as "nothing stored".
    pub fn open(storage: &'s S) -> Self {
        let cart = storage.load().unwrap_or_else(|err| {
            warn!(error = %err, "discarding unreadable cart state");
            None
        });
        let coupon = storage.load_coupon().unwrap_or_else(|err| {
            warn!(error = %err, "discarding unreadable coupon state");
            None
        });
        Self {
            storage,
            cart: cart.unwrap_or_default(),
            coupon,
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn coupon(&self) -> Option<&CouponCode> {
        self.coupon.as_ref()
    }

    pub fn add_item(&mut self, item_id: MenuItemId) -> Result<CartChange, CartStorageError> {
        let change = self.cart.add_item(item_id);
        self.persist(item_id, change)
    }

    pub fn increment(&mut self, item_id: MenuItemId) -> Result<CartChange, CartStorageError> {
        let change = self.cart.increment(item_id);
        self.persist(item_id, change)
    }

    pub fn decrement(&mut self, item_id: MenuItemId) -> Result<CartChange, CartStorageError> {
        let change = self.cart.decrement(item_id);
        self.persist(item_id, change)
    }

    pub fn remove(&mut self, item_id: MenuItemId) -> Result<CartChange, CartStorageError> {
        let change = self.cart.remove(item_id);
        self.persist(item_id, change)
    }

    /// Record `code` as the applied coupon, replacing any previous one.
    pub fn set_coupon(&mut self, code: CouponCode) -> Result<(), CartStorageError> {
        self.storage.save_coupon(Some(code.clone()))?;
        self.coupon = Some(code);
        Ok(())
    }

    /// Drop the applied coupon. Returns whether one was set.
    pub fn clear_coupon(&mut self) -> Result<bool, CartStorageError> {
        if self.coupon.is_none() {
            return Ok(false);
        }
        self.storage.save_coupon(None)?;
        self.coupon = None;
        Ok(true)
    }

    fn persist(
        &self,
        item_id: MenuItemId,
        change: CartChange,
    ) -> Result<CartChange, CartStorageError> {
        if change.is_change() {
            self.storage.save(&self.cart)?;
        }
        debug!(%item_id, ?change, "cart mutation");
        Ok(change)
    }
}
