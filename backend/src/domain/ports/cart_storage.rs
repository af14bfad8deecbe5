//! Persistence port for client-held cart state.
//!
//! The cart never lives on the server. Adapters read and write whatever
//! client-local storage the request carries (in production, the encrypted
//! session cookie). Two values are stored: the cart document and the code of
//! the applied coupon.
//!
//! The port is synchronous and carries no `Send`/`Sync` bound because storage
//! is scoped to a single request.

use std::cell::RefCell;

use crate::domain::{Cart, CouponCode};

use super::define_port_error;

define_port_error! {
    /// Errors raised by cart storage adapters.
    pub enum CartStorageError {
        /// State could not be written back.
        Write { message: String } =>
            "cart storage write failed: {message}",
        /// Stored state was read but does not describe a valid cart.
        Corrupt { message: String } =>
            "stored cart state is corrupt: {message}",
    }
}

/// Port for loading and saving the client's cart.
#[cfg_attr(test, mockall::automock)]
pub trait CartStorage {
    /// Load the stored cart, or `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Cart>, CartStorageError>;

    /// Replace the stored cart with `cart`.
    fn save(&self, cart: &Cart) -> Result<(), CartStorageError>;

    /// Load the applied coupon code, if any.
    fn load_coupon(&self) -> Result<Option<CouponCode>, CartStorageError>;

    /// Store `coupon` as the applied code; `None` clears it.
    fn save_coupon(&self, coupon: Option<CouponCode>) -> Result<(), CartStorageError>;
}

/// In-memory storage for tests and tools that run without a session.
#[derive(Debug, Default)]
pub struct FixtureCartStorage {
    cart: RefCell<Option<Cart>>,
    coupon: RefCell<Option<CouponCode>>,
}

impl FixtureCartStorage {
    /// Storage pre-populated with `cart`.
    pub fn with_cart(cart: Cart) -> Self {
        Self {
            cart: RefCell::new(Some(cart)),
            coupon: RefCell::default(),
        }
    }

    /// The currently stored cart, if any.
    pub fn stored_cart(&self) -> Option<Cart> {
        self.cart.borrow().clone()
    }

    /// The currently stored coupon, if any.
    pub fn stored_coupon(&self) -> Option<CouponCode> {
        self.coupon.borrow().clone()
    }
}

impl CartStorage for FixtureCartStorage {
    fn load(&self) -> Result<Option<Cart>, CartStorageError> {
        Ok(self.stored_cart())
    }

    fn save(&self, cart: &Cart) -> Result<(), CartStorageError> {
        self.cart.replace(Some(cart.clone()));
        Ok(())
    }

    fn load_coupon(&self) -> Result<Option<CouponCode>, CartStorageError> {
        Ok(self.stored_coupon())
    }

    fn save_coupon(&self, coupon: Option<CouponCode>) -> Result<(), CartStorageError> {
        self.coupon.replace(coupon);
        Ok(())
    }
}
