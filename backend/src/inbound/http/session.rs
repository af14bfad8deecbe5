//! Session-backed cart storage.
//!
//! The client's cart lives in its private session cookie. [`SessionContext`]
//! wraps the Actix session and implements the domain's [`CartStorage`] port
//! so handlers hand it straight to the cart service.
//!
//! Stored keys:
//! - `cart`: the cart document, `{"<id>": {"id": <id>, "quantity": <n>}}`
//! - `coupon`: the applied coupon code

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::ports::{CartStorage, CartStorageError};
use crate::domain::{Cart, CouponCode};

pub(crate) const CART_KEY: &str = "cart";
pub(crate) const COUPON_KEY: &str = "coupon";

/// Newtype wrapper that exposes cart-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }
}

impl CartStorage for SessionContext {
    fn load(&self) -> Result<Option<Cart>, CartStorageError> {
        self.0
            .get::<Cart>(CART_KEY)
            .map_err(|error| CartStorageError::corrupt(error.to_string()))
    }

    fn save(&self, cart: &Cart) -> Result<(), CartStorageError> {
        self.0
            .insert(CART_KEY, cart)
            .map_err(|error| CartStorageError::write(error.to_string()))
    }

    fn load_coupon(&self) -> Result<Option<CouponCode>, CartStorageError> {
        self.0
            .get::<CouponCode>(COUPON_KEY)
            .map_err(|error| CartStorageError::corrupt(error.to_string()))
    }

    fn save_coupon(&self, coupon: Option<CouponCode>) -> Result<(), CartStorageError> {
        match coupon {
            Some(code) => self
                .0
                .insert(COUPON_KEY, code)
                .map_err(|error| CartStorageError::write(error.to_string())),
            None => {
                self.0.remove(COUPON_KEY);
                Ok(())
            }
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
