//! Coupon codes and the discount evaluator.
//!
//! A [`CouponBook`] maps normalised coupon codes to fractional discount
//! rates. Codes are matched case-insensitively after trimming. Only one
//! coupon applies to a cart at a time.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// User-facing message for unrecognised coupon codes.
pub const INVALID_COUPON_MESSAGE: &str = "Invalid coupon code. Please try again.";

/// A trimmed, upper-cased coupon code.
///
/// # Examples
/// ```
/// use storefront::domain::CouponCode;
///
/// let code = CouponCode::parse(" save10 ").expect("non-empty code");
/// assert_eq!(code.as_str(), "SAVE10");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CouponCode(String);

impl CouponCode {
    /// Normalise a raw code. Blank input is rejected.
    pub fn parse(raw: &str) -> Result<Self, CouponError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CouponError::Unrecognised {
                code: raw.to_owned(),
            });
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CouponCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for CouponCode {
    type Error = CouponError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CouponCode> for String {
    fn from(value: CouponCode) -> Self {
        value.0
    }
}

/// Coupon evaluation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CouponError {
    /// The code is blank or not in the book.
    #[error("coupon code {code:?} is not recognised")]
    Unrecognised { code: String },
}

/// A coupon applied to a cart total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedCoupon {
    pub code: CouponCode,
    /// Fraction of the total taken off, e.g. `0.10`.
    pub rate: Decimal,
    /// `total × rate`.
    pub saved_amount: Decimal,
    /// `total × (1 − rate)`.
    pub discounted_total: Decimal,
}

/// Static table of coupon codes and their discount rates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponBook {
    rates: BTreeMap<CouponCode, Decimal>,
}

impl Default for CouponBook {
    fn default() -> Self {
        Self::standard()
    }
}

impl CouponBook {
    /// The storefront's coupons: `SAVE10` (10 % off) and `SAVE20` (20 % off).
    #[must_use]
    pub fn standard() -> Self {
        let rates = [("SAVE10", dec!(0.10)), ("SAVE20", dec!(0.20))]
            .into_iter()
            .map(|(code, rate)| (CouponCode(code.to_owned()), rate))
            .collect();
        Self { rates }
    }

    pub fn rate_for(&self, code: &CouponCode) -> Option<Decimal> {
        self.rates.get(code).copied()
    }

    /// Evaluate `raw_code` against `total`.
    ///
    /// # Examples
    /// ```
    /// use rust_decimal_macros::dec;
    /// use storefront::domain::CouponBook;
    ///
    /// let book = CouponBook::standard();
    /// let applied = book.apply(dec!(30.97), "save10").expect("known coupon");
    /// assert_eq!(applied.discounted_total, dec!(27.873));
    /// assert_eq!(applied.saved_amount, dec!(3.097));
    /// assert!(book.apply(dec!(30.97), "BOGUS").is_err());
    /// ```
    pub fn apply(&self, total: Decimal, raw_code: &str) -> Result<AppliedCoupon, CouponError> {
        let code = CouponCode::parse(raw_code)?;
        self.apply_code(total, &code)
    }

    /// Evaluate an already-normalised code against `total`.
    pub fn apply_code(&self, total: Decimal, code: &CouponCode) -> Result<AppliedCoupon, CouponError> {
        let rate = self
            .rate_for(code)
            .ok_or_else(|| CouponError::Unrecognised {
                code: code.to_string(),
            })?;
        let saved_amount = total * rate;
        Ok(AppliedCoupon {
            code: code.clone(),
            rate,
            saved_amount,
            discounted_total: total - saved_amount,
        })
    }
}
