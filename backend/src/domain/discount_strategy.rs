//! Threshold-based discount strategies.
//!
//! Each [`DiscountStrategy`] computes a discount amount from a cart total.
//! Strategies are registered by id in a [`StrategyRegistry`] and resolved
//! explicitly; the registry can also evaluate every strategy against a total
//! so a client can show which offers the cart currently qualifies for.
//!
//! Thresholds are strict: a total equal to the threshold does not qualify.

use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Identifier of a registered strategy, e.g. `FLAT_50`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StrategyId(String);

impl StrategyId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for StrategyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability shared by every discount policy.
pub trait DiscountStrategy: Send + Sync + fmt::Debug {
    fn id(&self) -> &StrategyId;

    fn description(&self) -> &str;

    /// Amount taken off `total`; zero when the policy does not apply.
    fn discount_for(&self, total: Decimal) -> Decimal;
}

/// Fixed amount off once the total exceeds a threshold.
#[derive(Debug, Clone)]
pub struct FlatAmountAboveThreshold {
    id: StrategyId,
    description: String,
    threshold: Decimal,
    amount: Decimal,
}

impl FlatAmountAboveThreshold {
    pub fn new(id: StrategyId, description: impl Into<String>, threshold: Decimal, amount: Decimal) -> Self {
        Self {
            id,
            description: description.into(),
            threshold,
            amount,
        }
    }
}

impl DiscountStrategy for FlatAmountAboveThreshold {
    fn id(&self) -> &StrategyId {
        &self.id
    }

    fn description(&self) -> &str {
        self.description.as_str()
    }

    fn discount_for(&self, total: Decimal) -> Decimal {
        if total > self.threshold {
            self.amount
        } else {
            Decimal::ZERO
        }
    }
}

/// Percentage off once the total exceeds a threshold.
#[derive(Debug, Clone)]
pub struct PercentAboveThreshold {
    id: StrategyId,
    description: String,
    threshold: Decimal,
    rate: Decimal,
}

impl PercentAboveThreshold {
    /// `rate` is a fraction, e.g. `0.10` for ten percent, clamped to `[0, 1]`
    /// so the discount never exceeds the total.
    pub fn new(id: StrategyId, description: impl Into<String>, threshold: Decimal, rate: Decimal) -> Self {
        Self {
            id,
            description: description.into(),
            threshold,
            rate: rate.clamp(Decimal::ZERO, Decimal::ONE),
        }
    }
}

impl DiscountStrategy for PercentAboveThreshold {
    fn id(&self) -> &StrategyId {
        &self.id
    }

    fn description(&self) -> &str {
        self.description.as_str()
    }

    fn discount_for(&self, total: Decimal) -> Decimal {
        if total > self.threshold {
            total * self.rate
        } else {
            Decimal::ZERO
        }
    }
}

/// Shipping fee waived once the total exceeds a threshold.
#[derive(Debug, Clone)]
pub struct ShippingWaiverAboveThreshold {
    id: StrategyId,
    description: String,
    threshold: Decimal,
    shipping_fee: Decimal,
}

impl ShippingWaiverAboveThreshold {
    pub fn new(
        id: StrategyId,
        description: impl Into<String>,
        threshold: Decimal,
        shipping_fee: Decimal,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            threshold,
            shipping_fee,
        }
    }
}

impl DiscountStrategy for ShippingWaiverAboveThreshold {
    fn id(&self) -> &StrategyId {
        &self.id
    }

    fn description(&self) -> &str {
        self.description.as_str()
    }

    fn discount_for(&self, total: Decimal) -> Decimal {
        if total > self.threshold {
            self.shipping_fee
        } else {
            Decimal::ZERO
        }
    }
}

/// One strategy evaluated against a cart total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferEvaluation {
    pub id: StrategyId,
    pub description: String,
    pub discount: Decimal,
}

impl OfferEvaluation {
    pub fn qualifies(&self) -> bool {
        self.discount > Decimal::ZERO
    }
}

/// Ordered set of strategies keyed by id.
#[derive(Debug, Clone, Default)]
pub struct StrategyRegistry {
    strategies: Vec<Arc<dyn DiscountStrategy>>,
}

impl StrategyRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The storefront's built-in offers.
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .with(FlatAmountAboveThreshold::new(
                StrategyId::new("FLAT_50"),
                "Flat ₹50 off on orders above ₹500",
                dec!(500),
                dec!(50),
            ))
            .with(PercentAboveThreshold::new(
                StrategyId::new("PERCENT_10"),
                "10% off on orders above ₹1000",
                dec!(1000),
                dec!(0.10),
            ))
            .with(ShippingWaiverAboveThreshold::new(
                StrategyId::new("FREE_SHIPPING"),
                "Free shipping on orders above ₹1500",
                dec!(1500),
                dec!(100),
            ))
    }

    /// Register a strategy, replacing any existing one with the same id.
    #[must_use]
    pub fn with(mut self, strategy: impl DiscountStrategy + 'static) -> Self {
        self.strategies
            .retain(|existing| existing.id() != strategy.id());
        self.strategies.push(Arc::new(strategy));
        self
    }

    pub fn resolve(&self, id: &StrategyId) -> Option<&dyn DiscountStrategy> {
        self.strategies
            .iter()
            .find(|strategy| strategy.id() == id)
            .map(|strategy| strategy.as_ref())
    }

    pub fn ids(&self) -> impl Iterator<Item = &StrategyId> {
        self.strategies.iter().map(|strategy| strategy.id())
    }

    /// Evaluate every strategy against `total`, in registration order.
    pub fn evaluate(&self, total: Decimal) -> Vec<OfferEvaluation> {
        self.strategies
            .iter()
            .map(|strategy| OfferEvaluation {
                id: strategy.id().clone(),
                description: strategy.description().to_owned(),
                discount: strategy.discount_for(total),
            })
            .collect()
    }
}
