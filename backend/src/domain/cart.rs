//! Cart aggregate.
//!
//! A [`Cart`] maps menu item ids to quantities. Quantities are always at
//! least one: decrementing an entry to zero removes it. Operations on ids
//! that are not in the cart are no-ops and never fail.
//!
//! The cart is joined against a [`Catalog`] only when pricing. Entries whose
//! id is missing from the catalogue are skipped (they contribute nothing to
//! the total) and reported as stale.
//!
//! ## Persisted form
//!
//! The cart serialises as a JSON object keyed by the string form of the item
//! id, each value repeating the id alongside the quantity:
//!
//! ```json
//! {"1": {"id": 1, "quantity": 2}, "4": {"id": 4, "quantity": 1}}
//! ```

use std::collections::BTreeMap;
use std::num::NonZeroU32;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Catalog, MenuItem, MenuItemId};

/// A single cart line: an item id and a positive quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartEntry {
    item_id: MenuItemId,
    quantity: NonZeroU32,
}

impl CartEntry {
    pub fn item_id(&self) -> MenuItemId {
        self.item_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity.get()
    }
}

/// Outcome of a cart mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// A new entry was inserted with quantity one.
    Added,
    /// An existing entry's quantity grew to `quantity`.
    Incremented { quantity: u32 },
    /// An existing entry's quantity shrank to `quantity` (still positive).
    Decremented { quantity: u32 },
    /// The entry was dropped from the cart.
    Removed,
    /// Nothing changed.
    Unchanged,
}

impl CartChange {
    /// Whether the mutation altered the cart and so must be persisted.
    #[must_use]
    pub const fn is_change(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// The user's current selection.
///
/// # Examples
/// ```
/// use storefront::domain::{Cart, CartChange, MenuItemId};
///
/// let mut cart = Cart::new();
/// let burger = MenuItemId::new(1);
/// assert_eq!(cart.add_item(burger), CartChange::Added);
/// assert_eq!(cart.add_item(burger), CartChange::Unchanged);
/// assert_eq!(cart.decrement(burger), CartChange::Removed);
/// assert!(cart.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CartDocument", into = "CartDocument")]
pub struct Cart {
    entries: BTreeMap<MenuItemId, CartEntry>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `item_id` with quantity one unless it is already present.
    ///
    /// Adding an item that is already in the cart leaves its quantity alone.
    pub fn add_item(&mut self, item_id: MenuItemId) -> CartChange {
        if self.entries.contains_key(&item_id) {
            return CartChange::Unchanged;
        }
        self.entries.insert(
            item_id,
            CartEntry {
                item_id,
                quantity: NonZeroU32::MIN,
            },
        );
        CartChange::Added
    }

    /// Raise the quantity of an existing entry by one.
    pub fn increment(&mut self, item_id: MenuItemId) -> CartChange {
        let Some(entry) = self.entries.get_mut(&item_id) else {
            return CartChange::Unchanged;
        };
        match entry.quantity.checked_add(1) {
            Some(quantity) => {
                entry.quantity = quantity;
                CartChange::Incremented {
                    quantity: quantity.get(),
                }
            }
            None => CartChange::Unchanged,
        }
    }

    /// Lower the quantity of an existing entry by one, removing it at zero.
    pub fn decrement(&mut self, item_id: MenuItemId) -> CartChange {
        let Some(entry) = self.entries.get_mut(&item_id) else {
            return CartChange::Unchanged;
        };
        match NonZeroU32::new(entry.quantity.get() - 1) {
            Some(quantity) => {
                entry.quantity = quantity;
                CartChange::Decremented {
                    quantity: quantity.get(),
                }
            }
            None => {
                self.entries.remove(&item_id);
                CartChange::Removed
            }
        }
    }

    /// Drop an entry regardless of its quantity.
    pub fn remove(&mut self, item_id: MenuItemId) -> CartChange {
        match self.entries.remove(&item_id) {
            Some(_) => CartChange::Removed,
            None => CartChange::Unchanged,
        }
    }

    pub fn entry(&self, item_id: MenuItemId) -> Option<&CartEntry> {
        self.entries.get(&item_id)
    }

    pub fn quantity_of(&self, item_id: MenuItemId) -> Option<u32> {
        self.entry(item_id).map(CartEntry::quantity)
    }

    /// Entries ordered by item id.
    pub fn entries(&self) -> impl Iterator<Item = &CartEntry> {
        self.entries.values()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct items.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Sum of quantities across every entry, stale or not.
    pub fn item_count(&self) -> u64 {
        self.entries().map(|entry| u64::from(entry.quantity())).sum()
    }

    /// Sum of `quantity × price` over entries known to `catalog`.
    ///
    /// # Examples
    /// ```
    /// use rust_decimal_macros::dec;
    /// use storefront::domain::{Cart, Catalog, MenuItemId};
    ///
    /// let mut cart = Cart::new();
    /// cart.add_item(MenuItemId::new(7));
    /// assert_eq!(cart.total(&Catalog::empty()), dec!(0));
    /// ```
    pub fn total(&self, catalog: &Catalog) -> Decimal {
        self.entries()
            .filter_map(|entry| {
                catalog
                    .price_of(entry.item_id())
                    .map(|price| price * Decimal::from(entry.quantity()))
            })
            .sum()
    }

    /// Join the cart against `catalog`, skipping entries it does not know.
    pub fn price(&self, catalog: &Catalog) -> PricedCart {
        let mut lines = Vec::with_capacity(self.len());
        let mut stale_item_ids = Vec::new();
        for entry in self.entries() {
            match catalog.item(entry.item_id()) {
                Some(item) => lines.push(PricedLine {
                    item: item.clone(),
                    quantity: entry.quantity(),
                    line_total: item.price() * Decimal::from(entry.quantity()),
                }),
                None => stale_item_ids.push(entry.item_id()),
            }
        }
        let total = lines.iter().map(|line| line.line_total).sum();
        PricedCart {
            lines,
            stale_item_ids,
            total,
            item_count: self.item_count(),
        }
    }
}

/// A cart entry joined with its catalogue item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    pub item: MenuItem,
    pub quantity: u32,
    pub line_total: Decimal,
}

/// Result of pricing a cart against a catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedCart {
    /// Lines for entries the catalogue knows, ordered by item id.
    pub lines: Vec<PricedLine>,
    /// Entries skipped because the catalogue no longer lists them.
    pub stale_item_ids: Vec<MenuItemId>,
    /// Sum of line totals.
    pub total: Decimal,
    /// Sum of quantities across all entries, including stale ones.
    pub item_count: u64,
}

/// Reasons a persisted cart document is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartDocumentError {
    /// A key is not a decimal item id.
    #[error("cart key {key:?} is not an item id")]
    InvalidKey { key: String },
    /// A key disagrees with the id stored in its value.
    #[error("cart key {key:?} does not match entry id {id}")]
    MismatchedId { key: String, id: MenuItemId },
    /// A stored quantity is zero.
    #[error("cart entry {id} has a zero quantity")]
    ZeroQuantity { id: MenuItemId },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CartEntryDocument {
    id: MenuItemId,
    quantity: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct CartDocument(BTreeMap<String, CartEntryDocument>);

impl From<Cart> for CartDocument {
    fn from(cart: Cart) -> Self {
        Self(
            cart.entries
                .into_values()
                .map(|entry| {
                    (
                        entry.item_id.to_string(),
                        CartEntryDocument {
                            id: entry.item_id,
                            quantity: entry.quantity.get(),
                        },
                    )
                })
                .collect(),
        )
    }
}

impl TryFrom<CartDocument> for Cart {
    type Error = CartDocumentError;

    fn try_from(document: CartDocument) -> Result<Self, Self::Error> {
        let mut entries = BTreeMap::new();
        for (key, value) in document.0 {
            let key_id = key
                .parse::<MenuItemId>()
                .map_err(|_| CartDocumentError::InvalidKey { key: key.clone() })?;
            if key_id != value.id {
                return Err(CartDocumentError::MismatchedId { key, id: value.id });
            }
            let quantity = NonZeroU32::new(value.quantity)
                .ok_or(CartDocumentError::ZeroQuantity { id: value.id })?;
            entries.insert(
                key_id,
                CartEntry {
                    item_id: key_id,
                    quantity,
                },
            );
        }
        Ok(Self { entries })
    }
}
