//! Menu catalogue primitives.
//!
//! A [`Catalog`] is an ordered list of categories, each holding an ordered
//! list of [`MenuItem`]s. It is immutable once built and read-only for the
//! lifetime of a session. Item identifiers are unique across the whole
//! catalogue, not just within a category, so a cart can reference an item by
//! id alone.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Highest accepted item price. Any cart priced against a catalogue that
/// respects it fits in a [`Decimal`] even at `u32::MAX` quantities.
pub const MAX_ITEM_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Stable identifier of a menu item.
///
/// Serialises as a bare integer; parses from its canonical decimal string
/// form so it can be used as a JSON object key. Whitespace, signs and
/// leading zeros are rejected, so each id has exactly one key.
///
/// # Examples
/// ```
/// use storefront::domain::MenuItemId;
///
/// let id: MenuItemId = "4".parse().expect("numeric id");
/// assert_eq!(id, MenuItemId::new(4));
/// assert!(" 4".parse::<MenuItemId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuItemId(u32);

impl MenuItemId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Return the raw identifier.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for MenuItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raised when a string is not the canonical form of a [`MenuItemId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{raw:?} is not a menu item id")]
pub struct MenuItemIdParseError {
    raw: String,
}

impl FromStr for MenuItemId {
    type Err = MenuItemIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let canonical = s.bytes().all(|byte| byte.is_ascii_digit())
            && (s == "0" || !s.starts_with('0'));
        canonical
            .then(|| s.parse::<u32>().ok())
            .flatten()
            .map(Self)
            .ok_or_else(|| MenuItemIdParseError { raw: s.to_owned() })
    }
}

impl From<u32> for MenuItemId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Validation failures raised while building menu values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuValidationError {
    /// Item name is blank.
    #[error("menu item {id} must have a name")]
    EmptyItemName { id: MenuItemId },
    /// Item price is below zero.
    #[error("menu item {id} has a negative price: {price}")]
    NegativePrice { id: MenuItemId, price: Decimal },
    /// Item price exceeds [`MAX_ITEM_PRICE`].
    #[error("menu item {id} price {price} exceeds {max}", max = MAX_ITEM_PRICE)]
    PriceTooLarge { id: MenuItemId, price: Decimal },
    /// Category name is blank.
    #[error("menu category names must not be empty")]
    EmptyCategoryName,
    /// Two categories share a name.
    #[error("menu category {name} appears more than once")]
    DuplicateCategory { name: String },
    /// Two items share an identifier.
    #[error("menu item id {id} appears more than once")]
    DuplicateItemId { id: MenuItemId },
}

/// A purchasable menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    id: MenuItemId,
    name: String,
    price: Decimal,
    image_ref: String,
}

impl MenuItem {
    /// Validate and build a menu item.
    ///
    /// # Examples
    /// ```
    /// use rust_decimal_macros::dec;
    /// use storefront::domain::{MenuItem, MenuItemId};
    ///
    /// let item = MenuItem::new(MenuItemId::new(1), "Cheese Burger", dec!(9.99), "/img/burger.png")
    ///     .expect("valid item");
    /// assert_eq!(item.price(), dec!(9.99));
    /// ```
    pub fn new(
        id: MenuItemId,
        name: impl Into<String>,
        price: Decimal,
        image_ref: impl Into<String>,
    ) -> Result<Self, MenuValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(MenuValidationError::EmptyItemName { id });
        }
        if price.is_sign_negative() && !price.is_zero() {
            return Err(MenuValidationError::NegativePrice { id, price });
        }
        if price > MAX_ITEM_PRICE {
            return Err(MenuValidationError::PriceTooLarge { id, price });
        }
        Ok(Self {
            id,
            name,
            price,
            image_ref: image_ref.into(),
        })
    }

    pub fn id(&self) -> MenuItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Image location as supplied by the catalogue source (usually a URL path).
    pub fn image_ref(&self) -> &str {
        self.image_ref.as_str()
    }
}

/// Named, ordered group of menu items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuCategory {
    name: String,
    items: Vec<MenuItem>,
}

impl MenuCategory {
    /// Build a category, rejecting blank names.
    pub fn new(name: impl Into<String>, items: Vec<MenuItem>) -> Result<Self, MenuValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(MenuValidationError::EmptyCategoryName);
        }
        Ok(Self { name, items })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }
}

/// Read-only catalogue with an id index for price lookups.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: Vec<MenuCategory>,
    index: HashMap<MenuItemId, MenuItem>,
}

impl Catalog {
    /// Build a catalogue, enforcing unique category names and item ids.
    pub fn new(categories: Vec<MenuCategory>) -> Result<Self, MenuValidationError> {
        let mut names = HashSet::new();
        let mut index = HashMap::new();
        for category in &categories {
            if !names.insert(category.name()) {
                return Err(MenuValidationError::DuplicateCategory {
                    name: category.name().to_owned(),
                });
            }
            for item in category.items() {
                if index.insert(item.id(), item.clone()).is_some() {
                    return Err(MenuValidationError::DuplicateItemId { id: item.id() });
                }
            }
        }
        Ok(Self { categories, index })
    }

    /// Catalogue with no categories; used when the menu source fails.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn categories(&self) -> &[MenuCategory] {
        &self.categories
    }

    pub fn item(&self, id: MenuItemId) -> Option<&MenuItem> {
        self.index.get(&id)
    }

    pub fn price_of(&self, id: MenuItemId) -> Option<Decimal> {
        self.item(id).map(MenuItem::price)
    }

    pub fn contains(&self, id: MenuItemId) -> bool {
        self.index.contains_key(&id)
    }
}

impl PartialEq for Catalog {
    fn eq(&self, other: &Self) -> bool {
        self.categories == other.categories
    }
}

impl Eq for Catalog {}
