//! On-disk menu document.
//!
//! The document is a JSON object mapping category names to arrays of items:
//!
//! ```json
//! {"burgers": [{"id": 1, "name": "Cheese Burger", "price": 9.99, "imageUrl": "/img/burger.png"}]}
//! ```
//!
//! Category order in the file is preserved.

use std::fmt;

use rust_decimal::Decimal;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::domain::{Catalog, MenuCategory, MenuItem, MenuItemId, MenuValidationError};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct MenuItemDocument {
    id: u32,
    name: String,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    #[serde(alias = "image")]
    image_url: String,
}

/// Categories in file order.
#[derive(Debug, Clone, Default)]
pub(crate) struct MenuDocument(Vec<(String, Vec<MenuItemDocument>)>);

impl<'de> Deserialize<'de> for MenuDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedCategories;

        impl<'de> Visitor<'de> for OrderedCategories {
            type Value = MenuDocument;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an object mapping category names to item arrays")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut categories = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, items)) = access.next_entry::<String, Vec<MenuItemDocument>>()? {
                    categories.push((name, items));
                }
                Ok(MenuDocument(categories))
            }
        }

        deserializer.deserialize_map(OrderedCategories)
    }
}

impl TryFrom<MenuDocument> for Catalog {
    type Error = MenuValidationError;

    fn try_from(document: MenuDocument) -> Result<Self, Self::Error> {
        let categories = document
            .0
            .into_iter()
            .map(|(name, items)| {
                let items = items
                    .into_iter()
                    .map(|item| {
                        MenuItem::new(MenuItemId::new(item.id), item.name, item.price, item.image_url)
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                MenuCategory::new(name, items)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Catalog::new(categories)
    }
}
