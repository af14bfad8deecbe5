//! Built-in menu served when no menu file is configured.

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::ports::{CatalogRepository, CatalogRepositoryError};
use crate::domain::{Catalog, MenuCategory, MenuItem, MenuItemId};

const IMAGE: &str = "/img/burger.png";

const BURGERS: [(u32, &str, Decimal); 3] = [
    (1, "Cheese Burger", dec!(9.99)),
    (2, "Paneer Burger", dec!(7.99)),
    (3, "Chili Paneer Burger", dec!(12.99)),
];

const PIZZAS: [(u32, &str, Decimal); 3] = [
    (4, "Margherita Pizza", dec!(10.99)),
    (5, "Pepperoni Pizza", dec!(11.99)),
    (6, "Veggie Pizza", dec!(8.99)),
];

/// Serves the storefront's fixed burgers-and-pizzas menu.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticMenuRepository;

impl StaticMenuRepository {
    fn category(
        name: &str,
        items: &[(u32, &str, Decimal)],
    ) -> Result<MenuCategory, CatalogRepositoryError> {
        let items = items
            .iter()
            .map(|&(id, name, price)| MenuItem::new(MenuItemId::new(id), name, price, IMAGE))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| CatalogRepositoryError::query(err.to_string()))?;
        MenuCategory::new(name, items).map_err(|err| CatalogRepositoryError::query(err.to_string()))
    }
}

#[async_trait]
impl CatalogRepository for StaticMenuRepository {
    async fn menu(&self) -> Result<Catalog, CatalogRepositoryError> {
        let categories = vec![
            Self::category("burgers", &BURGERS)?,
            Self::category("pizzas", &PIZZAS)?,
        ];
        Catalog::new(categories).map_err(|err| CatalogRepositoryError::query(err.to_string()))
    }
}
