//! Read-side port for the menu catalogue.
//!
//! The catalogue is fixed for the lifetime of the process from the
//! storefront's point of view: adapters expose a single retrieval operation
//! and no mutations.

use async_trait::async_trait;

use crate::domain::Catalog;

use super::define_port_error;

define_port_error! {
    /// Errors raised when reading the menu catalogue.
    pub enum CatalogRepositoryError {
        /// The catalogue source could not be reached.
        Connection { message: String } =>
            "menu source unavailable: {message}",
        /// The catalogue source answered with data that could not be used.
        Query { message: String } =>
            "menu source returned invalid data: {message}",
    }
}

/// Port for fetching the current menu.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Return the full catalogue, categories in presentation order.
    async fn menu(&self) -> Result<Catalog, CatalogRepositoryError>;
}

/// Fixture implementation serving an empty catalogue.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCatalogRepository;

#[async_trait]
impl CatalogRepository for FixtureCatalogRepository {
    async fn menu(&self) -> Result<Catalog, CatalogRepositoryError> {
        Ok(Catalog::empty())
    }
}
