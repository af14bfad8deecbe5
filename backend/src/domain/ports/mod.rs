//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod cart_storage;
mod catalog_repository;

#[cfg(test)]
pub use cart_storage::MockCartStorage;
pub use cart_storage::{CartStorage, CartStorageError, FixtureCartStorage};
#[cfg(test)]
pub use catalog_repository::MockCatalogRepository;
pub use catalog_repository::{CatalogRepository, CatalogRepositoryError, FixtureCatalogRepository};
