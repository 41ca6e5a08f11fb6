pub mod catalog;
pub mod sqlite;

pub use catalog::{CatalogStore, SqliteCatalog};
pub use sqlite::{create_in_memory_pool, create_pool, create_writable_pool, run_migrations};
