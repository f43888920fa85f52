//! Storage module for the persisted catalog
//!
//! The repository exclusively owns persisted rows; the crawler only hands
//! records across the [`CatalogStore`] seam. Dedup happens here, as a single
//! atomic conditional insert keyed on title.

mod schema;
mod sqlite;
mod traits;

pub use schema::initialize_schema;
pub use sqlite::SqliteCatalog;
pub use traits::{CatalogStore, PersistenceError, StoreResult, UpsertOutcome};

use std::path::Path;

/// Opens (or creates) a catalog database at the given path.
pub fn open_catalog(path: &Path) -> StoreResult<SqliteCatalog> {
    SqliteCatalog::new(path)
}

/// A query API account row.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}
