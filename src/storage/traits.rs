//! Storage trait and error types

use crate::catalog::{CatalogItem, ItemRecord};
use crate::storage::UserRecord;
use thiserror::Error;

/// Errors that can occur during storage operations.
///
/// Any of these is fatal to an ingestion run: once the store misbehaves,
/// further writes cannot be trusted.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, PersistenceError>;

/// Outcome of a conditional insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No row shared the item's title; a new row was committed.
    Inserted,
    /// A row with this title already existed and was left untouched.
    Skipped,
}

/// Trait for catalog storage backends
///
/// The crawler only ever calls [`CatalogStore::insert_if_absent`]; the rest
/// of the surface is the read path consumed by the query API.
pub trait CatalogStore {
    /// Inserts the item unless a row with the same title already exists.
    ///
    /// The uniqueness check and the insert happen in one atomic statement,
    /// so repeated runs with identical input converge to the same table
    /// contents. The existing row's other fields are never refreshed, even
    /// when the newly observed values differ.
    fn insert_if_absent(&mut self, item: &CatalogItem) -> StoreResult<UpsertOutcome>;

    /// Lists all catalog rows in insertion order.
    fn list_items(&self) -> StoreResult<Vec<ItemRecord>>;

    /// Fetches one row by id.
    fn get_item(&self, id: i64) -> StoreResult<Option<ItemRecord>>;

    /// Case-insensitive substring search over category and/or title.
    ///
    /// When both filters are supplied they combine with OR semantics; when
    /// neither is supplied every row matches.
    fn search_items(
        &self,
        category: Option<&str>,
        title: Option<&str>,
    ) -> StoreResult<Vec<ItemRecord>>;

    /// Lists distinct category names.
    fn list_categories(&self) -> StoreResult<Vec<String>>;

    /// Total number of catalog rows.
    fn count_items(&self) -> StoreResult<u64>;

    /// Creates a user account; returns `Skipped` if the username is taken.
    fn create_user(&mut self, username: &str, password_hash: &str) -> StoreResult<UpsertOutcome>;

    /// Looks up a user account by username.
    fn get_user(&self, username: &str) -> StoreResult<Option<UserRecord>>;
}
