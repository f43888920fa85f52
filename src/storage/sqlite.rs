//! SQLite storage implementation

use crate::catalog::{CatalogItem, ItemRecord};
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{CatalogStore, StoreResult, UpsertOutcome};
use crate::storage::UserRecord;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

const ITEM_COLUMNS: &str = "id, title, category, price, rating, availability, image_path";

/// SQLite catalog backend
pub struct SqliteCatalog {
    conn: Connection,
}

impl SqliteCatalog {
    /// Opens (or creates) the catalog database at the given path.
    pub fn new(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory catalog (for testing).
    pub fn new_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    fn row_to_item(row: &Row<'_>) -> rusqlite::Result<ItemRecord> {
        Ok(ItemRecord {
            id: row.get(0)?,
            title: row.get(1)?,
            category: row.get(2)?,
            price: row.get(3)?,
            rating: row.get(4)?,
            availability: row.get(5)?,
            image_path: row.get(6)?,
        })
    }
}

impl CatalogStore for SqliteCatalog {
    fn insert_if_absent(&mut self, item: &CatalogItem) -> StoreResult<UpsertOutcome> {
        // INSERT OR IGNORE rides on the UNIQUE(title) constraint, so the
        // existence check and the insert are one atomic statement.
        let changed = self.conn.execute(
            "INSERT OR IGNORE INTO books (title, price, rating, availability, category, image_path)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                item.title,
                item.price,
                item.rating.as_str(),
                item.availability,
                item.category,
                item.image_path,
            ],
        )?;

        Ok(if changed == 1 {
            UpsertOutcome::Inserted
        } else {
            UpsertOutcome::Skipped
        })
    }

    fn list_items(&self) -> StoreResult<Vec<ItemRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM books ORDER BY id", ITEM_COLUMNS))?;

        let items = stmt
            .query_map([], Self::row_to_item)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(items)
    }

    fn get_item(&self, id: i64) -> StoreResult<Option<ItemRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM books WHERE id = ?1", ITEM_COLUMNS))?;

        let item = stmt.query_row(params![id], Self::row_to_item).optional()?;

        Ok(item)
    }

    fn search_items(
        &self,
        category: Option<&str>,
        title: Option<&str>,
    ) -> StoreResult<Vec<ItemRecord>> {
        // SQLite LIKE is case-insensitive for ASCII, which is all the
        // source site uses. OR semantics when both filters are present.
        let (sql, bound): (String, Vec<String>) = match (category, title) {
            (Some(c), Some(t)) => (
                format!(
                    "SELECT {} FROM books
                     WHERE category LIKE '%' || ?1 || '%' OR title LIKE '%' || ?2 || '%'
                     ORDER BY id",
                    ITEM_COLUMNS
                ),
                vec![c.to_string(), t.to_string()],
            ),
            (Some(c), None) => (
                format!(
                    "SELECT {} FROM books WHERE category LIKE '%' || ?1 || '%' ORDER BY id",
                    ITEM_COLUMNS
                ),
                vec![c.to_string()],
            ),
            (None, Some(t)) => (
                format!(
                    "SELECT {} FROM books WHERE title LIKE '%' || ?1 || '%' ORDER BY id",
                    ITEM_COLUMNS
                ),
                vec![t.to_string()],
            ),
            (None, None) => return self.list_items(),
        };

        let mut stmt = self.conn.prepare(&sql)?;
        let items = stmt
            .query_map(rusqlite::params_from_iter(bound.iter()), Self::row_to_item)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(items)
    }

    fn list_categories(&self) -> StoreResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT category FROM books ORDER BY category")?;

        let categories = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(categories)
    }

    fn count_items(&self) -> StoreResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn create_user(&mut self, username: &str, password_hash: &str) -> StoreResult<UpsertOutcome> {
        let changed = self.conn.execute(
            "INSERT OR IGNORE INTO users (username, password_hash) VALUES (?1, ?2)",
            params![username, password_hash],
        )?;

        Ok(if changed == 1 {
            UpsertOutcome::Inserted
        } else {
            UpsertOutcome::Skipped
        })
    }

    fn get_user(&self, username: &str) -> StoreResult<Option<UserRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, username, password_hash FROM users WHERE username = ?1")?;

        let user = stmt
            .query_row(params![username], |row| {
                Ok(UserRecord {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    password_hash: row.get(2)?,
                })
            })
            .optional()?;

        Ok(user)
    }
}
