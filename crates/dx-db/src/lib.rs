//! # dx-db
//!
//! libSQL catalog store for Diagnos.
//!
//! Owns all persisted catalog state: symptoms, diseases, and the weighted
//! rules linking them. Exposes point-in-time reads (including the
//! [`dx_core::entities::CatalogSnapshot`] consumed by the engine) and atomic,
//! admin-gated mutations.
//!
//! Uses the `libsql` crate (C `SQLite` fork) — foreign keys with
//! `ON DELETE CASCADE` enforce the no-dangling-rules invariant at the schema
//! level, and every multi-statement mutation runs inside a transaction.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;

#[cfg(test)]
pub(crate) mod test_support;

use error::StoreError;
use libsql::Builder;

/// Central database handle for all catalog state operations.
///
/// Wraps a libSQL database and connection. Provides ID generation; the
/// repository methods live on [`service::CatalogService`].
pub struct CatalogDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl CatalogDb {
    /// Open a local-only database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database cannot be opened or migrations
    /// fail.
    pub async fn open_local(path: &str) -> Result<Self, StoreError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite) — the rules
        // table relies on ON DELETE CASCADE.
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| StoreError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let catalog_db = Self { db, conn };
        catalog_db.run_migrations().await?;
        Ok(catalog_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g. `"sym-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the
    /// prefix.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, StoreError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(StoreError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}
