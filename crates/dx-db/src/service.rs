//! Service layer over the catalog database.
//!
//! `CatalogService` wraps [`CatalogDb`] and hosts all read and mutation
//! methods (implemented as `impl CatalogService` blocks in [`crate::repos`]).
//! Reads are open to anyone; every mutation method takes an
//! [`dx_core::identity::AdminIdentity`] capability, so the admin gate shows up
//! in the signature rather than in ambient session state.

use crate::CatalogDb;
use crate::error::StoreError;

/// Orchestrates catalog reads and admin-gated mutations.
///
/// Mutations either fully apply or not at all: multi-statement operations run
/// inside a libSQL transaction, and the rule cascades on disease/symptom
/// deletion are enforced by `ON DELETE CASCADE` inside the parent `DELETE`
/// statement itself. A concurrent reader never observes a half-applied
/// mutation.
pub struct CatalogService {
    db: CatalogDb,
}

impl CatalogService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` — Path to the libSQL database file, or `":memory:"` for
    ///   tests.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, StoreError> {
        let db = CatalogDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Create from an existing `CatalogDb` (for testing).
    #[must_use]
    pub const fn from_db(db: CatalogDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &CatalogDb {
        &self.db
    }
}
