//! Repository modules implementing catalog reads and mutations.
//!
//! Each module adds methods to `CatalogService` via `impl CatalogService`
//! blocks.

pub mod disease;
pub mod rule;
pub mod snapshot;
pub mod symptom;
