//! ID prefix constants for catalog entities.
//!
//! Entity IDs are opaque strings of the form `"<prefix>-<8 hex chars>"`,
//! generated by the store on insert (see `dx-db`). Rules carry no ID of their
//! own: their identity is the `(disease_id, symptom_id)` composite key.

/// Prefix for symptom IDs, e.g. `"sym-a3f8b2c1"`.
pub const PREFIX_SYMPTOM: &str = "sym";

/// Prefix for disease IDs, e.g. `"dis-a3f8b2c1"`.
pub const PREFIX_DISEASE: &str = "dis";
