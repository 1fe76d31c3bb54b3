//! Entity structs for the catalog domain.
//!
//! Each entity maps to a table in the libSQL database (see the `dx-db`
//! migrations). All structs derive `Serialize`, `Deserialize`, and
//! `JsonSchema` for JSON roundtrip and schema validation.

mod disease;
mod rule;
mod snapshot;
mod symptom;

pub use disease::{Disease, DiseaseUpdate};
pub use rule::{ResolvedRule, Rule};
pub use snapshot::{CatalogSnapshot, DiseaseRules, WeightedRule};
pub use symptom::Symptom;
