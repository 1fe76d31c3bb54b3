use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Disease;

/// A rule as the engine sees it: symptom name already resolved.
///
/// Snapshot assembly joins rules against the symptoms table, so a rule whose
/// symptom no longer exists cannot appear here — the snapshot representation
/// itself rules out dangling references.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct WeightedRule {
    pub symptom_name: String,
    pub weight: Option<f64>,
}

/// One disease together with all of its rules.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct DiseaseRules {
    pub disease: Disease,
    pub rules: Vec<WeightedRule>,
}

/// A consistent, point-in-time, read-only copy of the catalog.
///
/// Built by the store in a single transaction and handed to
/// [`crate::engine::diagnose`]. Rule order within a disease is irrelevant to
/// scoring.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CatalogSnapshot {
    pub diseases: Vec<DiseaseRules>,
}

impl CatalogSnapshot {
    /// Whether the snapshot contains no diseases at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diseases.is_empty()
    }
}
