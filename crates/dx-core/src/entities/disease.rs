use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A candidate diagnosis with its minimum-evidence gate.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Disease {
    pub id: String,
    /// Display name. Non-empty, but not required to be unique.
    pub name: String,
    pub description: Option<String>,
    /// Advice shown to the user when this disease is diagnosed.
    pub suggestion: Option<String>,
    /// Minimum count of matched rule-symptoms before this disease may appear
    /// in results at all. Always >= 1.
    pub min_symptoms: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update for a disease. `None` fields are left untouched; the outer
/// `Option` on `description`/`suggestion` distinguishes "don't change" from
/// "clear to NULL".
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DiseaseUpdate {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub suggestion: Option<Option<String>>,
    pub min_symptoms: Option<u32>,
}
