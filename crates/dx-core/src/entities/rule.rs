use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A weighted association between one disease and one symptom.
///
/// Identity is the `(disease_id, symptom_id)` composite key — at most one rule
/// exists per pair. `weight` is conventionally in `[0.0, 1.0]` but the engine
/// does not enforce a hard bound; a missing weight is scored as `0.5`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Rule {
    pub disease_id: String,
    pub symptom_id: String,
    pub weight: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A rule with its symptom name resolved, for admin listings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ResolvedRule {
    pub disease_id: String,
    pub symptom_id: String,
    pub symptom_name: String,
    pub weight: Option<f64>,
}
