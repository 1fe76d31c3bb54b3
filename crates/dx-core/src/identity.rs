use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Capability held by a caller authorized to mutate the catalog.
///
/// Produced by the application's login boundary, consumed by `dx-db`. Contains
/// only data fields — no credential checking happens here or in the store;
/// possession of a value is the authorization. Every catalog mutation takes an
/// `&AdminIdentity`, which keeps the admin gate explicit in the signature
/// instead of living in ambient session state.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AdminIdentity {
    /// Identifier of the authenticated administrator.
    pub user_id: String,
}

impl AdminIdentity {
    /// Wrap an already-authenticated administrator ID.
    #[must_use]
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}
