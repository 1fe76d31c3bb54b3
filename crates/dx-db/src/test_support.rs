//! Shared test utilities for dx-db tests.

pub(crate) mod helpers {
    use dx_core::identity::AdminIdentity;

    use crate::CatalogDb;
    use crate::service::CatalogService;

    /// Create an in-memory `CatalogService`.
    pub async fn test_service() -> CatalogService {
        let db = CatalogDb::open_local(":memory:").await.unwrap();
        CatalogService::from_db(db)
    }

    /// Capability for test mutations.
    pub fn admin() -> AdminIdentity {
        AdminIdentity::new("admin")
    }
}
