//! Symptom repository — list, get, create, update, delete.

use chrono::Utc;
use tracing::debug;

use dx_core::entities::Symptom;
use dx_core::identity::AdminIdentity;
use dx_core::ids::PREFIX_SYMPTOM;
use dx_core::validate;

use crate::error::StoreError;
use crate::helpers::parse_datetime;
use crate::service::CatalogService;

fn row_to_symptom(row: &libsql::Row) -> Result<Symptom, StoreError> {
    Ok(Symptom {
        id: row.get::<String>(0)?,
        name: row.get::<String>(1)?,
        created_at: parse_datetime(&row.get::<String>(2)?)?,
        updated_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}

impl CatalogService {
    /// List every symptom, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn list_symptoms(&self) -> Result<Vec<Symptom>, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, name, created_at, updated_at FROM symptoms ORDER BY name",
                (),
            )
            .await?;

        let mut symptoms = Vec::new();
        while let Some(row) = rows.next().await? {
            symptoms.push(row_to_symptom(&row)?);
        }
        Ok(symptoms)
    }

    /// Fetch one symptom by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no symptom has this ID.
    pub async fn get_symptom(&self, id: &str) -> Result<Symptom, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, name, created_at, updated_at FROM symptoms WHERE id = ?1",
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| StoreError::not_found("symptom", id))?;
        row_to_symptom(&row)
    }

    /// Create a symptom with a unique display name.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` for a blank name and
    /// `StoreError::DuplicateName` if the name is already taken.
    pub async fn create_symptom(
        &self,
        caller: &AdminIdentity,
        name: &str,
    ) -> Result<Symptom, StoreError> {
        validate::require_name("symptom", name)?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_SYMPTOM).await?;

        let tx = self.db().conn().transaction().await?;
        if name_taken(&tx, name, None).await? {
            return Err(StoreError::DuplicateName(name.to_string()));
        }
        tx.execute(
            "INSERT INTO symptoms (id, name, created_at, updated_at) VALUES (?1, ?2, ?3, ?4)",
            libsql::params![id.as_str(), name, now.to_rfc3339(), now.to_rfc3339()],
        )
        .await?;
        tx.commit().await?;

        debug!(user = %caller.user_id, id = %id, name, "created symptom");

        Ok(Symptom {
            id,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Rename a symptom.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` for a blank name,
    /// `StoreError::DuplicateName` if another symptom already uses it, and
    /// `StoreError::NotFound` if the ID does not exist.
    pub async fn update_symptom(
        &self,
        caller: &AdminIdentity,
        id: &str,
        name: &str,
    ) -> Result<Symptom, StoreError> {
        validate::require_name("symptom", name)?;

        let now = Utc::now();

        let tx = self.db().conn().transaction().await?;
        if name_taken(&tx, name, Some(id)).await? {
            return Err(StoreError::DuplicateName(name.to_string()));
        }
        let affected = tx
            .execute(
                "UPDATE symptoms SET name = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![name, now.to_rfc3339(), id],
            )
            .await?;
        if affected == 0 {
            return Err(StoreError::not_found("symptom", id));
        }
        tx.commit().await?;

        debug!(user = %caller.user_id, id, name, "updated symptom");

        self.get_symptom(id).await
    }

    /// Delete a symptom and every rule referencing it.
    ///
    /// The cascade runs inside the same `DELETE` via `ON DELETE CASCADE`, so
    /// no reader can observe a rule whose symptom is gone.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the ID does not exist.
    pub async fn delete_symptom(
        &self,
        caller: &AdminIdentity,
        id: &str,
    ) -> Result<(), StoreError> {
        let affected = self
            .db()
            .conn()
            .execute("DELETE FROM symptoms WHERE id = ?1", [id])
            .await?;
        if affected == 0 {
            return Err(StoreError::not_found("symptom", id));
        }

        debug!(user = %caller.user_id, id, "deleted symptom");
        Ok(())
    }
}

/// Check whether `name` is used by a symptom other than `exclude_id`.
async fn name_taken(
    tx: &libsql::Transaction,
    name: &str,
    exclude_id: Option<&str>,
) -> Result<bool, StoreError> {
    let mut rows = match exclude_id {
        Some(id) => {
            tx.query(
                "SELECT 1 FROM symptoms WHERE name = ?1 AND id != ?2",
                libsql::params![name, id],
            )
            .await?
        }
        None => {
            tx.query("SELECT 1 FROM symptoms WHERE name = ?1", [name])
                .await?
        }
    };
    Ok(rows.next().await?.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{admin, test_service};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn create_and_list_sorted_by_name() {
        let svc = test_service().await;
        let caller = admin();

        svc.create_symptom(&caller, "nausea").await.unwrap();
        svc.create_symptom(&caller, "cough").await.unwrap();
        svc.create_symptom(&caller, "fever").await.unwrap();

        let names: Vec<String> = svc
            .list_symptoms()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["cough", "fever", "nausea"]);
    }

    #[tokio::test]
    async fn duplicate_name_rejected() {
        let svc = test_service().await;
        let caller = admin();

        svc.create_symptom(&caller, "fever").await.unwrap();
        let result = svc.create_symptom(&caller, "fever").await;
        assert!(matches!(result, Err(StoreError::DuplicateName(_))));
    }

    #[tokio::test]
    async fn blank_name_rejected() {
        let svc = test_service().await;
        let result = svc.create_symptom(&admin(), "   ").await;
        assert!(matches!(result, Err(StoreError::Validation(_))));
    }

    #[tokio::test]
    async fn rename_roundtrip() {
        let svc = test_service().await;
        let caller = admin();

        let created = svc.create_symptom(&caller, "feverr").await.unwrap();
        let renamed = svc
            .update_symptom(&caller, &created.id, "fever")
            .await
            .unwrap();
        assert_eq!(renamed.name, "fever");
        assert_eq!(svc.get_symptom(&created.id).await.unwrap().name, "fever");
    }

    #[tokio::test]
    async fn rename_to_own_name_is_allowed() {
        let svc = test_service().await;
        let caller = admin();

        let created = svc.create_symptom(&caller, "fever").await.unwrap();
        assert!(svc.update_symptom(&caller, &created.id, "fever").await.is_ok());
    }

    #[tokio::test]
    async fn rename_to_taken_name_rejected() {
        let svc = test_service().await;
        let caller = admin();

        svc.create_symptom(&caller, "fever").await.unwrap();
        let other = svc.create_symptom(&caller, "cough").await.unwrap();
        let result = svc.update_symptom(&caller, &other.id, "fever").await;
        assert!(matches!(result, Err(StoreError::DuplicateName(_))));
    }

    #[tokio::test]
    async fn missing_targets_report_not_found() {
        let svc = test_service().await;
        let caller = admin();

        assert!(matches!(
            svc.get_symptom("sym-missing0").await,
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            svc.update_symptom(&caller, "sym-missing0", "fever").await,
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            svc.delete_symptom(&caller, "sym-missing0").await,
            Err(StoreError::NotFound { .. })
        ));
    }
}
