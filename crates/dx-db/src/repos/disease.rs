//! Disease repository — list, get, create, partial update, cascade delete.

use chrono::Utc;
use tracing::debug;

use dx_core::entities::{Disease, DiseaseUpdate};
use dx_core::identity::AdminIdentity;
use dx_core::ids::PREFIX_DISEASE;
use dx_core::validate;

use crate::error::StoreError;
use crate::helpers::{get_opt_string, parse_datetime, parse_min_symptoms};
use crate::service::CatalogService;

pub(crate) fn row_to_disease(row: &libsql::Row) -> Result<Disease, StoreError> {
    Ok(Disease {
        id: row.get::<String>(0)?,
        name: row.get::<String>(1)?,
        description: get_opt_string(row, 2)?,
        suggestion: get_opt_string(row, 3)?,
        min_symptoms: parse_min_symptoms(row.get::<i64>(4)?)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
        updated_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

pub(crate) const DISEASE_COLUMNS: &str =
    "id, name, description, suggestion, min_symptoms, created_at, updated_at";

impl CatalogService {
    /// List every disease, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn list_diseases(&self) -> Result<Vec<Disease>, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {DISEASE_COLUMNS} FROM diseases ORDER BY name, id"),
                (),
            )
            .await?;

        let mut diseases = Vec::new();
        while let Some(row) = rows.next().await? {
            diseases.push(row_to_disease(&row)?);
        }
        Ok(diseases)
    }

    /// Fetch one disease by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no disease has this ID.
    pub async fn get_disease(&self, id: &str) -> Result<Disease, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {DISEASE_COLUMNS} FROM diseases WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| StoreError::not_found("disease", id))?;
        row_to_disease(&row)
    }

    /// Create a disease.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` for a blank name or
    /// `min_symptoms < 1`.
    pub async fn create_disease(
        &self,
        caller: &AdminIdentity,
        name: &str,
        description: Option<&str>,
        suggestion: Option<&str>,
        min_symptoms: u32,
    ) -> Result<Disease, StoreError> {
        validate::require_name("disease", name)?;
        validate::require_min_symptoms(min_symptoms)?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_DISEASE).await?;

        self.db()
            .conn()
            .execute(
                "INSERT INTO diseases (id, name, description, suggestion, min_symptoms, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                libsql::params![
                    id.as_str(),
                    name,
                    description,
                    suggestion,
                    i64::from(min_symptoms),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        debug!(user = %caller.user_id, id = %id, name, "created disease");

        Ok(Disease {
            id,
            name: name.to_string(),
            description: description.map(String::from),
            suggestion: suggestion.map(String::from),
            min_symptoms,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a partial update to a disease. `None` fields are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` for a blank name or `min_symptoms < 1`
    /// and `StoreError::NotFound` if the ID does not exist.
    pub async fn update_disease(
        &self,
        caller: &AdminIdentity,
        id: &str,
        update: DiseaseUpdate,
    ) -> Result<Disease, StoreError> {
        if let Some(ref name) = update.name {
            validate::require_name("disease", name)?;
        }
        if let Some(min_symptoms) = update.min_symptoms {
            validate::require_min_symptoms(min_symptoms)?;
        }

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1;

        if let Some(ref name) = update.name {
            sets.push(format!("name = ?{idx}"));
            params.push(name.as_str().into());
            idx += 1;
        }
        if let Some(ref description) = update.description {
            sets.push(format!("description = ?{idx}"));
            params.push(description.as_deref().into());
            idx += 1;
        }
        if let Some(ref suggestion) = update.suggestion {
            sets.push(format!("suggestion = ?{idx}"));
            params.push(suggestion.as_deref().into());
            idx += 1;
        }
        if let Some(min_symptoms) = update.min_symptoms {
            sets.push(format!("min_symptoms = ?{idx}"));
            params.push(i64::from(min_symptoms).into());
            idx += 1;
        }

        if sets.is_empty() {
            return self.get_disease(id).await;
        }

        sets.push(format!("updated_at = ?{idx}"));
        let now = Utc::now();
        params.push(now.to_rfc3339().into());
        idx += 1;

        params.push(id.into());
        let sql = format!(
            "UPDATE diseases SET {} WHERE id = ?{idx}",
            sets.join(", ")
        );

        let affected = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if affected == 0 {
            return Err(StoreError::not_found("disease", id));
        }

        debug!(user = %caller.user_id, id, "updated disease");

        self.get_disease(id).await
    }

    /// Delete a disease and every rule referencing it.
    ///
    /// The cascade runs inside the same `DELETE` via `ON DELETE CASCADE`, so
    /// no reader can observe a rule whose disease is gone.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the ID does not exist.
    pub async fn delete_disease(
        &self,
        caller: &AdminIdentity,
        id: &str,
    ) -> Result<(), StoreError> {
        let affected = self
            .db()
            .conn()
            .execute("DELETE FROM diseases WHERE id = ?1", [id])
            .await?;
        if affected == 0 {
            return Err(StoreError::not_found("disease", id));
        }

        debug!(user = %caller.user_id, id, "deleted disease");
        Ok(())
    }
}
