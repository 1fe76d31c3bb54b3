//! Rule repository — upsert, get, list-per-disease, delete.
//!
//! Rules have no ID of their own; every operation keys on the
//! `(disease_id, symptom_id)` composite.

use chrono::Utc;
use tracing::debug;

use dx_core::entities::{ResolvedRule, Rule};
use dx_core::identity::AdminIdentity;

use crate::error::StoreError;
use crate::helpers::parse_datetime;
use crate::service::CatalogService;

fn row_to_rule(row: &libsql::Row) -> Result<Rule, StoreError> {
    Ok(Rule {
        disease_id: row.get::<String>(0)?,
        symptom_id: row.get::<String>(1)?,
        weight: row.get::<Option<f64>>(2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
        updated_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

/// Composite-key rendering for `NotFound` messages.
fn rule_key(disease_id: &str, symptom_id: &str) -> String {
    format!("{disease_id}/{symptom_id}")
}

impl CatalogService {
    /// Insert a rule, or replace its weight if the `(disease, symptom)` pair
    /// already has one. Idempotent: repeating the call with the same arguments
    /// leaves exactly one rule with that weight.
    ///
    /// Both endpoint IDs are verified inside the same transaction as the
    /// write, so a rule can never be attached to a half-deleted disease or
    /// symptom.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the disease or symptom does not
    /// exist.
    pub async fn upsert_rule(
        &self,
        caller: &AdminIdentity,
        disease_id: &str,
        symptom_id: &str,
        weight: Option<f64>,
    ) -> Result<Rule, StoreError> {
        let now = Utc::now();

        let tx = self.db().conn().transaction().await?;
        if !id_exists(&tx, "diseases", disease_id).await? {
            return Err(StoreError::not_found("disease", disease_id));
        }
        if !id_exists(&tx, "symptoms", symptom_id).await? {
            return Err(StoreError::not_found("symptom", symptom_id));
        }
        tx.execute(
            "INSERT INTO rules (disease_id, symptom_id, weight, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT (disease_id, symptom_id)
             DO UPDATE SET weight = excluded.weight, updated_at = excluded.updated_at",
            libsql::params![disease_id, symptom_id, weight, now.to_rfc3339(), now.to_rfc3339()],
        )
        .await?;
        tx.commit().await?;

        debug!(
            user = %caller.user_id,
            disease_id,
            symptom_id,
            weight,
            "upserted rule"
        );

        self.get_rule(disease_id, symptom_id).await
    }

    /// Fetch one rule by its composite key.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no such rule exists.
    pub async fn get_rule(
        &self,
        disease_id: &str,
        symptom_id: &str,
    ) -> Result<Rule, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT disease_id, symptom_id, weight, created_at, updated_at
                 FROM rules WHERE disease_id = ?1 AND symptom_id = ?2",
                libsql::params![disease_id, symptom_id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| StoreError::not_found("rule", &rule_key(disease_id, symptom_id)))?;
        row_to_rule(&row)
    }

    /// List a disease's rules with resolved symptom names, ordered by symptom
    /// name.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the disease does not exist.
    pub async fn list_rules_for_disease(
        &self,
        disease_id: &str,
    ) -> Result<Vec<ResolvedRule>, StoreError> {
        // Resolve the disease first so an unknown ID errors instead of
        // returning an empty list.
        self.get_disease(disease_id).await?;

        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT r.disease_id, r.symptom_id, s.name, r.weight
                 FROM rules r
                 JOIN symptoms s ON r.symptom_id = s.id
                 WHERE r.disease_id = ?1
                 ORDER BY s.name",
                [disease_id],
            )
            .await?;

        let mut rules = Vec::new();
        while let Some(row) = rows.next().await? {
            rules.push(ResolvedRule {
                disease_id: row.get::<String>(0)?,
                symptom_id: row.get::<String>(1)?,
                symptom_name: row.get::<String>(2)?,
                weight: row.get::<Option<f64>>(3)?,
            });
        }
        Ok(rules)
    }

    /// Delete one rule by its composite key.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no such rule exists.
    pub async fn delete_rule(
        &self,
        caller: &AdminIdentity,
        disease_id: &str,
        symptom_id: &str,
    ) -> Result<(), StoreError> {
        let affected = self
            .db()
            .conn()
            .execute(
                "DELETE FROM rules WHERE disease_id = ?1 AND symptom_id = ?2",
                libsql::params![disease_id, symptom_id],
            )
            .await?;
        if affected == 0 {
            return Err(StoreError::not_found(
                "rule",
                &rule_key(disease_id, symptom_id),
            ));
        }

        debug!(user = %caller.user_id, disease_id, symptom_id, "deleted rule");
        Ok(())
    }
}

/// Check whether `id` exists in `table` (one of the two catalog entity tables).
async fn id_exists(
    tx: &libsql::Transaction,
    table: &str,
    id: &str,
) -> Result<bool, StoreError> {
    let mut rows = tx
        .query(&format!("SELECT 1 FROM {table} WHERE id = ?1"), [id])
        .await?;
    Ok(rows.next().await?.is_some())
}
