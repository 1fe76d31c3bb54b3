//! Catalog snapshot assembly.
//!
//! Builds the read-only [`CatalogSnapshot`] the diagnostic engine consumes.
//! All reads happen inside one transaction, so the snapshot is a single
//! point-in-time view: it can never contain a rule whose disease or symptom
//! was deleted partway through assembly.

use tracing::debug;

use dx_core::entities::{CatalogSnapshot, DiseaseRules, WeightedRule};

use crate::error::StoreError;
use crate::repos::disease::{DISEASE_COLUMNS, row_to_disease};
use crate::service::CatalogService;

impl CatalogService {
    /// Assemble a consistent snapshot of the whole catalog.
    ///
    /// Diseases are ordered by ID; rule order within a disease follows symptom
    /// name, though the engine does not depend on it. Rules carry resolved
    /// symptom names (the join happens here), so engine input is orphan-free
    /// by construction.
    ///
    /// There is no caching: callers are expected to fetch a fresh snapshot per
    /// diagnostic request.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if any query fails.
    pub async fn catalog_snapshot(&self) -> Result<CatalogSnapshot, StoreError> {
        let tx = self.db().conn().transaction().await?;

        let mut disease_rows = tx
            .query(
                &format!("SELECT {DISEASE_COLUMNS} FROM diseases ORDER BY id"),
                (),
            )
            .await?;

        let mut diseases = Vec::new();
        while let Some(row) = disease_rows.next().await? {
            diseases.push(row_to_disease(&row)?);
        }

        let mut entries = Vec::with_capacity(diseases.len());
        for disease in diseases {
            let mut rule_rows = tx
                .query(
                    "SELECT s.name, r.weight
                     FROM rules r
                     JOIN symptoms s ON r.symptom_id = s.id
                     WHERE r.disease_id = ?1
                     ORDER BY s.name",
                    [disease.id.as_str()],
                )
                .await?;

            let mut rules = Vec::new();
            while let Some(row) = rule_rows.next().await? {
                rules.push(WeightedRule {
                    symptom_name: row.get::<String>(0)?,
                    weight: row.get::<Option<f64>>(1)?,
                });
            }

            entries.push(DiseaseRules { disease, rules });
        }

        tx.commit().await?;

        debug!(diseases = entries.len(), "assembled catalog snapshot");

        Ok(CatalogSnapshot { diseases: entries })
    }
}
