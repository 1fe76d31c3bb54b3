//! Weighted-coverage diagnostic scoring.
//!
//! [`diagnose`] is a pure function over an immutable [`CatalogSnapshot`]: no
//! I/O, no shared state, no suspension points. Callers fetch a fresh snapshot
//! from the store, score it here, and format the result themselves.
//!
//! Scoring is deterministic weighted coverage, not statistical inference: a
//! disease's percentage is the share of its total rule weight covered by the
//! selected symptoms. A separate absolute gate (`min_symptoms`) decides
//! eligibility independently of the percentage.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{CatalogSnapshot, Disease};

/// Weight assumed for a rule whose weight was never set.
///
/// An unset weight still counts toward the total and is still matchable.
pub const DEFAULT_RULE_WEIGHT: f64 = 0.5;

/// One disease that passed its evidence gate, with its coverage score.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct DiagnosticMatch {
    pub disease: Disease,
    /// Matched share of the disease's total rule weight, in `[0, 100]`.
    pub percentage: f64,
    /// Count of rule-symptoms present in the selection.
    pub match_count: u32,
}

/// Score every disease in the snapshot against the selected symptom names and
/// return the gated, ranked matches.
///
/// Symptom names are compared by exact string equality — no case folding, no
/// whitespace trimming. A selection name that differs from a rule's symptom
/// name in case or whitespace silently fails to match; callers own any
/// normalization.
///
/// Per disease: each rule contributes its weight (or
/// [`DEFAULT_RULE_WEIGHT`] when unset) to the total; rules whose symptom is
/// selected also contribute to the matched sum and the match count. The
/// disease is included iff `match_count >= min_symptoms`, with
/// `percentage = matched / total * 100` (zero when the disease has no rules —
/// such a disease can never pass its gate and is always excluded).
///
/// Results are ordered by descending percentage; equal percentages are broken
/// by ascending disease ID so the ordering is deterministic.
///
/// An empty snapshot or an empty selection yields an empty result. This is not
/// an error, and the two cases are not distinguishable from the return value;
/// a caller that wants a "please select a symptom" message must check the
/// selection itself.
#[must_use]
pub fn diagnose(snapshot: &CatalogSnapshot, selected: &HashSet<String>) -> Vec<DiagnosticMatch> {
    let mut results: Vec<DiagnosticMatch> = Vec::new();

    for entry in &snapshot.diseases {
        let mut total_weight = 0.0_f64;
        let mut matched_weight = 0.0_f64;
        let mut match_count = 0_u32;

        for rule in &entry.rules {
            let weight = rule.weight.unwrap_or(DEFAULT_RULE_WEIGHT);
            total_weight += weight;
            if selected.contains(&rule.symptom_name) {
                matched_weight += weight;
                match_count += 1;
            }
        }

        let percentage = if total_weight > 0.0 {
            matched_weight / total_weight * 100.0
        } else {
            0.0
        };

        if match_count >= entry.disease.min_symptoms {
            results.push(DiagnosticMatch {
                disease: entry.disease.clone(),
                percentage,
                match_count,
            });
        }
    }

    results.sort_by(|a, b| {
        b.percentage
            .total_cmp(&a.percentage)
            .then_with(|| a.disease.id.cmp(&b.disease.id))
    });

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{DiseaseRules, WeightedRule};
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn disease(id: &str, name: &str, min_symptoms: u32) -> Disease {
        let now = Utc::now();
        Disease {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            suggestion: None,
            min_symptoms,
            created_at: now,
            updated_at: now,
        }
    }

    fn rule(symptom: &str, weight: Option<f64>) -> WeightedRule {
        WeightedRule {
            symptom_name: symptom.to_string(),
            weight,
        }
    }

    fn selection(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    fn snapshot(diseases: Vec<DiseaseRules>) -> CatalogSnapshot {
        CatalogSnapshot { diseases }
    }

    #[test]
    fn flu_with_fever_scores_sixty_percent() {
        let snap = snapshot(vec![DiseaseRules {
            disease: disease("dis-flu00001", "Flu", 1),
            rules: vec![rule("fever", Some(0.6)), rule("cough", Some(0.4))],
        }]);

        let results = diagnose(&snap, &selection(&["fever"]));

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].match_count, 1);
        assert!((results[0].percentage - 60.0).abs() < 1e-9);
    }

    #[test]
    fn empty_selection_excludes_everything() {
        let snap = snapshot(vec![DiseaseRules {
            disease: disease("dis-flu00001", "Flu", 1),
            rules: vec![rule("fever", Some(0.6)), rule("cough", Some(0.4))],
        }]);

        assert!(diagnose(&snap, &HashSet::new()).is_empty());
    }

    #[test]
    fn gate_of_two_requires_two_matches() {
        let snap = snapshot(vec![DiseaseRules {
            disease: disease("dis-rare0001", "Rare", 2),
            rules: vec![
                rule("fever", Some(0.3)),
                rule("rash", Some(0.3)),
                rule("cough", Some(0.4)),
            ],
        }]);

        // One match — below the gate, despite a nonzero percentage.
        assert!(diagnose(&snap, &selection(&["fever"])).is_empty());

        // Two matches — included at 70%.
        let results = diagnose(&snap, &selection(&["fever", "cough"]));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].match_count, 2);
        assert!((results[0].percentage - 70.0).abs() < 1e-9);
    }

    #[test]
    fn missing_weight_scores_like_explicit_half() {
        let snap = snapshot(vec![
            DiseaseRules {
                disease: disease("dis-x0000001", "X", 1),
                rules: vec![rule("fever", None)],
            },
            DiseaseRules {
                disease: disease("dis-y0000001", "Y", 1),
                rules: vec![rule("fever", Some(0.5))],
            },
        ]);

        let results = diagnose(&snap, &selection(&["fever"]));
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].percentage, results[1].percentage);
    }

    #[test]
    fn zero_rule_disease_never_included() {
        let snap = snapshot(vec![DiseaseRules {
            disease: disease("dis-empty001", "Empty", 1),
            rules: vec![],
        }]);

        assert!(diagnose(&snap, &selection(&["fever", "cough", "rash"])).is_empty());
        assert!(diagnose(&snap, &HashSet::new()).is_empty());
    }

    #[test]
    fn empty_snapshot_yields_empty_result() {
        assert!(diagnose(&CatalogSnapshot::default(), &selection(&["fever"])).is_empty());
    }

    #[test]
    fn ranking_is_descending_by_percentage() {
        let snap = snapshot(vec![
            DiseaseRules {
                disease: disease("dis-low00001", "Low", 1),
                rules: vec![rule("fever", Some(0.2)), rule("rash", Some(0.8))],
            },
            DiseaseRules {
                disease: disease("dis-high0001", "High", 1),
                rules: vec![rule("fever", Some(0.9)), rule("rash", Some(0.1))],
            },
        ]);

        let results = diagnose(&snap, &selection(&["fever"]));
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].disease.name, "High");
        assert_eq!(results[1].disease.name, "Low");
        assert!(results[0].percentage > results[1].percentage);
    }

    #[test]
    fn equal_percentages_break_ties_by_disease_id() {
        let make = |id: &str| DiseaseRules {
            disease: disease(id, "Tied", 1),
            rules: vec![rule("fever", Some(0.5)), rule("cough", Some(0.5))],
        };
        // Insert out of ID order to prove the sort is doing the work.
        let snap = snapshot(vec![make("dis-bbbbbbbb"), make("dis-aaaaaaaa")]);

        let results = diagnose(&snap, &selection(&["fever"]));
        assert_eq!(results[0].disease.id, "dis-aaaaaaaa");
        assert_eq!(results[1].disease.id, "dis-bbbbbbbb");
    }

    #[test]
    fn name_matching_is_exact() {
        let snap = snapshot(vec![DiseaseRules {
            disease: disease("dis-flu00001", "Flu", 1),
            rules: vec![rule("fever", Some(1.0))],
        }]);

        // Case and whitespace differences silently fail to match.
        assert!(diagnose(&snap, &selection(&["Fever"])).is_empty());
        assert!(diagnose(&snap, &selection(&["fever "])).is_empty());
        assert_eq!(diagnose(&snap, &selection(&["fever"])).len(), 1);
    }

    #[test]
    fn diagnose_is_idempotent() {
        let snap = snapshot(vec![
            DiseaseRules {
                disease: disease("dis-flu00001", "Flu", 1),
                rules: vec![rule("fever", Some(0.6)), rule("cough", Some(0.4))],
            },
            DiseaseRules {
                disease: disease("dis-cold0001", "Cold", 1),
                rules: vec![rule("cough", Some(0.7)), rule("fever", Some(0.3))],
            },
        ]);
        let selected = selection(&["fever", "cough"]);

        assert_eq!(diagnose(&snap, &selected), diagnose(&snap, &selected));
    }
}
