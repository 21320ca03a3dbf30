//! Medication cross-check against the user's question

use serde::{Deserialize, Serialize};

use super::table::matching_classes;

const CONCERN_TERMS: [&str; 4] = ["side effect", "problem", "issue", "concern"];

/// Warnings produced for a set of medications
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationSafetyResult {
    pub safety_warnings: Vec<String>,
    pub has_concerns: bool,
}

impl MedicationSafetyResult {
    fn from_warnings(safety_warnings: Vec<String>) -> Self {
        let has_concerns = !safety_warnings.is_empty();
        Self {
            safety_warnings,
            has_concerns,
        }
    }
}

/// Check medications for contraindications and interactions mentioned in the query.
///
/// Warnings are emitted per medication in input order, then per matching drug
/// class in table order: contraindications first, then interactions, then the
/// class note when the query raises a concern. The medication is quoted with
/// the caller's spelling.
pub fn check_medication_safety(medications: &[String], query: &str) -> MedicationSafetyResult {
    if medications.is_empty() {
        return MedicationSafetyResult::default();
    }

    let query_lower = query.to_lowercase();
    let raises_concern = CONCERN_TERMS.iter().any(|t| query_lower.contains(t));
    let mut warnings = Vec::new();

    for medication in medications {
        let medication_lower = medication.to_lowercase();

        for class in matching_classes(&medication_lower) {
            for term in class
                .contraindications
                .iter()
                .filter(|t| query_lower.contains(*t))
            {
                warnings.push(format!(
                    "⚠️ **WARNING**: {medication} may not be safe with {term}. Please consult your doctor before making any changes to your medications."
                ));
            }

            for term in class.interactions.iter().filter(|t| query_lower.contains(*t)) {
                warnings.push(format!(
                    "⚠️ **INTERACTION ALERT**: {medication} may interact with {term}. Discuss this with your pharmacist or doctor."
                ));
            }

            if raises_concern {
                warnings.push(format!("ℹ️ **Note**: {}", class.warning));
            }
        }
    }

    MedicationSafetyResult::from_warnings(warnings)
}
