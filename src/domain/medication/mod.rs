//! Medication safety domain

mod checker;
mod table;

pub use checker::{check_medication_safety, MedicationSafetyResult};
pub use table::{matching_classes, DrugClass, DRUG_CLASSES};
