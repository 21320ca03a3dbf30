//! Emergency scan types

use serde::{Deserialize, Serialize};

/// Medical emergency category recognised in a user query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmergencyType {
    SevereHyperglycemia,
    SevereHypoglycemia,
    DkaSymptoms,
    Cardiac,
    SevereConfusion,
}

impl EmergencyType {
    /// All categories in scan order
    pub const ALL: [EmergencyType; 5] = [
        Self::SevereHyperglycemia,
        Self::SevereHypoglycemia,
        Self::DkaSymptoms,
        Self::Cardiac,
        Self::SevereConfusion,
    ];

    /// Tag used in tool output and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SevereHyperglycemia => "severe_hyperglycemia",
            Self::SevereHypoglycemia => "severe_hypoglycemia",
            Self::DkaSymptoms => "dka_symptoms",
            Self::Cardiac => "cardiac",
            Self::SevereConfusion => "severe_confusion",
        }
    }

    /// User-facing explanation of why the category is urgent
    pub fn explanation(&self) -> &'static str {
        match self {
            Self::SevereHyperglycemia => {
                "Blood sugar over 400 mg/dL can lead to diabetic ketoacidosis (DKA), a life-threatening condition"
            }
            Self::SevereHypoglycemia => {
                "Blood sugar under 40 mg/dL can cause seizures, loss of consciousness, or death"
            }
            Self::DkaSymptoms => {
                "Diabetic ketoacidosis is a medical emergency requiring immediate hospitalization"
            }
            Self::Cardiac => {
                "Diabetes increases heart attack risk; chest pain requires immediate evaluation"
            }
            Self::SevereConfusion => {
                "Severe confusion with diabetes may indicate dangerous blood sugar levels"
            }
        }
    }
}

impl std::fmt::Display for EmergencyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of scanning a query for emergency indicators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyScanResult {
    pub is_emergency: bool,
    /// Matched categories in scan order, each at most once
    pub emergency_types: Vec<EmergencyType>,
    pub emergency_response: Option<String>,
}

impl EmergencyScanResult {
    /// A scan that found nothing
    pub fn clear() -> Self {
        Self {
            is_emergency: false,
            emergency_types: Vec::new(),
            emergency_response: None,
        }
    }

    /// Check whether a given category was detected
    pub fn contains(&self, emergency_type: EmergencyType) -> bool {
        self.emergency_types.contains(&emergency_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emergency_type_serialization() {
        assert_eq!(
            serde_json::to_string(&EmergencyType::SevereHyperglycemia).unwrap(),
            "\"severe_hyperglycemia\""
        );
        assert_eq!(
            serde_json::to_string(&EmergencyType::DkaSymptoms).unwrap(),
            "\"dka_symptoms\""
        );
    }

    #[test]
    fn test_as_str_matches_serde_tag() {
        for emergency_type in EmergencyType::ALL {
            let json = serde_json::to_string(&emergency_type).unwrap();
            assert_eq!(json, format!("\"{}\"", emergency_type.as_str()));
        }
    }

    #[test]
    fn test_clear_result_serializes_null_response() {
        let json = serde_json::to_value(EmergencyScanResult::clear()).unwrap();

        assert_eq!(json["is_emergency"], false);
        assert!(json["emergency_types"].as_array().unwrap().is_empty());
        assert!(json["emergency_response"].is_null());
    }
}
