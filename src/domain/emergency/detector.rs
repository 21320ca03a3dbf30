//! Pattern-based emergency detection over user queries

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::{EmergencyScanResult, EmergencyType};

/// Compiled patterns for one emergency category
struct EmergencyRule {
    emergency_type: EmergencyType,
    patterns: Vec<Regex>,
}

impl EmergencyRule {
    fn matches(&self, query_lower: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(query_lower))
    }
}

fn rule(emergency_type: EmergencyType, patterns: &[&str]) -> EmergencyRule {
    EmergencyRule {
        emergency_type,
        patterns: patterns
            .iter()
            .map(|p| Regex::new(p).expect("emergency pattern must compile"))
            .collect(),
    }
}

// Patterns run against the lowercased query.
static EMERGENCY_RULES: Lazy<Vec<EmergencyRule>> = Lazy::new(|| {
    vec![
        rule(
            EmergencyType::SevereHyperglycemia,
            &[
                r"blood sugar (over|above|more than) (\d{3,})",
                r"glucose.*?(\d{3,})",
                r"(\d{3,}).*?(blood sugar|glucose)",
            ],
        ),
        rule(
            EmergencyType::SevereHypoglycemia,
            &[
                r"blood sugar (under|below|less than) (40|30|20)",
                r"glucose.*?([1-3]\d)",
                r"(unconscious|passing out|fainted).*?(diabetes|sugar)",
            ],
        ),
        rule(
            EmergencyType::DkaSymptoms,
            &[
                r"fruity.*(breath|smell)",
                r"(vomiting|nausea).*(diabetes|sugar)",
                r"(rapid|fast) breathing.*(diabetes|sugar)",
                r"(diabetic ketoacidosis|dka)",
            ],
        ),
        rule(
            EmergencyType::Cardiac,
            &[
                r"chest pain.*(diabetes|diabetic)",
                r"heart attack.*(diabetes|sugar)",
                r"difficulty breathing.*(diabetes|diabetic)",
            ],
        ),
        rule(
            EmergencyType::SevereConfusion,
            &[
                r"(confused|disoriented|delirious).*(diabetes|sugar)",
                r"can'?t (think|focus).*?(diabetes|sugar)",
            ],
        ),
    ]
});

/// Scan a query for diabetes-related medical emergencies.
///
/// Every matching category is reported, not only the first one. When at
/// least one category matches, the result carries the emergency response
/// text the assistant must return instead of answering the question.
pub fn detect_emergency(query: &str) -> EmergencyScanResult {
    let query_lower = query.to_lowercase();

    let detected: Vec<EmergencyType> = EMERGENCY_RULES
        .iter()
        .filter(|rule| rule.matches(&query_lower))
        .map(|rule| rule.emergency_type)
        .collect();

    if detected.is_empty() {
        return EmergencyScanResult::clear();
    }

    let response = format_emergency_response(&detected);

    EmergencyScanResult {
        is_emergency: true,
        emergency_types: detected,
        emergency_response: Some(response),
    }
}

/// One explanation line per detected category
pub fn format_emergency_reasons(emergency_types: &[EmergencyType]) -> String {
    emergency_types
        .iter()
        .map(|t| format!("- {}", t.explanation()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_emergency_response(emergency_types: &[EmergencyType]) -> String {
    format!(
        r#"🚨 **MEDICAL EMERGENCY DETECTED** 🚨

Based on your message, you may be experiencing a medical emergency related to diabetes.

**IMMEDIATE ACTIONS REQUIRED:**
1. **CALL 911** or your local emergency number immediately
2. If you have a glucagon kit (for low blood sugar), use it now
3. Do NOT drive yourself - wait for emergency services
4. Stay with someone if possible
5. Have your medications and medical information ready

**Why this is urgent:**
{}

**This is an AI assistant. This is NOT a substitute for professional medical care.**
**Please seek immediate medical attention.**

National Diabetes Emergency Hotline: 1-800-DIABETES (1-800-342-2383)
"#,
        format_emergency_reasons(emergency_types)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_patterns_compile() {
        assert_eq!(EMERGENCY_RULES.len(), EmergencyType::ALL.len());

        for (rule, expected) in EMERGENCY_RULES.iter().zip(EmergencyType::ALL) {
            assert_eq!(rule.emergency_type, expected);
            assert!(!rule.patterns.is_empty());
        }
    }

    #[test]
    fn test_hyperglycemia_over_phrasing() {
        let result = detect_emergency("My blood sugar over 450 and I feel awful");

        assert!(result.is_emergency);
        assert!(result.contains(EmergencyType::SevereHyperglycemia));
    }

    #[test]
    fn test_hyperglycemia_glucose_value() {
        for query in [
            "My glucose reading is 520",
            "Glucose meter says 401 right now",
            "I got 600 on my blood sugar test",
            "blood sugar more than 401",
        ] {
            let result = detect_emergency(query);
            assert!(result.is_emergency, "query should be an emergency: {query}");
            assert!(
                result.contains(EmergencyType::SevereHyperglycemia),
                "query should be hyperglycemia: {query}"
            );
        }
    }

    #[test]
    fn test_hypoglycemia_below_phrasing() {
        let result = detect_emergency("Blood sugar below 40, feeling shaky");

        assert!(result.is_emergency);
        assert!(result.contains(EmergencyType::SevereHypoglycemia));
    }

    #[test]
    fn test_unconscious_with_diabetes() {
        let result = detect_emergency("My dad fainted and he has diabetes");

        assert!(result.contains(EmergencyType::SevereHypoglycemia));
    }

    #[test]
    fn test_dka_symptoms() {
        assert!(detect_emergency("fruity breath and very thirsty").contains(EmergencyType::DkaSymptoms));
        assert!(detect_emergency("Could this be DKA?").contains(EmergencyType::DkaSymptoms));
        assert!(
            detect_emergency("vomiting all day, I have diabetes")
                .contains(EmergencyType::DkaSymptoms)
        );
    }

    #[test]
    fn test_cardiac() {
        let result = detect_emergency("chest pain, I am diabetic");

        assert!(result.contains(EmergencyType::Cardiac));
    }

    #[test]
    fn test_confusion() {
        let result = detect_emergency("I can't focus and my sugar feels off");

        assert!(result.contains(EmergencyType::SevereConfusion));
    }

    #[test]
    fn test_reports_all_matching_categories_in_order() {
        let result = detect_emergency("chest pain and fruity breath, I am diabetic");

        assert_eq!(
            result.emergency_types,
            vec![EmergencyType::DkaSymptoms, EmergencyType::Cardiac]
        );
    }

    #[test]
    fn test_each_category_reported_once() {
        let result = detect_emergency("glucose 900, blood sugar over 900, 900 glucose");

        let count = result
            .emergency_types
            .iter()
            .filter(|t| **t == EmergencyType::SevereHyperglycemia)
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_no_emergency() {
        for query in [
            "What are the early symptoms of type 2 diabetes?",
            "How much exercise is recommended per week?",
            "Is brown rice better than white rice?",
        ] {
            let result = detect_emergency(query);
            assert!(!result.is_emergency, "query should be clear: {query}");
            assert!(result.emergency_types.is_empty());
            assert!(result.emergency_response.is_none());
        }
    }

    #[test]
    fn test_response_contains_reasons() {
        let result = detect_emergency("blood sugar over 500");
        let response = result.emergency_response.unwrap();

        assert!(response.contains("MEDICAL EMERGENCY DETECTED"));
        assert!(response.contains("CALL 911"));
        assert!(response.contains("- Blood sugar over 400 mg/dL"));
        assert!(response.contains("1-800-342-2383"));
    }

    #[test]
    fn test_format_emergency_reasons() {
        let reasons =
            format_emergency_reasons(&[EmergencyType::Cardiac, EmergencyType::SevereConfusion]);

        let lines: Vec<&str> = reasons.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("- Diabetes increases heart attack risk"));
        assert!(lines[1].starts_with("- Severe confusion"));
    }
}
