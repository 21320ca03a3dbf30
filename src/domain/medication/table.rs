//! Known diabetes drug classes

/// Static safety record for one drug class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrugClass {
    /// Matched as a substring of the lowercased medication name
    pub key: &'static str,
    pub contraindications: &'static [&'static str],
    pub interactions: &'static [&'static str],
    pub warning: &'static str,
}

/// Drug classes in lookup order
pub static DRUG_CLASSES: &[DrugClass] = &[
    DrugClass {
        key: "metformin",
        contraindications: &[
            "kidney disease",
            "renal failure",
            "dialysis",
            "contrast dye",
            "iodine",
        ],
        interactions: &["alcohol", "excessive alcohol", "diuretic"],
        warning: "Metformin should be stopped before surgery or contrast imaging procedures.",
    },
    DrugClass {
        key: "insulin",
        contraindications: &["hypoglycemia", "low blood sugar"],
        interactions: &["beta blocker", "propranolol", "ace inhibitor"],
        warning: "Insulin dosing must be carefully managed to avoid severe hypoglycemia.",
    },
    DrugClass {
        key: "glipizide",
        contraindications: &["sulfa allergy"],
        interactions: &["warfarin", "coumadin", "nsaid", "ibuprofen"],
        warning: "Sulfonylureas like glipizide can cause hypoglycemia, especially with missed meals.",
    },
    DrugClass {
        key: "glyburide",
        contraindications: &["liver disease", "sulfa allergy"],
        interactions: &["warfarin", "coumadin", "nsaid"],
        warning: "Glyburide has higher hypoglycemia risk than other sulfonylureas.",
    },
    DrugClass {
        key: "sitagliptin",
        contraindications: &["pancreatitis", "kidney disease"],
        interactions: &["digoxin"],
        warning: "DPP-4 inhibitors rarely may increase pancreatitis risk.",
    },
];

/// Drug classes whose key appears in the given medication name
pub fn matching_classes(medication_lower: &str) -> impl Iterator<Item = &'static DrugClass> + '_ {
    DRUG_CLASSES
        .iter()
        .filter(move |class| medication_lower.contains(class.key))
}
