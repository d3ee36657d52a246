//! Insight Deriver
//!
//! Joins the contribution list from a prediction response against the
//! guidance catalog. Contributions for unrecognized features are dropped;
//! relative order is kept as the service sent it, and repeated features
//! keep only their first occurrence.

use serde::Serialize;

use super::TipCatalog;
use crate::logic::predict::Contribution;

/// One actionable tip tied to a contributing feature
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PersonalizedTip {
    pub feature: String,
    pub tip: String,
}

/// Filter contributions down to catalog features and attach their tips.
///
/// Output order follows the input sequence; there is no re-sorting by
/// contribution magnitude.
pub fn derive(contributions: &[Contribution], catalog: &TipCatalog) -> Vec<PersonalizedTip> {
    let mut tips: Vec<PersonalizedTip> = Vec::new();

    for c in contributions {
        if tips.iter().any(|t| t.feature == c.feature) {
            continue;
        }
        if let Some(tip) = catalog.tip_for(&c.feature) {
            tips.push(PersonalizedTip {
                feature: c.feature.clone(),
                tip: tip.to_string(),
            });
        }
    }

    tips
}

/// Short narrative sentence for one feature, with a generic fallback for
/// features outside the catalog.
pub fn message_for(feature: &str, catalog: &TipCatalog) -> String {
    catalog
        .message_for(feature)
        .map(str::to_string)
        .unwrap_or_else(|| format!("{} is contributing to your risk.", feature))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::form::{DEMOGRAPHIC_FIELDS, FIELDS};
    use crate::logic::insight::FeatureGuidance;

    fn contribution(feature: &str, value: f64) -> Contribution {
        Contribution {
            feature: feature.to_string(),
            contribution: value,
        }
    }

    #[test]
    fn derive_filters_to_catalog_features() {
        let catalog = TipCatalog::default();
        let contributions = vec![
            contribution("BloodGlucose", 0.4),
            contribution("HDL", 0.3),
            contribution("Unknown", 0.1),
        ];

        let tips = derive(&contributions, &catalog);

        assert_eq!(tips.len(), 2);
        assert_eq!(tips[0].feature, "BloodGlucose");
        assert_eq!(tips[1].feature, "HDL");
    }

    #[test]
    fn derive_preserves_arrival_order() {
        let catalog = TipCatalog::default();
        // Smallest contribution first; order must still follow the input
        let contributions = vec![
            contribution("UricAcid", 0.01),
            contribution("Triglycerides", 0.9),
            contribution("WaistCirc", 0.5),
        ];

        let features: Vec<String> = derive(&contributions, &catalog)
            .into_iter()
            .map(|t| t.feature)
            .collect();

        assert_eq!(features, vec!["UricAcid", "Triglycerides", "WaistCirc"]);
    }

    #[test]
    fn derive_deduplicates_repeated_features() {
        let catalog = TipCatalog::default();
        let contributions = vec![
            contribution("HDL", 0.3),
            contribution("HDL", 0.2),
            contribution("BloodGlucose", 0.1),
        ];

        let tips = derive(&contributions, &catalog);

        assert_eq!(tips.len(), 2);
        assert_eq!(tips[0].feature, "HDL");
    }

    #[test]
    fn derive_output_is_subset_of_catalog() {
        let catalog = TipCatalog::default();
        let contributions = vec![
            contribution("Age", 0.9),
            contribution("Sex", 0.9),
            contribution("BloodGlucose", 0.1),
            contribution("Nonsense", 0.5),
        ];

        for tip in derive(&contributions, &catalog) {
            assert!(catalog.contains(&tip.feature));
        }
    }

    #[test]
    fn derive_with_alternate_catalog() {
        let catalog = TipCatalog::new(vec![FeatureGuidance {
            feature: "HDL",
            tip: "alt tip",
            message: "alt message",
        }]);
        let contributions = vec![
            contribution("BloodGlucose", 0.4),
            contribution("HDL", 0.3),
        ];

        let tips = derive(&contributions, &catalog);

        assert_eq!(tips.len(), 1);
        assert_eq!(tips[0].tip, "alt tip");
    }

    #[test]
    fn message_for_known_feature() {
        let catalog = TipCatalog::default();
        let msg = message_for("HDL", &catalog);
        assert!(msg.contains("HDL"));
    }

    #[test]
    fn message_for_unknown_feature_uses_exact_fallback() {
        let catalog = TipCatalog::default();
        assert_eq!(
            message_for("SleepHours", &catalog),
            "SleepHours is contributing to your risk."
        );
    }

    #[test]
    fn catalog_never_lists_demographics() {
        let catalog = TipCatalog::default();
        for feature in catalog.features() {
            assert!(!DEMOGRAPHIC_FIELDS.contains(&feature));
            // Every catalog key is a real form field
            assert!(FIELDS.iter().any(|f| f.name == feature));
        }
    }
}
