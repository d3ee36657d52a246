//! Insight Module - Feature Guidance Catalog & Deriver
//!
//! Maps raw feature contributions from the prediction service into
//! user-facing insight messages and prevention tips.

pub mod deriver;

pub use deriver::{derive, message_for, PersonalizedTip};

use once_cell::sync::Lazy;

/// One catalog row: the guidance attached to a recognized feature
#[derive(Debug, Clone, Copy)]
pub struct FeatureGuidance {
    pub feature: &'static str,
    /// Actionable prevention tip
    pub tip: &'static str,
    /// Short narrative sentence shown in the insight list
    pub message: &'static str,
}

/// Immutable feature -> guidance catalog.
///
/// Passed into the deriver rather than read as a global, so tests can
/// substitute alternate tables.
#[derive(Debug, Clone)]
pub struct TipCatalog {
    rows: Vec<FeatureGuidance>,
}

impl TipCatalog {
    pub fn new(rows: Vec<FeatureGuidance>) -> Self {
        Self { rows }
    }

    pub fn contains(&self, feature: &str) -> bool {
        self.rows.iter().any(|r| r.feature == feature)
    }

    pub fn tip_for(&self, feature: &str) -> Option<&'static str> {
        self.rows.iter().find(|r| r.feature == feature).map(|r| r.tip)
    }

    pub fn message_for(&self, feature: &str) -> Option<&'static str> {
        self.rows
            .iter()
            .find(|r| r.feature == feature)
            .map(|r| r.message)
    }

    pub fn features(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rows.iter().map(|r| r.feature)
    }
}

impl Default for TipCatalog {
    fn default() -> Self {
        DEFAULT_CATALOG.clone()
    }
}

/// The shipped catalog. Feature keys are case-sensitive and cover the
/// seven actionable measurements; demographic fields are never listed.
static DEFAULT_CATALOG: Lazy<TipCatalog> = Lazy::new(|| {
    TipCatalog::new(vec![
        FeatureGuidance {
            feature: "BloodGlucose",
            tip: "Control your blood sugar by reducing refined carbs, sugar-sweetened beverages, and increasing fiber intake.",
            message: "🩸 You have elevated blood glucose levels, which increase your metabolic risk.",
        },
        FeatureGuidance {
            feature: "HDL",
            tip: "Boost your HDL by incorporating healthy fats like olive oil, fatty fish, and exercising regularly.",
            message: "📉 Your HDL (good cholesterol) is lower than ideal.",
        },
        FeatureGuidance {
            feature: "Triglycerides",
            tip: "Reduce triglycerides by cutting down on alcohol, processed sugar, and saturated fats.",
            message: "📈 High triglyceride levels are contributing to your result.",
        },
        FeatureGuidance {
            feature: "WaistCirc",
            tip: "Engage in daily physical activity and reduce caloric intake to lower abdominal fat.",
            message: "📏 Abdominal obesity (waist circumference) is a significant factor.",
        },
        FeatureGuidance {
            feature: "UricAcid",
            tip: "Limit red meat and sugary foods, and drink plenty of water to lower uric acid levels.",
            message: "🧪 Elevated uric acid is associated with increased inflammation and risk.",
        },
        FeatureGuidance {
            feature: "UrAlbCr",
            tip: "Manage your blood pressure and sugar to protect your kidney function and reduce albumin-creatinine ratio.",
            message: "🔬 Your urine albumin-creatinine ratio suggests potential kidney stress.",
        },
        FeatureGuidance {
            feature: "Albuminuria",
            tip: "Monitor blood pressure, control blood sugar, and reduce sodium intake to slow kidney damage.",
            message: "🧫 Signs of albuminuria indicate kidney involvement.",
        },
    ])
});

/// Reassurance copy for the low-risk branch
pub const LOW_RISK_REASSURANCE: &str =
    "Great news! Your predicted risk of Metabolic Syndrome is low. Keep up the healthy lifestyle to maintain it!";
