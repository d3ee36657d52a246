//! Input Collector - Form Field Registry & State
//!
//! Holds the raw string value for every form field and produces the typed
//! payload sent to the prediction service. Raw writes are never validated;
//! all coercion and domain checks happen in `to_payload`, before any
//! network call is attempted.

use std::collections::HashMap;

use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};

// ============================================================================
// FIELD REGISTRY
// ============================================================================

/// Declared type of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Whole number input
    Int,
    /// Continuous measurement input
    Float,
    /// Fixed-choice dropdown
    Categorical(&'static [&'static str]),
}

/// One form field: name, declared type, and page metadata
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub unit: Option<&'static str>,
    pub hint: Option<&'static str>,
}

pub const SEX_OPTIONS: &[&str] = &["Male", "Female"];
pub const MARITAL_OPTIONS: &[&str] = &["Single", "Married", "Widowed", "Divorced", "Separated"];
pub const RACE_OPTIONS: &[&str] = &["White", "Asian", "Black", "MexAmerican", "Hispanic", "Other"];
pub const ALBUMINURIA_OPTIONS: &[&str] = &["0", "1"];

/// The full field registry. Array order defines form display order.
pub const FIELDS: [FieldSpec; 11] = [
    FieldSpec {
        name: "Age",
        kind: FieldKind::Int,
        unit: None,
        hint: Some("Age in years"),
    },
    FieldSpec {
        name: "Sex",
        kind: FieldKind::Categorical(SEX_OPTIONS),
        unit: None,
        hint: None,
    },
    FieldSpec {
        name: "Marital",
        kind: FieldKind::Categorical(MARITAL_OPTIONS),
        unit: None,
        hint: None,
    },
    FieldSpec {
        name: "Race",
        kind: FieldKind::Categorical(RACE_OPTIONS),
        unit: None,
        hint: None,
    },
    FieldSpec {
        name: "WaistCirc",
        kind: FieldKind::Float,
        unit: Some("cm"),
        hint: Some("Waist circumference"),
    },
    FieldSpec {
        name: "UricAcid",
        kind: FieldKind::Float,
        unit: Some("mg/dL"),
        hint: Some("Serum uric acid level"),
    },
    FieldSpec {
        name: "BloodGlucose",
        kind: FieldKind::Float,
        unit: Some("mg/dL"),
        hint: Some("Fasting blood glucose"),
    },
    FieldSpec {
        name: "HDL",
        kind: FieldKind::Float,
        unit: Some("mg/dL"),
        hint: Some("Good cholesterol"),
    },
    FieldSpec {
        name: "Triglycerides",
        kind: FieldKind::Float,
        unit: Some("mg/dL"),
        hint: Some("Fat in blood"),
    },
    FieldSpec {
        name: "UrAlbCr",
        kind: FieldKind::Float,
        unit: Some("mg/g"),
        hint: Some("Urine albumin/creatinine"),
    },
    FieldSpec {
        name: "Albuminuria",
        kind: FieldKind::Categorical(ALBUMINURIA_OPTIONS),
        unit: None,
        hint: Some("Albumin in urine (0/1)"),
    },
];

/// Identity/demographic fields. These are never actionable and never
/// appear in tips or insights.
pub const DEMOGRAPHIC_FIELDS: [&str; 4] = ["Age", "Sex", "Marital", "Race"];

/// Look up a field spec by name (case-sensitive)
pub fn field_spec(name: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|f| f.name == name)
}

// ============================================================================
// FORM STATE
// ============================================================================

/// Raw form values, mutated on every keystroke/selection.
///
/// Lifecycle spans the page session; there is no reset.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    values: HashMap<&'static str, String>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the raw value for a field (empty string if never set)
    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    /// Set the raw value for a field. No validation at write time;
    /// unknown field names are the only rejection.
    pub fn set(&mut self, field: &str, value: String) -> AppResult<()> {
        let spec = field_spec(field).ok_or_else(|| AppError::UnknownField(field.to_string()))?;
        self.values.insert(spec.name, value);
        Ok(())
    }

    /// Iterate (spec, raw value) pairs in registry order
    pub fn entries(&self) -> impl Iterator<Item = (&'static FieldSpec, &str)> {
        FIELDS.iter().map(move |spec| (spec, self.get(spec.name)))
    }

    /// Coerce every field per its declared type into the typed payload.
    ///
    /// A failed parse or an out-of-domain choice is a validation error
    /// naming the field; nothing is sent downstream in that case.
    pub fn to_payload(&self) -> AppResult<PredictionPayload> {
        let payload = PredictionPayload {
            age: self.parse_int("Age")? as u32,
            sex: self.require_choice("Sex")?,
            marital: self.require_choice("Marital")?,
            race: self.require_choice("Race")?,
            waist_circ: self.parse_float("WaistCirc")?,
            uric_acid: self.parse_float("UricAcid")?,
            blood_glucose: self.parse_float("BloodGlucose")?,
            hdl: self.parse_float("HDL")?,
            triglycerides: self.parse_float("Triglycerides")?,
            ur_alb_cr: self.parse_float("UrAlbCr")?,
            albuminuria: self.parse_int("Albuminuria")? as u8,
        };

        payload.validate().map_err(|errs| {
            let field = errs
                .field_errors()
                .keys()
                .next()
                .map(|k| k.to_string())
                .unwrap_or_default();
            AppError::Validation {
                field,
                reason: "value out of range".to_string(),
            }
        })?;

        Ok(payload)
    }

    fn parse_int(&self, field: &str) -> AppResult<i64> {
        let raw = self.get(field).trim().to_string();
        self.check_domain(field, &raw)?;
        raw.parse::<i64>().map_err(|_| AppError::Validation {
            field: field.to_string(),
            reason: format!("'{}' is not a whole number", raw),
        })
    }

    fn parse_float(&self, field: &str) -> AppResult<f64> {
        let raw = self.get(field).trim();
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| AppError::Validation {
                field: field.to_string(),
                reason: format!("'{}' is not a number", raw),
            })
    }

    fn require_choice(&self, field: &str) -> AppResult<String> {
        let raw = self.get(field).trim().to_string();
        self.check_domain(field, &raw)?;
        Ok(raw)
    }

    /// For categorical fields, the raw value must be one of the declared options
    fn check_domain(&self, field: &str, raw: &str) -> AppResult<()> {
        if let Some(FieldSpec {
            kind: FieldKind::Categorical(options),
            ..
        }) = field_spec(field)
        {
            if !options.contains(&raw) {
                return Err(AppError::Validation {
                    field: field.to_string(),
                    reason: format!("'{}' is not one of {:?}", raw, options),
                });
            }
        }
        Ok(())
    }
}

// ============================================================================
// TYPED PAYLOAD
// ============================================================================

/// The typed record sent to the prediction service.
///
/// Wire field names match the service contract exactly.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct PredictionPayload {
    #[serde(rename = "Age")]
    #[validate(range(min = 1, max = 120))]
    pub age: u32,

    #[serde(rename = "Sex")]
    pub sex: String,

    #[serde(rename = "Marital")]
    pub marital: String,

    #[serde(rename = "Race")]
    pub race: String,

    #[serde(rename = "WaistCirc")]
    #[validate(range(min = 0.0))]
    pub waist_circ: f64,

    #[serde(rename = "UricAcid")]
    #[validate(range(min = 0.0))]
    pub uric_acid: f64,

    #[serde(rename = "BloodGlucose")]
    #[validate(range(min = 0.0))]
    pub blood_glucose: f64,

    #[serde(rename = "HDL")]
    #[validate(range(min = 0.0))]
    pub hdl: f64,

    #[serde(rename = "Triglycerides")]
    #[validate(range(min = 0.0))]
    pub triglycerides: f64,

    #[serde(rename = "UrAlbCr")]
    #[validate(range(min = 0.0))]
    pub ur_alb_cr: f64,

    #[serde(rename = "Albuminuria")]
    #[validate(range(max = 1))]
    pub albuminuria: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> FormState {
        let mut form = FormState::new();
        for (field, value) in [
            ("Age", "45"),
            ("Sex", "Male"),
            ("Marital", "Married"),
            ("Race", "Asian"),
            ("WaistCirc", "102.5"),
            ("UricAcid", "6.1"),
            ("BloodGlucose", "140"),
            ("HDL", "35"),
            ("Triglycerides", "180"),
            ("UrAlbCr", "12.3"),
            ("Albuminuria", "0"),
        ] {
            form.set(field, value.to_string()).unwrap();
        }
        form
    }

    #[test]
    fn registry_order_is_display_order() {
        let names: Vec<&str> = FIELDS.iter().map(|f| f.name).collect();
        assert_eq!(names[0], "Age");
        assert_eq!(names[10], "Albuminuria");
        assert_eq!(names.len(), 11);
    }

    #[test]
    fn set_and_get_roundtrip() {
        let mut form = FormState::new();
        assert_eq!(form.get("Age"), "");
        form.set("Age", "52".to_string()).unwrap();
        assert_eq!(form.get("Age"), "52");
    }

    #[test]
    fn set_rejects_unknown_field() {
        let mut form = FormState::new();
        let err = form.set("BloodPressure", "120".to_string()).unwrap_err();
        assert!(matches!(err, AppError::UnknownField(_)));
    }

    #[test]
    fn set_does_not_validate_at_write_time() {
        let mut form = FormState::new();
        // Garbage is accepted on write; rejection happens at payload time
        form.set("Age", "not-a-number".to_string()).unwrap();
        assert_eq!(form.get("Age"), "not-a-number");
    }

    #[test]
    fn payload_coerces_all_fields() {
        let payload = filled_form().to_payload().unwrap();
        assert_eq!(payload.age, 45);
        assert_eq!(payload.sex, "Male");
        assert_eq!(payload.blood_glucose, 140.0);
        assert_eq!(payload.albuminuria, 0);
    }

    #[test]
    fn payload_serializes_exact_wire_names() {
        let json = serde_json::to_value(filled_form().to_payload().unwrap()).unwrap();
        for key in [
            "Age",
            "Sex",
            "Marital",
            "Race",
            "WaistCirc",
            "UricAcid",
            "BloodGlucose",
            "HDL",
            "Triglycerides",
            "UrAlbCr",
            "Albuminuria",
        ] {
            assert!(json.get(key).is_some(), "missing wire field {}", key);
        }
    }

    #[test]
    fn non_numeric_field_is_rejected_before_send() {
        let mut form = filled_form();
        form.set("BloodGlucose", "abc".to_string()).unwrap();
        let err = form.to_payload().unwrap_err();
        match err {
            AppError::Validation { field, .. } => assert_eq!(field, "BloodGlucose"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn empty_field_is_rejected() {
        let mut form = filled_form();
        form.set("HDL", "".to_string()).unwrap();
        assert!(form.to_payload().is_err());
    }

    #[test]
    fn categorical_domain_is_enforced() {
        let mut form = filled_form();
        form.set("Sex", "Other".to_string()).unwrap();
        let err = form.to_payload().unwrap_err();
        assert!(matches!(err, AppError::Validation { field, .. } if field == "Sex"));
    }

    #[test]
    fn out_of_range_age_is_rejected() {
        let mut form = filled_form();
        form.set("Age", "500".to_string()).unwrap();
        let err = form.to_payload().unwrap_err();
        assert!(matches!(err, AppError::Validation { field, .. } if field == "Age"));
    }
}
