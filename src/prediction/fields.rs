//! The fixed set of medical-measurement inputs and their validation.
//!
//! Field values are held as raw text while the user types; nothing is parsed
//! until submission. Validation is explicit: a submission either yields a
//! complete numeric payload or the full list of per-field problems.

use serde::{Deserialize, Serialize};

/// Closed set of measurement fields, in canonical form order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldKey {
    Pregnancies,
    Glucose,
    BloodPressure,
    SkinThickness,
    Insulin,
    Bmi,
    DiabetesPedigreeFunction,
    Age,
}

impl FieldKey {
    /// All fields in canonical form order.
    pub const ALL: [FieldKey; 8] = [
        FieldKey::Pregnancies,
        FieldKey::Glucose,
        FieldKey::BloodPressure,
        FieldKey::SkinThickness,
        FieldKey::Insulin,
        FieldKey::Bmi,
        FieldKey::DiabetesPedigreeFunction,
        FieldKey::Age,
    ];

    /// Name of the field in the service request body.
    pub fn wire_name(self) -> &'static str {
        match self {
            FieldKey::Pregnancies => "Pregnancies",
            FieldKey::Glucose => "Glucose",
            FieldKey::BloodPressure => "BloodPressure",
            FieldKey::SkinThickness => "SkinThickness",
            FieldKey::Insulin => "Insulin",
            FieldKey::Bmi => "BMI",
            FieldKey::DiabetesPedigreeFunction => "DiabetesPedigreeFunction",
            FieldKey::Age => "Age",
        }
    }

    /// Human-readable label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            FieldKey::Pregnancies => "Pregnancies",
            FieldKey::Glucose => "Glucose (mg/dL)",
            FieldKey::BloodPressure => "Blood pressure (mm Hg)",
            FieldKey::SkinThickness => "Skin thickness (mm)",
            FieldKey::Insulin => "Insulin (mu U/ml)",
            FieldKey::Bmi => "BMI",
            FieldKey::DiabetesPedigreeFunction => "Diabetes pedigree function",
            FieldKey::Age => "Age (years)",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// The 8 measurement inputs, each held as raw text until submission.
///
/// All keys are always present; the empty string is the initial,
/// valid-in-progress value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormFields {
    values: [String; 8],
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text for one field.
    pub fn get(&self, key: FieldKey) -> &str {
        &self.values[key.index()]
    }

    /// Replace the text for one field. Accepts any text; validation is
    /// deferred to submission.
    pub fn set(&mut self, key: FieldKey, text: impl Into<String>) {
        self.values[key.index()] = text.into();
    }

    /// Mutable access for direct text-edit binding in the UI.
    pub fn get_mut(&mut self, key: FieldKey) -> &mut String {
        &mut self.values[key.index()]
    }

    /// Iterate fields in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &str)> {
        FieldKey::ALL
            .iter()
            .map(|key| (*key, self.values[key.index()].as_str()))
    }

    /// Reset every field to the empty string.
    pub fn clear(&mut self) {
        for value in &mut self.values {
            value.clear();
        }
    }

    /// Normalize and parse every field, collecting per-field problems.
    ///
    /// Builds a fresh payload on every call; nothing is cached across
    /// submissions.
    pub fn validate(&self) -> Result<NumericPayload, Vec<FieldError>> {
        let mut values = [0f64; 8];
        let mut errors = Vec::new();
        for key in FieldKey::ALL {
            match parse_field(self.get(key)) {
                Ok(value) => values[key.index()] = value,
                Err(reason) => errors.push(FieldError { key, reason }),
            }
        }
        if errors.is_empty() {
            Ok(NumericPayload { values })
        } else {
            Err(errors)
        }
    }
}

/// Fully parsed measurement values, built fresh per submission.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NumericPayload {
    values: [f64; 8],
}

impl NumericPayload {
    pub fn get(&self, key: FieldKey) -> f64 {
        self.values[key.index()]
    }
}

/// Why a single field failed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldErrorReason {
    /// The field was left empty.
    Empty,
    /// The text did not parse as a finite number after normalization.
    NotANumber,
}

/// A validation problem attached to one field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub key: FieldKey,
    pub reason: FieldErrorReason,
}

impl FieldError {
    /// Message rendered next to the offending input.
    pub fn message(&self) -> String {
        match self.reason {
            FieldErrorReason::Empty => format!("{}: enter a value", self.key.wire_name()),
            FieldErrorReason::NotANumber => {
                format!("{}: not a number", self.key.wire_name())
            }
        }
    }
}

/// Normalize user-entered decimal text: trims whitespace and accepts a
/// decimal comma in place of a decimal point.
pub fn normalize_decimal(text: &str) -> String {
    text.trim().replace(',', ".")
}

fn parse_field(text: &str) -> Result<f64, FieldErrorReason> {
    let normalized = normalize_decimal(text);
    if normalized.is_empty() {
        return Err(FieldErrorReason::Empty);
    }
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(FieldErrorReason::NotANumber),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_keys_always_present_with_latest_text() {
        let mut fields = FormFields::new();
        fields.set(FieldKey::Glucose, "120");
        fields.set(FieldKey::Glucose, "148");
        fields.set(FieldKey::Age, "33");

        let collected: Vec<_> = fields.iter().collect();
        assert_eq!(collected.len(), 8);
        assert_eq!(fields.get(FieldKey::Glucose), "148");
        assert_eq!(fields.get(FieldKey::Age), "33");
        assert_eq!(fields.get(FieldKey::Insulin), "");
    }

    #[test]
    fn decimal_comma_is_normalized_before_parsing() {
        let mut fields = FormFields::new();
        for key in FieldKey::ALL {
            fields.set(key, "1");
        }
        fields.set(FieldKey::Bmi, "33,6");
        let payload = fields.validate().unwrap();
        assert!((payload.get(FieldKey::Bmi) - 33.6).abs() < f64::EPSILON);
    }

    #[test]
    fn all_empty_fields_produce_eight_errors() {
        let fields = FormFields::new();
        let errors = fields.validate().unwrap_err();
        assert_eq!(errors.len(), 8);
        assert!(errors
            .iter()
            .all(|error| error.reason == FieldErrorReason::Empty));
    }

    #[test]
    fn non_numeric_text_is_rejected() {
        let mut fields = FormFields::new();
        for key in FieldKey::ALL {
            fields.set(key, "1");
        }
        fields.set(FieldKey::Insulin, "abc");
        let errors = fields.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].key, FieldKey::Insulin);
        assert_eq!(errors[0].reason, FieldErrorReason::NotANumber);
    }

    #[test]
    fn nan_and_infinity_text_are_rejected() {
        let mut fields = FormFields::new();
        for key in FieldKey::ALL {
            fields.set(key, "1");
        }
        for bad in ["NaN", "inf", "-inf"] {
            fields.set(FieldKey::Glucose, bad);
            let errors = fields.validate().unwrap_err();
            assert_eq!(errors[0].reason, FieldErrorReason::NotANumber);
        }
    }

    #[test]
    fn wire_names_match_the_service_contract() {
        assert_eq!(FieldKey::Bmi.wire_name(), "BMI");
        assert_eq!(
            FieldKey::DiabetesPedigreeFunction.wire_name(),
            "DiabetesPedigreeFunction"
        );
    }
}
