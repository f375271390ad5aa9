//! Wire client for the remote prediction service.
//!
//! The request carries the 8 parsed measurements plus an explicit model list.
//! The response decoder is strict: the only accepted shape is a JSON object
//! mapping known model identifiers to result records. Anything else — flat
//! legacy shapes, unknown model keys, missing required fields, out-of-range
//! confidences — is reported as a decode error instead of being read
//! field-by-field.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::http_client;

use super::fields::{FieldKey, NumericPayload};
use super::models::{ModelId, ModelSelection};

const MAX_PREDICT_RESPONSE_BYTES: usize = 8 * 1024 * 1024;

/// One model's result record from the service.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ModelResult {
    /// Prediction label, e.g. "Diabetic" / "Not Diabetic".
    pub prediction: String,
    /// Confidence as a 0-1 fraction.
    pub confidence: f64,
    /// Held-out accuracy of the model, when the service reports it.
    #[serde(default)]
    pub accuracy: Option<f64>,
    /// Base64-encoded PNG visualizing the explanation, when present.
    #[serde(default)]
    pub lime_explanation_image: Option<String>,
    /// Free-text explanation, when present.
    #[serde(default)]
    pub text_explanation: Option<String>,
}

/// All model results from one accepted response, keyed by model.
///
/// Replaced wholesale on each accepted response; never merged across calls.
pub type ResultSet = BTreeMap<ModelId, ModelResult>;

/// Failure modes of a prediction call.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    /// The host was unreachable or the transfer failed or timed out.
    #[error("Could not reach the prediction service: {0}")]
    Transport(String),
    /// The service answered with a non-2xx status.
    #[error("Prediction service returned HTTP {code}: {body}")]
    Status { code: u16, body: String },
    /// The service reported an error object.
    #[error("Prediction service error: {0}")]
    Server(String),
    /// The response body did not match the expected contract.
    #[error("Unexpected response from the prediction service: {0}")]
    Decode(String),
}

#[derive(Debug, Serialize)]
struct PredictRequestBody {
    #[serde(rename = "Pregnancies")]
    pregnancies: f64,
    #[serde(rename = "Glucose")]
    glucose: f64,
    #[serde(rename = "BloodPressure")]
    blood_pressure: f64,
    #[serde(rename = "SkinThickness")]
    skin_thickness: f64,
    #[serde(rename = "Insulin")]
    insulin: f64,
    #[serde(rename = "BMI")]
    bmi: f64,
    #[serde(rename = "DiabetesPedigreeFunction")]
    diabetes_pedigree_function: f64,
    #[serde(rename = "Age")]
    age: f64,
    models: Vec<&'static str>,
}

fn build_request_body(payload: &NumericPayload, selection: &ModelSelection) -> PredictRequestBody {
    PredictRequestBody {
        pregnancies: payload.get(FieldKey::Pregnancies),
        glucose: payload.get(FieldKey::Glucose),
        blood_pressure: payload.get(FieldKey::BloodPressure),
        skin_thickness: payload.get(FieldKey::SkinThickness),
        insulin: payload.get(FieldKey::Insulin),
        bmi: payload.get(FieldKey::Bmi),
        diabetes_pedigree_function: payload.get(FieldKey::DiabetesPedigreeFunction),
        age: payload.get(FieldKey::Age),
        models: selection
            .effective()
            .into_iter()
            .map(ModelId::wire_name)
            .collect(),
    }
}

/// POST one prediction request and decode the per-model result mapping.
pub fn predict(
    endpoint: &str,
    payload: &NumericPayload,
    selection: &ModelSelection,
) -> Result<ResultSet, PredictError> {
    let body = build_request_body(payload, selection);
    match serde_json::to_string(&body) {
        Ok(json) => tracing::debug!(endpoint, payload = %json, "sending prediction request"),
        Err(err) => tracing::debug!(endpoint, "sending prediction request (unloggable: {err})"),
    }

    let request = http_client::agent()
        .post(endpoint)
        .set("Accept", "application/json")
        .set("Content-Type", "application/json");
    let response = match request.send_json(&body) {
        Ok(response) => response,
        Err(ureq::Error::Status(code, response)) => {
            let body = read_body_limited(response, MAX_PREDICT_RESPONSE_BYTES)
                .unwrap_or_else(|err| err);
            tracing::debug!(code, body = %body, "prediction request rejected");
            return Err(PredictError::Status { code, body });
        }
        Err(ureq::Error::Transport(err)) => {
            tracing::debug!(error = %err, "prediction request failed in transport");
            return Err(PredictError::Transport(err.to_string()));
        }
    };

    let text = read_body_limited(response, MAX_PREDICT_RESPONSE_BYTES)
        .map_err(PredictError::Decode)?;
    tracing::debug!(bytes = text.len(), body = %text, "prediction response received");
    parse_prediction_response(&text)
}

fn parse_prediction_response(body: &str) -> Result<ResultSet, PredictError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(PredictError::Decode("Empty response body".to_string()));
    }
    let value: serde_json::Value = serde_json::from_str(trimmed)
        .map_err(|err| PredictError::Decode(err.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| PredictError::Decode("Response is not a JSON object".to_string()))?;

    if let Some(error) = object.get("error") {
        let message = error
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(PredictError::Server(message));
    }
    if object.is_empty() {
        return Err(PredictError::Decode(
            "Response contained no model results".to_string(),
        ));
    }

    let mut results = ResultSet::new();
    for (key, entry) in object {
        let Some(model) = ModelId::from_wire(key) else {
            return Err(PredictError::Decode(format!(
                "Unknown model identifier '{key}' in response"
            )));
        };
        let result: ModelResult = serde_json::from_value(entry.clone()).map_err(|err| {
            PredictError::Decode(format!("Invalid result record for '{key}': {err}"))
        })?;
        if !result.confidence.is_finite() || !(0.0..=1.0).contains(&result.confidence) {
            return Err(PredictError::Decode(format!(
                "Confidence for '{key}' is outside 0-1: {}",
                result.confidence
            )));
        }
        results.insert(model, result);
    }
    Ok(results)
}

fn read_body_limited(response: ureq::Response, max_bytes: usize) -> Result<String, String> {
    let bytes = http_client::read_response_bytes(response, max_bytes)
        .map_err(|err| err.to_string())?;
    String::from_utf8(bytes).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::fields::FormFields;

    fn payload() -> NumericPayload {
        let mut fields = FormFields::new();
        let values = ["2", "148", "72", "35", "0", "33,6", "0.627", "50"];
        for (key, value) in FieldKey::ALL.into_iter().zip(values) {
            fields.set(key, value);
        }
        fields.validate().unwrap()
    }

    #[test]
    fn request_body_uses_contract_names_and_all_models_by_default() {
        let body = build_request_body(&payload(), &ModelSelection::new());
        let json = serde_json::to_value(&body).unwrap();
        for key in FieldKey::ALL {
            assert!(json.get(key.wire_name()).is_some(), "{}", key.wire_name());
        }
        assert_eq!(
            json["models"],
            serde_json::json!(["logistic_regression", "random_forest", "gradient_boosting"])
        );
        assert_eq!(json["BMI"], serde_json::json!(33.6));
    }

    #[test]
    fn request_body_carries_only_the_selected_models() {
        let mut selection = ModelSelection::new();
        selection.toggle(ModelId::RandomForest);
        let body = build_request_body(&payload(), &selection);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["models"], serde_json::json!(["random_forest"]));
    }

    #[test]
    fn parses_a_single_model_mapping_exactly() {
        let body = r#"{"logistic_regression":{"prediction":"Positive","confidence":0.82,"lime_explanation_image":"","text_explanation":"x"}}"#;
        let results = parse_prediction_response(body).unwrap();
        assert_eq!(results.len(), 1);
        let entry = &results[&ModelId::LogisticRegression];
        assert_eq!(entry.prediction, "Positive");
        assert!((entry.confidence - 0.82).abs() < f64::EPSILON);
        assert_eq!(entry.accuracy, None);
        assert_eq!(entry.lime_explanation_image.as_deref(), Some(""));
        assert_eq!(entry.text_explanation.as_deref(), Some("x"));
    }

    #[test]
    fn tolerates_extra_informational_fields_per_model() {
        let body = r#"{"random_forest":{"prediction":"Not Diabetic","confidence":0.74,"accuracy":0.81,"lime_explanation":[["Glucose",0.21]]}}"#;
        let results = parse_prediction_response(body).unwrap();
        assert_eq!(results[&ModelId::RandomForest].accuracy, Some(0.81));
    }

    #[test]
    fn rejects_legacy_flat_shapes() {
        for body in [
            r#"{"Diagnosis prediction": 1}"#,
            r#"{"Prediction":"Positive","Probability":0.9,"RiskLevel":"High"}"#,
        ] {
            let err = parse_prediction_response(body).unwrap_err();
            assert!(matches!(err, PredictError::Decode(_)), "{body}");
        }
    }

    #[test]
    fn rejects_non_object_bodies() {
        for body in ["[]", "42", "\"ok\"", "", "not json"] {
            let err = parse_prediction_response(body).unwrap_err();
            assert!(matches!(err, PredictError::Decode(_)), "{body:?}");
        }
    }

    #[test]
    fn rejects_missing_required_fields() {
        let body = r#"{"random_forest":{"confidence":0.5}}"#;
        let err = parse_prediction_response(body).unwrap_err();
        assert!(matches!(err, PredictError::Decode(_)));
    }

    #[test]
    fn rejects_out_of_range_confidence() {
        let body = r#"{"random_forest":{"prediction":"Diabetic","confidence":1.7}}"#;
        let err = parse_prediction_response(body).unwrap_err();
        assert!(matches!(err, PredictError::Decode(_)));
    }

    #[test]
    fn surfaces_server_error_objects() {
        let err = parse_prediction_response(r#"{"error":"scaler not loaded"}"#).unwrap_err();
        assert!(matches!(err, PredictError::Server(message) if message == "scaler not loaded"));
    }

    #[test]
    fn empty_mapping_is_a_decode_error() {
        let err = parse_prediction_response("{}").unwrap_err();
        assert!(matches!(err, PredictError::Decode(_)));
    }
}
