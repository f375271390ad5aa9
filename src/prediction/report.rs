//! Self-contained HTML report of one prediction round.
//!
//! The document echoes the submitted inputs as a table and renders one
//! section per model with its prediction, confidence, optional accuracy,
//! inline explanation image, and free-text explanation. Everything is
//! embedded so the file can be shared as-is.

use base64::Engine as _;
use time::{OffsetDateTime, format_description::FormatItem, macros::format_description};

use super::api::{ModelResult, ResultSet};
use super::fields::FormFields;

/// Render the report document for the given inputs and results.
pub fn render_report(fields: &FormFields, results: &ResultSet) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Diabetes prediction report</title>\n");
    html.push_str(STYLE_BLOCK);
    html.push_str("</head>\n<body>\n");
    html.push_str("<h1>Diabetes prediction report</h1>\n");

    html.push_str("<h2>Submitted measurements</h2>\n<table>\n");
    html.push_str("<tr><th>Measurement</th><th>Value</th></tr>\n");
    for (key, value) in fields.iter() {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>\n",
            escape_html(key.wire_name()),
            escape_html(value)
        ));
    }
    html.push_str("</table>\n");

    html.push_str("<h2>Model results</h2>\n");
    for (model, result) in results {
        html.push_str(&format!(
            "<section class=\"model\" id=\"{}\">\n<h3>{}</h3>\n",
            escape_html(model.wire_name()),
            escape_html(model.display_name())
        ));
        html.push_str(&render_result_body(result));
        html.push_str("</section>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_result_body(result: &ModelResult) -> String {
    let mut body = String::new();
    body.push_str(&format!(
        "<p>Prediction: <strong>{}</strong></p>\n",
        escape_html(&result.prediction)
    ));
    body.push_str(&format!(
        "<p>Confidence: {}</p>\n",
        format_fraction(result.confidence)
    ));
    if let Some(accuracy) = result.accuracy {
        body.push_str(&format!(
            "<p>Model accuracy: {}</p>\n",
            format_fraction(accuracy)
        ));
    }
    if let Some(image) = embeddable_image(result.lime_explanation_image.as_deref()) {
        body.push_str(&format!(
            "<img alt=\"Explanation\" src=\"data:image/png;base64,{image}\">\n"
        ));
    }
    if let Some(text) = result
        .text_explanation
        .as_deref()
        .filter(|text| !text.trim().is_empty())
    {
        body.push_str(&format!("<p>{}</p>\n", escape_html(text)));
    }
    body
}

/// Suggested filename for a report exported at `now`.
pub fn suggested_file_name(now: OffsetDateTime) -> String {
    const NAME_FORMAT: &[FormatItem<'_>] =
        format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
    match now.format(NAME_FORMAT) {
        Ok(stamp) => format!("diasense_report_{stamp}.html"),
        Err(_) => "diasense_report.html".to_string(),
    }
}

/// Return the base64 payload only when it decodes to a non-empty blob, so the
/// document never embeds a broken image tag.
fn embeddable_image(encoded: Option<&str>) -> Option<&str> {
    let encoded = encoded?.trim();
    if encoded.is_empty() {
        return None;
    }
    match base64::engine::general_purpose::STANDARD.decode(encoded) {
        Ok(bytes) if !bytes.is_empty() => Some(encoded),
        _ => None,
    }
}

fn format_fraction(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

const STYLE_BLOCK: &str = "<style>\n\
    body { font-family: sans-serif; margin: 2em; color: #222; }\n\
    table { border-collapse: collapse; }\n\
    td, th { border: 1px solid #999; padding: 4px 10px; text-align: left; }\n\
    section.model { margin: 1.5em 0; padding: 1em; border: 1px solid #ccc; }\n\
    img { max-width: 640px; display: block; margin-top: 0.5em; }\n\
    </style>\n";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::fields::FieldKey;
    use crate::prediction::models::ModelId;

    fn sample_results() -> ResultSet {
        let mut results = ResultSet::new();
        results.insert(
            ModelId::LogisticRegression,
            ModelResult {
                prediction: "Diabetic".into(),
                confidence: 0.82,
                accuracy: Some(0.78),
                lime_explanation_image: None,
                text_explanation: Some("Glucose dominated the outcome".into()),
            },
        );
        results.insert(
            ModelId::RandomForest,
            ModelResult {
                prediction: "Not Diabetic".into(),
                confidence: 0.64,
                accuracy: None,
                lime_explanation_image: Some("".into()),
                text_explanation: None,
            },
        );
        results
    }

    #[test]
    fn report_mentions_every_field_and_model() {
        let mut fields = FormFields::new();
        fields.set(FieldKey::Glucose, "148");
        let html = render_report(&fields, &sample_results());
        for key in FieldKey::ALL {
            assert!(html.contains(key.wire_name()), "{}", key.wire_name());
        }
        assert!(html.contains("Logistic Regression"));
        assert!(html.contains("Random Forest"));
        assert!(html.contains("82.0%"));
        assert!(html.contains("78.0%"));
    }

    #[test]
    fn input_text_is_escaped() {
        let mut fields = FormFields::new();
        fields.set(FieldKey::Age, "<script>alert(1)</script>");
        let html = render_report(&fields, &sample_results());
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn empty_or_invalid_images_are_not_embedded() {
        let html = render_report(&FormFields::new(), &sample_results());
        assert!(!html.contains("data:image/png"));

        let mut results = sample_results();
        results
            .get_mut(&ModelId::RandomForest)
            .unwrap()
            .lime_explanation_image = Some("!!!not-base64!!!".into());
        let html = render_report(&FormFields::new(), &results);
        assert!(!html.contains("data:image/png"));
    }

    #[test]
    fn valid_images_are_embedded_inline() {
        let encoded = base64::engine::general_purpose::STANDARD.encode([0x89u8, 0x50, 0x4e, 0x47]);
        let mut results = sample_results();
        results
            .get_mut(&ModelId::LogisticRegression)
            .unwrap()
            .lime_explanation_image = Some(encoded.clone());
        let html = render_report(&FormFields::new(), &results);
        assert!(html.contains(&format!("data:image/png;base64,{encoded}")));
    }

    #[test]
    fn suggested_name_is_timestamped_html() {
        let fixed = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        assert_eq!(
            suggested_file_name(fixed),
            "diasense_report_2023-11-14_22-13-20.html"
        );
    }
}
