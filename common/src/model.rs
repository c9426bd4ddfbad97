//! Data-transfer objects exchanged with the prediction service and the
//! weather provider.

use serde::{Deserialize, Serialize};

// ─── Prediction ──────────────────────────────────────────────────────────────

/// Result of a `POST /predict` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Display name of the detected disease, e.g. `"Tomato - Late blight"`.
    #[serde(rename = "prediction")]
    pub label: String,
    /// Confidence as a percentage (0..100).
    pub confidence: f64,
    pub remedy: String,
}

impl Prediction {
    /// Confidence formatted the way the result view and report show it.
    pub fn confidence_label(&self) -> String {
        format!("{}%", format_number(self.confidence))
    }

    /// CSS class for the confidence bar.
    pub fn confidence_class(&self) -> &'static str {
        if self.confidence >= 80.0 {
            "confidence high"
        } else if self.confidence >= 60.0 {
            "confidence medium"
        } else {
            "confidence low"
        }
    }
}

/// An image staged for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Whether a MIME type describes an image (drag-and-drop filter).
pub fn is_image_mime(mime: &str) -> bool {
    mime.starts_with("image/")
}

// ─── Insights ────────────────────────────────────────────────────────────────

/// Aggregate statistics returned by `GET /insights`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    #[serde(default)]
    pub total_predictions: u64,
    #[serde(default)]
    pub average_confidence: f64,
    /// Ordered by count, most frequent first.
    #[serde(default)]
    pub frequent_diseases: Vec<DiseaseCount>,
}

/// One row of the frequent-diseases list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseCount {
    pub disease: String,
    pub count: u64,
}

// ─── Health ──────────────────────────────────────────────────────────────────

/// `GET /health` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

// ─── Weather ─────────────────────────────────────────────────────────────────

/// Current conditions shown by the weather widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub place: String,
    /// °C
    pub temperature: f64,
    /// °C
    pub feels_like: f64,
    /// Percent.
    pub humidity: u32,
    /// m/s
    pub wind_speed: f64,
    /// Condition group, e.g. `"Clear"`, `"Rain"`.
    pub condition: String,
    /// Longer description, e.g. `"light rain"`.
    pub description: String,
}

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Format a number without a trailing `.0` for whole values (`87` not `87.0`).
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_from_service_json() {
        let json = r#"{"prediction":"Late Blight","confidence":87,"remedy":"Apply copper fungicide."}"#;
        let p: Prediction = serde_json::from_str(json).unwrap();
        assert_eq!(p.label, "Late Blight");
        assert_eq!(p.confidence_label(), "87%");
        assert_eq!(p.confidence_class(), "confidence high");
    }

    #[test]
    fn test_fractional_confidence_label() {
        let p = Prediction {
            label: "Apple scab".into(),
            confidence: 64.25,
            remedy: String::new(),
        };
        assert_eq!(p.confidence_label(), "64.25%");
        assert_eq!(p.confidence_class(), "confidence medium");
    }

    #[test]
    fn test_insights_missing_fields_default() {
        let i: Insights = serde_json::from_str(r#"{"total_predictions":3}"#).unwrap();
        assert_eq!(i.total_predictions, 3);
        assert!(i.frequent_diseases.is_empty());
    }

    #[test]
    fn test_is_image_mime() {
        assert!(is_image_mime("image/png"));
        assert!(is_image_mime("image/jpeg"));
        assert!(!is_image_mime("application/pdf"));
        assert!(!is_image_mime(""));
    }
}
