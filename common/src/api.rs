//! HTTP client for the prediction service.
//!
//! Three calls, each terminal on failure: no retries, no timeout, no
//! backoff. Every failure is normalized into [`ApiError::Remote`] carrying
//! the service's own `error` message when the response body has one.

use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::model::{HealthStatus, ImageUpload, Insights, Prediction};

pub const PREDICT_FALLBACK: &str = "Failed to predict disease";
pub const INSIGHTS_FALLBACK: &str = "Failed to fetch insights";
pub const HEALTH_FALLBACK: &str = "API is not available";

/// Something that can classify an uploaded image.
#[allow(async_fn_in_trait)]
pub trait Predictor {
    async fn predict(&self, image: ImageUpload) -> Result<Prediction, ApiError>;
}

/// Thin wrapper around a configured `reqwest` client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiClient {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `POST /predict` with the image as multipart field `image`.
    pub async fn predict(&self, image: ImageUpload) -> Result<Prediction, ApiError> {
        let file_name = image.file_name.clone();
        let part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.mime)
            .map_err(|e| {
                warn!("Invalid MIME type for {file_name}: {e}");
                ApiError::Remote(PREDICT_FALLBACK.into())
            })?;
        let form = Form::new().part("image", part);

        let sent = self.client.post(self.url("/predict")).multipart(form).send().await;
        let prediction: Prediction = read_json(sent, PREDICT_FALLBACK, "POST /predict").await?;
        debug!(
            "Prediction for {file_name}: {} ({})",
            prediction.label,
            prediction.confidence_label()
        );
        Ok(prediction)
    }

    /// `GET /insights`.
    pub async fn insights(&self) -> Result<Insights, ApiError> {
        let sent = self.client.get(self.url("/insights")).send().await;
        read_json(sent, INSIGHTS_FALLBACK, "GET /insights").await
    }

    /// `GET /health`. Any failure reports the service as unavailable.
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        let sent = self.client.get(self.url("/health")).send().await;
        read_json::<HealthStatus>(sent, HEALTH_FALLBACK, "GET /health")
            .await
            .map_err(|_| ApiError::Remote(HEALTH_FALLBACK.into()))
    }
}

impl Predictor for ApiClient {
    async fn predict(&self, image: ImageUpload) -> Result<Prediction, ApiError> {
        ApiClient::predict(self, image).await
    }
}

// ── response handling ────────────────────────────────────────────────────

async fn read_json<T: DeserializeOwned>(
    sent: Result<reqwest::Response, reqwest::Error>,
    fallback: &str,
    what: &str,
) -> Result<T, ApiError> {
    let resp = match sent {
        Ok(r) => r,
        Err(e) => {
            warn!("{what} failed: {e}");
            return Err(normalize_failure(None, fallback));
        }
    };

    let status = resp.status();
    let body = match resp.text().await {
        Ok(b) => b,
        Err(e) => {
            warn!("{what}: cannot read body: {e}");
            return Err(normalize_failure(None, fallback));
        }
    };

    if !status.is_success() {
        warn!("{what} returned {status}");
        return Err(normalize_failure(Some(&body), fallback));
    }

    serde_json::from_str(&body).map_err(|e| {
        warn!("{what}: cannot decode response: {e}");
        normalize_failure(None, fallback)
    })
}

/// Map a failed call to the message shown to the user: the `error` field
/// of a JSON body when present, else `fallback`.
pub fn normalize_failure(body: Option<&str>, fallback: &str) -> ApiError {
    let message = body
        .and_then(|b| serde_json::from_str::<serde_json::Value>(b).ok())
        .and_then(|v| v.get("error")?.as_str().map(str::to_string))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| fallback.to_string());
    ApiError::Remote(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_http::respond_once;

    #[test]
    fn test_error_field_is_surfaced() {
        let err = normalize_failure(Some(r#"{"error":"model unavailable"}"#), PREDICT_FALLBACK);
        assert_eq!(err.to_string(), "model unavailable");
    }

    #[test]
    fn test_unparseable_body_uses_fallback() {
        let err = normalize_failure(Some("<html>502 Bad Gateway</html>"), PREDICT_FALLBACK);
        assert_eq!(err.message(), PREDICT_FALLBACK);

        let err = normalize_failure(Some(r#"{"detail":"nope"}"#), INSIGHTS_FALLBACK);
        assert_eq!(err.message(), INSIGHTS_FALLBACK);

        let err = normalize_failure(None, INSIGHTS_FALLBACK);
        assert_eq!(err, ApiError::Remote(INSIGHTS_FALLBACK.into()));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = ApiClient::new("http://localhost:5000/");
        assert_eq!(client.url("/health"), "http://localhost:5000/health");
    }

    fn leaf() -> ImageUpload {
        ImageUpload {
            file_name: "leaf.jpg".into(),
            mime: "image/jpeg".into(),
            bytes: vec![0xFF, 0xD8, 0xFF],
        }
    }

    #[tokio::test]
    async fn test_error_status_surfaces_service_message() {
        let base = respond_once("500 Internal Server Error", r#"{"error":"model unavailable"}"#).await;
        let err = ApiClient::new(base).predict(leaf()).await.unwrap_err();
        assert_eq!(err, ApiError::Remote("model unavailable".into()));

        let base = respond_once("500 Internal Server Error", r#"{"error":"model unavailable"}"#).await;
        let err = ApiClient::new(base).insights().await.unwrap_err();
        assert_eq!(err, ApiError::Remote("model unavailable".into()));
    }

    #[tokio::test]
    async fn test_error_status_without_message_uses_fallback() {
        let base = respond_once("502 Bad Gateway", "oops").await;
        let err = ApiClient::new(base).insights().await.unwrap_err();
        assert_eq!(err, ApiError::Remote(INSIGHTS_FALLBACK.into()));

        let base = respond_once("502 Bad Gateway", "oops").await;
        let err = ApiClient::new(base).predict(leaf()).await.unwrap_err();
        assert_eq!(err, ApiError::Remote(PREDICT_FALLBACK.into()));
    }

    #[tokio::test]
    async fn test_undecodable_success_body_uses_fallback() {
        let base = respond_once("200 OK", "not-json").await;
        let err = ApiClient::new(base).predict(leaf()).await.unwrap_err();
        assert_eq!(err, ApiError::Remote(PREDICT_FALLBACK.into()));

        let base = respond_once("200 OK", "not-json").await;
        let err = ApiClient::new(base).insights().await.unwrap_err();
        assert_eq!(err, ApiError::Remote(INSIGHTS_FALLBACK.into()));
    }

    #[tokio::test]
    async fn test_successful_prediction_is_decoded() {
        let base = respond_once(
            "200 OK",
            r#"{"prediction":"Tomato - Late blight","confidence":91.5,"remedy":"Remove infected leaves."}"#,
        )
        .await;
        let p = ApiClient::new(base).predict(leaf()).await.unwrap();
        assert_eq!(p.label, "Tomato - Late blight");
        assert_eq!(p.confidence_label(), "91.5%");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_normalized() {
        // Port 9 (discard) on loopback refuses connections.
        let client = ApiClient::new("http://127.0.0.1:9");
        let err = client.insights().await.unwrap_err();
        assert_eq!(err.message(), INSIGHTS_FALLBACK);

        let err = client.health().await.unwrap_err();
        assert_eq!(err.message(), HEALTH_FALLBACK);

        let upload = ImageUpload {
            file_name: "leaf.jpg".into(),
            mime: "image/jpeg".into(),
            bytes: vec![0xFF, 0xD8, 0xFF],
        };
        let err = client.predict(upload).await.unwrap_err();
        assert_eq!(err.message(), PREDICT_FALLBACK);
    }
}
