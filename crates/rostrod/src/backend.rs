//! HTTP client for the external facial-analysis engine service.
//!
//! The engine runs as its own service exposing `/analyze` and `/verify`
//! JSON endpoints that accept Base64 data-URI images. Decoded grids are
//! re-encoded as lossless PNG before shipping, so the engine always
//! receives a normalized 3-channel image.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::RgbImage;
use rostro_core::{
    Attribute, DetectorBackend, DistanceMetric, EngineError, FaceEngine, FaceScan, MatchScan,
};
use serde_json::{json, Value};
use std::io::Cursor;

pub struct AnalysisService {
    http: reqwest::Client,
    base_url: String,
}

impl AnalysisService {
    /// Build a client for the engine at `base_url`. No request timeout is
    /// configured; the caller-side timeout is the only safeguard.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, EngineError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| EngineError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(url, status = status.as_u16(), "engine rejected request");
            return Err(EngineError::Backend {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| EngineError::Malformed(e.to_string()))
    }
}

/// Lossless PNG re-encode, shipped as the data-URI form the engine accepts
/// in place of a file path.
fn to_data_uri(image: &RgbImage) -> Result<String, EngineError> {
    let mut buf = Vec::new();
    image.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)?;
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(&buf)))
}

/// Pull the scan list out of an analyze reply. Accepts a bare array or the
/// service's `{"results": [...]}` envelope; elements that do not parse as
/// scans are dropped rather than failing the request.
fn parse_scans(reply: Value) -> Vec<FaceScan> {
    let items = match reply {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(items)) => items,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<FaceScan>(item).ok())
        .collect()
}

#[async_trait]
impl FaceEngine for AnalysisService {
    async fn analyze(
        &self,
        image: &RgbImage,
        attributes: &[Attribute],
        detector: DetectorBackend,
        enforce_detection: bool,
    ) -> Result<Vec<FaceScan>, EngineError> {
        let body = json!({
            "img_path": to_data_uri(image)?,
            "actions": attributes.iter().map(|a| a.as_str()).collect::<Vec<_>>(),
            "detector_backend": detector.as_str(),
            "enforce_detection": enforce_detection,
        });

        let reply = self.post("/analyze", &body).await?;
        Ok(parse_scans(reply))
    }

    async fn verify(
        &self,
        image1: &RgbImage,
        image2: &RgbImage,
        model: &str,
        metric: DistanceMetric,
        detector: DetectorBackend,
        enforce_detection: bool,
    ) -> Result<MatchScan, EngineError> {
        let body = json!({
            "img1_path": to_data_uri(image1)?,
            "img2_path": to_data_uri(image2)?,
            "model_name": model,
            "distance_metric": metric.as_str(),
            "detector_backend": detector.as_str(),
            "enforce_detection": enforce_detection,
        });

        let reply = self.post("/verify", &body).await?;
        serde_json::from_value(reply).map_err(|e| EngineError::Malformed(e.to_string()))
    }
}
