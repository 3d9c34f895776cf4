//! HTTP surface: router construction and the request handlers.
//!
//! Each handler is a single linear pass: validate the body, decode the
//! image payload(s), call the engine, shape the reply. No state outlives
//! the request.

use crate::error::ApiError;
use crate::shape::{Analysis, Verification};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use rostro_core::{
    decode_base64_image, Attribute, DetectorBackend, DistanceMetric, FaceEngine,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Detector strategy for attribute analysis.
const ANALYZE_DETECTOR: DetectorBackend = DetectorBackend::Retinaface;
/// Detector strategy for pairwise verification.
const VERIFY_DETECTOR: DetectorBackend = DetectorBackend::Ssd;
/// Embedding model used when the request does not name one.
const DEFAULT_MODEL: &str = "VGG-Face";
/// Decision threshold used when the request does not carry one.
const DEFAULT_THRESHOLD: f64 = 0.4;

pub type Engine = Arc<dyn FaceEngine>;

pub fn router(engine: Engine) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/analyze", post(analyze))
        .route("/verifymetodo", post(verify))
        .with_state(engine)
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    imagen: Option<String>,
}

async fn analyze(
    State(engine): State<Engine>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::validation(e.body_text()))?;

    let imagen = match request.imagen.as_deref() {
        Some(payload) if !payload.is_empty() => payload,
        _ => return Err(ApiError::validation("Se requiere 'imagen' en Base64")),
    };

    let grid = decode_base64_image(imagen)?;
    tracing::info!(width = grid.width(), height = grid.height(), "analyzing image");

    let scans = engine
        .analyze(&grid, &Attribute::ALL, ANALYZE_DETECTOR, false)
        .await?;
    tracing::info!(faces = scans.len(), "analysis completed");

    // First detected face wins; no face at all still replies 200.
    let body = match scans.first() {
        Some(scan) => json!({ "analysis": Analysis::from_scan(scan) }),
        None => json!({ "analysis": {} }),
    };

    Ok(Json(body))
}

#[derive(Debug, Deserialize)]
struct VerifyRequest {
    image1: Option<String>,
    image2: Option<String>,
    model: Option<String>,
    /// Number or numeric string; validated in [`parse_threshold`].
    threshold: Option<serde_json::Value>,
}

async fn verify(
    State(engine): State<Engine>,
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<Json<Verification>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::validation(e.body_text()))?;

    let (image1, image2) = match (request.image1.as_deref(), request.image2.as_deref()) {
        (Some(first), Some(second)) if !first.is_empty() && !second.is_empty() => (first, second),
        _ => {
            return Err(ApiError::validation(
                "Se requieren 'image1' e 'image2' en Base64",
            ))
        }
    };

    let model = request.model.as_deref().unwrap_or(DEFAULT_MODEL);
    let threshold = parse_threshold(request.threshold.as_ref())?;

    let grid1 = decode_base64_image(image1)?;
    let grid2 = decode_base64_image(image2)?;
    tracing::info!(model, threshold, "verifying image pair");

    let scan = engine
        .verify(
            &grid1,
            &grid2,
            model,
            DistanceMetric::Cosine,
            VERIFY_DETECTOR,
            false,
        )
        .await?;
    tracing::info!(
        distance = scan.distance,
        verified = scan.distance <= threshold,
        "verification completed"
    );

    Ok(Json(Verification::from_scan(
        &scan,
        model,
        VERIFY_DETECTOR,
        threshold,
    )))
}

/// Accepts a JSON number or a numeric string; anything else is rejected as
/// a validation failure rather than surfacing as a conversion fault.
fn parse_threshold(value: Option<&serde_json::Value>) -> Result<f64, ApiError> {
    let Some(value) = value else {
        return Ok(DEFAULT_THRESHOLD);
    };

    if let Some(number) = value.as_f64() {
        return Ok(number);
    }

    value
        .as_str()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .ok_or_else(|| ApiError::validation("El campo 'threshold' debe ser numérico"))
}
