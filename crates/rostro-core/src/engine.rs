//! Contract with the external facial-analysis engine.
//!
//! Detection, embedding extraction and distance computation all live in the
//! collaborator behind [`FaceEngine`]; callers hand over decoded pixel
//! grids and configuration, and get back the engine's reply types.

use crate::types::{Attribute, DetectorBackend, DistanceMetric, FaceScan, MatchScan};
use async_trait::async_trait;
use image::RgbImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("engine transport failed: {0}")]
    Transport(String),
    #[error("engine returned status {status}: {body}")]
    Backend { status: u16, body: String },
    #[error("engine reply malformed: {0}")]
    Malformed(String),
    #[error("image re-encode failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// The external facial-analysis capability.
///
/// Implementations must not retry or time out on their own; each call
/// either succeeds once or fails once, and the caller decides what a
/// failure means.
#[async_trait]
pub trait FaceEngine: Send + Sync {
    /// Run attribute analysis on one image. With `enforce_detection` off
    /// the engine still analyzes images where no face is confidently
    /// detected. One [`FaceScan`] per detected face; may be empty.
    async fn analyze(
        &self,
        image: &RgbImage,
        attributes: &[Attribute],
        detector: DetectorBackend,
        enforce_detection: bool,
    ) -> Result<Vec<FaceScan>, EngineError>;

    /// Compare two images and report the embedding distance under the
    /// requested model and metric, plus per-image face areas and timing.
    async fn verify(
        &self,
        image1: &RgbImage,
        image2: &RgbImage,
        model: &str,
        metric: DistanceMetric,
        detector: DetectorBackend,
        enforce_detection: bool,
    ) -> Result<MatchScan, EngineError>;
}
