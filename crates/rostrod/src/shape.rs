//! Engine output → response body shaping.
//!
//! Field-by-field mapping with fixed defaults so a sparse engine reply
//! still produces the full response contract.

use rostro_core::{DetectorBackend, FaceScan, MatchScan};
use serde::Serialize;
use std::collections::BTreeMap;

const UNKNOWN_LABEL: &str = "unknown";
const NEUTRAL_EMOTION: &str = "neutral";

/// The `analysis` body for one detected face.
#[derive(Debug, Serialize)]
pub struct Analysis {
    pub age: i64,
    pub gender: AttributeBlock,
    pub emotion: AttributeBlock,
    pub race: AttributeBlock,
    pub face_region: RegionBlock,
}

/// Dominant label plus per-label confidence scores.
#[derive(Debug, Serialize)]
pub struct AttributeBlock {
    pub dominant: String,
    pub confidence: BTreeMap<String, f64>,
}

#[derive(Debug, Serialize)]
pub struct RegionBlock {
    pub x: i64,
    pub y: i64,
    pub w: i64,
    pub h: i64,
    pub confidence: f64,
}

impl Analysis {
    /// Defaults for missing engine fields: age 0, dominant gender/race
    /// "unknown", dominant emotion "neutral", zeroed confidences and
    /// region. Only race confidence keys are rewritten (spaces become
    /// underscores); gender and emotion keys pass through unmodified.
    pub fn from_scan(scan: &FaceScan) -> Self {
        // The engine scores exactly these two gender labels.
        let gender_confidence = ["Man", "Woman"]
            .iter()
            .map(|label| {
                (
                    label.to_string(),
                    scan.gender.get(*label).copied().unwrap_or(0.0),
                )
            })
            .collect();

        let race_confidence = scan
            .race
            .iter()
            .map(|(label, score)| (label.replace(' ', "_"), *score))
            .collect();

        Analysis {
            age: scan.age.unwrap_or(0.0) as i64,
            gender: AttributeBlock {
                dominant: scan
                    .dominant_gender
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
                confidence: gender_confidence,
            },
            emotion: AttributeBlock {
                dominant: scan
                    .dominant_emotion
                    .clone()
                    .unwrap_or_else(|| NEUTRAL_EMOTION.to_string()),
                confidence: scan.emotion.clone(),
            },
            race: AttributeBlock {
                dominant: scan
                    .dominant_race
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
                confidence: race_confidence,
            },
            face_region: RegionBlock {
                x: scan.region.x,
                y: scan.region.y,
                w: scan.region.w,
                h: scan.region.h,
                confidence: scan.face_confidence.unwrap_or(0.0),
            },
        }
    }
}

/// Body for a pairwise verification reply.
#[derive(Debug, Serialize)]
pub struct Verification {
    pub verified: bool,
    pub confidence: f64,
    pub metrics: Metrics,
    pub faces: Faces,
}

#[derive(Debug, Serialize)]
pub struct Metrics {
    pub distance: f64,
    pub threshold: f64,
    pub model: String,
    pub detector: String,
    /// Engine-reported duration, in seconds.
    pub processing_time: f64,
}

#[derive(Debug, Serialize)]
pub struct Faces {
    pub image1_detected: bool,
    pub image2_detected: bool,
}

impl Verification {
    pub fn from_scan(
        scan: &MatchScan,
        model: &str,
        detector: DetectorBackend,
        threshold: f64,
    ) -> Self {
        Verification {
            verified: scan.distance <= threshold,
            confidence: 1.0 - scan.distance,
            metrics: Metrics {
                distance: scan.distance,
                threshold,
                model: model.to_string(),
                detector: detector.as_str().to_string(),
                processing_time: scan.time,
            },
            faces: Faces {
                image1_detected: scan.facial_areas.img1_detected(),
                image2_detected: scan.facial_areas.img2_detected(),
            },
        }
    }
}
