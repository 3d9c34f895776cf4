use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Attribute the analysis engine can classify on a detected face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Age,
    Gender,
    Emotion,
    Race,
}

impl Attribute {
    /// The full attribute set requested for attribute analysis.
    pub const ALL: [Attribute; 4] = [
        Attribute::Age,
        Attribute::Gender,
        Attribute::Emotion,
        Attribute::Race,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Attribute::Age => "age",
            Attribute::Gender => "gender",
            Attribute::Emotion => "emotion",
            Attribute::Race => "race",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Face-localization strategy selected for the engine. A configuration
/// choice passed through to the collaborator, not logic implemented here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorBackend {
    Retinaface,
    Ssd,
}

impl DetectorBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            DetectorBackend::Retinaface => "retinaface",
            DetectorBackend::Ssd => "ssd",
        }
    }
}

impl fmt::Display for DetectorBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Similarity measure between two face embeddings. Lower distance means
/// more similar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceMetric {
    Cosine,
    Euclidean,
    EuclideanL2,
}

impl DistanceMetric {
    pub fn as_str(self) -> &'static str {
        match self {
            DistanceMetric::Cosine => "cosine",
            DistanceMetric::Euclidean => "euclidean",
            DistanceMetric::EuclideanL2 => "euclidean_l2",
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bounding box for a detected face, in source-image pixel coordinates.
///
/// Unknown engine fields (eye landmarks and the like) are ignored; missing
/// coordinates default to zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceRegion {
    pub x: i64,
    pub y: i64,
    pub w: i64,
    pub h: i64,
}

/// One detected face from an attribute-analysis pass.
///
/// The engine reports dominant labels plus per-label confidence maps.
/// Every field defaults when omitted, so a sparse reply still parses.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FaceScan {
    pub age: Option<f64>,
    pub dominant_gender: Option<String>,
    pub gender: BTreeMap<String, f64>,
    pub dominant_emotion: Option<String>,
    pub emotion: BTreeMap<String, f64>,
    pub dominant_race: Option<String>,
    pub race: BTreeMap<String, f64>,
    pub region: FaceRegion,
    pub face_confidence: Option<f64>,
}

/// Per-image face areas reported by a verification pass.
///
/// The engine reports an area even when detection enforcement is off, but a
/// missing or empty object means no face was localized in that image.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FacialAreas {
    pub img1: Option<serde_json::Value>,
    pub img2: Option<serde_json::Value>,
}

impl FacialAreas {
    pub fn img1_detected(&self) -> bool {
        Self::detected(&self.img1)
    }

    pub fn img2_detected(&self) -> bool {
        Self::detected(&self.img2)
    }

    /// A face counts as detected when the area is a non-empty JSON object.
    fn detected(area: &Option<serde_json::Value>) -> bool {
        area.as_ref()
            .and_then(|v| v.as_object())
            .is_some_and(|m| !m.is_empty())
    }
}

/// Outcome of a pairwise verification pass.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MatchScan {
    /// Embedding distance under the requested metric.
    pub distance: f64,
    /// Engine-reported processing time, in seconds.
    pub time: f64,
    pub facial_areas: FacialAreas,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attribute_names() {
        let names: Vec<&str> = Attribute::ALL.iter().map(|a| a.as_str()).collect();
        assert_eq!(names, ["age", "gender", "emotion", "race"]);
    }

    #[test]
    fn test_detector_and_metric_names() {
        assert_eq!(DetectorBackend::Retinaface.as_str(), "retinaface");
        assert_eq!(DetectorBackend::Ssd.as_str(), "ssd");
        assert_eq!(DistanceMetric::Cosine.as_str(), "cosine");
        assert_eq!(DistanceMetric::EuclideanL2.as_str(), "euclidean_l2");
    }

    #[test]
    fn test_face_scan_sparse_reply_defaults() {
        let scan: FaceScan = serde_json::from_value(json!({
            "age": 31.0,
            "dominant_gender": "Man"
        }))
        .unwrap();

        assert_eq!(scan.age, Some(31.0));
        assert_eq!(scan.dominant_gender.as_deref(), Some("Man"));
        assert!(scan.dominant_emotion.is_none());
        assert!(scan.emotion.is_empty());
        assert_eq!(scan.region.x, 0);
        assert_eq!(scan.region.w, 0);
        assert!(scan.face_confidence.is_none());
    }

    #[test]
    fn test_face_region_ignores_landmark_fields() {
        let region: FaceRegion = serde_json::from_value(json!({
            "x": 10, "y": 20, "w": 100, "h": 120,
            "left_eye": [35, 60], "right_eye": [85, 58]
        }))
        .unwrap();

        assert_eq!(region.x, 10);
        assert_eq!(region.h, 120);
    }

    #[test]
    fn test_facial_area_detected_requires_nonempty_object() {
        let areas: FacialAreas = serde_json::from_value(json!({
            "img1": {"x": 1, "y": 2, "w": 50, "h": 60},
            "img2": {}
        }))
        .unwrap();

        assert!(areas.img1_detected());
        assert!(!areas.img2_detected());
    }

    #[test]
    fn test_facial_area_missing_or_non_object() {
        let missing = FacialAreas::default();
        assert!(!missing.img1_detected());

        let odd: FacialAreas = serde_json::from_value(json!({"img1": 7})).unwrap();
        assert!(!odd.img1_detected());
    }

    #[test]
    fn test_match_scan_defaults() {
        let scan: MatchScan = serde_json::from_value(json!({"distance": 0.27})).unwrap();
        assert!((scan.distance - 0.27).abs() < 1e-9);
        assert_eq!(scan.time, 0.0);
        assert!(!scan.facial_areas.img1_detected());
    }
}
