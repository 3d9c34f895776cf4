//! rostro-core — facial-analysis engine contract and image payload decoding.
//!
//! Attribute analysis and pairwise verification are delegated to an external
//! engine consumed through [`FaceEngine`]; this crate owns the request
//! vocabulary, the lenient reply types, and Base64 payload decoding.

pub mod decode;
pub mod engine;
pub mod types;

pub use decode::{decode_base64_image, DecodeError};
pub use engine::{EngineError, FaceEngine};
pub use types::{
    Attribute, DetectorBackend, DistanceMetric, FaceRegion, FaceScan, FacialAreas, MatchScan,
};
