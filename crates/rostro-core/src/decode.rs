//! Base64 image payload decoding.
//!
//! Payloads arrive as standard Base64, optionally carrying a data-URI
//! header (`data:image/jpeg;base64,...`). Decoding always normalizes to a
//! 3-channel RGB grid regardless of the source format.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::RgbImage;
use thiserror::Error;

/// Validation-class failure: the payload is not valid Base64, or the bytes
/// are not a supported image format. The message carries the underlying
/// decode failure text.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Formato de imagen inválido: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Formato de imagen inválido: {0}")]
    Image(#[from] image::ImageError),
}

/// Decode a Base64 image payload into an RGB pixel grid.
///
/// A data-URI header is stripped by splitting on the first comma and
/// keeping the remainder, so `decode_base64_image("data:...;base64,AAAA")`
/// and `decode_base64_image("AAAA")` are equivalent.
pub fn decode_base64_image(payload: &str) -> Result<RgbImage, DecodeError> {
    let data = match payload.split_once(',') {
        Some((_, rest)) => rest,
        None => payload,
    };

    let bytes = STANDARD.decode(data).map_err(|e| {
        tracing::warn!(error = %e, "image payload is not valid Base64");
        DecodeError::from(e)
    })?;

    let img = image::load_from_memory(&bytes).map_err(|e| {
        tracing::warn!(error = %e, "decoded bytes are not a supported image");
        DecodeError::from(e)
    })?;

    Ok(img.to_rgb8())
}
