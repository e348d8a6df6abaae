// Optional image attached to a question
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Decode a base64 image payload.
///
/// A missing or empty payload is not an error. A payload that fails to
/// decode is logged and dropped so the question is still answered.
pub fn decode_attachment(image: Option<&str>) -> Option<Vec<u8>> {
    let encoded = image.map(str::trim).filter(|s| !s.is_empty())?;

    match STANDARD.decode(encoded) {
        Ok(bytes) => {
            tracing::debug!(bytes = bytes.len(), "decoded image attachment");
            Some(bytes)
        }
        Err(e) => {
            tracing::warn!(error = %e, "error processing image, continuing without it");
            None
        }
    }
}
