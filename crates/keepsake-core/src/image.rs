//! Image payload encoding: a user-selected file becomes a self-contained
//! base64 data URL embeddable directly in a record.

use crate::error::ImageError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::debug;
use std::path::Path;

/// Fallback MIME type when the extension is unrecognized.
const FALLBACK_MIME: &str = "application/octet-stream";

/// Read an optional image file and encode it as a base64 data URL.
///
/// `None` yields `Ok(None)` immediately. A present path is read in full;
/// the submission flow must not build a record until this resolves, and a
/// read failure is a recoverable error (no partial record is saved).
pub async fn load_image(path: Option<&Path>) -> Result<Option<String>, ImageError> {
    let Some(path) = path else {
        return Ok(None);
    };
    let bytes = tokio::fs::read(path).await?;
    let encoded = encode_data_url(&bytes, mime_for_path(path));
    debug!(
        "encoded image payload (path={}, bytes={})",
        path.display(),
        bytes.len()
    );
    Ok(Some(encoded))
}

/// Encode raw bytes as a data URL with the given MIME type.
pub fn encode_data_url(bytes: &[u8], mime: &str) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Decode a data URL back to the original bytes.
pub fn decode_data_url(payload: &str) -> Result<Vec<u8>, ImageError> {
    let rest = payload
        .strip_prefix("data:")
        .ok_or_else(|| ImageError::InvalidDataUrl("missing data: prefix".to_string()))?;
    let (_, encoded) = rest
        .split_once(";base64,")
        .ok_or_else(|| ImageError::InvalidDataUrl("missing base64 marker".to_string()))?;
    Ok(STANDARD.decode(encoded)?)
}

/// Guess a MIME type from the file extension.
fn mime_for_path(path: &Path) -> &'static str {
    let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
        return FALLBACK_MIME;
    };
    match extension.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        _ => FALLBACK_MIME,
    }
}
