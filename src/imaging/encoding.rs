use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{ImageFormat, RgbImage};

use crate::error::{GlyphError, Result};

pub fn to_png_bytes(image: &RgbImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}

pub fn to_png_base64(image: &RgbImage) -> Result<String> {
    Ok(STANDARD.encode(to_png_bytes(image)?))
}

pub fn to_data_uri(image: &RgbImage) -> Result<String> {
    Ok(format!("data:image/png;base64,{}", to_png_base64(image)?))
}

/// Decodes a base64 image payload, with or without a `data:` prefix.
pub fn decode_png_base64(encoded: &str) -> Result<RgbImage> {
    let payload = match encoded.split_once(";base64,") {
        Some((_, rest)) => rest,
        None => encoded,
    };
    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| GlyphError::InvalidImage(format!("bad base64 payload: {}", e)))?;
    decode_upload(&bytes)
}

/// Decodes an uploaded image of any supported format and flattens it to RGB.
pub fn decode_upload(bytes: &[u8]) -> Result<RgbImage> {
    let image = image::load_from_memory(bytes).map_err(|e| GlyphError::InvalidImage(e.to_string()))?;
    Ok(image.to_rgb8())
}
