//! Image export for finished drawings

use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose};
use image::{ColorType, ImageFormat};

use super::buffer::PixelBuffer;
use crate::error::Result;

/// Prefix of every exported payload
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Encode the buffer as a PNG file
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image::write_buffer_with_format(
        &mut Cursor::new(&mut bytes),
        buffer.as_bytes(),
        buffer.width(),
        buffer.height(),
        ColorType::Rgba8,
        ImageFormat::Png,
    )?;
    Ok(bytes)
}

/// Encode the buffer as a `data:image/png;base64,...` URL
pub fn to_data_url(buffer: &PixelBuffer) -> Result<String> {
    let png = encode_png(buffer)?;
    let mut url = String::with_capacity(PNG_DATA_URL_PREFIX.len() + png.len() * 4 / 3 + 4);
    url.push_str(PNG_DATA_URL_PREFIX);
    general_purpose::STANDARD.encode_string(&png, &mut url);
    log::debug!(
        "Exported {}x{} drawing ({} bytes PNG)",
        buffer.width(),
        buffer.height(),
        png.len()
    );
    Ok(url)
}
