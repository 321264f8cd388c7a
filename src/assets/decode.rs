use std::path::Path;

use anyhow::Context;

use crate::assets::texture::ImageData;
use crate::foundation::core::Color;
use crate::foundation::error::{MotionError, MotionResult};

/// Decode PNG/JPEG/WebP/... bytes into premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> MotionResult<ImageData> {
    let rgba = image::load_from_memory(bytes)
        .context("decode image from memory")?
        .into_rgba8();
    let (width, height) = rgba.dimensions();

    let mut pixels = rgba.into_raw();
    premultiply_rgba8_in_place(&mut pixels);
    ImageData::from_premul(width, height, pixels)
}

/// Read and decode an image file.
pub fn decode_file(path: &Path) -> MotionResult<ImageData> {
    let bytes = std::fs::read(path)
        .map_err(|e| MotionError::asset(format!("read '{}': {e}", path.display())))?;
    decode_image(&bytes)
}

/// Premultiply straight-alpha colours into packed RGBA8 bytes.
pub fn premultiply_colors(colors: &[Color]) -> Vec<u8> {
    colors
        .iter()
        .flat_map(|c| {
            [
                premultiply(c.r, c.a),
                premultiply(c.g, c.a),
                premultiply(c.b, c.a),
                c.a,
            ]
        })
        .collect()
}

pub fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3];
        for c in &mut px[..3] {
            *c = premultiply(*c, a);
        }
    }
}

fn premultiply(channel: u8, alpha: u8) -> u8 {
    ((u16::from(channel) * u16::from(alpha) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
