//! PNG snapshots of a surface, composited over black

use crate::surface::CanvasSurface;
use ovation_core::{OvationError, Result};
use std::path::Path;

/// Write the surface to a PNG at backing resolution.
///
/// Pixels are premultiplied, so compositing over a black backdrop is just
/// the color channels themselves.
pub fn write_png(surface: &CanvasSurface, path: &Path) -> Result<()> {
    let (width, height) = surface.backing_size();
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        let [r, g, b, _] = surface.pixel(x, y);
        image::Rgb([to_u8(r), to_u8(g), to_u8(b)])
    });
    img.save(path)
        .map_err(|e| OvationError::Snapshot(e.to_string()))
}

fn to_u8(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}
