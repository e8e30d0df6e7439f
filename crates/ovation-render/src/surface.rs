//! Viewport-tracking drawing surface with a DPR-capped backing store

use crate::raster::{blend_pixel, disk_coverage, Blend};
use ovation_core::{Vec2, Viewport};

/// Backing resolution never exceeds this multiple of the logical size
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// A CPU raster surface sized to the viewport.
///
/// Drawing is expressed in logical pixels regardless of backing resolution;
/// the surface applies the capped device-pixel-ratio scale itself. Pixels are
/// premultiplied RGBA with a fully transparent initial state.
#[derive(Clone)]
pub struct CanvasSurface {
    logical: Viewport,
    ratio: f32,
    width: u32,
    height: u32,
    pixels: Vec<[f32; 4]>,
}

impl CanvasSurface {
    pub fn new(viewport: Viewport, device_pixel_ratio: f32) -> Self {
        let mut surface = Self {
            logical: Viewport::new(1.0, 1.0),
            ratio: 1.0,
            width: 0,
            height: 0,
            pixels: Vec::new(),
        };
        surface.resize(viewport, device_pixel_ratio);
        surface
    }

    /// Track a viewport change.
    ///
    /// Logical dimensions clamp to a 1px minimum; the backing store is
    /// `logical * ratio` with the ratio capped at [`MAX_PIXEL_RATIO`].
    /// Idempotent: resizing to the current dimensions preserves pixel
    /// contents, anything else reallocates a transparent buffer.
    pub fn resize(&mut self, viewport: Viewport, device_pixel_ratio: f32) {
        let logical = Viewport::new(viewport.width.max(1.0), viewport.height.max(1.0));
        let ratio = if device_pixel_ratio > 0.0 {
            device_pixel_ratio.min(MAX_PIXEL_RATIO)
        } else {
            1.0
        };
        let width = (logical.width * ratio).round().max(1.0) as u32;
        let height = (logical.height * ratio).round().max(1.0) as u32;

        self.logical = logical;
        self.ratio = ratio;
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![[0.0; 4]; (width as usize) * (height as usize)];
    }

    pub fn logical_size(&self) -> Viewport {
        self.logical
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.ratio
    }

    pub fn backing_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixel(&self, x: u32, y: u32) -> [f32; 4] {
        self.pixels[(y as usize) * (self.width as usize) + x as usize]
    }

    /// Erase everything to full transparency
    pub fn clear(&mut self) {
        self.pixels.fill([0.0; 4]);
    }

    /// Translucent erase toward transparency: scales every channel by
    /// `1 - amount`, leaving a motion trail of earlier frames.
    pub fn fade(&mut self, amount: f32) {
        let keep = (1.0 - amount).clamp(0.0, 1.0);
        for px in &mut self.pixels {
            for c in px.iter_mut() {
                *c *= keep;
            }
        }
    }

    /// Rasterize a disk. `center` and `radius` are logical pixels; the rim
    /// is antialiased over one backing pixel.
    pub fn fill_disk(&mut self, center: Vec2, radius: f32, rgb: [f32; 3], alpha: f32, mode: Blend) {
        if radius <= 0.0 || alpha <= 0.0 {
            return;
        }
        let r = radius * self.ratio;
        let cx = center.x * self.ratio;
        let cy = center.y * self.ratio;
        if cx + r < 0.0 || cy + r < 0.0 || cx - r > self.width as f32 || cy - r > self.height as f32
        {
            return;
        }

        let x0 = (cx - r - 1.0).floor().max(0.0) as u32;
        let y0 = (cy - r - 1.0).floor().max(0.0) as u32;
        let x1 = ((cx + r + 1.0).ceil() as u32).min(self.width - 1);
        let y1 = ((cy + r + 1.0).ceil() as u32).min(self.height - 1);

        for y in y0..=y1 {
            let dy = y as f32 + 0.5 - cy;
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - cx;
                let cov = disk_coverage((dx * dx + dy * dy).sqrt(), r);
                if cov <= 0.0 {
                    continue;
                }
                let a = alpha * cov;
                let src = [rgb[0] * a, rgb[1] * a, rgb[2] * a, a];
                let idx = (y as usize) * (self.width as usize) + x as usize;
                blend_pixel(&mut self.pixels[idx], src, mode);
            }
        }
    }

    /// Highest coverage value on the surface; zero means fully transparent
    pub fn max_coverage(&self) -> f32 {
        self.pixels.iter().map(|px| px[3]).fold(0.0, f32::max)
    }

    pub fn is_clear(&self) -> bool {
        self.pixels.iter().all(|px| px[3] == 0.0)
    }
}
