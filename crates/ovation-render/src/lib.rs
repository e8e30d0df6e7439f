//! Ovation Render - viewport-sized glow raster
//!
//! Provides the drawing surface the celebration engine paints into:
//! - Backing store sized by a capped device pixel ratio, drawn in logical pixels
//! - Source-over and additive disk compositing
//! - Fade pass for motion-trail persistence
//! - PNG snapshots composited over black

mod raster;
mod snapshot;
mod surface;

pub use raster::{blend_pixel, disk_coverage, Blend};
pub use snapshot::write_png;
pub use surface::{CanvasSurface, MAX_PIXEL_RATIO};
