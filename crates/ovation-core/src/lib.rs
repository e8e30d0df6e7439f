//! Ovation Core - Foundational types for the celebration engine
//!
//! This crate provides the types every other Ovation crate depends on:
//! - `Vec2` - 2D vectors in logical pixel space
//! - `Hsl` - hue/saturation/lightness color with RGB conversion
//! - `Viewport` - logical surface dimensions
//! - Error types and Result alias

mod error;
mod types;

pub use error::{OvationError, Result};
pub use types::{Hsl, Vec2, Viewport};
