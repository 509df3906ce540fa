// File: crates/bargraph-skia/src/lib.rs
// Summary: Skia-backed draw surface for bar graphs (CPU raster, PNG/RGBA output).

pub mod surface;
pub mod text;
pub mod theme;

pub use surface::{SkiaOptions, SkiaSurface};
pub use text::{format_compact, TextRole, TextShaper, TextWeight};
pub use theme::{Gradient, Theme};
