// File: crates/bargraph-core/src/types.rs
// Summary: Shared types and constants (sizes, margins, render ids, projected points).

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};

/// Default margin around the plot area, in pixels.
pub const PADDING: f64 = 30.0;
/// Default gap between the baseline and the x legends, in pixels.
pub const OFFSET: f64 = 10.0;
/// Height of the graph container in the reference layout.
pub const CONTAINER_HEIGHT: f64 = 350.0;

/// Measured pixel size of a container.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when both sides are positive and finite.
    pub fn is_measurable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Layout settings fixed for the lifetime of a graph.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphConfig {
    pub padding: f64,
    pub offset: f64,
    /// Unit suffix shown next to value legends (e.g. "M").
    pub y_unit: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self { padding: PADDING, offset: OFFSET, y_unit: String::new() }
    }
}

static NEXT_RENDER_SEQ: AtomicU64 = AtomicU64::new(1);

/// Identifier tagging one dims computation; no two ids are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderId {
    seq: u64,
    issued_at: DateTime<Utc>,
}

impl RenderId {
    pub fn next() -> Self {
        Self { seq: NEXT_RENDER_SEQ.fetch_add(1, Ordering::Relaxed), issued_at: Utc::now() }
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }
}

impl fmt::Display for RenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.issued_at.timestamp_millis(), self.seq)
    }
}

/// Pixel dimensions and margins of the drawing surface for one render pass.
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasDims {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub offset: f64,
    pub y_unit: String,
    pub render_id: RenderId,
}

impl CanvasDims {
    /// Combine a measured size with the graph config under a fresh render id.
    pub fn measure(size: Size, config: &GraphConfig) -> Self {
        Self {
            width: size.width,
            height: size.height,
            padding: config.padding,
            offset: config.offset,
            y_unit: config.y_unit.clone(),
            render_id: RenderId::next(),
        }
    }

    /// Horizontal pixel span used for point placement.
    pub fn x_span(&self) -> (f64, f64) {
        (self.padding * 2.0, self.width - self.padding * 2.0)
    }

    /// Vertical pixel span used for value placement.
    pub fn y_span(&self) -> (f64, f64) {
        (self.padding, self.height - self.padding * 2.0)
    }
}

/// One data record projected into pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlottedPoint {
    pub x: f64,
    pub y: f64,
    pub x_legend: f64,
    pub y_legend: f64,
}

/// Output of a projection pass handed to the draw surface.
#[derive(Clone, Debug, PartialEq)]
pub struct Projection {
    pub points: Vec<PlottedPoint>,
    pub min_y: f64,
    pub max_y: f64,
}
