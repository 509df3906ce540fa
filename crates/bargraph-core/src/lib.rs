// File: crates/bargraph-core/src/lib.rs
// Summary: Core library entry point; exports the projection, scheduling and surface API.

pub mod error;
pub mod graph;
pub mod projection;
pub mod resize;
pub mod scale;
pub mod scheduler;
pub mod series;
pub mod surface;
pub mod types;

pub use error::{ChartError, Result};
pub use graph::BarGraph;
pub use projection::project;
pub use resize::{ResizeChannel, Subscription};
pub use scale::{compute_range, linear_map, LinearScale, Range};
pub use scheduler::{RenderOutcome, RenderScheduler, SchedulerState, SkipReason};
pub use series::{observations, Field, Observation};
pub use surface::{Container, DrawSurface, FixedContainer};
pub use types::{CanvasDims, GraphConfig, PlottedPoint, Projection, RenderId, Size};
