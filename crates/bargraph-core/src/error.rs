// File: crates/bargraph-core/src/error.rs
// Summary: Error taxonomy for projection and surface calls.

use thiserror::Error;

/// Failures surfaced to the host component.
///
/// Lifecycle-ordering problems (a trigger firing before the surface is ready)
/// are not errors; they are reported as [`crate::scheduler::RenderOutcome::Skipped`].
#[derive(Debug, Error)]
pub enum ChartError {
    /// The input domain of a linear map has zero width.
    #[error("degenerate range: input domain [{in_min}, {in_max}] has zero width")]
    DegenerateRange { in_min: f64, in_max: f64 },

    /// Projection was requested over zero data points.
    #[error("cannot project an empty series")]
    EmptySeries,

    /// The drawing surface rejected an `init`, `resize` or `render` call.
    #[error("draw surface failed")]
    Surface(#[source] anyhow::Error),
}

pub type Result<T, E = ChartError> = std::result::Result<T, E>;
