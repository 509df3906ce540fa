// File: crates/bargraph-core/src/projection.rs
// Summary: Data-to-canvas projection for bar graphs.

use crate::error::Result;
use crate::scale::{compute_range, LinearScale, Range};
use crate::series::Field;
use crate::types::{CanvasDims, PlottedPoint, Projection};

/// Project `series` into pixel space.
///
/// Point `i` is placed at `x = map(i, 0, n-1, 2p, w-2p)` and
/// `y = map(v, min_y, max_y, p, h-2p)` where `p` is `dims.padding`. `y` grows
/// with the value; flipping to screen orientation is the surface's job.
///
/// A single point or an all-equal zero series has no horizontal or vertical
/// span and fails with [`crate::ChartError::DegenerateRange`].
pub fn project<T>(series: &[T], x: &Field<T>, y: &Field<T>, dims: &CanvasDims) -> Result<Projection> {
    let Range { min: min_y, max: max_y } = compute_range(series, y)?;

    let last = (series.len() - 1) as f64;
    let (left, right) = dims.x_span();
    let (bottom, top) = dims.y_span();
    let x_scale = LinearScale::new(Range::new(0.0, last), left, right)?;
    let y_scale = LinearScale::new(Range::new(min_y, max_y), bottom, top)?;

    let points = series
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let value = y.value(record);
            PlottedPoint {
                x: x_scale.to_px(i as f64),
                y: y_scale.to_px(value),
                x_legend: x.value(record),
                y_legend: value,
            }
        })
        .collect();

    Ok(Projection { points, min_y, max_y })
}
