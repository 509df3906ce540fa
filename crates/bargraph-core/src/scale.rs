// File: crates/bargraph-core/src/scale.rs
// Summary: Linear value-to-pixel mapping and the zero-seeded range reduction.

use crate::error::{ChartError, Result};
use crate::series::Field;

/// Map `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// Values outside the input domain extrapolate linearly. A zero-width input
/// domain yields [`ChartError::DegenerateRange`]. `in_min` and `in_max` map to
/// exactly `out_min` and `out_max`.
#[inline]
pub fn linear_map(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> Result<f64> {
    let span = in_max - in_min;
    if span == 0.0 {
        return Err(ChartError::DegenerateRange { in_min, in_max });
    }
    Ok(lerp((value - in_min) / span, out_min, out_max))
}

/// Interpolate at fraction `t` between `a` (t = 0) and `b` (t = 1).
///
/// Both ends are exact. Rounding of `a + t * (b - a)` can overshoot `b` by an
/// ulp, so results are pinned to the `b` side of the end they lie past, which
/// keeps the map monotonic in `t`.
#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    if t == 1.0 {
        return b;
    }
    let y = a + t * (b - a);
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if t > 1.0 {
        if a <= b { y.max(b) } else { y.min(b) }
    } else if t > 0.0 {
        y.max(lo).min(hi)
    } else {
        y
    }
}

/// Value range of one field over a series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Reduce `series` to the range of `field`.
///
/// The fold is seeded with `{ min: 0, max: first }` and the first point never
/// contributes to `min`, so graphs always keep a zero baseline.
pub fn compute_range<T>(series: &[T], field: &Field<T>) -> Result<Range> {
    let (first, rest) = series.split_first().ok_or(ChartError::EmptySeries)?;
    let seed = Range::new(0.0, field.value(first));
    Ok(rest.iter().fold(seed, |acc, point| {
        let v = field.value(point);
        Range::new(acc.min.min(v), acc.max.max(v))
    }))
}

/// Linear scale bound to fixed input and output ranges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub domain: Range,
    pub out_min: f64,
    pub out_max: f64,
}

impl LinearScale {
    /// Build a scale; fails when the domain has zero width.
    pub fn new(domain: Range, out_min: f64, out_max: f64) -> Result<Self> {
        if domain.span() == 0.0 {
            return Err(ChartError::DegenerateRange { in_min: domain.min, in_max: domain.max });
        }
        Ok(Self { domain, out_min, out_max })
    }

    #[inline]
    pub fn to_px(&self, value: f64) -> f64 {
        lerp((value - self.domain.min) / self.domain.span(), self.out_min, self.out_max)
    }
}
