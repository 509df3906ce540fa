// File: crates/bargraph-core/src/series.rs
// Summary: Typed field selectors into caller-owned data records.
// Notes:
// - A series is any ordered slice of records; index order decides horizontal
//   placement, so nothing here sorts or deduplicates.

use std::borrow::Cow;
use std::fmt;

/// Named accessor reading one numeric field from a record.
///
/// Two fields compare equal when both the name and the accessor match, which is
/// what the scheduler uses to decide whether a field change needs a redraw.
pub struct Field<T> {
    name: Cow<'static, str>,
    get: fn(&T) -> f64,
}

impl<T> Field<T> {
    pub fn new(name: impl Into<Cow<'static, str>>, get: fn(&T) -> f64) -> Self {
        Self { name: name.into(), get }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn value(&self, record: &T) -> f64 {
        (self.get)(record)
    }
}

impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        Self { name: self.name.clone(), get: self.get }
    }
}

impl<T> PartialEq for Field<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && std::ptr::fn_addr_eq(self.get, other.get)
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Field").field(&self.name).finish()
    }
}

/// Convenience record for plain `(x, y)` observations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Observation {
    pub x: f64,
    pub y: f64,
}

impl Observation {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x_field() -> Field<Self> {
        Field::new("x", |o: &Self| o.x)
    }

    pub fn y_field() -> Field<Self> {
        Field::new("y", |o: &Self| o.y)
    }
}

/// Build observations from `(x, y)` pairs, the layout the CSV loaders produce.
pub fn observations(pairs: &[(f64, f64)]) -> Vec<Observation> {
    pairs.iter().map(|&(x, y)| Observation::new(x, y)).collect()
}
