use crate::dimensional::DimensionalInterval;
use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};

/// A value paired with the interval over which it is valid. The entry is
/// addressed by the interval's minimal corner and is never mutated in
/// place; the store replaces it wholesale so its views stay consistent.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ValidData<V, I> {
    value: V,
    interval: I,
}

impl<V, I> ValidData<V, I> {
    pub fn new(value: V, interval: I) -> ValidData<V, I> {
        ValidData { value, interval }
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn interval(&self) -> &I {
        &self.interval
    }

    pub fn into_parts(self) -> (V, I) {
        (self.value, self.interval)
    }
}

impl<V, I: DimensionalInterval> ValidData<V, I> {
    pub fn key(&self) -> I::Key {
        self.interval.start_key()
    }
}

impl<V: Display, I: Display> Display for ValidData<V, I> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.interval, self.value)
    }
}
