use chrono::{Datelike, NaiveDate};
use num_bigint::{BigInt, Sign};
use num_traits::ToPrimitive;
use std::fmt::Debug;
use std::hash::Hash;

/// A totally ordered discrete axis type.
///
/// `successor` and `predecessor` step one unit along the axis and return
/// `None` past the extremes. `min_value`/`max_value` are `None` for types
/// with no extremes, like `BigInt`.
pub trait DiscreteValue: Clone + Ord + Hash + Debug {
    fn min_value() -> Option<Self>;
    fn max_value() -> Option<Self>;
    fn successor(&self) -> Option<Self>;
    fn predecessor(&self) -> Option<Self>;

    /// Monotone (not necessarily injective) projection onto `f64`, used
    /// only to place boxes in the spatial index. Index queries always do
    /// an exact filter afterwards, so precision loss here is harmless.
    fn ordered_hash(&self) -> f64;
}

impl DiscreteValue for i32 {
    fn min_value() -> Option<i32> {
        Some(i32::MIN)
    }

    fn max_value() -> Option<i32> {
        Some(i32::MAX)
    }

    fn successor(&self) -> Option<i32> {
        self.checked_add(1)
    }

    fn predecessor(&self) -> Option<i32> {
        self.checked_sub(1)
    }

    fn ordered_hash(&self) -> f64 {
        *self as f64
    }
}

impl DiscreteValue for i64 {
    fn min_value() -> Option<i64> {
        Some(i64::MIN)
    }

    fn max_value() -> Option<i64> {
        Some(i64::MAX)
    }

    fn successor(&self) -> Option<i64> {
        self.checked_add(1)
    }

    fn predecessor(&self) -> Option<i64> {
        self.checked_sub(1)
    }

    fn ordered_hash(&self) -> f64 {
        *self as f64
    }
}

impl DiscreteValue for u32 {
    fn min_value() -> Option<u32> {
        Some(u32::MIN)
    }

    fn max_value() -> Option<u32> {
        Some(u32::MAX)
    }

    fn successor(&self) -> Option<u32> {
        self.checked_add(1)
    }

    fn predecessor(&self) -> Option<u32> {
        self.checked_sub(1)
    }

    fn ordered_hash(&self) -> f64 {
        *self as f64
    }
}

impl DiscreteValue for NaiveDate {
    fn min_value() -> Option<NaiveDate> {
        Some(NaiveDate::MIN)
    }

    fn max_value() -> Option<NaiveDate> {
        Some(NaiveDate::MAX)
    }

    fn successor(&self) -> Option<NaiveDate> {
        self.succ_opt()
    }

    fn predecessor(&self) -> Option<NaiveDate> {
        self.pred_opt()
    }

    fn ordered_hash(&self) -> f64 {
        self.num_days_from_ce() as f64
    }
}

impl DiscreteValue for BigInt {
    fn min_value() -> Option<BigInt> {
        None
    }

    fn max_value() -> Option<BigInt> {
        None
    }

    fn successor(&self) -> Option<BigInt> {
        Some(self.clone() + 1)
    }

    fn predecessor(&self) -> Option<BigInt> {
        Some(self.clone() - 1)
    }

    fn ordered_hash(&self) -> f64 {
        self.to_f64().unwrap_or_else(|| {
            if self.sign() == Sign::Minus {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            }
        })
    }
}
