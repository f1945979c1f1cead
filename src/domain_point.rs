use crate::discrete::DiscreteValue;
use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};

/// One axis coordinate, extended with a sentinel below and above every
/// concrete value so open-ended intervals need no special casing.
///
/// Ordering is `Bottom < Point(x) < Top` for every `x`, with `Point`
/// values ordered by the underlying type.
#[derive(
    Debug, Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize,
)]
pub enum DomainPoint<T> {
    Bottom,
    Point(T),
    Top,
}

impl<T> DomainPoint<T> {
    pub fn as_point(&self) -> Option<&T> {
        match self {
            DomainPoint::Point(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_bounded(&self) -> bool {
        matches!(self, DomainPoint::Point(_))
    }
}

impl<T: DiscreteValue> DomainPoint<T> {
    /// Total step upward. `Top` is a fixed point; `Bottom` steps to the
    /// smallest concrete value when the axis type has one, otherwise it is
    /// a fixed point too.
    pub fn successor(&self) -> DomainPoint<T> {
        match self {
            DomainPoint::Bottom => T::min_value()
                .map(DomainPoint::Point)
                .unwrap_or(DomainPoint::Bottom),
            DomainPoint::Point(value) => value
                .successor()
                .map(DomainPoint::Point)
                .unwrap_or(DomainPoint::Top),
            DomainPoint::Top => DomainPoint::Top,
        }
    }

    /// Total step downward, mirroring `successor`.
    pub fn predecessor(&self) -> DomainPoint<T> {
        match self {
            DomainPoint::Bottom => DomainPoint::Bottom,
            DomainPoint::Point(value) => value
                .predecessor()
                .map(DomainPoint::Point)
                .unwrap_or(DomainPoint::Bottom),
            DomainPoint::Top => T::max_value()
                .map(DomainPoint::Point)
                .unwrap_or(DomainPoint::Top),
        }
    }

    pub(crate) fn ordered_hash(&self) -> f64 {
        match self {
            DomainPoint::Bottom => f64::NEG_INFINITY,
            DomainPoint::Point(value) => value.ordered_hash(),
            DomainPoint::Top => f64::INFINITY,
        }
    }
}

impl<T: Display> Display for DomainPoint<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DomainPoint::Bottom => write!(f, "-\u{221e}"),
            DomainPoint::Point(value) => write!(f, "{}", value),
            DomainPoint::Top => write!(f, "+\u{221e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    #[test]
    fn test_ordering() {
        assert!(DomainPoint::Bottom < DomainPoint::Point(i32::MIN));
        assert!(DomainPoint::Point(i32::MAX) < DomainPoint::<i32>::Top);
        assert!(DomainPoint::Point(3) < DomainPoint::Point(4));
    }

    #[test]
    fn test_successor_crosses_extremes() {
        assert_eq!(
            DomainPoint::<i32>::Bottom.successor(),
            DomainPoint::Point(i32::MIN)
        );
        assert_eq!(
            DomainPoint::Point(i32::MAX).successor(),
            DomainPoint::<i32>::Top
        );
        assert_eq!(DomainPoint::<i32>::Top.successor(), DomainPoint::Top);
        assert_eq!(DomainPoint::Point(7).successor(), DomainPoint::Point(8));
    }

    #[test]
    fn test_predecessor_crosses_extremes() {
        assert_eq!(
            DomainPoint::<i32>::Top.predecessor(),
            DomainPoint::Point(i32::MAX)
        );
        assert_eq!(
            DomainPoint::Point(i32::MIN).predecessor(),
            DomainPoint::<i32>::Bottom
        );
        assert_eq!(DomainPoint::<i32>::Bottom.predecessor(), DomainPoint::Bottom);
    }

    #[test]
    fn test_sentinels_are_fixed_for_unbounded_types() {
        assert_eq!(
            DomainPoint::<BigInt>::Bottom.successor(),
            DomainPoint::Bottom
        );
        assert_eq!(DomainPoint::<BigInt>::Top.predecessor(), DomainPoint::Top);
    }

    #[test]
    fn test_display() {
        assert_eq!(DomainPoint::<i32>::Bottom.to_string(), "-∞");
        assert_eq!(DomainPoint::Point(12).to_string(), "12");
        assert_eq!(DomainPoint::<i32>::Top.to_string(), "+∞");
    }
}
