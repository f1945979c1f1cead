use crate::dimensional::DimensionalInterval;
use crate::discrete::DiscreteValue;
use crate::domain_point::DomainPoint;
use crate::error::DimDataError;
use crate::spatial::HashBox;
use itertools::Itertools;
use serde_derive::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::ops::Bound;

/// What is left of an interval after excluding another one from it.
///
/// `Single` shares either the original start or the original end;
/// `Split` means the excluded piece was strictly interior.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Remainder<I> {
    None,
    Single(I),
    Split(I, I),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum RemainderKind {
    None,
    Single,
    Split,
}

impl<I> Remainder<I> {
    pub fn kind(&self) -> RemainderKind {
        match self {
            Remainder::None => RemainderKind::None,
            Remainder::Single(_) => RemainderKind::Single,
            Remainder::Split(_, _) => RemainderKind::Split,
        }
    }

    /// The remaining pieces in ascending order.
    pub fn into_pieces(self) -> Vec<I> {
        match self {
            Remainder::None => vec![],
            Remainder::Single(piece) => vec![piece],
            Remainder::Split(left, right) => vec![left, right],
        }
    }
}

/// A closed, contiguous range of domain points on one axis.
///
/// Invariant: `start <= end`. Checked constructors enforce it; the value
/// is immutable once built.
#[derive(
    Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize,
)]
pub struct Interval<T> {
    start: DomainPoint<T>,
    end: DomainPoint<T>,
}

impl<T: DiscreteValue> Interval<T> {
    pub fn new(
        start: DomainPoint<T>,
        end: DomainPoint<T>,
    ) -> Result<Interval<T>, DimDataError> {
        if start > end {
            return Err(DimDataError::MalformedInterval {
                start: format!("{:?}", start),
                end: format!("{:?}", end),
            });
        }
        Ok(Interval { start, end })
    }

    // For internal callers that already know start <= end.
    pub(crate) fn raw(start: DomainPoint<T>, end: DomainPoint<T>) -> Interval<T> {
        debug_assert!(start <= end);
        Interval { start, end }
    }

    /// The whole axis, `[-∞, +∞]`.
    pub fn unbounded() -> Interval<T> {
        Interval::raw(DomainPoint::Bottom, DomainPoint::Top)
    }

    /// The degenerate interval holding a single value.
    pub fn at(value: T) -> Interval<T> {
        Interval::raw(DomainPoint::Point(value.clone()), DomainPoint::Point(value))
    }

    /// `[a, b]` over concrete values.
    pub fn closed(a: T, b: T) -> Result<Interval<T>, DimDataError> {
        Interval::new(DomainPoint::Point(a), DomainPoint::Point(b))
    }

    /// `[a, +∞]`.
    pub fn from_start(a: T) -> Interval<T> {
        Interval::raw(DomainPoint::Point(a), DomainPoint::Top)
    }

    /// `[-∞, b]`.
    pub fn until_end(b: T) -> Interval<T> {
        Interval::raw(DomainPoint::Bottom, DomainPoint::Point(b))
    }

    pub fn start(&self) -> &DomainPoint<T> {
        &self.start
    }

    pub fn end(&self) -> &DomainPoint<T> {
        &self.end
    }

    pub fn is_unbounded(&self) -> bool {
        self.start == DomainPoint::Bottom && self.end == DomainPoint::Top
    }

    pub fn contains(&self, point: &DomainPoint<T>) -> bool {
        self.start <= *point && *point <= self.end
    }

    /// Subset test: every point of `other` is contained in `self`.
    pub fn contains_interval(&self, other: &Interval<T>) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn intersects(&self, other: &Interval<T>) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    pub fn intersection_with(&self, other: &Interval<T>) -> Option<Interval<T>> {
        if !self.intersects(other) {
            return None;
        }
        Some(Interval::raw(
            std::cmp::max(self.start.clone(), other.start.clone()),
            std::cmp::min(self.end.clone(), other.end.clone()),
        ))
    }

    /// True when `other` starts exactly one step after `self` ends, with
    /// no gap and no overlap.
    pub fn is_left_adjacent_to(&self, other: &Interval<T>) -> bool {
        !self.intersects(other) && self.end.successor() == other.start
    }

    /// Convex join: `[min(starts), max(ends)]`. Not a true union when the
    /// two intervals leave a gap between them.
    pub fn joined_with(&self, other: &Interval<T>) -> Interval<T> {
        Interval::raw(
            std::cmp::min(self.start.clone(), other.start.clone()),
            std::cmp::max(self.end.clone(), other.end.clone()),
        )
    }

    /// Joins the two intervals when they overlap, touch, or coincide;
    /// `None` when there is a gap between them.
    pub fn merge_contiguous(&self, other: &Interval<T>) -> Option<Interval<T>> {
        if self.intersects(other)
            || self.is_left_adjacent_to(other)
            || other.is_left_adjacent_to(self)
        {
            Some(self.joined_with(other))
        } else {
            None
        }
    }

    /// Removes `other` from `self`, reporting what remains.
    pub fn excluding(&self, other: &Interval<T>) -> Remainder<Interval<T>> {
        let cut = match self.intersection_with(other) {
            Some(cut) => cut,
            None => return Remainder::Single(self.clone()),
        };
        let at_start = cut.start == self.start;
        let at_end = cut.end == self.end;
        match (at_start, at_end) {
            (true, true) => Remainder::None,
            (true, false) => {
                Remainder::Single(Interval::raw(cut.end.successor(), self.end.clone()))
            }
            (false, true) => {
                Remainder::Single(Interval::raw(self.start.clone(), cut.start.predecessor()))
            }
            (false, false) => Remainder::Split(
                Interval::raw(self.start.clone(), cut.start.predecessor()),
                Interval::raw(cut.end.successor(), self.end.clone()),
            ),
        }
    }
}

impl<T: DiscreteValue> DimensionalInterval for Interval<T> {
    type Key = DomainPoint<T>;
    type Point = DomainPoint<T>;

    fn axis_count() -> usize {
        1
    }

    fn start_key(&self) -> DomainPoint<T> {
        self.start.clone()
    }

    fn is_unbounded(&self) -> bool {
        Interval::is_unbounded(self)
    }

    fn contains_point(&self, point: &DomainPoint<T>) -> bool {
        self.contains(point)
    }

    fn contains_interval(&self, other: &Interval<T>) -> bool {
        Interval::contains_interval(self, other)
    }

    fn intersects(&self, other: &Interval<T>) -> bool {
        Interval::intersects(self, other)
    }

    fn intersection_with(&self, other: &Interval<T>) -> Option<Interval<T>> {
        Interval::intersection_with(self, other)
    }

    fn joined_with(&self, other: &Interval<T>) -> Interval<T> {
        Interval::joined_with(self, other)
    }

    fn fragments_excluding(&self, other: &Interval<T>) -> Vec<Interval<T>> {
        self.excluding(other).into_pieces()
    }

    fn merge_adjacent(&self, other: &Interval<T>) -> Option<Interval<T>> {
        self.merge_contiguous(other)
    }

    fn hash_box(&self) -> HashBox {
        HashBox::new(
            [self.start.ordered_hash(), 0.0, 0.0],
            [self.end.ordered_hash(), 0.0, 0.0],
            1,
        )
    }

    fn point_hash(point: &DomainPoint<T>) -> HashBox {
        HashBox::point([point.ordered_hash(), 0.0, 0.0], 1)
    }

    fn atomic_grid(boxes: &[Interval<T>]) -> Vec<Interval<T>> {
        unique_intervals(boxes)
    }
}

impl<T: Display> Display for Interval<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{}]", self.start, self.end)
    }
}

/// Folds a collection of intervals into the minimal ordered set covering
/// the same points: overlapping or touching intervals become one.
pub fn compress_intervals<T, I>(intervals: I) -> Vec<Interval<T>>
where
    T: DiscreteValue,
    I: IntoIterator<Item = Interval<T>>,
{
    intervals
        .into_iter()
        .sorted()
        .coalesce(|a, b| {
            if a.intersects(&b) || a.is_left_adjacent_to(&b) {
                Ok(a.joined_with(&b))
            } else {
                Err((a, b))
            }
        })
        .collect()
}

/// Decomposes a multiset of (possibly overlapping) intervals into the
/// unique atomic disjoint intervals covering the same span, with a
/// boundary wherever any input interval starts or ends.
pub fn unique_intervals<T: DiscreteValue>(intervals: &[Interval<T>]) -> Vec<Interval<T>> {
    let mut starts: BTreeSet<DomainPoint<T>> = BTreeSet::new();
    for interval in intervals {
        starts.insert(interval.start().clone());
        starts.insert(interval.end().successor());
    }
    let mut atoms = Vec::new();
    for span in compress_intervals(intervals.iter().cloned()) {
        let mut cursor = span.start().clone();
        let bounds = (
            Bound::Excluded(span.start().clone()),
            Bound::Included(span.end().clone()),
        );
        for cut in starts.range(bounds) {
            atoms.push(Interval::raw(cursor, cut.predecessor()));
            cursor = cut.clone();
        }
        atoms.push(Interval::raw(cursor, span.end().clone()));
    }
    atoms
}

/// The gaps left uncovered by `intervals` inside `within`. Input order
/// does not matter; overlaps among the inputs are tolerated.
pub fn complement_within<T: DiscreteValue>(
    intervals: &[Interval<T>],
    within: &Interval<T>,
) -> Vec<Interval<T>> {
    let mut gaps = Vec::new();
    let mut cursor = within.start().clone();
    for covered in compress_intervals(intervals.iter().cloned()) {
        let clipped = match covered.intersection_with(within) {
            Some(clipped) => clipped,
            None => continue,
        };
        if cursor < clipped.start {
            gaps.push(Interval::raw(cursor, clipped.start.predecessor()));
        }
        if clipped.end >= *within.end() {
            return gaps;
        }
        cursor = clipped.end.successor();
    }
    gaps.push(Interval::raw(cursor, within.end().clone()));
    gaps
}
