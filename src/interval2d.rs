use crate::dimensional::DimensionalInterval;
use crate::discrete::DiscreteValue;
use crate::domain_point::DomainPoint;
use crate::interval::{unique_intervals, Interval, RemainderKind};
use crate::spatial::HashBox;
use itertools::iproduct;
use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Axis2 {
    Horizontal,
    Vertical,
}

/// Shape of a two-axis exclusion, classified from the per-axis remainder
/// kinds. Six cases; the axis parameter distinguishes the symmetric
/// variants, nine shapes in all.
///
/// - `Edge(a)`: axis `a` is trimmed at one end, the other axis is fully
///   covered.
/// - `Slice(a)`: axis `a` is split down the middle, the other axis is
///   fully covered.
/// - `Corner`: both axes trimmed at one end.
/// - `Bite(a)`: axis `a` is split, the other axis trimmed.
/// - `Hole`: both axes split; the excluded box is strictly interior.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ExclusionCase2 {
    Simple,
    Edge(Axis2),
    Slice(Axis2),
    Corner,
    Bite(Axis2),
    Hole,
}

/// The Cartesian product of a horizontal and a vertical interval: an
/// axis-aligned rectangle of domain points. Every operation composes the
/// per-axis interval algebra.
#[derive(
    Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize,
)]
pub struct Interval2d<X, Y> {
    horizontal: Interval<X>,
    vertical: Interval<Y>,
}

impl<X: DiscreteValue, Y: DiscreteValue> Interval2d<X, Y> {
    pub fn from_intervals(horizontal: Interval<X>, vertical: Interval<Y>) -> Interval2d<X, Y> {
        Interval2d {
            horizontal,
            vertical,
        }
    }

    pub fn unbounded() -> Interval2d<X, Y> {
        Interval2d {
            horizontal: Interval::unbounded(),
            vertical: Interval::unbounded(),
        }
    }

    pub fn horizontal(&self) -> &Interval<X> {
        &self.horizontal
    }

    pub fn vertical(&self) -> &Interval<Y> {
        &self.vertical
    }

    /// Names the shape `other` cuts out of `self`, or `None` when the two
    /// boxes do not intersect at all.
    pub fn classify_exclusion(&self, other: &Interval2d<X, Y>) -> Option<ExclusionCase2> {
        if !self.intersects(other) {
            return None;
        }
        let h = self.horizontal.excluding(&other.horizontal).kind();
        let v = self.vertical.excluding(&other.vertical).kind();
        use RemainderKind as K;
        Some(match (h, v) {
            (K::None, K::None) => ExclusionCase2::Simple,
            (K::Single, K::None) => ExclusionCase2::Edge(Axis2::Horizontal),
            (K::None, K::Single) => ExclusionCase2::Edge(Axis2::Vertical),
            (K::Split, K::None) => ExclusionCase2::Slice(Axis2::Horizontal),
            (K::None, K::Split) => ExclusionCase2::Slice(Axis2::Vertical),
            (K::Single, K::Single) => ExclusionCase2::Corner,
            (K::Split, K::Single) => ExclusionCase2::Bite(Axis2::Horizontal),
            (K::Single, K::Split) => ExclusionCase2::Bite(Axis2::Vertical),
            (K::Split, K::Split) => ExclusionCase2::Hole,
        })
    }

    /// The disjoint fragments of `self` left after removing `other`:
    /// horizontal remainder pieces at full height first, then the
    /// vertical remainder pieces over the cut's horizontal extent. Up to
    /// four fragments (the `Hole` case).
    pub fn excluding(&self, other: &Interval2d<X, Y>) -> Vec<Interval2d<X, Y>> {
        let cut_h = match self.horizontal.intersection_with(&other.horizontal) {
            Some(cut) => cut,
            None => return vec![self.clone()],
        };
        let cut_v = match self.vertical.intersection_with(&other.vertical) {
            Some(cut) => cut,
            None => return vec![self.clone()],
        };
        let mut fragments = Vec::with_capacity(4);
        for h in self.horizontal.excluding(&cut_h).into_pieces() {
            fragments.push(Interval2d::from_intervals(h, self.vertical.clone()));
        }
        for v in self.vertical.excluding(&cut_v).into_pieces() {
            fragments.push(Interval2d::from_intervals(cut_h.clone(), v));
        }
        fragments
    }

    pub fn merge_adjacent(&self, other: &Interval2d<X, Y>) -> Option<Interval2d<X, Y>> {
        match (
            self.horizontal == other.horizontal,
            self.vertical == other.vertical,
        ) {
            (true, true) => Some(self.clone()),
            (false, true) => self
                .horizontal
                .merge_contiguous(&other.horizontal)
                .map(|h| Interval2d::from_intervals(h, self.vertical.clone())),
            (true, false) => self
                .vertical
                .merge_contiguous(&other.vertical)
                .map(|v| Interval2d::from_intervals(self.horizontal.clone(), v)),
            (false, false) => None,
        }
    }
}

impl<X: DiscreteValue, Y: DiscreteValue> DimensionalInterval for Interval2d<X, Y> {
    type Key = (DomainPoint<X>, DomainPoint<Y>);
    type Point = (DomainPoint<X>, DomainPoint<Y>);

    fn axis_count() -> usize {
        2
    }

    fn start_key(&self) -> Self::Key {
        (self.horizontal.start().clone(), self.vertical.start().clone())
    }

    fn is_unbounded(&self) -> bool {
        self.horizontal.is_unbounded() && self.vertical.is_unbounded()
    }

    fn contains_point(&self, point: &Self::Point) -> bool {
        self.horizontal.contains(&point.0) && self.vertical.contains(&point.1)
    }

    fn contains_interval(&self, other: &Interval2d<X, Y>) -> bool {
        self.horizontal.contains_interval(&other.horizontal)
            && self.vertical.contains_interval(&other.vertical)
    }

    fn intersects(&self, other: &Interval2d<X, Y>) -> bool {
        self.horizontal.intersects(&other.horizontal)
            && self.vertical.intersects(&other.vertical)
    }

    fn intersection_with(&self, other: &Interval2d<X, Y>) -> Option<Interval2d<X, Y>> {
        let horizontal = self.horizontal.intersection_with(&other.horizontal)?;
        let vertical = self.vertical.intersection_with(&other.vertical)?;
        Some(Interval2d {
            horizontal,
            vertical,
        })
    }

    fn joined_with(&self, other: &Interval2d<X, Y>) -> Interval2d<X, Y> {
        Interval2d {
            horizontal: self.horizontal.joined_with(&other.horizontal),
            vertical: self.vertical.joined_with(&other.vertical),
        }
    }

    fn fragments_excluding(&self, other: &Interval2d<X, Y>) -> Vec<Interval2d<X, Y>> {
        self.excluding(other)
    }

    fn merge_adjacent(&self, other: &Interval2d<X, Y>) -> Option<Interval2d<X, Y>> {
        Interval2d::merge_adjacent(self, other)
    }

    fn hash_box(&self) -> HashBox {
        HashBox::new(
            [
                self.horizontal.start().ordered_hash(),
                self.vertical.start().ordered_hash(),
                0.0,
            ],
            [
                self.horizontal.end().ordered_hash(),
                self.vertical.end().ordered_hash(),
                0.0,
            ],
            2,
        )
    }

    fn point_hash(point: &Self::Point) -> HashBox {
        HashBox::point([point.0.ordered_hash(), point.1.ordered_hash(), 0.0], 2)
    }

    fn atomic_grid(boxes: &[Interval2d<X, Y>]) -> Vec<Interval2d<X, Y>> {
        let horizontals: Vec<Interval<X>> =
            boxes.iter().map(|b| b.horizontal.clone()).collect();
        let verticals: Vec<Interval<Y>> = boxes.iter().map(|b| b.vertical.clone()).collect();
        iproduct!(
            unique_intervals(&horizontals).iter(),
            unique_intervals(&verticals).iter()
        )
        .map(|(h, v)| Interval2d::from_intervals(h.clone(), v.clone()))
        .collect()
    }
}

impl<X, Y> Display for Interval2d<X, Y>
where
    X: Display,
    Y: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.horizontal, self.vertical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(a: i32, b: i32) -> Interval<i32> {
        Interval::closed(a, b).unwrap()
    }

    fn bx(h: (i32, i32), v: (i32, i32)) -> Interval2d<i32, i32> {
        Interval2d::from_intervals(iv(h.0, h.1), iv(v.0, v.1))
    }

    #[test]
    fn test_intersection_composes_per_axis() {
        let a = bx((0, 10), (0, 10));
        let b = bx((5, 20), (8, 20));
        assert_eq!(a.intersection_with(&b), Some(bx((5, 10), (8, 10))));
        assert_eq!(a.intersection_with(&bx((5, 20), (11, 20))), None);
    }

    #[test]
    fn test_classify_simple() {
        let a = bx((2, 5), (2, 5));
        assert_eq!(
            a.classify_exclusion(&bx((0, 10), (0, 10))),
            Some(ExclusionCase2::Simple)
        );
        assert_eq!(a.excluding(&bx((0, 10), (0, 10))), vec![]);
    }

    #[test]
    fn test_classify_edge() {
        let a = bx((0, 10), (0, 10));
        assert_eq!(
            a.classify_exclusion(&bx((5, 10), (0, 10))),
            Some(ExclusionCase2::Edge(Axis2::Horizontal))
        );
        assert_eq!(
            a.excluding(&bx((5, 10), (0, 10))),
            vec![bx((0, 4), (0, 10))]
        );
        assert_eq!(
            a.classify_exclusion(&bx((0, 10), (0, 3))),
            Some(ExclusionCase2::Edge(Axis2::Vertical))
        );
    }

    #[test]
    fn test_classify_slice() {
        let a = bx((0, 10), (0, 10));
        assert_eq!(
            a.classify_exclusion(&bx((3, 6), (0, 10))),
            Some(ExclusionCase2::Slice(Axis2::Horizontal))
        );
        assert_eq!(
            a.excluding(&bx((3, 6), (0, 10))),
            vec![bx((0, 2), (0, 10)), bx((7, 10), (0, 10))]
        );
    }

    #[test]
    fn test_classify_corner() {
        let a = bx((0, 10), (0, 10));
        assert_eq!(
            a.classify_exclusion(&bx((5, 10), (5, 10))),
            Some(ExclusionCase2::Corner)
        );
        assert_eq!(
            a.excluding(&bx((5, 10), (5, 10))),
            vec![bx((0, 4), (0, 10)), bx((5, 10), (0, 4))]
        );
    }

    #[test]
    fn test_classify_bite() {
        let a = bx((0, 10), (0, 10));
        assert_eq!(
            a.classify_exclusion(&bx((3, 6), (5, 10))),
            Some(ExclusionCase2::Bite(Axis2::Horizontal))
        );
        let fragments = a.excluding(&bx((3, 6), (5, 10)));
        assert_eq!(
            fragments,
            vec![
                bx((0, 2), (0, 10)),
                bx((7, 10), (0, 10)),
                bx((3, 6), (0, 4)),
            ]
        );
    }

    #[test]
    fn test_classify_hole() {
        let a = bx((0, 10), (0, 10));
        assert_eq!(
            a.classify_exclusion(&bx((3, 6), (3, 6))),
            Some(ExclusionCase2::Hole)
        );
        let fragments = a.excluding(&bx((3, 6), (3, 6)));
        assert_eq!(
            fragments,
            vec![
                bx((0, 2), (0, 10)),
                bx((7, 10), (0, 10)),
                bx((3, 6), (0, 2)),
                bx((3, 6), (7, 10)),
            ]
        );
        // Fragments must be pairwise disjoint and avoid the cut.
        for (i, a) in fragments.iter().enumerate() {
            assert!(!a.intersects(&bx((3, 6), (3, 6))));
            for b in fragments.iter().skip(i + 1) {
                assert!(!a.intersects(b));
            }
        }
    }

    #[test]
    fn test_classify_disjoint_is_none() {
        let a = bx((0, 10), (0, 10));
        assert_eq!(a.classify_exclusion(&bx((20, 30), (0, 10))), None);
        assert_eq!(a.excluding(&bx((20, 30), (0, 10))), vec![a.clone()]);
    }

    #[test]
    fn test_merge_adjacent() {
        assert_eq!(
            bx((0, 4), (0, 10)).merge_adjacent(&bx((5, 9), (0, 10))),
            Some(bx((0, 9), (0, 10)))
        );
        assert_eq!(
            bx((0, 4), (0, 10)).merge_adjacent(&bx((5, 9), (0, 9))),
            None
        );
        // Adjacent along both axes at once: not mergeable.
        assert_eq!(
            bx((0, 4), (0, 4)).merge_adjacent(&bx((5, 9), (5, 9))),
            None
        );
    }

    #[test]
    fn test_atomic_grid() {
        let grid = Interval2d::atomic_grid(&[bx((0, 10), (0, 10)), bx((5, 15), (0, 10))]);
        assert_eq!(grid.len(), 3);
        assert!(grid.contains(&bx((0, 4), (0, 10))));
        assert!(grid.contains(&bx((5, 10), (0, 10))));
        assert!(grid.contains(&bx((11, 15), (0, 10))));
    }

    #[test]
    fn test_display() {
        assert_eq!(bx((0, 10), (3, 6)).to_string(), "[0..10] x [3..6]");
    }
}
