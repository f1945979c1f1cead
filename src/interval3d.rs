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
pub enum Axis3 {
    Horizontal,
    Vertical,
    Depth,
}

/// Shape of a three-axis exclusion, classified from the per-axis
/// remainder kinds. Ten cases covering all 27 kind combinations:
///
/// - `Face(a)`: axis `a` trimmed at one end, the others fully covered.
/// - `Slice(a)`: axis `a` split, the others fully covered.
/// - `Edge(a)`: axis `a` fully covered, both others trimmed — an edge of
///   the box parallel to `a` is removed.
/// - `Hole(a)`: axis `a` fully covered, both others split — a hole
///   drilled through the box along `a`.
/// - `Bite { full, split }`: one axis fully covered, one split, one
///   trimmed; six variants.
/// - `Corner`: all three axes trimmed.
/// - `Notch(a)`: axis `a` split, both others trimmed.
/// - `Divot(a)`: axis `a` trimmed, both others split — a pocket sunk
///   into one face.
/// - `Core`: all three axes split; the excluded box floats strictly
///   inside.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ExclusionCase3 {
    Simple,
    Face(Axis3),
    Slice(Axis3),
    Edge(Axis3),
    Hole(Axis3),
    Bite { full: Axis3, split: Axis3 },
    Corner,
    Notch(Axis3),
    Divot(Axis3),
    Core,
}

/// The Cartesian product of horizontal, vertical, and depth intervals: an
/// axis-aligned box of domain points.
#[derive(
    Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize,
)]
pub struct Interval3d<X, Y, Z> {
    horizontal: Interval<X>,
    vertical: Interval<Y>,
    depth: Interval<Z>,
}

impl<X: DiscreteValue, Y: DiscreteValue, Z: DiscreteValue> Interval3d<X, Y, Z> {
    pub fn from_intervals(
        horizontal: Interval<X>,
        vertical: Interval<Y>,
        depth: Interval<Z>,
    ) -> Interval3d<X, Y, Z> {
        Interval3d {
            horizontal,
            vertical,
            depth,
        }
    }

    pub fn unbounded() -> Interval3d<X, Y, Z> {
        Interval3d {
            horizontal: Interval::unbounded(),
            vertical: Interval::unbounded(),
            depth: Interval::unbounded(),
        }
    }

    pub fn horizontal(&self) -> &Interval<X> {
        &self.horizontal
    }

    pub fn vertical(&self) -> &Interval<Y> {
        &self.vertical
    }

    pub fn depth(&self) -> &Interval<Z> {
        &self.depth
    }

    /// Names the shape `other` cuts out of `self`, or `None` when the two
    /// boxes do not intersect.
    pub fn classify_exclusion(&self, other: &Interval3d<X, Y, Z>) -> Option<ExclusionCase3> {
        if !self.intersects(other) {
            return None;
        }
        let h = self.horizontal.excluding(&other.horizontal).kind();
        let v = self.vertical.excluding(&other.vertical).kind();
        let d = self.depth.excluding(&other.depth).kind();
        use Axis3::{Depth, Horizontal, Vertical};
        use RemainderKind as K;
        Some(match (h, v, d) {
            (K::None, K::None, K::None) => ExclusionCase3::Simple,

            (K::Single, K::None, K::None) => ExclusionCase3::Face(Horizontal),
            (K::None, K::Single, K::None) => ExclusionCase3::Face(Vertical),
            (K::None, K::None, K::Single) => ExclusionCase3::Face(Depth),

            (K::Split, K::None, K::None) => ExclusionCase3::Slice(Horizontal),
            (K::None, K::Split, K::None) => ExclusionCase3::Slice(Vertical),
            (K::None, K::None, K::Split) => ExclusionCase3::Slice(Depth),

            (K::None, K::Single, K::Single) => ExclusionCase3::Edge(Horizontal),
            (K::Single, K::None, K::Single) => ExclusionCase3::Edge(Vertical),
            (K::Single, K::Single, K::None) => ExclusionCase3::Edge(Depth),

            (K::None, K::Split, K::Split) => ExclusionCase3::Hole(Horizontal),
            (K::Split, K::None, K::Split) => ExclusionCase3::Hole(Vertical),
            (K::Split, K::Split, K::None) => ExclusionCase3::Hole(Depth),

            (K::None, K::Single, K::Split) => ExclusionCase3::Bite {
                full: Horizontal,
                split: Depth,
            },
            (K::None, K::Split, K::Single) => ExclusionCase3::Bite {
                full: Horizontal,
                split: Vertical,
            },
            (K::Single, K::None, K::Split) => ExclusionCase3::Bite {
                full: Vertical,
                split: Depth,
            },
            (K::Split, K::None, K::Single) => ExclusionCase3::Bite {
                full: Vertical,
                split: Horizontal,
            },
            (K::Single, K::Split, K::None) => ExclusionCase3::Bite {
                full: Depth,
                split: Vertical,
            },
            (K::Split, K::Single, K::None) => ExclusionCase3::Bite {
                full: Depth,
                split: Horizontal,
            },

            (K::Single, K::Single, K::Single) => ExclusionCase3::Corner,

            (K::Split, K::Single, K::Single) => ExclusionCase3::Notch(Horizontal),
            (K::Single, K::Split, K::Single) => ExclusionCase3::Notch(Vertical),
            (K::Single, K::Single, K::Split) => ExclusionCase3::Notch(Depth),

            (K::Single, K::Split, K::Split) => ExclusionCase3::Divot(Horizontal),
            (K::Split, K::Single, K::Split) => ExclusionCase3::Divot(Vertical),
            (K::Split, K::Split, K::Single) => ExclusionCase3::Divot(Depth),

            (K::Split, K::Split, K::Split) => ExclusionCase3::Core,
        })
    }

    /// The disjoint fragments of `self` left after removing `other`:
    /// horizontal remainder pieces at full height and depth, then
    /// vertical pieces over the horizontal cut at full depth, then depth
    /// pieces over the horizontal and vertical cuts. Up to six fragments
    /// (the `Core` case).
    pub fn excluding(&self, other: &Interval3d<X, Y, Z>) -> Vec<Interval3d<X, Y, Z>> {
        let cut_h = match self.horizontal.intersection_with(&other.horizontal) {
            Some(cut) => cut,
            None => return vec![self.clone()],
        };
        let cut_v = match self.vertical.intersection_with(&other.vertical) {
            Some(cut) => cut,
            None => return vec![self.clone()],
        };
        let cut_d = match self.depth.intersection_with(&other.depth) {
            Some(cut) => cut,
            None => return vec![self.clone()],
        };
        let mut fragments = Vec::with_capacity(6);
        for h in self.horizontal.excluding(&cut_h).into_pieces() {
            fragments.push(Interval3d::from_intervals(
                h,
                self.vertical.clone(),
                self.depth.clone(),
            ));
        }
        for v in self.vertical.excluding(&cut_v).into_pieces() {
            fragments.push(Interval3d::from_intervals(
                cut_h.clone(),
                v,
                self.depth.clone(),
            ));
        }
        for d in self.depth.excluding(&cut_d).into_pieces() {
            fragments.push(Interval3d::from_intervals(cut_h.clone(), cut_v.clone(), d));
        }
        fragments
    }

    pub fn merge_adjacent(&self, other: &Interval3d<X, Y, Z>) -> Option<Interval3d<X, Y, Z>> {
        let h_eq = self.horizontal == other.horizontal;
        let v_eq = self.vertical == other.vertical;
        let d_eq = self.depth == other.depth;
        match (h_eq, v_eq, d_eq) {
            (true, true, true) => Some(self.clone()),
            (false, true, true) => self
                .horizontal
                .merge_contiguous(&other.horizontal)
                .map(|h| Interval3d::from_intervals(h, self.vertical.clone(), self.depth.clone())),
            (true, false, true) => self
                .vertical
                .merge_contiguous(&other.vertical)
                .map(|v| Interval3d::from_intervals(self.horizontal.clone(), v, self.depth.clone())),
            (true, true, false) => self
                .depth
                .merge_contiguous(&other.depth)
                .map(|d| {
                    Interval3d::from_intervals(self.horizontal.clone(), self.vertical.clone(), d)
                }),
            _ => None,
        }
    }
}

impl<X: DiscreteValue, Y: DiscreteValue, Z: DiscreteValue> DimensionalInterval
    for Interval3d<X, Y, Z>
{
    type Key = (DomainPoint<X>, DomainPoint<Y>, DomainPoint<Z>);
    type Point = (DomainPoint<X>, DomainPoint<Y>, DomainPoint<Z>);

    fn axis_count() -> usize {
        3
    }

    fn start_key(&self) -> Self::Key {
        (
            self.horizontal.start().clone(),
            self.vertical.start().clone(),
            self.depth.start().clone(),
        )
    }

    fn is_unbounded(&self) -> bool {
        self.horizontal.is_unbounded()
            && self.vertical.is_unbounded()
            && self.depth.is_unbounded()
    }

    fn contains_point(&self, point: &Self::Point) -> bool {
        self.horizontal.contains(&point.0)
            && self.vertical.contains(&point.1)
            && self.depth.contains(&point.2)
    }

    fn contains_interval(&self, other: &Interval3d<X, Y, Z>) -> bool {
        self.horizontal.contains_interval(&other.horizontal)
            && self.vertical.contains_interval(&other.vertical)
            && self.depth.contains_interval(&other.depth)
    }

    fn intersects(&self, other: &Interval3d<X, Y, Z>) -> bool {
        self.horizontal.intersects(&other.horizontal)
            && self.vertical.intersects(&other.vertical)
            && self.depth.intersects(&other.depth)
    }

    fn intersection_with(&self, other: &Interval3d<X, Y, Z>) -> Option<Interval3d<X, Y, Z>> {
        let horizontal = self.horizontal.intersection_with(&other.horizontal)?;
        let vertical = self.vertical.intersection_with(&other.vertical)?;
        let depth = self.depth.intersection_with(&other.depth)?;
        Some(Interval3d {
            horizontal,
            vertical,
            depth,
        })
    }

    fn joined_with(&self, other: &Interval3d<X, Y, Z>) -> Interval3d<X, Y, Z> {
        Interval3d {
            horizontal: self.horizontal.joined_with(&other.horizontal),
            vertical: self.vertical.joined_with(&other.vertical),
            depth: self.depth.joined_with(&other.depth),
        }
    }

    fn fragments_excluding(&self, other: &Interval3d<X, Y, Z>) -> Vec<Interval3d<X, Y, Z>> {
        self.excluding(other)
    }

    fn merge_adjacent(&self, other: &Interval3d<X, Y, Z>) -> Option<Interval3d<X, Y, Z>> {
        Interval3d::merge_adjacent(self, other)
    }

    fn hash_box(&self) -> HashBox {
        HashBox::new(
            [
                self.horizontal.start().ordered_hash(),
                self.vertical.start().ordered_hash(),
                self.depth.start().ordered_hash(),
            ],
            [
                self.horizontal.end().ordered_hash(),
                self.vertical.end().ordered_hash(),
                self.depth.end().ordered_hash(),
            ],
            3,
        )
    }

    fn point_hash(point: &Self::Point) -> HashBox {
        HashBox::point(
            [
                point.0.ordered_hash(),
                point.1.ordered_hash(),
                point.2.ordered_hash(),
            ],
            3,
        )
    }

    fn atomic_grid(boxes: &[Interval3d<X, Y, Z>]) -> Vec<Interval3d<X, Y, Z>> {
        let horizontals: Vec<Interval<X>> =
            boxes.iter().map(|b| b.horizontal.clone()).collect();
        let verticals: Vec<Interval<Y>> = boxes.iter().map(|b| b.vertical.clone()).collect();
        let depths: Vec<Interval<Z>> = boxes.iter().map(|b| b.depth.clone()).collect();
        iproduct!(
            unique_intervals(&horizontals).iter(),
            unique_intervals(&verticals).iter(),
            unique_intervals(&depths).iter()
        )
        .map(|(h, v, d)| Interval3d::from_intervals(h.clone(), v.clone(), d.clone()))
        .collect()
    }
}

impl<X, Y, Z> Display for Interval3d<X, Y, Z>
where
    X: Display,
    Y: Display,
    Z: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {} x {}", self.horizontal, self.vertical, self.depth)
    }
}
