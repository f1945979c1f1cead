use crate::spatial::HashBox;
use std::fmt::Debug;
use std::hash::Hash;

/// The contract an N-dimensional interval offers the store: per-axis
/// interval algebra composed over one, two, or three axes.
///
/// `Key` is the interval's minimal corner (the tuple of per-axis starts,
/// compared lexicographically by axis); it is how the store addresses the
/// entry the interval belongs to.
pub trait DimensionalInterval: Clone + Ord + Eq + Hash + Debug {
    type Key: Clone + Ord + Debug;
    type Point;

    fn axis_count() -> usize;

    fn start_key(&self) -> Self::Key;

    /// Unbounded on every axis.
    fn is_unbounded(&self) -> bool;

    fn contains_point(&self, point: &Self::Point) -> bool;

    /// Subset test.
    fn contains_interval(&self, other: &Self) -> bool;

    fn intersects(&self, other: &Self) -> bool;

    fn intersection_with(&self, other: &Self) -> Option<Self>;

    /// Per-axis convex join.
    fn joined_with(&self, other: &Self) -> Self;

    /// The disjoint fragments of `self` left after removing `other`.
    /// Empty when `other` covers `self` entirely; `[self]` when they do
    /// not intersect. At most two fragments per axis.
    fn fragments_excluding(&self, other: &Self) -> Vec<Self>;

    /// Joins two intervals that are adjacent or overlapping along exactly
    /// one axis and identical along every other; `None` otherwise. This is
    /// the merge step compression is built on.
    fn merge_adjacent(&self, other: &Self) -> Option<Self>;

    /// Placement of this interval in index space.
    fn hash_box(&self) -> HashBox;

    fn point_hash(point: &Self::Point) -> HashBox;

    /// The unique atomic grid implied by all box boundaries in `boxes`:
    /// per-axis unique intervals, composed as a Cartesian product. Every
    /// input box is exactly a union of grid cells.
    fn atomic_grid(boxes: &[Self]) -> Vec<Self>;
}

/// Folds a set of boxes into a minimal covering form by repeatedly
/// merging mergeable pairs until none remain, returning the result in
/// ascending order. Value-blind; the store's compression applies the same
/// fixed point per value.
pub fn compress_boxes<I: DimensionalInterval>(mut boxes: Vec<I>) -> Vec<I> {
    boxes.sort();
    loop {
        let mut merged = None;
        'scan: for a in 0..boxes.len() {
            for b in (a + 1)..boxes.len() {
                if let Some(joined) = boxes[a].merge_adjacent(&boxes[b]) {
                    merged = Some((a, b, joined));
                    break 'scan;
                }
            }
        }
        match merged {
            Some((a, b, joined)) => {
                boxes.remove(b);
                boxes[a] = joined;
                boxes.sort();
            }
            None => return boxes,
        }
    }
}
