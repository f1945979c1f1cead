use crate::config::IndexStrategy;
use crate::dimensional::DimensionalInterval;
use std::collections::BTreeSet;

/// Axis-aligned box in index space: per-axis `f64` coordinates obtained
/// from the monotone `ordered_hash` projection, with `±∞` standing in for
/// the unbounded sentinels. Unused trailing axes are ignored.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HashBox {
    min: [f64; 3],
    max: [f64; 3],
    dims: usize,
}

impl HashBox {
    pub fn new(min: [f64; 3], max: [f64; 3], dims: usize) -> HashBox {
        HashBox { min, max, dims }
    }

    pub fn point(coords: [f64; 3], dims: usize) -> HashBox {
        HashBox {
            min: coords,
            max: coords,
            dims,
        }
    }

    fn intersects(&self, other: &HashBox) -> bool {
        (0..self.dims).all(|d| self.min[d] <= other.max[d] && other.min[d] <= self.max[d])
    }

    /// A finite representative coordinate along axis `d`, used when
    /// choosing a node's split center. `None` when the box is unbounded
    /// on both sides of this axis.
    fn finite_mid(&self, d: usize) -> Option<f64> {
        match (self.min[d].is_finite(), self.max[d].is_finite()) {
            (true, true) => Some((self.min[d] + self.max[d]) / 2.0),
            (true, false) => Some(self.min[d]),
            (false, true) => Some(self.max[d]),
            (false, false) => None,
        }
    }
}

const NODE_CAPACITY: usize = 8;
const MAX_DEPTH: usize = 12;

/// Box-keyed tree: binary along one axis, quad for two, oct-like for
/// three. A payload whose box straddles a split center is stored in every
/// child it touches, so raw query results can contain duplicates; the
/// `SpatialIndex` wrapper deduplicates before returning.
#[derive(Debug, Clone)]
pub struct BoxTree<P> {
    root: Node<P>,
    dims: usize,
}

#[derive(Debug, Clone)]
struct Node<P> {
    entries: Vec<(HashBox, P)>,
    split: Option<Split<P>>,
}

#[derive(Debug, Clone)]
struct Split<P> {
    center: [f64; 3],
    children: Vec<Node<P>>,
}

impl<P> Node<P> {
    fn empty() -> Node<P> {
        Node {
            entries: Vec::new(),
            split: None,
        }
    }
}

/// Indices of the children a box belongs to, one bit per axis: bit `d`
/// set means the high side of axis `d`. A straddling box yields several
/// indices.
fn child_indices(hash_box: &HashBox, center: &[f64; 3], dims: usize) -> Vec<usize> {
    let mut indices = vec![0usize];
    for d in 0..dims {
        let low = hash_box.min[d] < center[d];
        let high = hash_box.max[d] >= center[d];
        let mut next = Vec::with_capacity(indices.len() * 2);
        for i in &indices {
            if low {
                next.push(*i);
            }
            if high {
                next.push(*i | (1 << d));
            }
        }
        indices = next;
    }
    indices
}

impl<P: Clone + PartialEq> BoxTree<P> {
    pub fn new(dims: usize) -> BoxTree<P> {
        BoxTree {
            root: Node::empty(),
            dims,
        }
    }

    pub fn insert(&mut self, hash_box: HashBox, payload: P) {
        let dims = self.dims;
        Self::insert_node(&mut self.root, dims, 0, hash_box, payload);
    }

    /// Removes every stored copy of the exact `(box, payload)` pair.
    /// Returns whether anything was removed.
    pub fn remove_exact(&mut self, hash_box: &HashBox, payload: &P) -> bool {
        let dims = self.dims;
        Self::remove_node(&mut self.root, dims, hash_box, payload)
    }

    /// All payloads whose hash box intersects `probe`. May contain
    /// duplicates and false positives from the lossy projection; callers
    /// filter exactly and deduplicate.
    pub fn query_intersecting(&self, probe: &HashBox) -> Vec<P> {
        let mut out = Vec::new();
        Self::query_node(&self.root, self.dims, probe, &mut out);
        out
    }

    fn insert_node(node: &mut Node<P>, dims: usize, depth: usize, hash_box: HashBox, payload: P) {
        if let Some(split) = node.split.as_mut() {
            for index in child_indices(&hash_box, &split.center, dims) {
                Self::insert_node(
                    &mut split.children[index],
                    dims,
                    depth + 1,
                    hash_box,
                    payload.clone(),
                );
            }
            return;
        }
        node.entries.push((hash_box, payload));
        if node.entries.len() > NODE_CAPACITY && depth < MAX_DEPTH {
            Self::try_split(node, dims, depth);
        }
    }

    fn try_split(node: &mut Node<P>, dims: usize, depth: usize) {
        let mut center = [0.0f64; 3];
        for d in 0..dims {
            let mids: Vec<f64> = node
                .entries
                .iter()
                .filter_map(|(hash_box, _)| hash_box.finite_mid(d))
                .collect();
            if mids.is_empty() {
                return;
            }
            center[d] = mids.iter().sum::<f64>() / mids.len() as f64;
        }
        let fanout = 1usize << dims;
        // Splitting buys nothing when every entry straddles the center on
        // every axis; all copies would land in all children.
        let useful = node
            .entries
            .iter()
            .any(|(hash_box, _)| child_indices(hash_box, &center, dims).len() < fanout);
        if !useful {
            return;
        }
        let entries = std::mem::take(&mut node.entries);
        node.split = Some(Split {
            center,
            children: (0..fanout).map(|_| Node::empty()).collect(),
        });
        for (hash_box, payload) in entries {
            Self::insert_node(node, dims, depth, hash_box, payload);
        }
    }

    fn remove_node(node: &mut Node<P>, dims: usize, hash_box: &HashBox, payload: &P) -> bool {
        if let Some(split) = node.split.as_mut() {
            let mut removed = false;
            for index in child_indices(hash_box, &split.center, dims) {
                removed |= Self::remove_node(&mut split.children[index], dims, hash_box, payload);
            }
            return removed;
        }
        let before = node.entries.len();
        node.entries
            .retain(|(stored, p)| !(stored == hash_box && p == payload));
        node.entries.len() != before
    }

    fn query_node(node: &Node<P>, dims: usize, probe: &HashBox, out: &mut Vec<P>) {
        if let Some(split) = node.split.as_ref() {
            for index in child_indices(probe, &split.center, dims) {
                Self::query_node(&split.children[index], dims, probe, out);
            }
            return;
        }
        for (hash_box, payload) in &node.entries {
            if hash_box.intersects(probe) {
                out.push(payload.clone());
            }
        }
    }
}

/// The spatial index a store keeps alongside its key maps. Payloads are
/// the stored intervals themselves; since the store keeps them disjoint,
/// an interval identifies its entry.
#[derive(Debug, Clone)]
pub enum SpatialIndex<I: DimensionalInterval> {
    Tree(BoxTree<I>),
    Linear(BTreeSet<I>),
}

impl<I: DimensionalInterval> SpatialIndex<I> {
    pub fn new(strategy: IndexStrategy) -> SpatialIndex<I> {
        match strategy {
            IndexStrategy::BoxTree => SpatialIndex::Tree(BoxTree::new(I::axis_count())),
            IndexStrategy::LinearScan => SpatialIndex::Linear(BTreeSet::new()),
        }
    }

    pub fn insert(&mut self, interval: I) {
        match self {
            SpatialIndex::Tree(tree) => tree.insert(interval.hash_box(), interval),
            SpatialIndex::Linear(set) => {
                set.insert(interval);
            }
        }
    }

    pub fn remove_exact(&mut self, interval: &I) -> bool {
        match self {
            SpatialIndex::Tree(tree) => tree.remove_exact(&interval.hash_box(), interval),
            SpatialIndex::Linear(set) => set.remove(interval),
        }
    }

    /// Exact, deduplicated overlap query, ascending by interval order.
    pub fn query_intersecting(&self, probe: &I) -> Vec<I> {
        let mut out = match self {
            SpatialIndex::Tree(tree) => tree.query_intersecting(&probe.hash_box()),
            SpatialIndex::Linear(set) => set
                .iter()
                .rev()
                .filter(|stored| stored.intersects(probe))
                .cloned()
                .collect(),
        };
        out.retain(|stored| stored.intersects(probe));
        out.sort();
        out.dedup();
        out
    }

    /// Exact, deduplicated point query.
    pub fn query_containing_point(&self, point: &I::Point) -> Vec<I> {
        let mut out = match self {
            SpatialIndex::Tree(tree) => tree.query_intersecting(&I::point_hash(point)),
            SpatialIndex::Linear(set) => set.iter().rev().cloned().collect(),
        };
        out.retain(|stored| stored.contains_point(point));
        out.sort();
        out.dedup();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_point::DomainPoint;
    use crate::interval::Interval;
    use crate::interval2d::Interval2d;

    fn iv(a: i32, b: i32) -> Interval<i32> {
        Interval::closed(a, b).unwrap()
    }

    fn bx(h: (i32, i32), v: (i32, i32)) -> Interval2d<i32, i32> {
        Interval2d::from_intervals(iv(h.0, h.1), iv(v.0, v.1))
    }

    #[test]
    fn test_insert_and_query() {
        let mut index: SpatialIndex<Interval<i32>> = SpatialIndex::new(IndexStrategy::BoxTree);
        for k in 0..20 {
            index.insert(iv(k * 10, k * 10 + 5));
        }
        assert_eq!(
            index.query_intersecting(&iv(12, 33)),
            vec![iv(10, 15), iv(20, 25), iv(30, 35)]
        );
        assert_eq!(index.query_intersecting(&iv(6, 9)), vec![]);
    }

    #[test]
    fn test_remove_exact_only_removes_the_match() {
        let mut index: SpatialIndex<Interval<i32>> = SpatialIndex::new(IndexStrategy::BoxTree);
        index.insert(iv(0, 5));
        index.insert(iv(6, 9));
        assert!(index.remove_exact(&iv(0, 5)));
        assert!(!index.remove_exact(&iv(0, 5)));
        assert_eq!(index.query_intersecting(&iv(0, 100)), vec![iv(6, 9)]);
    }

    #[test]
    fn test_query_never_duplicates_straddling_boxes() {
        let mut index: SpatialIndex<Interval2d<i32, i32>> =
            SpatialIndex::new(IndexStrategy::BoxTree);
        // One big box plus enough small ones to force splits.
        index.insert(bx((0, 100), (0, 100)));
        for k in 0..30 {
            index.insert(bx((k * 3, k * 3 + 1), (200, 201)));
        }
        let hits = index.query_intersecting(&bx((0, 100), (0, 100)));
        assert_eq!(hits, vec![bx((0, 100), (0, 100))]);
    }

    #[test]
    fn test_point_query() {
        let mut index: SpatialIndex<Interval<i32>> = SpatialIndex::new(IndexStrategy::BoxTree);
        index.insert(iv(0, 5));
        index.insert(iv(6, 9));
        index.insert(Interval::from_start(50));
        assert_eq!(
            index.query_containing_point(&DomainPoint::Point(7)),
            vec![iv(6, 9)]
        );
        assert_eq!(
            index.query_containing_point(&DomainPoint::Point(99)),
            vec![Interval::from_start(50)]
        );
        assert_eq!(index.query_containing_point(&DomainPoint::Point(20)), vec![]);
    }

    #[test]
    fn test_unbounded_boxes_survive_splits() {
        let mut index: SpatialIndex<Interval<i32>> = SpatialIndex::new(IndexStrategy::BoxTree);
        index.insert(Interval::unbounded());
        for k in 0..50 {
            index.insert(iv(k * 2 + 1000, k * 2 + 1000));
        }
        let hits = index.query_intersecting(&iv(-5, -5));
        assert_eq!(hits, vec![Interval::unbounded()]);
    }

    #[test]
    fn test_strategies_agree() {
        let mut tree: SpatialIndex<Interval2d<i32, i32>> =
            SpatialIndex::new(IndexStrategy::BoxTree);
        let mut linear: SpatialIndex<Interval2d<i32, i32>> =
            SpatialIndex::new(IndexStrategy::LinearScan);
        let mut boxes = Vec::new();
        for i in 0..8 {
            for j in 0..8 {
                boxes.push(bx((i * 10, i * 10 + 6), (j * 10, j * 10 + 6)));
            }
        }
        for b in &boxes {
            tree.insert(b.clone());
            linear.insert(b.clone());
        }
        let probe = bx((5, 26), (13, 45));
        assert_eq!(tree.query_intersecting(&probe), linear.query_intersecting(&probe));
        for b in boxes.iter().step_by(3) {
            tree.remove_exact(b);
            linear.remove_exact(b);
        }
        assert_eq!(tree.query_intersecting(&probe), linear.query_intersecting(&probe));
    }
}
