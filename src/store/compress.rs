use crate::dimensional::DimensionalInterval;
use crate::store::DimensionalStore;
use crate::valid_data::ValidData;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::{debug, trace};

impl<V, I> DimensionalStore<V, I>
where
    V: Clone + Eq + Hash + Debug,
    I: DimensionalInterval,
{
    /// Merges entries of `value` that are adjacent along exactly one axis
    /// and identical along every other, repeating until no such pair
    /// exists. A merge can create a new adjacency, so the candidate set
    /// is re-scanned after every merge rather than swept once.
    ///
    /// Candidates are visited in ascending key order, which fixes the
    /// canonical physical shape when several merges are possible; see
    /// DESIGN.md. Logical content is the same under any order.
    pub fn compress_value(&mut self, value: &V) {
        let mut merges = 0usize;
        loop {
            let keys = self.value_keys(value);
            let mut found = None;
            'scan: for (i, a) in keys.iter().enumerate() {
                for b in keys.iter().skip(i + 1) {
                    let joined = match (self.entries.get(a), self.entries.get(b)) {
                        (Some(da), Some(db)) => da.interval().merge_adjacent(db.interval()),
                        _ => None,
                    };
                    if let Some(joined) = joined {
                        found = Some((a.clone(), b.clone(), joined));
                        break 'scan;
                    }
                }
            }
            match found {
                Some((a, b, joined)) => {
                    trace!("merging {:?} and {:?}", a, b);
                    self.remove_entry(&a);
                    self.remove_entry(&b);
                    self.insert_entry(ValidData::new(value.clone(), joined));
                    merges += 1;
                }
                None => break,
            }
        }
        if merges > 0 {
            debug!("compressed {:?}: {} merges", value, merges);
        }
    }

    /// Compression over every stored value. Merges only ever happen
    /// between entries of equal value, so the order values are visited in
    /// does not affect the result.
    pub fn compress_all(&mut self) {
        let values: Vec<V> = self.by_value.keys().cloned().collect();
        for value in values {
            self.compress_value(&value);
        }
    }

    /// Canonicalizes the physical representation: every entry is
    /// decomposed into the atomic grid cells implied by all stored box
    /// boundaries, then compressed from scratch. Two stores with equal
    /// logical content end up with identical entries regardless of how
    /// their fragments accumulated.
    pub fn recompress(&mut self) {
        let boxes: Vec<I> = self
            .entries
            .values()
            .map(|data| data.interval().clone())
            .collect();
        let grid = I::atomic_grid(&boxes);
        let old: Vec<ValidData<V, I>> = self.entries.values().cloned().collect();
        self.clear_views();
        for data in old {
            for cell in &grid {
                if data.interval().contains_interval(cell) {
                    self.insert_entry(ValidData::new(data.value().clone(), cell.clone()));
                }
            }
        }
        self.compress_all();
    }
}
