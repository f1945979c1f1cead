use crate::dimensional::DimensionalInterval;
use crate::store::DimensionalStore;
use crate::valid_data::ValidData;
use std::collections::BTreeSet;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::{debug, trace};

impl<V, I> DimensionalStore<V, I>
where
    V: Clone + Eq + Hash + Debug,
    I: DimensionalInterval,
{
    /// The one mutation primitive. Removes `target` from the validity of
    /// every stored entry; when `new_value` is given, additionally makes
    /// it valid on the removed portions — only within what the prior
    /// entries already covered, so an update never invents coverage.
    ///
    /// Stored entries overlapping `target` are found through the spatial
    /// index and decomposed one by one against the interval algebra: an
    /// entry fully covered by `target` is deleted; otherwise it is shrunk
    /// in place when one remaining fragment keeps its start key (or
    /// removed and reinserted when none does), with the other fragments
    /// inserted as new entries keeping the old value. A compression pass
    /// restricted to the touched values then merges fragments that became
    /// adjacent.
    pub(crate) fn update_or_remove(&mut self, target: &I, new_value: Option<V>) {
        let overlap_keys: BTreeSet<I::Key> = self
            .index
            .query_intersecting(target)
            .iter()
            .map(|hit| hit.start_key())
            .collect();
        debug!(
            "mutating {} overlapping entries against {:?}",
            overlap_keys.len(),
            target
        );
        let mut touched: Vec<V> = Vec::new();
        for key in overlap_keys {
            let overlap = match self.entries.get(&key) {
                Some(data) => data.clone(),
                None => continue,
            };
            let cut = match overlap.interval().intersection_with(target) {
                Some(cut) => cut,
                None => continue,
            };
            if !touched.contains(overlap.value()) {
                touched.push(overlap.value().clone());
            }
            let mut fragments = overlap.interval().fragments_excluding(target);
            trace!(
                "entry at {:?} leaves {} fragments",
                key,
                fragments.len()
            );
            if fragments.is_empty() {
                self.remove_entry(&key);
            } else if let Some(kept) = fragments
                .iter()
                .position(|fragment| fragment.start_key() == key)
            {
                let keep = fragments.remove(kept);
                self.replace_interval_at(&key, keep);
                for fragment in fragments {
                    self.insert_entry(ValidData::new(overlap.value().clone(), fragment));
                }
            } else {
                self.remove_entry(&key);
                for fragment in fragments {
                    self.insert_entry(ValidData::new(overlap.value().clone(), fragment));
                }
            }
            if let Some(value) = &new_value {
                self.insert_entry(ValidData::new(value.clone(), cut));
            }
        }
        if let Some(value) = new_value {
            if !touched.contains(&value) {
                touched.push(value);
            }
        }
        for value in &touched {
            self.compress_value(value);
        }
    }
}
