mod compress;
mod mutation;

use crate::config::StoreConfig;
use crate::dimensional::{compress_boxes, DimensionalInterval};
use crate::diff::{diff_actions, DiffAction};
use crate::error::DimDataError;
use crate::spatial::SpatialIndex;
use crate::valid_data::ValidData;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt::Debug;
use std::hash::Hash;

/// The disjoint collection of valid-data entries for one dimensionality,
/// hosting the mutation and compression engines.
///
/// Four views hold the same logical entries at all times: the ascending
/// key map (whose reverse ranges double as the descending view), the
/// by-value key index used by compression, and the spatial index used by
/// overlap queries. The stored intervals are pairwise disjoint; every
/// mutation below preserves that invariant.
///
/// Mutations take `&mut self`, so exclusive access during a mutation's
/// internal steps is enforced by ownership. The copy-on-write facade is
/// `clone()` followed by mutating the clone.
#[derive(Debug, Clone)]
pub struct DimensionalStore<V, I: DimensionalInterval> {
    config: StoreConfig,
    entries: BTreeMap<I::Key, ValidData<V, I>>,
    by_value: HashMap<V, BTreeSet<I::Key>>,
    index: SpatialIndex<I>,
}

impl<V, I> DimensionalStore<V, I>
where
    V: Clone + Eq + Hash + Debug,
    I: DimensionalInterval,
{
    pub fn new(config: StoreConfig) -> DimensionalStore<V, I> {
        DimensionalStore {
            config,
            entries: BTreeMap::new(),
            by_value: HashMap::new(),
            index: SpatialIndex::new(config.index_strategy),
        }
    }

    /// Builds a store from `(interval, value)` pairs. Disjointness of the
    /// given intervals is validated or assumed per the configuration;
    /// callers with overlapping inputs can pre-partition them with
    /// `unique_intervals` first.
    pub fn from_entries<E>(
        entries: E,
        config: StoreConfig,
    ) -> Result<DimensionalStore<V, I>, DimDataError>
    where
        E: IntoIterator<Item = (I, V)>,
    {
        let mut store = DimensionalStore::new(config);
        for (interval, value) in entries {
            if config.validate_disjoint && store.intersects(&interval) {
                return Err(DimDataError::OverlappingIntervals {
                    interval: format!("{:?}", interval),
                });
            }
            store.insert_entry(ValidData::new(value, interval));
        }
        Ok(store)
    }

    pub fn config(&self) -> StoreConfig {
        self.config
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The single value valid everywhere, or an error telling empty and
    /// bounded data apart.
    pub fn get(&self) -> Result<&V, DimDataError> {
        let mut values = self.entries.values();
        match (values.next(), values.next()) {
            (None, _) => Err(DimDataError::NoValidData),
            (Some(data), None) if data.interval().is_unbounded() => Ok(data.value()),
            _ => Err(DimDataError::BoundedValidData),
        }
    }

    pub fn get_option(&self) -> Option<&V> {
        self.get().ok()
    }

    /// The value valid at `point`, if any. Served by the spatial index;
    /// disjointness guarantees at most one entry matches.
    pub fn get_at(&self, point: &I::Point) -> Option<&V> {
        self.get_entry_at(point).map(|data| data.value())
    }

    pub fn get_entry_at(&self, point: &I::Point) -> Option<&ValidData<V, I>> {
        self.index
            .query_containing_point(point)
            .first()
            .and_then(|interval| self.entries.get(&interval.start_key()))
    }

    /// All entries whose interval intersects `interval`, ascending by key.
    pub fn get_intersecting(&self, interval: &I) -> Vec<&ValidData<V, I>> {
        let keys: BTreeSet<I::Key> = self
            .index
            .query_intersecting(interval)
            .iter()
            .map(|hit| hit.start_key())
            .collect();
        let mut out = Vec::with_capacity(keys.len());
        for key in &keys {
            if let Some(data) = self.entries.get(key) {
                out.push(data);
            }
        }
        out
    }

    pub fn intersects(&self, interval: &I) -> bool {
        !self.index.query_intersecting(interval).is_empty()
    }

    /// The compressed covering boxes of everything stored, regardless of
    /// value.
    pub fn domain(&self) -> Vec<I> {
        compress_boxes(
            self.entries
                .values()
                .map(|data| data.interval().clone())
                .collect(),
        )
    }

    /// All entries in ascending key order.
    pub fn get_all(&self) -> impl Iterator<Item = &ValidData<V, I>> {
        self.entries.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &I::Key> {
        self.entries.keys()
    }

    pub fn get_entry(&self, key: &I::Key) -> Option<&ValidData<V, I>> {
        self.entries.get(key)
    }

    /// The distinct values currently stored, in no particular order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.by_value.keys()
    }

    pub fn contains_value(&self, value: &V) -> bool {
        self.by_value.contains_key(value)
    }

    /// Makes `value` valid exactly on `interval`, overwriting whatever
    /// the interval previously covered.
    pub fn set(&mut self, value: V, interval: I) {
        self.update_or_remove(&interval, None);
        self.insert_entry(ValidData::new(value.clone(), interval));
        self.compress_value(&value);
    }

    /// Relabels the portion of existing coverage inside `interval` to
    /// `value`. Unlike `set`, this never creates coverage where none
    /// existed.
    pub fn update(&mut self, value: V, interval: &I) {
        self.update_or_remove(interval, Some(value));
    }

    /// Removes `interval` from all stored validity. A no-op when nothing
    /// overlaps it.
    pub fn remove(&mut self, interval: &I) {
        self.update_or_remove(interval, None);
    }

    /// Swaps the entry stored at `old_key` for `new_data`, verifying the
    /// replacement stays disjoint from everything else.
    pub fn replace(
        &mut self,
        old_key: &I::Key,
        new_data: ValidData<V, I>,
    ) -> Result<(), DimDataError> {
        let old = self
            .remove_entry(old_key)
            .ok_or_else(|| DimDataError::KeyNotFound {
                key: format!("{:?}", old_key),
            })?;
        if self.intersects(new_data.interval()) {
            let interval = format!("{:?}", new_data.interval());
            self.insert_entry(old);
            return Err(DimDataError::OverlappingIntervals { interval });
        }
        self.insert_entry(new_data);
        Ok(())
    }

    /// Keeps only the entries the predicate accepts.
    pub fn filter<P>(&mut self, predicate: P)
    where
        P: Fn(&ValidData<V, I>) -> bool,
    {
        let doomed: Vec<I::Key> = self
            .entries
            .values()
            .filter(|data| !predicate(data))
            .map(|data| data.key())
            .collect();
        for key in doomed {
            self.remove_entry(&key);
        }
    }

    /// Rebuilds the store entry by entry. The mapped entries must remain
    /// pairwise disjoint; this is validated or assumed per the store's
    /// configuration.
    pub fn map_entries<V2, F>(&self, f: F) -> Result<DimensionalStore<V2, I>, DimDataError>
    where
        V2: Clone + Eq + Hash + Debug,
        F: Fn(&ValidData<V, I>) -> ValidData<V2, I>,
    {
        DimensionalStore::from_entries(
            self.entries.values().map(|data| {
                let mapped = f(data);
                let (value, interval) = mapped.into_parts();
                (interval, value)
            }),
            self.config,
        )
    }

    /// Like `map_entries`, but each entry may map to any number of
    /// replacement entries.
    pub fn flat_map_entries<V2, F>(&self, f: F) -> Result<DimensionalStore<V2, I>, DimDataError>
    where
        V2: Clone + Eq + Hash + Debug,
        F: Fn(&ValidData<V, I>) -> Vec<ValidData<V2, I>>,
    {
        DimensionalStore::from_entries(
            self.entries.values().flat_map(|data| {
                f(data).into_iter().map(|mapped| {
                    let (value, interval) = mapped.into_parts();
                    (interval, value)
                })
            }),
            self.config,
        )
    }

    /// The actions that transform `old` into `self`.
    pub fn diff_actions_from(&self, old: &DimensionalStore<V, I>) -> Vec<DiffAction<V, I>> {
        diff_actions(old, self)
    }

    /// Replays diff actions in order, as produced by `diff_actions_from`.
    pub fn apply_diff_actions(&mut self, actions: Vec<DiffAction<V, I>>) {
        for action in actions {
            match action {
                DiffAction::Create(data) => self.insert_entry(data),
                DiffAction::Update(data) => {
                    let key = data.key();
                    self.remove_entry(&key);
                    self.insert_entry(data);
                }
                DiffAction::Delete(key) => {
                    self.remove_entry(&key);
                }
            }
        }
    }

    // -- view maintenance -------------------------------------------------
    //
    // The only two ways entries enter or leave the store. Everything that
    // mutates goes through these so the four views never drift apart.

    pub(crate) fn insert_entry(&mut self, data: ValidData<V, I>) {
        let key = data.key();
        self.index.insert(data.interval().clone());
        self.by_value
            .entry(data.value().clone())
            .or_default()
            .insert(key.clone());
        self.entries.insert(key, data);
    }

    pub(crate) fn remove_entry(&mut self, key: &I::Key) -> Option<ValidData<V, I>> {
        let data = self.entries.remove(key)?;
        self.index.remove_exact(data.interval());
        if let Some(keys) = self.by_value.get_mut(data.value()) {
            keys.remove(key);
            if keys.is_empty() {
                self.by_value.remove(data.value());
            }
        }
        Some(data)
    }

    /// Shrinks the entry at `key` to `interval` without changing its
    /// start key. The entry is replaced wholesale and the spatial index
    /// updated in step.
    pub(crate) fn replace_interval_at(&mut self, key: &I::Key, interval: I) {
        debug_assert_eq!(interval.start_key(), *key);
        if let Some(slot) = self.entries.get_mut(key) {
            self.index.remove_exact(slot.interval());
            self.index.insert(interval.clone());
            *slot = ValidData::new(slot.value().clone(), interval);
        }
    }

    pub(crate) fn value_keys(&self, value: &V) -> Vec<I::Key> {
        self.by_value
            .get(value)
            .map(|keys| keys.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub(crate) fn clear_views(&mut self) {
        self.entries.clear();
        self.by_value.clear();
        self.index = SpatialIndex::new(self.config.index_strategy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::Interval;
    use crate::Store1d;

    fn iv(a: i32, b: i32) -> Interval<i32> {
        Interval::closed(a, b).unwrap()
    }

    fn store(entries: Vec<(Interval<i32>, &'static str)>) -> Store1d<&'static str, i32> {
        DimensionalStore::from_entries(entries, StoreConfig::default()).unwrap()
    }

    #[test]
    fn test_construction_validates_overlap() {
        let result: Result<Store1d<&str, i32>, _> = DimensionalStore::from_entries(
            vec![(iv(0, 10), "A"), (iv(5, 15), "B")],
            StoreConfig::default(),
        );
        assert!(matches!(
            result,
            Err(DimDataError::OverlappingIntervals { .. })
        ));
    }

    #[test]
    fn test_construction_can_assume_disjointness() {
        let result: Result<Store1d<&str, i32>, _> = DimensionalStore::from_entries(
            vec![(iv(0, 10), "A"), (iv(20, 30), "B")],
            StoreConfig::assuming_disjoint(),
        );
        assert_eq!(result.unwrap().len(), 2);
    }

    #[test]
    fn test_get_distinguishes_empty_from_bounded() {
        let empty: Store1d<&str, i32> = DimensionalStore::new(StoreConfig::default());
        assert_eq!(empty.get(), Err(DimDataError::NoValidData));

        let bounded = store(vec![(iv(0, 10), "A")]);
        assert_eq!(bounded.get(), Err(DimDataError::BoundedValidData));
        assert_eq!(bounded.get_option(), None);

        let unbounded =
            store(vec![(Interval::unbounded(), "A")]);
        assert_eq!(unbounded.get(), Ok(&"A"));
        assert_eq!(unbounded.get_option(), Some(&"A"));
    }

    #[test]
    fn test_get_at() {
        use crate::DomainPoint;
        let s = store(vec![(iv(0, 10), "A"), (iv(20, 30), "B")]);
        assert_eq!(s.get_at(&DomainPoint::Point(5)), Some(&"A"));
        assert_eq!(s.get_at(&DomainPoint::Point(20)), Some(&"B"));
        assert_eq!(s.get_at(&DomainPoint::Point(15)), None);
        assert_eq!(s.get_at(&DomainPoint::Bottom), None);
    }

    #[test]
    fn test_get_intersecting_is_ordered() {
        let s = store(vec![(iv(20, 30), "B"), (iv(0, 10), "A"), (iv(40, 50), "C")]);
        let hits: Vec<&str> = s
            .get_intersecting(&iv(5, 45))
            .iter()
            .map(|d| *d.value())
            .collect();
        assert_eq!(hits, vec!["A", "B", "C"]);
        assert!(s.intersects(&iv(28, 33)));
        assert!(!s.intersects(&iv(11, 19)));
    }

    #[test]
    fn test_domain_compresses_across_values() {
        let s = store(vec![(iv(0, 10), "A"), (iv(11, 20), "B"), (iv(30, 40), "A")]);
        assert_eq!(s.domain(), vec![iv(0, 20), iv(30, 40)]);
    }

    #[test]
    fn test_replace() {
        use crate::DomainPoint;
        let mut s = store(vec![(iv(0, 10), "A"), (iv(20, 30), "B")]);
        s.replace(
            &DomainPoint::Point(0),
            ValidData::new("C", iv(0, 15)),
        )
        .unwrap();
        assert_eq!(s.get_at(&DomainPoint::Point(12)), Some(&"C"));

        let missing = s.replace(&DomainPoint::Point(99), ValidData::new("D", iv(60, 70)));
        assert!(matches!(missing, Err(DimDataError::KeyNotFound { .. })));

        let overlapping = s.replace(&DomainPoint::Point(20), ValidData::new("D", iv(10, 40)));
        assert!(matches!(
            overlapping,
            Err(DimDataError::OverlappingIntervals { .. })
        ));
        // The failed replace must leave the original entry in place.
        assert_eq!(s.get_at(&DomainPoint::Point(25)), Some(&"B"));
    }

    #[test]
    fn test_filter() {
        let mut s = store(vec![(iv(0, 10), "A"), (iv(20, 30), "B"), (iv(40, 50), "A")]);
        s.filter(|data| *data.value() == "A");
        let values: Vec<&str> = s.get_all().map(|d| *d.value()).collect();
        assert_eq!(values, vec!["A", "A"]);
        assert!(!s.contains_value(&"B"));
    }

    #[test]
    fn test_map_entries() {
        let s = store(vec![(iv(0, 10), "A"), (iv(20, 30), "B")]);
        let mapped = s
            .map_entries(|data| {
                ValidData::new(data.value().to_lowercase(), data.interval().clone())
            })
            .unwrap();
        let values: Vec<String> = mapped.get_all().map(|d| d.value().clone()).collect();
        assert_eq!(values, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_flat_map_entries() {
        let s = store(vec![(iv(0, 3), "A")]);
        let doubled = s
            .flat_map_entries(|data| {
                vec![
                    ValidData::new(*data.value(), data.interval().clone()),
                    ValidData::new(*data.value(), iv(10, 13)),
                ]
            })
            .unwrap();
        assert_eq!(doubled.len(), 2);
    }
}
