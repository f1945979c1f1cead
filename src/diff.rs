use crate::dimensional::DimensionalInterval;
use crate::store::DimensionalStore;
use crate::valid_data::ValidData;
use itertools::Itertools;
use std::fmt::Debug;
use std::hash::Hash;

/// One step of synchronizing a store snapshot with another.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DiffAction<V, I: DimensionalInterval> {
    Create(ValidData<V, I>),
    Update(ValidData<V, I>),
    Delete(I::Key),
}

/// The ordered actions that transform `old`'s entries into `new`'s:
/// the union of both key sets is walked in ascending order, emitting
/// `Update` where a key holds different data in the two stores, `Create`
/// for keys only in `new`, and `Delete` for keys only in `old`. Keys
/// holding identical data are skipped.
pub fn diff_actions<V, I>(
    old: &DimensionalStore<V, I>,
    new: &DimensionalStore<V, I>,
) -> Vec<DiffAction<V, I>>
where
    V: Clone + Eq + Hash + Debug,
    I: DimensionalInterval,
{
    let mut actions = Vec::new();
    for key in old.keys().merge(new.keys()).dedup() {
        match (old.get_entry(key), new.get_entry(key)) {
            (Some(a), Some(b)) if a == b => {}
            (Some(_), Some(b)) => actions.push(DiffAction::Update(b.clone())),
            (None, Some(b)) => actions.push(DiffAction::Create(b.clone())),
            (Some(_), None) => actions.push(DiffAction::Delete(key.clone())),
            (None, None) => {}
        }
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use crate::domain_point::DomainPoint;
    use crate::interval::Interval;
    use crate::Store1d;

    fn iv(a: i32, b: i32) -> Interval<i32> {
        Interval::closed(a, b).unwrap()
    }

    fn hey_to_world() -> Store1d<&'static str, i32> {
        DimensionalStore::from_entries(
            vec![
                (Interval::until_end(4), "Hey"),
                (iv(5, 15), "to"),
                (Interval::from_start(16), "World"),
            ],
            StoreConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_diff_actions_for_a_removal() {
        let old = hey_to_world();
        let mut new = old.clone();
        new.remove(&iv(1, 19));

        let actions = new.diff_actions_from(&old);
        assert_eq!(
            actions,
            vec![
                DiffAction::Update(ValidData::new("Hey", Interval::until_end(0))),
                DiffAction::Delete(DomainPoint::Point(5)),
                DiffAction::Delete(DomainPoint::Point(16)),
                DiffAction::Create(ValidData::new("World", Interval::from_start(20))),
            ]
        );
    }

    #[test]
    fn test_identical_stores_diff_to_nothing() {
        let old = hey_to_world();
        assert_eq!(old.diff_actions_from(&old.clone()), vec![]);
    }

    #[test]
    fn test_diff_round_trip() {
        let old = hey_to_world();
        let mut new = old.clone();
        new.remove(&iv(1, 19));
        new.set("again", iv(2, 9));

        let mut replayed = old.clone();
        replayed.apply_diff_actions(new.diff_actions_from(&old));
        let a: Vec<_> = replayed.get_all().cloned().collect();
        let b: Vec<_> = new.get_all().cloned().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_value_change_is_an_update() {
        let old: Store1d<&str, i32> =
            DimensionalStore::from_entries(vec![(iv(0, 10), "A")], StoreConfig::default())
                .unwrap();
        let new: Store1d<&str, i32> =
            DimensionalStore::from_entries(vec![(iv(0, 10), "B")], StoreConfig::default())
                .unwrap();
        assert_eq!(
            diff_actions(&old, &new),
            vec![DiffAction::Update(ValidData::new("B", iv(0, 10)))]
        );
    }
}
