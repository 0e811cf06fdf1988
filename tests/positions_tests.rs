use morris_client::{Position, PositionSet};
use proptest::prelude::*;

fn pos(x: usize, y: usize) -> Position {
    Position::new(x, y).unwrap()
}

#[test]
fn test_insert_contains() {
    let mut set = PositionSet::new();
    assert_eq!(set.iter().count(), 0);

    set.insert(pos(1, 1));
    set.insert(pos(0, 2));
    set.insert(pos(1, 1));
    assert!(set.contains(pos(1, 1)));
    assert!(set.contains(pos(0, 2)));
    assert!(!set.contains(pos(2, 0)));
    assert_eq!(set.iter().count(), 2);
}

#[test]
fn test_iter_is_row_major() {
    let set: PositionSet = [pos(2, 0), pos(0, 1), pos(1, 1)].into_iter().collect();
    let members: Vec<_> = set.iter().collect();
    assert_eq!(members, vec![pos(0, 1), pos(1, 1), pos(2, 0)]);
}

#[test]
fn test_debug_lists_members() {
    let set: PositionSet = [pos(0, 0), pos(2, 2)].into_iter().collect();
    assert_eq!(
        format!("{set:?}"),
        format!("{{{:?}, {:?}}}", pos(0, 0), pos(2, 2))
    );
}

proptest! {
    #[test]
    fn collect_then_iter_keeps_members(idx in proptest::collection::vec(0usize..9, 0..12)) {
        let members: Vec<Position> = idx.iter().filter_map(|i| Position::from_index(*i)).collect();
        let set: PositionSet = members.iter().copied().collect();
        for p in Position::all() {
            prop_assert_eq!(set.contains(p), members.contains(&p));
        }
        let rebuilt: PositionSet = set.iter().collect();
        prop_assert_eq!(rebuilt, set);
    }
}
