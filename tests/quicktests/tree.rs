use avl::{Error, Insertion, Tree};

use std::collections::{BTreeMap, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and a `BTreeMap`.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same entries in both.
fn do_ops<K, V>(ops: &[Op<K, V>], bst: &mut Tree<K, V>, map: &mut BTreeMap<K, V>)
where
    K: Ord + Clone,
    V: std::fmt::Debug + PartialEq + Clone,
{
    for op in ops {
        match op {
            Op::Insert(k, v) => {
                let was_present = map.insert(k.clone(), v.clone()).is_some();
                assert_eq!(bst.insert(k.clone(), v.clone()).is_update(), was_present);
            }
            Op::Remove(k) => {
                assert_eq!(bst.delete(k).ok(), map.remove(k));
            }
        }
        assert!(bst.is_balanced());
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
    let mut tree = Tree::new();
    let mut map = BTreeMap::new();

    do_ops(&ops, &mut tree, &mut map);
    tree.in_order().eq(map.iter()) && tree.size() == map.len() && tree.validate().is_ok()
}

#[quickcheck]
fn in_order_is_strictly_ascending(xs: Vec<i32>) -> bool {
    let tree: Tree<_, _> = xs.iter().map(|x| (*x, ())).collect();
    let keys: Vec<_> = tree.in_order().map(|(k, _)| *k).collect();

    keys.windows(2).all(|w| w[0] < w[1]) && keys.len() == tree.size()
}

#[quickcheck]
fn height_is_logarithmic(xs: Vec<u16>) -> bool {
    let tree: Tree<_, _> = xs.into_iter().map(|x| (x, ())).collect();
    let bound = (1.44 * ((tree.size() + 2) as f64).log2()).ceil() as isize;

    tree.height() <= bound
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        let _ = tree.insert(*x, *x);
    }
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.search(x) == Err(Error::NotFound))
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        let _ = tree.insert(*x, *x);
    }
    for delete in &deletes {
        let _ = tree.delete(delete);
    }

    let mut still_present = xs;
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    deletes.iter().all(|x| tree.find(x).is_none())
        && still_present.iter().all(|x| tree.find(x).is_some())
        && tree.is_balanced()
}

#[quickcheck]
fn neighbours_match_sorted_order(xs: Vec<i16>) -> bool {
    let tree: Tree<_, _> = xs.iter().map(|x| (*x, ())).collect();
    let keys: Vec<_> = tree.in_order().map(|(k, _)| *k).collect();

    keys.iter().enumerate().all(|(i, key)| {
        let predecessor = tree.predecessor(key).ok().map(|(k, _)| *k);
        let successor = tree.successor(key).ok().map(|(k, _)| *k);
        let expected_predecessor = i.checked_sub(1).map(|i| keys[i]);
        let expected_successor = keys.get(i + 1).copied();

        predecessor == expected_predecessor && successor == expected_successor
    }) && tree.find_min().ok().map(|(k, _)| *k) == keys.first().copied()
        && tree.find_max().ok().map(|(k, _)| *k) == keys.last().copied()
}

#[quickcheck]
fn traversals_visit_every_entry_once(xs: Vec<i8>) -> bool {
    let tree: Tree<_, _> = xs.iter().map(|x| (*x, ())).collect();
    let sorted = |mut keys: Vec<i8>| {
        keys.sort_unstable();
        keys
    };
    let in_order: Vec<_> = tree.in_order().map(|(k, _)| *k).collect();

    sorted(tree.pre_order().map(|(k, _)| *k).collect()) == in_order
        && sorted(tree.post_order().map(|(k, _)| *k).collect()) == in_order
        && sorted(tree.level_order().map(|(k, _)| *k).collect()) == in_order
}

#[quickcheck]
fn update_reports_old_value(key: i8, first: u8, second: u8) -> bool {
    let mut tree = Tree::new();

    tree.insert(key, first) == Insertion::Inserted
        && tree.insert(key, second) == Insertion::Updated(first)
        && tree.size() == 1
}

#[quickcheck]
fn many_interleaved_operations(ops: Vec<Op<i16, u32>>) -> bool {
    let mut tree = Tree::new();
    let mut map = BTreeMap::new();
    // A small key space so deletes frequently hit.
    for op in ops {
        let agrees = match op {
            Op::Insert(k, v) => {
                let key = k % 64;
                tree.insert(key, v).is_update() == map.insert(key, v).is_some()
            }
            Op::Remove(k) => {
                let key = k % 64;
                tree.delete(&key).ok() == map.remove(&key)
            }
        };
        if !agrees || !tree.is_balanced() {
            return false;
        }
    }

    tree.in_order().eq(map.iter()) && tree.validate().is_ok()
}
