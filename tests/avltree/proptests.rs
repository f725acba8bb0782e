//! Differential tests against `BTreeSet` as an oracle.

use std::collections::BTreeSet;

use avlbench::{
    avltree::{AVLTree, PersistentAVLTree},
    harness::height_bound,
    set::{ConcurrentSet, SequentialSet},
};
use proptest::prelude::*;

fn small_keys(max_count: usize) -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-1_000_i64..1_000, 0..=max_count)
}

fn permutation(max_len: usize) -> impl Strategy<Value = Vec<i64>> {
    (0..=max_len as i64).prop_flat_map(|len| Just((0..len).collect::<Vec<_>>()).prop_shuffle())
}

proptest! {
    #[test]
    fn insert_matches_btreeset(keys in small_keys(300)) {
        let mut avl: AVLTree<i64> = AVLTree::new();
        let mut oracle = BTreeSet::new();

        for key in keys {
            prop_assert_eq!(avl.insert(key), oracle.insert(key));
            prop_assert_eq!(avl.validate(), Ok(oracle.len()));
        }

        prop_assert_eq!(avl.len(), oracle.len());
        prop_assert!(avl.iter().eq(oracle.iter()));
        prop_assert!(avl.get_height() <= height_bound(avl.len()));
    }

    #[test]
    fn any_permutation_is_balanced(keys in permutation(500)) {
        let mut avl: AVLTree<i64> = AVLTree::new();

        for &key in &keys {
            prop_assert!(avl.insert(key));
        }

        prop_assert_eq!(avl.validate(), Ok(keys.len()));
        prop_assert!(avl.iter().copied().eq(0..keys.len() as i64));
        prop_assert!(avl.get_height() <= height_bound(keys.len()));
    }

    #[test]
    fn from_sorted_matches_btreeset(set in prop::collection::btree_set(any::<i64>(), 0..500)) {
        let keys: Vec<i64> = set.iter().copied().collect();
        let avl = AVLTree::from_sorted(&keys).unwrap();

        prop_assert_eq!(avl.validate(), Ok(set.len()));
        prop_assert!(avl.iter().eq(set.iter()));
    }

    #[test]
    fn persistent_insert_matches_btreeset(keys in small_keys(300)) {
        let avl: PersistentAVLTree<i64> = PersistentAVLTree::new();
        let mut oracle = BTreeSet::new();

        for key in keys {
            prop_assert_eq!(avl.insert(key), oracle.insert(key));
        }

        prop_assert_eq!(avl.validate(), Ok(oracle.len()));
        prop_assert_eq!(avl.keys(), oracle.into_iter().collect::<Vec<_>>());
    }
}
