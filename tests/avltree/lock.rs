use avlbench::{
    avltree::{AVLTree, MutexAVLTree, SpinLockAVLTree},
    set::{ConcurrentSet, SequentialSet},
};

use crate::util::{
    assert_complete, insert_concurrent, shuffled_keys, stress_concurrent_duplicates,
    stress_concurrent_insert,
};

#[test]
fn test_mutex_avl_tree() {
    let num = 64;
    let avl: MutexAVLTree<i64> = MutexAVLTree::new();

    for i in 0..num {
        assert!(avl.insert(i));
    }

    for i in 0..num {
        assert!(!avl.insert(i));
    }

    assert_eq!(avl.get_height(), f32::log2(num as f32) as usize + 1);
    assert_complete(&avl, num as usize);
}

#[test]
fn test_spinlock_avl_tree() {
    let num = 64;
    let avl: SpinLockAVLTree<i64> = SpinLockAVLTree::new();

    for i in 0..num {
        assert!(avl.insert(i));
    }

    for i in 0..num {
        assert!(!avl.insert(i));
    }

    assert_eq!(avl.get_height(), f32::log2(num as f32) as usize + 1);
    assert_complete(&avl, num as usize);
}

#[test]
fn test_lock_avl_tree_from_sorted() {
    let keys: Vec<i64> = (0..10_000).collect();
    let avl: MutexAVLTree<i64> = MutexAVLTree::from_sorted(&keys).unwrap();

    assert_complete(&avl, 10_000);
    assert!(MutexAVLTree::<i64>::from_sorted(&[2, 1]).is_err());

    let mut tree: AVLTree<i64> = avl.into_inner();
    assert!(tree.insert(10_000));
    assert_eq!(tree.validate(), Ok(10_001));
}

#[test]
fn test_lock_avl_tree_sorted_concurrent() {
    let n = 40_000;
    let avl: MutexAVLTree<i64> = MutexAVLTree::new();
    let keys: Vec<i64> = (0..n as i64).collect();

    assert_eq!(insert_concurrent(&avl, &keys, 8), n);
    assert_complete(&avl, n);
}

#[test]
fn test_lock_avl_tree_keys_snapshot() {
    let avl: SpinLockAVLTree<i64> = SpinLockAVLTree::new();

    for key in shuffled_keys(100) {
        avl.insert(key * 2);
    }

    assert_eq!(avl.keys(), (0..100).map(|k| k * 2).collect::<Vec<i64>>());
    assert_eq!(format!("{:?}", MutexAVLTree::<i64>::new()), "LockAVLTree { tree: {} }");
}

#[test]
fn stress_mutex_avl_tree_concurrent() {
    stress_concurrent_insert::<MutexAVLTree<i64>>(200_000, 16);
}

#[test]
fn stress_spinlock_avl_tree_concurrent() {
    stress_concurrent_insert::<SpinLockAVLTree<i64>>(100_000, 8);
}

#[test]
fn stress_mutex_avl_tree_duplicates() {
    stress_concurrent_duplicates::<MutexAVLTree<i64>>(20_000, 8);
}

#[test]
fn stress_spinlock_avl_tree_duplicates() {
    stress_concurrent_duplicates::<SpinLockAVLTree<i64>>(20_000, 4);
}
