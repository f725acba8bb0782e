use std::{
    cmp::Ordering as CmpOrdering,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use avlbench::{harness::height_bound, set::ConcurrentSet};
use crossbeam_utils::thread;
use rand::{prelude::SliceRandom, thread_rng};

pub fn shuffled_keys(n: usize) -> Vec<i64> {
    let mut keys: Vec<i64> = (0..n as i64).collect();
    keys.shuffle(&mut thread_rng());

    keys
}

/// Insert the keys with `thread_num` threads, each taking every `thread_num`-th key.
///
/// Return the number of insertions that reported a new key.
pub fn insert_concurrent<S>(set: &S, keys: &[i64], thread_num: usize) -> usize
where
    S: Sync + ConcurrentSet<i64>,
{
    let inserted = AtomicUsize::new(0);

    thread::scope(|s| {
        for t in 0..thread_num {
            let inserted = &inserted;

            s.spawn(move |_| {
                for key in keys.iter().skip(t).step_by(thread_num) {
                    if set.insert(*key) {
                        inserted.fetch_add(1, Ordering::Relaxed);
                    }
                }
            });
        }
    })
    .unwrap();

    inserted.into_inner()
}

/// assert the set holds exactly `0..n` and is a valid AVL tree
pub fn assert_complete<S: ConcurrentSet<i64>>(set: &S, n: usize) {
    assert_eq!(set.len(), n);
    assert_eq!(set.keys(), (0..n as i64).collect::<Vec<_>>());
    assert_eq!(set.validate(), Ok(n));
    assert!(
        set.get_height() <= height_bound(n),
        "height {} exceeds the bound {} for {} keys",
        set.get_height(),
        height_bound(n),
        n
    );
}

pub fn stress_concurrent_insert<S>(n: usize, thread_num: usize)
where
    S: Sync + ConcurrentSet<i64>,
{
    let set = S::new();
    let keys = shuffled_keys(n);

    assert_eq!(insert_concurrent(&set, &keys, thread_num), n);
    assert_complete(&set, n);
}

/// every thread inserts every key, so each key races with itself
pub fn stress_concurrent_duplicates<S>(n: usize, thread_num: usize)
where
    S: Sync + ConcurrentSet<i64>,
{
    let set = S::new();
    let keys = shuffled_keys(n);
    let inserted = AtomicUsize::new(0);

    thread::scope(|s| {
        for _ in 0..thread_num {
            s.spawn(|_| {
                for key in &keys {
                    if set.insert(*key) {
                        inserted.fetch_add(1, Ordering::Relaxed);
                    }
                }
            });
        }
    })
    .unwrap();

    assert_eq!(inserted.into_inner(), n);
    assert_complete(&set, n);
}

/// A key that counts how many times it is dropped.
#[derive(Debug)]
pub struct Tracked {
    pub key: i64,
    drops: Arc<AtomicUsize>,
}

impl Tracked {
    pub fn new(key: i64, drops: &Arc<AtomicUsize>) -> Self {
        Self {
            key,
            drops: Arc::clone(drops),
        }
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        Self::new(self.key, &self.drops)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::Relaxed);
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Tracked {}

impl PartialOrd for Tracked {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tracked {
    fn cmp(&self, other: &Self) -> CmpOrdering {
        self.key.cmp(&other.key)
    }
}
