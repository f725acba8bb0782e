use std::{fmt::Debug, mem, sync::atomic::Ordering};

use crossbeam_epoch::{pin, unprotected, Atomic, Owned};
use crossbeam_utils::Backoff;
use tracing::trace;

use crate::{
    error::{BuildError, InvariantError},
    set::ConcurrentSet,
};

use super::node::{
    build_sorted, check_sorted, contains, height, insert_into, teardown, validate, ArcLink, Iter,
};

/// one immutable version of the tree
struct Root<K: Clone> {
    link: Option<ArcLink<K>>,
    len: usize,
}

impl<K: Clone> Drop for Root<K> {
    fn drop(&mut self) {
        // nodes shared with newer versions are only unreferenced here
        teardown(self.link.take());
    }
}

/// Lock-free AVL tree by path copying.
///
/// An insertion copies the nodes on the path from the root to the new leaf (and the few nodes a
/// rotation touches), shares every other subtree with the current version, then publishes the
/// new version by swapping the root pointer with CAS. If another insertion won the race, it
/// retries on the newer version. Readers see one immutable version for as long as they are
/// pinned, and retired versions are reclaimed by the epoch collector.
pub struct PersistentAVLTree<K: Clone> {
    root: Atomic<Root<K>>,
}

impl<K: Clone + Debug> Debug for PersistentAVLTree<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let guard = pin();
        let root = unsafe { self.root.load(Ordering::Acquire, &guard).deref() };

        f.debug_set()
            .entries(Iter::new(root.link.as_ref()))
            .finish()
    }
}

impl<K: Ord + Clone> PersistentAVLTree<K> {
    pub fn from_sorted(keys: &[K]) -> Result<Self, BuildError> {
        check_sorted(keys)?;

        Ok(Self {
            root: Atomic::new(Root {
                link: build_sorted(keys),
                len: keys.len(),
            }),
        })
    }
}

impl<K: Ord + Clone> ConcurrentSet<K> for PersistentAVLTree<K> {
    fn new() -> Self {
        Self {
            root: Atomic::new(Root { link: None, len: 0 }),
        }
    }

    fn insert(&self, key: K) -> bool {
        let guard = pin();
        let backoff = Backoff::new();
        let mut retries = 0_usize;

        loop {
            let current = self.root.load(Ordering::Acquire, &guard);
            // the root is never null, and it is not reclaimed while pinned
            let current_ref = unsafe { current.deref() };

            // a duplicate is found without copying anything
            if contains(current_ref.link.as_ref(), &key) {
                return false;
            }

            let (link, inserted) = insert_into(current_ref.link.clone(), key.clone());
            // the loaded version never changes, so a key missing from it is always inserted
            debug_assert!(inserted);

            let new = Owned::new(Root {
                link: Some(link),
                len: current_ref.len + 1,
            });

            match self.root.compare_exchange(
                current,
                new,
                Ordering::AcqRel,
                Ordering::Acquire,
                &guard,
            ) {
                Ok(_) => {
                    unsafe { guard.defer_destroy(current) };

                    if retries > 0 {
                        trace!(retries, "persistent insert published after retries");
                    }

                    return true;
                }
                Err(_) => {
                    // the failed version is dropped with the returned `Owned`
                    retries += 1;
                    backoff.spin();
                }
            }
        }
    }

    fn len(&self) -> usize {
        let guard = pin();
        let root = unsafe { self.root.load(Ordering::Acquire, &guard).deref() };

        root.len
    }

    fn get_height(&self) -> usize {
        let guard = pin();
        let root = unsafe { self.root.load(Ordering::Acquire, &guard).deref() };

        height(root.link.as_ref()) as usize
    }

    fn keys(&self) -> Vec<K> {
        let guard = pin();
        let root = unsafe { self.root.load(Ordering::Acquire, &guard).deref() };

        let mut keys = Vec::with_capacity(root.len);
        keys.extend(Iter::new(root.link.as_ref()).cloned());

        keys
    }

    fn validate(&self) -> Result<usize, InvariantError> {
        let guard = pin();
        let root = unsafe { self.root.load(Ordering::Acquire, &guard).deref() };

        validate(root.link.as_ref())
    }
}

impl<K: Clone> Drop for PersistentAVLTree<K> {
    fn drop(&mut self) {
        unsafe {
            let root = mem::replace(&mut self.root, Atomic::null());
            if !root.load(Ordering::Relaxed, unprotected()).is_null() {
                drop(root.into_owned());
            }
        }
    }
}
