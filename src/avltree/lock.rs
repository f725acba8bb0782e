use std::fmt::Debug;

use crate::{
    error::{BuildError, InvariantError},
    lock::{RawMutex, RawSimpleLock, RawSpinLock, SimpleLock},
    set::{ConcurrentSet, SequentialSet},
};

use super::AVLTree;

/// AVL tree behind one lock per tree instance.
///
/// Every insertion holds the lock for the whole descent and rebalancing, so insertions are fully
/// serialized no matter where in the tree they land.
pub struct LockAVLTree<K, L> {
    tree: SimpleLock<L, AVLTree<K>>,
}

pub type MutexAVLTree<K> = LockAVLTree<K, RawMutex>;
pub type SpinLockAVLTree<K> = LockAVLTree<K, RawSpinLock>;

impl<K: Debug, L: RawSimpleLock> Debug for LockAVLTree<K, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockAVLTree")
            .field("tree", &*self.tree.lock())
            .finish()
    }
}

impl<K, L: RawSimpleLock> LockAVLTree<K, L> {
    pub fn from_sorted(keys: &[K]) -> Result<Self, BuildError>
    where
        K: Ord + Clone,
    {
        Ok(Self::from(AVLTree::from_sorted(keys)?))
    }

    pub fn into_inner(self) -> AVLTree<K> {
        self.tree.into_inner()
    }
}

impl<K, L: RawSimpleLock> From<AVLTree<K>> for LockAVLTree<K, L> {
    fn from(tree: AVLTree<K>) -> Self {
        Self {
            tree: SimpleLock::new(tree),
        }
    }
}

impl<K, L> ConcurrentSet<K> for LockAVLTree<K, L>
where
    K: Ord,
    L: RawSimpleLock,
{
    fn new() -> Self {
        Self::from(AVLTree::new())
    }

    fn insert(&self, key: K) -> bool {
        self.tree.lock().insert(key)
    }

    fn len(&self) -> usize {
        self.tree.lock().len()
    }

    fn get_height(&self) -> usize {
        self.tree.lock().get_height()
    }

    fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.tree.lock().iter().cloned().collect()
    }

    fn validate(&self) -> Result<usize, InvariantError> {
        self.tree.lock().validate()
    }
}
