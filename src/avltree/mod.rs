mod lock;
mod node;
mod persistent;

pub use lock::{LockAVLTree, MutexAVLTree, SpinLockAVLTree};
pub use persistent::PersistentAVLTree;

use std::fmt::Debug;

use crate::{
    error::{BuildError, InvariantError},
    set::SequentialSet,
};

use node::{build_sorted, check_sorted, height, insert_into, teardown, validate, BoxLink, Iter};

/// Sequential AVL tree of keys. Each node owns its children exclusively.
pub struct AVLTree<K> {
    root: Option<BoxLink<K>>,
    len: usize,
}

impl<K: Debug> Debug for AVLTree<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K> AVLTree<K> {
    /// iterate the keys in increasing order
    pub fn iter(&self) -> impl Iterator<Item = &K> + '_ {
        Iter::new(self.root.as_ref())
    }

    /// Build the tree directly from strictly increasing keys without rotations.
    ///
    /// The result is balanced like a tree made by inserting the keys one by one.
    pub fn from_sorted(keys: &[K]) -> Result<Self, BuildError>
    where
        K: Ord + Clone,
    {
        check_sorted(keys)?;

        Ok(AVLTree {
            root: build_sorted(keys),
            len: keys.len(),
        })
    }
}

impl<K> Default for AVLTree<K> {
    fn default() -> Self {
        AVLTree { root: None, len: 0 }
    }
}

impl<K: Ord> SequentialSet<K> for AVLTree<K> {
    fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, key: K) -> bool {
        let (root, inserted) = insert_into(self.root.take(), key);
        self.root = Some(root);

        if inserted {
            self.len += 1;
        }

        inserted
    }

    fn len(&self) -> usize {
        self.len
    }

    fn get_height(&self) -> usize {
        height(self.root.as_ref()) as usize
    }

    fn validate(&self) -> Result<usize, InvariantError> {
        validate(self.root.as_ref())
    }
}

impl<K> Drop for AVLTree<K> {
    fn drop(&mut self) {
        // release nodes by a worklist, since dropping the boxes recursively is bounded by the stack
        teardown(self.root.take());
    }
}
