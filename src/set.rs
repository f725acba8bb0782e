use crate::error::InvariantError;

pub trait SequentialSet<K: Ord> {
    fn new() -> Self;

    /// Insert key into the set.
    ///
    /// If the key is new, return true.
    /// If the key already exists, the set is unchanged and return false. It is not an error.
    fn insert(&mut self, key: K) -> bool;

    /// the number of keys in the set
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// get the height of the tree, 0 if empty
    fn get_height(&self) -> usize;

    /// Check ordering, heights and balance of every node.
    ///
    /// If all hold, return Ok(the number of nodes).
    fn validate(&self) -> Result<usize, InvariantError>;
}

pub trait ConcurrentSet<K: Ord> {
    fn new() -> Self;

    /// Insert key into the set. Safe to call from many threads at once.
    ///
    /// If the key is new, return true.
    /// If the key already exists, the set is unchanged and return false. It is not an error.
    fn insert(&self, key: K) -> bool;

    /// the number of keys in the set
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// get the height of the tree, 0 if empty
    fn get_height(&self) -> usize;

    /// Collect the keys by in-order traversal.
    ///
    /// The keys are taken from one consistent state of the set.
    fn keys(&self) -> Vec<K>
    where
        K: Clone;

    /// Check ordering, heights and balance of every node.
    ///
    /// If all hold, return Ok(the number of nodes).
    fn validate(&self) -> Result<usize, InvariantError>;
}
