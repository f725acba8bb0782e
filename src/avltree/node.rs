use std::{
    cmp::{max, Ordering},
    sync::Arc,
};

use crate::error::{BuildError, InvariantError};

/// An owning pointer from a parent to a child node.
///
/// The balancing code is written once over this trait. `BoxLink` owns its node exclusively,
/// `ArcLink` shares it and copies on write, which turns the same insertion into path copying.
pub(crate) trait Link: Sized {
    type Key;

    fn new(node: Node<Self::Key, Self>) -> Self;

    fn node(&self) -> &Node<Self::Key, Self>;

    /// get the mutable reference of the node
    ///
    /// A shared link clones the node first if anyone else refers to it.
    fn node_mut(&mut self) -> &mut Node<Self::Key, Self>;

    /// take the node out of the link if the link is its only owner
    fn into_node(self) -> Option<Node<Self::Key, Self>>;
}

#[derive(Debug, Clone)]
pub(crate) struct Node<K, L> {
    pub(crate) key: K,
    pub(crate) height: isize,
    pub(crate) left: Option<L>,
    pub(crate) right: Option<L>,
}

#[derive(Debug)]
pub(crate) struct BoxLink<K>(Box<Node<K, BoxLink<K>>>);

impl<K> Link for BoxLink<K> {
    type Key = K;

    fn new(node: Node<K, Self>) -> Self {
        BoxLink(Box::new(node))
    }

    fn node(&self) -> &Node<K, Self> {
        &self.0
    }

    fn node_mut(&mut self) -> &mut Node<K, Self> {
        &mut self.0
    }

    fn into_node(self) -> Option<Node<K, Self>> {
        Some(*self.0)
    }
}

#[derive(Debug)]
pub(crate) struct ArcLink<K>(Arc<Node<K, ArcLink<K>>>);

impl<K> Clone for ArcLink<K> {
    fn clone(&self) -> Self {
        ArcLink(Arc::clone(&self.0))
    }
}

impl<K: Clone> Link for ArcLink<K> {
    type Key = K;

    fn new(node: Node<K, Self>) -> Self {
        ArcLink(Arc::new(node))
    }

    fn node(&self) -> &Node<K, Self> {
        &self.0
    }

    fn node_mut(&mut self) -> &mut Node<K, Self> {
        Arc::make_mut(&mut self.0)
    }

    fn into_node(self) -> Option<Node<K, Self>> {
        Arc::try_unwrap(self.0).ok()
    }
}

/// height of the subtree, 0 if absent
pub(crate) fn height<L: Link>(link: Option<&L>) -> isize {
    link.map_or(0, |link| link.node().height)
}

impl<K, L> Node<K, L> {
    pub(crate) fn new(key: K) -> Node<K, L> {
        Node {
            key,
            height: 1,
            left: None,
            right: None,
        }
    }
}

impl<K, L: Link<Key = K>> Node<K, L> {
    /// renew the height of the node from the childs
    pub(crate) fn renew_height(&mut self) {
        self.height = max(height(self.left.as_ref()), height(self.right.as_ref())) + 1;
    }

    /// get difference of the heights from the childs
    pub(crate) fn get_factor(&self) -> isize {
        height(self.left.as_ref()) - height(self.right.as_ref())
    }
}

/// rotate left the node
///
/// Change Parent-Right Child to Left Child-Parent, then return new parent(old right child).
/// The heights of both nodes are renewed, lower one first.
pub(crate) fn rotate_left<L: Link>(mut link: L) -> L {
    let node = link.node_mut();
    let Some(mut new_parent) = node.right.take() else {
        return link;
    };

    node.right = new_parent.node_mut().left.take();
    node.renew_height();

    let parent = new_parent.node_mut();
    parent.left = Some(link);
    parent.renew_height();

    new_parent
}

/// rotate right the node
///
/// Change Left Child-Parent to Parent-Right Child, then return new parent(old left child).
/// The heights of both nodes are renewed, lower one first.
pub(crate) fn rotate_right<L: Link>(mut link: L) -> L {
    let node = link.node_mut();
    let Some(mut new_parent) = node.left.take() else {
        return link;
    };

    node.left = new_parent.node_mut().right.take();
    node.renew_height();

    let parent = new_parent.node_mut();
    parent.right = Some(link);
    parent.renew_height();

    new_parent
}

/// renew the height of the node and restore its balance by the rule of AVL
///
/// Only called on the way back from an insertion, so the taller child leans to the side the key
/// went into: a child leaning away from its parent needs the double rotation (LR or RL).
fn rebalance<L: Link>(mut link: L) -> L {
    let node = link.node_mut();
    node.renew_height();

    let factor = node.get_factor();

    if factor > 1 {
        if let Some(left) = node.left.take() {
            node.left = Some(if left.node().get_factor() < 0 {
                rotate_left(left)
            } else {
                left
            });
        }

        rotate_right(link)
    } else if factor < -1 {
        if let Some(right) = node.right.take() {
            node.right = Some(if right.node().get_factor() > 0 {
                rotate_right(right)
            } else {
                right
            });
        }

        rotate_left(link)
    } else {
        link
    }
}

/// insert the key into the subtree, then return the new root of the subtree
///
/// The second value is false if the key already existed. The subtree is returned as it was then.
pub(crate) fn insert_into<L>(subtree: Option<L>, key: L::Key) -> (L, bool)
where
    L: Link,
    L::Key: Ord,
{
    let mut link = match subtree {
        Some(link) => link,
        None => return (L::new(Node::new(key)), true),
    };

    let inserted = match key.cmp(&link.node().key) {
        Ordering::Equal => return (link, false),
        Ordering::Less => {
            let node = link.node_mut();
            let (child, inserted) = insert_into(node.left.take(), key);
            node.left = Some(child);
            inserted
        }
        Ordering::Greater => {
            let node = link.node_mut();
            let (child, inserted) = insert_into(node.right.take(), key);
            node.right = Some(child);
            inserted
        }
    };

    if !inserted {
        return (link, false);
    }

    (rebalance(link), true)
}

/// release every node reachable from the root without recursion, then return the number of
/// released nodes
///
/// Each node is moved out of its link and its children are queued before it is dropped, so
/// dropping it never recurses. Shared nodes that are still referred to elsewhere only lose one
/// reference and are not visited.
pub(crate) fn teardown<L: Link>(root: Option<L>) -> usize {
    let mut released = 0;
    let mut links: Vec<L> = root.into_iter().collect();

    while let Some(link) = links.pop() {
        if let Some(mut node) = link.into_node() {
            links.extend(node.left.take());
            links.extend(node.right.take());
            released += 1;
        }
    }

    released
}

/// find the key by a read-only descent
pub(crate) fn contains<L>(root: Option<&L>, key: &L::Key) -> bool
where
    L: Link,
    L::Key: Ord,
{
    let mut link = root;

    while let Some(current) = link {
        let node = current.node();

        link = match key.cmp(&node.key) {
            Ordering::Equal => return true,
            Ordering::Less => node.left.as_ref(),
            Ordering::Greater => node.right.as_ref(),
        };
    }

    false
}

/// build a height-balanced subtree from strictly increasing keys by splitting on the middle
pub(crate) fn build_sorted<L>(keys: &[L::Key]) -> Option<L>
where
    L: Link,
    L::Key: Clone,
{
    if keys.is_empty() {
        return None;
    }

    let mid = keys.len() / 2;
    let mut node = Node::new(keys[mid].clone());
    node.left = build_sorted(&keys[..mid]);
    node.right = build_sorted(&keys[mid + 1..]);
    node.renew_height();

    Some(L::new(node))
}

pub(crate) fn check_sorted<K: Ord>(keys: &[K]) -> Result<(), BuildError> {
    match keys.windows(2).position(|pair| pair[0] >= pair[1]) {
        Some(index) => Err(BuildError::NotStrictlyIncreasing { index: index + 1 }),
        None => Ok(()),
    }
}

/// in-order iterator using an explicit stack of the left spine
pub(crate) struct Iter<'a, L: Link> {
    stack: Vec<&'a Node<L::Key, L>>,
}

impl<'a, L: Link> Iter<'a, L> {
    pub(crate) fn new(root: Option<&'a L>) -> Self {
        let mut iter = Iter {
            stack: Vec::with_capacity(height(root) as usize),
        };
        iter.push_left_spine(root);

        iter
    }

    fn push_left_spine(&mut self, mut link: Option<&'a L>) {
        while let Some(current) = link {
            let node = current.node();
            self.stack.push(node);
            link = node.left.as_ref();
        }
    }
}

impl<'a, L: Link> Iterator for Iter<'a, L> {
    type Item = &'a L::Key;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_ref());

        Some(&node.key)
    }
}

/// check ordering, heights and balance of the whole subtree, then return the number of nodes
pub(crate) fn validate<L>(root: Option<&L>) -> Result<usize, InvariantError>
where
    L: Link,
    L::Key: Ord,
{
    let mut count = 0;
    let mut prev: Option<&L::Key> = None;

    for key in Iter::new(root) {
        if prev.map_or(false, |prev| prev >= key) {
            return Err(InvariantError::Unordered);
        }

        prev = Some(key);
        count += 1;
    }

    check_shape(root)?;

    Ok(count)
}

fn check_shape<L: Link>(link: Option<&L>) -> Result<isize, InvariantError> {
    let node = match link {
        Some(link) => link.node(),
        None => return Ok(0),
    };

    let left = check_shape(node.left.as_ref())?;
    let right = check_shape(node.right.as_ref())?;

    let computed = max(left, right) + 1;
    if node.height != computed {
        return Err(InvariantError::StaleHeight {
            stored: node.height,
            computed,
        });
    }

    let factor = left - right;
    if !(-1..=1).contains(&factor) {
        return Err(InvariantError::Unbalanced { factor });
    }

    Ok(computed)
}
