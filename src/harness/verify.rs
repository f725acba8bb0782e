use crate::set::ConcurrentSet;

/// the greatest height an AVL tree of `n` keys may have, rounded up with a margin:
/// `⌈1.45 · log2(n + 1)⌉`
pub fn height_bound(n: usize) -> usize {
    (1.45 * ((n as f64) + 1.0).log2()).ceil() as usize
}

/// Check that an in-order traversal yields exactly `0..n` and that the tree is not taller than
/// an AVL tree of `n` keys can be.
///
/// A wrong key, a missing or duplicated key, or a degenerate shape all make it false.
pub fn verify<T: ConcurrentSet<i64>>(tree: &T, n: usize) -> bool {
    let keys = tree.keys();

    keys.len() == n
        && keys.iter().zip(0_i64..).all(|(&key, expected)| key == expected)
        && tree.get_height() <= height_bound(n)
}
