use std::{
    cmp::min,
    sync::atomic::{AtomicUsize, Ordering},
};

use crossbeam_utils::thread;

use crate::error::HarnessError;

/// Call `f` on every item from `threads` scoped workers.
///
/// Workers are not bound to ranges of the input. Each one repeatedly claims the next `chunk`
/// items from a shared cursor until the input runs out, so a fast worker takes over the work
/// a slow one has not reached yet.
///
/// If any worker panics, the others still run to the end, then `WorkerPanicked` is returned.
pub fn parallel_for<T, F>(items: &[T], threads: usize, chunk: usize, f: F) -> Result<(), HarnessError>
where
    T: Sync,
    F: Fn(&T) + Sync,
{
    let threads = threads.max(1);
    let chunk = chunk.clamp(1, items.len().max(1));
    let cursor = AtomicUsize::new(0);

    thread::scope(|s| {
        for _ in 0..threads {
            s.spawn(|_| loop {
                let start = cursor.fetch_add(chunk, Ordering::Relaxed);
                if start >= items.len() {
                    break;
                }

                let end = min(start.saturating_add(chunk), items.len());
                for item in &items[start..end] {
                    f(item);
                }
            });
        }
    })
    .map_err(|_| HarnessError::WorkerPanicked)
}
