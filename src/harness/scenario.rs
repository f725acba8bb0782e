use std::{
    fmt,
    panic::{self, AssertUnwindSafe},
    time::{Duration, Instant},
};

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::{info, info_span, warn};

use crate::{
    avltree::{MutexAVLTree, PersistentAVLTree, SpinLockAVLTree},
    error::HarnessError,
    set::ConcurrentSet,
};

use super::{
    config::{BenchConfig, TreeKind},
    pool::parallel_for,
    verify::verify,
};

/// The order in which the keys `0..len` are fed to the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOrder {
    Sorted,
    /// a permutation fixed by the seed
    Shuffled { seed: u64 },
}

impl KeyOrder {
    pub fn generate(&self, len: usize) -> Vec<i64> {
        let mut keys: Vec<i64> = (0..len as i64).collect();

        if let KeyOrder::Shuffled { seed } = *self {
            keys.shuffle(&mut StdRng::seed_from_u64(seed));
        }

        keys
    }
}

/// Insert the keys `0..len` in the given order, then verify.
///
/// Scenarios differ only in the order of their keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub label: &'static str,
    pub len: usize,
    pub order: KeyOrder,
}

impl Scenario {
    pub fn shuffled(len: usize, seed: u64) -> Self {
        Self {
            label: "Shuffled data",
            len,
            order: KeyOrder::Shuffled { seed },
        }
    }

    pub fn sorted(len: usize) -> Self {
        Self {
            label: "Sorted data  ",
            len,
            order: KeyOrder::Sorted,
        }
    }

    /// the report line of this scenario
    pub fn report(&self, outcome: &Outcome) -> String {
        format!("{}{}", self.label, outcome)
    }
}

/// the scenarios of one benchmark run, in run order
pub fn scenarios(config: &BenchConfig) -> [Scenario; 2] {
    [
        Scenario::shuffled(config.shuffled_len, config.seed),
        Scenario::sorted(config.sorted_len),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// verified, with the wall-clock time of the concurrent insertion phase
    Passed(Duration),
    /// the tree does not hold exactly the inserted keys in order, or it is too tall
    WrongResult,
    /// the scenario faulted before it could be verified
    NotImplemented,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Passed(elapsed) => write!(f, "          {:>7} ms", elapsed.as_millis()),
            Outcome::WrongResult => write!(f, "       --- wrong result ---"),
            Outcome::NotImplemented => write!(f, "      --- not implemented ---"),
        }
    }
}

/// Run one scenario against a fresh tree of type `T`.
///
/// Only the concurrent insertion is timed. Any panic, in a worker or elsewhere, is caught here
/// and becomes `NotImplemented`, so it cannot abort the other scenarios.
pub fn run_scenario<T>(scenario: &Scenario, config: &BenchConfig) -> Outcome
where
    T: ConcurrentSet<i64> + Sync,
{
    let span = info_span!("scenario", label = scenario.label.trim_end(), len = scenario.len);
    let _enter = span.enter();

    let result = panic::catch_unwind(AssertUnwindSafe(|| -> Result<Outcome, HarnessError> {
        let keys = scenario.order.generate(scenario.len);
        let tree = T::new();

        info!(threads = config.threads, chunk = config.chunk, "inserting");

        let begin = Instant::now();
        parallel_for(&keys, config.threads, config.chunk, |&key| {
            tree.insert(key);
        })?;
        let elapsed = begin.elapsed();

        if verify(&tree, scenario.len) {
            info!(elapsed_ms = elapsed.as_millis() as u64, "verified");
            Ok(Outcome::Passed(elapsed))
        } else {
            warn!(
                len = tree.len(),
                height = tree.get_height(),
                "tree does not hold the inserted keys in order"
            );
            Ok(Outcome::WrongResult)
        }
    }));

    match result {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(e)) => {
            warn!(error = %e, "scenario faulted");
            Outcome::NotImplemented
        }
        Err(_) => {
            warn!("scenario panicked");
            Outcome::NotImplemented
        }
    }
}

/// run one scenario against the tree implementation chosen by `kind`
pub fn run_scenario_as(kind: TreeKind, scenario: &Scenario, config: &BenchConfig) -> Outcome {
    match kind {
        TreeKind::Mutex => run_scenario::<MutexAVLTree<i64>>(scenario, config),
        TreeKind::Spin => run_scenario::<SpinLockAVLTree<i64>>(scenario, config),
        TreeKind::Persistent => run_scenario::<PersistentAVLTree<i64>>(scenario, config),
    }
}
