use clap::{Args, ValueEnum};

use crate::error::ConfigError;

/// keys inserted in random order by the first scenario
pub const SHUFFLED_LEN: usize = 1_000_000;

/// keys inserted in increasing order by the second scenario
pub const SORTED_LEN: usize = 40_000;

/// Which tree implementation the scenarios run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TreeKind {
    /// one blocking mutex per tree, held for each whole insertion
    Mutex,
    /// one spin lock per tree, held for each whole insertion
    Spin,
    /// lock-free path copying with an atomically swapped root
    Persistent,
}

/// Benchmark settings. Each field is taken from its flag, then its environment variable,
/// then the default.
#[derive(Debug, Clone, Args)]
pub struct BenchConfig {
    /// Number of worker threads inserting concurrently.
    #[arg(long, env = "AVLBENCH_THREADS", default_value_t = num_cpus::get())]
    pub threads: usize,

    /// Number of consecutive keys a worker claims at a time.
    ///
    /// Only affects how evenly work spreads among workers, never the result.
    #[arg(long, env = "AVLBENCH_CHUNK", default_value_t = 1)]
    pub chunk: usize,

    /// Seed for shuffling the keys of the shuffled scenario.
    #[arg(long, env = "AVLBENCH_SEED", default_value_t = 0)]
    pub seed: u64,

    /// Number of keys in the shuffled scenario.
    #[arg(long, default_value_t = SHUFFLED_LEN)]
    pub shuffled_len: usize,

    /// Number of keys in the sorted scenario.
    #[arg(long, default_value_t = SORTED_LEN)]
    pub sorted_len: usize,

    /// Tree implementation to benchmark.
    #[arg(long, env = "AVLBENCH_TREE", value_enum, default_value_t = TreeKind::Mutex)]
    pub tree: TreeKind,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            threads: num_cpus::get(),
            chunk: 1,
            seed: 0,
            shuffled_len: SHUFFLED_LEN,
            sorted_len: SORTED_LEN,
            tree: TreeKind::Mutex,
        }
    }
}

impl BenchConfig {
    /// Raise zero `threads` and `chunk` to 1, then return what was raised.
    ///
    /// Afterwards `validate` always succeeds.
    pub fn clamp(&mut self) -> Vec<ConfigError> {
        let mut raised = Vec::new();

        if self.threads == 0 {
            self.threads = 1;
            raised.push(ConfigError::ZeroThreads);
        }

        if self.chunk == 0 {
            self.chunk = 1;
            raised.push(ConfigError::ZeroChunk);
        }

        raised
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threads == 0 {
            return Err(ConfigError::ZeroThreads);
        }

        if self.chunk == 0 {
            return Err(ConfigError::ZeroChunk);
        }

        Ok(())
    }
}
