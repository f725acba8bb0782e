//! Benchmark driver: feeds the keys `0..n` to a tree from many threads, then checks the result.

mod config;
mod pool;
mod scenario;
mod verify;

pub use config::{BenchConfig, TreeKind, SHUFFLED_LEN, SORTED_LEN};
pub use pool::parallel_for;
pub use scenario::{run_scenario, run_scenario_as, scenarios, KeyOrder, Outcome, Scenario};
pub use verify::{height_bound, verify};
