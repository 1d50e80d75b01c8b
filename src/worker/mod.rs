//! Batch execution on a bounded local worker pool.
//!
//! - [`CommandRunner`]: spawns `sh -c <command>` and captures the exit
//!   status.
//! - [`BatchExecutor`]: runs level batches in order with a hard barrier
//!   between levels and fail-fast aggregation across the run.
//!
//! There is no cancellation of running children and no timeout: a failing
//! sibling only prevents the next batch from starting, and a hung child
//! stalls the run.

pub mod batch;
pub mod executor;

pub use batch::{BatchExecutor, RunReport};
pub use executor::{CommandOutcome, CommandRunner};
