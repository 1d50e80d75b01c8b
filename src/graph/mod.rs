//! Job dependency graph: construction and level scheduling.
//!
//! - [`job`]: the [`Job`] arena, with dependency/child relations held as
//!   [`JobId`] index sets.
//! - [`builder`]: turns a dataset list into index and comparison jobs.
//! - [`levels`]: partitions the graph into dispatchable batches.

pub mod builder;
pub mod job;
pub mod levels;

pub use builder::{build_graph, BuilderConfig};
pub use job::{Job, JobGraph, JobId};
pub use levels::level_batches;
