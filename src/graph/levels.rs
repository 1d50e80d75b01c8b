//! Stratifies a job graph into ordered execution batches.
//!
//! A job's level is the length of the longest dependency chain reaching it:
//! 0 for roots, otherwise 1 + the maximum level among its dependencies. A
//! job reached over several chains of different length lands at the deepest
//! one, so it can never be dispatched before a dependency's batch has
//! closed. Jobs are tracked by [`JobId`], never by command text: two
//! distinct jobs with identical commands are both scheduled.

use crate::error::{PipelineError, Result};
use crate::graph::job::{JobGraph, JobId};

/// Partition `graph` into batches by ascending level.
///
/// Batch 0 holds every dependency-free job; batch k holds the jobs whose
/// dependencies are all satisfied by batches 0..k. Every job appears in
/// exactly one batch. The partition depends only on the dependency
/// relation, not on insertion order.
pub fn level_batches(graph: &JobGraph) -> Result<Vec<Vec<JobId>>> {
    let n = graph.len();
    let mut level = vec![0usize; n];
    let mut pending = vec![0usize; n];
    let mut ready: Vec<JobId> = Vec::new();

    for (id, job) in graph.jobs() {
        pending[id.0] = job.dependencies.len();
        if job.dependencies.is_empty() {
            ready.push(id);
        }
    }

    // Kahn-style pass; a job's level is final once all dependencies have
    // been placed.
    let mut placed = 0;
    while let Some(id) = ready.pop() {
        placed += 1;
        for &child in &graph.get(id).children {
            if level[id.0] + 1 > level[child.0] {
                level[child.0] = level[id.0] + 1;
            }
            pending[child.0] -= 1;
            if pending[child.0] == 0 {
                ready.push(child);
            }
        }
    }

    if placed != n {
        // Some job was never released: its dependency chain loops.
        let stuck = graph
            .jobs()
            .find(|(id, _)| pending[id.0] > 0)
            .map(|(_, job)| job.name.clone())
            .unwrap_or_default();
        return Err(PipelineError::DependencyCycle(stuck));
    }

    let depth = level.iter().max().map(|&d| d + 1).unwrap_or(0);
    let mut batches = vec![Vec::new(); depth];
    for id in graph.ids() {
        batches[level[id.0]].push(id);
    }
    Ok(batches)
}
