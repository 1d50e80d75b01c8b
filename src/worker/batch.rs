use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::graph::{JobGraph, JobId};
use crate::worker::executor::{CommandOutcome, CommandRunner};

/// Aggregated result of a run: every outcome collected so far, in batch
/// order, plus whether a shutdown request cut the run short.
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<CommandOutcome>,
    pub batches_dispatched: usize,
    pub interrupted: bool,
}

impl RunReport {
    pub fn failures(&self) -> Vec<&CommandOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded()).collect()
    }

    pub fn failed(&self) -> bool {
        self.outcomes.iter().any(|o| !o.succeeded())
    }
}

/// Dispatches level batches to a bounded local worker pool.
///
/// Batches run strictly in ascending level order with a hard barrier: every
/// command of a batch has returned before the next batch is dispatched. A
/// fresh pool of `workers` permits is used per batch; siblings within a
/// batch run in parallel with no ordering guarantee.
#[derive(Debug, Clone)]
pub struct BatchExecutor {
    workers: usize,
    shutdown: CancellationToken,
}

impl BatchExecutor {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
            shutdown: CancellationToken::new(),
        }
    }

    /// Stop dispatching further batches once `token` is cancelled.
    /// Commands already running are left to finish.
    pub fn with_shutdown(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// Run all batches, fail-fast: a nonzero exit anywhere lets the rest of
    /// its batch finish, then halts the run. Completed outputs are left in
    /// place; nothing is retried or rolled back.
    pub async fn run(&self, graph: &mut JobGraph, batches: &[Vec<JobId>]) -> RunReport {
        let mut report = RunReport::default();

        for (level, batch) in batches.iter().enumerate() {
            if self.shutdown.is_cancelled() {
                tracing::warn!(level, "Shutdown requested, not dispatching further batches");
                report.interrupted = true;
                break;
            }

            tracing::info!(level, jobs = batch.len(), workers = self.workers, "Dispatching batch");
            let outcomes = self.run_batch(graph, batch).await;
            let failed = outcomes.iter().filter(|o| !o.succeeded()).count();
            report.outcomes.extend(outcomes);
            report.batches_dispatched += 1;

            if failed > 0 {
                tracing::error!(level, failed, "Batch had failures, aborting remaining batches");
                break;
            }
        }

        report
    }

    /// Dispatch one batch to a fresh worker pool and collect every job's
    /// outcome. Returns only when all dispatched commands have returned.
    pub async fn run_batch(&self, graph: &mut JobGraph, batch: &[JobId]) -> Vec<CommandOutcome> {
        let pool = Arc::new(Semaphore::new(self.workers));
        let runner = CommandRunner;
        let mut tasks = JoinSet::new();

        for &id in batch {
            graph.mark_submitted(id);
            let job = graph.get(id);
            let name = job.name.clone();
            let command = job.command.clone();
            let pool = Arc::clone(&pool);
            let runner = runner.clone();
            tasks.spawn(async move {
                // The semaphore is never closed while tasks hold the Arc.
                let _permit = pool
                    .acquire_owned()
                    .await
                    .expect("worker pool semaphore closed");
                runner.execute(id, &name, &command).await
            });
        }

        let mut outcomes = Vec::with_capacity(batch.len());
        while let Some(joined) = tasks.join_next().await {
            outcomes.push(joined.expect("worker task panicked"));
        }
        outcomes
    }
}
