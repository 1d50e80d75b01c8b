//! End-to-end orchestration: discovery, graph construction, leveling and
//! batch execution for one run.

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::config::{RunConfig, DATASET_EXTS};
use crate::discover;
use crate::error::{PipelineError, Result};
use crate::graph::{self, BuilderConfig};

/// Summary of a completed run, also emitted as JSON by the CLI.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub datasets: usize,
    pub index_jobs: usize,
    pub comparison_jobs: usize,
    pub batches: usize,
    pub batches_dispatched: usize,
    pub commands_run: usize,
    pub interrupted: bool,
}

/// One all-vs-all comparison run over a directory of datasets.
#[derive(Debug)]
pub struct Pipeline {
    config: RunConfig,
    shutdown: CancellationToken,
}

impl Pipeline {
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_shutdown(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// Run the pipeline to completion.
    ///
    /// Backend selection happens first, so an unsupported backend fails
    /// before any filesystem work. Precursor checks and graph construction
    /// fail before any command is dispatched; an execution failure is
    /// reported only after its batch has fully drained.
    pub async fn run(&self) -> Result<RunSummary> {
        let executor = self
            .config
            .build_executor()?
            .with_shutdown(self.shutdown.clone());

        let infiles = discover::find_datasets(&self.config.indir, DATASET_EXTS)?;
        discover::prepare_outdir(&self.config.outdir, self.config.force)?;

        let builder_config = BuilderConfig {
            outdir: &self.config.outdir,
            indexer_exe: &self.config.indexer_exe,
            comparator_exe: &self.config.comparator_exe,
            job_prefix: &self.config.job_prefix,
        };
        let mut jobgraph = graph::build_graph(&infiles, &builder_config)?;
        let batches = graph::level_batches(&jobgraph)?;

        tracing::info!(
            jobs = jobgraph.len(),
            batches = batches.len(),
            backend = %self.config.backend,
            "Starting run"
        );
        let report = executor.run(&mut jobgraph, &batches).await;

        let failures = report.failures();
        if !failures.is_empty() {
            return Err(PipelineError::ExecutionFailed {
                failed: failures.len(),
                total: report.outcomes.len(),
                failures: failures.iter().map(|o| o.name.clone()).collect(),
            });
        }

        let index_jobs = infiles.len();
        Ok(RunSummary {
            datasets: infiles.len(),
            index_jobs,
            comparison_jobs: jobgraph.len() - index_jobs,
            batches: batches.len(),
            batches_dispatched: report.batches_dispatched,
            commands_run: report.outcomes.len(),
            interrupted: report.interrupted,
        })
    }
}
