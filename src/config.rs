use std::path::PathBuf;

use crate::error::{PipelineError, Result};
use crate::worker::BatchExecutor;

/// Default executables, matching the BLAST+ toolchain the pipeline was
/// written around. Both are treated as opaque commands.
pub const INDEXER_DEFAULT: &str = "makeblastdb";
pub const COMPARATOR_DEFAULT: &str = "blastp";

/// Dataset file extensions recognised by input discovery.
pub const DATASET_EXTS: &[&str] = &["fasta", "faa", "fas", "fa"];

/// Backend that executes the scheduled batches.
///
/// Only the local bounded worker pool is implemented. Selecting `Cluster`
/// fails at selection time rather than silently falling back to the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerBackend {
    Local,
    Cluster,
}

impl std::fmt::Display for SchedulerBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchedulerBackend::Local => write!(f, "local"),
            SchedulerBackend::Cluster => write!(f, "cluster"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory scanned for dataset files.
    pub indir: PathBuf,
    /// Directory receiving indexes and comparison results.
    pub outdir: PathBuf,
    /// Path to the index-construction executable.
    pub indexer_exe: String,
    /// Path to the comparison executable.
    pub comparator_exe: String,
    /// Prefix for generated job names.
    pub job_prefix: String,
    /// Backend executing the batches.
    pub backend: SchedulerBackend,
    /// Worker pool size. `None` means one worker per available CPU.
    pub workers: Option<usize>,
    /// Allow writing into an already-populated output directory.
    pub force: bool,
}

impl RunConfig {
    pub fn new(indir: PathBuf, outdir: PathBuf) -> Self {
        Self {
            indir,
            outdir,
            indexer_exe: INDEXER_DEFAULT.to_string(),
            comparator_exe: COMPARATOR_DEFAULT.to_string(),
            job_prefix: default_job_prefix(),
            backend: SchedulerBackend::Local,
            workers: None,
            force: false,
        }
    }

    /// Build the executor for the configured backend.
    ///
    /// The cluster backend is rejected here, before any job is built.
    pub fn build_executor(&self) -> Result<BatchExecutor> {
        match self.backend {
            SchedulerBackend::Local => Ok(BatchExecutor::new(self.worker_count())),
            SchedulerBackend::Cluster => {
                Err(PipelineError::UnsupportedBackend(self.backend.to_string()))
            }
        }
    }

    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}

/// Timestamped prefix so concurrent runs against the same output tree
/// produce distinguishable job names.
pub fn default_job_prefix() -> String {
    format!("RBBH_{}", chrono::Utc::now().timestamp())
}
