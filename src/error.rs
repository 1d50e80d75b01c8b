use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("input path is not a directory: {0}")]
    InvalidInputDir(PathBuf),

    #[error("output directory {0} already contains files (use --force to overwrite)")]
    OutputDirPopulated(PathBuf),

    #[error("datasets {first} and {second} share the filestem '{stem}'")]
    StemCollision {
        stem: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("dependency cycle involving job '{0}'")]
    DependencyCycle(String),

    #[error("{failed} of {total} commands failed: {failures:?}")]
    ExecutionFailed {
        failed: usize,
        total: usize,
        failures: Vec<String>,
    },

    #[error("scheduler backend '{0}' is not supported")]
    UnsupportedBackend(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
