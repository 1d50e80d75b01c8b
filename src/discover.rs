//! Input discovery and output-directory preparation.
//!
//! Both run before any job is built; failures here abort the run with no
//! side effects beyond possibly creating an empty output directory.

use std::path::{Path, PathBuf};

use crate::error::{PipelineError, Result};

/// List dataset files in `dirname` whose extension matches one of `exts`
/// (compared without the leading dot), sorted by path for determinism.
pub fn find_datasets(dirname: &Path, exts: &[&str]) -> Result<Vec<PathBuf>> {
    if !dirname.is_dir() {
        return Err(PipelineError::InvalidInputDir(dirname.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dirname)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .map(|e| exts.iter().any(|x| e.eq_ignore_ascii_case(x)))
            .unwrap_or(false);
        if matches {
            files.push(path);
        }
    }
    files.sort();

    tracing::info!(dir = %dirname.display(), count = files.len(), "Found dataset files");
    Ok(files)
}

/// Create the output directory, refusing to write into an already-populated
/// one unless `force` is set. Existing files are never removed; spawned
/// commands simply overwrite their own outputs.
pub fn prepare_outdir(outdir: &Path, force: bool) -> Result<()> {
    if outdir.is_dir() {
        let populated = std::fs::read_dir(outdir)?.next().is_some();
        if populated {
            if !force {
                return Err(PipelineError::OutputDirPopulated(outdir.to_path_buf()));
            }
            tracing::warn!(dir = %outdir.display(), "Output directory exists, overwriting");
        }
        return Ok(());
    }

    tracing::info!(dir = %outdir.display(), "Creating output directory");
    std::fs::create_dir_all(outdir)?;
    Ok(())
}
