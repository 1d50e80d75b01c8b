//! Builds the index/comparison job graph for a dataset list.
//!
//! For `n` datasets the builder emits `n` index jobs (graph roots) and, for
//! every unordered pair, one forward and one reverse comparison job, each
//! depending on the index job of the dataset it queries against. Job count is
//! therefore `n + n*(n-1)` and build time is quadratic in `n` — a known
//! scaling limit for large collections.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, Result};
use crate::graph::job::{JobGraph, JobId};

/// Inputs to graph construction; all command text derives from these.
#[derive(Debug, Clone)]
pub struct BuilderConfig<'a> {
    pub outdir: &'a Path,
    pub indexer_exe: &'a str,
    pub comparator_exe: &'a str,
    pub job_prefix: &'a str,
}

/// Build the full job graph for `infiles`.
///
/// Rebuilding from the same dataset list and prefix yields byte-identical
/// job names and command strings. Fails before creating any job if two
/// datasets reduce to the same filestem, since their index and result paths
/// would collide.
pub fn build_graph(infiles: &[PathBuf], config: &BuilderConfig) -> Result<JobGraph> {
    let stems = check_stems(infiles)?;

    let mut graph = JobGraph::new();
    let index_jobs = add_index_jobs(&mut graph, infiles, &stems, config);
    let comparisons = add_comparison_jobs(&mut graph, infiles, &stems, &index_jobs, config);

    tracing::info!(
        datasets = infiles.len(),
        index_jobs = index_jobs.len(),
        comparison_jobs = comparisons,
        "Built job graph"
    );
    Ok(graph)
}

/// Filestem of a dataset path: file name with directory and final
/// extension stripped.
pub fn filestem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Compute per-file stems, rejecting collisions: two datasets with the same
/// stem would produce ambiguous index and output names.
fn check_stems(infiles: &[PathBuf]) -> Result<Vec<String>> {
    let mut seen: HashMap<String, &PathBuf> = HashMap::new();
    let mut stems = Vec::with_capacity(infiles.len());
    for infile in infiles {
        let stem = filestem(infile);
        if let Some(first) = seen.get(&stem) {
            return Err(PipelineError::StemCollision {
                stem,
                first: (*first).clone(),
                second: infile.clone(),
            });
        }
        seen.insert(stem.clone(), infile);
        stems.push(stem);
    }
    Ok(stems)
}

/// One index job per dataset, named `<prefix>_db_<idx>` in input order.
fn add_index_jobs(
    graph: &mut JobGraph,
    infiles: &[PathBuf],
    stems: &[String],
    config: &BuilderConfig,
) -> Vec<JobId> {
    infiles
        .iter()
        .zip(stems)
        .enumerate()
        .map(|(idx, (infile, stem))| {
            let name = format!("{}_db_{:06}", config.job_prefix, idx);
            let command = index_command(infile, stem, config);
            graph.add_job(name, command)
        })
        .collect()
}

/// Two directional comparison jobs per unordered pair, sharing a pair
/// sequence number assigned in input order. Each job depends on the index
/// of the dataset it queries against, not on its own dataset's index.
/// Returns the number of comparison jobs added.
fn add_comparison_jobs(
    graph: &mut JobGraph,
    infiles: &[PathBuf],
    stems: &[String],
    index_jobs: &[JobId],
    config: &BuilderConfig,
) -> usize {
    let mut added = 0;
    let mut pairnum = 0;
    for i in 0..infiles.len() {
        for j in (i + 1)..infiles.len() {
            pairnum += 1;
            let fwd_cmd = comparison_command(&infiles[i], &stems[i], &stems[j], config);
            let rev_cmd = comparison_command(&infiles[j], &stems[j], &stems[i], config);
            let fwd = graph.add_job(
                format!("{}_query_{:06}_fwd", config.job_prefix, pairnum),
                fwd_cmd,
            );
            let rev = graph.add_job(
                format!("{}_query_{:06}_rev", config.job_prefix, pairnum),
                rev_cmd,
            );
            graph.add_dependency(fwd, index_jobs[j]);
            graph.add_dependency(rev, index_jobs[i]);
            added += 2;
        }
    }
    added
}

fn index_command(infile: &Path, stem: &str, config: &BuilderConfig) -> String {
    format!(
        "{} -in {} -out {}",
        config.indexer_exe,
        infile.display(),
        config.outdir.join(stem).display()
    )
}

fn comparison_command(
    query: &Path,
    query_stem: &str,
    db_stem: &str,
    config: &BuilderConfig,
) -> String {
    let outfile = config
        .outdir
        .join(format!("{}_vs_{}.out", query_stem, db_stem));
    format!(
        "{} -out {} -query {} -db {}",
        config.comparator_exe,
        outfile.display(),
        query.display(),
        config.outdir.join(db_stem).display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filestem_strips_directory_and_extension() {
        assert_eq!(filestem(Path::new("/data/infile1.fasta")), "infile1");
        assert_eq!(filestem(Path::new("twodots.v2.faa")), "twodots.v2");
        assert_eq!(filestem(Path::new("noext")), "noext");
    }
}
