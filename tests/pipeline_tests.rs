use std::path::Path;

use allvsall::config::{RunConfig, SchedulerBackend};
use allvsall::error::PipelineError;
use allvsall::pipeline::Pipeline;

/// Write `names` as small dataset files under `dir`.
fn write_datasets(dir: &Path, names: &[&str]) {
    for name in names {
        std::fs::write(dir.join(name), b">seq1\nMKT\n").unwrap();
    }
}

/// Config whose indexer and comparator are stand-in executables that
/// ignore their arguments.
fn stub_config(indir: &Path, outdir: &Path, exe: &str) -> RunConfig {
    let mut config = RunConfig::new(indir.to_path_buf(), outdir.to_path_buf());
    config.indexer_exe = exe.to_string();
    config.comparator_exe = exe.to_string();
    config.job_prefix = "TEST".to_string();
    config
}

#[tokio::test]
async fn test_full_run_over_three_datasets() {
    let dir = tempfile::tempdir().unwrap();
    write_datasets(dir.path(), &["a.fasta", "b.fasta", "c.fasta"]);
    let outdir = dir.path().join("out");

    let config = stub_config(dir.path(), &outdir, "true");
    let summary = Pipeline::new(config).run().await.unwrap();

    assert_eq!(summary.datasets, 3);
    assert_eq!(summary.index_jobs, 3);
    assert_eq!(summary.comparison_jobs, 6);
    assert_eq!(summary.batches, 2);
    assert_eq!(summary.batches_dispatched, 2);
    assert_eq!(summary.commands_run, 9);
    assert!(!summary.interrupted);
    assert!(outdir.is_dir());
}

#[tokio::test]
async fn test_failing_indexer_stops_before_comparisons() {
    let dir = tempfile::tempdir().unwrap();
    write_datasets(dir.path(), &["a.fasta", "b.fasta"]);
    let outdir = dir.path().join("out");

    let config = stub_config(dir.path(), &outdir, "false");
    match Pipeline::new(config).run().await {
        Err(PipelineError::ExecutionFailed { failed, total, failures }) => {
            // Only the index batch ran; the comparison batch was never
            // dispatched.
            assert_eq!(failed, 2);
            assert_eq!(total, 2);
            assert_eq!(failures.len(), 2);
        }
        other => panic!("expected ExecutionFailed, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_failing_comparator_reports_all_comparison_failures() {
    let dir = tempfile::tempdir().unwrap();
    write_datasets(dir.path(), &["a.fasta", "b.fasta"]);
    let outdir = dir.path().join("out");

    let mut config = stub_config(dir.path(), &outdir, "true");
    config.comparator_exe = "false".to_string();
    match Pipeline::new(config).run().await {
        Err(PipelineError::ExecutionFailed { failed, total, .. }) => {
            assert_eq!(failed, 2);
            assert_eq!(total, 4); // both index jobs plus both comparisons ran
        }
        other => panic!("expected ExecutionFailed, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_cluster_backend_fails_before_any_side_effects() {
    let dir = tempfile::tempdir().unwrap();
    write_datasets(dir.path(), &["a.fasta"]);
    let outdir = dir.path().join("out");

    let mut config = stub_config(dir.path(), &outdir, "true");
    config.backend = SchedulerBackend::Cluster;
    match Pipeline::new(config).run().await {
        Err(PipelineError::UnsupportedBackend(name)) => assert_eq!(name, "cluster"),
        other => panic!("expected UnsupportedBackend, got {:?}", other.map(|_| ())),
    }
    assert!(!outdir.exists(), "rejected backend must not touch the filesystem");
}

#[tokio::test]
async fn test_invalid_input_directory() {
    let dir = tempfile::tempdir().unwrap();
    let config = stub_config(&dir.path().join("missing"), &dir.path().join("out"), "true");
    match Pipeline::new(config).run().await {
        Err(PipelineError::InvalidInputDir(_)) => {}
        other => panic!("expected InvalidInputDir, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_populated_outdir_requires_force() {
    let dir = tempfile::tempdir().unwrap();
    write_datasets(dir.path(), &["a.fasta", "b.fasta"]);
    let outdir = dir.path().join("out");
    std::fs::create_dir(&outdir).unwrap();
    std::fs::write(outdir.join("stale.out"), b"x").unwrap();

    let config = stub_config(dir.path(), &outdir, "true");
    match Pipeline::new(config).run().await {
        Err(PipelineError::OutputDirPopulated(_)) => {}
        other => panic!("expected OutputDirPopulated, got {:?}", other.map(|_| ())),
    }

    let mut config = stub_config(dir.path(), &outdir, "true");
    config.force = true;
    let summary = Pipeline::new(config).run().await.unwrap();
    assert_eq!(summary.commands_run, 4);
}
