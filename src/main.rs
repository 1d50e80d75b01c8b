use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use allvsall::config::{default_job_prefix, RunConfig, SchedulerBackend};
use allvsall::pipeline::{Pipeline, RunSummary};
use allvsall::shutdown::install_shutdown_handler;

#[derive(Parser, Debug)]
#[command(name = "allvsall")]
#[command(version)]
#[command(about = "Run all-vs-all pairwise comparisons over a directory of datasets")]
struct Args {
    /// Directory containing input dataset files
    indir: PathBuf,

    /// Directory for indexes and comparison results
    outdir: PathBuf,

    /// Path to the index-construction executable
    #[arg(long, default_value = "makeblastdb")]
    indexer_exe: String,

    /// Path to the comparison executable
    #[arg(long, default_value = "blastp")]
    comparator_exe: String,

    /// Prefix for job names in this run
    #[arg(long)]
    job_prefix: Option<String>,

    /// Scheduler backend
    #[arg(long, short = 's', default_value = "local")]
    scheduler: Backend,

    /// Worker pool size (default: one per available CPU)
    #[arg(long, short = 'w')]
    workers: Option<usize>,

    /// Overwrite output in an already-populated output directory
    #[arg(long, short = 'f')]
    force: bool,

    /// Output format for the run summary
    #[arg(long, short = 'o', default_value = "table")]
    output: OutputFormat,

    /// Give verbose output
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Backend {
    Local,
    Cluster,
}

impl From<Backend> for SchedulerBackend {
    fn from(b: Backend) -> Self {
        match b {
            Backend::Local => SchedulerBackend::Local,
            Backend::Cluster => SchedulerBackend::Cluster,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_filter = if args.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = RunConfig::new(args.indir, args.outdir);
    config.indexer_exe = args.indexer_exe;
    config.comparator_exe = args.comparator_exe;
    config.job_prefix = args.job_prefix.unwrap_or_else(default_job_prefix);
    config.backend = args.scheduler.into();
    config.workers = args.workers;
    config.force = args.force;

    tracing::info!(
        indir = %config.indir.display(),
        outdir = %config.outdir.display(),
        backend = %config.backend,
        workers = config.worker_count(),
        job_prefix = %config.job_prefix,
        "Starting allvsall"
    );

    let shutdown = install_shutdown_handler();
    let pipeline = Pipeline::new(config).with_shutdown(shutdown);
    let summary = pipeline.run().await?;

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Table => print_summary_table(&summary),
    }

    Ok(())
}

fn print_summary_table(summary: &RunSummary) {
    println!("{:<22} {}", "Datasets:", summary.datasets);
    println!("{:<22} {}", "Index jobs:", summary.index_jobs);
    println!("{:<22} {}", "Comparison jobs:", summary.comparison_jobs);
    println!(
        "{:<22} {}/{}",
        "Batches dispatched:", summary.batches_dispatched, summary.batches
    );
    println!("{:<22} {}", "Commands run:", summary.commands_run);
    if summary.interrupted {
        println!("Run interrupted by shutdown request before completion");
    }
}
