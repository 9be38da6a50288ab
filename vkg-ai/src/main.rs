//! vkg-ai - VakyaGuard audio analysis CLI
//!
//! Runs the intake pipeline over audio files and, when detector confidences
//! are supplied, fuses them into a verdict. Prints one JSON document per file.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tokio::task::JoinSet;
use tracing::{debug, info};

use vkg_ai::fusion::reference_signals;
use vkg_ai::{fuse, AnalysisReport, IntakePipeline, SignalSet, ValidationOutcome};
use vkg_common::config::ConfigResolver;
use vkg_common::logging::init_logging;

/// Command-line arguments for vkg-ai
#[derive(Parser, Debug)]
#[command(name = "vkg-ai")]
#[command(about = "VakyaGuard audio intake and decision fusion")]
#[command(version)]
struct Args {
    /// Bootstrap config file (falls back to VKG_CONFIG, then the platform config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log filter directive, overrides the config file
    #[arg(long, global = true, env = "VKG_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate audio files and optionally fuse detector confidences
    Analyze(AnalyzeArgs),
}

#[derive(clap::Args, Debug)]
struct AnalyzeArgs {
    /// Audio files to analyse
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Files hold base64 text instead of raw container bytes
    #[arg(long)]
    base64: bool,

    /// Spoofing classifier confidence
    #[arg(long)]
    aasist: Option<f64>,

    /// Harmonic/formant indicator confidence
    #[arg(long)]
    hfi: Option<f64>,

    /// Temporal-naturalness indicator confidence
    #[arg(long)]
    tns: Option<f64>,
}

impl AnalyzeArgs {
    /// All three confidences, none, or an error for a partial set
    fn signals(&self) -> Result<Option<SignalSet>> {
        match (self.aasist, self.hfi, self.tns) {
            (Some(aasist), Some(hfi), Some(tns)) => {
                let signals = reference_signals(aasist, hfi, tns)
                    .context("Invalid detector confidence")?;
                Ok(Some(signals))
            }
            (None, None, None) => Ok(None),
            _ => bail!("--aasist, --hfi and --tns must be given together"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ConfigResolver::new(args.config.clone())
        .load()
        .context("Failed to load configuration")?;
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    init_logging(&config.logging).context("Failed to initialize logging")?;

    info!("Starting vkg-ai v{}", env!("CARGO_PKG_VERSION"));

    match args.command {
        Command::Analyze(analyze) => run_analyze(analyze).await,
    }
}

async fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let signals = args.signals()?;
    let pipeline = Arc::new(IntakePipeline::new());

    let mut tasks = JoinSet::new();
    for (index, path) in args.files.iter().cloned().enumerate() {
        let bytes = tokio::fs::read(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        debug!("Read {} bytes from {}", bytes.len(), path.display());

        let pipeline = Arc::clone(&pipeline);
        let base64 = args.base64;
        tasks.spawn_blocking(move || {
            let outcome = if base64 {
                pipeline.process_text(&bytes)
            } else {
                pipeline.process_bytes(bytes)
            };
            (index, path, outcome)
        });
    }

    let mut results = Vec::with_capacity(args.files.len());
    while let Some(joined) = tasks.join_next().await {
        results.push(joined.context("Intake worker panicked")?);
    }
    results.sort_by_key(|(index, _, _)| *index);

    for (_, path, outcome) in results {
        let document = render(&path, &outcome, signals.as_ref());
        println!("{}", serde_json::to_string(&document)?);
    }

    Ok(())
}

/// Fuse only audio that passed intake; rejected audio reports the reason
fn render(path: &std::path::Path, outcome: &ValidationOutcome, signals: Option<&SignalSet>) -> Value {
    let result = match (outcome.is_valid(), signals) {
        (true, Some(signals)) => {
            let report = AnalysisReport::new(signals, &fuse(signals)).with_audio(outcome);
            json!(report)
        }
        _ => json!(outcome.summary()),
    };
    json!({
        "file": path.display().to_string(),
        "result": result,
    })
}
