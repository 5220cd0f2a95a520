use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;

use hr_biasqc::input::{InputError, load_input};
use hr_biasqc::logging::init_logging;
use hr_biasqc::model::thresholds::{BiasThresholds, TTestKind, ThresholdError};
use hr_biasqc::pipeline::{PipelineConfig, PipelineError, run_pipeline, write_pipeline_reports};

/// Gender bias detection and reweighting correction for evaluation scores.
#[derive(Debug, Parser)]
#[command(name = "hr-biasqc", version, about)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Analyze, correct and rank one dataset
    Run(RunArgs),
}

#[derive(Debug, Clone, Args)]
struct RunArgs {
    /// Dataset JSON (optionally .gz)
    #[arg(long)]
    input: PathBuf,

    /// Output directory
    #[arg(long)]
    out: PathBuf,

    /// Evaluation to analyze and correct (default: first in sorted order)
    #[arg(long)]
    criterion: Option<String>,

    /// Minimum relative mean gap flagged as bias
    #[arg(long, default_value_t = 0.05)]
    threshold: f64,

    /// Significance level of the t-test
    #[arg(long, default_value_t = 0.05)]
    alpha: f64,

    /// Use Welch's unequal-variance t-test instead of Student's
    #[arg(long)]
    welch: bool,

    /// Report bias without adjusting scores
    #[arg(long)]
    analysis_only: bool,

    /// |z| above which a score counts as an outlier
    #[arg(long, default_value_t = 3.0)]
    outlier_threshold: f64,

    /// Withhold outliers from bias analysis
    #[arg(long)]
    drop_outliers: bool,

    /// Number of ranked people shown in reports
    #[arg(long, default_value_t = 10)]
    top_n: usize,
}

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ThresholdError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), RunError> {
    match cli.command {
        Command::Run(args) => run_command(&args),
    }
}

fn run_command(args: &RunArgs) -> Result<(), RunError> {
    let config = build_config(args)?;
    let bundle = load_input(&args.input)?;
    let output = run_pipeline(&bundle, &config)?;
    write_pipeline_reports(&bundle, &config, &output, &args.out)?;

    let correction = &output.bias.correction;
    info!(
        criterion = %output.criterion,
        bias_detected = correction.pre.bias_detected,
        corrected = correction.was_applied(),
        out = %args.out.display(),
        "done"
    );
    Ok(())
}

fn build_config(args: &RunArgs) -> Result<PipelineConfig, RunError> {
    let mut thresholds = if args.welch {
        BiasThresholds::welch_v1()
    } else {
        BiasThresholds::default_v1()
    };
    thresholds.threshold = args.threshold;
    thresholds.alpha = args.alpha;
    thresholds.outlier_z = args.outlier_threshold;
    thresholds.top_n = args.top_n;
    thresholds.validate()?;

    if thresholds.test == TTestKind::Welch {
        info!("Welch t-test selected");
    }

    Ok(PipelineConfig {
        thresholds,
        criterion: args.criterion.clone(),
        analysis_only: args.analysis_only,
        drop_outliers: args.drop_outliers,
    })
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
