use anyhow::Context;
use clap::Parser;
use generator::profile::{build_predictions, GeneratorConfig};
use log::info;
use roccore::prelude::CurveKind;
use std::fs;
use std::path::PathBuf;
use workflow::config::SweepSettings;
use workflow::predictions::{load_predictions, save_predictions};
use workflow::runner::Runner;

mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Threshold-sweep ROC / precision-recall driver")]
struct Args {
    /// JSON array of {truth, score, fold?} rows
    #[arg(long, conflicts_with = "synthetic")]
    predictions: Option<PathBuf>,
    /// Generate synthetic predictions instead of reading a file
    #[arg(long, default_value_t = false)]
    synthetic: bool,
    #[arg(long, default_value_t = 200)]
    records: usize,
    #[arg(long, default_value_t = 1)]
    folds: usize,
    #[arg(long, default_value_t = 3.0)]
    separation: f64,
    /// Round synthetic scores to this many decimals
    #[arg(long)]
    decimals: Option<u32>,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Write the synthetic predictions to this file as well
    #[arg(long, requires = "synthetic")]
    emit_predictions: Option<PathBuf>,
    /// Load sweep settings from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value = "pos")]
    positive: String,
    #[arg(long)]
    negative: Option<String>,
    #[arg(long, default_value = "roc")]
    curve: CurveKind,
    #[arg(long, default_value_t = 101)]
    points: usize,
    /// Use the observed scores as the threshold grid
    #[arg(long, default_value_t = false)]
    observed_grid: bool,
    #[arg(long, default_value_t = false)]
    parallel: bool,
    /// Write the JSON report here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = if let Some(path) = args.config {
        SweepSettings::load(path)?
    } else {
        SweepSettings::from_args(
            args.positive,
            args.negative,
            args.curve,
            args.points,
            args.observed_grid,
            args.parallel,
        )
    };

    let rows = if let Some(path) = args.predictions {
        load_predictions(path)?
    } else if args.synthetic {
        let generator = GeneratorConfig {
            records: args.records,
            folds: args.folds,
            separation: args.separation,
            decimals: args.decimals,
            seed: args.seed,
            positive: settings.positive.clone(),
            negative: settings
                .negative
                .clone()
                .unwrap_or_else(|| GeneratorConfig::default().negative),
            ..Default::default()
        };
        let rows = build_predictions(&generator)?;
        if let Some(path) = args.emit_predictions {
            save_predictions(&path, &rows)?;
            info!("wrote {} synthetic predictions to {}", rows.len(), path.display());
        }
        rows
    } else {
        anyhow::bail!("either --predictions or --synthetic is required");
    };

    let runner = Runner::new(settings);
    let report = runner.execute(rows)?;
    let json = report.to_json_pretty().context("rendering report")?;

    match args.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, json)
                .with_context(|| format!("writing report {}", path.display()))?;
            println!(
                "Sweep -> folds {}, failed {}, degenerate {}, mean area {}",
                report.summary.folds,
                report.summary.failed,
                report.summary.degenerate,
                report
                    .summary
                    .mean_auc
                    .map(|auc| format!("{:.4}", auc))
                    .unwrap_or_else(|| "n/a".into())
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}
