// ==========================================
// Production Target Allocation Analyzer - CLI Entry
// ==========================================
// Usage:
//   pipe-production-planner <historical.{csv,xlsx}> <targets.{csv,xlsx}>
//       [--out <dir>] [--config <planning.json>]
// ==========================================

use anyhow::{bail, Context, Result};
use pipe_production_planner::analysis::{resolve_narrative, PlanningSummary};
use pipe_production_planner::config::PlanningConfig;
use pipe_production_planner::engine::AnalysisPipeline;
use pipe_production_planner::export::Exporter;
use pipe_production_planner::logging;
use std::path::PathBuf;

struct CliArgs {
    historical: PathBuf,
    targets: PathBuf,
    out_dir: Option<PathBuf>,
    config: Option<PathBuf>,
}

fn parse_args() -> Result<CliArgs> {
    let mut positional = Vec::new();
    let mut out_dir = None;
    let mut config = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" => {
                out_dir = Some(PathBuf::from(
                    args.next().context("--out requires a directory")?,
                ));
            }
            "--config" => {
                config = Some(PathBuf::from(
                    args.next().context("--config requires a file")?,
                ));
            }
            _ => positional.push(PathBuf::from(arg)),
        }
    }

    let mut positional = positional.into_iter();
    match (positional.next(), positional.next(), positional.next()) {
        (Some(historical), Some(targets), None) => Ok(CliArgs {
            historical,
            targets,
            out_dir,
            config,
        }),
        _ => bail!(
            "usage: pipe-production-planner <historical.{{csv,xlsx}}> <targets.{{csv,xlsx}}> \
             [--out <dir>] [--config <planning.json>]"
        ),
    }
}

fn main() -> Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", pipe_production_planner::APP_NAME);
    tracing::info!("version: {}", pipe_production_planner::VERSION);
    tracing::info!("==================================================");

    let cli = parse_args()?;

    let config = match &cli.config {
        Some(path) => PlanningConfig::from_json_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => PlanningConfig::default(),
    };

    let pipeline = AnalysisPipeline::new(config.clone());
    let outcome = pipeline
        .run_files(&cli.historical, &cli.targets)
        .context("analysis failed")?;

    tracing::info!(
        brands = outcome.brand_targets.len(),
        predicted = outcome.predictions.len(),
        rows_kept = outcome.historical_stats.kept,
        rows_dropped = outcome.historical_stats.dropped(),
        "analysis complete"
    );

    for warning in &outcome.warnings {
        tracing::warn!(?warning, "analysis warning");
    }

    for metric in &outcome.metrics {
        tracing::info!(
            brand = %metric.brand,
            may_target = metric.may_target,
            growth = format!("{:.2}", metric.growth_ratio),
            risk = %metric.risk_level,
            skus = metric.sku_count,
            "brand metrics"
        );
    }

    // No external narrative service is wired into the CLI;
    // the deterministic report always stands in.
    let summary = PlanningSummary::from_metrics(&outcome.metrics);
    let narrative = resolve_narrative(None, &summary);

    tracing::info!(
        feasibility = %narrative.report.executive_summary.production_feasibility,
        total_target = summary.total_may_target,
        high_risk = summary.high_risk_brands.len(),
        "portfolio assessment"
    );

    if let Some(dir) = &cli.out_dir {
        let exporter = Exporter::new(config.growth_ratio_saturation);
        let written = exporter.export_run(dir, &outcome, &summary, &narrative.report)?;
        for path in written {
            tracing::info!(file = %path.display(), "exported");
        }
    }

    Ok(())
}
