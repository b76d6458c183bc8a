// ==========================================
// Production Target Allocation - Export Layer
// ==========================================
// Responsibility: write analysis results out for the
// planning team: a metrics table CSV, one SKU allocation
// CSV per brand and period, and a complete JSON package
// bundling metrics with the narrative report.
// ==========================================

use crate::analysis::narrative::NarrativeReport;
use crate::analysis::summary::PlanningSummary;
use crate::domain::allocation::Prediction;
use crate::domain::metrics::ProductionMetric;
use crate::domain::types::Period;
use crate::engine::pipeline::AnalysisOutcome;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Export layer error type
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("export write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;

pub struct Exporter {
    /// Finite cap written instead of an infinite growth
    /// ratio when a SKU has no historical tonnage.
    growth_ratio_saturation: f64,
}

impl Exporter {
    pub fn new(growth_ratio_saturation: f64) -> Self {
        Self {
            growth_ratio_saturation,
        }
    }

    // ==========================================
    // Metrics table
    // ==========================================

    /// Write the per-brand metrics table as CSV.
    pub fn write_metrics_csv<W: Write>(
        &self,
        writer: W,
        metrics: &[ProductionMetric],
    ) -> ExportResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "brand",
            "may_target_t",
            "w1_target_t",
            "historical_t",
            "sku_count",
            "growth_ratio",
            "capacity_utilization_pct",
            "setup_complexity",
            "risk_level",
            "risk_score",
            "labor_hours",
            "machine_hours",
            "operators_needed",
            "lead_time_days",
            "material_cost",
            "labor_cost",
            "overhead_cost",
            "total_cost",
            "cost_per_ton",
            "market_share_pct",
        ])?;

        for m in metrics {
            csv_writer.write_record([
                m.brand.clone(),
                format!("{:.1}", m.may_target),
                format!("{:.1}", m.w1_target),
                format!("{:.1}", m.historical_tonnage),
                m.sku_count.to_string(),
                format!("{:.2}", m.growth_ratio),
                format!("{:.1}", m.capacity_utilization),
                format!("{:.1}", m.setup_complexity),
                m.risk_level.to_string(),
                format!("{:.1}", m.risk_score),
                format!("{:.0}", m.labor_hours),
                format!("{:.0}", m.machine_hours),
                format!("{:.1}", m.operators_needed),
                format!("{:.1}", m.lead_time_days),
                format!("{:.0}", m.cost.material),
                format!("{:.0}", m.cost.labor),
                format!("{:.0}", m.cost.overhead),
                format!("{:.0}", m.cost.total),
                format!("{:.0}", m.cost_per_ton),
                format!("{:.1}", m.market_share_pct),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    // ==========================================
    // SKU allocation table
    // ==========================================

    /// Write one brand's SKU allocation for one period.
    pub fn write_allocation_csv<W: Write>(
        &self,
        writer: W,
        prediction: &Prediction,
        period: Period,
    ) -> ExportResult<()> {
        let distribution = match period {
            Period::May => &prediction.may_distribution,
            Period::WeekOne => &prediction.w1_distribution,
        };

        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "sku_code",
            "product_name",
            "predicted_t",
            "historical_t",
            "growth_ratio",
            "share_pct",
        ])?;

        for (sku_code, allocation) in distribution {
            let growth = if allocation.historical_tonnage > 0.0 {
                (allocation.predicted_tonnage / allocation.historical_tonnage)
                    .min(self.growth_ratio_saturation)
            } else {
                self.growth_ratio_saturation
            };

            csv_writer.write_record([
                sku_code.clone(),
                allocation.sku_name.clone(),
                format!("{:.2}", allocation.predicted_tonnage),
                format!("{:.2}", allocation.historical_tonnage),
                format!("{:.2}", growth),
                format!("{:.2}", allocation.percentage * 100.0),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    // ==========================================
    // Complete JSON package
    // ==========================================

    /// Write the complete analysis package as JSON.
    pub fn write_complete_package<W: Write>(
        &self,
        writer: W,
        outcome: &AnalysisOutcome,
        summary: &PlanningSummary,
        narrative: &NarrativeReport,
    ) -> ExportResult<()> {
        #[derive(Serialize)]
        struct CompletePackage<'a> {
            run_id: &'a str,
            timestamp: String,
            summary: &'a PlanningSummary,
            production_metrics: &'a [ProductionMetric],
            narrative: &'a NarrativeReport,
            warnings: &'a [crate::engine::pipeline::AnalysisWarning],
        }

        let package = CompletePackage {
            run_id: &outcome.run_id,
            timestamp: outcome.generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            summary,
            production_metrics: &outcome.metrics,
            narrative,
            warnings: &outcome.warnings,
        };

        serde_json::to_writer_pretty(writer, &package)?;
        Ok(())
    }

    // ==========================================
    // Directory export
    // ==========================================

    /// Write all artifacts of a run into a directory and
    /// return the created paths.
    pub fn export_run(
        &self,
        dir: &Path,
        outcome: &AnalysisOutcome,
        summary: &PlanningSummary,
        narrative: &NarrativeReport,
    ) -> ExportResult<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)?;
        let stamp = outcome.generated_at.format("%Y%m%d_%H%M%S");
        let mut written = Vec::new();

        let metrics_path = dir.join(format!("production_metrics_{}.csv", stamp));
        self.write_metrics_csv(std::fs::File::create(&metrics_path)?, &outcome.metrics)?;
        written.push(metrics_path);

        for (brand, prediction) in &outcome.predictions {
            for period in [Period::May, Period::WeekOne] {
                let path = dir.join(format!(
                    "allocation_{}_{}_{}.csv",
                    brand.to_lowercase(),
                    period.to_string().to_lowercase(),
                    stamp
                ));
                self.write_allocation_csv(std::fs::File::create(&path)?, prediction, period)?;
                written.push(path);
            }
        }

        let package_path = dir.join(format!("complete_analysis_{}.json", stamp));
        self.write_complete_package(
            std::fs::File::create(&package_path)?,
            outcome,
            summary,
            narrative,
        )?;
        written.push(package_path);

        info!(files = written.len(), dir = %dir.display(), "export complete");
        Ok(written)
    }
}
