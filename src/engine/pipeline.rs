// ==========================================
// Production Target Allocation - Analysis Pipeline
// ==========================================
// Responsibility: run the full analysis in order:
// ingest -> classify -> aggregate -> distribute -> metrics.
// One pipeline run is pure and stateless: inputs are
// read-only snapshots, the outcome is freshly built, and
// per-brand problems are collected as warnings next to the
// valid output instead of failing the run.
// ==========================================

use crate::config::PlanningConfig;
use crate::domain::allocation::Prediction;
use crate::domain::metrics::ProductionMetric;
use crate::domain::shipment::IngestStats;
use crate::domain::target::BrandTarget;
use crate::engine::aggregator::{HistoricalAggregator, HistoricalMix, TargetAggregator};
use crate::engine::distribution::DistributionEngine;
use crate::engine::metrics::{MetricsEngine, MetricsError};
use crate::importer::{
    HistoricalImporter, ImportError, RawGrid, TargetImporter, UniversalFileParser,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

/// Analysis-level error type.
///
/// Structural input problems abort the run; everything
/// recoverable is a warning on the outcome instead.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("no brand targets produced: both sheets parsed but no manufacturing category mapped to a brand")]
    NoBrandsProduced,
}

/// Non-fatal, per-brand conditions collected during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnalysisWarning {
    /// Brand holds a target but no historical SKU mix, so no
    /// SKU-level breakdown exists for it.
    NoHistoricalBasis { brand: String },
    /// Metrics computation failed for one brand.
    MetricsFailed { brand: String, reason: String },
    /// Target sheet columns were assumed by structural
    /// position because the header tokens were not found.
    TargetColumnFallback,
}

/// Complete result of one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    /// Identifier for this run, for log correlation.
    pub run_id: String,
    pub generated_at: DateTime<Utc>,

    pub historical_stats: IngestStats,
    pub historical_mix: HistoricalMix,
    pub brand_targets: BTreeMap<String, BrandTarget>,
    pub predictions: BTreeMap<String, Prediction>,
    pub metrics: Vec<ProductionMetric>,
    pub warnings: Vec<AnalysisWarning>,
}

impl AnalysisOutcome {
    /// Brands flagged as having a target but no history.
    pub fn brands_without_basis(&self) -> Vec<&str> {
        self.warnings
            .iter()
            .filter_map(|w| match w {
                AnalysisWarning::NoHistoricalBasis { brand } => Some(brand.as_str()),
                _ => None,
            })
            .collect()
    }
}

// ==========================================
// AnalysisPipeline
// ==========================================
pub struct AnalysisPipeline {
    config: PlanningConfig,
    historical_importer: HistoricalImporter,
    target_importer: TargetImporter,
    historical_aggregator: HistoricalAggregator,
    target_aggregator: TargetAggregator,
    distribution: DistributionEngine,
    metrics: MetricsEngine,
}

impl AnalysisPipeline {
    pub fn new(config: PlanningConfig) -> Self {
        Self {
            historical_importer: HistoricalImporter::new(),
            target_importer: TargetImporter::new(
                &config.month_header_token,
                &config.week_header_token,
            ),
            historical_aggregator: HistoricalAggregator::new(),
            target_aggregator: TargetAggregator::new(),
            distribution: DistributionEngine::new(config.sku_share_floor),
            metrics: MetricsEngine::new(config.clone()),
            config,
        }
    }

    pub fn config(&self) -> &PlanningConfig {
        &self.config
    }

    /// Run the analysis over two raw sheets.
    pub fn run(
        &self,
        historical_grid: &RawGrid,
        target_grid: &RawGrid,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        let run_id = Uuid::new_v4().to_string();
        info!(run_id = %run_id, "analysis run started");

        let mut warnings = Vec::new();

        // Step 1: ingest both sheets
        let historical = self.historical_importer.import(historical_grid)?;
        let targets = self.target_importer.import(target_grid)?;
        if targets.column_fallback {
            warnings.push(AnalysisWarning::TargetColumnFallback);
        }

        // Step 2: historical rollup
        let mix = self.historical_aggregator.aggregate(&historical.records);

        // Step 3: classify + fold targets per brand
        let brand_targets = self.target_aggregator.aggregate(&targets.table, &mix);
        if brand_targets.is_empty() {
            return Err(AnalysisError::NoBrandsProduced);
        }

        // Step 4: spread targets over SKUs
        let distribution = self.distribution.distribute(&brand_targets, &mix);
        warnings.extend(
            distribution
                .skipped_brands
                .into_iter()
                .map(|brand| AnalysisWarning::NoHistoricalBasis { brand }),
        );

        // Step 5: feasibility metrics, per-brand isolated
        let (metrics, failures) = self
            .metrics
            .compute_all(&brand_targets, &distribution.predictions);
        warnings.extend(failures.into_iter().map(|err| match err {
            MetricsError::InvalidInput { ref brand, .. } => AnalysisWarning::MetricsFailed {
                brand: brand.clone(),
                reason: err.to_string(),
            },
        }));

        info!(
            run_id = %run_id,
            brands = brand_targets.len(),
            predicted = distribution.predictions.len(),
            warnings = warnings.len(),
            "analysis run finished"
        );

        Ok(AnalysisOutcome {
            run_id,
            generated_at: Utc::now(),
            historical_stats: historical.stats,
            historical_mix: mix,
            brand_targets,
            predictions: distribution.predictions,
            metrics,
            warnings,
        })
    }

    /// Convenience wrapper: parse both files, then run.
    pub fn run_files<P: AsRef<Path>>(
        &self,
        historical_path: P,
        target_path: P,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        let parser = UniversalFileParser;
        let historical_grid = parser.parse(historical_path)?;
        let target_grid = parser.parse(target_path)?;
        self.run(&historical_grid, &target_grid)
    }
}

impl Default for AnalysisPipeline {
    fn default() -> Self {
        Self::new(PlanningConfig::default())
    }
}
