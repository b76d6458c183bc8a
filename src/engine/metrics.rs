// ==========================================
// Production Target Allocation - Metrics Engine
// ==========================================
// Responsibility: derive the per-brand feasibility snapshot
// from targets, history and SKU breadth. All formulas are
// pure and read their constants from PlanningConfig.
// One brand failing never blocks the others.
// ==========================================

use crate::config::PlanningConfig;
use crate::domain::allocation::Prediction;
use crate::domain::metrics::{CostBreakdown, ProductionMetric};
use crate::domain::target::BrandTarget;
use crate::domain::types::RiskLevel;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::warn;

/// Per-brand metrics failure; collected, never propagated
/// across brands.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricsError {
    #[error("metrics for brand {brand} failed: {field} is not a finite non-negative number ({value})")]
    InvalidInput {
        brand: String,
        field: &'static str,
        value: f64,
    },
}

pub struct MetricsEngine {
    config: PlanningConfig,
}

impl MetricsEngine {
    pub fn new(config: PlanningConfig) -> Self {
        Self { config }
    }

    /// Compute metrics for every brand, isolating failures:
    /// a bad brand is reported and skipped while the rest
    /// compute normally.
    pub fn compute_all(
        &self,
        brand_targets: &BTreeMap<String, BrandTarget>,
        predictions: &BTreeMap<String, Prediction>,
    ) -> (Vec<ProductionMetric>, Vec<MetricsError>) {
        let total_may_target: f64 = brand_targets.values().map(|t| t.may_target).sum();

        let mut metrics = Vec::new();
        let mut failures = Vec::new();

        for (brand, target) in brand_targets {
            let sku_count = predictions
                .get(brand)
                .map(Prediction::sku_count)
                .unwrap_or(0);

            match self.compute_single(target, sku_count, total_may_target) {
                Ok(metric) => metrics.push(metric),
                Err(err) => {
                    warn!(brand = %brand, error = %err, "metrics computation skipped for brand");
                    failures.push(err);
                }
            }
        }

        (metrics, failures)
    }

    /// Metrics for a single brand.
    pub fn compute_single(
        &self,
        target: &BrandTarget,
        sku_count: usize,
        total_may_target: f64,
    ) -> Result<ProductionMetric, MetricsError> {
        self.check_input(&target.brand, "may_target", target.may_target)?;
        self.check_input(&target.brand, "w1_target", target.w1_target)?;
        self.check_input(&target.brand, "historical_tonnage", target.historical_tonnage)?;

        let cfg = &self.config;
        let may_target = target.may_target;

        let growth_ratio = if target.historical_tonnage > 0.0 {
            may_target / target.historical_tonnage
        } else {
            cfg.growth_sentinel
        };

        let (risk_level, risk_score) = self.assess_risk(growth_ratio);

        let capacity_utilization = if may_target > 0.0 {
            (may_target / cfg.monthly_capacity_t * 100.0).min(100.0)
        } else {
            0.0
        };

        let setup_complexity =
            (2.0 + sku_count as f64 / 10.0 + growth_ratio / 2.0).clamp(0.0, 10.0);

        let labor_hours = may_target * cfg.labor_hours_per_ton;
        let machine_hours = may_target * cfg.machine_hours_per_ton;
        let operators_needed =
            (labor_hours / cfg.operator_hours_per_month).max(cfg.min_operators);

        let complexity_factor = setup_complexity / 10.0;
        let volume_factor = (may_target / 500.0).min(2.0);
        let lead_time_days = cfg.base_lead_time_days * (1.0 + complexity_factor + volume_factor);

        let material = may_target * cfg.material_cost_per_ton;
        let labor = labor_hours * cfg.labor_cost_per_hour;
        let overhead = may_target
            * (cfg.overhead_base_per_ton + cfg.overhead_complexity_per_ton * setup_complexity);
        let total = material + labor + overhead;
        let cost_per_ton = if may_target > 0.0 { total / may_target } else { 0.0 };

        let market_share_pct = if total_may_target > 0.0 {
            may_target / total_may_target * 100.0
        } else {
            0.0
        };

        Ok(ProductionMetric {
            brand: target.brand.clone(),
            may_target,
            w1_target: target.w1_target,
            historical_tonnage: target.historical_tonnage,
            sku_count,
            growth_ratio,
            risk_level,
            risk_score,
            capacity_utilization,
            setup_complexity,
            labor_hours,
            machine_hours,
            operators_needed,
            lead_time_days,
            cost: CostBreakdown {
                material,
                labor,
                overhead,
                total,
            },
            cost_per_ton,
            market_share_pct,
        })
    }

    /// Threshold scheme over the growth ratio, with a 1-10
    /// companion score inside each band.
    fn assess_risk(&self, growth_ratio: f64) -> (RiskLevel, f64) {
        let cfg = &self.config;
        if growth_ratio > cfg.high_risk_growth {
            let score = (8.0 + (growth_ratio - cfg.high_risk_growth)).min(10.0);
            (RiskLevel::High, score)
        } else if growth_ratio > cfg.medium_risk_growth {
            let score = 4.0 + (growth_ratio - cfg.medium_risk_growth) * 2.0;
            (RiskLevel::Medium, score)
        } else {
            (RiskLevel::Low, growth_ratio.max(1.0))
        }
    }

    fn check_input(
        &self,
        brand: &str,
        field: &'static str,
        value: f64,
    ) -> Result<(), MetricsError> {
        if !value.is_finite() || value < 0.0 {
            return Err(MetricsError::InvalidInput {
                brand: brand.to_string(),
                field,
                value,
            });
        }
        Ok(())
    }
}
