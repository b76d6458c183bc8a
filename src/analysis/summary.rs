// ==========================================
// Production Target Allocation - Planning Summary
// ==========================================
// Responsibility: condense the per-brand metrics into the
// JSON-serializable summary consumed by the narrative
// boundary and the export layer.
// ==========================================

use crate::domain::metrics::ProductionMetric;
use crate::domain::types::RiskLevel;
use serde::{Deserialize, Serialize};

// Brands included in the detail section of the summary.
const BRAND_DETAIL_LIMIT: usize = 5;

/// One brand's slice of the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandSummary {
    pub brand: String,
    pub may_target: f64,
    pub w1_target: f64,
    pub historical_tonnage: f64,
    pub growth_ratio: f64,
    pub sku_count: usize,
    pub risk_level: RiskLevel,
    pub total_cost: f64,
}

/// Portfolio-level summary of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningSummary {
    pub total_may_target: f64,
    pub total_cost: f64,
    pub brand_count: usize,
    pub high_risk_brands: Vec<String>,
    pub avg_growth_ratio: f64,
    pub avg_setup_complexity: f64,
    pub avg_capacity_utilization: f64,
    pub avg_lead_time_days: f64,
    /// Largest brands first, capped for prompt size.
    pub brand_detail: Vec<BrandSummary>,
}

impl PlanningSummary {
    /// Build the summary from computed metrics.
    pub fn from_metrics(metrics: &[ProductionMetric]) -> Self {
        let count = metrics.len();
        let avg = |extract: fn(&ProductionMetric) -> f64| -> f64 {
            if count == 0 {
                0.0
            } else {
                metrics.iter().map(extract).sum::<f64>() / count as f64
            }
        };

        let high_risk_brands = metrics
            .iter()
            .filter(|m| m.risk_level == RiskLevel::High)
            .map(|m| m.brand.clone())
            .collect();

        let mut by_volume: Vec<&ProductionMetric> = metrics.iter().collect();
        by_volume.sort_by(|a, b| {
            b.may_target
                .partial_cmp(&a.may_target)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.brand.cmp(&b.brand))
        });

        let brand_detail = by_volume
            .into_iter()
            .take(BRAND_DETAIL_LIMIT)
            .map(|m| BrandSummary {
                brand: m.brand.clone(),
                may_target: m.may_target,
                w1_target: m.w1_target,
                historical_tonnage: m.historical_tonnage,
                growth_ratio: m.growth_ratio,
                sku_count: m.sku_count,
                risk_level: m.risk_level,
                total_cost: m.cost.total,
            })
            .collect();

        Self {
            total_may_target: metrics.iter().map(|m| m.may_target).sum(),
            total_cost: metrics.iter().map(|m| m.cost.total).sum(),
            brand_count: count,
            high_risk_brands,
            avg_growth_ratio: avg(|m| m.growth_ratio),
            avg_setup_complexity: avg(|m| m.setup_complexity),
            avg_capacity_utilization: avg(|m| m.capacity_utilization),
            avg_lead_time_days: avg(|m| m.lead_time_days),
            brand_detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlanningConfig;
    use crate::domain::target::BrandTarget;
    use crate::engine::metrics::MetricsEngine;

    fn metric(brand: &str, may: f64, historical: f64) -> ProductionMetric {
        let target = BrandTarget {
            brand: brand.to_string(),
            may_target: may,
            w1_target: may / 4.0,
            categories: vec![],
            historical_tonnage: historical,
        };
        MetricsEngine::new(PlanningConfig::default())
            .compute_single(&target, 3, 1000.0)
            .unwrap()
    }

    #[test]
    fn test_summary_totals_and_averages() {
        let metrics = vec![metric("SCG-PI", 400.0, 200.0), metric("MIZU-PI", 100.0, 100.0)];

        let summary = PlanningSummary::from_metrics(&metrics);

        assert_eq!(summary.brand_count, 2);
        assert_eq!(summary.total_may_target, 500.0);
        assert_eq!(summary.avg_growth_ratio, 1.5); // (2.0 + 1.0) / 2
        assert_eq!(summary.high_risk_brands, Vec::<String>::new());
    }

    #[test]
    fn test_high_risk_brands_collected() {
        let metrics = vec![metric("NEW-PI", 500.0, 0.0), metric("SCG-PI", 100.0, 100.0)];

        let summary = PlanningSummary::from_metrics(&metrics);

        assert_eq!(summary.high_risk_brands, vec!["NEW-PI"]);
    }

    #[test]
    fn test_brand_detail_sorted_by_volume_and_capped() {
        let metrics: Vec<ProductionMetric> = (0..8)
            .map(|i| metric(&format!("B{}", i), (i as f64 + 1.0) * 10.0, 50.0))
            .collect();

        let summary = PlanningSummary::from_metrics(&metrics);

        assert_eq!(summary.brand_detail.len(), 5);
        assert_eq!(summary.brand_detail[0].brand, "B7");
        assert_eq!(summary.brand_detail[0].may_target, 80.0);
    }

    #[test]
    fn test_empty_metrics_summary() {
        let summary = PlanningSummary::from_metrics(&[]);

        assert_eq!(summary.brand_count, 0);
        assert_eq!(summary.avg_growth_ratio, 0.0);
        assert!(summary.brand_detail.is_empty());
    }
}
