// ==========================================
// Production Target Allocation - Derived Metrics
// ==========================================
// Responsibility: per-brand feasibility snapshot. Pure
// function of BrandTarget + SKU count; recomputed on
// demand, never persisted.
// ==========================================

use crate::domain::types::RiskLevel;
use serde::{Deserialize, Serialize};

/// Cost estimate split by driver (USD).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub material: f64,
    pub labor: f64,
    pub overhead: f64,
    pub total: f64,
}

/// Derived production feasibility metrics for one brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionMetric {
    pub brand: String,

    // Inputs carried for reporting
    pub may_target: f64,
    pub w1_target: f64,
    pub historical_tonnage: f64,
    pub sku_count: usize,

    // Growth & risk
    /// Target over history; sentinel value when history is 0.
    pub growth_ratio: f64,
    pub risk_level: RiskLevel,
    /// Numeric companion to the risk level, on a 1-10 scale.
    pub risk_score: f64,

    // Capacity & complexity
    /// Percent of the assumed monthly capacity, capped at 100.
    pub capacity_utilization: f64,
    /// 0-10 scale from SKU breadth and growth pressure.
    pub setup_complexity: f64,

    // Resources
    pub labor_hours: f64,
    pub machine_hours: f64,
    pub operators_needed: f64,
    pub lead_time_days: f64,

    // Cost
    pub cost: CostBreakdown,
    /// Total cost over target tonnage; 0 when the target is 0.
    pub cost_per_ton: f64,

    /// This brand's May target as a percent of all brands'.
    pub market_share_pct: f64,
}
