// ==========================================
// Production Target Allocation - SKU Allocation
// ==========================================
// Responsibility: historical SKU mix shares and the
// per-brand target distributions derived from them.
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One SKU's slice of its brand's historical tonnage.
///
/// Invariant: within a brand, shares sum to 1.0 (floating
/// point tolerance), because each is that SKU's tonnage over
/// the brand total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuShare {
    /// Share of brand tonnage, in [0, 1].
    pub percentage: f64,
    /// This SKU's own historical tonnage.
    pub historical_tonnage: f64,
    /// Human-readable product name.
    pub sku_name: String,
}

/// One SKU's allocated slice of a brand-level target for a
/// single forecast period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuAllocation {
    /// `period_target * percentage` for this SKU.
    pub predicted_tonnage: f64,
    /// Historical share that drove the allocation.
    pub percentage: f64,
    /// Human-readable product name.
    pub sku_name: String,
    /// This SKU's own historical tonnage, carried for
    /// growth-ratio reporting.
    pub historical_tonnage: f64,
}

/// Per-brand target distribution, one map per forecast
/// period, keyed by SKU code.
///
/// Invariant: each period's predicted tonnages sum to the
/// brand's period target (floating point tolerance), modulo
/// SKUs dropped below the configured share floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub brand: String,
    /// May monthly target spread over SKUs.
    pub may_distribution: BTreeMap<String, SkuAllocation>,
    /// First-week sub-target spread over SKUs.
    pub w1_distribution: BTreeMap<String, SkuAllocation>,
}

impl Prediction {
    /// Number of SKUs taking part in the monthly allocation.
    pub fn sku_count(&self) -> usize {
        self.may_distribution.len()
    }
}
