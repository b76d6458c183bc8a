// ==========================================
// Production Target Allocation - SKU Distribution Engine
// ==========================================
// Responsibility: spread each brand-level target over that
// brand's SKUs in proportion to historical mix, for both
// forecast periods independently. Brands with no shipment
// history stay in the target table but produce no
// distribution; that is a reported condition, not an error.
// ==========================================

use crate::domain::allocation::{Prediction, SkuAllocation, SkuShare};
use crate::domain::target::BrandTarget;
use crate::engine::aggregator::HistoricalMix;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Distribution output: predictions per brand plus the
/// brands skipped for lack of a historical basis.
#[derive(Debug, Clone, Default)]
pub struct DistributionResult {
    pub predictions: BTreeMap<String, Prediction>,
    /// Brands holding a target but no historical SKU mix.
    pub skipped_brands: Vec<String>,
}

pub struct DistributionEngine {
    /// Minimum historical share for a SKU to receive an
    /// allocation; the near-zero tail is dropped as noise.
    share_floor: f64,
}

impl DistributionEngine {
    pub fn new(share_floor: f64) -> Self {
        Self { share_floor }
    }

    /// Allocate every brand target down to SKU level.
    pub fn distribute(
        &self,
        brand_targets: &BTreeMap<String, BrandTarget>,
        mix: &HistoricalMix,
    ) -> DistributionResult {
        let mut result = DistributionResult::default();

        for (brand, target) in brand_targets {
            let Some(shares) = mix.shares_for(brand) else {
                debug!(brand = %brand, "target without historical basis, no distribution");
                result.skipped_brands.push(brand.clone());
                continue;
            };

            let prediction = Prediction {
                brand: brand.clone(),
                may_distribution: self.allocate(target.may_target, shares),
                w1_distribution: self.allocate(target.w1_target, shares),
            };

            result.predictions.insert(brand.clone(), prediction);
        }

        info!(
            predicted_brands = result.predictions.len(),
            skipped_brands = result.skipped_brands.len(),
            "distribution complete"
        );

        result
    }

    /// Allocate one period target over the share map.
    fn allocate(
        &self,
        period_target: f64,
        shares: &BTreeMap<String, SkuShare>,
    ) -> BTreeMap<String, SkuAllocation> {
        shares
            .iter()
            .filter(|(_, share)| share.percentage >= self.share_floor)
            .map(|(sku_code, share)| {
                (
                    sku_code.clone(),
                    SkuAllocation {
                        predicted_tonnage: period_target * share.percentage,
                        percentage: share.percentage,
                        sku_name: share.sku_name.clone(),
                        historical_tonnage: share.historical_tonnage,
                    },
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shipment::HistoricalRecord;
    use crate::engine::aggregator::HistoricalAggregator;

    fn record(brand: &str, sku: &str, tonnage: f64) -> HistoricalRecord {
        HistoricalRecord {
            brand: brand.to_string(),
            sku_code: sku.to_string(),
            sku_name: format!("{} name", sku),
            tonnage,
        }
    }

    fn brand_target(brand: &str, may: f64, w1: f64, historical: f64) -> BrandTarget {
        BrandTarget {
            brand: brand.to_string(),
            may_target: may,
            w1_target: w1,
            categories: vec![],
            historical_tonnage: historical,
        }
    }

    #[test]
    fn test_proportional_allocation_both_periods() {
        let mix = HistoricalAggregator::new()
            .aggregate(&[record("SCG-PI", "A1", 80.0), record("SCG-PI", "A2", 20.0)]);

        let mut targets = BTreeMap::new();
        targets.insert(
            "SCG-PI".to_string(),
            brand_target("SCG-PI", 200.0, 50.0, 100.0),
        );

        let result = DistributionEngine::new(0.001).distribute(&targets, &mix);
        let prediction = &result.predictions["SCG-PI"];

        assert_eq!(prediction.may_distribution["A1"].predicted_tonnage, 160.0);
        assert_eq!(prediction.may_distribution["A2"].predicted_tonnage, 40.0);
        assert_eq!(prediction.w1_distribution["A1"].predicted_tonnage, 40.0);
        assert_eq!(prediction.w1_distribution["A2"].predicted_tonnage, 10.0);
        assert_eq!(prediction.may_distribution["A1"].historical_tonnage, 80.0);
        assert!(result.skipped_brands.is_empty());
    }

    #[test]
    fn test_allocations_conserve_the_target() {
        let mix = HistoricalAggregator::new().aggregate(&[
            record("SCG-PI", "A1", 33.0),
            record("SCG-PI", "A2", 41.5),
            record("SCG-PI", "A3", 7.25),
        ]);

        let mut targets = BTreeMap::new();
        targets.insert(
            "SCG-PI".to_string(),
            brand_target("SCG-PI", 500.0, 125.0, 81.75),
        );

        let result = DistributionEngine::new(0.001).distribute(&targets, &mix);
        let may_sum: f64 = result.predictions["SCG-PI"]
            .may_distribution
            .values()
            .map(|a| a.predicted_tonnage)
            .sum();

        assert!((may_sum - 500.0).abs() < 1e-6);
    }

    #[test]
    fn test_tail_skus_below_floor_dropped() {
        // A3 holds 0.05% of the brand, below the 0.1% floor
        let mix = HistoricalAggregator::new().aggregate(&[
            record("SCG-PI", "A1", 899.5),
            record("SCG-PI", "A2", 100.0),
            record("SCG-PI", "A3", 0.5),
        ]);

        let mut targets = BTreeMap::new();
        targets.insert(
            "SCG-PI".to_string(),
            brand_target("SCG-PI", 100.0, 25.0, 1000.0),
        );

        let result = DistributionEngine::new(0.001).distribute(&targets, &mix);
        let prediction = &result.predictions["SCG-PI"];

        // Present in the mix, absent from both distributions
        assert!(mix.shares_for("SCG-PI").unwrap().contains_key("A3"));
        assert!(!prediction.may_distribution.contains_key("A3"));
        assert!(!prediction.w1_distribution.contains_key("A3"));
        assert_eq!(prediction.sku_count(), 2);
    }

    #[test]
    fn test_brand_without_history_is_skipped_not_fatal() {
        let mix = HistoricalAggregator::new().aggregate(&[record("SCG-PI", "A1", 100.0)]);

        let mut targets = BTreeMap::new();
        targets.insert(
            "SCG-PI".to_string(),
            brand_target("SCG-PI", 200.0, 50.0, 100.0),
        );
        targets.insert(
            "MFG-NEWBRAND-PIPE".to_string(),
            brand_target("MFG-NEWBRAND-PIPE", 60.0, 15.0, 0.0),
        );

        let result = DistributionEngine::new(0.001).distribute(&targets, &mix);

        assert_eq!(result.predictions.len(), 1);
        assert!(result.predictions.contains_key("SCG-PI"));
        assert_eq!(result.skipped_brands, vec!["MFG-NEWBRAND-PIPE"]);
    }
}
