// ==========================================
// Production Target Allocation - Aggregation Engines
// ==========================================
// Responsibility: summarize the normalized sheets into the
// per-brand views the distribution engine works from.
// HistoricalAggregator: brand totals + per-SKU mix shares.
// TargetAggregator: category targets folded per brand.
// ==========================================

use crate::domain::allocation::SkuShare;
use crate::domain::shipment::HistoricalRecord;
use crate::domain::target::{BrandTarget, TargetTable};
use crate::engine::classifier::{BrandClassifier, Classification};
use std::collections::BTreeMap;
use tracing::debug;

/// Historical sheet rolled up for distribution: brand totals
/// and each SKU's share of its brand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoricalMix {
    /// Total shipped tonnage per brand.
    pub brand_totals: BTreeMap<String, f64>,
    /// brand -> sku code -> mix share.
    pub sku_shares: BTreeMap<String, BTreeMap<String, SkuShare>>,
}

impl HistoricalMix {
    /// Share map for one brand, if it shipped anything.
    pub fn shares_for(&self, brand: &str) -> Option<&BTreeMap<String, SkuShare>> {
        self.sku_shares.get(brand)
    }

    pub fn total_for(&self, brand: &str) -> f64 {
        self.brand_totals.get(brand).copied().unwrap_or(0.0)
    }
}

// ==========================================
// HistoricalAggregator
// ==========================================
pub struct HistoricalAggregator;

impl HistoricalAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Roll shipment records up into brand totals and SKU
    /// shares. Duplicate (brand, sku) rows are summed before
    /// shares are taken.
    pub fn aggregate(&self, records: &[HistoricalRecord]) -> HistoricalMix {
        // brand -> sku -> (tonnage sum, name)
        let mut grouped: BTreeMap<String, BTreeMap<String, (f64, String)>> = BTreeMap::new();

        for record in records {
            let entry = grouped
                .entry(record.brand.clone())
                .or_default()
                .entry(record.sku_code.clone())
                .or_insert((0.0, record.sku_name.clone()));
            entry.0 += record.tonnage;
            if entry.1.is_empty() && !record.sku_name.is_empty() {
                entry.1 = record.sku_name.clone();
            }
        }

        let mut mix = HistoricalMix::default();

        for (brand, skus) in grouped {
            let brand_total: f64 = skus.values().map(|(tonnage, _)| tonnage).sum();

            // Division guard; positive-tonnage ingestion makes
            // this unreachable in practice.
            if brand_total <= 0.0 {
                debug!(brand = %brand, "brand with zero tonnage omitted from mix");
                continue;
            }

            let shares: BTreeMap<String, SkuShare> = skus
                .into_iter()
                .map(|(sku_code, (tonnage, sku_name))| {
                    (
                        sku_code,
                        SkuShare {
                            percentage: tonnage / brand_total,
                            historical_tonnage: tonnage,
                            sku_name,
                        },
                    )
                })
                .collect();

            mix.brand_totals.insert(brand.clone(), brand_total);
            mix.sku_shares.insert(brand, shares);
        }

        mix
    }
}

impl Default for HistoricalAggregator {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// TargetAggregator
// ==========================================
pub struct TargetAggregator {
    classifier: BrandClassifier,
}

impl TargetAggregator {
    pub fn new() -> Self {
        Self {
            classifier: BrandClassifier::new(),
        }
    }

    /// Fold category targets into per-brand aggregates,
    /// walking the table in sheet encounter order. Trading
    /// categories contribute nothing.
    pub fn aggregate(
        &self,
        targets: &TargetTable,
        mix: &HistoricalMix,
    ) -> BTreeMap<String, BrandTarget> {
        let mut brand_targets: BTreeMap<String, BrandTarget> = BTreeMap::new();

        for target in targets.iter() {
            let brand = match self.classifier.classify(&target.category) {
                Classification::Brand(code) => code,
                Classification::Excluded => {
                    debug!(category = %target.category, "trading category excluded");
                    continue;
                }
            };

            brand_targets
                .entry(brand.clone())
                .or_insert_with(|| BrandTarget::new(&brand, mix.total_for(&brand)))
                .accumulate(target);
        }

        brand_targets
    }
}

impl Default for TargetAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::target::CategoryTarget;

    fn record(brand: &str, sku: &str, name: &str, tonnage: f64) -> HistoricalRecord {
        HistoricalRecord {
            brand: brand.to_string(),
            sku_code: sku.to_string(),
            sku_name: name.to_string(),
            tonnage,
        }
    }

    fn target(category: &str, may: f64, w1: f64) -> CategoryTarget {
        CategoryTarget {
            category: category.to_string(),
            may_target: may,
            w1_target: w1,
        }
    }

    #[test]
    fn test_brand_totals_and_shares() {
        let records = vec![
            record("SCG-PI", "A1", "Pipe 1in", 80.0),
            record("SCG-PI", "A2", "Pipe 2in", 20.0),
            record("MIZU-PI", "M1", "Mizu Pipe", 40.0),
        ];

        let mix = HistoricalAggregator::new().aggregate(&records);

        assert_eq!(mix.total_for("SCG-PI"), 100.0);
        assert_eq!(mix.total_for("MIZU-PI"), 40.0);

        let shares = mix.shares_for("SCG-PI").unwrap();
        assert_eq!(shares["A1"].percentage, 0.8);
        assert_eq!(shares["A2"].percentage, 0.2);
        assert_eq!(shares["A1"].historical_tonnage, 80.0);
    }

    #[test]
    fn test_duplicate_sku_rows_summed() {
        let records = vec![
            record("SCG-PI", "A1", "Pipe 1in", 30.0),
            record("SCG-PI", "A1", "Pipe 1in", 50.0),
            record("SCG-PI", "A2", "Pipe 2in", 20.0),
        ];

        let mix = HistoricalAggregator::new().aggregate(&records);
        let shares = mix.shares_for("SCG-PI").unwrap();

        assert_eq!(shares.len(), 2);
        assert_eq!(shares["A1"].historical_tonnage, 80.0);
        assert_eq!(shares["A1"].percentage, 0.8);
    }

    #[test]
    fn test_shares_sum_to_one() {
        let records = vec![
            record("SCG-PI", "A1", "", 33.0),
            record("SCG-PI", "A2", "", 41.5),
            record("SCG-PI", "A3", "", 7.25),
        ];

        let mix = HistoricalAggregator::new().aggregate(&records);
        let total: f64 = mix
            .shares_for("SCG-PI")
            .unwrap()
            .values()
            .map(|s| s.percentage)
            .sum();

        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_target_aggregation_accumulates_per_brand() {
        let records = vec![record("SCG-PI", "A1", "Pipe 1in", 100.0)];
        let mix = HistoricalAggregator::new().aggregate(&records);

        let mut table = TargetTable::new();
        table.insert(target("MFG SCG Pipe", 200.0, 50.0));
        table.insert(target("MFG SCG Conduit", 100.0, 20.0));
        table.insert(target("MFG Mizu Fitting", 60.0, 15.0));
        table.insert(target("Trading Fitting (Trading)", 999.0, 999.0));

        let brand_targets = TargetAggregator::new().aggregate(&table, &mix);

        assert_eq!(brand_targets.len(), 2);

        let scg = &brand_targets["SCG-PI"];
        assert_eq!(scg.may_target, 300.0);
        assert_eq!(scg.w1_target, 70.0);
        assert_eq!(scg.historical_tonnage, 100.0);
        assert_eq!(scg.categories, vec!["MFG SCG Pipe", "MFG SCG Conduit"]);

        // New brand without history: valid, zero tonnage
        let mizu = &brand_targets["MIZU-FT"];
        assert_eq!(mizu.historical_tonnage, 0.0);
        assert_eq!(mizu.may_target, 60.0);
    }

    #[test]
    fn test_excluded_categories_contribute_nothing() {
        let mix = HistoricalMix::default();
        let mut table = TargetTable::new();
        table.insert(target("Trading Fitting (Trading)", 100.0, 25.0));

        let brand_targets = TargetAggregator::new().aggregate(&table, &mix);

        assert!(brand_targets.is_empty());
    }
}
