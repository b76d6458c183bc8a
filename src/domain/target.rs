// ==========================================
// Production Target Allocation - Sales Targets
// ==========================================
// Responsibility: parsed target-sheet rows and the
// per-brand aggregate built from them.
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One parsed target-sheet row: a free-text sales category
/// with its two forecast values.
///
/// `w1_target` is expected to be proportionally below
/// `may_target`; this is reported as a risk signal, never
/// enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTarget {
    /// Free-text category label, unique key within the sheet.
    pub category: String,
    /// May monthly target (tons).
    pub may_target: f64,
    /// First-week sub-target (tons).
    pub w1_target: f64,
}

/// Ordered collection of category targets.
///
/// Preserves sheet encounter order; re-inserting an existing
/// category overwrites its values in place (last write wins,
/// original position kept).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetTable {
    rows: Vec<CategoryTarget>,
    index: HashMap<String, usize>,
}

impl TargetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a category target.
    pub fn insert(&mut self, target: CategoryTarget) {
        match self.index.get(&target.category) {
            Some(&pos) => self.rows[pos] = target,
            None => {
                self.index.insert(target.category.clone(), self.rows.len());
                self.rows.push(target);
            }
        }
    }

    pub fn get(&self, category: &str) -> Option<&CategoryTarget> {
        self.index.get(category).map(|&pos| &self.rows[pos])
    }

    /// Rows in sheet encounter order.
    pub fn iter(&self) -> impl Iterator<Item = &CategoryTarget> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Per-brand target aggregate.
///
/// Accumulated while walking the target table in encounter
/// order; immutable once aggregation finishes. A brand with
/// `historical_tonnage == 0` is a valid, flagged state
/// ("new brand, no shipment history").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandTarget {
    /// Canonical brand code (e.g. "SCG-PI").
    pub brand: String,
    /// Sum of May targets across mapped categories.
    pub may_target: f64,
    /// Sum of first-week targets across mapped categories.
    pub w1_target: f64,
    /// Contributing category names in encounter order.
    pub categories: Vec<String>,
    /// Total historical tonnage for the brand; 0 when the
    /// brand is absent from the historical sheet.
    pub historical_tonnage: f64,
}

impl BrandTarget {
    /// Fresh accumulator for a brand first seen during
    /// target aggregation.
    pub fn new(brand: &str, historical_tonnage: f64) -> Self {
        Self {
            brand: brand.to_string(),
            may_target: 0.0,
            w1_target: 0.0,
            categories: Vec::new(),
            historical_tonnage,
        }
    }

    /// Fold one category's targets into the aggregate.
    pub fn accumulate(&mut self, target: &CategoryTarget) {
        self.may_target += target.may_target;
        self.w1_target += target.w1_target;
        self.categories.push(target.category.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(category: &str, may: f64, w1: f64) -> CategoryTarget {
        CategoryTarget {
            category: category.to_string(),
            may_target: may,
            w1_target: w1,
        }
    }

    #[test]
    fn test_target_table_preserves_order() {
        let mut table = TargetTable::new();
        table.insert(row("MFG SCG Pipe", 100.0, 25.0));
        table.insert(row("MFG Mizu Fitting", 50.0, 10.0));

        let categories: Vec<&str> = table.iter().map(|t| t.category.as_str()).collect();
        assert_eq!(categories, vec!["MFG SCG Pipe", "MFG Mizu Fitting"]);
    }

    #[test]
    fn test_target_table_last_write_wins_in_place() {
        let mut table = TargetTable::new();
        table.insert(row("MFG SCG Pipe", 100.0, 25.0));
        table.insert(row("MFG Mizu Fitting", 50.0, 10.0));
        table.insert(row("MFG SCG Pipe", 200.0, 40.0));

        assert_eq!(table.len(), 2);
        let first = table.iter().next().unwrap();
        assert_eq!(first.category, "MFG SCG Pipe");
        assert_eq!(first.may_target, 200.0);
        assert_eq!(table.get("MFG SCG Pipe").unwrap().w1_target, 40.0);
    }

    #[test]
    fn test_brand_target_accumulation() {
        let mut brand = BrandTarget::new("SCG-PI", 120.0);
        brand.accumulate(&row("MFG SCG Pipe", 100.0, 25.0));
        brand.accumulate(&row("MFG SCG Conduit", 40.0, 5.0));

        assert_eq!(brand.may_target, 140.0);
        assert_eq!(brand.w1_target, 30.0);
        assert_eq!(brand.categories, vec!["MFG SCG Pipe", "MFG SCG Conduit"]);
        assert_eq!(brand.historical_tonnage, 120.0);
    }
}
