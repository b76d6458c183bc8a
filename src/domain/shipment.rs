// ==========================================
// Production Target Allocation - Historical Shipments
// ==========================================
// Responsibility: normalized rows of the historical
// shipment sheet. Created once per ingestion run,
// immutable afterward, held only for the session.
// ==========================================

use serde::{Deserialize, Serialize};

/// One row of shipped tonnage from the historical sheet.
///
/// Invariant: `tonnage > 0`. Rows that cannot satisfy it are
/// dropped during ingestion and counted in [`IngestStats`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRecord {
    /// Product-line code, raw or canonical (e.g. "SCG-PI").
    pub brand: String,
    /// SKU code, unique within a brand.
    pub sku_code: String,
    /// Human-readable product name.
    pub sku_name: String,
    /// Shipped tonnage, strictly positive.
    pub tonnage: f64,
}

/// Row-level accounting for one ingestion run.
///
/// Dropped rows are a first-class, inspectable outcome, not a
/// swallowed exception. Counts are informational only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestStats {
    /// Data rows seen below the detected header.
    pub total_rows: usize,
    /// Rows that became a `HistoricalRecord`.
    pub kept: usize,
    /// Rows dropped for an empty/"nan" brand or SKU code.
    pub dropped_missing_key: usize,
    /// Rows dropped for missing or non-positive tonnage.
    pub dropped_invalid_tonnage: usize,
}

impl IngestStats {
    /// Total number of rows rejected during ingestion.
    pub fn dropped(&self) -> usize {
        self.dropped_missing_key + self.dropped_invalid_tonnage
    }
}
