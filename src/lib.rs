// ==========================================
// Production Target Allocation Analyzer - Core Library
// ==========================================
// Ingests historical SKU shipments and category-level sales
// targets, maps categories onto product brands, distributes
// brand targets down to SKUs by historical mix, and derives
// per-brand feasibility metrics.
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain layer - entities and value types
pub mod domain;

// Importer layer - external spreadsheets
pub mod importer;

// Engine layer - business rules
pub mod engine;

// Analysis layer - summary + narrative boundary
pub mod analysis;

// Export layer - CSV/JSON artifacts
pub mod export;

// Configuration layer - modeling constants
pub mod config;

// Logging
pub mod logging;

// ==========================================
// Core type re-exports
// ==========================================

// Domain types
pub use domain::{
    BrandTarget, CategoryTarget, CostBreakdown, HistoricalRecord, IngestStats, Period,
    Prediction, ProductionMetric, RiskLevel, SkuAllocation, SkuShare, TargetTable,
};

// Engines
pub use engine::{
    AnalysisError, AnalysisOutcome, AnalysisPipeline, AnalysisWarning, BrandClassifier,
    Classification, DistributionEngine, HistoricalAggregator, HistoricalMix, MetricsEngine,
    TargetAggregator,
};

// Importers
pub use importer::{
    HistoricalImporter, ImportError, RawGrid, TargetImporter, UniversalFileParser,
};

// Analysis boundary
pub use analysis::{
    resolve_narrative, NarrativeOutcome, NarrativeProvider, NarrativeReport, PlanningSummary,
};

// Export
pub use export::{ExportError, Exporter};

// Configuration
pub use config::PlanningConfig;

// ==========================================
// Constants
// ==========================================

// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Application name
pub const APP_NAME: &str = "Production Target Allocation Analyzer";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
