// ==========================================
// Production Target Allocation - Domain Layer
// ==========================================
// Responsibility: entities and closed value types.
// All domain data is immutable once built; mutation only
// happens inside the aggregation engines.
// ==========================================

pub mod allocation;
pub mod metrics;
pub mod shipment;
pub mod target;
pub mod types;

pub use allocation::{Prediction, SkuAllocation, SkuShare};
pub use metrics::{CostBreakdown, ProductionMetric};
pub use shipment::{HistoricalRecord, IngestStats};
pub use target::{BrandTarget, CategoryTarget, TargetTable};
pub use types::{Period, RiskLevel};
