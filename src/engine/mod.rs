// ==========================================
// Production Target Allocation - Engine Layer
// ==========================================
// Responsibility: the decision logic. Engines are pure and
// stateless; every rule outputs an inspectable result
// (classification, drop count, warning) instead of failing
// silently.
// ==========================================

pub mod aggregator;
pub mod classifier;
pub mod distribution;
pub mod metrics;
pub mod pipeline;

pub use aggregator::{HistoricalAggregator, HistoricalMix, TargetAggregator};
pub use classifier::{BrandClassifier, Classification};
pub use distribution::{DistributionEngine, DistributionResult};
pub use metrics::{MetricsEngine, MetricsError};
pub use pipeline::{AnalysisError, AnalysisOutcome, AnalysisPipeline, AnalysisWarning};
