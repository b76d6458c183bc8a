// ==========================================
// Production Target Allocation - Analysis Layer
// ==========================================
// Responsibility: the narrative boundary. Builds the
// JSON-serializable summary handed to an external narrative
// service and guarantees a deterministic report when that
// service is absent, fails, or answers with garbage.
// ==========================================

pub mod narrative;
pub mod summary;

pub use narrative::{
    fallback_report, resolve_narrative, FeasibilityLevel, NarrativeError, NarrativeOutcome,
    NarrativeProvider, NarrativeReport, NarrativeSource,
};
pub use summary::{BrandSummary, PlanningSummary};
