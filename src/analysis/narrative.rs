// ==========================================
// Production Target Allocation - Narrative Boundary
// ==========================================
// Responsibility: trait seam for the external narrative
// service plus the deterministic fallback report. The
// analysis must stand on its own: a provider that is
// missing, errors out, or returns malformed JSON degrades
// to the fallback, never to a failed run.
// ==========================================

use crate::analysis::summary::PlanningSummary;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::warn;

// Fallback cost-split assumption, percent of total.
const FALLBACK_MATERIAL_PCT: f64 = 65.0;
const FALLBACK_LABOR_PCT: f64 = 20.0;
const FALLBACK_OVERHEAD_PCT: f64 = 15.0;

// Average growth above which the fallback downgrades
// feasibility from High to Medium.
const FEASIBILITY_GROWTH_LIMIT: f64 = 2.0;

/// Narrative boundary error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NarrativeError {
    #[error("narrative service unavailable: {0}")]
    Unavailable(String),

    #[error("narrative service call failed: {0}")]
    ServiceFailed(String),

    #[error("narrative response is not valid JSON: {0}")]
    MalformedResponse(String),
}

/// Overall production feasibility verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeasibilityLevel {
    High,
    Medium,
    Low,
}

impl Default for FeasibilityLevel {
    fn default() -> Self {
        FeasibilityLevel::Medium
    }
}

impl fmt::Display for FeasibilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeasibilityLevel::High => write!(f, "High"),
            FeasibilityLevel::Medium => write!(f, "Medium"),
            FeasibilityLevel::Low => write!(f, "Low"),
        }
    }
}

// ==========================================
// Narrative report structure
// ==========================================
// Every field defaults so a provider answering with a
// partial document still parses.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutiveSummary {
    pub production_feasibility: FeasibilityLevel,
    pub overall_assessment: String,
    pub key_success_factors: Vec<String>,
    pub critical_challenges: Vec<String>,
    pub confidence_level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityPlanning {
    pub utilization_analysis: String,
    pub bottleneck_identification: Vec<String>,
    pub capacity_recommendations: Vec<String>,
    pub scalability_assessment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostSplit {
    pub material_pct: f64,
    pub labor_pct: f64,
    pub overhead_pct: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoiProjection {
    pub expected_margin: String,
    pub break_even_analysis: String,
    pub profitability_timeline: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostOptimization {
    pub cost_breakdown: CostSplit,
    pub cost_reduction_opportunities: Vec<String>,
    pub roi_projections: RoiProjection,
}

/// Structured narrative over one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrativeReport {
    pub executive_summary: ExecutiveSummary,
    pub capacity_planning: CapacityPlanning,
    pub cost_optimization: CostOptimization,
}

impl NarrativeReport {
    /// Parse a provider response; any JSON problem is a
    /// typed error, not a panic.
    pub fn from_json(raw: &str) -> Result<Self, NarrativeError> {
        serde_json::from_str(raw).map_err(|e| NarrativeError::MalformedResponse(e.to_string()))
    }
}

// ==========================================
// Provider seam
// ==========================================

/// External narrative service. Implementations own their
/// transport, credentials, timeouts and retries; the
/// analysis layer only sees a JSON document or an error.
pub trait NarrativeProvider {
    fn narrate(&self, summary: &PlanningSummary) -> Result<String, NarrativeError>;
}

/// Where the report on a [`NarrativeOutcome`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NarrativeSource {
    Provider,
    Fallback,
}

/// Report plus provenance; `provider_error` is set when the
/// provider was tried and the fallback took over.
#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeOutcome {
    pub report: NarrativeReport,
    pub source: NarrativeSource,
    pub provider_error: Option<NarrativeError>,
}

/// Resolve the narrative for a run: use the provider when
/// one is given and answers well-formed JSON, otherwise the
/// deterministic fallback.
pub fn resolve_narrative(
    provider: Option<&dyn NarrativeProvider>,
    summary: &PlanningSummary,
) -> NarrativeOutcome {
    let Some(provider) = provider else {
        return NarrativeOutcome {
            report: fallback_report(summary),
            source: NarrativeSource::Fallback,
            provider_error: None,
        };
    };

    let attempt = provider
        .narrate(summary)
        .and_then(|raw| NarrativeReport::from_json(&raw));

    match attempt {
        Ok(report) => NarrativeOutcome {
            report,
            source: NarrativeSource::Provider,
            provider_error: None,
        },
        Err(err) => {
            warn!(error = %err, "narrative provider failed, using fallback report");
            NarrativeOutcome {
                report: fallback_report(summary),
                source: NarrativeSource::Fallback,
                provider_error: Some(err),
            }
        }
    }
}

/// Deterministic report computed from the summary alone.
pub fn fallback_report(summary: &PlanningSummary) -> NarrativeReport {
    let feasibility = if summary.avg_growth_ratio > FEASIBILITY_GROWTH_LIMIT {
        FeasibilityLevel::Medium
    } else {
        FeasibilityLevel::High
    };

    NarrativeReport {
        executive_summary: ExecutiveSummary {
            production_feasibility: feasibility,
            overall_assessment: format!(
                "Production target of {:.0} tons across {} brands requires careful planning and resource allocation.",
                summary.total_may_target, summary.brand_count
            ),
            key_success_factors: vec![
                "Effective capacity planning and utilization".to_string(),
                "Quality control for high-growth products".to_string(),
                "Efficient resource allocation and scheduling".to_string(),
            ],
            critical_challenges: vec![
                format!("Managing {} high-risk brands", summary.high_risk_brands.len()),
                "Coordinating complex multi-brand production".to_string(),
                "Maintaining quality standards during scale-up".to_string(),
            ],
            confidence_level: "Medium".to_string(),
        },
        capacity_planning: CapacityPlanning {
            utilization_analysis: format!(
                "Average capacity utilization of {:.1}% indicates moderate to high production load",
                summary.avg_capacity_utilization
            ),
            bottleneck_identification: vec![
                "Machine changeover time between SKUs".to_string(),
                "Quality inspection capacity".to_string(),
            ],
            capacity_recommendations: vec![
                "Optimize setup procedures".to_string(),
                "Consider additional production lines".to_string(),
                "Implement parallel processing".to_string(),
            ],
            scalability_assessment: "Current capacity sufficient with optimization".to_string(),
        },
        cost_optimization: CostOptimization {
            cost_breakdown: CostSplit {
                material_pct: FALLBACK_MATERIAL_PCT,
                labor_pct: FALLBACK_LABOR_PCT,
                overhead_pct: FALLBACK_OVERHEAD_PCT,
            },
            cost_reduction_opportunities: vec![
                "Bulk material purchasing".to_string(),
                "Setup time reduction".to_string(),
                "Process automation".to_string(),
            ],
            roi_projections: RoiProjection {
                expected_margin: "15-20%".to_string(),
                break_even_analysis: "Break-even expected within 6 months".to_string(),
                profitability_timeline: "Full profitability by month 8".to_string(),
            },
        },
    }
}
