// ==========================================
// Production Target Allocation - Domain Types
// ==========================================
// Closed taxonomies only. Brand codes stay plain strings:
// the classifier fallback rule can mint new codes, so the
// set is not closed.
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Risk level
// ==========================================
// Level system, not a free score: the numeric companion
// score lives on ProductionMetric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

// ==========================================
// Forecast period
// ==========================================
// The target sheet carries two forecast horizons: the May
// monthly target and its first-week sub-target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Period {
    May,
    WeekOne,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::May => write!(f, "MAY"),
            Period::WeekOne => write!(f, "WEEK_ONE"),
        }
    }
}
