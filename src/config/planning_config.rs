// ==========================================
// Production Target Allocation - Planning Configuration
// ==========================================
// Responsibility: modeling constants used by the metrics
// and distribution engines. All values are business
// assumptions, kept as named fields so a deployment can
// override them from a JSON file instead of a rebuild.
// ==========================================

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration layer error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file read failed: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("config file parse failed: {0}")]
    FileParse(#[from] serde_json::Error),

    #[error("config value invalid (key: {key}): {message}")]
    InvalidValue { key: String, message: String },
}

/// Modeling constants for allocation and derived metrics.
///
/// Every field has a production default; a partial JSON file
/// only needs the keys it wants to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    /// Minimum historical share a SKU must hold to take part
    /// in target distribution (0.001 = 0.1%).
    pub sku_share_floor: f64,

    /// Growth ratio assigned to brands with no historical
    /// tonnage ("unknown growth, treat as aggressive").
    pub growth_sentinel: f64,

    /// Growth ratio above which a brand is High risk.
    pub high_risk_growth: f64,

    /// Growth ratio above which a brand is Medium risk.
    pub medium_risk_growth: f64,

    /// Assumed monthly production capacity per brand (tons).
    pub monthly_capacity_t: f64,

    /// Labor hours consumed per produced ton.
    pub labor_hours_per_ton: f64,

    /// Machine hours consumed per produced ton.
    pub machine_hours_per_ton: f64,

    /// Working hours one operator contributes per month.
    pub operator_hours_per_month: f64,

    /// Staffing floor regardless of volume.
    pub min_operators: f64,

    /// Base production lead time in days before complexity
    /// and volume factors are applied.
    pub base_lead_time_days: f64,

    /// Material cost per ton (USD).
    pub material_cost_per_ton: f64,

    /// Labor cost per hour (USD).
    pub labor_cost_per_hour: f64,

    /// Fixed overhead per ton (USD).
    pub overhead_base_per_ton: f64,

    /// Additional overhead per ton per setup-complexity point (USD).
    pub overhead_complexity_per_ton: f64,

    /// Finite cap reported instead of an infinite growth ratio
    /// when a SKU has a prediction but no historical tonnage.
    pub growth_ratio_saturation: f64,

    /// Token identifying the monthly-target column in the
    /// target sheet header area.
    pub month_header_token: String,

    /// Token identifying the first-week-target column in the
    /// target sheet header area.
    pub week_header_token: String,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            sku_share_floor: 0.001,
            growth_sentinel: 5.0,
            high_risk_growth: 3.0,
            medium_risk_growth: 1.5,
            monthly_capacity_t: 1000.0,
            labor_hours_per_ton: 8.0,
            machine_hours_per_ton: 6.0,
            operator_hours_per_month: 160.0,
            min_operators: 2.0,
            base_lead_time_days: 7.0,
            material_cost_per_ton: 800.0,
            labor_cost_per_hour: 25.0,
            overhead_base_per_ton: 200.0,
            overhead_complexity_per_ton: 20.0,
            growth_ratio_saturation: 999.0,
            month_header_token: "may".to_string(),
            week_header_token: "w1".to_string(),
        }
    }
}

impl PlanningConfig {
    /// Load configuration from a JSON file, falling back to
    /// defaults for absent keys.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: PlanningConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would make the formulas
    /// divide by zero or invert their meaning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("monthly_capacity_t", self.monthly_capacity_t),
            ("operator_hours_per_month", self.operator_hours_per_month),
            ("base_lead_time_days", self.base_lead_time_days),
            ("growth_ratio_saturation", self.growth_ratio_saturation),
        ];
        for (key, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("must be > 0, got {}", value),
                });
            }
        }

        if !(0.0..1.0).contains(&self.sku_share_floor) {
            return Err(ConfigError::InvalidValue {
                key: "sku_share_floor".to_string(),
                message: format!("must be in [0, 1), got {}", self.sku_share_floor),
            });
        }

        if self.medium_risk_growth >= self.high_risk_growth {
            return Err(ConfigError::InvalidValue {
                key: "medium_risk_growth".to_string(),
                message: format!(
                    "must be below high_risk_growth ({} >= {})",
                    self.medium_risk_growth, self.high_risk_growth
                ),
            });
        }

        Ok(())
    }
}
