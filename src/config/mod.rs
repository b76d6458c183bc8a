// ==========================================
// Production Target Allocation - Configuration Layer
// ==========================================
// Responsibility: named modeling constants + overrides
// Storage: in-memory struct, optional JSON override file
// ==========================================

pub mod planning_config;

pub use planning_config::{ConfigError, PlanningConfig};
