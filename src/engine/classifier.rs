// ==========================================
// Production Target Allocation - Brand Classifier
// ==========================================
// Responsibility: map free-text sales categories onto
// canonical brand codes. Rule order is load-bearing:
// trading exclusion first, branded rules before generic
// product-type rules, derived code as the final bucket so
// no manufacturing volume is ever dropped silently.
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// Marker separating in-house manufacturing volume from
// trading/resale volume; only MFG categories are planned.
const MFG_MARKER: &str = "mfg";

const SCG_TOKEN: &str = "scg";
const MIZU_TOKEN: &str = "mizu";
const ICON_TOKENS: [&str; 2] = ["icon", "micon"];

const BRAND_SCG_PIPE: &str = "SCG-PI";
const BRAND_SCG_FITTING: &str = "SCG-FT";
const BRAND_SCG_VALVE: &str = "SCG-BV";
const BRAND_MIZU_PIPE: &str = "MIZU-PI";
const BRAND_MIZU_FITTING: &str = "MIZU-FT";
const BRAND_ICON_PIPE: &str = "ICON-PI";

/// Classifier verdict for one category string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    /// Canonical brand code to aggregate under.
    Brand(String),
    /// Trading category, out of production-planning scope.
    Excluded,
}

impl Classification {
    pub fn brand_code(&self) -> Option<&str> {
        match self {
            Classification::Brand(code) => Some(code),
            Classification::Excluded => None,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Brand(code) => write!(f, "{}", code),
            Classification::Excluded => write!(f, "EXCLUDED"),
        }
    }
}

// ==========================================
// BrandClassifier - deterministic rule engine
// ==========================================
pub struct BrandClassifier;

impl BrandClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify one category string. Pure function; first
    /// matching rule wins.
    pub fn classify(&self, category: &str) -> Classification {
        let text = category.to_lowercase();

        // Rule 1: non-manufacturing categories are excluded
        if !text.contains(MFG_MARKER) {
            return Classification::Excluded;
        }

        // Rule 2: primary brand with product sub-types
        if text.contains(SCG_TOKEN) {
            return Classification::Brand(self.scg_subtype(&text).to_string());
        }

        // Rule 3: secondary brand
        if text.contains(MIZU_TOKEN) {
            let code = if text.contains("fitting") {
                BRAND_MIZU_FITTING
            } else {
                BRAND_MIZU_PIPE
            };
            return Classification::Brand(code.to_string());
        }

        // Rule 4: tertiary brand
        if ICON_TOKENS.iter().any(|token| text.contains(token)) {
            return Classification::Brand(BRAND_ICON_PIPE.to_string());
        }

        // Rule 5: unbranded product types default to the
        // primary line
        if text.contains("pipe") {
            return Classification::Brand(BRAND_SCG_PIPE.to_string());
        }
        if text.contains("fitting") {
            return Classification::Brand(BRAND_SCG_FITTING.to_string());
        }
        if text.contains("valve") {
            return Classification::Brand(BRAND_SCG_VALVE.to_string());
        }

        // Rule 6: derive a code so the volume still lands in
        // a bucket
        Classification::Brand(Self::derive_code(category))
    }

    fn scg_subtype(&self, text: &str) -> &'static str {
        if text.contains("pipe") || text.contains("conduit") {
            BRAND_SCG_PIPE
        } else if text.contains("fitting") {
            BRAND_SCG_FITTING
        } else if text.contains("valve") {
            BRAND_SCG_VALVE
        } else {
            BRAND_SCG_PIPE
        }
    }

    /// Fallback bucket: uppercase, parentheses stripped,
    /// whitespace collapsed to hyphens.
    fn derive_code(category: &str) -> String {
        let stripped: String = category
            .chars()
            .filter(|c| *c != '(' && *c != ')')
            .collect();
        stripped
            .to_uppercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
    }
}

impl Default for BrandClassifier {
    fn default() -> Self {
        Self::new()
    }
}
