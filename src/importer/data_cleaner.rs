// ==========================================
// Production Target Allocation - Data Cleaner
// ==========================================
// Responsibility: TRIM / NULL normalization / tolerant
// numeric parsing. Spreadsheet exports carry type noise:
// thousands separators, stray whitespace, and the literal
// "nan" that a previous tool wrote into empty cells.
// ==========================================

pub struct DataCleaner;

impl DataCleaner {
    /// Trim and normalize a cell to `None` when it carries no
    /// usable value (empty, whitespace, or literal "nan").
    pub fn normalize_cell(&self, value: &str) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Parse a numeric cell tolerantly.
    ///
    /// Strips thousands separators and inner whitespace before
    /// parsing; anything still unparseable is `None` rather
    /// than an error, so callers decide drop-vs-default.
    pub fn parse_number(&self, value: &str) -> Option<f64> {
        let cleaned: String = value
            .trim()
            .chars()
            .filter(|c| *c != ',' && !c.is_whitespace())
            .collect();
        if cleaned.is_empty() || cleaned.eq_ignore_ascii_case("nan") {
            return None;
        }
        cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
    }
}
