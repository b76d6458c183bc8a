// ==========================================
// Production Target Allocation - Target Sheet Importer
// ==========================================
// Responsibility: extract category targets from the sales
// target sheet. The sheet carries no stable header names,
// only structural conventions: a header area naming the two
// forecast columns, data starting two rows below it, and a
// trailing "total" row.
// ==========================================

use crate::domain::target::{CategoryTarget, TargetTable};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::RawGrid;
use tracing::{debug, info, warn};

// Rows scanned for the forecast column tokens.
const HEADER_SCAN_ROWS: usize = 5;

// Data rows sit this far below the detected header row.
const DATA_ROW_OFFSET: usize = 2;

// First-column marker ending the data block.
const TOTAL_MARKER: &str = "total";

// Column positions assumed when token scanning fails.
const FALLBACK_MAY_COLUMN: usize = 1;
const FALLBACK_W1_COLUMN: usize = 2;

// Minimum sheet size that can possibly hold header + data.
const MIN_SHEET_ROWS: usize = 3;

/// Extracted target table plus layout diagnostics.
#[derive(Debug, Clone)]
pub struct TargetImport {
    pub table: TargetTable,
    /// True when token scanning failed and the structural
    /// fallback columns were assumed.
    pub column_fallback: bool,
    pub may_column: usize,
    pub w1_column: usize,
    pub header_row: usize,
}

pub struct TargetImporter {
    cleaner: DataCleaner,
    month_token: String,
    week_token: String,
}

impl TargetImporter {
    pub fn new(month_token: &str, week_token: &str) -> Self {
        Self {
            cleaner: DataCleaner,
            month_token: month_token.to_lowercase(),
            week_token: week_token.to_lowercase(),
        }
    }

    /// Extract category targets from a raw target sheet.
    pub fn import(&self, grid: &RawGrid) -> ImportResult<TargetImport> {
        if grid.len() < MIN_SHEET_ROWS {
            return Err(ImportError::InsufficientData {
                rows: grid.len(),
                min: MIN_SHEET_ROWS,
            });
        }

        let layout = self.locate_columns(grid);
        if layout.column_fallback {
            warn!(
                may_column = layout.may_column,
                w1_column = layout.w1_column,
                "target header tokens not found, assuming structural column layout"
            );
        } else {
            debug!(
                may_column = layout.may_column,
                w1_column = layout.w1_column,
                header_row = layout.header_row,
                "target columns located by token"
            );
        }

        let mut table = TargetTable::new();
        let data_start = layout.header_row + DATA_ROW_OFFSET;

        for row in grid.iter().skip(data_start) {
            let first_cell = row.first().map(String::as_str).unwrap_or("");
            if first_cell.to_lowercase().contains(TOTAL_MARKER) {
                break;
            }

            let Some(category) = self.cleaner.normalize_cell(first_cell) else {
                continue;
            };

            // Unparseable target cells default to 0, they do
            // not invalidate the category row.
            let may_target = self.number_at(row, layout.may_column);
            let w1_target = self.number_at(row, layout.w1_column);

            table.insert(CategoryTarget {
                category,
                may_target,
                w1_target,
            });
        }

        if table.is_empty() {
            return Err(ImportError::NoCategories);
        }

        info!(
            categories = table.len(),
            column_fallback = layout.column_fallback,
            "target sheet imported"
        );

        Ok(TargetImport {
            table,
            column_fallback: layout.column_fallback,
            may_column: layout.may_column,
            w1_column: layout.w1_column,
            header_row: layout.header_row,
        })
    }

    /// Scan the header area for the two forecast tokens; fall
    /// back to the fixed structural columns when either is
    /// missing.
    fn locate_columns(&self, grid: &RawGrid) -> ColumnLayout {
        let mut may_hit: Option<(usize, usize)> = None;
        let mut w1_hit: Option<(usize, usize)> = None;

        for (row_idx, row) in grid.iter().take(HEADER_SCAN_ROWS).enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                let lowered = cell.to_lowercase();
                if may_hit.is_none() && lowered.contains(&self.month_token) {
                    may_hit = Some((row_idx, col_idx));
                }
                if w1_hit.is_none() && lowered.contains(&self.week_token) {
                    w1_hit = Some((row_idx, col_idx));
                }
            }
        }

        // Each column falls back to its structural default
        // independently when its token is missing.
        let header_row = [may_hit, w1_hit]
            .iter()
            .flatten()
            .map(|(row, _)| *row)
            .max()
            .unwrap_or(0);

        ColumnLayout {
            may_column: may_hit.map(|(_, col)| col).unwrap_or(FALLBACK_MAY_COLUMN),
            w1_column: w1_hit.map(|(_, col)| col).unwrap_or(FALLBACK_W1_COLUMN),
            header_row,
            column_fallback: may_hit.is_none() || w1_hit.is_none(),
        }
    }

    fn number_at(&self, row: &[String], idx: usize) -> f64 {
        row.get(idx)
            .and_then(|raw| self.cleaner.parse_number(raw))
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy)]
struct ColumnLayout {
    may_column: usize,
    w1_column: usize,
    header_row: usize,
    column_fallback: bool,
}
