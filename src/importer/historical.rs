// ==========================================
// Production Target Allocation - Historical Sheet Importer
// ==========================================
// Responsibility: header discovery + row validation for the
// historical shipment sheet. The export tool that produces
// this sheet shifts its header row between versions, so the
// header offset is discovered by scoring candidate rows
// against the known column labels.
// ==========================================

use crate::domain::shipment::{HistoricalRecord, IngestStats};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::RawGrid;
use tracing::{debug, info};

// Required column labels as the export tool writes them.
const COL_BRAND: &str = "BRANDPRODUCT";
const COL_SKU_CODE: &str = "ITEM CODE";
const COL_TONNAGE: &str = "TON";
const COL_SKU_NAME: &str = "ITEM NAME";

const REQUIRED_COLUMNS: [&str; 4] = [COL_BRAND, COL_SKU_CODE, COL_TONNAGE, COL_SKU_NAME];

// Header row candidates, tried in order.
const HEADER_OFFSETS: [usize; 3] = [0, 1, 2];

// A candidate header row qualifies when it matches at least
// this many of the required labels.
const MIN_HEADER_MATCHES: usize = 3;

/// Normalized historical sheet plus ingestion accounting.
#[derive(Debug, Clone)]
pub struct HistoricalImport {
    pub records: Vec<HistoricalRecord>,
    pub stats: IngestStats,
    /// Row index the header was found at.
    pub header_offset: usize,
}

/// Column positions resolved during header discovery.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    brand: usize,
    sku_code: usize,
    tonnage: usize,
    sku_name: usize,
}

pub struct HistoricalImporter {
    cleaner: DataCleaner,
}

impl HistoricalImporter {
    pub fn new() -> Self {
        Self { cleaner: DataCleaner }
    }

    /// Normalize a raw historical sheet into shipment records.
    ///
    /// Fails with a typed error rather than returning a
    /// partial or empty table as if it were valid.
    pub fn import(&self, grid: &RawGrid) -> ImportResult<HistoricalImport> {
        let (header_offset, header_row) = self.discover_header(grid)?;
        let columns = self.resolve_columns(header_row)?;

        debug!(
            header_offset,
            brand_col = columns.brand,
            sku_code_col = columns.sku_code,
            tonnage_col = columns.tonnage,
            "historical header resolved"
        );

        let mut records = Vec::new();
        let mut stats = IngestStats::default();

        for row in grid.iter().skip(header_offset + 1) {
            stats.total_rows += 1;

            let brand = self.cell(row, columns.brand);
            let sku_code = self.cell(row, columns.sku_code);
            let (brand, sku_code) = match (brand, sku_code) {
                (Some(b), Some(s)) => (b, s),
                _ => {
                    stats.dropped_missing_key += 1;
                    continue;
                }
            };

            let tonnage = row
                .get(columns.tonnage)
                .and_then(|raw| self.cleaner.parse_number(raw));
            let tonnage = match tonnage {
                Some(t) if t > 0.0 => t,
                _ => {
                    stats.dropped_invalid_tonnage += 1;
                    continue;
                }
            };

            let sku_name = self.cell(row, columns.sku_name).unwrap_or_default();

            stats.kept += 1;
            records.push(HistoricalRecord {
                brand,
                sku_code,
                sku_name,
                tonnage,
            });
        }

        if records.is_empty() {
            return Err(ImportError::NoValidRecords {
                dropped: stats.dropped(),
            });
        }

        info!(
            kept = stats.kept,
            dropped = stats.dropped(),
            header_offset,
            "historical sheet imported"
        );

        Ok(HistoricalImport {
            records,
            stats,
            header_offset,
        })
    }

    /// Try each candidate offset in order; accept the first
    /// whose row matches enough required labels.
    fn discover_header<'a>(&self, grid: &'a RawGrid) -> ImportResult<(usize, &'a [String])> {
        for &offset in HEADER_OFFSETS.iter() {
            let Some(row) = grid.get(offset) else { break };
            let score = REQUIRED_COLUMNS
                .iter()
                .filter(|label| self.find_column(row, label).is_some())
                .count();
            debug!(offset, score, "header candidate scored");
            if score >= MIN_HEADER_MATCHES {
                return Ok((offset, row.as_slice()));
            }
        }

        Err(ImportError::NoValidHeader {
            tried: HEADER_OFFSETS.to_vec(),
            required: MIN_HEADER_MATCHES,
            total: REQUIRED_COLUMNS.len(),
        })
    }

    /// Map every required label to a column index; after a
    /// header row qualified, all four must resolve.
    fn resolve_columns(&self, header_row: &[String]) -> ImportResult<ColumnMap> {
        let mut missing = Vec::new();
        let mut lookup = |label: &str| match self.find_column(header_row, label) {
            Some(idx) => idx,
            None => {
                missing.push(label.to_string());
                usize::MAX
            }
        };

        let columns = ColumnMap {
            brand: lookup(COL_BRAND),
            sku_code: lookup(COL_SKU_CODE),
            tonnage: lookup(COL_TONNAGE),
            sku_name: lookup(COL_SKU_NAME),
        };

        if missing.is_empty() {
            Ok(columns)
        } else {
            Err(ImportError::MissingColumns { missing })
        }
    }

    /// Case-insensitive substring match of a required label
    /// against the header cells; first hit wins.
    fn find_column(&self, header_row: &[String], label: &str) -> Option<usize> {
        header_row
            .iter()
            .position(|cell| cell.to_uppercase().contains(label))
    }

    fn cell(&self, row: &[String], idx: usize) -> Option<String> {
        row.get(idx).and_then(|raw| self.cleaner.normalize_cell(raw))
    }
}

impl Default for HistoricalImporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> RawGrid {
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    fn standard_grid() -> RawGrid {
        grid(&[
            &["BRANDPRODUCT", "Item Code", "Item Name", "TON"],
            &["SCG-PI", "A1", "Pipe 1in", "80"],
            &["SCG-PI", "A2", "Pipe 2in", "20"],
        ])
    }

    #[test]
    fn test_import_header_at_offset_zero() {
        let result = HistoricalImporter::new().import(&standard_grid()).unwrap();

        assert_eq!(result.header_offset, 0);
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[0].brand, "SCG-PI");
        assert_eq!(result.records[0].sku_code, "A1");
        assert_eq!(result.records[0].sku_name, "Pipe 1in");
        assert_eq!(result.records[0].tonnage, 80.0);
    }

    #[test]
    fn test_import_header_at_offset_two() {
        let shifted = grid(&[
            &["Shipment Report 2025", "", "", ""],
            &["", "", "", ""],
            &["BRANDPRODUCT", "Item Code", "Item Name", "TON"],
            &["MIZU-PI", "M1", "Mizu Pipe", "40"],
        ]);

        let result = HistoricalImporter::new().import(&shifted).unwrap();

        assert_eq!(result.header_offset, 2);
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].brand, "MIZU-PI");
    }

    #[test]
    fn test_header_matches_are_case_insensitive_substrings() {
        let noisy = grid(&[
            &["brandproduct code", "item code (sku)", "item name", "tonnage"],
            &["SCG-FT", "F1", "Fitting", "10"],
        ]);

        let result = HistoricalImporter::new().import(&noisy).unwrap();

        assert_eq!(result.records[0].sku_code, "F1");
        assert_eq!(result.records[0].tonnage, 10.0);
    }

    #[test]
    fn test_no_valid_header() {
        let junk = grid(&[
            &["a", "b", "c"],
            &["d", "e", "f"],
            &["g", "h", "i"],
            &["j", "k", "l"],
        ]);

        let result = HistoricalImporter::new().import(&junk);

        assert!(matches!(result, Err(ImportError::NoValidHeader { .. })));
    }

    #[test]
    fn test_three_of_four_qualifies_then_missing_column_reported() {
        // Header qualifies with 3 matches but the sheet never
        // names the SKU, so normalization must still fail.
        let partial = grid(&[
            &["BRANDPRODUCT", "TON", "Item Name"],
            &["SCG-PI", "80", "Pipe 1in"],
        ]);

        let result = HistoricalImporter::new().import(&partial);

        match result {
            Err(ImportError::MissingColumns { missing }) => {
                assert_eq!(missing, vec!["ITEM CODE".to_string()]);
            }
            other => panic!("expected MissingColumns, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_rows_with_bad_tonnage_dropped() {
        let mixed = grid(&[
            &["BRANDPRODUCT", "Item Code", "Item Name", "TON"],
            &["SCG-PI", "A1", "Pipe 1in", "1,250.5"],
            &["SCG-PI", "A2", "Pipe 2in", "0"],
            &["SCG-PI", "A3", "Pipe 3in", "-5"],
            &["SCG-PI", "A4", "Pipe 4in", "junk"],
        ]);

        let result = HistoricalImporter::new().import(&mixed).unwrap();

        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].tonnage, 1250.5);
        assert_eq!(result.stats.dropped_invalid_tonnage, 3);
    }

    #[test]
    fn test_rows_with_missing_keys_dropped() {
        let mixed = grid(&[
            &["BRANDPRODUCT", "Item Code", "Item Name", "TON"],
            &["", "A1", "Pipe 1in", "80"],
            &["nan", "A2", "Pipe 2in", "20"],
            &["SCG-PI", "  ", "Pipe 3in", "30"],
            &["SCG-PI", "A4", "Pipe 4in", "30"],
        ]);

        let result = HistoricalImporter::new().import(&mixed).unwrap();

        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].sku_code, "A4");
        assert_eq!(result.stats.dropped_missing_key, 3);
        assert_eq!(result.stats.total_rows, 4);
    }

    #[test]
    fn test_all_rows_filtered_is_no_valid_records() {
        let empty = grid(&[
            &["BRANDPRODUCT", "Item Code", "Item Name", "TON"],
            &["SCG-PI", "A1", "Pipe 1in", "0"],
        ]);

        let result = HistoricalImporter::new().import(&empty);

        assert!(matches!(
            result,
            Err(ImportError::NoValidRecords { dropped: 1 })
        ));
    }
}
