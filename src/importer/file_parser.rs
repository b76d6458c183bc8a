// ==========================================
// Production Target Allocation - File Parser
// ==========================================
// Responsibility: read a spreadsheet into a raw positional
// cell grid. No header interpretation happens here: both
// input sheets have unknown header positions, so the
// normalizers downstream do their own header discovery.
// Supports: Excel (.xlsx/.xls) / CSV (.csv)
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;

/// A sheet as rows of trimmed cell strings, positions intact.
pub type RawGrid = Vec<Vec<String>>;

// ==========================================
// CSV parser
// ==========================================
pub struct CsvParser;

impl CsvParser {
    pub fn parse_to_grid(&self, file_path: &Path) -> ImportResult<RawGrid> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false) // header position is unknown, keep every row
            .flexible(true)
            .from_reader(file);

        let mut grid = Vec::new();
        for result in reader.records() {
            let record = result?;
            let row: Vec<String> = record.iter().map(|cell| cell.trim().to_string()).collect();
            grid.push(row);
        }

        Ok(grid)
    }
}

// ==========================================
// Excel parser
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    pub fn parse_to_grid(&self, file_path: &Path) -> ImportResult<RawGrid> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let mut workbook = open_workbook_auto(file_path)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        // First sheet only: both business files are single-sheet
        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("workbook has no sheets".to_string()))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        let mut grid = Vec::new();
        for data_row in range.rows() {
            let row: Vec<String> = data_row
                .iter()
                .map(|cell| cell.to_string().trim().to_string())
                .collect();
            grid.push(row);
        }

        Ok(grid)
    }
}

// ==========================================
// Universal file parser (chooses by extension)
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<RawGrid> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_to_grid(path),
            "xlsx" | "xls" => ExcelParser.parse_to_grid(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(lines: &[&str]) -> NamedTempFile {
        let mut temp_file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        for line in lines {
            writeln!(temp_file, "{}", line).unwrap();
        }
        temp_file
    }

    #[test]
    fn test_csv_parser_keeps_all_rows() {
        let temp_file = csv_file(&["junk,,", "BRANDPRODUCT,Item Code,TON", "SCG-PI,A1,80"]);

        let grid = CsvParser.parse_to_grid(temp_file.path()).unwrap();

        // Pre-header junk rows must survive for header discovery
        assert_eq!(grid.len(), 3);
        assert_eq!(grid[1][0], "BRANDPRODUCT");
        assert_eq!(grid[2][2], "80");
    }

    #[test]
    fn test_csv_parser_trims_cells() {
        let temp_file = csv_file(&["  SCG-PI , A1 , 80 "]);

        let grid = CsvParser.parse_to_grid(temp_file.path()).unwrap();

        assert_eq!(grid[0], vec!["SCG-PI", "A1", "80"]);
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_to_grid(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_universal_parser_rejects_unknown_extension() {
        let result = UniversalFileParser.parse("targets.pdf");
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }
}
