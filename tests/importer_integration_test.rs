// ==========================================
// Production Target Allocation - Importer Integration Tests
// ==========================================
// Importers over real files: universal parser + header
// discovery + row filtering working together.
// ==========================================

use pipe_production_planner::importer::{
    HistoricalImporter, ImportError, TargetImporter, UniversalFileParser,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn csv_file(lines: &[&str]) -> NamedTempFile {
    let mut temp_file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("create temp csv");
    for line in lines {
        writeln!(temp_file, "{}", line).expect("write temp csv");
    }
    temp_file
}

fn target_importer() -> TargetImporter {
    TargetImporter::new("may", "w1")
}

// ==========================================
// Historical sheet over files
// ==========================================

#[test]
fn test_historical_file_with_shifted_header() {
    // Export tools prepend a title block; the header sits at
    // row 2 here.
    let file = csv_file(&[
        "Shipment Summary 2025,,,",
        ",,,",
        "BRANDPRODUCT,Item Code,Item Name,TON",
        "SCG-PI,A1,Pipe 1in,80",
        "SCG-BV,V1,Ball Valve 1in,15.5",
    ]);

    let grid = UniversalFileParser.parse(file.path()).unwrap();
    let result = HistoricalImporter::new().import(&grid).unwrap();

    assert_eq!(result.header_offset, 2);
    assert_eq!(result.records.len(), 2);
    assert_eq!(result.records[1].brand, "SCG-BV");
    assert_eq!(result.records[1].tonnage, 15.5);
}

#[test]
fn test_historical_file_with_type_noise() {
    let file = csv_file(&[
        "BRANDPRODUCT,Item Code,Item Name,TON",
        "SCG-PI,A1,Pipe 1in,\"2,450.5\"",
        "SCG-PI,A2,Pipe 2in,n/a",
        "nan,A3,Pipe 3in,10",
        "SCG-PI,,Pipe 4in,10",
    ]);

    let grid = UniversalFileParser.parse(file.path()).unwrap();
    let result = HistoricalImporter::new().import(&grid).unwrap();

    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].tonnage, 2450.5);
    assert_eq!(result.stats.total_rows, 4);
    assert_eq!(result.stats.kept, 1);
    assert_eq!(result.stats.dropped_invalid_tonnage, 1);
    assert_eq!(result.stats.dropped_missing_key, 2);
}

#[test]
fn test_historical_file_without_header_fails_typed() {
    let file = csv_file(&["no,header,here", "1,2,3", "4,5,6", "7,8,9"]);

    let grid = UniversalFileParser.parse(file.path()).unwrap();
    let result = HistoricalImporter::new().import(&grid);

    assert!(matches!(result, Err(ImportError::NoValidHeader { .. })));
}

#[test]
fn test_unsupported_extension_rejected() {
    let result = UniversalFileParser.parse("shipments.txt");
    assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
}

// ==========================================
// Target sheet over files
// ==========================================

#[test]
fn test_target_file_with_detected_columns() {
    let file = csv_file(&[
        "Monthly Sales Targets,,",
        "Category,Target May (tons),Target W1 (tons)",
        ",,",
        "MFG SCG Pipe,\"1,200\",300",
        "MFG Mizu Fitting,90,30",
        "Grand Total,\"1,290\",330",
    ]);

    let grid = UniversalFileParser.parse(file.path()).unwrap();
    let result = target_importer().import(&grid).unwrap();

    assert!(!result.column_fallback);
    assert_eq!(result.header_row, 1);
    assert_eq!(result.table.len(), 2);
    assert_eq!(result.table.get("MFG SCG Pipe").unwrap().may_target, 1200.0);
    // The "Grand Total" row ends the data block
    assert!(result.table.get("Grand Total").is_none());
}

#[test]
fn test_target_file_falls_back_to_structural_columns() {
    let file = csv_file(&[
        "Category,Target A,Target B",
        ",,",
        "MFG SCG Pipe,200,50",
        "MFG Icon Pipe,80,20",
    ]);

    let grid = UniversalFileParser.parse(file.path()).unwrap();
    let result = target_importer().import(&grid).unwrap();

    assert!(result.column_fallback);
    assert_eq!(result.may_column, 1);
    assert_eq!(result.w1_column, 2);
    assert_eq!(result.table.len(), 2);
}

#[test]
fn test_target_file_too_small_fails_typed() {
    let file = csv_file(&["Category,May,W1", "MFG SCG Pipe,200,50"]);

    let grid = UniversalFileParser.parse(file.path()).unwrap();
    let result = target_importer().import(&grid);

    assert!(matches!(result, Err(ImportError::InsufficientData { .. })));
}
