// ==========================================
// Production Target Allocation - Importer Error Types
// ==========================================
// Tool: thiserror derive macro
// All variants are typed, recoverable-at-the-boundary
// failures; a malformed sheet never yields a partial table.
// ==========================================

use thiserror::Error;

/// Importer layer error type
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== File errors =====
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("unsupported file format: {0} (only .xlsx/.xls/.csv)")]
    UnsupportedFormat(String),

    #[error("file read failed: {0}")]
    FileReadError(String),

    #[error("Excel parse failed: {0}")]
    ExcelParseError(String),

    #[error("CSV parse failed: {0}")]
    CsvParseError(String),

    // ===== Historical sheet errors =====
    #[error("no valid header row found in historical sheet (tried offsets {tried:?}, need {required} of {total} known columns)")]
    NoValidHeader {
        tried: Vec<usize>,
        required: usize,
        total: usize,
    },

    #[error("historical sheet is missing required columns: {missing:?}")]
    MissingColumns { missing: Vec<String> },

    #[error("historical sheet contains no valid shipment rows after filtering ({dropped} rows dropped)")]
    NoValidRecords { dropped: usize },

    // ===== Target sheet errors =====
    #[error("target sheet has too few rows to contain data ({rows} rows, need at least {min})")]
    InsufficientData { rows: usize, min: usize },

    #[error("target sheet yielded no category rows")]
    NoCategories,

    // ===== Generic =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result type alias
pub type ImportResult<T> = Result<T, ImportError>;
