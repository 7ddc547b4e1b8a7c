//! Spreadsheet-specific error types

use sheetgate_core::ToolError;
use thiserror::Error;

/// Errors that can occur during spreadsheet tool operations
#[derive(Debug, Error)]
pub enum SheetToolError {
    /// Referenced spreadsheet does not exist
    #[error("Spreadsheet not found: {0}")]
    SpreadsheetNotFound(String),

    /// Referenced sheet does not exist within the spreadsheet
    #[error("Sheet '{sheet}' not found in spreadsheet {spreadsheet_id}")]
    SheetNotFound {
        spreadsheet_id: String,
        sheet: String,
    },

    /// Cell reference could not be parsed (expected A1 notation)
    #[error("Invalid cell reference '{0}': expected A1 notation like B2")]
    InvalidCellRef(String),

    /// Spreadsheet titles must be non-empty
    #[error("Spreadsheet title must not be empty")]
    EmptyTitle,

    /// Bulk update carried no cells
    #[error("Update must include at least one cell")]
    EmptyUpdate,
}

impl From<SheetToolError> for ToolError {
    fn from(err: SheetToolError) -> Self {
        ToolError::Custom(err.to_string())
    }
}
