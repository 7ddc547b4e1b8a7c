//! Read-only spreadsheet tools

use std::sync::Arc;

use crate::prelude::*;
use crate::sheets::manager::WorkbookManager;

/// Input naming one spreadsheet
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SpreadsheetIdInput {
    /// ID of the spreadsheet
    pub spreadsheet_id: String,
}

/// Tool for reading a spreadsheet's full contents
pub struct GetSpreadsheetTool {
    manager: Arc<WorkbookManager>,
}

impl GetSpreadsheetTool {
    pub fn new(manager: Arc<WorkbookManager>) -> Self {
        Self { manager }
    }
}

impl Tool for GetSpreadsheetTool {
    type Input = SpreadsheetIdInput;

    fn name(&self) -> &str {
        "get_spreadsheet"
    }

    fn description(&self) -> &str {
        "Get the full contents of a spreadsheet: every sheet, cell value, and note."
    }

    async fn execute(&self, input: Self::Input) -> Result<ToolResult, ToolError> {
        let spreadsheet = self.manager.get(&input.spreadsheet_id)?;
        Ok(ToolResult::Json(serde_json::to_value(spreadsheet)?))
    }
}

/// Tool for reading a spreadsheet's metadata without cell contents
pub struct GetSpreadsheetMetadataTool {
    manager: Arc<WorkbookManager>,
}

impl GetSpreadsheetMetadataTool {
    pub fn new(manager: Arc<WorkbookManager>) -> Self {
        Self { manager }
    }
}

impl Tool for GetSpreadsheetMetadataTool {
    type Input = SpreadsheetIdInput;

    fn name(&self) -> &str {
        "get_spreadsheet_metadata"
    }

    fn description(&self) -> &str {
        "Get a spreadsheet's title, sheet names, cell count, and timestamps without its contents."
    }

    async fn execute(&self, input: Self::Input) -> Result<ToolResult, ToolError> {
        let metadata = self.manager.metadata(&input.spreadsheet_id)?;
        Ok(ToolResult::Json(serde_json::to_value(metadata)?))
    }
}

/// Input for a title search
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchSpreadsheetsInput {
    /// Text to match against spreadsheet titles (case-insensitive).
    /// An empty query lists every spreadsheet.
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize)]
struct SearchOutcome {
    matches: Vec<crate::sheets::manager::SpreadsheetMetadata>,
}

/// Tool for finding spreadsheets by title
pub struct SearchSpreadsheetsTool {
    manager: Arc<WorkbookManager>,
}

impl SearchSpreadsheetsTool {
    pub fn new(manager: Arc<WorkbookManager>) -> Self {
        Self { manager }
    }
}

impl Tool for SearchSpreadsheetsTool {
    type Input = SearchSpreadsheetsInput;

    fn name(&self) -> &str {
        "search_spreadsheets"
    }

    fn description(&self) -> &str {
        "Search spreadsheets by title. Returns metadata for every match; an empty query lists all."
    }

    async fn execute(&self, input: Self::Input) -> Result<ToolResult, ToolError> {
        let matches = self.manager.search(&input.query);
        Ok(ToolResult::Json(serde_json::to_value(SearchOutcome {
            matches,
        })?))
    }
}
