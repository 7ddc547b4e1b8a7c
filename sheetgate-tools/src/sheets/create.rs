//! Spreadsheet creation tool

use std::sync::Arc;

use crate::prelude::*;
use crate::sheets::manager::WorkbookManager;

/// Input for spreadsheet creation
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateSpreadsheetInput {
    /// Title of the new spreadsheet
    pub title: String,
}

/// Tool for creating a new spreadsheet (requires confirmation)
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use sheetgate_core::box_tool;
/// use sheetgate_tools::sheets::{CreateSpreadsheetTool, WorkbookManager};
///
/// # tokio_test::block_on(async {
/// let manager = Arc::new(WorkbookManager::new());
/// let tool = box_tool(CreateSpreadsheetTool::new(manager));
///
/// let input = serde_json::json!({"title": "Q1 Budget"});
/// let result = tool.execute_raw(input).await.unwrap();
/// assert!(result.as_text().contains("Q1 Budget"));
/// # });
/// ```
pub struct CreateSpreadsheetTool {
    manager: Arc<WorkbookManager>,
}

impl CreateSpreadsheetTool {
    pub fn new(manager: Arc<WorkbookManager>) -> Self {
        Self { manager }
    }
}

impl Tool for CreateSpreadsheetTool {
    type Input = CreateSpreadsheetInput;

    fn name(&self) -> &str {
        "create_spreadsheet"
    }

    fn description(&self) -> &str {
        "Create a new spreadsheet with the given title. The spreadsheet starts with a single empty sheet."
    }

    fn sensitive(&self) -> bool {
        true
    }

    async fn execute(&self, input: Self::Input) -> Result<ToolResult, ToolError> {
        let metadata = self.manager.create(&input.title)?;
        Ok(ToolResult::Json(serde_json::to_value(metadata)?))
    }
}
