//! Cell mutation tools

use std::collections::HashMap;
use std::sync::Arc;

use crate::prelude::*;
use crate::sheets::manager::WorkbookManager;

/// Input for writing a single cell
#[derive(Debug, Deserialize, JsonSchema)]
pub struct WriteToCellInput {
    /// ID of the spreadsheet to modify
    pub spreadsheet_id: String,

    /// Sheet name. Defaults to the spreadsheet's first sheet.
    #[serde(default)]
    pub sheet: Option<String>,

    /// Cell reference in A1 notation (e.g. "B2")
    pub cell: String,

    /// Value to write
    pub value: String,
}

/// Write result reported back to the model
#[derive(Debug, Serialize)]
struct WriteOutcome {
    status: String,
    spreadsheet_id: String,
    cells_written: Vec<String>,
}

/// Tool for writing one cell value (requires confirmation)
pub struct WriteToCellTool {
    manager: Arc<WorkbookManager>,
}

impl WriteToCellTool {
    pub fn new(manager: Arc<WorkbookManager>) -> Self {
        Self { manager }
    }
}

impl Tool for WriteToCellTool {
    type Input = WriteToCellInput;

    fn name(&self) -> &str {
        "write_to_cell"
    }

    fn description(&self) -> &str {
        "Write a value into a single cell of a spreadsheet, identified by A1 notation."
    }

    fn sensitive(&self) -> bool {
        true
    }

    async fn execute(&self, input: Self::Input) -> Result<ToolResult, ToolError> {
        let written = self.manager.write_cell(
            &input.spreadsheet_id,
            input.sheet.as_deref(),
            &input.cell,
            &input.value,
        )?;

        Ok(ToolResult::Json(serde_json::to_value(WriteOutcome {
            status: "success".to_string(),
            spreadsheet_id: input.spreadsheet_id,
            cells_written: vec![written],
        })?))
    }
}

/// Input for a bulk cell update
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateCellsInput {
    /// ID of the spreadsheet to modify
    pub spreadsheet_id: String,

    /// Sheet name. Defaults to the spreadsheet's first sheet.
    #[serde(default)]
    pub sheet: Option<String>,

    /// Cell values keyed by A1 reference (e.g. {"B2": "42", "C3": "done"})
    pub cells: HashMap<String, String>,
}

/// Tool for writing several cells in one operation (requires confirmation)
///
/// The update is atomic: one invalid reference rejects the whole batch.
pub struct UpdateCellsTool {
    manager: Arc<WorkbookManager>,
}

impl UpdateCellsTool {
    pub fn new(manager: Arc<WorkbookManager>) -> Self {
        Self { manager }
    }
}

impl Tool for UpdateCellsTool {
    type Input = UpdateCellsInput;

    fn name(&self) -> &str {
        "update_cells"
    }

    fn description(&self) -> &str {
        "Write values into several cells of a spreadsheet at once. Cells are keyed by A1 reference."
    }

    fn sensitive(&self) -> bool {
        true
    }

    async fn execute(&self, input: Self::Input) -> Result<ToolResult, ToolError> {
        let written = self.manager.update_cells(
            &input.spreadsheet_id,
            input.sheet.as_deref(),
            &input.cells,
        )?;

        Ok(ToolResult::Json(serde_json::to_value(WriteOutcome {
            status: "success".to_string(),
            spreadsheet_id: input.spreadsheet_id,
            cells_written: written,
        })?))
    }
}
