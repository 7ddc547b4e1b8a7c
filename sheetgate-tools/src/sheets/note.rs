//! Cell annotation tool

use std::sync::Arc;

use crate::prelude::*;
use crate::sheets::manager::WorkbookManager;

/// Input for attaching a note to a cell
#[derive(Debug, Deserialize, JsonSchema)]
pub struct AddNoteToCellInput {
    /// ID of the spreadsheet to annotate
    pub spreadsheet_id: String,

    /// Sheet name. Defaults to the spreadsheet's first sheet.
    #[serde(default)]
    pub sheet: Option<String>,

    /// Cell reference in A1 notation (e.g. "B2")
    pub cell: String,

    /// Note text to attach. Replaces any existing note on the cell.
    pub note: String,
}

#[derive(Debug, Serialize)]
struct NoteOutcome {
    status: String,
    spreadsheet_id: String,
    cell: String,
}

/// Tool for attaching a note to a cell (requires confirmation)
///
/// The cell's value is untouched; a cell that does not exist yet is created
/// empty so the note has somewhere to live.
pub struct AddNoteToCellTool {
    manager: Arc<WorkbookManager>,
}

impl AddNoteToCellTool {
    pub fn new(manager: Arc<WorkbookManager>) -> Self {
        Self { manager }
    }
}

impl Tool for AddNoteToCellTool {
    type Input = AddNoteToCellInput;

    fn name(&self) -> &str {
        "add_note_to_cell"
    }

    fn description(&self) -> &str {
        "Attach a text note to a cell of a spreadsheet. Replaces any existing note on that cell."
    }

    fn sensitive(&self) -> bool {
        true
    }

    async fn execute(&self, input: Self::Input) -> Result<ToolResult, ToolError> {
        let cell = self.manager.add_note(
            &input.spreadsheet_id,
            input.sheet.as_deref(),
            &input.cell,
            &input.note,
        )?;

        Ok(ToolResult::Json(serde_json::to_value(NoteOutcome {
            status: "success".to_string(),
            spreadsheet_id: input.spreadsheet_id,
            cell,
        })?))
    }
}
