//! Spreadsheet tools over an in-memory workbook store.
//!
//! All tools share a [`WorkbookManager`]; construct one, wrap it in an `Arc`,
//! and hand it to each tool (or use the grouping functions below).
//!
//! # Sensitivity
//!
//! Mutating tools are marked sensitive, so the confirmation gate asks the
//! operator before each invocation:
//!
//! | Tool | Sensitive |
//! |------|-----------|
//! | [`CreateSpreadsheetTool`] | yes |
//! | [`WriteToCellTool`] | yes |
//! | [`AddNoteToCellTool`] | yes |
//! | [`UpdateCellsTool`] | yes |
//! | [`GetSpreadsheetTool`] | no |
//! | [`GetSpreadsheetMetadataTool`] | no |
//! | [`SearchSpreadsheetsTool`] | no |
//! | [`WhoAmITool`] | no |

mod create;
mod error;
mod manager;
mod note;
mod read;
mod whoami;
mod write;

pub use create::CreateSpreadsheetTool;
pub use error::SheetToolError;
pub use manager::{
    normalize_cell_ref, Cell, Sheet, Spreadsheet, SpreadsheetMetadata, WorkbookManager,
    DEFAULT_SHEET,
};
pub use note::AddNoteToCellTool;
pub use read::{GetSpreadsheetMetadataTool, GetSpreadsheetTool, SearchSpreadsheetsTool};
pub use whoami::WhoAmITool;
pub use write::{UpdateCellsTool, WriteToCellTool};

use std::sync::Arc;

use sheetgate_core::{box_tool, DynTool};

/// All read-only tools over the given manager
pub fn read_only_tools(manager: Arc<WorkbookManager>, user_id: &str) -> Vec<Box<dyn DynTool>> {
    vec![
        box_tool(GetSpreadsheetTool::new(manager.clone())),
        box_tool(GetSpreadsheetMetadataTool::new(manager.clone())),
        box_tool(SearchSpreadsheetsTool::new(manager)),
        box_tool(WhoAmITool::new(user_id)),
    ]
}

/// All mutating tools over the given manager
pub fn mutative_tools(manager: Arc<WorkbookManager>) -> Vec<Box<dyn DynTool>> {
    vec![
        box_tool(CreateSpreadsheetTool::new(manager.clone())),
        box_tool(WriteToCellTool::new(manager.clone())),
        box_tool(AddNoteToCellTool::new(manager.clone())),
        box_tool(UpdateCellsTool::new(manager)),
    ]
}

/// The complete toolkit over the given manager
pub fn all_tools(manager: Arc<WorkbookManager>, user_id: &str) -> Vec<Box<dyn DynTool>> {
    let mut tools = read_only_tools(manager.clone(), user_id);
    tools.extend(mutative_tools(manager));
    tools
}
