//! Ready-to-use spreadsheet tools for the sheetgate agent.
//!
//! Tools operate against an in-memory [`sheets::WorkbookManager`]; share one
//! manager across the toolkit so every tool sees the same workbooks.

pub mod sheets;

// Re-export tool grouping functions at crate root for convenience
pub use sheets::{
    all_tools as all_sheet_tools, mutative_tools as mutative_sheet_tools,
    read_only_tools as read_only_sheet_tools,
};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use schemars::JsonSchema;
    pub use serde::{Deserialize, Serialize};
    pub use sheetgate_core::{Tool, ToolError, ToolResult};
}
