//! Identity tool

use crate::prelude::*;

/// Input for the identity lookup (takes no parameters)
#[derive(Debug, Deserialize, JsonSchema)]
pub struct WhoAmIInput {}

#[derive(Debug, Serialize)]
struct Identity<'a> {
    user_id: &'a str,
}

/// Tool reporting which user the session's grants belong to
pub struct WhoAmITool {
    user_id: String,
}

impl WhoAmITool {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

impl Tool for WhoAmITool {
    type Input = WhoAmIInput;

    fn name(&self) -> &str {
        "who_am_i"
    }

    fn description(&self) -> &str {
        "Report the user ID this session is operating on behalf of."
    }

    async fn execute(&self, _input: Self::Input) -> Result<ToolResult, ToolError> {
        Ok(ToolResult::Json(serde_json::to_value(Identity {
            user_id: &self.user_id,
        })?))
    }
}
