use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result types that tools can return
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ToolResult {
    /// Plain text response
    Text(String),

    /// Structured JSON data
    Json(Value),
}

impl ToolResult {
    /// Create a JSON result from any serializable type
    pub fn json<T: Serialize>(value: T) -> Result<Self, serde_json::Error> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    /// Create a text result from a string
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Get the text content, or a string rendering of JSON content
    pub fn as_text(&self) -> String {
        match self {
            ToolResult::Text(s) => s.clone(),
            ToolResult::Json(v) => v.to_string(),
        }
    }

    /// Get a reference to the text content if this is a Text variant
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ToolResult::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<String> for ToolResult {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for ToolResult {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Errors that can occur during tool execution.
///
/// The gate and the agent turn loop treat these as an opaque passthrough:
/// a failing tool's error is fed back to the model unmodified, never retried
/// or masked.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Custom(String),
}

impl From<String> for ToolError {
    fn from(s: String) -> Self {
        Self::Custom(s)
    }
}

impl From<&str> for ToolError {
    fn from(s: &str) -> Self {
        Self::Custom(s.to_string())
    }
}

/// Trait for implementing tools that can be offered to an agent.
///
/// Tools define an input type with `#[derive(Deserialize, JsonSchema)]` so the
/// JSON schema sent to the model is generated from the Rust type.
///
/// Tools whose execution has side effects the operator must vouch for override
/// [`Tool::sensitive`] to return `true`; every invocation of such a tool is
/// then intercepted by the confirmation gate. Sensitivity is static
/// configuration, decided when the tool is written, not derived at runtime.
///
/// # Example
///
/// ```rust
/// use sheetgate_core::{Tool, ToolResult, ToolError};
/// use schemars::JsonSchema;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, JsonSchema)]
/// struct EchoInput {
///     /// Text to echo back
///     message: String,
/// }
///
/// struct EchoTool;
///
/// impl Tool for EchoTool {
///     type Input = EchoInput;
///
///     fn name(&self) -> &str { "echo" }
///     fn description(&self) -> &str { "Echo the input back" }
///
///     async fn execute(&self, input: Self::Input) -> Result<ToolResult, ToolError> {
///         Ok(input.message.into())
///     }
/// }
/// ```
pub trait Tool: Send + Sync {
    /// The input type for this tool. Must implement `Deserialize` and `JsonSchema`.
    type Input: DeserializeOwned + JsonSchema;

    /// The name of the tool (e.g. "write_to_cell")
    fn name(&self) -> &str;

    /// A description of what the tool does
    fn description(&self) -> &str;

    /// Whether invocations of this tool require human confirmation
    fn sensitive(&self) -> bool {
        false
    }

    /// Execute the tool with typed input
    fn execute(
        &self,
        input: Self::Input,
    ) -> impl std::future::Future<Output = Result<ToolResult, ToolError>> + Send;

    /// Get the JSON schema for this tool's input.
    ///
    /// Automatically implemented from the `JsonSchema` derive on `Input`.
    fn input_schema(&self) -> Value {
        let schema = schemars::schema_for!(Self::Input);
        serde_json::to_value(schema).expect("Failed to serialize schema")
    }
}

/// Object-safe trait for dynamic tool dispatch (used internally by the agent).
///
/// Users should implement `Tool` instead and use [`box_tool`] to convert.
pub trait DynTool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn sensitive(&self) -> bool;
    fn input_schema(&self) -> Value;
    fn execute_raw(
        &self,
        input: Value,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<ToolResult, ToolError>> + Send + '_>,
    >;
}

/// Convert a `Tool` into a type-erased `Box<dyn DynTool>` for storage in collections.
pub fn box_tool<T: Tool + 'static>(tool: T) -> Box<dyn DynTool> {
    Box::new(ToolWrapper(tool))
}

/// Create a `Vec<Box<dyn DynTool>>` from heterogeneous tool types.
#[macro_export]
macro_rules! box_tools {
    ($($tool:expr),* $(,)?) => {
        vec![$($crate::tool::box_tool($tool)),*]
    };
}

/// Internal wrapper that implements DynTool for any Tool
struct ToolWrapper<T>(T);

impl<T: Tool + 'static> DynTool for ToolWrapper<T> {
    fn name(&self) -> &str {
        self.0.name()
    }

    fn description(&self) -> &str {
        self.0.description()
    }

    fn sensitive(&self) -> bool {
        self.0.sensitive()
    }

    fn input_schema(&self) -> Value {
        self.0.input_schema()
    }

    fn execute_raw(
        &self,
        input: Value,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<ToolResult, ToolError>> + Send + '_>,
    > {
        Box::pin(async move {
            let typed_input: T::Input = serde_json::from_value(input)
                .map_err(|e| ToolError::Custom(format!("Failed to deserialize input: {}", e)))?;

            self.0.execute(typed_input).await
        })
    }
}

// ============================================================================
// Display helpers
// ============================================================================

const MAX_PARAMS: usize = 10;
const MAX_VALUE_LEN: usize = 80;

/// Format a JSON value for display, with truncation
fn format_value_preview(value: &Value) -> String {
    match value {
        Value::String(s) => {
            if s.len() > MAX_VALUE_LEN {
                // Truncation point must land on a char boundary
                let mut cut = MAX_VALUE_LEN;
                while !s.is_char_boundary(cut) {
                    cut -= 1;
                }
                format!("\"{}…\"", &s[..cut])
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} keys}}", obj.len()),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
    }
}

/// Format tool parameters as plain text
pub fn format_params_plain(tool_name: &str, params: &Value) -> String {
    let mut output = tool_name.to_string();

    if let Some(obj) = params.as_object() {
        for (key, value) in obj.iter().take(MAX_PARAMS) {
            output.push_str(&format!("\n  {}: {}", key, format_value_preview(value)));
        }
        if obj.len() > MAX_PARAMS {
            output.push_str(&format!("\n  … +{} more", obj.len() - MAX_PARAMS));
        }
    }

    output
}

/// Format tool parameters with ANSI colors
pub fn format_params_ansi(tool_name: &str, params: &Value) -> String {
    // Bold tool name, dim keys
    let mut output = format!("\x1b[1m{}\x1b[0m", tool_name);

    if let Some(obj) = params.as_object() {
        for (key, value) in obj.iter().take(MAX_PARAMS) {
            output.push_str(&format!(
                "\n  \x1b[2m{}:\x1b[0m {}",
                key,
                format_value_preview(value)
            ));
        }
        if obj.len() > MAX_PARAMS {
            output.push_str(&format!(
                "\n  \x1b[2m… +{} more\x1b[0m",
                obj.len() - MAX_PARAMS
            ));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value_preview_string_long() {
        let long_string = "x".repeat(100);
        let value = serde_json::json!(long_string);
        let preview = format_value_preview(&value);

        assert!(preview.len() < 100);
        assert!(preview.ends_with("…\""));
    }

    #[test]
    fn test_format_value_preview_truncates_on_char_boundary() {
        // 30 three-byte chars = 90 bytes; byte 80 falls mid-character
        let value = serde_json::json!("€".repeat(30));
        let preview = format_value_preview(&value);

        assert!(preview.ends_with("…\""));
        assert!(preview.len() <= MAX_VALUE_LEN + "\"…\"".len());

        let params = serde_json::json!({"value": "€".repeat(30)});
        let rendered = format_params_ansi("write_to_cell", &params);
        assert!(rendered.contains('…'));
    }

    #[test]
    fn test_format_value_preview_compound() {
        assert_eq!(
            format_value_preview(&serde_json::json!([1, 2, 3])),
            "[3 items]"
        );
        assert_eq!(
            format_value_preview(&serde_json::json!({"a": 1, "b": 2})),
            "{2 keys}"
        );
        assert_eq!(format_value_preview(&serde_json::json!(null)), "null");
        assert_eq!(format_value_preview(&serde_json::json!(42)), "42");
    }

    #[test]
    fn test_format_params_plain() {
        let params = serde_json::json!({"column": "B", "row": 2, "value": "42"});
        let output = format_params_plain("write_to_cell", &params);

        assert!(output.starts_with("write_to_cell"));
        assert!(output.contains("column:"));
        assert!(output.contains("\"B\""));
    }

    #[test]
    fn test_format_params_plain_many_params() {
        let mut obj = serde_json::Map::new();
        for i in 0..15 {
            obj.insert(format!("key{}", i), serde_json::json!(i));
        }
        let params = serde_json::Value::Object(obj);
        let output = format_params_plain("bulk", &params);

        assert!(output.contains("… +"));
        assert!(output.contains("more"));
    }

    #[test]
    fn test_format_params_ansi_has_codes() {
        let params = serde_json::json!({"name": "test"});
        let output = format_params_ansi("my_tool", &params);

        assert!(output.contains("\x1b["));
        assert!(output.contains("my_tool"));
    }

    #[test]
    fn test_tool_result_text() {
        let result = ToolResult::text("done");
        assert_eq!(result.as_text(), "done");
        assert_eq!(result.as_str(), Some("done"));
    }

    #[test]
    fn test_tool_result_json() {
        let result = ToolResult::json(serde_json::json!({"status": "ok"})).unwrap();
        assert!(result.as_str().is_none());
        assert!(result.as_text().contains("ok"));
    }

    #[test]
    fn test_sensitive_defaults_to_false() {
        use schemars::JsonSchema;
        use serde::Deserialize;

        #[derive(Deserialize, JsonSchema)]
        struct EmptyInput {}

        struct PlainTool;
        impl Tool for PlainTool {
            type Input = EmptyInput;
            fn name(&self) -> &str {
                "plain"
            }
            fn description(&self) -> &str {
                "No side effects"
            }
            async fn execute(&self, _input: Self::Input) -> Result<ToolResult, ToolError> {
                Ok("ok".into())
            }
        }

        let boxed = box_tool(PlainTool);
        assert!(!boxed.sensitive());
    }

    #[tokio::test]
    async fn test_execute_raw_rejects_bad_input() {
        use schemars::JsonSchema;
        use serde::Deserialize;

        #[derive(Deserialize, JsonSchema)]
        struct StrictInput {
            #[allow(dead_code)]
            value: String,
        }

        struct StrictTool;
        impl Tool for StrictTool {
            type Input = StrictInput;
            fn name(&self) -> &str {
                "strict"
            }
            fn description(&self) -> &str {
                "Needs a value"
            }
            async fn execute(&self, _input: Self::Input) -> Result<ToolResult, ToolError> {
                Ok("ok".into())
            }
        }

        let boxed = box_tool(StrictTool);
        let err = boxed
            .execute_raw(serde_json::json!({"wrong": 1}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("deserialize"));
    }
}
