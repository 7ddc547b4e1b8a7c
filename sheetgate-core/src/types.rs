//! Provider-agnostic conversation types.
//!
//! [`Turn`] and [`TurnHistory`] are the driver-facing view of a conversation:
//! plain user/assistant text, append-only, owned by the run loop. [`Message`]
//! and its content blocks are the richer intra-turn representation exchanged
//! with the model provider (tool use requests, tool results).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role of a turn or message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One exchange unit in the conversation history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Append-only turn history, owned by the run loop driver.
///
/// The only parties that may mutate it are the driver (user/assistant turns)
/// and the cancellation reconciler (its fixed three-turn fragment). There is
/// deliberately no removal or truncation API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnHistory {
    turns: Vec<Turn>,
}

impl TurnHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user turn
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::user(content));
    }

    /// Append an assistant turn
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::assistant(content));
    }

    /// All turns, oldest first
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The most recent turn, if any
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }
}

/// Carried by the denial path when a sensitive tool call is refused.
///
/// Produced by the confirmation gate and consumed exactly once by the
/// cancellation reconciler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancellationSignal {
    /// Name of the tool whose invocation was refused
    pub tool_name: String,
}

impl CancellationSignal {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
        }
    }
}

/// A message exchanged with the model provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: Vec<ContentBlock>,
}

impl Message {
    /// Create a new user message with text content
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: vec![ContentBlock::Text { text: text.into() }],
        }
    }

    /// Create a new assistant message with text content
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: vec![ContentBlock::Text { text: text.into() }],
        }
    }

    /// Create a new user message carrying tool results
    pub fn tool_results(results: Vec<ToolResultBlock>) -> Self {
        Self {
            role: Role::User,
            content: results.into_iter().map(ContentBlock::ToolResult).collect(),
        }
    }

    /// Create an assistant message with text and tool use blocks
    pub fn assistant_with_tool_use(text: impl Into<String>, tool_uses: Vec<ToolUseBlock>) -> Self {
        let mut content = vec![ContentBlock::Text { text: text.into() }];
        content.extend(tool_uses.into_iter().map(ContentBlock::ToolUse));
        Self {
            role: Role::Assistant,
            content,
        }
    }

    /// Get all text content concatenated
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|c| match c {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }

    /// Get all tool use blocks
    pub fn tool_uses(&self) -> Vec<&ToolUseBlock> {
        self.content
            .iter()
            .filter_map(|c| match c {
                ContentBlock::ToolUse(t) => Some(t),
                _ => None,
            })
            .collect()
    }
}

impl From<&Turn> for Message {
    fn from(turn: &Turn) -> Self {
        match turn.role {
            Role::User => Message::user(&turn.content),
            Role::Assistant => Message::assistant(&turn.content),
        }
    }
}

/// Content block within a message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Text content
    Text { text: String },
    /// Tool use request from the assistant
    ToolUse(ToolUseBlock),
    /// Tool result from the user side
    ToolResult(ToolResultBlock),
}

/// A tool use request from the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolUseBlock {
    /// Unique ID for this tool use (used to match with its result)
    pub id: String,
    /// Tool name
    pub name: String,
    /// Tool input parameters as JSON
    pub input: Value,
}

/// Result of a tool execution, keyed to the requesting tool use
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResultBlock {
    /// ID of the tool use this is a result for
    pub tool_use_id: String,
    /// Result content
    pub content: crate::tool::ToolResult,
    /// Whether the tool execution succeeded
    pub status: ToolResultStatus,
}

/// Status of a tool result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolResultStatus {
    Success,
    Error,
}

/// Definition of a tool available to the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name (must match the tool's name() method)
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// JSON Schema for input parameters
    pub input_schema: Value,
}

/// Why the model stopped generating
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Natural end of response
    EndTurn,
    /// Model wants to use a tool
    ToolUse,
    /// Hit max token limit
    MaxTokens,
    /// Unknown/other reason
    #[default]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_appends_in_order() {
        let mut history = TurnHistory::new();
        history.push_user("hello");
        history.push_assistant("hi there");

        assert_eq!(history.len(), 2);
        assert_eq!(history.turns()[0], Turn::user("hello"));
        assert_eq!(history.turns()[1], Turn::assistant("hi there"));
        assert_eq!(history.last(), Some(&Turn::assistant("hi there")));
    }

    #[test]
    fn test_history_starts_empty() {
        let history = TurnHistory::new();
        assert!(history.is_empty());
        assert!(history.last().is_none());
    }

    #[test]
    fn test_message_from_turn() {
        let msg = Message::from(&Turn::user("question"));
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.text(), "question");

        let msg = Message::from(&Turn::assistant("answer"));
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.text(), "answer");
    }

    #[test]
    fn test_message_tool_uses() {
        let msg = Message::assistant_with_tool_use(
            "writing now",
            vec![ToolUseBlock {
                id: "tu_1".to_string(),
                name: "write_to_cell".to_string(),
                input: serde_json::json!({"value": "42"}),
            }],
        );

        assert_eq!(msg.text(), "writing now");
        let uses = msg.tool_uses();
        assert_eq!(uses.len(), 1);
        assert_eq!(uses[0].name, "write_to_cell");
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }
}
