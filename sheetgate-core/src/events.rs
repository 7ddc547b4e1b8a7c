use std::time::{Duration, Instant};

use serde_json::Value;

use crate::tool::ToolResult;

/// Events emitted during agent execution
///
/// These events allow observers to track turn lifecycle, tool dispatch,
/// and gate decisions in real-time.
#[derive(Debug, Clone)]
pub enum AgentEvent {
    // ===== Turn Lifecycle =====
    /// A turn started
    TurnStarted {
        /// Number of prior turns in the history
        message_count: usize,
        /// Timestamp
        timestamp: Instant,
    },

    /// A turn completed with an assistant reply
    TurnCompleted {
        /// Final response to user
        output: String,
        /// Total turn duration
        duration: Duration,
    },

    /// A turn ended because the operator declined a tool call
    TurnCancelled {
        /// Tool whose invocation was declined
        tool_name: String,
        /// How long the turn ran before cancellation
        duration: Duration,
    },

    /// A turn failed with an error
    TurnFailed {
        /// Error message
        error: String,
        /// How long before failure
        duration: Duration,
    },

    // ===== Tool Lifecycle =====
    /// Model requested a tool (fires exactly once per tool use)
    ToolRequested {
        /// Unique ID for this tool use
        tool_use_id: String,
        /// Tool name
        name: String,
        /// Input parameters
        input: Value,
    },

    /// Tool execution completed successfully
    ToolCompleted {
        /// Matching ID from ToolRequested
        tool_use_id: String,
        /// Tool name
        name: String,
        /// Tool output
        output: ToolResult,
        /// Execution duration
        duration: Duration,
    },

    /// The operator declined this tool invocation; the tool never ran
    ToolDenied {
        /// Matching ID from ToolRequested
        tool_use_id: String,
        /// Tool name
        name: String,
    },

    /// Tool execution failed
    ToolFailed {
        /// Matching ID from ToolRequested
        tool_use_id: String,
        /// Tool name
        name: String,
        /// Error message
        error: String,
        /// How long before failure
        duration: Duration,
    },
}

/// Hook for observing agent events
///
/// Implement this trait to receive notifications about agent execution.
///
/// # Example
/// ```
/// use sheetgate_core::events::{AgentEvent, AgentHook};
///
/// struct Logger;
///
/// impl AgentHook for Logger {
///     fn on_event(&self, event: &AgentEvent) {
///         match event {
///             AgentEvent::TurnStarted { message_count, .. } => {
///                 println!("Turn started with {} prior turns", message_count);
///             }
///             AgentEvent::ToolRequested { name, .. } => {
///                 println!("Tool requested: {}", name);
///             }
///             _ => {}
///         }
///     }
/// }
/// ```
pub trait AgentHook: Send + Sync {
    /// Called when an event occurs
    fn on_event(&self, event: &AgentEvent);
}

/// Blanket implementation for closures
impl<F> AgentHook for F
where
    F: Fn(&AgentEvent) + Send + Sync,
{
    fn on_event(&self, event: &AgentEvent) {
        self(event)
    }
}
