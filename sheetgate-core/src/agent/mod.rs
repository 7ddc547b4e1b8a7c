//! Agent module for orchestrating model turns over gated tools
//!
//! The Agent drives the conversation loop: it sends the history to the model,
//! routes every requested tool call through the confirmation gate, and feeds
//! results back until the model produces a reply or the operator cancels.

mod builder;
mod reconcile;
mod run;

pub use builder::AgentBuilder;
pub use reconcile::reconcile;
pub use run::TurnOutcome;

use std::sync::Arc;

use thiserror::Error;

use crate::events::{AgentEvent, AgentHook};
use crate::gate::ConfirmationGate;
use crate::provider::{ModelProvider, ProviderError};
use crate::tool::DynTool;
use crate::types::ToolDefinition;

pub const DEFAULT_MAX_CONCURRENT_TOOLS: usize = 4;

/// Errors from running a turn
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("model returned no text response")]
    NoResponse,

    #[error("model response exceeded the token limit")]
    MaxTokensExceeded,

    #[error("model stopped for an unexpected reason: {0}")]
    UnexpectedStopReason(String),
}

/// Agent that orchestrates a model over a set of gated tools
///
/// Create an agent using the builder pattern:
///
/// ```ignore
/// use sheetgate_core::{Agent, ConfirmationGate, OpenAiProvider};
///
/// let (gate, requests) = ConfirmationGate::channel(8);
/// let agent = Agent::builder()
///     .provider(OpenAiProvider::new(api_key, "gpt-4o"))
///     .with_gate(gate)
///     .add_tools(tools)
///     .with_system_prompt("You are a spreadsheet assistant")
///     .build();
/// ```
pub struct Agent {
    pub(super) provider: Arc<dyn ModelProvider>,
    pub(super) tools: Vec<Box<dyn DynTool>>,
    pub(super) gate: ConfirmationGate,
    pub(super) system_prompt: Option<String>,
    pub(super) hooks: Vec<Arc<dyn AgentHook>>,
    pub(super) max_concurrent_tools: usize,
}

impl Agent {
    /// Start building an agent
    pub fn builder() -> AgentBuilder {
        AgentBuilder::new()
    }

    /// Tool definitions offered to the model
    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description().to_string(),
                input_schema: t.input_schema(),
            })
            .collect()
    }

    pub(super) fn find_tool(&self, name: &str) -> Option<&dyn DynTool> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .map(|t| t.as_ref())
    }

    pub(super) fn emit_event(&self, event: AgentEvent) {
        for hook in &self.hooks {
            hook.on_event(&event);
        }
    }
}
