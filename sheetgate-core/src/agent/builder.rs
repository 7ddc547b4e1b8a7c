//! Builder for constructing agents

use std::sync::Arc;

use super::{Agent, DEFAULT_MAX_CONCURRENT_TOOLS};
use crate::events::AgentHook;
use crate::gate::ConfirmationGate;
use crate::provider::ModelProvider;
use crate::tool::{box_tool, DynTool, Tool};

/// Builder for [`Agent`]
///
/// Without an explicit gate, the agent denies every sensitive tool call;
/// interactive hosts must attach a gate wired to a responder.
pub struct AgentBuilder {
    provider: Option<Arc<dyn ModelProvider>>,
    tools: Vec<Box<dyn DynTool>>,
    gate: Option<ConfirmationGate>,
    system_prompt: Option<String>,
    hooks: Vec<Arc<dyn AgentHook>>,
    max_concurrent_tools: usize,
}

impl AgentBuilder {
    pub(super) fn new() -> Self {
        Self {
            provider: None,
            tools: Vec::new(),
            gate: None,
            system_prompt: None,
            hooks: Vec::new(),
            max_concurrent_tools: DEFAULT_MAX_CONCURRENT_TOOLS,
        }
    }

    /// Set the model provider
    pub fn provider(mut self, provider: impl ModelProvider + 'static) -> Self {
        self.provider = Some(Arc::new(provider));
        self
    }

    /// Set a shared model provider
    pub fn provider_arc(mut self, provider: Arc<dyn ModelProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Attach the confirmation gate sensitive tool calls go through
    pub fn with_gate(mut self, gate: ConfirmationGate) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Add a tool to the agent's toolbox
    pub fn add_tool<T: Tool + 'static>(mut self, tool: T) -> Self {
        self.push_tool(box_tool(tool));
        self
    }

    /// Add pre-boxed tools (e.g. a toolkit's full set)
    pub fn add_tools(mut self, tools: impl IntoIterator<Item = Box<dyn DynTool>>) -> Self {
        for tool in tools {
            self.push_tool(tool);
        }
        self
    }

    fn push_tool(&mut self, tool: Box<dyn DynTool>) {
        if self.tools.iter().any(|t| t.name() == tool.name()) {
            eprintln!(
                "Warning: Tool '{}' is already registered. This will cause errors when calling the model.",
                tool.name()
            );
        }
        self.tools.push(tool);
    }

    /// Set the system prompt
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Register an observer for agent events
    pub fn with_hook(mut self, hook: impl AgentHook + 'static) -> Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    /// Limit how many tool calls run at once within a turn
    pub fn with_max_concurrent_tools(mut self, max: usize) -> Self {
        self.max_concurrent_tools = max.max(1);
        self
    }

    /// Build the agent
    pub fn build(self) -> crate::error::Result<Agent> {
        let provider = self
            .provider
            .ok_or_else(|| crate::error::Error::Other("agent requires a provider".to_string()))?;

        Ok(Agent {
            provider,
            tools: self.tools,
            gate: self.gate.unwrap_or_else(ConfirmationGate::deny_all),
            system_prompt: self.system_prompt,
            hooks: self.hooks,
            max_concurrent_tools: self.max_concurrent_tools,
        })
    }
}
