//! Shared fixtures for integration tests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::mpsc;

use sheetgate_core::{
    AgentEvent, AgentHook, ConfirmationGate, ConfirmationRequest, Message, ModelProvider,
    ModelResponse, ProviderError, StopReason, Tool, ToolDefinition, ToolError, ToolResult,
    ToolUseBlock,
};

/// Scripted provider: replays queued responses and records every request
pub struct MockProvider {
    responses: Mutex<VecDeque<ModelResponse>>,
    pub seen: Mutex<Vec<Vec<Message>>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn with_text(self, text: &str) -> Self {
        self.responses.lock().push_back(ModelResponse {
            message: Message::assistant(text),
            stop_reason: StopReason::EndTurn,
        });
        self
    }

    pub fn with_tool_use(self, name: &str, input: Value) -> Self {
        let id = format!("call_{}", self.responses.lock().len());
        self.with_tool_uses(vec![(id, name.to_string(), input)])
    }

    pub fn with_tool_uses(self, calls: Vec<(String, String, Value)>) -> Self {
        let blocks = calls
            .into_iter()
            .map(|(id, name, input)| ToolUseBlock { id, name, input })
            .collect();
        self.responses.lock().push_back(ModelResponse {
            message: Message::assistant_with_tool_use("", blocks),
            stop_reason: StopReason::ToolUse,
        });
        self
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(
        &self,
        messages: &[Message],
        _tools: &[ToolDefinition],
        _system_prompt: Option<&str>,
    ) -> Result<ModelResponse, ProviderError> {
        self.seen.lock().push(messages.to_vec());
        self.responses
            .lock()
            .pop_front()
            .ok_or_else(|| ProviderError::Other("mock script exhausted".to_string()))
    }
}

#[derive(Deserialize, JsonSchema)]
pub struct ProbeInput {
    #[serde(default)]
    #[allow(dead_code)]
    pub value: Option<String>,
}

/// Tool that counts its executions; sensitivity is configurable
pub struct ProbeTool {
    name: &'static str,
    sensitive: bool,
    pub calls: Arc<AtomicUsize>,
}

impl ProbeTool {
    pub fn new(name: &'static str, sensitive: bool) -> Self {
        Self {
            name,
            sensitive,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl Tool for ProbeTool {
    type Input = ProbeInput;

    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "Probe tool for tests"
    }

    fn sensitive(&self) -> bool {
        self.sensitive
    }

    async fn execute(&self, _input: Self::Input) -> Result<ToolResult, ToolError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("{} ran", self.name).into())
    }
}

/// Collects every emitted event for later assertions
#[derive(Clone, Default)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<AgentEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AgentEvent> {
        self.events.lock().clone()
    }

    pub fn count_tool_requested(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, AgentEvent::ToolRequested { .. }))
            .count()
    }
}

impl AgentHook for EventCollector {
    fn on_event(&self, event: &AgentEvent) {
        self.events.lock().push(event.clone());
    }
}

/// Spawn a responder that answers every confirmation with a fixed decision
/// and records the order prompts arrived in.
pub fn scripted_responder(
    mut rx: mpsc::Receiver<ConfirmationRequest>,
    decision: bool,
) -> Arc<Mutex<Vec<String>>> {
    let prompted = Arc::new(Mutex::new(Vec::new()));
    let prompted_clone = prompted.clone();
    tokio::spawn(async move {
        while let Some(req) = rx.recv().await {
            prompted_clone.lock().push(req.tool_name.clone());
            let _ = req.reply.send(decision);
        }
    });
    prompted
}

/// Gate whose responder approves everything
pub fn approving_gate() -> (ConfirmationGate, Arc<Mutex<Vec<String>>>) {
    let (gate, rx) = ConfirmationGate::channel(16);
    let prompted = scripted_responder(rx, true);
    (gate, prompted)
}

/// Gate whose responder denies everything
pub fn denying_gate() -> (ConfirmationGate, Arc<Mutex<Vec<String>>>) {
    let (gate, rx) = ConfirmationGate::channel(16);
    let prompted = scripted_responder(rx, false);
    (gate, prompted)
}
