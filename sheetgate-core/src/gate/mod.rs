//! Human confirmation gate for sensitive tool invocations.
//!
//! A [`ConfirmationGate`] sits between the model's decision to call a tool
//! and the call itself. Non-sensitive tools pass straight through; sensitive
//! tools block until a human answers yes or no.
//!
//! Every sensitive invocation is confirmed independently. An approval covers
//! exactly one call; repeating the same call with the same parameters asks
//! again. Nothing is memoized.
//!
//! Confirmation requests flow through a single channel with one consumer, so
//! prompts are strictly serialized even when the agent dispatches several
//! tool calls concurrently. The operator never sees two open questions at
//! once.

mod adapter;

pub use adapter::GateHook;

use serde_json::Value;
use tokio::sync::{mpsc, oneshot};

use crate::tool::{DynTool, ToolError, ToolResult};
use crate::types::CancellationSignal;

/// One pending question for the operator.
///
/// Answer by sending `true` (approve) or `false` (deny) on `reply`. Dropping
/// the sender counts as a denial.
#[derive(Debug)]
pub struct ConfirmationRequest {
    /// Tool the model wants to call
    pub tool_name: String,

    /// Full parameters of the proposed call, for display
    pub params: Value,

    /// Channel for the operator's decision
    pub reply: oneshot::Sender<bool>,
}

/// Outcome of dispatching one tool invocation through the gate
#[derive(Debug)]
pub enum GateOutcome {
    /// The tool ran (either non-sensitive or approved) and produced a result
    Completed(ToolResult),

    /// The operator declined; the tool was never called
    Denied(CancellationSignal),

    /// The tool ran and failed
    Failed(ToolError),
}

/// Sends sensitive invocations to a human for confirmation before execution.
///
/// Clone-cheap; each clone feeds the same request channel.
///
/// # Example
///
/// ```rust
/// use sheetgate_core::ConfirmationGate;
///
/// # tokio_test::block_on(async {
/// // No responder attached, so every confirmation comes back denied
/// let gate = ConfirmationGate::deny_all();
///
/// let params = serde_json::json!({"cell": "B2", "value": "42"});
/// assert!(!gate.confirm("write_to_cell", &params).await);
/// # });
/// ```
#[derive(Clone)]
pub struct ConfirmationGate {
    requests: mpsc::Sender<ConfirmationRequest>,
}

impl ConfirmationGate {
    /// Create a gate and the stream of requests its confirmations arrive on.
    ///
    /// The receiver must be consumed by exactly one responder, one request at
    /// a time; that single consumer is what serializes prompts.
    pub fn channel(buffer: usize) -> (Self, mpsc::Receiver<ConfirmationRequest>) {
        let (tx, rx) = mpsc::channel(buffer);
        (Self { requests: tx }, rx)
    }

    /// Create a gate with no responder attached.
    ///
    /// Every sensitive invocation is denied, which is the safe behavior for
    /// non-interactive environments.
    pub fn deny_all() -> Self {
        let (gate, rx) = Self::channel(1);
        drop(rx);
        gate
    }

    /// Ask the operator to confirm one proposed call.
    ///
    /// Returns `false` on denial or when no responder is listening.
    pub async fn confirm(&self, tool_name: &str, params: &Value) -> bool {
        let (reply, decision) = oneshot::channel();
        let request = ConfirmationRequest {
            tool_name: tool_name.to_string(),
            params: params.clone(),
            reply,
        };

        if self.requests.send(request).await.is_err() {
            return false;
        }

        decision.await.unwrap_or(false)
    }

    /// Dispatch one tool invocation through the gate.
    ///
    /// Sensitive tools are confirmed first; a denial means the tool is never
    /// called and the outcome carries a [`CancellationSignal`]. Execution
    /// errors from the tool itself come back as [`GateOutcome::Failed`],
    /// untouched.
    pub async fn invoke(&self, tool: &dyn DynTool, params: Value) -> GateOutcome {
        if tool.sensitive() && !self.confirm(tool.name(), &params).await {
            return GateOutcome::Denied(CancellationSignal::new(tool.name()));
        }

        match tool.execute_raw(params).await {
            Ok(result) => GateOutcome::Completed(result),
            Err(err) => GateOutcome::Failed(err),
        }
    }
}
