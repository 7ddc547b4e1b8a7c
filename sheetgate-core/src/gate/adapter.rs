//! Callback-style adapter over the gate.
//!
//! [`ConfirmationGate::invoke`] wraps the whole invocation. Some hosts
//! instead want a pre-dispatch check they can run before calling the tool
//! themselves; [`GateHook`] is that shape over the same gate and the same
//! request channel, so both styles share one serialized prompt stream.

use serde_json::Value;

use super::ConfirmationGate;
use crate::tool::DynTool;
use crate::types::CancellationSignal;

/// Pre-dispatch confirmation check.
///
/// `Ok(())` means the host may call the tool; `Err` means the operator
/// declined and the tool must not run.
pub struct GateHook {
    gate: ConfirmationGate,
}

impl GateHook {
    pub fn new(gate: ConfirmationGate) -> Self {
        Self { gate }
    }

    /// Confirm a proposed call before the host dispatches it.
    ///
    /// Non-sensitive tools pass without a prompt.
    pub async fn before_tool(
        &self,
        tool: &dyn DynTool,
        params: &Value,
    ) -> Result<(), CancellationSignal> {
        if !tool.sensitive() {
            return Ok(());
        }

        if self.gate.confirm(tool.name(), params).await {
            Ok(())
        } else {
            Err(CancellationSignal::new(tool.name()))
        }
    }
}
