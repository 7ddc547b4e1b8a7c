//! The turn loop - core execution logic for Agent

use std::time::Instant;

use futures::stream::{self, StreamExt};
use serde_json::Value;

use crate::events::AgentEvent;
use crate::gate::GateOutcome;
use crate::types::{
    CancellationSignal, Message, StopReason, ToolResultBlock, ToolResultStatus, ToolUseBlock,
    TurnHistory,
};

use super::{Agent, AgentError};

/// How a turn ended
#[derive(Debug)]
pub enum TurnOutcome {
    /// The model produced a reply
    Completed {
        /// Assistant text to show the user
        reply: String,
    },

    /// The operator declined a tool call; the turn stopped there
    Cancelled(CancellationSignal),
}

/// Result of dispatching one batch of tool calls
enum DispatchOutcome {
    Results(Vec<ToolResultBlock>),
    Cancelled(CancellationSignal),
}

/// Per-call result within a batch
enum CallOutcome {
    Block(ToolResultBlock),
    Denied(CancellationSignal),
}

impl Agent {
    /// Run one turn of the conversation.
    ///
    /// Sends the history to the model and loops: every tool call in the
    /// response goes through the confirmation gate, results are fed back, and
    /// the loop continues until the model ends its turn.
    ///
    /// A denial from the operator short-circuits the turn: the outcome is
    /// [`TurnOutcome::Cancelled`] and no further model calls are made. Tool
    /// execution errors do not end the turn; they are returned to the model
    /// as error results and the model decides how to proceed.
    pub async fn run_turn(&self, history: &TurnHistory) -> Result<TurnOutcome, AgentError> {
        let turn_start = Instant::now();

        self.emit_event(AgentEvent::TurnStarted {
            message_count: history.len(),
            timestamp: turn_start,
        });

        let mut messages: Vec<Message> = history.turns().iter().map(Message::from).collect();
        let tools = self.tool_definitions();

        loop {
            let response = self
                .provider
                .generate(&messages, &tools, self.system_prompt.as_deref())
                .await
                .map_err(|e| {
                    self.emit_event(AgentEvent::TurnFailed {
                        error: e.to_string(),
                        duration: turn_start.elapsed(),
                    });
                    AgentError::Provider(e)
                })?;

            match response.stop_reason {
                StopReason::ToolUse => {
                    messages.push(response.message.clone());

                    match self.process_tool_calls(&response.message).await {
                        DispatchOutcome::Results(blocks) => {
                            messages.push(Message::tool_results(blocks));
                        }
                        DispatchOutcome::Cancelled(signal) => {
                            self.emit_event(AgentEvent::TurnCancelled {
                                tool_name: signal.tool_name.clone(),
                                duration: turn_start.elapsed(),
                            });
                            return Ok(TurnOutcome::Cancelled(signal));
                        }
                    }
                }
                StopReason::EndTurn => {
                    let reply = response.message.text();
                    if reply.is_empty() {
                        self.emit_event(AgentEvent::TurnFailed {
                            error: AgentError::NoResponse.to_string(),
                            duration: turn_start.elapsed(),
                        });
                        return Err(AgentError::NoResponse);
                    }

                    self.emit_event(AgentEvent::TurnCompleted {
                        output: reply.clone(),
                        duration: turn_start.elapsed(),
                    });
                    return Ok(TurnOutcome::Completed { reply });
                }
                StopReason::MaxTokens => {
                    self.emit_event(AgentEvent::TurnFailed {
                        error: AgentError::MaxTokensExceeded.to_string(),
                        duration: turn_start.elapsed(),
                    });
                    return Err(AgentError::MaxTokensExceeded);
                }
                StopReason::Unknown => {
                    let err = AgentError::UnexpectedStopReason("unknown".to_string());
                    self.emit_event(AgentEvent::TurnFailed {
                        error: err.to_string(),
                        duration: turn_start.elapsed(),
                    });
                    return Err(err);
                }
            }
        }
    }

    /// Dispatch all tool calls in a model message through the gate.
    ///
    /// Calls run concurrently up to `max_concurrent_tools`, but confirmation
    /// prompts still arrive one at a time through the gate's channel. Results
    /// are reassembled in the model's original call order; if the operator
    /// denied any call, the earliest denial wins and the batch is discarded.
    async fn process_tool_calls(&self, message: &Message) -> DispatchOutcome {
        let tool_uses: Vec<ToolUseBlock> = message.tool_uses().into_iter().cloned().collect();

        let futures: Vec<_> = tool_uses
            .into_iter()
            .enumerate()
            .map(|(index, tool_use)| async move {
                let outcome = self.dispatch_one(&tool_use).await;
                (index, outcome)
            })
            .collect();

        let mut results: Vec<(usize, CallOutcome)> = stream::iter(futures)
            .buffer_unordered(self.max_concurrent_tools)
            .collect()
            .await;
        results.sort_by_key(|(index, _)| *index);

        let mut blocks = Vec::with_capacity(results.len());
        for (_, outcome) in results {
            match outcome {
                CallOutcome::Block(block) => blocks.push(block),
                CallOutcome::Denied(signal) => return DispatchOutcome::Cancelled(signal),
            }
        }

        DispatchOutcome::Results(blocks)
    }

    async fn dispatch_one(&self, tool_use: &ToolUseBlock) -> CallOutcome {
        let call_start = Instant::now();

        self.emit_event(AgentEvent::ToolRequested {
            tool_use_id: tool_use.id.clone(),
            name: tool_use.name.clone(),
            input: tool_use.input.clone(),
        });

        if !tool_use.input.is_object() {
            let error = format!(
                "Tool input must be a JSON object, got: {}",
                json_type_name(&tool_use.input)
            );
            return CallOutcome::Block(self.error_block(tool_use, error, call_start));
        }

        let Some(tool) = self.find_tool(&tool_use.name) else {
            let error = format!("Tool not found: {}", tool_use.name);
            return CallOutcome::Block(self.error_block(tool_use, error, call_start));
        };

        match self.gate.invoke(tool, tool_use.input.clone()).await {
            GateOutcome::Completed(result) => {
                self.emit_event(AgentEvent::ToolCompleted {
                    tool_use_id: tool_use.id.clone(),
                    name: tool_use.name.clone(),
                    output: result.clone(),
                    duration: call_start.elapsed(),
                });
                CallOutcome::Block(ToolResultBlock {
                    tool_use_id: tool_use.id.clone(),
                    content: result,
                    status: ToolResultStatus::Success,
                })
            }
            GateOutcome::Denied(signal) => {
                self.emit_event(AgentEvent::ToolDenied {
                    tool_use_id: tool_use.id.clone(),
                    name: tool_use.name.clone(),
                });
                CallOutcome::Denied(signal)
            }
            GateOutcome::Failed(err) => {
                CallOutcome::Block(self.error_block(tool_use, format!("Error: {}", err), call_start))
            }
        }
    }

    fn error_block(
        &self,
        tool_use: &ToolUseBlock,
        error: String,
        call_start: Instant,
    ) -> ToolResultBlock {
        self.emit_event(AgentEvent::ToolFailed {
            tool_use_id: tool_use.id.clone(),
            name: tool_use.name.clone(),
            error: error.clone(),
            duration: call_start.elapsed(),
        });

        ToolResultBlock {
            tool_use_id: tool_use.id.clone(),
            content: error.into(),
            status: ToolResultStatus::Error,
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
