//! sheetgate-core: the authorization and confirmation layer between an
//! LLM agent and the external tools it invokes.
//!
//! Two mechanisms stand between an agent's decision to call a tool and that
//! tool actually running:
//!
//! - The **consent bootstrapper** ([`consent::ConsentBootstrapper`]) obtains a
//!   per-user grant for every configured tool from a remote consent service
//!   before the run loop accepts any input.
//! - The **confirmation gate** ([`gate::ConfirmationGate`]) intercepts every
//!   invocation of a tool marked sensitive and blocks until a human operator
//!   approves or denies it. Denials never reach the underlying tool; they
//!   surface as a [`types::CancellationSignal`] that the driver folds back
//!   into the conversation via [`agent::reconcile`].
//!
//! The [`agent::Agent`] turn runtime wires a [`provider::ModelProvider`] to a
//! gated tool set and drives one conversation turn at a time against an
//! externally owned [`types::TurnHistory`].
//!
//! # Example
//!
//! ```ignore
//! use sheetgate_core::{Agent, ConfirmationGate, TurnHistory, TurnOutcome, reconcile};
//!
//! let (gate, requests) = ConfirmationGate::channel(8);
//! // ... spawn an operator task draining `requests` ...
//!
//! let agent = Agent::builder()
//!     .provider(provider)
//!     .with_gate(gate)
//!     .add_tool(WriteToCellTool::new(manager))
//!     .build()?;
//!
//! let mut history = TurnHistory::new();
//! history.push_user("set B2 to 42");
//! match agent.run_turn(&history).await? {
//!     TurnOutcome::Completed { reply } => history.push_assistant(reply),
//!     TurnOutcome::Cancelled(signal) => reconcile(&mut history, signal),
//! }
//! ```

pub mod agent;
pub mod config;
pub mod consent;
mod error;
pub mod events;
pub mod gate;
pub mod provider;
pub mod tool;
pub mod types;

pub use agent::{reconcile, Agent, AgentBuilder, AgentError, TurnOutcome};
pub use config::{Config, ConfigError};
pub use consent::{
    AuthorizationError, AuthorizationState, ConsentBootstrapper, ConsentError, ConsentService,
    GrantRequest, GrantStatus, HttpConsentService,
};
pub use error::{Error, Result};
pub use events::{AgentEvent, AgentHook};
pub use gate::{ConfirmationGate, ConfirmationRequest, GateHook, GateOutcome};
pub use provider::{ModelProvider, ModelResponse, OpenAiProvider, ProviderError};
pub use tool::{box_tool, DynTool, Tool, ToolError, ToolResult};
pub use types::{
    CancellationSignal, ContentBlock, Message, Role, StopReason, ToolDefinition, ToolResultBlock,
    ToolResultStatus, ToolUseBlock, Turn, TurnHistory,
};
