//! sheetgate: an interactive spreadsheet agent with human-confirmed writes.
//!
//! Startup order matters: configuration is validated first, then every tool
//! is authorized against the consent service, and only then does the REPL
//! start. A tool the user has not granted never reaches the model.

mod error;
mod repl;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use sheetgate_core::{
    Agent, AgentEvent, Config, ConfirmationGate, ConsentBootstrapper, HttpConsentService,
    OpenAiProvider,
};
use sheetgate_tools::sheets::{all_tools, WorkbookManager};

use error::CliError;
use repl::{spawn_operator, SimplePrompter};

const SYSTEM_PROMPT: &str = "You are a helpful assistant that manages spreadsheets on the \
user's behalf. Use the provided tools to create, read, and modify spreadsheets. Mutating \
tools require the user's confirmation; if a call is declined, accept the decision and ask \
what to do instead.";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("sheetgate: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    let config = Config::from_env()?;

    let manager = Arc::new(WorkbookManager::new());
    let tools = all_tools(manager, &config.user_id);

    // Authorize every tool up front; a denied or unreachable grant aborts
    // before the model ever sees the toolbox
    let service = Arc::new(HttpConsentService::new(&config.consent_url)?);
    let bootstrapper = ConsentBootstrapper::new(service).on_grant_url(|tool, url| {
        println!("Approve access to '{}' at: {}", tool, url);
    });
    for tool in &tools {
        bootstrapper
            .ensure_authorized(tool.name(), &config.user_id)
            .await?;
    }

    let (gate, requests) = ConfirmationGate::channel(16);
    let operator = spawn_operator(requests, SimplePrompter);

    let mut provider = OpenAiProvider::new(&config.api_key, &config.model);
    if let Some(base) = &config.api_base {
        provider = provider.with_api_base(base);
    }

    let event_counter = Arc::new(AtomicU64::new(0));
    let agent = Agent::builder()
        .provider(provider)
        .with_gate(gate.clone())
        .add_tools(tools)
        .with_system_prompt(SYSTEM_PROMPT)
        .with_hook(move |event: &AgentEvent| {
            let n = event_counter.fetch_add(1, Ordering::Relaxed) + 1;
            match event {
                AgentEvent::ToolCompleted { name, .. } => {
                    eprintln!("  [{}] tool {} completed", n, name);
                }
                AgentEvent::ToolDenied { name, .. } => {
                    eprintln!("  [{}] tool {} denied", n, name);
                }
                AgentEvent::ToolFailed { name, error, .. } => {
                    eprintln!("  [{}] tool {} failed: {}", n, name, error);
                }
                _ => {}
            }
        })
        .build()?;

    let result = repl::run(agent, &config.user_id).await;

    // Closing the gate ends the operator thread
    drop(gate);
    let _ = operator.join();

    result
}
