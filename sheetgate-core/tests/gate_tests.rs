//! Confirmation behavior, observed through a full agent

mod common;

use std::sync::atomic::Ordering;

use common::{approving_gate, denying_gate, EventCollector, MockProvider, ProbeTool};
use sheetgate_core::{Agent, TurnHistory, TurnOutcome};

fn history(text: &str) -> TurnHistory {
    let mut h = TurnHistory::new();
    h.push_user(text);
    h
}

#[tokio::test]
async fn test_non_sensitive_tool_runs_without_prompt() {
    let provider = MockProvider::new()
        .with_tool_use("get_spreadsheet", serde_json::json!({"value": "sheet-1"}))
        .with_text("Here it is");
    let tool = ProbeTool::new("get_spreadsheet", false);
    let calls = tool.calls.clone();
    let (gate, prompted) = approving_gate();

    let agent = Agent::builder()
        .provider(provider)
        .with_gate(gate)
        .add_tool(tool)
        .build()
        .unwrap();

    let outcome = agent.run_turn(&history("show me sheet-1")).await.unwrap();

    assert!(matches!(outcome, TurnOutcome::Completed { .. }));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(prompted.lock().is_empty());
}

#[tokio::test]
async fn test_sensitive_tool_prompts_exactly_once_per_call() {
    let provider = MockProvider::new()
        .with_tool_use("write_to_cell", serde_json::json!({"value": "42"}))
        .with_tool_use("write_to_cell", serde_json::json!({"value": "42"}))
        .with_text("Written twice");
    let tool = ProbeTool::new("write_to_cell", true);
    let calls = tool.calls.clone();
    let (gate, prompted) = approving_gate();

    let agent = Agent::builder()
        .provider(provider)
        .with_gate(gate)
        .add_tool(tool)
        .build()
        .unwrap();

    let outcome = agent.run_turn(&history("write 42 twice")).await.unwrap();

    // Same tool, same params, two invocations: two prompts, two executions
    assert!(matches!(outcome, TurnOutcome::Completed { .. }));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(prompted.lock().len(), 2);
}

#[tokio::test]
async fn test_denied_sensitive_tool_never_executes() {
    let provider = MockProvider::new()
        .with_tool_use("update_cells", serde_json::json!({"value": "bulk"}));
    let tool = ProbeTool::new("update_cells", true);
    let calls = tool.calls.clone();
    let (gate, prompted) = denying_gate();
    let collector = EventCollector::new();

    let agent = Agent::builder()
        .provider(provider)
        .with_gate(gate)
        .add_tool(tool)
        .with_hook(collector.clone())
        .build()
        .unwrap();

    let outcome = agent.run_turn(&history("update everything")).await.unwrap();

    match outcome {
        TurnOutcome::Cancelled(signal) => assert_eq!(signal.tool_name, "update_cells"),
        other => panic!("expected cancellation, got {:?}", other),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(prompted.lock().len(), 1);
    assert_eq!(collector.count_tool_requested(), 1);
}

#[tokio::test]
async fn test_concurrent_sensitive_calls_prompt_serially() {
    let provider = MockProvider::new()
        .with_tool_uses(vec![
            (
                "call_a".to_string(),
                "write_to_cell".to_string(),
                serde_json::json!({"value": "a"}),
            ),
            (
                "call_b".to_string(),
                "add_note_to_cell".to_string(),
                serde_json::json!({"value": "b"}),
            ),
        ])
        .with_text("Both done");
    let writer = ProbeTool::new("write_to_cell", true);
    let noter = ProbeTool::new("add_note_to_cell", true);

    // Responder that holds each decision open for a moment and records how
    // many prompts were ever outstanding at once
    let (gate, mut rx) = sheetgate_core::ConfirmationGate::channel(8);
    let prompts = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let open = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let max_open = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
    {
        let prompts = prompts.clone();
        let open = open.clone();
        let max_open = max_open.clone();
        tokio::spawn(async move {
            while let Some(req) = rx.recv().await {
                prompts.fetch_add(1, Ordering::SeqCst);
                let now = open.fetch_add(1, Ordering::SeqCst) + 1;
                max_open.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(std::time::Duration::from_millis(10)).await;
                open.fetch_sub(1, Ordering::SeqCst);
                let _ = req.reply.send(true);
            }
        });
    }

    let agent = Agent::builder()
        .provider(provider)
        .with_gate(gate)
        .add_tool(writer)
        .add_tool(noter)
        .with_max_concurrent_tools(4)
        .build()
        .unwrap();

    let outcome = agent.run_turn(&history("write and annotate")).await.unwrap();

    assert!(matches!(outcome, TurnOutcome::Completed { .. }));
    // Both prompts went through the single channel; the second was only
    // presented after the first decision was sent
    assert_eq!(prompts.load(Ordering::SeqCst), 2);
    assert_eq!(max_open.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_denial_in_batch_discards_other_results() {
    // Approve the non-sensitive read, deny the sensitive write
    let provider = MockProvider::new().with_tool_uses(vec![
        (
            "call_read".to_string(),
            "get_spreadsheet".to_string(),
            serde_json::json!({"value": "s"}),
        ),
        (
            "call_write".to_string(),
            "write_to_cell".to_string(),
            serde_json::json!({"value": "42"}),
        ),
    ]);
    let reader = ProbeTool::new("get_spreadsheet", false);
    let writer = ProbeTool::new("write_to_cell", true);
    let writer_calls = writer.calls.clone();
    let (gate, _) = denying_gate();

    let agent = Agent::builder()
        .provider(provider)
        .with_gate(gate)
        .add_tool(reader)
        .add_tool(writer)
        .build()
        .unwrap();

    let outcome = agent.run_turn(&history("read then write")).await.unwrap();

    match outcome {
        TurnOutcome::Cancelled(signal) => assert_eq!(signal.tool_name, "write_to_cell"),
        other => panic!("expected cancellation, got {:?}", other),
    }
    assert_eq!(writer_calls.load(Ordering::SeqCst), 0);
}
