//! Confirmation prompts for gated tool calls.
//!
//! Requests arrive over the gate's channel and are answered one at a time on
//! a dedicated thread. The decision is binary: the operator approves this one
//! call or denies it. Nothing is remembered between prompts.

use std::io::{stdout, BufRead, Write};
use std::thread::JoinHandle;

use sheetgate_core::tool::format_params_ansi;
use sheetgate_core::ConfirmationRequest;
use tokio::sync::mpsc;

/// Trait for confirmation prompt implementations
///
/// Implement this to create custom confirmation UX.
pub trait ConfirmationPrompter: Send + 'static {
    /// Ask the operator about one proposed call; `true` approves it
    fn prompt(&self, tool_name: &str, params: &serde_json::Value) -> bool;

    /// Human-readable name for this prompter
    fn name(&self) -> &'static str;
}

/// Binary y/n prompter
pub struct SimplePrompter;

impl ConfirmationPrompter for SimplePrompter {
    fn name(&self) -> &'static str {
        "SimplePrompter"
    }

    fn prompt(&self, tool_name: &str, params: &serde_json::Value) -> bool {
        println!("\n\x1b[33mConfirmation required:\x1b[0m");
        for line in format_params_ansi(tool_name, params).lines() {
            println!("  {}", line);
        }

        loop {
            print!("\nApprove this call? [y/n]: ");
            let _ = stdout().flush();

            let input = read_input();
            match input.trim().to_lowercase().as_str() {
                "y" | "yes" => {
                    print_confirmation("Approved");
                    return true;
                }
                "n" | "no" => {
                    print_confirmation("Denied");
                    return false;
                }
                "" => continue,
                _ => {
                    println!("\x1b[31mInvalid choice. Use y or n\x1b[0m");
                }
            }
        }
    }
}

/// Read a line of input
pub fn read_input() -> String {
    let stdin = std::io::stdin();
    let mut line = String::new();
    let _ = stdin.lock().read_line(&mut line);
    line
}

/// Print a confirmation message
pub fn print_confirmation(message: &str) {
    println!("  \x1b[32m*\x1b[0m {}", message);
}

/// Consume confirmation requests on a dedicated thread.
///
/// One request is fully answered before the next is taken, which keeps
/// prompts serial no matter how many tool calls the agent dispatches at
/// once. The thread ends when the gate (all senders) is dropped.
///
/// Reading stdin here is safe: prompts only occur while the driver is
/// blocked awaiting the turn, so nothing else is reading input.
pub fn spawn_operator(
    mut requests: mpsc::Receiver<ConfirmationRequest>,
    prompter: impl ConfirmationPrompter,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        while let Some(request) = requests.blocking_recv() {
            let approved = prompter.prompt(&request.tool_name, &request.params);
            let _ = request.reply.send(approved);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetgate_core::ConfirmationGate;

    struct FixedPrompter(bool);

    impl ConfirmationPrompter for FixedPrompter {
        fn name(&self) -> &'static str {
            "FixedPrompter"
        }

        fn prompt(&self, _tool_name: &str, _params: &serde_json::Value) -> bool {
            self.0
        }
    }

    #[tokio::test]
    async fn test_operator_thread_answers_requests() {
        let (gate, rx) = ConfirmationGate::channel(4);
        let handle = spawn_operator(rx, FixedPrompter(true));

        assert!(gate.confirm("write_to_cell", &serde_json::json!({})).await);
        assert!(gate.confirm("update_cells", &serde_json::json!({})).await);

        drop(gate);
        handle.join().unwrap();
    }

    #[tokio::test]
    async fn test_operator_thread_denies() {
        let (gate, rx) = ConfirmationGate::channel(4);
        let handle = spawn_operator(rx, FixedPrompter(false));

        assert!(!gate.confirm("write_to_cell", &serde_json::json!({})).await);

        drop(gate);
        handle.join().unwrap();
    }
}
