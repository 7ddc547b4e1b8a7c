//! Interactive REPL for the sheetgate agent

mod approval;
mod core;

pub use approval::{spawn_operator, ConfirmationPrompter, SimplePrompter};
pub use self::core::{input_prompt, is_exit, print_welcome};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use sheetgate_core::{reconcile, Agent, TurnHistory, TurnOutcome};

use crate::error::CliError;

/// What one line of input led to
#[derive(Debug)]
enum LineOutcome {
    /// The session should end
    Exit,
    /// Blank input, nothing to do
    Skipped,
    /// The agent produced a reply to print
    Reply(String),
}

/// Process one line of user input against the agent.
///
/// Appends the user turn and the resulting assistant turn to the history; a
/// cancelled turn is reconciled in place and the acknowledgement becomes the
/// reply. Exit input ends the session without touching the history or the
/// model.
async fn handle_line(
    agent: &Agent,
    history: &mut TurnHistory,
    line: &str,
) -> Result<LineOutcome, CliError> {
    let input = line.trim();
    if input.is_empty() {
        return Ok(LineOutcome::Skipped);
    }
    if is_exit(input) {
        return Ok(LineOutcome::Exit);
    }

    history.push_user(input);

    match agent.run_turn(history).await? {
        TurnOutcome::Completed { reply } => {
            history.push_assistant(&reply);
            Ok(LineOutcome::Reply(reply))
        }
        TurnOutcome::Cancelled(signal) => {
            reconcile(history, signal);
            // The reconciled acknowledgement is the reply for this turn
            let reply = history
                .last()
                .map(|turn| turn.content.clone())
                .unwrap_or_default();
            Ok(LineOutcome::Reply(reply))
        }
    }
}

/// Run the interactive loop.
///
/// Owns the conversation history: user lines and agent replies are appended
/// as they happen, and a cancelled turn is reconciled before the next prompt.
/// The loop ends on `exit` (any casing) or end of input.
pub async fn run(agent: Agent, user_id: &str) -> Result<(), CliError> {
    let tool_names: Vec<String> = agent
        .tool_definitions()
        .into_iter()
        .map(|d| d.name)
        .collect();
    print_welcome(user_id, &tool_names);

    let mut editor = DefaultEditor::new()?;
    let mut history = TurnHistory::new();

    loop {
        let line = match editor.readline(input_prompt()) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        self::core::reset_input_style();

        match handle_line(&agent, &mut history, &line).await? {
            LineOutcome::Exit => break,
            LineOutcome::Skipped => continue,
            LineOutcome::Reply(reply) => {
                let _ = editor.add_history_entry(line.trim());
                self::core::print_reply(&reply);
            }
        }
    }

    self::core::print_farewell();
    Ok(())
}
