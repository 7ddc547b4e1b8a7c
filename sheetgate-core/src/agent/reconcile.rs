//! History reconciliation after a declined tool call.

use crate::types::{CancellationSignal, TurnHistory};

/// Record a declined tool call in the conversation history.
///
/// The model never saw its tool call resolve, so the history is patched with
/// a short exchange that explains the cancellation in-band: the assistant
/// names the call it was about to make, the user declines, and the assistant
/// acknowledges. Later turns then read as a coherent conversation and the
/// model does not retry the call on its own.
///
/// The fragment is deterministic; only the tool name varies.
pub fn reconcile(history: &mut TurnHistory, signal: CancellationSignal) {
    history.push_assistant(format!(
        "Please confirm the call to {}",
        signal.tool_name
    ));
    history.push_user("I changed my mind, please don't do it!");
    history.push_assistant(format!(
        "Sure, I cancelled the call to {}. What else can I do for you today?",
        signal.tool_name
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_exactly_three_turns() {
        let mut history = TurnHistory::default();
        history.push_user("please write 42 to B2");

        reconcile(&mut history, CancellationSignal::new("write_to_cell"));

        assert_eq!(history.len(), 4);
        let turns = history.turns();
        assert_eq!(
            turns[1].content,
            "Please confirm the call to write_to_cell"
        );
        assert_eq!(turns[2].content, "I changed my mind, please don't do it!");
        assert_eq!(
            turns[3].content,
            "Sure, I cancelled the call to write_to_cell. What else can I do for you today?"
        );
    }

    #[test]
    fn test_fragment_alternates_roles() {
        use crate::types::Role;

        let mut history = TurnHistory::default();
        reconcile(&mut history, CancellationSignal::new("update_cells"));

        let roles: Vec<Role> = history.turns().iter().map(|t| t.role).collect();
        assert_eq!(roles, vec![Role::Assistant, Role::User, Role::Assistant]);
    }
}
