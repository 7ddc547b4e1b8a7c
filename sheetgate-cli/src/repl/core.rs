//! Core REPL utilities

use std::io::Write;

/// ANSI escape code to reset terminal styling
pub const RESET_STYLE: &str = "\x1b[0m";

/// Input that ends the session (matched case-insensitively)
pub const EXIT_SENTINEL: &str = "exit";

/// The input prompt string
pub fn input_prompt() -> &'static str {
    "you> "
}

/// Format the welcome banner header
pub fn format_welcome_header() -> String {
    format!("sheetgate v{}", env!("CARGO_PKG_VERSION"))
}

/// True when the input should end the session
pub fn is_exit(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case(EXIT_SENTINEL)
}

/// Reset terminal styling after input
pub fn reset_input_style() {
    let mut stdout = std::io::stdout();
    let _ = write!(stdout, "{}", RESET_STYLE);
    let _ = stdout.flush();
}

/// Print welcome message and tool roster
pub fn print_welcome(user_id: &str, tool_names: &[String]) {
    println!("\n{}", format_welcome_header());
    println!("User: {}", user_id);
    println!("Tools: {}", tool_names.join(", "));
    println!("Type 'exit' to quit.");
    println!();
}

/// Print an assistant reply
pub fn print_reply(reply: &str) {
    println!("\x1b[36magent>\x1b[0m {}\n", reply);
}

/// Print the farewell on exit
pub fn print_farewell() {
    println!("Goodbye!");
}
