//! Console summary of a run.

use rover_core::AgentHistoryList;
use std::io::{self, Write};

pub fn write_banner(out: &mut impl Write, task: &str) -> io::Result<()> {
    writeln!(out, "Starting agent with task: {}", task)
}

/// Prints what the last action of the run produced and whether the task was
/// marked as done.
pub fn write_report(out: &mut impl Write, history: &AgentHistoryList) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Agent Result:")?;

    if history.is_empty() {
        return writeln!(out, "  No history found or agent did not run.");
    }

    let last = history.last_action_result();
    match (last.and_then(|r| r.content()), last.and_then(|r| r.error_message())) {
        (Some(content), _) => writeln!(out, "  Extracted content: {}", content)?,
        (None, Some(error)) => writeln!(out, "  Error: {}", error)?,
        (None, None) => {
            writeln!(out, "  No specific content or error extracted from the last step.")?
        }
    }

    if history.is_done() {
        writeln!(out, "  Task marked as completed.")
    } else {
        writeln!(out, "  Task not marked as completed.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rover_core::{ActionResult, AgentHistory};

    fn render(history: &AgentHistoryList) -> String {
        let mut out = Vec::new();
        write_report(&mut out, history).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn history_of(results: Vec<ActionResult>) -> AgentHistoryList {
        let mut history = AgentHistoryList::default();
        history.push(AgentHistory::from_results(results));
        history
    }

    #[test]
    fn test_done_with_content() {
        let history = history_of(vec![ActionResult::done("https://example.com/gemini", true)]);
        assert_eq!(
            render(&history),
            "\nAgent Result:\n  Extracted content: https://example.com/gemini\n  Task marked as completed.\n"
        );
    }

    #[test]
    fn test_error_without_content() {
        let history = history_of(vec![ActionResult::failure("Model error: quota exceeded")]);
        assert_eq!(
            render(&history),
            "\nAgent Result:\n  Error: Model error: quota exceeded\n  Task not marked as completed.\n"
        );
    }

    #[test]
    fn test_content_wins_over_error() {
        let mut result = ActionResult::extracted("partial");
        result.error = Some("timeout".to_string());
        assert!(render(&history_of(vec![result])).contains("  Extracted content: partial\n"));
    }

    #[test]
    fn test_empty_strings_count_as_missing() {
        let result = ActionResult {
            extracted_content: Some(String::new()),
            error: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            render(&history_of(vec![result])),
            "\nAgent Result:\n  No specific content or error extracted from the last step.\n  Task not marked as completed.\n"
        );
    }

    #[test]
    fn test_last_step_without_results() {
        let output = render(&history_of(vec![]));
        assert!(output.contains("No specific content or error extracted from the last step."));
        assert!(output.ends_with("  Task not marked as completed.\n"));
    }

    #[test]
    fn test_empty_history() {
        assert_eq!(
            render(&AgentHistoryList::default()),
            "\nAgent Result:\n  No history found or agent did not run.\n"
        );
    }

    #[test]
    fn test_banner() {
        let mut out = Vec::new();
        write_banner(&mut out, "Find the docs").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Starting agent with task: Find the docs\n");
    }
}
