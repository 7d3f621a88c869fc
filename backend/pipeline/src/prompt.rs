//! Prompt assembly for the completion provider.

use chol_core::{ChatMessage, Sender};

/// Fixed persona preamble describing the assistant and its domain.
const SYSTEM_PREAMBLE: &str = "You are Chol (சொல்), an AI assistant for Uyir Mei, \
a non-profit organization focused on community service in India. Provide helpful, \
accurate, and compassionate information about our services, donation options, \
volunteer opportunities, and other related inquiries. Keep responses concise and focused.";

/// How many trailing history messages are rendered into the prompt.
const HISTORY_MESSAGES: usize = 3;

/// Render the persona preamble, trailing history, and current query into
/// a single prompt ending with an `Assistant: ` cue.
pub fn build_prompt(history: &[ChatMessage], query: &str) -> String {
    let mut prompt = format!("{SYSTEM_PREAMBLE}\n\n");

    let start = history.len().saturating_sub(HISTORY_MESSAGES);
    for msg in &history[start..] {
        let role = match msg.sender {
            Sender::Bot => "Assistant",
            Sender::User => "User",
        };
        prompt.push_str(&format!("{role}: {}\n", msg.text));
    }

    prompt.push_str(&format!("User: {query}\nAssistant: "));
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history() {
        let prompt = build_prompt(&[], "How do I donate?");
        assert!(prompt.starts_with("You are Chol"));
        assert!(prompt.ends_with("User: How do I donate?\nAssistant: "));
    }

    #[test]
    fn test_roles_rendered() {
        let history = vec![ChatMessage::user("hello"), ChatMessage::bot("hi, how can I help?")];
        let prompt = build_prompt(&history, "donations");
        assert!(prompt.contains("User: hello\n"));
        assert!(prompt.contains("Assistant: hi, how can I help?\n"));
    }

    #[test]
    fn test_only_last_three_messages() {
        let history = vec![
            ChatMessage::user("one"),
            ChatMessage::bot("two"),
            ChatMessage::user("three"),
            ChatMessage::bot("four"),
        ];
        let prompt = build_prompt(&history, "q");
        assert!(!prompt.contains("User: one"));
        assert!(prompt.contains("Assistant: two"));
        assert!(prompt.contains("User: three"));
        assert!(prompt.contains("Assistant: four"));
    }
}
