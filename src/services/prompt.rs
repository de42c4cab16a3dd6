// src/services/prompt.rs
use serde::Serialize;

use super::governor::ValidatedMessage;

/// Fixed persona sent as the system message on every upstream call.
pub const SYSTEM_PROMPT: &str = "\
You are NexusAI, an intelligent and informative AI assistant created by Alvee Mahmud, a talented developer from Bangladesh. \
Your purpose is to assist users with accurate, detailed, and helpful information on a wide range of topics, including:
- Technology
- Science
- Business
- Education
- Health
- General knowledge

Always respond in a friendly, professional, and approachable tone. If the user asks for help, provide clear and actionable advice. \
If you don't know the answer, be honest and let the user know. \
Encourage users to ask follow-up questions and strive to make every interaction informative and engaging.";

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

/// Combine the system instruction and the validated user text into the
/// message list for the chat-completions API: always two entries, system
/// first, user text verbatim.
pub fn compose(system_prompt: &str, message: &ValidatedMessage) -> Vec<ChatMessage> {
    vec![
        ChatMessage {
            role: "system",
            content: system_prompt.to_string(),
        },
        ChatMessage {
            role: "user",
            content: message.text().to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::governor::AdmissionGovernor;
    use std::time::{Duration, Instant};

    fn validated(text: &str) -> ValidatedMessage {
        AdmissionGovernor::new(500, Duration::from_secs(12), 16)
            .admit("test", text, Instant::now())
            .unwrap()
    }

    #[test]
    fn two_entries_system_first_user_verbatim() {
        let msg = validated("Capital of France?");
        let messages = compose(SYSTEM_PROMPT, &msg);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, SYSTEM_PROMPT);
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[1].content, "Capital of France?");
    }

    #[test]
    fn deterministic_for_same_inputs() {
        let msg = validated("hello");
        let a = compose("be terse", &msg);
        let b = compose("be terse", &msg);
        assert_eq!(a[0].content, b[0].content);
        assert_eq!(a[1].content, b[1].content);
    }
}
