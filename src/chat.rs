use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

const FALLBACK_REPLIES: &[&str] = &[
    "Tell me more about what you're working on and I'll point you to the right practice set.",
    "A short daily session beats a long weekend cram - want to keep your streak going today?",
    "Try rephrasing that, or ask me about your streak, your scores, or what to study next.",
];

/// Canned study-coach reply. Real tutoring lives behind the backend
/// API; this stub only matches a few keywords and otherwise picks a
/// generic nudge at random.
pub fn reply_for(message: &str) -> String {
    let message = message.to_lowercase();

    if message.contains("streak") {
        return "Your streak counts every consecutive day with at least one practice session. \
                Do one today and it keeps growing!"
            .to_string();
    }
    if message.contains("exam") || message.contains("test") {
        return "Check the performance chart on your dashboard - your best-scoring month is \
                highlighted there."
            .to_string();
    }
    if message.contains("quiz") || message.contains("practice") {
        return "Head to your classroom page and start a practice set. Every completed session \
                counts toward today's activity."
            .to_string();
    }
    if message.contains("hello") || message.contains("hi") {
        return "Hi! I'm your study buddy. Ask me about your streak, your scores, or what to \
                practice next."
            .to_string();
    }

    let mut rng = rand::thread_rng();
    FALLBACK_REPLIES[rng.gen_range(0..FALLBACK_REPLIES.len())].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_replies_are_deterministic() {
        assert!(reply_for("How does my STREAK work?").contains("consecutive day"));
        assert!(reply_for("when is the next exam").contains("performance chart"));
        assert!(reply_for("give me a practice quiz").contains("practice set"));
    }

    #[test]
    fn unknown_messages_get_a_fallback() {
        let reply = reply_for("zzzzz");
        assert!(FALLBACK_REPLIES.contains(&reply.as_str()));
    }
}
