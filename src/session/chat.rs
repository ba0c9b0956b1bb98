use crate::common::{ChatMessage, ReplyOutcome, Sender};

/// Log tin nhắn trong phiên + nội dung ô nhập.
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    pub input_text: String,
    fallback_reply: String,
    transport_error_bubble: bool,
    scroll_pending: bool,
}

impl ChatSession {
    pub fn new(fallback_reply: impl Into<String>, transport_error_bubble: bool) -> Self {
        Self {
            messages: Vec::new(),
            input_text: String::new(),
            fallback_reply: fallback_reply.into(),
            transport_error_bubble,
            scroll_pending: false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Echoes the input into the log and clears the field. Returns the raw
    /// text to send, or `None` when the input is blank.
    pub fn submit(&mut self) -> Option<String> {
        if self.input_text.trim().is_empty() {
            return None;
        }

        let text = std::mem::take(&mut self.input_text);
        self.push(ChatMessage::new(Sender::User, text.clone()));
        Some(text)
    }

    pub fn apply_reply(&mut self, outcome: ReplyOutcome) {
        match outcome {
            ReplyOutcome::Answered(text) => self.push(ChatMessage::new(Sender::Bot, text)),
            ReplyOutcome::Rejected { status } => {
                log::debug!("Showing fallback reply for status {status}");
                let text = self.fallback_reply.clone();
                self.push(ChatMessage::new(Sender::Bot, text));
            }
            ReplyOutcome::TransportFailed(err) => {
                log::debug!("No reply bubble for transport failure: {err}");
                if self.transport_error_bubble {
                    let text = self.fallback_reply.clone();
                    self.push(ChatMessage::new(Sender::Bot, text));
                }
            }
        }
    }

    /// True once after every change of the log.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_pending)
    }

    fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
        self.scroll_pending = true;
    }
}
