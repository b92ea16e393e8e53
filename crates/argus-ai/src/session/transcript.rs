//! The bounded, role-tagged message history.

use crate::Message;

/// Upper bound on transcript length: one system message plus 20 turn messages.
pub const MAX_TRANSCRIPT_LEN: usize = 21;

/// Ordered message history whose first entry is always the system prompt.
///
/// Turns are committed whole (user and assistant together), so the
/// transcript only ever reflects successful exchanges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn seeded(system_prompt: &str) -> Self {
        Self {
            messages: vec![Message::system(system_prompt)],
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of non-system messages.
    pub fn turn_messages(&self) -> usize {
        self.messages.len().saturating_sub(1)
    }

    /// The request context for a pending user message: the transcript with
    /// `user` appended, truncated to the bound. The transcript is unchanged.
    pub(crate) fn context_with(&self, user: &Message) -> Vec<Message> {
        let mut context = Vec::with_capacity(self.messages.len() + 1);
        context.extend_from_slice(&self.messages);
        context.push(user.clone());
        truncate(&mut context);
        context
    }

    pub(crate) fn commit(&mut self, user: Message, assistant: Message) {
        self.messages.push(user);
        self.messages.push(assistant);
        truncate(&mut self.messages);
    }
}

/// Keep index 0 plus the most recent `MAX_TRANSCRIPT_LEN - 1` entries.
fn truncate(messages: &mut Vec<Message>) {
    if messages.len() > MAX_TRANSCRIPT_LEN {
        let excess = messages.len() - MAX_TRANSCRIPT_LEN;
        messages.drain(1..1 + excess);
    }
}
