use crate::error::MessagesError;
use crate::message::Message;

/// The host conversation a poll lives in.
pub trait Conversation {
    /// Message the participant opened, if any.
    fn selected_message(&self) -> Option<&Message>;

    fn insert(&mut self, message: Message) -> Result<(), MessagesError>;
}

/// Conversation thread kept in memory; the last inserted message becomes the
/// selected one.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConversation {
    messages: Vec<Message>,
    selected: Option<usize>,
    closed: bool,
}

impl InMemoryConversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// A conversation whose only message is already selected.
    pub fn with_message(message: Message) -> Self {
        Self {
            messages: vec![message],
            selected: Some(0),
            closed: false,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Select the message at `index`; out-of-range indices clear the selection.
    pub fn select(&mut self, index: usize) {
        self.selected = (index < self.messages.len()).then_some(index);
    }

    /// Reject further inserts.
    pub fn close(&mut self) {
        self.closed = true;
    }
}

impl Conversation for InMemoryConversation {
    fn selected_message(&self) -> Option<&Message> {
        self.selected.and_then(|i| self.messages.get(i))
    }

    fn insert(&mut self, message: Message) -> Result<(), MessagesError> {
        if self.closed {
            return Err(MessagesError::Insert("conversation is closed".to_string()));
        }
        self.messages.push(message);
        self.selected = Some(self.messages.len() - 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn test_message() -> Message {
        Message::received(Url::parse("timeshare://vote").unwrap())
    }

    #[test]
    fn insert_selects_the_new_message() {
        let mut conversation = InMemoryConversation::new();
        assert!(conversation.selected_message().is_none());

        let message = test_message();
        conversation.insert(message.clone()).unwrap();
        assert_eq!(conversation.selected_message(), Some(&message));
    }

    #[test]
    fn select_out_of_range_clears_selection() {
        let mut conversation = InMemoryConversation::with_message(test_message());
        conversation.select(5);
        assert!(conversation.selected_message().is_none());
        conversation.select(0);
        assert!(conversation.selected_message().is_some());
    }

    #[test]
    fn closed_conversation_rejects_inserts() {
        let mut conversation = InMemoryConversation::new();
        conversation.close();
        let err = conversation.insert(test_message()).unwrap_err();
        assert!(matches!(err, MessagesError::Insert(_)));
        assert!(conversation.messages().is_empty());
    }
}
