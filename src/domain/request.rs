use crate::domain::value::{MessageText, Recipients, SenderId};

#[derive(Debug, Clone, PartialEq, Eq)]
/// One message to one or many recipients, sent through the single-send endpoint.
pub struct SendSms {
    from: SenderId,
    to: Recipients,
    text: MessageText,
}

impl SendSms {
    pub fn new(from: SenderId, to: impl Into<Recipients>, text: MessageText) -> Self {
        Self {
            from,
            to: to.into(),
            text,
        }
    }

    /// Send from the shared `NEXTSMS` sender id.
    pub fn with_default_sender(to: impl Into<Recipients>, text: MessageText) -> Self {
        Self::new(SenderId::default(), to, text)
    }

    pub fn from(&self) -> &SenderId {
        &self.from
    }

    pub fn to(&self) -> &Recipients {
        &self.to
    }

    pub fn text(&self) -> &MessageText {
        &self.text
    }
}

/// A fully-specified element of a bulk request.
pub type BulkMessage = SendSms;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Ordered batch of messages for the bulk-send endpoint.
///
/// Each element carries its own sender, recipients, and text. An empty batch is
/// allowed and is sent as-is.
pub struct SendBulk {
    messages: Vec<BulkMessage>,
}

impl SendBulk {
    pub fn new(messages: Vec<BulkMessage>) -> Self {
        Self { messages }
    }

    pub fn push(&mut self, message: BulkMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[BulkMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl FromIterator<BulkMessage> for SendBulk {
    fn from_iter<T: IntoIterator<Item = BulkMessage>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
