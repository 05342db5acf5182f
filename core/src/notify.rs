//! Fire-and-forget delivery of chat messages.
//!
//! # Design
//! The transport is injected through `ChatTransport` so tests can swap in a
//! recorder. `Notifier::send` never fails: delivery problems are logged and
//! dropped so the poll loop keeps its schedule.

use tracing::{debug, error};

use crate::error::DeliveryError;

/// Something that can post a text message to a chat.
pub trait ChatTransport {
    fn send_message(&self, chat_id: &str, text: &str) -> Result<(), DeliveryError>;
}

impl<T: ChatTransport + ?Sized> ChatTransport for &T {
    fn send_message(&self, chat_id: &str, text: &str) -> Result<(), DeliveryError> {
        (**self).send_message(chat_id, text)
    }
}

/// Sends messages to the single configured destination chat.
#[derive(Debug)]
pub struct Notifier<T> {
    transport: T,
    chat_id: String,
}

impl<T: ChatTransport> Notifier<T> {
    pub fn new(transport: T, chat_id: &str) -> Self {
        Self {
            transport,
            chat_id: chat_id.to_string(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Deliver `text`, logging instead of returning any failure.
    pub fn send(&self, text: &str) {
        match self.transport.send_message(&self.chat_id, text) {
            Ok(()) => debug!("message sent to chat {}", self.chat_id),
            Err(e) => error!("failed to send message to chat {}: {e}", self.chat_id),
        }
    }
}
