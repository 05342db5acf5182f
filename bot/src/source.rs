//! Live implementations of the core's I/O seams.

use homework_core::{
    ChatTransport, DeliveryError, HomeworkClient, HomeworkSource, PollError, TelegramApi,
};
use serde_json::Value;

use crate::transport::execute;

/// Fetches homework statuses from the remote API over HTTP.
#[derive(Clone)]
pub struct PracticumSource {
    client: HomeworkClient,
    agent: ureq::Agent,
}

impl PracticumSource {
    pub fn new(client: HomeworkClient, agent: ureq::Agent) -> Self {
        Self { client, agent }
    }
}

impl HomeworkSource for PracticumSource {
    fn fetch(&self, since: i64) -> Result<Value, PollError> {
        let request = self.client.build_fetch(since);
        let response = execute(&self.agent, &request).map_err(|e| self.client.unreachable(e))?;
        self.client.parse_fetch(response)
    }
}

/// Posts chat messages through the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramTransport {
    api: TelegramApi,
    agent: ureq::Agent,
}

impl TelegramTransport {
    pub fn new(api: TelegramApi, agent: ureq::Agent) -> Self {
        Self { api, agent }
    }
}

impl ChatTransport for TelegramTransport {
    fn send_message(&self, chat_id: &str, text: &str) -> Result<(), DeliveryError> {
        let request = self.api.build_send_message(chat_id, text)?;
        let response = execute(&self.agent, &request)
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;
        self.api.parse_send_message(response)
    }
}
