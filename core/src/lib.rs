//! Homework status relay core.
//!
//! # Overview
//! Polls the homework review API, detects when the most recent submission
//! changes, and forwards a readable verdict to one chat. Requests and
//! responses are plain data (host-does-IO pattern): this crate builds
//! `HttpRequest` values and parses `HttpResponse` values, and the host binary
//! executes the actual round-trips and owns the schedule.
//!
//! # Design
//! - `HomeworkClient` and `TelegramApi` are stateless build/parse pairs.
//! - `check_response` and `format_status` are pure apart from logging.
//! - `Poller::tick` runs one iteration against injected `HomeworkSource` and
//!   `ChatTransport` seams, mutating a caller-owned `PollState`.
//! - Records stay as `serde_json::Value` so change detection compares
//!   whatever the API sent.

pub mod catalog;
pub mod client;
pub mod error;
pub mod format;
pub mod http;
pub mod notify;
pub mod poll;
pub mod telegram;
pub mod types;
pub mod validate;

pub use catalog::HomeworkStatus;
pub use client::HomeworkClient;
pub use error::{DeliveryError, PollError};
pub use format::format_status;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use notify::{ChatTransport, Notifier};
pub use poll::{failure_message, HomeworkSource, PollState, Poller, TickOutcome};
pub use telegram::TelegramApi;
pub use types::ApiResponse;
pub use validate::check_response;
