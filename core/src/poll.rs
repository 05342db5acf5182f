//! One iteration of the polling loop and the state carried between iterations.
//!
//! # Design
//! `Poller::tick` runs fetch → validate → format → notify exactly once and
//! never sleeps. The caller owns `PollState` and the schedule, so a single
//! iteration can be driven from tests without an infinite loop.

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::error::PollError;
use crate::format::format_status;
use crate::notify::{ChatTransport, Notifier};
use crate::types::ApiResponse;

/// Source of raw homework API responses, keyed by the `from_date` cursor.
pub trait HomeworkSource {
    fn fetch(&self, since: i64) -> Result<Value, PollError>;
}

impl<S: HomeworkSource + ?Sized> HomeworkSource for &S {
    fn fetch(&self, since: i64) -> Result<Value, PollError> {
        (**self).fetch(since)
    }
}

/// Process-local state carried from one iteration to the next.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PollState {
    /// `from_date` cursor for the next fetch.
    pub timestamp: i64,
    /// Homeworks seen by the last notification, compared as a whole sequence.
    pub previous_homeworks: Vec<Value>,
    /// Text of the last failure report sent to the chat.
    pub previous_error_message: String,
}

impl PollState {
    pub fn starting_at(timestamp: i64) -> Self {
        Self {
            timestamp,
            ..Self::default()
        }
    }
}

/// What a single iteration did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The first homework's status was sent to the chat.
    Notified,
    /// Homeworks were returned but match the last notified sequence.
    Unchanged,
    /// The API returned no homeworks.
    NoUpdates,
    /// The iteration failed; `reported` is false when the same failure text
    /// had already been sent.
    Failed { reported: bool },
}

/// Text sent to the chat when an iteration fails.
pub fn failure_message(error: &PollError) -> String {
    format!("Сбой в работе программы: {error}")
}

pub struct Poller<S, T> {
    source: S,
    notifier: Notifier<T>,
}

impl<S: HomeworkSource, T: ChatTransport> Poller<S, T> {
    pub fn new(source: S, notifier: Notifier<T>) -> Self {
        Self { source, notifier }
    }

    pub fn notifier(&self) -> &Notifier<T> {
        &self.notifier
    }

    /// Run one iteration. Every `PollError` is caught here, logged, and
    /// reported unless it repeats the last reported failure.
    pub fn tick(&self, state: &mut PollState) -> TickOutcome {
        match self.poll(state) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("polling iteration failed: {e}");
                let message = failure_message(&e);
                if message == state.previous_error_message {
                    debug!("failure already reported, not sending again");
                    return TickOutcome::Failed { reported: false };
                }
                self.notifier.send(&message);
                state.previous_error_message = message;
                TickOutcome::Failed { reported: true }
            }
        }
    }

    fn poll(&self, state: &mut PollState) -> Result<TickOutcome, PollError> {
        let response = ApiResponse::try_from(self.source.fetch(state.timestamp)?)?;

        match response.current_date {
            Some(cursor) => state.timestamp = cursor,
            None => warn!(
                "response has no usable current_date, keeping cursor {}",
                state.timestamp
            ),
        }

        let Some(latest) = response.homeworks.first() else {
            debug!("no updates");
            return Ok(TickOutcome::NoUpdates);
        };
        if response.homeworks == state.previous_homeworks {
            debug!("homework statuses unchanged");
            return Ok(TickOutcome::Unchanged);
        }

        let text = format_status(latest)?;
        self.notifier.send(&text);
        state.previous_homeworks = response.homeworks;
        Ok(TickOutcome::Notified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeliveryError;
    use serde_json::json;
    use std::cell::RefCell;

    struct Fixed(Result<Value, PollError>);

    impl HomeworkSource for Fixed {
        fn fetch(&self, _since: i64) -> Result<Value, PollError> {
            self.0.clone()
        }
    }

    #[derive(Default)]
    struct Recorder(RefCell<Vec<String>>);

    impl ChatTransport for Recorder {
        fn send_message(&self, _chat_id: &str, text: &str) -> Result<(), DeliveryError> {
            self.0.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    fn poller(response: Result<Value, PollError>) -> Poller<Fixed, Recorder> {
        Poller::new(Fixed(response), Notifier::new(Recorder::default(), "1"))
    }

    fn sent(poller: &Poller<Fixed, Recorder>) -> Vec<String> {
        poller.notifier().transport().0.borrow().clone()
    }

    #[test]
    fn empty_homeworks_only_advance_cursor() {
        let poller = poller(Ok(json!({"homeworks": [], "current_date": 1000})));
        let mut state = PollState::starting_at(1);
        assert_eq!(poller.tick(&mut state), TickOutcome::NoUpdates);
        assert_eq!(state, PollState::starting_at(1000));
        assert!(sent(&poller).is_empty());
    }

    #[test]
    fn new_homeworks_are_notified_once() {
        let homeworks = json!([{"homework_name": "HW1", "status": "rejected"}]);
        let poller = poller(Ok(json!({"homeworks": homeworks.clone(), "current_date": 2000})));
        let mut state = PollState::starting_at(1);

        assert_eq!(poller.tick(&mut state), TickOutcome::Notified);
        assert_eq!(poller.tick(&mut state), TickOutcome::Unchanged);
        assert_eq!(sent(&poller).len(), 1);
        assert_eq!(state.timestamp, 2000);
        assert_eq!(Value::Array(state.previous_homeworks), homeworks);
    }

    #[test]
    fn missing_cursor_keeps_previous_timestamp() {
        let poller = poller(Ok(json!({
            "homeworks": [{"homework_name": "HW1", "status": "approved"}]
        })));
        let mut state = PollState::starting_at(500);
        assert_eq!(poller.tick(&mut state), TickOutcome::Notified);
        assert_eq!(state.timestamp, 500);
    }

    #[test]
    fn repeated_failure_is_reported_once() {
        let poller = poller(Err(PollError::Connectivity("HTTP 503".to_string())));
        let mut state = PollState::starting_at(1);

        assert_eq!(poller.tick(&mut state), TickOutcome::Failed { reported: true });
        assert_eq!(poller.tick(&mut state), TickOutcome::Failed { reported: false });
        assert_eq!(
            sent(&poller),
            vec!["Сбой в работе программы: homework API is unreachable: HTTP 503".to_string()]
        );
        assert_eq!(state.timestamp, 1);
    }

    #[test]
    fn format_failure_does_not_mark_homeworks_seen() {
        let poller = poller(Ok(json!({
            "homeworks": [{"homework_name": "HW1", "status": "weird_code"}],
            "current_date": 3000
        })));
        let mut state = PollState::starting_at(1);

        assert_eq!(poller.tick(&mut state), TickOutcome::Failed { reported: true });
        assert!(state.previous_homeworks.is_empty());
        assert_eq!(state.timestamp, 3000);
        assert_eq!(
            state.previous_error_message,
            failure_message(&PollError::UnknownStatus("weird_code".to_string()))
        );
    }
}
