use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const HOMEWORK_PATH: &str = "/api/user_api/homework_statuses/";

/// A canned homework API reply: status code plus raw body.
#[derive(Clone, Debug)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn json(value: Value) -> Self {
        Self {
            status: 200,
            body: value.to_string(),
        }
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

/// One request seen on the homework endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedFetch {
    pub from_date: Option<String>,
    pub authorization: Option<String>,
}

/// One message accepted (or refused) on `sendMessage`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedMessage {
    /// Path segment before `/sendMessage`, i.e. `bot<token>`.
    pub bot: String,
    pub chat_id: String,
    pub text: String,
}

#[derive(Deserialize)]
pub struct SendMessage {
    pub chat_id: Value,
    pub text: String,
}

#[derive(Serialize)]
struct SentMessage {
    message_id: usize,
    text: String,
}

#[derive(Default)]
struct Inner {
    replies: VecDeque<Reply>,
    fallback: Option<Reply>,
    fetches: Vec<RecordedFetch>,
    messages: Vec<RecordedMessage>,
    reject_messages: bool,
}

/// Shared, scriptable state behind both fake APIs.
///
/// Replies are served in push order; once exhausted, the fallback is served,
/// or an empty homework list echoing `from_date` as `current_date`.
#[derive(Clone, Default)]
pub struct MockState {
    inner: Arc<Mutex<Inner>>,
}

impl MockState {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push_reply(&self, reply: Reply) {
        self.lock().replies.push_back(reply);
    }

    pub fn set_fallback(&self, reply: Reply) {
        self.lock().fallback = Some(reply);
    }

    pub fn reject_messages(&self, reject: bool) {
        self.lock().reject_messages = reject;
    }

    pub fn fetches(&self) -> Vec<RecordedFetch> {
        self.lock().fetches.clone()
    }

    pub fn messages(&self) -> Vec<RecordedMessage> {
        self.lock().messages.clone()
    }
}

pub fn app(state: MockState) -> Router {
    Router::new()
        .route(HOMEWORK_PATH, get(homework_statuses))
        .route("/{bot}/sendMessage", post(send_message))
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: MockState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}

async fn homework_statuses(
    State(state): State<MockState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let from_date = params.get("from_date").cloned();

    let reply = {
        let mut inner = state.lock();
        inner.fetches.push(RecordedFetch {
            from_date: from_date.clone(),
            authorization: authorization.clone(),
        });
        if authorization.is_none() {
            None
        } else {
            let next = inner.replies.pop_front();
            let fallback = inner.fallback.clone();
            Some(next.or(fallback).unwrap_or_else(|| empty_reply(from_date.as_deref())))
        }
    };

    match reply {
        Some(reply) => raw_json(reply.status, reply.body),
        None => raw_json(
            401,
            json!({"code": "not_authenticated", "message": "Учетные данные не были предоставлены."})
                .to_string(),
        ),
    }
}

async fn send_message(
    State(state): State<MockState>,
    Path(bot): Path<String>,
    Json(input): Json<SendMessage>,
) -> (StatusCode, Json<Value>) {
    let chat_id = match input.chat_id {
        Value::String(s) => s,
        other => other.to_string(),
    };
    let mut inner = state.lock();
    inner.messages.push(RecordedMessage {
        bot,
        chat_id,
        text: input.text.clone(),
    });
    if inner.reject_messages {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"ok": false, "error_code": 400, "description": "Bad Request: chat not found"})),
        );
    }
    let sent = SentMessage {
        message_id: inner.messages.len(),
        text: input.text,
    };
    (StatusCode::OK, Json(json!({"ok": true, "result": sent})))
}

fn empty_reply(from_date: Option<&str>) -> Reply {
    let current_date = from_date.and_then(|s| s.parse::<i64>().ok()).unwrap_or(0);
    Reply::json(json!({"homeworks": [], "current_date": current_date}))
}

fn raw_json(status: u16, body: String) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}
