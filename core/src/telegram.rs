//! Request builder and response parser for the Telegram Bot API `sendMessage`.

use serde::Serialize;
use serde_json::Value;

use crate::error::DeliveryError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Clone)]
pub struct TelegramApi {
    base_url: String,
    token: String,
}

impl std::fmt::Debug for TelegramApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramApi")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl TelegramApi {
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    pub fn build_send_message(&self, chat_id: &str, text: &str) -> Result<HttpRequest, DeliveryError> {
        let body = serde_json::to_string(&SendMessage { chat_id, text })
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/bot{}/sendMessage", self.base_url, self.token),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    /// A message counts as delivered only on 2xx with `"ok": true`.
    pub fn parse_send_message(&self, response: HttpResponse) -> Result<(), DeliveryError> {
        let accepted = response.is_success()
            && serde_json::from_slice::<Value>(&response.body)
                .ok()
                .and_then(|body| body.get("ok").and_then(Value::as_bool))
                .unwrap_or(false);
        if accepted {
            Ok(())
        } else {
            Err(DeliveryError::Rejected {
                status: response.status,
                body: response.text().into_owned(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> TelegramApi {
        TelegramApi::new("http://localhost:3000/", "123:abc")
    }

    #[test]
    fn build_send_message_produces_correct_request() {
        let req = api().build_send_message("42", "hello").unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3000/bot123:abc/sendMessage");
        assert_eq!(req.header("content-type"), Some("application/json"));
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["chat_id"], "42");
        assert_eq!(body["text"], "hello");
    }

    #[test]
    fn ok_response_is_delivered() {
        let response = HttpResponse::new(200, r#"{"ok":true,"result":{"message_id":1}}"#);
        assert_eq!(api().parse_send_message(response), Ok(()));
    }

    #[test]
    fn ok_false_is_rejected_even_on_200() {
        let response = HttpResponse::new(200, r#"{"ok":false}"#);
        assert!(matches!(
            api().parse_send_message(response),
            Err(DeliveryError::Rejected { status: 200, .. })
        ));
    }

    #[test]
    fn error_status_is_rejected() {
        let response = HttpResponse::new(400, r#"{"ok":false,"description":"Bad Request: chat not found"}"#);
        let err = api().parse_send_message(response).unwrap_err();
        assert!(matches!(err, DeliveryError::Rejected { status: 400, .. }));
    }

    #[test]
    fn debug_output_hides_token() {
        assert!(!format!("{:?}", api()).contains("abc"));
    }
}
