//! Blocking execution of core `HttpRequest`s with `ureq`.
//!
//! # Design
//! Status codes are returned as data rather than errors, so the core parsers
//! decide what a 4xx/5xx means, and bodies as raw bytes, so the parsers
//! decide what undecodable text means. Only transport failures (DNS,
//! connect, timeout, body read) come back as `ureq::Error`.

use std::time::Duration;

use homework_core::{HttpMethod, HttpRequest, HttpResponse};

/// Build the shared agent used for both remote APIs.
pub fn agent(timeout: Duration) -> ureq::Agent {
    ureq::Agent::config_builder()
        .http_status_as_error(false)
        .timeout_global(Some(timeout))
        .build()
        .new_agent()
}

/// Execute `req` and return the response as plain data.
pub fn execute(agent: &ureq::Agent, req: &HttpRequest) -> Result<HttpResponse, ureq::Error> {
    let mut response = match req.method {
        HttpMethod::Get => {
            let mut builder = agent.get(&req.url);
            for (name, value) in &req.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            builder.call()?
        }
        HttpMethod::Post => {
            let mut builder = agent.post(&req.url);
            for (name, value) in &req.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            match &req.body {
                Some(body) => builder.send(body.as_bytes())?,
                None => builder.send_empty()?,
            }
        }
    };

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_vec()?;
    Ok(HttpResponse { status, body })
}
