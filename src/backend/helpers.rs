use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{
    invalid_input_error, malformed_response_error, rejected_error, unauthorized_error,
    upstream_error, Error,
};

/// Sends a backend request and unwraps the `{ success, message, ... }` envelope.
pub async fn read<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, Error> {
    let res = request.send().await?;
    let status = res.status();
    let bytes = res.bytes().await?;

    let body: Value = match bytes.is_empty() {
        true => Value::Null,
        false => match serde_json::from_slice(&bytes) {
            Ok(body) => body,
            Err(err) if status.is_success() => return Err(malformed_response_error(err)),
            Err(_) => Value::Null,
        },
    };

    if !status.is_success() {
        tracing::warn!(status = status.as_u16(), "backend request failed");
        return Err(status_error(status, &body));
    }

    if body.get("success") == Some(&Value::Bool(false)) {
        let message = message(&body).unwrap_or("request rejected");
        tracing::warn!(reason = message, "backend rejected request");
        return Err(rejected_error(message));
    }

    Ok(serde_json::from_value(body)?)
}

fn message(body: &Value) -> Option<&str> {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
}

fn status_error(status: StatusCode, body: &Value) -> Error {
    if let Some(message) = message(body) {
        return rejected_error(message);
    }

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => unauthorized_error(),
        s if s.is_client_error() => invalid_input_error(),
        _ => upstream_error(),
    }
}
