//! API client errors and the display-oriented error decoder.

use serde_json::Value;
use thiserror::Error;

use crate::transport::ApiResponse;

/// Errors that can occur when calling the backend services.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with a non-success status.
    #[error("Request failed with status code {}", .response.status.as_u16())]
    Status {
        /// URL of the request that produced the response, when known.
        request_url: Option<String>,
        response: Box<ApiResponse>,
    },

    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A header could not be built (e.g. a token with invalid characters).
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    /// JSON serialization or typed decoding failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    /// The backend response attached to this failure, if any.
    #[must_use]
    pub fn response(&self) -> Option<&ApiResponse> {
        match self {
            Self::Status { response, .. } => Some(&**response),
            _ => None,
        }
    }

    /// URL of the request that failed, if a response was received for it.
    #[must_use]
    pub fn request_url(&self) -> Option<&str> {
        match self {
            Self::Status { request_url, .. } => request_url.as_deref(),
            _ => None,
        }
    }

    /// Decode this failure into something presentable to a user.
    ///
    /// See [`decode_error`].
    #[must_use]
    pub fn decode(&self) -> ErrorPayload {
        decode_error(self)
    }
}

/// A decoded failure: either the backend's own JSON error body, or a message.
///
/// Callers branch on the variant; JSON payloads are passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorPayload {
    Json(Value),
    Message(String),
}

impl std::fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(value) => write!(f, "{value}"),
            Self::Message(message) => f.write_str(message),
        }
    }
}

/// Turn a failed call into a human-readable payload.
///
/// Precedence:
/// 1. a response with a JSON content type and a body: the body, verbatim
/// 2. a response for a known request URL: `HTTP <status>: API call failed: <url>`
/// 3. anything else: the error's `Display` output
#[must_use]
pub fn decode_error(err: &ApiError) -> ErrorPayload {
    if let Some(response) = err.response()
        && response.has_data()
        && response.is_json()
    {
        return ErrorPayload::Json(response.data.clone());
    }

    if let (Some(response), Some(url)) = (err.response(), err.request_url()) {
        return ErrorPayload::Message(format!(
            "HTTP {}: API call failed: {url}",
            response.status.as_u16()
        ));
    }

    ErrorPayload::Message(err.to_string())
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use serde_json::json;

    use super::*;

    fn status_error(response: ApiResponse, url: Option<&str>) -> ApiError {
        ApiError::Status {
            request_url: url.map(String::from),
            response: Box::new(response),
        }
    }

    #[test]
    fn test_decode_json_body_verbatim() {
        let body = json!({"title": "Not Found", "status": 404, "detail": "no such product"});
        let err = status_error(
            ApiResponse::json_body(StatusCode::NOT_FOUND, body.clone()),
            Some("http://gw/v1.0/invoke/products/method/get/99"),
        );
        assert_eq!(decode_error(&err), ErrorPayload::Json(body));
    }

    #[test]
    fn test_decode_non_json_response_formats_status_and_url() {
        let err = status_error(
            ApiResponse::new(StatusCode::INTERNAL_SERVER_ERROR, json!("boom")),
            Some("http://gw/v1.0/invoke/cart/method/submit"),
        );
        assert_eq!(
            decode_error(&err),
            ErrorPayload::Message(
                "HTTP 500: API call failed: http://gw/v1.0/invoke/cart/method/submit".to_string()
            )
        );
    }

    #[test]
    fn test_decode_json_content_type_without_body_falls_through() {
        let err = status_error(
            ApiResponse::json_body(StatusCode::BAD_GATEWAY, Value::Null),
            Some("http://gw/x"),
        );
        assert_eq!(
            decode_error(&err),
            ErrorPayload::Message("HTTP 502: API call failed: http://gw/x".to_string())
        );
    }

    #[test]
    fn test_decode_response_without_request_uses_display() {
        let err = status_error(ApiResponse::new(StatusCode::FORBIDDEN, Value::Null), None);
        assert_eq!(
            err.decode(),
            ErrorPayload::Message("Request failed with status code 403".to_string())
        );
    }

    #[test]
    fn test_decode_without_response_uses_display() {
        let err = ApiError::InvalidHeader("bad token".to_string());
        assert_eq!(
            decode_error(&err),
            ErrorPayload::Message("Invalid header value: bad token".to_string())
        );
    }

    #[test]
    fn test_error_payload_display() {
        assert_eq!(ErrorPayload::Json(json!({"a": 1})).to_string(), r#"{"a":1}"#);
        assert_eq!(ErrorPayload::Message("oops".to_string()).to_string(), "oops");
    }
}
