//! Error taxonomy for Chatwork API calls
//!
//! Every operation reports failures through [`ChatworkError`]. HTTP status
//! codes are mapped by [`classify`] so the same policy applies to all tools.

use std::fmt;

use thiserror::Error;

/// Documented remote quota, reported but not enforced.
pub const RATE_LIMIT_REQUESTS: u32 = 300;
pub const RATE_LIMIT_WINDOW_MINUTES: u32 = 5;

/// What an operation targets; selects forbidden/not-found wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Room,
    Message,
    Task,
}

impl Resource {
    fn not_found_subject(self) -> &'static str {
        match self {
            Resource::Room => "Room",
            Resource::Message => "Room or message",
            Resource::Task => "Room or task",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Resource::Room => "room",
            Resource::Message => "message",
            Resource::Task => "task",
        })
    }
}

#[derive(Debug, Error)]
pub enum ChatworkError {
    #[error(
        "Chatwork API token is not configured. Set the CHATWORK_API_TOKEN environment \
         variable."
    )]
    UnconfiguredCredential,

    #[error("Chatwork API token is invalid (HTTP 401)")]
    InvalidCredential,

    #[error("{0}")]
    InvalidArgument(String),

    #[error(
        "Invalid path format: {path}. Run `pwd` in the host shell and pass the printed \
         directory unchanged (on Windows use the C:\\Users\\... form)."
    )]
    InvalidPath { path: String },

    #[error("No permission to access this {0}")]
    Forbidden(Resource),

    #[error("{} not found", .0.not_found_subject())]
    NotFound(Resource),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(
        "API rate limit exceeded ({} requests per {} minutes)",
        RATE_LIMIT_REQUESTS,
        RATE_LIMIT_WINDOW_MINUTES
    )]
    RateLimited,

    #[error("API error: HTTP {status}{}", detail_suffix(.detail))]
    Api { status: u16, detail: Option<String> },

    #[error("Failed to parse API response: {0}")]
    Parse(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to write message archive: {0}")]
    Io(#[from] std::io::Error),
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(body) => format!(", detail: {}", body),
        None => String::new(),
    }
}

impl ChatworkError {
    /// Stable machine-readable kind reported to the host.
    pub fn kind(&self) -> &'static str {
        match self {
            ChatworkError::UnconfiguredCredential => "unconfigured_credential",
            ChatworkError::InvalidCredential => "invalid_credential",
            ChatworkError::InvalidArgument(_) => "invalid_argument",
            ChatworkError::InvalidPath { .. } => "invalid_path",
            ChatworkError::Forbidden(_) => "forbidden",
            ChatworkError::NotFound(_) => "not_found",
            ChatworkError::BadRequest(_) => "bad_request",
            ChatworkError::RateLimited => "rate_limited",
            ChatworkError::Api { .. } | ChatworkError::Parse(_) => "api_error",
            ChatworkError::Network(_) => "network_error",
            ChatworkError::Io(_) => "io_error",
        }
    }

    /// HTTP status behind the error, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ChatworkError::InvalidCredential => Some(401),
            ChatworkError::BadRequest(_) => Some(400),
            ChatworkError::Forbidden(_) => Some(403),
            ChatworkError::NotFound(_) => Some(404),
            ChatworkError::RateLimited => Some(429),
            ChatworkError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Caller-side failure that never reached the network.
    pub fn is_invalid_params(&self) -> bool {
        matches!(
            self,
            ChatworkError::InvalidArgument(_) | ChatworkError::InvalidPath { .. }
        )
    }
}

/// Map an HTTP status to success or a classified error.
///
/// `write` marks form-posting operations: only they report 400 as a bad
/// request and carry the response body on other failures.
pub fn classify(
    status: u16,
    body: &str,
    resource: Resource,
    write: bool,
) -> Result<(), ChatworkError> {
    match (status, write) {
        (200..=299, _) => Ok(()),
        (401, _) => Err(ChatworkError::InvalidCredential),
        (400, true) => Err(ChatworkError::BadRequest(body.to_string())),
        (403, _) => Err(ChatworkError::Forbidden(resource)),
        (404, _) => Err(ChatworkError::NotFound(resource)),
        (429, _) => Err(ChatworkError::RateLimited),
        (status, write) => Err(ChatworkError::Api {
            status,
            detail: write.then(|| body.to_string()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(status: u16, write: bool) -> &'static str {
        match classify(status, "{\"errors\":[\"x\"]}", Resource::Room, write) {
            Ok(()) => "ok",
            Err(e) => e.kind(),
        }
    }

    #[test]
    fn test_read_classification() {
        assert_eq!(kind_of(200, false), "ok");
        assert_eq!(kind_of(204, false), "ok");
        assert_eq!(kind_of(400, false), "api_error");
        assert_eq!(kind_of(401, false), "invalid_credential");
        assert_eq!(kind_of(403, false), "forbidden");
        assert_eq!(kind_of(404, false), "not_found");
        assert_eq!(kind_of(429, false), "rate_limited");
        assert_eq!(kind_of(500, false), "api_error");
    }

    #[test]
    fn test_write_classification() {
        assert_eq!(kind_of(200, true), "ok");
        assert_eq!(kind_of(400, true), "bad_request");
        assert_eq!(kind_of(401, true), "invalid_credential");
        assert_eq!(kind_of(403, true), "forbidden");
        assert_eq!(kind_of(404, true), "not_found");
        assert_eq!(kind_of(429, true), "rate_limited");
        assert_eq!(kind_of(503, true), "api_error");
    }

    #[test]
    fn test_bad_request_carries_body() {
        let err = classify(400, "{\"errors\":[\"body is required\"]}", Resource::Task, true)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Bad request: {\"errors\":[\"body is required\"]}"
        );
    }

    #[test]
    fn test_generic_error_detail_only_for_writes() {
        let read = classify(500, "boom", Resource::Room, false).unwrap_err();
        assert_eq!(read.to_string(), "API error: HTTP 500");

        let write = classify(500, "boom", Resource::Room, true).unwrap_err();
        assert_eq!(write.to_string(), "API error: HTTP 500, detail: boom");
        assert_eq!(write.status(), Some(500));
    }

    #[test]
    fn test_resource_wording() {
        let err = classify(403, "", Resource::Message, false).unwrap_err();
        assert_eq!(err.to_string(), "No permission to access this message");

        let err = classify(404, "", Resource::Task, false).unwrap_err();
        assert_eq!(err.to_string(), "Room or task not found");

        let err = classify(404, "", Resource::Room, false).unwrap_err();
        assert_eq!(err.to_string(), "Room not found");
    }

    #[test]
    fn test_rate_limit_mentions_quota() {
        let msg = classify(429, "", Resource::Room, false)
            .unwrap_err()
            .to_string();
        assert!(msg.contains("300 requests per 5 minutes"));
    }
}
