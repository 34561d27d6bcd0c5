//! Error types raised by the Gnocchi HTTP client.
//!
//! # Design
//! - Status-derived variants carry the service's own message so callers can
//!   relay it unchanged.
//! - Transport and decode failures keep the reqwest error as their source.

use gnocchi_models::ErrorBody;
use reqwest::StatusCode;
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors produced while talking to the service.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The addressed resource does not exist.
    #[error("{message} (HTTP 404)")]
    NotFound {
        /// Message reported by the service.
        message: String,
    },
    /// The resource already exists or is still in use.
    #[error("{message} (HTTP 409)")]
    Conflict {
        /// Message reported by the service.
        message: String,
    },
    /// The service rejected the request body.
    #[error("{message} (HTTP 400)")]
    BadRequest {
        /// Message reported by the service.
        message: String,
    },
    /// Missing or insufficient credentials.
    #[error("{message} (HTTP {status})")]
    Unauthorized {
        /// 401 or 403.
        status: u16,
        /// Message reported by the service.
        message: String,
    },
    /// Any other non-success status.
    #[error("{message} (HTTP {status})")]
    Http {
        /// Response status code.
        status: u16,
        /// Message reported by the service.
        message: String,
    },
    /// The request never produced a response.
    #[error("request to {url} failed")]
    Transport {
        /// Target URL.
        url: String,
        /// Underlying reqwest error.
        source: reqwest::Error,
    },
    /// The response body did not match the expected document.
    #[error("failed to decode {what} response")]
    Decode {
        /// Document being decoded.
        what: &'static str,
        /// Underlying reqwest error.
        source: reqwest::Error,
    },
    /// The configured endpoint cannot address API paths.
    #[error("invalid endpoint URL '{endpoint}'")]
    InvalidEndpoint {
        /// Offending endpoint.
        endpoint: String,
    },
    /// A path segment would be collapsed by URL normalisation.
    #[error("invalid path segment '{segment}'")]
    InvalidPathSegment {
        /// Rejected segment.
        segment: String,
    },
    /// A credential or request id could not be encoded as a header.
    #[error("invalid value for header {header}")]
    InvalidHeader {
        /// Header name.
        header: &'static str,
    },
    /// Building the reqwest client failed.
    #[error("failed to build HTTP client")]
    Build {
        /// Underlying reqwest error.
        source: reqwest::Error,
    },
}

impl ClientError {
    /// Map a non-success status and its raw body to an error.
    #[must_use]
    pub fn from_status(status: StatusCode, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|doc| doc.message())
            .or_else(|| {
                let text = String::from_utf8_lossy(body).trim().to_string();
                (!text.is_empty()).then_some(text)
            })
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .map_or_else(|| "request failed".to_string(), str::to_string)
            });

        match status {
            StatusCode::NOT_FOUND => Self::NotFound { message },
            StatusCode::CONFLICT => Self::Conflict { message },
            StatusCode::BAD_REQUEST => Self::BadRequest { message },
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Unauthorized {
                status: status.as_u16(),
                message,
            },
            _ => Self::Http {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Status code carried by status-derived variants.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Conflict { .. } => Some(409),
            Self::BadRequest { .. } => Some(400),
            Self::Unauthorized { status, .. } | Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
