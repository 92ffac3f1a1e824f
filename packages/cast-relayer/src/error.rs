//! Error types for the relayer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::fmt;

/// Relayer error type. Every variant aborts the publish request.
#[derive(Debug)]
pub enum Error {
    /// Neither a signer private key nor a mnemonic was supplied.
    Configuration(String),
    /// Malformed request: bad JSON, bad hex key, unparsable cast body.
    InvalidRequest(String),
    /// Cast content or signing rejected while building the message.
    MessageConstruction(String),
    /// Hub rejected or never accepted the message.
    Submission(String),
    /// Custody derivation, metadata signing, simulation, broadcast or receipt.
    Chain(String),
    /// Process configuration invalid at startup.
    Startup(String),
}

impl Error {
    /// Stable machine-readable kind, echoed in error responses.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Configuration(_) => "configuration",
            Error::InvalidRequest(_) => "invalid_request",
            Error::MessageConstruction(_) => "message_construction",
            Error::Submission(_) => "submission",
            Error::Chain(_) => "chain",
            Error::Startup(_) => "startup",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Error::Configuration(_) | Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::MessageConstruction(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Submission(_) => StatusCode::BAD_GATEWAY,
            Error::Chain(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Startup(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration(msg) => write!(f, "{msg}"),
            Error::InvalidRequest(msg) => write!(f, "invalid request: {msg}"),
            Error::MessageConstruction(msg) => write!(f, "Error creating message: {msg}"),
            Error::Submission(msg) => write!(f, "Error submitting message to hub: {msg}"),
            Error::Chain(msg) => write!(f, "chain error: {msg}"),
            Error::Startup(msg) => write!(f, "startup error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "success": false,
            "error": self.to_string(),
            "kind": self.kind(),
        });
        (self.status(), Json(body)).into_response()
    }
}
