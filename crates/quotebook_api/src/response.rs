//! Response envelope returned by every handler.

use serde::Serialize;
use serde_json::{json, Value};

/// HTTP-equivalent status plus JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub const OK: u16 = 200;
    pub const CREATED: u16 = 201;
    pub const BAD_REQUEST: u16 = 400;
    pub const UNAUTHORIZED: u16 = 401;
    pub const NOT_FOUND: u16 = 404;
    pub const SERVER_ERROR: u16 = 500;

    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Serializes `payload` as the body, or degrades to a server error.
    pub fn json(status: u16, payload: &impl Serialize) -> Self {
        match serde_json::to_value(payload) {
            Ok(body) => Self::new(status, body),
            Err(err) => {
                log::error!(
                    "event=response_encode module=api status=error error_code=encode_failed error={err}"
                );
                Self::server_error()
            }
        }
    }

    pub fn error(status: u16, code: &str) -> Self {
        Self::new(status, json!({ "error": code }))
    }

    pub fn unauthorized() -> Self {
        Self::error(Self::UNAUTHORIZED, "unauthorized")
    }

    pub fn not_found() -> Self {
        Self::error(Self::NOT_FOUND, "not_found")
    }

    pub fn server_error() -> Self {
        Self::error(Self::SERVER_ERROR, "server_error")
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
