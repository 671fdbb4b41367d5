//! Dispatch error type and its mapping onto wire error codes.

use thiserror::Error;
use toolgate_protocol::error_codes;
use toolgate_rbac::AuthzError;
use toolgate_registry::StoreError;

/// Everything that can go wrong while answering one request.
///
/// Never escapes the dispatcher: [`DispatchError::code`] turns it into a
/// wire error and `Display` supplies the message.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The frame is not valid JSON.
    #[error("parse error: {0}")]
    Parse(String),
    /// The JSON is not a valid request envelope.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// The method name is not routable.
    #[error("method not found: {0}")]
    MethodNotFound(String),
    /// `tools.call` named a tool that is not registered.
    #[error("tool not found: {0}")]
    ToolNotFound(String),
    /// Method params have the wrong shape.
    #[error("invalid params: {0}")]
    InvalidParams(String),
    /// The tool's role is not allowed to call it.
    #[error(transparent)]
    Denied(#[from] AuthzError),
    /// The handler returned an error or panicked.
    #[error("tool '{tool}' failed: {message}")]
    ToolFailed { tool: String, message: String },
    /// The handler did not finish in time.
    #[error("tool '{tool}' timed out after {timeout_ms}ms")]
    ToolTimeout { tool: String, timeout_ms: u64 },
    /// The context store failed.
    #[error("context store error: {0}")]
    Context(#[from] StoreError),
}

impl DispatchError {
    /// Wire error code for this error.
    pub fn code(&self) -> i32 {
        match self {
            Self::Parse(_) => error_codes::PARSE_ERROR,
            Self::InvalidRequest(_) => error_codes::INVALID_REQUEST,
            Self::MethodNotFound(_) | Self::ToolNotFound(_) => error_codes::METHOD_NOT_FOUND,
            Self::InvalidParams(_) => error_codes::INVALID_PARAMS,
            Self::Denied(_)
            | Self::ToolFailed { .. }
            | Self::ToolTimeout { .. }
            | Self::Context(_) => error_codes::SERVER_ERROR,
        }
    }
}
