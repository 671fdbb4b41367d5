//! JSON-RPC 2.0 request and response envelopes.
//!
//! Requests are validated by hand from a parsed [`Value`] rather than
//! derived, so that a malformed envelope can still report the id and
//! method it carried.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// The only supported protocol version tag.
pub const PROTOCOL_VERSION: &str = "2.0";

/// Correlation id: any JSON scalar. `null`/absent ids are `None`
/// wherever a `RequestId` is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    /// Numeric id.
    Number(Number),
    /// String id.
    String(String),
    /// Boolean id (legal JSON scalar, echoed verbatim).
    Bool(bool),
}

impl RequestId {
    /// Converts a JSON value into an id. Returns `None` for arrays,
    /// objects and `null`.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(Self::Number(n)),
            Value::String(s) => Some(Self::String(s)),
            Value::Bool(b) => Some(Self::Bool(b)),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl From<i64> for RequestId {
    fn from(n: i64) -> Self {
        Self::Number(Number::from(n))
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

/// A validated JSON-RPC request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpcRequest {
    /// Protocol version, always "2.0".
    pub version: String,
    /// Correlation id (`None` serializes as `null`).
    pub id: Option<RequestId>,
    /// Method name.
    pub method: String,
    /// Optional parameter object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Map<String, Value>>,
}

/// Reason a parsed JSON value is not a valid request envelope.
///
/// Carries whatever could be salvaged so the reply can echo the id and
/// the request can still be attributed to a method.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvelopeError {
    /// The request id, when it was present and a scalar.
    pub id: Option<RequestId>,
    /// The method name, when it was present and a string.
    pub method: Option<String>,
    /// Human-readable reason.
    pub reason: String,
}

impl RpcRequest {
    /// Creates a new request with the supported version tag.
    pub fn new(
        id: Option<RequestId>,
        method: impl Into<String>,
        params: Option<Map<String, Value>>,
    ) -> Self {
        Self {
            version: PROTOCOL_VERSION.to_string(),
            id,
            method: method.into(),
            params,
        }
    }

    /// Validates a parsed JSON value as a request envelope.
    ///
    /// The version tag may be sent as `version` or, for compatibility
    /// with plain JSON-RPC clients, as `jsonrpc`.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError`] when the value is not an object, the
    /// version is absent or wrong, the id is not a scalar, the method is
    /// missing, or `params` is not an object.
    pub fn from_value(value: Value) -> Result<Self, EnvelopeError> {
        let Value::Object(mut obj) = value else {
            return Err(EnvelopeError {
                id: None,
                method: None,
                reason: "request must be a JSON object".to_string(),
            });
        };

        let method = match obj.remove("method") {
            Some(Value::String(m)) => Some(m),
            _ => None,
        };
        let fail = |id: Option<RequestId>, method: Option<String>, reason: &str| EnvelopeError {
            id,
            method,
            reason: reason.to_string(),
        };

        let id = match obj.remove("id") {
            None | Some(Value::Null) => None,
            Some(v) => match RequestId::from_value(v) {
                Some(id) => Some(id),
                None => return Err(fail(None, method, "id must be a string, number, boolean or null")),
            },
        };

        let version = obj.remove("version").or_else(|| obj.remove("jsonrpc"));
        match version {
            Some(Value::String(v)) if v == PROTOCOL_VERSION => {}
            Some(_) => return Err(fail(id, method, "unsupported protocol version")),
            None => return Err(fail(id, method, "missing protocol version")),
        }

        let Some(method) = method else {
            return Err(fail(id, None, "missing method"));
        };

        let params = match obj.remove("params") {
            None | Some(Value::Null) => None,
            Some(Value::Object(p)) => Some(p),
            Some(_) => return Err(fail(id, Some(method), "params must be an object")),
        };

        Ok(Self {
            version: PROTOCOL_VERSION.to_string(),
            id,
            method,
            params,
        })
    }
}

/// JSON-RPC 2.0 error object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcError {
    /// Error code from [`error_codes`].
    pub code: i32,
    /// Human-readable message. Diagnostics only, never parsed.
    pub message: String,
}

/// Exactly one of `result` or `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Success payload.
    Result(Value),
    /// Failure payload.
    Error(RpcError),
}

/// JSON-RPC 2.0 response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    /// Protocol version, always "2.0".
    pub version: String,
    /// Request id (matches the request; `null` if it could not be read).
    pub id: Option<RequestId>,
    /// Result or error.
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl RpcResponse {
    /// Creates a success response.
    pub fn success(id: Option<RequestId>, result: Value) -> Self {
        Self {
            version: PROTOCOL_VERSION.to_string(),
            id,
            outcome: Outcome::Result(result),
        }
    }

    /// Creates an error response.
    pub fn error(id: Option<RequestId>, code: i32, message: impl Into<String>) -> Self {
        Self {
            version: PROTOCOL_VERSION.to_string(),
            id,
            outcome: Outcome::Error(RpcError {
                code,
                message: message.into(),
            }),
        }
    }

    /// Returns the error object, if this is an error response.
    pub fn as_error(&self) -> Option<&RpcError> {
        match &self.outcome {
            Outcome::Error(e) => Some(e),
            Outcome::Result(_) => None,
        }
    }

    /// Returns the result value, if this is a success response.
    pub fn as_result(&self) -> Option<&Value> {
        match &self.outcome {
            Outcome::Result(v) => Some(v),
            Outcome::Error(_) => None,
        }
    }
}

/// Closed error-code taxonomy.
pub mod error_codes {
    /// Invalid JSON was received.
    pub const PARSE_ERROR: i32 = -32700;
    /// The JSON sent is not a valid request envelope.
    pub const INVALID_REQUEST: i32 = -32600;
    /// The method does not exist, or the named tool is not registered.
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Method parameters have the wrong shape.
    pub const INVALID_PARAMS: i32 = -32602;
    /// Generic server error: authorization denial, tool failure,
    /// context-store failure. Only the message tells them apart.
    pub const SERVER_ERROR: i32 = -32000;
}
