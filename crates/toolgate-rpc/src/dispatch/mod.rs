//! Method handlers.
//!
//! Each sub-module handles one family of methods as free functions,
//! keeping `Dispatcher` itself thin (struct + routing only).

pub(crate) mod context;
pub(crate) mod tools_call;
pub(crate) mod tools_list;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use toolgate_protocol::Method;

use crate::error::DispatchError;

/// Decodes a method's params object; absent params decode as `{}`.
pub(crate) fn parse_params<T: DeserializeOwned>(
    method: Method,
    params: Option<&Map<String, Value>>,
) -> Result<T, DispatchError> {
    let value = Value::Object(params.cloned().unwrap_or_default());
    serde_json::from_value(value)
        .map_err(|e| DispatchError::InvalidParams(format!("{}: {e}", method.as_str())))
}
