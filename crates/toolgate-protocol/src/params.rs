//! Parameter and result shapes of the built-in methods.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Result of a successful `context.set`.
pub const CONTEXT_SET_OK: &str = "ok";

/// Params for `tools.call`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsCallParams {
    /// Name of the tool to invoke.
    pub name: String,
    /// Arguments forwarded verbatim to the handler.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Map<String, Value>>,
}

impl ToolsCallParams {
    /// Returns the arguments, defaulting to an empty mapping.
    pub fn into_args(self) -> Map<String, Value> {
        self.args.unwrap_or_default()
    }
}

/// Params for `context.get`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextGetParams {
    /// Context key (namespaced by the store adapter).
    pub key: String,
}

/// Params for `context.set`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextSetParams {
    /// Context key (namespaced by the store adapter).
    pub key: String,
    /// Opaque value.
    pub value: String,
}

/// One entry of the `tools.list` result. The required role is never
/// exposed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSummary {
    /// Tool name.
    pub name: String,
    /// Tool description.
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tools_call_args_default_to_empty() {
        let p: ToolsCallParams = serde_json::from_value(json!({"name": "echo"})).expect("de");
        assert!(p.into_args().is_empty());
    }

    #[test]
    fn tools_call_null_args_default_to_empty() {
        let p: ToolsCallParams =
            serde_json::from_value(json!({"name": "echo", "args": null})).expect("de");
        assert!(p.into_args().is_empty());
    }

    #[test]
    fn tools_call_rejects_non_object_args() {
        let r: Result<ToolsCallParams, _> =
            serde_json::from_value(json!({"name": "echo", "args": [1]}));
        assert!(r.is_err());
    }

    #[test]
    fn context_set_requires_string_value() {
        let r: Result<ContextSetParams, _> =
            serde_json::from_value(json!({"key": "k", "value": 5}));
        assert!(r.is_err());
    }
}
