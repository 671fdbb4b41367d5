//! Handles the `tools.list` method.

use serde_json::{json, Value};
use toolgate_registry::ToolRegistry;

/// Lists `{name, description}` for every tool, in registration order.
pub(crate) fn handle_tools_list(registry: &ToolRegistry) -> Value {
    Value::Array(
        registry
            .list_all()
            .map(|tool| {
                json!({
                    "name": tool.spec.name.as_str(),
                    "description": tool.spec.description,
                })
            })
            .collect(),
    )
}
