//! Handles the `tools.call` method.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};
use toolgate_protocol::{Method, ToolsCallParams};
use toolgate_rbac::Authorizer;
use toolgate_registry::ToolRegistry;

use super::parse_params;
use crate::error::DispatchError;

/// Looks the tool up, checks its role, and runs its handler.
///
/// The handler runs on its own task so a panic surfaces as a `JoinError`
/// instead of unwinding through the connection. On timeout the task is
/// aborted.
pub(crate) async fn handle_tools_call(
    params: Option<&Map<String, Value>>,
    registry: &ToolRegistry,
    authorizer: &dyn Authorizer,
    timeout: Option<Duration>,
) -> Result<Value, DispatchError> {
    // 1. Parse params
    let call: ToolsCallParams = parse_params(Method::ToolsCall, params)?;

    // 2. Resolve the tool
    let tool = registry
        .get(&call.name)
        .ok_or_else(|| DispatchError::ToolNotFound(call.name.clone()))?;

    // 3. Authorize against the tool's required role
    authorizer.check(&tool.spec.required_role, &tool.spec.name)?;

    // 4. Invoke
    let name = tool.spec.name.to_string();
    let handler = Arc::clone(&tool.handler);
    let args = call.into_args();
    tracing::debug!(tool = %name, role = %tool.spec.required_role, "invoking tool");

    let mut task = tokio::spawn(async move { handler.call(args).await });
    let joined = match timeout {
        Some(limit) => match tokio::time::timeout(limit, &mut task).await {
            Ok(joined) => joined,
            Err(_) => {
                task.abort();
                tracing::warn!(tool = %name, "tool timed out");
                return Err(DispatchError::ToolTimeout {
                    tool: name,
                    timeout_ms: limit.as_millis() as u64,
                });
            }
        },
        None => task.await,
    };

    match joined {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(DispatchError::ToolFailed {
            tool: name,
            message: e.to_string(),
        }),
        Err(e) if e.is_panic() => {
            tracing::error!(tool = %name, "tool handler panicked");
            Err(DispatchError::ToolFailed {
                tool: name,
                message: "handler panicked".to_string(),
            })
        }
        Err(e) => Err(DispatchError::ToolFailed {
            tool: name,
            message: e.to_string(),
        }),
    }
}
