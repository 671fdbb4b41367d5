//! Tool handler capability.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use toolgate_types::GateError;

/// A unit of server-side functionality invocable through `tools.call`.
///
/// Handlers may block on external systems; the dispatcher runs each
/// call on its own task and enforces the configured timeout.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Invokes the tool with the caller-supplied argument mapping.
    async fn call(&self, args: Map<String, Value>) -> Result<Value, GateError>;
}

/// Adapts an async closure into a [`ToolHandler`].
pub struct FnHandler<F>(F);

#[async_trait]
impl<F, Fut> ToolHandler for FnHandler<F>
where
    F: Fn(Map<String, Value>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value, GateError>> + Send + 'static,
{
    async fn call(&self, args: Map<String, Value>) -> Result<Value, GateError> {
        (self.0)(args).await
    }
}

/// Wraps an async closure as a shareable handler.
///
/// ```ignore
/// let echo = handler_fn(|args| async move { Ok(Value::Object(args)) });
/// ```
pub fn handler_fn<F, Fut>(f: F) -> Arc<dyn ToolHandler>
where
    F: Fn(Map<String, Value>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, GateError>> + Send + 'static,
{
    Arc::new(FnHandler(f))
}
