//! The dispatcher: one raw frame in, one response frame out.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, error, warn};

use toolgate_protocol::{error_codes, Method, RpcRequest, RpcResponse};
use toolgate_rbac::Authorizer;
use toolgate_registry::{AuditRecord, AuditSink, ContextStore, ToolRegistry};

use crate::dispatch::context::{handle_context_get, handle_context_set};
use crate::dispatch::tools_call::handle_tools_call;
use crate::dispatch::tools_list::handle_tools_list;
use crate::error::DispatchError;

/// Handler timeout used unless overridden with
/// [`Dispatcher::with_tool_timeout`].
pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(30);

/// Routes requests to the registry, the authorizer and the stores, and
/// writes one audit record per request whose method could be read.
///
/// Shared by every connection through an `Arc`; holds no per-connection
/// state.
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    authorizer: Arc<dyn Authorizer>,
    context: Arc<dyn ContextStore>,
    audit: Arc<dyn AuditSink>,
    tool_timeout: Option<Duration>,
}

impl Dispatcher {
    /// Creates a dispatcher with the default tool timeout.
    pub fn new(
        registry: Arc<ToolRegistry>,
        authorizer: Arc<dyn Authorizer>,
        context: Arc<dyn ContextStore>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            registry,
            authorizer,
            context,
            audit,
            tool_timeout: Some(DEFAULT_TOOL_TIMEOUT),
        }
    }

    /// Sets the handler timeout; `None` waits indefinitely.
    pub fn with_tool_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.tool_timeout = timeout;
        self
    }

    /// The registry this dispatcher serves.
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Handles one frame and returns the serialized response.
    pub async fn dispatch(&self, frame: &str) -> String {
        let (_, encoded) = self.dispatch_inner(frame).await;
        encoded
    }

    /// Handles one frame and returns the structured response.
    pub async fn dispatch_frame(&self, frame: &str) -> RpcResponse {
        let (response, _) = self.dispatch_inner(frame).await;
        response
    }

    async fn dispatch_inner(&self, frame: &str) -> (RpcResponse, String) {
        // 1. Parse. Unparseable frames are answered but never audited.
        let value: Value = match serde_json::from_str(frame) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "failed to parse frame");
                let response = error_response(None, DispatchError::Parse(e.to_string()));
                let encoded = encode(&response);
                return (response, encoded);
            }
        };

        // 2. Validate the envelope, then route.
        let (response, method) = match RpcRequest::from_value(value) {
            Ok(request) => {
                debug!(method = %request.method, id = ?request.id, "received request");
                let response = self.route(&request).await;
                (response, Some(request.method))
            }
            Err(e) => {
                debug!(reason = %e.reason, "invalid request envelope");
                let response = error_response(e.id, DispatchError::InvalidRequest(e.reason));
                (response, e.method)
            }
        };

        // 3. Audit before replying.
        let encoded = encode(&response);
        if let Some(method) = method {
            self.record(AuditRecord::new(method, frame, encoded.as_str()))
                .await;
        }
        (response, encoded)
    }

    async fn route(&self, request: &RpcRequest) -> RpcResponse {
        let params = request.params.as_ref();
        let result = match Method::from_name(&request.method) {
            Some(Method::ToolsList) => Ok(handle_tools_list(&self.registry)),
            Some(Method::ToolsCall) => {
                handle_tools_call(
                    params,
                    &self.registry,
                    self.authorizer.as_ref(),
                    self.tool_timeout,
                )
                .await
            }
            Some(Method::ContextGet) => handle_context_get(params, self.context.as_ref()).await,
            Some(Method::ContextSet) => handle_context_set(params, self.context.as_ref()).await,
            None => Err(DispatchError::MethodNotFound(request.method.clone())),
        };

        match result {
            Ok(value) => RpcResponse::success(request.id.clone(), value),
            Err(e) => {
                debug!(method = %request.method, error = %e, "request failed");
                error_response(request.id.clone(), e)
            }
        }
    }

    /// Appends on a spawned task so the record lands even if the caller
    /// is dropped mid-await.
    async fn record(&self, record: AuditRecord) {
        let sink = Arc::clone(&self.audit);
        let task = tokio::spawn(async move { sink.append(&record).await });
        match task.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(error = %e, "audit append failed"),
            Err(e) => warn!(error = %e, "audit task failed"),
        }
    }
}

fn error_response(id: Option<toolgate_protocol::RequestId>, e: DispatchError) -> RpcResponse {
    RpcResponse::error(id, e.code(), e.to_string())
}

fn encode(response: &RpcResponse) -> String {
    serde_json::to_string(response).unwrap_or_else(|e| {
        error!(error = %e, "failed to serialize response");
        format!(
            r#"{{"version":"2.0","id":null,"error":{{"code":{},"message":"response serialization failed"}}}}"#,
            error_codes::SERVER_ERROR
        )
    })
}
