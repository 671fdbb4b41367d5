//! Handles `context.get` and `context.set`.

use serde_json::{Map, Value};
use toolgate_protocol::{ContextGetParams, ContextSetParams, Method, CONTEXT_SET_OK};
use toolgate_registry::ContextStore;

use super::parse_params;
use crate::error::DispatchError;

pub(crate) async fn handle_context_get(
    params: Option<&Map<String, Value>>,
    store: &dyn ContextStore,
) -> Result<Value, DispatchError> {
    let p: ContextGetParams = parse_params(Method::ContextGet, params)?;
    let value = store.get(&p.key).await?;
    Ok(value.map_or(Value::Null, Value::String))
}

pub(crate) async fn handle_context_set(
    params: Option<&Map<String, Value>>,
    store: &dyn ContextStore,
) -> Result<Value, DispatchError> {
    let p: ContextSetParams = parse_params(Method::ContextSet, params)?;
    store.set(&p.key, &p.value).await?;
    Ok(Value::String(CONTEXT_SET_OK.to_string()))
}
