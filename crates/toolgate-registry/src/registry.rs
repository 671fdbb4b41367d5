//! In-memory tool registry.
//!
//! Built once at startup, then shared read-only (behind an `Arc`) by
//! every connection. There is no removal operation.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use toolgate_types::ToolSpec;

use crate::error::RegistryError;
use crate::handler::ToolHandler;

/// A catalog entry bound to its handler.
#[derive(Clone)]
pub struct RegisteredTool {
    /// Catalog metadata.
    pub spec: ToolSpec,
    /// The bound handler.
    pub handler: Arc<dyn ToolHandler>,
}

impl fmt::Debug for RegisteredTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredTool")
            .field("spec", &self.spec)
            .finish_non_exhaustive()
    }
}

/// Registry of invocable tools, ordered by registration.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a loaded catalog to handlers.
    ///
    /// `resolve` is supplied by the embedding application and maps each
    /// spec to its handler.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Unbound` for the first spec that `resolve`
    /// cannot bind.
    pub fn from_catalog<I, R>(specs: I, mut resolve: R) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = ToolSpec>,
        R: FnMut(&ToolSpec) -> Option<Arc<dyn ToolHandler>>,
    {
        let mut registry = Self::new();
        for spec in specs {
            let handler = resolve(&spec).ok_or_else(|| RegistryError::Unbound {
                name: spec.name.to_string(),
            })?;
            registry.register(spec, handler);
        }
        Ok(registry)
    }

    /// Adds a tool, or replaces the one with the same name.
    ///
    /// Last write wins; a replaced tool keeps its original position in
    /// the listing order. Returns the replaced spec, if any.
    pub fn register(&mut self, spec: ToolSpec, handler: Arc<dyn ToolHandler>) -> Option<ToolSpec> {
        let name = spec.name.as_str().to_string();
        let entry = RegisteredTool { spec, handler };
        match self.index.get(&name) {
            Some(&pos) => Some(std::mem::replace(&mut self.tools[pos], entry).spec),
            None => {
                self.index.insert(name, self.tools.len());
                self.tools.push(entry);
                None
            }
        }
    }

    /// Looks up a tool by name.
    pub fn get(&self, name: &str) -> Option<&RegisteredTool> {
        self.index.get(name).map(|&pos| &self.tools[pos])
    }

    /// Iterates over all tools in registration order.
    pub fn list_all(&self) -> impl Iterator<Item = &RegisteredTool> {
        self.tools.iter()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::handler_fn;
    use serde_json::{json, Map, Value};
    use toolgate_types::{Role, ToolName};

    fn spec(name: &str, desc: &str) -> ToolSpec {
        ToolSpec::new(ToolName::new(name).expect("name"), desc, Role::new("reader"))
    }

    fn noop() -> Arc<dyn ToolHandler> {
        handler_fn(|_| async move { Ok(Value::Null) })
    }

    #[test]
    fn empty_registry() {
        let reg = ToolRegistry::new();
        assert!(reg.is_empty());
        assert!(reg.get("echo").is_none());
        assert_eq!(reg.list_all().count(), 0);
    }

    #[test]
    fn list_preserves_registration_order() {
        let mut reg = ToolRegistry::new();
        reg.register(spec("b", ""), noop());
        reg.register(spec("a", ""), noop());
        reg.register(spec("c", ""), noop());
        let names: Vec<_> = reg.list_all().map(|t| t.spec.name.as_str()).collect();
        assert_eq!(names, ["b", "a", "c"]);
    }

    #[tokio::test]
    async fn last_write_wins_in_place() {
        let mut reg = ToolRegistry::new();
        reg.register(spec("echo", "v1"), noop());
        reg.register(spec("other", ""), noop());
        let old = reg.register(
            spec("echo", "v2"),
            handler_fn(|_| async move { Ok(json!("second")) }),
        );
        assert_eq!(old.expect("replaced").description, "v1");
        assert_eq!(reg.len(), 2);
        let echo = reg.get("echo").expect("present");
        assert_eq!(echo.spec.description, "v2");
        assert_eq!(echo.handler.call(Map::new()).await.expect("call"), json!("second"));
        assert_eq!(reg.list_all().next().expect("first").spec.name.as_str(), "echo");
    }

    #[test]
    fn from_catalog_binds_every_tool() {
        let reg = ToolRegistry::from_catalog(vec![spec("echo", ""), spec("logs.search", "")], |_| {
            Some(noop())
        })
        .expect("bind");
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn from_catalog_reports_unbound_tool() {
        let err = ToolRegistry::from_catalog(vec![spec("echo", ""), spec("k8s.list_pods", "")], |s| {
            (s.name.as_str() == "echo").then(noop)
        })
        .expect_err("unbound");
        assert!(err.to_string().contains("k8s.list_pods"));
    }
}
