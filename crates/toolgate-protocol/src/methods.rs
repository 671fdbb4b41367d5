//! Method names recognized by the dispatcher.

/// Lists the registered tools.
pub const TOOLS_LIST: &str = "tools.list";
/// Invokes a registered tool.
pub const TOOLS_CALL: &str = "tools.call";
/// Reads a context entry.
pub const CONTEXT_GET: &str = "context.get";
/// Writes a context entry.
pub const CONTEXT_SET: &str = "context.set";

/// Prefix used by older clients (`mcp.tools.list`, ...).
pub const LEGACY_PREFIX: &str = "mcp.";

/// The closed set of built-in methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `tools.list`
    ToolsList,
    /// `tools.call`
    ToolsCall,
    /// `context.get`
    ContextGet,
    /// `context.set`
    ContextSet,
}

impl Method {
    /// Resolves a wire method name, accepting the `mcp.` legacy prefix.
    /// Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.strip_prefix(LEGACY_PREFIX).unwrap_or(name);
        match name {
            TOOLS_LIST => Some(Self::ToolsList),
            TOOLS_CALL => Some(Self::ToolsCall),
            CONTEXT_GET => Some(Self::ContextGet),
            CONTEXT_SET => Some(Self::ContextSet),
            _ => None,
        }
    }

    /// Canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ToolsList => TOOLS_LIST,
            Self::ToolsCall => TOOLS_CALL,
            Self::ContextGet => CONTEXT_GET,
            Self::ContextSet => CONTEXT_SET,
        }
    }
}
