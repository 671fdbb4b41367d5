//! Tool identity, roles and catalog entries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GateError;

/// Unique name of a tool within the registry.
/// Example: `logs.search`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ToolName(String);

impl ToolName {
    /// Creates a new `ToolName`, validating the format.
    ///
    /// Names must be non-empty and contain no whitespace or control
    /// characters, since they travel as plain strings on the wire.
    pub fn new(name: impl Into<String>) -> Result<Self, GateError> {
        let name = name.into();
        if name.is_empty() {
            return Err(GateError::invalid_input("tool name cannot be empty"));
        }
        if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(GateError::invalid_input(format!(
                "tool name must not contain whitespace: {name:?}"
            )));
        }
        Ok(Self(name))
    }

    /// Returns the tool name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ToolName {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ToolName {
    type Error = GateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ToolName> for String {
    fn from(name: ToolName) -> Self {
        name.0
    }
}

/// Role label used by the authorizer.
///
/// Roles are plain strings naming an entry of the RBAC policy; they are
/// not tied to the identity of a connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    /// Creates a role label.
    pub fn new(role: impl Into<String>) -> Self {
        Self(role.into())
    }

    /// Returns the role as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Catalog entry describing an invocable tool.
///
/// The handler is bound separately by the embedding application; a
/// `ToolSpec` is pure metadata as loaded from the catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSpec {
    /// Unique tool name.
    pub name: ToolName,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Role whose policy entry must allow this tool.
    #[serde(alias = "rbac_role")]
    pub required_role: Role,
}

impl ToolSpec {
    /// Creates a new tool spec.
    pub fn new(name: ToolName, description: impl Into<String>, required_role: Role) -> Self {
        Self {
            name,
            description: description.into(),
            required_role,
        }
    }
}
