//! Authorization errors.

use thiserror::Error;

/// Errors from the authorization layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthzError {
    /// The role's policy does not permit the tool.
    #[error("role '{role}' is not allowed to call '{tool}'")]
    Denied { role: String, tool: String },
}
