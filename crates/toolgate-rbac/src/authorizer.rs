//! Authorization check for tool calls.

use toolgate_types::{Role, ToolName};

use crate::error::AuthzError;
use crate::policy::RbacPolicy;

/// Decides whether a role may invoke a tool.
///
/// Implementations are pure and shared read-only by every connection.
pub trait Authorizer: Send + Sync {
    /// True iff `role` may call `tool`.
    fn is_allowed(&self, role: &Role, tool: &ToolName) -> bool;

    /// Same decision as [`Authorizer::is_allowed`], as a typed result.
    ///
    /// # Errors
    ///
    /// Returns `AuthzError::Denied` naming the role/tool pair.
    fn check(&self, role: &Role, tool: &ToolName) -> Result<(), AuthzError> {
        if self.is_allowed(role, tool) {
            Ok(())
        } else {
            Err(AuthzError::Denied {
                role: role.to_string(),
                tool: tool.to_string(),
            })
        }
    }
}

/// Authorizer evaluating a loaded [`RbacPolicy`], failing closed.
#[derive(Debug, Clone, Default)]
pub struct PolicyAuthorizer {
    policy: RbacPolicy,
}

impl PolicyAuthorizer {
    /// Creates an authorizer over `policy`.
    pub fn new(policy: RbacPolicy) -> Self {
        Self { policy }
    }

    /// The policy being enforced.
    pub fn policy(&self) -> &RbacPolicy {
        &self.policy
    }
}

impl Authorizer for PolicyAuthorizer {
    fn is_allowed(&self, role: &Role, tool: &ToolName) -> bool {
        self.policy
            .role(role.as_str())
            .is_some_and(|p| p.permits(tool.as_str()))
    }
}
