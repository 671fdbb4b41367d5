//! Policy types, deserialized from the `[policy.<role>]` config tables.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Allow- and deny-sets for a single role. The deny-set takes precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RolePolicy {
    /// Tools the role may call.
    #[serde(default)]
    pub allow: BTreeSet<String>,
    /// Tools the role may never call.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub deny: BTreeSet<String>,
}

impl RolePolicy {
    /// True iff `tool` is allowed and not denied.
    pub fn permits(&self, tool: &str) -> bool {
        self.allow.contains(tool) && !self.deny.contains(tool)
    }
}

/// Mapping from role name to its [`RolePolicy`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RbacPolicy {
    roles: BTreeMap<String, RolePolicy>,
}

impl RbacPolicy {
    /// Creates an empty policy (denies everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds tools to a role's allow-set.
    pub fn allow<I, S>(mut self, role: &str, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entry = self.roles.entry(role.to_string()).or_default();
        entry.allow.extend(tools.into_iter().map(Into::into));
        self
    }

    /// Adds tools to a role's deny-set.
    pub fn deny<I, S>(mut self, role: &str, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entry = self.roles.entry(role.to_string()).or_default();
        entry.deny.extend(tools.into_iter().map(Into::into));
        self
    }

    /// Returns the policy entry for `role`.
    pub fn role(&self, role: &str) -> Option<&RolePolicy> {
        self.roles.get(role)
    }

    /// Iterates over `(role, policy)` pairs in role order.
    pub fn roles(&self) -> impl Iterator<Item = (&str, &RolePolicy)> {
        self.roles.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Whether the policy defines no roles.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_accumulates_sets() {
        let policy = RbacPolicy::new()
            .allow("reader", ["echo", "logs.search"])
            .allow("reader", ["prom.query_simple"])
            .deny("reader", ["logs.search"]);
        let reader = policy.role("reader").expect("role");
        assert_eq!(reader.allow.len(), 3);
        assert!(reader.permits("echo"));
        assert!(!reader.permits("logs.search"));
    }

    #[test]
    fn deserializes_from_toml_tables() {
        let policy: RbacPolicy = toml::from_str(
            r#"
[reader]
allow = ["k8s.list_pods", "logs.search"]

[operator]
allow = ["runbook.preview", "runbook.execute"]
deny = ["runbook.execute"]
"#,
        )
        .expect("parse");
        assert!(policy.role("reader").expect("reader").permits("logs.search"));
        assert!(!policy.role("operator").expect("operator").permits("runbook.execute"));
        assert_eq!(policy.roles().count(), 2);
    }

    #[test]
    fn unknown_policy_keys_rejected() {
        let result: Result<RbacPolicy, _> = toml::from_str("[reader]\nallowed = [\"echo\"]\n");
        assert!(result.is_err());
    }
}
