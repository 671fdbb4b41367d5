//! # toolgate-rbac
//!
//! Declarative role-based access control: a policy maps each role to an
//! allow-set and an optional deny-set of tool names, and an
//! [`Authorizer`] evaluates it. Unknown roles are always denied.

pub mod authorizer;
pub mod error;
pub mod policy;

pub use authorizer::{Authorizer, PolicyAuthorizer};
pub use error::AuthzError;
pub use policy::{RbacPolicy, RolePolicy};
