//! Role guards for private routes.

use crate::Claims;
use taskhub_core::{TaskhubError, TaskhubResult, UserRole};

/// Extension trait for Claims to check roles.
pub trait ClaimsExt {
    /// Requires one of the given roles.
    fn require_any_role(&self, roles: &[UserRole]) -> TaskhubResult<()>;
}

impl ClaimsExt for Claims {
    fn require_any_role(&self, roles: &[UserRole]) -> TaskhubResult<()> {
        if roles.contains(&self.role) {
            Ok(())
        } else {
            Err(TaskhubError::Forbidden(format!(
                "Role {} is not allowed to access this resource",
                self.role
            )))
        }
    }
}

/// Set of roles permitted on a route.
///
/// Attached to routes in the router table and enforced by a route layer, so
/// handlers never inspect roles themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionGuard {
    allowed_roles: Vec<UserRole>,
}

impl PermissionGuard {
    /// Creates a guard that admits nobody until roles are added.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allowed_roles: Vec::new(),
        }
    }

    /// Permits an additional role.
    #[must_use]
    pub fn allow(mut self, role: UserRole) -> Self {
        if !self.allowed_roles.contains(&role) {
            self.allowed_roles.push(role);
        }
        self
    }

    /// Returns the permitted roles.
    #[must_use]
    pub fn allowed_roles(&self) -> &[UserRole] {
        &self.allowed_roles
    }

    /// Checks if the claims satisfy the guard.
    pub fn check(&self, claims: &Claims) -> TaskhubResult<()> {
        claims.require_any_role(&self.allowed_roles)
    }
}

impl Default for PermissionGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// Predefined guards used by the router.
pub mod guards {
    use super::*;

    /// Guard that admits admins only.
    #[must_use]
    pub fn admin() -> PermissionGuard {
        PermissionGuard::new().allow(UserRole::Admin)
    }

    /// Guard that admits admins and regular users.
    #[must_use]
    pub fn admin_or_user() -> PermissionGuard {
        PermissionGuard::new().allow(UserRole::Admin).allow(UserRole::User)
    }
}
