//! The authenticated caller, passed explicitly into every operation.
//!
//! Identity and role determination happen upstream; request handlers receive
//! an [`ActingUser`] and thread it through registry and matching operations.
//! Business logic never reads caller identity from ambient state.

use serde::{Deserialize, Serialize};

use super::error::AppError;
use super::UserId;

/// Role assigned by the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Normal,
    Admin,
}

impl std::str::FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Role::Normal),
            "admin" => Ok(Role::Admin),
            other => Err(AppError::Validation(format!("invalid role: {other}"))),
        }
    }
}

/// The authenticated caller plus role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActingUser {
    pub id: UserId,
    pub role: Role,
}

impl ActingUser {
    pub fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Require admin privileges, returning the caller's ID.
    pub fn require_admin(&self) -> Result<UserId, AppError> {
        if !self.is_admin() {
            return Err(AppError::Permission("admin access required".into()));
        }
        Ok(self.id)
    }
}
