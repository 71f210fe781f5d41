//! Directory Port (Driven Port)
//!
//! Read-only access to the user directory maintained by the identity
//! collaborator: who the admins are, and display names for notification
//! text.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::shared::UserId;

/// Directory lookup error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DirectoryError {
    /// Storage-level failure.
    #[error("directory lookup failed: {message}")]
    LookupFailed {
        /// Detail.
        message: String,
    },
}

/// Port for user directory lookups.
#[async_trait]
pub trait DirectoryPort: Send + Sync {
    /// Every user holding the admin role.
    ///
    /// # Errors
    ///
    /// Returns error if the lookup fails.
    async fn admin_user_ids(&self) -> Result<Vec<UserId>, DirectoryError>;

    /// Display name for a user; falls back to the raw id for unknown
    /// users rather than failing notification fan-out.
    ///
    /// # Errors
    ///
    /// Returns error if the lookup fails.
    async fn display_name(&self, user_id: &UserId) -> Result<String, DirectoryError>;
}

/// Fixed in-memory directory for tests and single-node deployments.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    admins: Vec<UserId>,
    names: HashMap<UserId, String>,
}

impl StaticDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an admin user.
    #[must_use]
    pub fn with_admin(mut self, user_id: UserId) -> Self {
        self.admins.push(user_id);
        self
    }

    /// Register a display name.
    #[must_use]
    pub fn with_name(mut self, user_id: UserId, name: impl Into<String>) -> Self {
        self.names.insert(user_id, name.into());
        self
    }
}

#[async_trait]
impl DirectoryPort for StaticDirectory {
    async fn admin_user_ids(&self) -> Result<Vec<UserId>, DirectoryError> {
        Ok(self.admins.clone())
    }

    async fn display_name(&self, user_id: &UserId) -> Result<String, DirectoryError> {
        Ok(self
            .names
            .get(user_id)
            .cloned()
            .unwrap_or_else(|| user_id.as_str().to_string()))
    }
}
