use thiserror::Error;

use crate::contract::UserId;

/// Failures reported by the users repository.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("user {id} not found")]
    UserNotFound { id: UserId },
}

impl DomainError {
    pub fn user_not_found(id: UserId) -> Self {
        Self::UserNotFound { id }
    }
}
