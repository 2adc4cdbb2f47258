use crate::contract::{User, UserId, UserPayload};
use crate::domain::error::DomainError;

/// Port for the domain layer: the operations handlers need from a user store.
///
/// Calls are synchronous and may block on a lock; async callers should run them
/// on the blocking pool. Every returned `User` is an independent copy.
pub trait UsersRepository: Send + Sync {
    /// Snapshot of all users in insertion order.
    fn get_all(&self) -> Vec<User>;
    fn get_by_id(&self, id: UserId) -> Result<User, DomainError>;
    /// Store a new user under the next free id and return it.
    fn create(&self, payload: UserPayload) -> User;
    /// Replace the payload of `id`; the id itself never changes.
    fn update(&self, id: UserId, payload: UserPayload) -> Result<User, DomainError>;
    fn delete(&self, id: UserId) -> Result<(), DomainError>;
}
