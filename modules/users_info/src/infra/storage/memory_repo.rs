//! In-process users store.
//!
//! One `parking_lot::Mutex` guards both the records and the id counter, and every
//! operation holds it for its whole duration, so no two operations overlap.
//! Lookups are linear scans; the store is meant for small datasets.

use parking_lot::Mutex;
use tracing::debug;

use crate::contract::{User, UserId, UserPayload};
use crate::domain::error::DomainError;
use crate::domain::repo::UsersRepository;

#[derive(Debug)]
struct State {
    /// Insertion order.
    users: Vec<User>,
    next_id: UserId,
}

#[derive(Debug)]
pub struct InMemoryUsersRepository {
    state: Mutex<State>,
}

impl InMemoryUsersRepository {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                users: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryUsersRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    fn position(&self, id: UserId) -> Result<usize, DomainError> {
        self.users
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| DomainError::user_not_found(id))
    }
}

impl UsersRepository for InMemoryUsersRepository {
    fn get_all(&self) -> Vec<User> {
        let state = self.state.lock();
        state.users.clone()
    }

    fn get_by_id(&self, id: UserId) -> Result<User, DomainError> {
        let state = self.state.lock();
        let idx = state.position(id)?;
        Ok(state.users[idx].clone())
    }

    fn create(&self, payload: UserPayload) -> User {
        let mut state = self.state.lock();

        // Counter exhaustion is not handled; u64 ids do not run out in practice.
        let id = state.next_id;
        state.next_id += 1;

        let user = User {
            id,
            attributes: payload.attributes,
        };
        state.users.push(user.clone());
        debug!(user_id = id, total = state.users.len(), "user stored");
        user
    }

    fn update(&self, id: UserId, payload: UserPayload) -> Result<User, DomainError> {
        let mut state = self.state.lock();
        let idx = state.position(id)?;

        let slot = &mut state.users[idx];
        slot.attributes = payload.attributes;
        debug!(user_id = id, "user replaced");
        Ok(slot.clone())
    }

    fn delete(&self, id: UserId) -> Result<(), DomainError> {
        let mut state = self.state.lock();
        let idx = state.position(id)?;

        // `remove` keeps the relative order of the remaining users.
        state.users.remove(idx);
        debug!(user_id = id, total = state.users.len(), "user removed");
        Ok(())
    }
}
