//! In-memory user registry.
//!
//! Users are keyed by id in a `BTreeMap`; ids come from a monotonic sequence, so key
//! order is registration order. A second index maps normalized emails to ids.

use std::collections::{BTreeMap, HashMap};

use parking_lot::RwLock;

use crate::contract::model::{User, UserId};
use crate::domain::error::DomainError;
use crate::domain::identity::IdSequence;
use crate::domain::repo::UsersRepository;

#[derive(Default)]
struct UsersState {
    by_id: BTreeMap<UserId, User>,
    by_email: HashMap<String, UserId>,
}

#[derive(Default)]
pub struct InMemoryUsersRepository {
    ids: IdSequence,
    state: RwLock<UsersState>,
}

impl InMemoryUsersRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

impl UsersRepository for InMemoryUsersRepository {
    fn next_id(&self) -> UserId {
        UserId(self.ids.next_id())
    }

    fn insert(&self, user: User) -> Result<(), DomainError> {
        let mut state = self.state.write();
        if state.by_id.contains_key(&user.id) {
            return Err(DomainError::duplicate_id("user", user.id.0));
        }
        let key = email_key(&user.email);
        if state.by_email.contains_key(&key) {
            return Err(DomainError::email_already_exists(user.email));
        }
        state.by_email.insert(key, user.id);
        state.by_id.insert(user.id, user);
        Ok(())
    }

    fn update(&self, user: User) -> Result<(), DomainError> {
        let mut guard = self.state.write();
        let state = &mut *guard;

        let current = state
            .by_id
            .get_mut(&user.id)
            .ok_or_else(|| DomainError::user_not_found(user.id))?;

        let old_key = email_key(&current.email);
        let new_key = email_key(&user.email);
        if old_key != new_key {
            if state.by_email.contains_key(&new_key) {
                return Err(DomainError::email_already_exists(user.email));
            }
            state.by_email.remove(&old_key);
            state.by_email.insert(new_key, user.id);
        }

        *current = user;
        Ok(())
    }

    fn remove(&self, id: UserId) -> Option<User> {
        let mut state = self.state.write();
        let user = state.by_id.remove(&id)?;
        state.by_email.remove(&email_key(&user.email));
        Some(user)
    }

    fn find_by_id(&self, id: UserId) -> Option<User> {
        self.state.read().by_id.get(&id).cloned()
    }

    fn find_by_email(&self, email: &str) -> Option<User> {
        let state = self.state.read();
        state
            .by_email
            .get(&email_key(email))
            .and_then(|id| state.by_id.get(id))
            .cloned()
    }

    fn list(&self) -> Vec<User> {
        self.state.read().by_id.values().cloned().collect()
    }

    fn count(&self) -> usize {
        self.state.read().by_id.len()
    }
}
