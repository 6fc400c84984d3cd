//! User service
//!
//! Registration, lookup by name and resolution of the acting user. Until the
//! first user registers, the configured active user is accepted as-is so a
//! fresh data directory works without setup; the first registration then
//! claims that id.

use crate::error::{TallyError, TallyResult};
use crate::models::{User, UserId};
use crate::storage::Storage;

pub struct UserService<'a> {
    storage: &'a Storage,
}

impl<'a> UserService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Register a new user with a unique name.
    ///
    /// The first user gets the `active` id, so rows recorded before any
    /// registration belong to them; later users get the next free id.
    pub fn register(&self, name: &str, active: UserId) -> TallyResult<User> {
        let username = User::validate_name(name).map_err(TallyError::Validation)?;
        if self.storage.users.find_by_name(&username)?.is_some() {
            return Err(TallyError::Validation(format!(
                "Username '{}' already exists",
                username
            )));
        }

        let id = if self.storage.users.is_empty()? {
            active
        } else {
            self.storage.users.next_id()?
        };
        let user = User::new(id, username);
        self.storage.users.insert(user.clone())?;
        self.storage.users.save()?;
        tracing::info!(id = %user.id, username = %user.username, "registered user");
        Ok(user)
    }

    pub fn list(&self) -> TallyResult<Vec<User>> {
        self.storage.users.all()
    }

    pub fn find_by_name(&self, name: &str) -> TallyResult<User> {
        self.storage
            .users
            .find_by_name(name)?
            .ok_or_else(|| TallyError::user_not_found(name.trim()))
    }

    /// The user commands act on: `requested` (from `--user`) or `active`.
    ///
    /// A requested id must always be registered. The active user must be
    /// registered once any user exists.
    pub fn resolve_acting(&self, requested: Option<UserId>, active: UserId) -> TallyResult<UserId> {
        if let Some(id) = requested {
            return match self.storage.users.get(id)? {
                Some(_) => Ok(id),
                None => Err(TallyError::Validation(format!(
                    "User {} is not registered; see 'tally user list'",
                    id
                ))),
            };
        }

        if self.storage.users.is_empty()? || self.storage.users.get(active)?.is_some() {
            Ok(active)
        } else {
            Err(TallyError::Validation(format!(
                "Active user {} is not registered; run 'tally user switch <NAME>'",
                active
            )))
        }
    }
}
