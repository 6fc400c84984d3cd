//! User registry for JSON storage
//!
//! Manages loading and saving registered users to users.json

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::TallyError;
use crate::models::{User, UserId};

use super::file_io::{lock_error, read_json, write_json_atomic};

#[derive(Debug, Default, Serialize, Deserialize)]
struct UsersFile {
    #[serde(default)]
    users: Vec<User>,
}

pub struct UserRepository {
    path: PathBuf,
    data: RwLock<BTreeMap<UserId, User>>,
}

impl UserRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), TallyError> {
        let file: UsersFile = read_json(&self.path)?;
        let mut data = self.data.write().map_err(lock_error)?;
        data.clear();
        for user in file.users {
            data.insert(user.id, user);
        }
        Ok(())
    }

    pub fn save(&self) -> Result<(), TallyError> {
        let data = self.data.read().map_err(lock_error)?;
        let users = data.values().cloned().collect();
        write_json_atomic(&self.path, &UsersFile { users })
    }

    pub fn get(&self, id: UserId) -> Result<Option<User>, TallyError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// Look up a user by name, ignoring case
    pub fn find_by_name(&self, name: &str) -> Result<Option<User>, TallyError> {
        let wanted = User::normalize_name(name);
        let data = self.data.read().map_err(lock_error)?;
        Ok(data
            .values()
            .find(|u| User::normalize_name(&u.username) == wanted)
            .cloned())
    }

    /// All users in id order
    pub fn all(&self) -> Result<Vec<User>, TallyError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.values().cloned().collect())
    }

    pub fn is_empty(&self) -> Result<bool, TallyError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.is_empty())
    }

    /// One past the highest registered id, starting at 1
    pub fn next_id(&self) -> Result<UserId, TallyError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(UserId::new(data.keys().next_back().map_or(1, |id| id.get() + 1)))
    }

    pub fn insert(&self, user: User) -> Result<(), TallyError> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.insert(user.id, user);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_next_id_follows_highest() {
        let temp_dir = TempDir::new().unwrap();
        let repo = UserRepository::new(temp_dir.path().join("users.json"));
        assert!(repo.is_empty().unwrap());
        assert_eq!(repo.next_id().unwrap(), UserId::new(1));

        repo.insert(User::new(UserId::new(4), "alice")).unwrap();
        assert_eq!(repo.next_id().unwrap(), UserId::new(5));

        let bob = User::new(UserId::new(5), "bob");
        repo.insert(bob.clone()).unwrap();
        assert_eq!(repo.find_by_name("BOB").unwrap(), Some(bob));
        assert_eq!(repo.find_by_name("carol").unwrap(), None);
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("users.json");
        let repo = UserRepository::new(path.clone());
        repo.insert(User::new(UserId::new(1), "alice")).unwrap();
        repo.insert(User::new(UserId::new(2), "bob")).unwrap();
        repo.save().unwrap();

        let reloaded = UserRepository::new(path);
        reloaded.load().unwrap();
        let names: Vec<_> = reloaded.all().unwrap().into_iter().map(|u| u.username).collect();
        assert_eq!(names, vec!["alice", "bob"]);
        assert_eq!(reloaded.next_id().unwrap(), UserId::new(3));
    }
}
