//! Savings goal repository
//!
//! Each user has at most one goal. A file written by hand may hold several;
//! the newest one is then the active goal.

use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::TallyError;
use crate::models::{SavingsGoal, UserId};

use super::file_io::{lock_error, read_json, write_json_atomic};

#[derive(Debug, Default, Serialize, Deserialize)]
struct SavingsFile {
    #[serde(default)]
    goals: Vec<SavingsGoal>,
}

pub struct SavingsRepository {
    path: PathBuf,
    goals: RwLock<Vec<SavingsGoal>>,
}

impl SavingsRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            goals: RwLock::new(Vec::new()),
        }
    }

    pub fn load(&self) -> Result<(), TallyError> {
        let file: SavingsFile = read_json(&self.path)?;
        let mut goals = self.goals.write().map_err(lock_error)?;
        *goals = file.goals;
        Ok(())
    }

    pub fn save(&self) -> Result<(), TallyError> {
        let goals = self.goals.read().map_err(lock_error)?;
        let mut goals = goals.clone();
        goals.sort_by_key(|g| (g.user_id, g.created_at));
        write_json_atomic(&self.path, &SavingsFile { goals })
    }

    /// The newest goal of `user`
    pub fn active_for_user(&self, user: UserId) -> Result<Option<SavingsGoal>, TallyError> {
        let goals = self.goals.read().map_err(lock_error)?;
        Ok(goals
            .iter()
            .filter(|g| g.user_id == user)
            .max_by_key(|g| g.created_at)
            .cloned())
    }

    /// Insert a goal or replace the stored goal with the same id
    pub fn upsert(&self, goal: SavingsGoal) -> Result<(), TallyError> {
        let mut goals = self.goals.write().map_err(lock_error)?;
        match goals.iter_mut().find(|g| g.id == goal.id) {
            Some(existing) => *existing = goal,
            None => goals.push(goal),
        }
        Ok(())
    }

    /// Make `goal` the only goal of its user
    pub fn replace_for_user(&self, goal: SavingsGoal) -> Result<(), TallyError> {
        let mut goals = self.goals.write().map_err(lock_error)?;
        goals.retain(|g| g.user_id != goal.user_id);
        goals.push(goal);
        Ok(())
    }

    /// Drop every goal of `user`, returning how many were removed
    pub fn remove_for_user(&self, user: UserId) -> Result<usize, TallyError> {
        let mut goals = self.goals.write().map_err(lock_error)?;
        let before = goals.len();
        goals.retain(|g| g.user_id != user);
        Ok(before - goals.len())
    }
}
