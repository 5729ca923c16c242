use std::fs;
use std::path::Path;

use tracing::{debug, info};

use super::camp_controller::CampController;
use super::user_file::{self, RosterKind};
use crate::error::{CampError, CampResult};
use crate::model::{Camp, Id, Role, User};
use crate::validation;

/// Owns every account in the system.
#[derive(Debug, Default)]
pub struct UserController {
    users: Vec<User>,
}

impl UserController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Adds a new account. Fields that could not be saved are rejected here.
    pub fn add_user(&mut self, user: User) -> CampResult<()> {
        user_file::check_record_fields(&user)?;
        if self.users.iter().any(|u| u.user_id == user.user_id) {
            return Err(CampError::AlreadyExists {
                entity_type: "User".into(),
                identifier: user.user_id,
            });
        }
        self.users.push(user);
        Ok(())
    }

    /// First user whose id and password both match.
    pub fn verify_login(&self, user_id: &str, password: &str) -> CampResult<&User> {
        self.users
            .iter()
            .find(|u| u.verify(user_id, password))
            .ok_or_else(|| CampError::not_found("User", user_id))
    }

    pub fn get_user(&self, user_id: &str) -> CampResult<&User> {
        self.users
            .iter()
            .find(|u| u.user_id == user_id)
            .ok_or_else(|| CampError::not_found("User", user_id))
    }

    pub fn get_user_mut(&mut self, user_id: &str) -> CampResult<&mut User> {
        self.users
            .iter_mut()
            .find(|u| u.user_id == user_id)
            .ok_or_else(|| CampError::not_found("User", user_id))
    }

    /// Resolves every id or none: the first unknown id fails the whole batch.
    pub fn get_users<S: AsRef<str>>(&self, user_ids: &[S]) -> CampResult<Vec<&User>> {
        user_ids.iter().map(|id| self.get_user(id.as_ref())).collect()
    }

    /// Replaces `student` with a committee record for `camp_id` and returns it.
    /// Any copy the caller still holds of the old record is stale afterwards.
    ///
    /// Fails with [`CampError::InvalidState`] when the student was not taken
    /// from this controller or is no longer a plain student; nothing changes then.
    pub fn convert_to(&mut self, student: &User, camp_id: Id<Camp>) -> CampResult<&User> {
        let pos = self
            .users
            .iter()
            .position(|u| u.user_id == student.user_id)
            .ok_or_else(|| {
                CampError::InvalidState(format!(
                    "{} is not held by this controller; look the user up here before converting",
                    student.user_id
                ))
            })?;
        if self.users[pos].role != Role::Student {
            return Err(CampError::InvalidState(format!(
                "{} is a {}, only students can join a committee",
                student.user_id,
                self.users[pos].role.display_name()
            )));
        }

        let old = self.users.remove(pos);
        let member = User::committee_from(&old, camp_id);
        info!(user_id = %member.user_id, camp_id = %camp_id, "Converted student to committee member");
        self.users.push(member);
        Ok(&self.users[self.users.len() - 1])
    }

    pub fn change_password(&mut self, user_id: &str, old: &str, new: &str) -> CampResult<()> {
        let new = validation::non_blank(new, "password")?;
        validation::record_field(&new, "password")?;
        let user = self.get_user_mut(user_id)?;
        if !user.verify(user_id, old) {
            return Err(CampError::unauthorized("change this password"));
        }
        user.password = new;
        user.first_login = false;
        Ok(())
    }

    pub fn committees(&self) -> Vec<&User> {
        self.users.iter().filter(|u| u.is_committee()).collect()
    }

    /// Rebuilds each user's attending camps from the camp rosters. Saved user
    /// records do not carry them, so call this after loading both stores.
    pub fn relink(&mut self, camps: &CampController) {
        for user in &mut self.users {
            user.attending_camps = camps
                .camps()
                .iter()
                .filter(|c| c.is_member(&user.user_id))
                .map(|c| c.id)
                .collect();
        }
    }

    /// Adds every account from a roster file. Logins already present are skipped.
    /// A malformed line aborts the import before anything is added.
    pub fn import_roster(&mut self, path: &Path, kind: RosterKind) -> CampResult<usize> {
        let text = fs::read_to_string(path)?;
        let imported = user_file::parse_roster(&text, kind)?;

        let mut added = 0;
        for user in imported {
            match self.add_user(user) {
                Ok(()) => added += 1,
                Err(CampError::AlreadyExists { identifier, .. }) => {
                    debug!(user_id = %identifier, "Skipping existing user");
                }
                Err(e) => return Err(e),
            }
        }
        info!(path = %path.display(), added, "Imported roster");
        Ok(added)
    }

    /// Writes every account. The file is left alone if any record cannot be written.
    pub fn save_to(&self, path: &Path) -> CampResult<()> {
        let mut text = String::new();
        for user in &self.users {
            text.push_str(&user_file::representation(user)?);
            text.push('\n');
        }
        fs::write(path, text)?;
        info!(path = %path.display(), users = self.users.len(), "Saved users");
        Ok(())
    }

    /// Loads a saved user list. Any malformed line fails the whole load.
    pub fn load_from(path: &Path) -> CampResult<Self> {
        let text = fs::read_to_string(path)?;
        let mut controller = Self::new();
        for user in user_file::parse_users(&text)? {
            controller.add_user(user)?;
        }
        info!(path = %path.display(), users = controller.len(), "Loaded users");
        Ok(controller)
    }

    pub fn write_performance(&self, path: &Path, committees: &[&User], delimiter: &str) -> CampResult<()> {
        fs::write(path, user_file::performance_report(committees, delimiter))?;
        info!(path = %path.display(), members = committees.len(), "Wrote performance report");
        Ok(())
    }
}
