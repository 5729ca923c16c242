use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use super::user_controller::UserController;
use crate::error::{CampError, CampResult};
use crate::model::{Camp, Filter, Id, NewCamp, User};

/// Owns every camp in the system.
#[derive(Debug, Default)]
pub struct CampController {
    camps: Vec<Camp>,
}

fn sort_by_name(camps: &mut [&Camp]) {
    camps.sort_by_cached_key(|c| c.name.to_lowercase());
}

impl CampController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn camps(&self) -> &[Camp] {
        &self.camps
    }

    pub fn len(&self) -> usize {
        self.camps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.camps.is_empty()
    }

    pub fn get_camp(&self, camp_id: Id<Camp>) -> CampResult<&Camp> {
        self.camps
            .iter()
            .find(|c| c.id == camp_id)
            .ok_or_else(|| CampError::not_found("Camp", camp_id))
    }

    pub fn get_camp_mut(&mut self, camp_id: Id<Camp>) -> CampResult<&mut Camp> {
        self.camps
            .iter_mut()
            .find(|c| c.id == camp_id)
            .ok_or_else(|| CampError::not_found("Camp", camp_id))
    }

    /// Camps `user` may browse that pass every filter, by name ignoring case.
    pub fn visible_camps(&self, user: &User, filters: &[Filter]) -> Vec<&Camp> {
        let mut camps: Vec<&Camp> = self
            .camps
            .iter()
            .filter(|c| c.is_visible_to(user))
            .filter(|c| Filter::accept_all(filters, c))
            .collect();
        sort_by_name(&mut camps);
        debug!(user_id = %user.user_id, filters = filters.len(), found = camps.len(), "Listed visible camps");
        camps
    }

    /// Same as [`CampController::visible_camps`] with the user's saved filters.
    pub fn visible_camps_for(&self, user: &User) -> Vec<&Camp> {
        self.visible_camps(user, &user.active_filters())
    }

    pub fn in_charge_camps(&self, staff: &User) -> Vec<&Camp> {
        self.camps.iter().filter(|c| c.is_in_charge(staff)).collect()
    }

    pub fn joined_camps(&self, user: &User) -> Vec<&Camp> {
        let mut camps: Vec<&Camp> = self
            .camps
            .iter()
            .filter(|c| c.is_member(&user.user_id))
            .collect();
        sort_by_name(&mut camps);
        camps
    }

    /// Creates a visible camp owned by `staff`. Camp names need not be unique.
    pub fn create_camp(&mut self, staff: &User, draft: NewCamp) -> CampResult<&Camp> {
        if !staff.is_staff() {
            return Err(CampError::unauthorized("create camps"));
        }
        let camp = Camp::create(&staff.user_id, draft)?;
        info!(camp_id = %camp.id, name = %camp.name, owner = %staff.user_id, "Created camp");
        self.camps.push(camp);
        Ok(&self.camps[self.camps.len() - 1])
    }

    /// Deletes a camp owned by `staff` and detaches it from every member.
    ///
    /// All members are resolved before anything changes, so an unknown member
    /// id or a non-owner leaves both collections as they were.
    pub fn delete_camp(
        &mut self,
        staff: &User,
        camp_id: Id<Camp>,
        users: &mut UserController,
    ) -> CampResult<Camp> {
        let pos = self
            .camps
            .iter()
            .position(|c| c.id == camp_id)
            .ok_or_else(|| CampError::not_found("Camp", camp_id))?;
        let camp = &self.camps[pos];
        if !camp.is_owner(staff) {
            warn!(camp_id = %camp_id, user_id = %staff.user_id, "Rejected delete by non-owner");
            return Err(CampError::unauthorized("delete a camp you do not own"));
        }

        let member_ids = camp.member_ids();
        users.get_users(member_ids.as_slice())?;

        for user_id in &member_ids {
            if let Ok(user) = users.get_user_mut(user_id) {
                user.leave_camp(camp_id);
            }
        }
        let removed = self.camps.remove(pos);
        info!(camp_id = %camp_id, name = %removed.name, detached = member_ids.len(), "Deleted camp");
        Ok(removed)
    }

    /// Writes every camp, with its roster and messages, as a JSON array.
    pub fn save_to(&self, path: &Path) -> CampResult<()> {
        let json = serde_json::to_string_pretty(&self.camps)?;
        fs::write(path, json)?;
        info!(path = %path.display(), camps = self.camps.len(), "Saved camps");
        Ok(())
    }

    /// Loads a snapshot written by [`CampController::save_to`]. A camp that
    /// breaks a slot or date rule fails the whole load.
    pub fn load_from(path: &Path) -> CampResult<Self> {
        let json = fs::read_to_string(path)?;
        let camps: Vec<Camp> = serde_json::from_str(&json)?;
        for camp in &camps {
            if let Err(e) = camp.check_invariants() {
                warn!(path = %path.display(), camp_id = %camp.id, error = %e, "Rejected camp snapshot");
                return Err(e);
            }
        }
        info!(path = %path.display(), camps = camps.len(), "Loaded camps");
        Ok(Self { camps })
    }
}
