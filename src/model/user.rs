use std::collections::BTreeMap;

use super::camp::Camp;
use super::filter::Filter;
use super::ids::Id;

/// Password handed out to every imported account until its first login.
pub const DEFAULT_PASSWORD: &str = "password";

/// What a user is allowed to do. A committee member is a student serving
/// exactly one camp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Student,
    Committee { camp_id: Id<Camp>, points: u32 },
    Staff,
}

impl Role {
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Committee { .. } => "Committee",
            Role::Staff => "Staff",
        }
    }
}

#[derive(Debug, Clone)]
pub struct User {
    pub name: String,
    pub user_id: String,
    pub email: Option<String>,
    pub password: String,
    pub faculty: String,
    pub first_login: bool,
    pub role: Role,
    /// Camps this user has joined, kept for clash detection only.
    /// The camp's own roster is the record of membership.
    pub attending_camps: Vec<Id<Camp>>,
    pub filters: BTreeMap<String, Filter>,
}

impl User {
    fn create(name: String, user_id: String, password: String, faculty: String, role: Role) -> Self {
        Self {
            name,
            user_id,
            email: None,
            password,
            faculty,
            first_login: false,
            role,
            attending_camps: Vec::new(),
            filters: BTreeMap::new(),
        }
    }

    pub fn student(name: String, user_id: String, password: String, faculty: String) -> Self {
        Self::create(name, user_id, password, faculty, Role::Student)
    }

    pub fn staff(name: String, user_id: String, password: String, faculty: String) -> Self {
        Self::create(name, user_id, password, faculty, Role::Staff)
    }

    /// Builds the committee record that replaces `student`. Identity and the
    /// attending camps carry over; points start at zero.
    pub fn committee_from(student: &User, camp_id: Id<Camp>) -> Self {
        let mut member = student.clone();
        member.role = Role::Committee {
            camp_id,
            points: 0,
        };
        member
    }

    pub fn verify(&self, user_id: &str, password: &str) -> bool {
        self.user_id == user_id && self.password == password
    }

    pub fn is_staff(&self) -> bool {
        matches!(self.role, Role::Staff)
    }

    pub fn is_student(&self) -> bool {
        matches!(self.role, Role::Student)
    }

    pub fn is_committee(&self) -> bool {
        matches!(self.role, Role::Committee { .. })
    }

    /// The camp this user serves on, if they are a committee member.
    pub fn committee_camp(&self) -> Option<Id<Camp>> {
        match self.role {
            Role::Committee { camp_id, .. } => Some(camp_id),
            _ => None,
        }
    }

    pub fn points(&self) -> Option<u32> {
        match self.role {
            Role::Committee { points, .. } => Some(points),
            _ => None,
        }
    }

    /// Awards one point. Returns false for users who are not committee members.
    pub fn add_point(&mut self) -> bool {
        match &mut self.role {
            Role::Committee { points, .. } => {
                *points += 1;
                true
            }
            _ => false,
        }
    }

    /// True when none of the attending camps clashes with `candidate`.
    /// Attending ids with no matching camp in `camps` are ignored.
    pub fn check_time_conflicts<'a>(
        &self,
        candidate: &Camp,
        camps: impl IntoIterator<Item = &'a Camp>,
    ) -> bool {
        camps
            .into_iter()
            .filter(|camp| self.attending_camps.contains(&camp.id))
            .all(|camp| !camp.region.conflicts_with(&candidate.region))
    }

    /// Records the camp without validation. Callers check capacity, eligibility
    /// and clashes first.
    pub fn join_camp(&mut self, camp_id: Id<Camp>) {
        if !self.attending_camps.contains(&camp_id) {
            self.attending_camps.push(camp_id);
        }
    }

    pub fn leave_camp(&mut self, camp_id: Id<Camp>) {
        self.attending_camps.retain(|id| *id != camp_id);
    }

    pub fn set_filter(&mut self, key: &str, filter: Filter) {
        self.filters.insert(key.to_string(), filter);
    }

    pub fn clear_filter(&mut self, key: &str) -> Option<Filter> {
        self.filters.remove(key)
    }

    pub fn active_filters(&self) -> Vec<Filter> {
        self.filters.values().cloned().collect()
    }
}
