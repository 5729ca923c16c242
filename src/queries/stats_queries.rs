use crate::model::User;
use crate::store::{CampController, UserController};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampStats {
    pub total_camps: usize,
    pub visible_camps: usize,
    pub students: usize,
    pub committee_members: usize,
    pub staff: usize,
    pub attendee_signups: usize,
    pub committee_signups: usize,
    pub open_enquiries: usize,
    pub pending_suggestions: usize,
    /// Accounts that still use the password they were imported with.
    pub awaiting_first_login: usize,
}

pub fn stats(camps: &CampController, users: &UserController) -> CampStats {
    let all_camps = camps.camps();
    let all_users = users.users();

    CampStats {
        total_camps: all_camps.len(),
        visible_camps: all_camps.iter().filter(|c| c.visible).count(),
        students: all_users.iter().filter(|u| u.is_student()).count(),
        committee_members: all_users.iter().filter(|u| u.is_committee()).count(),
        staff: all_users.iter().filter(|u| u.is_staff()).count(),
        attendee_signups: all_camps.iter().map(|c| c.attendees().len()).sum(),
        committee_signups: all_camps.iter().map(|c| c.committee().len()).sum(),
        open_enquiries: all_camps
            .iter()
            .flat_map(|c| c.enquiries.iter())
            .filter(|e| !e.is_answered())
            .count(),
        pending_suggestions: all_camps.iter().map(|c| c.suggestions.len()).sum(),
        awaiting_first_login: all_users.iter().filter(|u| u.first_login).count(),
    }
}

/// Committee members by points, highest first; ties sorted by login.
pub fn committee_ranking(users: &UserController) -> Vec<&User> {
    let mut members = users.committees();
    members.sort_by(|a, b| {
        b.points()
            .cmp(&a.points())
            .then_with(|| a.user_id.cmp(&b.user_id))
    });
    members
}
