use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::enquiry::Enquiry;
use super::ids::Id;
use super::suggestion::Suggestion;
use super::time_region::TimeRegion;
use super::user::User;
use crate::error::{CampError, CampResult};
use crate::validation;

/// Faculty value that opens a camp to every student.
pub const OPEN_TO_ALL: &str = "NTU";

/// Everything staff enter when creating a camp.
#[derive(Debug, Clone)]
pub struct NewCamp {
    pub name: String,
    pub region: TimeRegion,
    pub registration_close: NaiveDate,
    pub eligible_faculty: String,
    pub location: String,
    pub total_slots: u32,
    pub committee_slots: u32,
    pub description: String,
}

/// Owner-only edits. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct CampUpdate {
    pub name: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub registration_close: Option<NaiveDate>,
    pub eligible_faculty: Option<String>,
    pub location: Option<String>,
    pub total_slots: Option<u32>,
    pub committee_slots: Option<u32>,
    pub description: Option<String>,
    pub visible: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camp {
    pub id: Id<Camp>,
    pub name: String,
    pub region: TimeRegion,
    pub registration_close: NaiveDate,
    pub eligible_faculty: String,
    pub location: String,
    pub total_slots: u32,
    pub committee_slots: u32,
    pub description: String,
    owner: String,
    pub visible: bool,
    pub enquiries: Vec<Enquiry>,
    pub suggestions: Vec<Suggestion>,
    attendees: Vec<String>,
    committee: Vec<String>,
    withdrawn: Vec<String>,
}

impl Camp {
    /// Builds a visible camp owned by `owner` after validating the draft.
    pub fn create(owner: &str, draft: NewCamp) -> CampResult<Self> {
        let name = validation::non_blank(&draft.name, "name")?;
        validation::slots(draft.total_slots, draft.committee_slots)?;
        validation::registration_close(draft.registration_close, draft.region.start())?;

        Ok(Self {
            id: Id::generate(),
            name,
            region: draft.region,
            registration_close: draft.registration_close,
            eligible_faculty: validation::trimmed(&draft.eligible_faculty),
            location: validation::trimmed(&draft.location),
            total_slots: draft.total_slots,
            committee_slots: draft.committee_slots,
            description: validation::trimmed(&draft.description),
            owner: owner.to_string(),
            visible: true,
            enquiries: Vec::new(),
            suggestions: Vec::new(),
            attendees: Vec::new(),
            committee: Vec::new(),
            withdrawn: Vec::new(),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn is_owner(&self, staff: &User) -> bool {
        staff.is_staff() && staff.user_id == self.owner
    }

    pub fn is_in_charge(&self, staff: &User) -> bool {
        self.is_owner(staff)
    }

    pub fn is_open_to_all(&self) -> bool {
        self.eligible_faculty.eq_ignore_ascii_case(OPEN_TO_ALL)
    }

    pub fn is_eligible(&self, user: &User) -> bool {
        user.is_staff() || self.is_open_to_all() || user.faculty == self.eligible_faculty
    }

    /// Members never see the camp in browse listings again; see
    /// [`crate::store::CampController::joined_camps`] for their view.
    pub fn is_visible_to(&self, user: &User) -> bool {
        self.visible && self.is_eligible(user) && !self.is_member(&user.user_id)
    }

    pub fn attendees(&self) -> &[String] {
        &self.attendees
    }

    pub fn committee(&self) -> &[String] {
        &self.committee
    }

    pub fn is_attendee(&self, user_id: &str) -> bool {
        self.attendees.iter().any(|id| id == user_id)
    }

    pub fn is_committee_member(&self, user_id: &str) -> bool {
        self.committee.iter().any(|id| id == user_id)
    }

    pub fn is_member(&self, user_id: &str) -> bool {
        self.is_attendee(user_id) || self.is_committee_member(user_id)
    }

    pub fn has_withdrawn(&self, user_id: &str) -> bool {
        self.withdrawn.iter().any(|id| id == user_id)
    }

    /// Committee first, then attendees, in joining order.
    pub fn member_ids(&self) -> Vec<String> {
        self.committee
            .iter()
            .chain(self.attendees.iter())
            .cloned()
            .collect()
    }

    pub fn attendee_capacity(&self) -> u32 {
        self.total_slots.saturating_sub(self.committee_slots)
    }

    pub fn remaining_attendee_slots(&self) -> u32 {
        self.attendee_capacity()
            .saturating_sub(self.attendees.len() as u32)
    }

    pub fn remaining_committee_slots(&self) -> u32 {
        self.committee_slots
            .saturating_sub(self.committee.len() as u32)
    }

    /// Checks the camp-side admission rules. Clashes with the user's other
    /// camps are checked by [`User::check_time_conflicts`].
    pub fn check_admission(&self, user: &User, as_committee: bool, today: NaiveDate) -> CampResult<()> {
        if self.is_member(&user.user_id) {
            return Err(CampError::AlreadyMember {
                user_id: user.user_id.clone(),
                camp: self.name.clone(),
            });
        }
        if user.is_staff() || !self.is_visible_to(user) || (as_committee && user.is_committee()) {
            return Err(CampError::NotEligible {
                user_id: user.user_id.clone(),
                camp: self.name.clone(),
            });
        }
        if today > self.registration_close {
            return Err(CampError::RegistrationClosed {
                camp: self.name.clone(),
                closed_on: self.registration_close.to_string(),
            });
        }
        if self.has_withdrawn(&user.user_id) {
            return Err(CampError::PreviouslyWithdrawn {
                user_id: user.user_id.clone(),
                camp: self.name.clone(),
            });
        }
        if as_committee && self.remaining_committee_slots() == 0 {
            return Err(CampError::CommitteeFull {
                camp: self.name.clone(),
            });
        }
        if !as_committee && self.remaining_attendee_slots() == 0 {
            return Err(CampError::CampFull {
                camp: self.name.clone(),
            });
        }
        Ok(())
    }

    /// Adds to the roster without checks. Pair with [`Camp::check_admission`].
    pub fn enrol(&mut self, user_id: &str, as_committee: bool) {
        if self.is_member(user_id) {
            return;
        }
        let pool = if as_committee {
            &mut self.committee
        } else {
            &mut self.attendees
        };
        pool.push(user_id.to_string());
    }

    pub fn withdraw(&mut self, user_id: &str) -> CampResult<()> {
        if self.is_committee_member(user_id) {
            return Err(CampError::CommitteeCannotWithdraw {
                camp: self.name.clone(),
            });
        }
        if !self.is_attendee(user_id) {
            return Err(CampError::NotAMember {
                user_id: user_id.to_string(),
                camp: self.name.clone(),
            });
        }
        self.attendees.retain(|id| id != user_id);
        self.withdrawn.push(user_id.to_string());
        Ok(())
    }

    /// Owner or one of this camp's committee members.
    pub fn can_answer_enquiries(&self, user: &User) -> bool {
        self.is_owner(user)
            || (user.committee_camp() == Some(self.id) && self.is_committee_member(&user.user_id))
    }

    pub fn enquiry(&self, id: Id<Enquiry>) -> CampResult<&Enquiry> {
        self.enquiries
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| CampError::not_found("Enquiry", id))
    }

    pub fn enquiry_mut(&mut self, id: Id<Enquiry>) -> CampResult<&mut Enquiry> {
        self.enquiries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| CampError::not_found("Enquiry", id))
    }

    pub fn enquiries_from(&self, sender: &str) -> Vec<&Enquiry> {
        self.enquiries.iter().filter(|e| e.sender == sender).collect()
    }

    pub fn remove_enquiry(&mut self, id: Id<Enquiry>) -> CampResult<Enquiry> {
        let pos = self
            .enquiries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CampError::not_found("Enquiry", id))?;
        Ok(self.enquiries.remove(pos))
    }

    pub fn suggestion(&self, id: Id<Suggestion>) -> CampResult<&Suggestion> {
        self.suggestions
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| CampError::not_found("Suggestion", id))
    }

    pub fn suggestion_mut(&mut self, id: Id<Suggestion>) -> CampResult<&mut Suggestion> {
        self.suggestions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| CampError::not_found("Suggestion", id))
    }

    pub fn remove_suggestion(&mut self, id: Id<Suggestion>) -> CampResult<Suggestion> {
        let pos = self
            .suggestions
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| CampError::not_found("Suggestion", id))?;
        Ok(self.suggestions.remove(pos))
    }

    /// Re-checks the rules [`Camp::create`] and [`Camp::apply`] enforce, for
    /// camps that did not come through either, such as a loaded snapshot.
    pub fn check_invariants(&self) -> CampResult<()> {
        validation::non_blank(&self.name, "name")?;
        validation::registration_close(self.registration_close, self.region.start())?;
        validation::slots(self.total_slots, self.committee_slots)?;
        if (self.committee.len() as u32) > self.committee_slots
            || (self.attendees.len() as u32) > self.attendee_capacity()
        {
            return Err(CampError::InvalidSlots {
                reason: format!("{} has more sign-ups than slots", self.name),
            });
        }
        Ok(())
    }

    /// Applies an edit to a copy first, so a rejected edit leaves the camp untouched.
    pub fn apply(&mut self, update: CampUpdate) -> CampResult<()> {
        let mut next = self.clone();

        if let Some(name) = update.name {
            next.name = validation::non_blank(&name, "name")?;
        }
        let start = update.start.unwrap_or(next.region.start());
        let end = update.end.unwrap_or(next.region.end());
        next.region = TimeRegion::new(start, end)?;
        if let Some(close) = update.registration_close {
            next.registration_close = close;
        }
        if let Some(faculty) = update.eligible_faculty {
            next.eligible_faculty = validation::trimmed(&faculty);
        }
        if let Some(location) = update.location {
            next.location = validation::trimmed(&location);
        }
        if let Some(description) = update.description {
            next.description = validation::trimmed(&description);
        }
        next.total_slots = update.total_slots.unwrap_or(next.total_slots);
        next.committee_slots = update.committee_slots.unwrap_or(next.committee_slots);
        next.check_invariants()?;
        if let Some(visible) = update.visible {
            if !visible && !next.member_ids().is_empty() {
                return Err(CampError::InvalidState(format!(
                    "{} has members and cannot be hidden",
                    next.name
                )));
            }
            next.visible = visible;
        }

        *self = next;
        Ok(())
    }
}

impl fmt::Display for Camp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} @ {} ({}), {} of {} attendee slots left",
            self.name,
            self.region,
            self.location,
            self.eligible_faculty,
            self.remaining_attendee_slots(),
            self.attendee_capacity()
        )
    }
}
