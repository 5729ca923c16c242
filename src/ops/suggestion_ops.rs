use tracing::info;

use crate::error::{CampError, CampResult};
use crate::model::{Camp, Id, Suggestion, User};
use crate::store::{CampController, UserController};
use crate::validation;

fn serves_on(member: &User, camp: &Camp) -> bool {
    member.committee_camp() == Some(camp.id) && camp.is_committee_member(&member.user_id)
}

pub fn submit_suggestion(
    camps: &mut CampController,
    member: &User,
    camp_id: Id<Camp>,
    message: &str,
) -> CampResult<Suggestion> {
    let message = validation::non_blank(message, "suggestion")?;
    let camp = camps.get_camp_mut(camp_id)?;
    if !serves_on(member, camp) {
        return Err(CampError::unauthorized("make suggestions for this camp"));
    }

    let suggestion = Suggestion::create(member.user_id.clone(), message);
    camp.suggestions.push(suggestion.clone());
    info!(camp_id = %camp_id, suggestion_id = %suggestion.id, sender = %member.user_id, "Submitted suggestion");
    Ok(suggestion)
}

pub fn edit_suggestion(
    camps: &mut CampController,
    member: &User,
    camp_id: Id<Camp>,
    suggestion_id: Id<Suggestion>,
    message: &str,
) -> CampResult<Suggestion> {
    let message = validation::non_blank(message, "suggestion")?;
    let suggestion = camps.get_camp_mut(camp_id)?.suggestion_mut(suggestion_id)?;
    if suggestion.sender != member.user_id {
        return Err(CampError::unauthorized("change someone else's suggestion"));
    }
    suggestion.message = message;
    Ok(suggestion.clone())
}

fn owned_camp_mut<'a>(camps: &'a mut CampController, staff: &User, camp_id: Id<Camp>) -> CampResult<&'a mut Camp> {
    let camp = camps.get_camp_mut(camp_id)?;
    if !camp.is_owner(staff) {
        return Err(CampError::unauthorized("review suggestions for this camp"));
    }
    Ok(camp)
}

/// Accepts a suggestion: the sender earns a point and the suggestion goes away.
/// Returns the sender's new point total. Both happen or neither does.
pub fn accept_suggestion(
    camps: &mut CampController,
    users: &mut UserController,
    staff: &User,
    camp_id: Id<Camp>,
    suggestion_id: Id<Suggestion>,
) -> CampResult<u32> {
    let camp = owned_camp_mut(camps, staff, camp_id)?;
    let sender = camp.suggestion(suggestion_id)?.sender.clone();
    if !serves_on(users.get_user(&sender)?, camp) {
        return Err(CampError::InvalidState(format!(
            "suggestion sender {sender} does not serve on {}",
            camp.name
        )));
    }

    camp.remove_suggestion(suggestion_id)?;
    let member = users.get_user_mut(&sender)?;
    member.add_point();
    let points = member.points().unwrap_or_default();
    info!(camp_id = %camp_id, suggestion_id = %suggestion_id, sender = %sender, points, "Accepted suggestion");
    Ok(points)
}

pub fn reject_suggestion(
    camps: &mut CampController,
    staff: &User,
    camp_id: Id<Camp>,
    suggestion_id: Id<Suggestion>,
) -> CampResult<Suggestion> {
    let removed = owned_camp_mut(camps, staff, camp_id)?.remove_suggestion(suggestion_id)?;
    info!(camp_id = %camp_id, suggestion_id = %suggestion_id, "Rejected suggestion");
    Ok(removed)
}
