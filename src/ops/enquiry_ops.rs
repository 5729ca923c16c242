use tracing::info;

use crate::error::{CampError, CampResult};
use crate::model::{Camp, Enquiry, Id, User};
use crate::store::CampController;
use crate::validation;

/// Sends a question to a camp the user can see or already attends. A camp's
/// own committee answers enquiries rather than sending them.
pub fn submit_enquiry(
    camps: &mut CampController,
    sender: &User,
    camp_id: Id<Camp>,
    message: &str,
) -> CampResult<Enquiry> {
    let message = validation::non_blank(message, "message")?;
    let camp = camps.get_camp_mut(camp_id)?;
    let reachable = camp.is_visible_to(sender) || camp.is_attendee(&sender.user_id);
    if sender.is_staff() || camp.is_committee_member(&sender.user_id) || !reachable {
        return Err(CampError::unauthorized("send an enquiry to this camp"));
    }

    let enquiry = Enquiry::create(sender.user_id.clone(), message);
    camp.enquiries.push(enquiry.clone());
    info!(camp_id = %camp_id, enquiry_id = %enquiry.id, sender = %sender.user_id, "Submitted enquiry");
    Ok(enquiry)
}

fn own_enquiry_mut<'a>(
    camp: &'a mut Camp,
    sender: &User,
    enquiry_id: Id<Enquiry>,
) -> CampResult<&'a mut Enquiry> {
    let enquiry = camp.enquiry_mut(enquiry_id)?;
    if enquiry.sender != sender.user_id {
        return Err(CampError::unauthorized("change someone else's enquiry"));
    }
    Ok(enquiry)
}

pub fn edit_enquiry(
    camps: &mut CampController,
    sender: &User,
    camp_id: Id<Camp>,
    enquiry_id: Id<Enquiry>,
    message: &str,
) -> CampResult<Enquiry> {
    let message = validation::non_blank(message, "message")?;
    let camp = camps.get_camp_mut(camp_id)?;
    let enquiry = own_enquiry_mut(camp, sender, enquiry_id)?;
    enquiry.edit(message)?;
    Ok(enquiry.clone())
}

pub fn delete_enquiry(
    camps: &mut CampController,
    sender: &User,
    camp_id: Id<Camp>,
    enquiry_id: Id<Enquiry>,
) -> CampResult<Enquiry> {
    let camp = camps.get_camp_mut(camp_id)?;
    if own_enquiry_mut(camp, sender, enquiry_id)?.is_answered() {
        return Err(CampError::AlreadyAnswered);
    }
    camp.remove_enquiry(enquiry_id)
}

/// Answers an enquiry once. Only the owner or the camp's committee may reply.
pub fn answer_enquiry(
    camps: &mut CampController,
    responder: &User,
    camp_id: Id<Camp>,
    enquiry_id: Id<Enquiry>,
    message: &str,
) -> CampResult<Enquiry> {
    let message = validation::non_blank(message, "reply")?;
    let camp = camps.get_camp_mut(camp_id)?;
    if !camp.can_answer_enquiries(responder) {
        return Err(CampError::unauthorized("answer enquiries for this camp"));
    }
    let enquiry = camp.enquiry_mut(enquiry_id)?;
    enquiry.answer(responder.user_id.clone(), message)?;
    info!(camp_id = %camp_id, enquiry_id = %enquiry_id, responder = %responder.user_id, "Answered enquiry");
    Ok(enquiry.clone())
}
