use crate::model::{Camp, Enquiry, Suggestion, User};
use crate::store::CampController;

/// Unanswered enquiries across the camps `user` may answer, oldest first per camp.
pub fn pending_enquiries<'a>(camps: &'a CampController, user: &User) -> Vec<(&'a Camp, &'a Enquiry)> {
    camps
        .camps()
        .iter()
        .filter(|c| c.can_answer_enquiries(user))
        .flat_map(|c| {
            c.enquiries
                .iter()
                .filter(|e| !e.is_answered())
                .map(move |e| (c, e))
        })
        .collect()
}

/// Enquiries `user` has sent, with the camp each went to.
pub fn sent_enquiries<'a>(camps: &'a CampController, user: &User) -> Vec<(&'a Camp, &'a Enquiry)> {
    camps
        .camps()
        .iter()
        .flat_map(|c| c.enquiries_from(&user.user_id).into_iter().map(move |e| (c, e)))
        .collect()
}

/// Suggestions waiting for review on the camps `staff` owns.
pub fn pending_suggestions<'a>(camps: &'a CampController, staff: &User) -> Vec<(&'a Camp, &'a Suggestion)> {
    camps
        .in_charge_camps(staff)
        .into_iter()
        .flat_map(|c| c.suggestions.iter().map(move |s| (c, s)))
        .collect()
}
