use chrono::NaiveDate;
use tracing::info;

use crate::error::{CampError, CampResult};
use crate::model::{Camp, Id};
use crate::store::{CampController, UserController};

/// Signs a student up for a camp, as an attendee or as a committee member.
///
/// Every rule is checked before anything changes. Joining as committee turns
/// the student into a committee record; earlier copies of that user are stale.
pub fn join_camp(
    camps: &mut CampController,
    users: &mut UserController,
    user_id: &str,
    camp_id: Id<Camp>,
    as_committee: bool,
    today: NaiveDate,
) -> CampResult<()> {
    let student = users.get_user(user_id)?.clone();
    let camp = camps.get_camp(camp_id)?;

    camp.check_admission(&student, as_committee, today)?;
    if !student.check_time_conflicts(camp, camps.camps()) {
        return Err(CampError::TimeConflict {
            user_id: student.user_id.clone(),
            camp: camp.name.clone(),
        });
    }

    if as_committee {
        users.convert_to(&student, camp_id)?;
    }
    users.get_user_mut(user_id)?.join_camp(camp_id);
    camps.get_camp_mut(camp_id)?.enrol(user_id, as_committee);

    info!(user_id, camp_id = %camp_id, as_committee, "Joined camp");
    Ok(())
}

/// Withdraws an attendee. Committee members stay for the whole camp.
pub fn withdraw(
    camps: &mut CampController,
    users: &mut UserController,
    user_id: &str,
    camp_id: Id<Camp>,
) -> CampResult<()> {
    users.get_user(user_id)?;
    camps.get_camp_mut(camp_id)?.withdraw(user_id)?;
    users.get_user_mut(user_id)?.leave_camp(camp_id);

    info!(user_id, camp_id = %camp_id, "Withdrew from camp");
    Ok(())
}
