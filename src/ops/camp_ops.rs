use tracing::{info, warn};

use crate::error::{CampError, CampResult};
use crate::model::{Camp, CampUpdate, Id, User};
use crate::store::CampController;

fn owned_camp<'a>(
    camps: &'a CampController,
    staff: &User,
    camp_id: Id<Camp>,
    action: &str,
) -> CampResult<&'a Camp> {
    let camp = camps.get_camp(camp_id)?;
    if !camp.is_owner(staff) {
        warn!(camp_id = %camp_id, user_id = %staff.user_id, action, "Rejected non-owner edit");
        return Err(CampError::unauthorized(action));
    }
    Ok(camp)
}

/// Fails if `moved` now overlaps another camp one of its members belongs to.
fn check_member_clashes(camps: &CampController, moved: &Camp) -> CampResult<()> {
    for user_id in moved.member_ids() {
        let clash = camps
            .camps()
            .iter()
            .filter(|other| other.id != moved.id && other.is_member(&user_id))
            .find(|other| other.region.conflicts_with(&moved.region));
        if let Some(other) = clash {
            warn!(camp_id = %moved.id, user_id = %user_id, clashes_with = %other.id, "Rejected date change");
            return Err(CampError::TimeConflict {
                user_id,
                camp: moved.name.clone(),
            });
        }
    }
    Ok(())
}

/// Applies an owner's edit. Moving the dates must not make any member's camps
/// overlap; a rejected edit leaves the camp as it was.
pub fn update_camp(
    camps: &mut CampController,
    staff: &User,
    camp_id: Id<Camp>,
    update: CampUpdate,
) -> CampResult<Camp> {
    let current = owned_camp(camps, staff, camp_id, "edit this camp")?;
    let mut next = current.clone();
    next.apply(update)?;
    if next.region != current.region {
        check_member_clashes(camps, &next)?;
    }

    *camps.get_camp_mut(camp_id)? = next.clone();
    info!(camp_id = %camp_id, "Updated camp");
    Ok(next)
}

pub fn set_visibility(
    camps: &mut CampController,
    staff: &User,
    camp_id: Id<Camp>,
    visible: bool,
) -> CampResult<Camp> {
    update_camp(
        camps,
        staff,
        camp_id,
        CampUpdate {
            visible: Some(visible),
            ..CampUpdate::default()
        },
    )
}
