use cams::error::CampError;
use cams::model::*;
use cams::ops::*;
use cams::store::*;

fn date(m: u32, d: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(2030, m, d).unwrap()
}

fn today() -> chrono::NaiveDate {
    date(1, 1)
}

fn draft(name: &str, from: (u32, u32), to: (u32, u32)) -> NewCamp {
    NewCamp {
        name: name.into(),
        region: TimeRegion::new(date(from.0, from.1), date(to.0, to.1)).unwrap(),
        registration_close: date(from.0, from.1),
        eligible_faculty: "SCSE".into(),
        location: "Hall 1".into(),
        total_slots: 4,
        committee_slots: 1,
        description: "Three days of games".into(),
    }
}

struct World {
    camps: CampController,
    users: UserController,
    tan: User,
    camp_id: Id<Camp>,
}

impl World {
    fn user(&self, id: &str) -> User {
        self.users.get_user(id).unwrap().clone()
    }

    fn camp(&self) -> &Camp {
        self.camps.get_camp(self.camp_id).unwrap()
    }
}

fn setup() -> World {
    let mut users = UserController::new();
    let tan = User::staff("Dr Tan".into(), "tan".into(), "pw".into(), "SCSE".into());
    users.add_user(tan.clone()).unwrap();
    users
        .add_user(User::staff("Dr Lim".into(), "lim".into(), "pw".into(), "SCSE".into()))
        .unwrap();
    for id in ["alice", "bob", "carol", "dave"] {
        users
            .add_user(User::student(id.to_uppercase(), id.into(), "pw".into(), "SCSE".into()))
            .unwrap();
    }

    let mut camps = CampController::new();
    let camp_id = camps.create_camp(&tan, draft("Orientation", (6, 1), (6, 5))).unwrap().id;
    World {
        camps,
        users,
        tan,
        camp_id,
    }
}

fn join(w: &mut World, user_id: &str, as_committee: bool) -> cams::error::CampResult<()> {
    let camp_id = w.camp_id;
    membership_ops::join_camp(&mut w.camps, &mut w.users, user_id, camp_id, as_committee, today())
}

// ==========================================================================
// MEMBERSHIP OPS
// ==========================================================================

#[test]
fn join_as_attendee_updates_camp_and_user() {
    let mut w = setup();
    join(&mut w, "alice", false).unwrap();
    assert!(w.camp().is_attendee("alice"));
    assert_eq!(w.user("alice").attending_camps, vec![w.camp_id]);
    assert!(w.user("alice").is_student());
}

#[test]
fn join_as_committee_converts_role() {
    let mut w = setup();
    join(&mut w, "alice", true).unwrap();
    let alice = w.user("alice");
    assert_eq!(alice.committee_camp(), Some(w.camp_id));
    assert_eq!(alice.attending_camps, vec![w.camp_id]);
    assert!(w.camp().is_committee_member("alice"));
    assert_eq!(w.users.len(), 6);
}

#[test]
fn committee_member_attends_but_cannot_serve_twice() {
    let mut w = setup();
    join(&mut w, "alice", true).unwrap();
    let later = w.camps.create_camp(&w.tan, draft("Later", (7, 1), (7, 5))).unwrap().id;

    let result = membership_ops::join_camp(&mut w.camps, &mut w.users, "alice", later, true, today());
    assert!(matches!(result, Err(CampError::NotEligible { .. })));

    membership_ops::join_camp(&mut w.camps, &mut w.users, "alice", later, false, today()).unwrap();
    let alice = w.user("alice");
    assert_eq!(alice.committee_camp(), Some(w.camp_id));
    assert_eq!(alice.attending_camps, vec![w.camp_id, later]);
    assert!(w.camps.get_camp(later).unwrap().is_attendee("alice"));
}

#[test]
fn join_rejects_clashing_camp_and_changes_nothing() {
    let mut w = setup();
    join(&mut w, "alice", false).unwrap();
    let clash = w.camps.create_camp(&w.tan, draft("Clash", (6, 5), (6, 7))).unwrap().id;

    let result = membership_ops::join_camp(&mut w.camps, &mut w.users, "alice", clash, true, today());
    assert!(matches!(result, Err(CampError::TimeConflict { .. })));
    assert!(w.user("alice").is_student());
    assert_eq!(w.user("alice").attending_camps, vec![w.camp_id]);
    assert!(!w.camps.get_camp(clash).unwrap().is_member("alice"));
}

#[test]
fn join_fails_when_attendee_pool_full() {
    let mut w = setup();
    for id in ["alice", "bob", "carol"] {
        join(&mut w, id, false).unwrap();
    }
    assert!(matches!(join(&mut w, "dave", false), Err(CampError::CampFull { .. })));
    join(&mut w, "dave", true).unwrap();
}

#[test]
fn join_twice_is_rejected() {
    let mut w = setup();
    join(&mut w, "alice", false).unwrap();
    assert!(matches!(join(&mut w, "alice", false), Err(CampError::AlreadyMember { .. })));
}

#[test]
fn join_unknown_user_is_not_found() {
    let mut w = setup();
    assert!(matches!(join(&mut w, "ghost", false), Err(CampError::NotFound { .. })));
}

#[test]
fn withdraw_frees_slot_and_blocks_rejoin() {
    let mut w = setup();
    join(&mut w, "alice", false).unwrap();
    let camp_id = w.camp_id;
    membership_ops::withdraw(&mut w.camps, &mut w.users, "alice", camp_id).unwrap();

    assert!(w.user("alice").attending_camps.is_empty());
    assert_eq!(w.camp().remaining_attendee_slots(), 3);
    assert!(matches!(
        join(&mut w, "alice", false),
        Err(CampError::PreviouslyWithdrawn { .. })
    ));
}

#[test]
fn committee_withdraw_is_rejected() {
    let mut w = setup();
    join(&mut w, "alice", true).unwrap();
    let camp_id = w.camp_id;
    let result = membership_ops::withdraw(&mut w.camps, &mut w.users, "alice", camp_id);
    assert!(matches!(result, Err(CampError::CommitteeCannotWithdraw { .. })));
    assert_eq!(w.user("alice").attending_camps, vec![camp_id]);
}

// ==========================================================================
// CAMP OPS
// ==========================================================================

#[test]
fn owner_can_update_camp() {
    let mut w = setup();
    let camp_id = w.camp_id;
    let tan = w.tan.clone();
    let updated = camp_ops::update_camp(
        &mut w.camps,
        &tan,
        camp_id,
        CampUpdate {
            location: Some("Hall 9".into()),
            ..CampUpdate::default()
        },
    )
    .unwrap();
    assert_eq!(updated.location, "Hall 9");
    assert_eq!(w.camp().location, "Hall 9");
}

#[test]
fn moving_dates_onto_a_members_other_camp_is_rejected() {
    let mut w = setup();
    let tan = w.tan.clone();
    let later = w.camps.create_camp(&tan, draft("Later", (6, 10), (6, 12))).unwrap().id;
    join(&mut w, "alice", false).unwrap();
    membership_ops::join_camp(&mut w.camps, &mut w.users, "alice", later, false, today()).unwrap();

    let moved = CampUpdate {
        start: Some(date(6, 2)),
        end: Some(date(6, 5)),
        registration_close: Some(date(6, 1)),
        ..CampUpdate::default()
    };
    let result = camp_ops::update_camp(&mut w.camps, &tan, later, moved);
    assert!(matches!(result, Err(CampError::TimeConflict { .. })));
    let camp = w.camps.get_camp(later).unwrap();
    assert_eq!(camp.region, TimeRegion::new(date(6, 10), date(6, 12)).unwrap());

    // A move that stays clear of the member's other camp goes through.
    let clear = CampUpdate {
        start: Some(date(6, 8)),
        end: Some(date(6, 9)),
        registration_close: Some(date(6, 1)),
        ..CampUpdate::default()
    };
    let updated = camp_ops::update_camp(&mut w.camps, &tan, later, clear).unwrap();
    assert_eq!(updated.region.start(), date(6, 8));
}

#[test]
fn non_owner_cannot_update_or_hide() {
    let mut w = setup();
    let camp_id = w.camp_id;
    let lim = w.user("lim");
    let result = camp_ops::set_visibility(&mut w.camps, &lim, camp_id, false);
    assert!(matches!(result, Err(CampError::Unauthorized { .. })));
    assert!(w.camp().visible);
}

#[test]
fn hidden_camp_cannot_be_joined() {
    let mut w = setup();
    let camp_id = w.camp_id;
    let tan = w.tan.clone();
    camp_ops::set_visibility(&mut w.camps, &tan, camp_id, false).unwrap();
    assert!(matches!(join(&mut w, "alice", false), Err(CampError::NotEligible { .. })));
}

// ==========================================================================
// ENQUIRY OPS
// ==========================================================================

#[test]
fn student_enquiry_lifecycle() {
    let mut w = setup();
    let camp_id = w.camp_id;
    let bob = w.user("bob");
    let enquiry = enquiry_ops::submit_enquiry(&mut w.camps, &bob, camp_id, "Is food provided?").unwrap();
    assert!(!enquiry.is_answered());

    let edited = enquiry_ops::edit_enquiry(&mut w.camps, &bob, camp_id, enquiry.id, "Is dinner provided?").unwrap();
    assert_eq!(edited.message, "Is dinner provided?");

    let tan = w.tan.clone();
    enquiry_ops::answer_enquiry(&mut w.camps, &tan, camp_id, enquiry.id, "Yes").unwrap();

    assert!(matches!(
        enquiry_ops::edit_enquiry(&mut w.camps, &bob, camp_id, enquiry.id, "Lunch?"),
        Err(CampError::AlreadyAnswered)
    ));
    assert!(matches!(
        enquiry_ops::delete_enquiry(&mut w.camps, &bob, camp_id, enquiry.id),
        Err(CampError::AlreadyAnswered)
    ));
    assert!(matches!(
        enquiry_ops::answer_enquiry(&mut w.camps, &tan, camp_id, enquiry.id, "Still yes"),
        Err(CampError::AlreadyAnswered)
    ));
}

#[test]
fn unanswered_enquiry_can_be_deleted_by_sender_only() {
    let mut w = setup();
    let camp_id = w.camp_id;
    let bob = w.user("bob");
    let carol = w.user("carol");
    let enquiry = enquiry_ops::submit_enquiry(&mut w.camps, &bob, camp_id, "Parking?").unwrap();

    assert!(matches!(
        enquiry_ops::delete_enquiry(&mut w.camps, &carol, camp_id, enquiry.id),
        Err(CampError::Unauthorized { .. })
    ));
    enquiry_ops::delete_enquiry(&mut w.camps, &bob, camp_id, enquiry.id).unwrap();
    assert!(w.camp().enquiries.is_empty());
}

#[test]
fn committee_answers_but_cannot_ask_own_camp() {
    let mut w = setup();
    let camp_id = w.camp_id;
    join(&mut w, "alice", true).unwrap();
    let alice = w.user("alice");
    let bob = w.user("bob");

    assert!(matches!(
        enquiry_ops::submit_enquiry(&mut w.camps, &alice, camp_id, "Hello?"),
        Err(CampError::Unauthorized { .. })
    ));

    let enquiry = enquiry_ops::submit_enquiry(&mut w.camps, &bob, camp_id, "Dress code?").unwrap();
    let answered = enquiry_ops::answer_enquiry(&mut w.camps, &alice, camp_id, enquiry.id, "Casual").unwrap();
    assert_eq!(answered.reply.unwrap().responder, "alice");
}

#[test]
fn plain_students_and_other_staff_cannot_answer() {
    let mut w = setup();
    let camp_id = w.camp_id;
    let bob = w.user("bob");
    let carol = w.user("carol");
    let lim = w.user("lim");
    let enquiry = enquiry_ops::submit_enquiry(&mut w.camps, &bob, camp_id, "Dress code?").unwrap();

    for responder in [&carol, &lim] {
        assert!(matches!(
            enquiry_ops::answer_enquiry(&mut w.camps, responder, camp_id, enquiry.id, "No idea"),
            Err(CampError::Unauthorized { .. })
        ));
    }
}

#[test]
fn blank_enquiry_is_rejected() {
    let mut w = setup();
    let camp_id = w.camp_id;
    let bob = w.user("bob");
    assert!(matches!(
        enquiry_ops::submit_enquiry(&mut w.camps, &bob, camp_id, "   "),
        Err(CampError::BlankField { .. })
    ));
}

// ==========================================================================
// SUGGESTION OPS
// ==========================================================================

#[test]
fn accepting_suggestion_awards_point_and_removes_it() {
    let mut w = setup();
    let camp_id = w.camp_id;
    join(&mut w, "alice", true).unwrap();
    let alice = w.user("alice");
    let suggestion = suggestion_ops::submit_suggestion(&mut w.camps, &alice, camp_id, "Add a night walk").unwrap();

    let tan = w.tan.clone();
    let points =
        suggestion_ops::accept_suggestion(&mut w.camps, &mut w.users, &tan, camp_id, suggestion.id).unwrap();
    assert_eq!(points, 1);
    assert_eq!(w.user("alice").points(), Some(1));
    assert!(w.camp().suggestions.is_empty());
}

#[test]
fn accepting_needs_sender_on_this_camps_committee() {
    let mut w = setup();
    let camp_id = w.camp_id;
    let tan = w.tan.clone();
    let later = w.camps.create_camp(&tan, draft("Later", (7, 1), (7, 5))).unwrap().id;
    membership_ops::join_camp(&mut w.camps, &mut w.users, "bob", later, true, today()).unwrap();

    let stray = Suggestion::create("bob".into(), "Swap the venue".into());
    w.camps.get_camp_mut(camp_id).unwrap().suggestions.push(stray.clone());

    let result = suggestion_ops::accept_suggestion(&mut w.camps, &mut w.users, &tan, camp_id, stray.id);
    assert!(matches!(result, Err(CampError::InvalidState(_))));
    assert_eq!(w.user("bob").points(), Some(0));
    assert_eq!(w.camp().suggestions.len(), 1);
}

#[test]
fn rejecting_suggestion_only_removes_it() {
    let mut w = setup();
    let camp_id = w.camp_id;
    join(&mut w, "alice", true).unwrap();
    let alice = w.user("alice");
    let suggestion = suggestion_ops::submit_suggestion(&mut w.camps, &alice, camp_id, "Longer breaks").unwrap();

    let tan = w.tan.clone();
    suggestion_ops::reject_suggestion(&mut w.camps, &tan, camp_id, suggestion.id).unwrap();
    assert_eq!(w.user("alice").points(), Some(0));
    assert!(w.camp().suggestions.is_empty());
}

#[test]
fn only_owner_reviews_suggestions() {
    let mut w = setup();
    let camp_id = w.camp_id;
    join(&mut w, "alice", true).unwrap();
    let alice = w.user("alice");
    let suggestion = suggestion_ops::submit_suggestion(&mut w.camps, &alice, camp_id, "More snacks").unwrap();

    let lim = w.user("lim");
    let result = suggestion_ops::accept_suggestion(&mut w.camps, &mut w.users, &lim, camp_id, suggestion.id);
    assert!(matches!(result, Err(CampError::Unauthorized { .. })));
    assert_eq!(w.user("alice").points(), Some(0));
    assert_eq!(w.camp().suggestions.len(), 1);
}

#[test]
fn only_the_camps_committee_can_suggest() {
    let mut w = setup();
    let camp_id = w.camp_id;
    join(&mut w, "bob", false).unwrap();
    let bob = w.user("bob");
    assert!(matches!(
        suggestion_ops::submit_suggestion(&mut w.camps, &bob, camp_id, "Pizza"),
        Err(CampError::Unauthorized { .. })
    ));
}

#[test]
fn sender_edits_own_suggestion() {
    let mut w = setup();
    let camp_id = w.camp_id;
    join(&mut w, "alice", true).unwrap();
    let alice = w.user("alice");
    let suggestion = suggestion_ops::submit_suggestion(&mut w.camps, &alice, camp_id, "Pizza").unwrap();

    let edited =
        suggestion_ops::edit_suggestion(&mut w.camps, &alice, camp_id, suggestion.id, "Pizza and salad").unwrap();
    assert_eq!(edited.message, "Pizza and salad");

    let bob = w.user("bob");
    assert!(suggestion_ops::edit_suggestion(&mut w.camps, &bob, camp_id, suggestion.id, "Burgers").is_err());
}
