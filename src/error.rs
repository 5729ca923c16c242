use thiserror::Error;

#[derive(Debug, Error)]
pub enum CampError {
    #[error("{field} cannot be blank")]
    BlankField { field: String },

    #[error("Invalid date range: {start} is after {end}")]
    InvalidRegion { start: String, end: String },

    #[error("Invalid {field}: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Invalid slots: {reason}")]
    InvalidSlots { reason: String },

    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    #[error("{entity_type} already exists: {identifier}")]
    AlreadyExists {
        entity_type: String,
        identifier: String,
    },

    #[error("Not authorized to {action}")]
    Unauthorized { action: String },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Malformed input on line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("{user_id} is not eligible for camp {camp}")]
    NotEligible { user_id: String, camp: String },

    #[error("Registration for {camp} closed on {closed_on}")]
    RegistrationClosed { camp: String, closed_on: String },

    #[error("No attendee slots left in {camp}")]
    CampFull { camp: String },

    #[error("No committee slots left in {camp}")]
    CommitteeFull { camp: String },

    #[error("{camp} clashes with a camp {user_id} is already attending")]
    TimeConflict { user_id: String, camp: String },

    #[error("{user_id} has already joined {camp}")]
    AlreadyMember { user_id: String, camp: String },

    #[error("{user_id} withdrew from {camp} and cannot rejoin")]
    PreviouslyWithdrawn { user_id: String, camp: String },

    #[error("Committee members cannot withdraw from {camp}")]
    CommitteeCannotWithdraw { camp: String },

    #[error("{user_id} is not a member of {camp}")]
    NotAMember { user_id: String, camp: String },

    #[error("Enquiry has already been answered")]
    AlreadyAnswered,

    #[error("{0}")]
    Usage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CampResult<T> = Result<T, CampError>;

impl CampError {
    pub(crate) fn not_found(entity_type: &str, id: impl ToString) -> Self {
        CampError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    pub(crate) fn unauthorized(action: &str) -> Self {
        CampError::Unauthorized {
            action: action.into(),
        }
    }
}
