pub mod ids;
pub mod time_region;
pub mod user;
pub mod camp;
pub mod enquiry;
pub mod suggestion;
pub mod filter;

// Re-exports for convenience
pub use ids::Id;
pub use time_region::TimeRegion;
pub use user::{Role, User, DEFAULT_PASSWORD};
pub use camp::{Camp, CampUpdate, NewCamp, OPEN_TO_ALL};
pub use enquiry::{Enquiry, Reply};
pub use suggestion::Suggestion;
pub use filter::Filter;
