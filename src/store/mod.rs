pub mod camp_controller;
pub mod user_controller;
pub mod user_file;

pub use camp_controller::CampController;
pub use user_controller::UserController;
pub use user_file::RosterKind;
