pub mod camp_ops;
pub mod enquiry_ops;
pub mod membership_ops;
pub mod suggestion_ops;
