pub mod engagement;
pub mod performance;
