//! Read-only access to the tables owned by the sync and account services.

pub mod attendance;
pub mod call_event;
pub mod user;
