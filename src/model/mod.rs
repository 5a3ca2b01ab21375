pub mod attendance;
pub mod call_event;
pub mod role;
pub mod user;
