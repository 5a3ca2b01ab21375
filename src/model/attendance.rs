use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One check-in/check-out row as synced from the mobile client.
///
/// Several rows may exist for the same user and day (corrections, double
/// taps); none of them is authoritative on its own.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AttendanceRecord {
    pub id: String,
    pub user_id: i64,
    pub check_in: NaiveDateTime,
    /// `None` while the user is still checked in.
    pub check_out: Option<NaiveDateTime>,
    /// "on-time", "present", "late", ...
    pub status: Option<String>,
}
