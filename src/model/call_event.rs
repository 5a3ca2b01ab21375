use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum CallType {
    Incoming,
    Outgoing,
    Missed,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CallEvent {
    pub id: i64,
    pub user_id: i64,
    pub timestamp: NaiveDateTime,
    pub call_type: Option<String>,
    /// Seconds, may be 0 for unanswered calls.
    pub duration: Option<i64>,
}

impl CallEvent {
    /// Parsed call type; `None` for empty or unrecognised values.
    pub fn kind(&self) -> Option<CallType> {
        self.call_type.as_deref().and_then(|t| t.trim().parse().ok())
    }
}
