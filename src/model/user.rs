use serde::{Deserialize, Serialize};

/// A monitored worker as seen by their admin's dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RosterUser {
    pub id: i64,
    pub name: String,
}
