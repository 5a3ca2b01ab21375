use sqlx::MySqlPool;

use crate::model::user::RosterUser;

/// Which of an admin's users a request is about.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum UserSelector {
    All,
    One(i64),
}

/// The admin's users, ordered by id. Users of other tenants are never returned.
pub async fn list_roster(
    pool: &MySqlPool,
    admin_id: i64,
    selector: UserSelector,
) -> Result<Vec<RosterUser>, sqlx::Error> {
    match selector {
        UserSelector::All => {
            sqlx::query_as::<_, RosterUser>(
                "SELECT id, name FROM users WHERE admin_id = ? ORDER BY id ASC",
            )
            .bind(admin_id)
            .fetch_all(pool)
            .await
        }
        UserSelector::One(user_id) => {
            sqlx::query_as::<_, RosterUser>(
                "SELECT id, name FROM users WHERE admin_id = ? AND id = ?",
            )
            .bind(admin_id)
            .bind(user_id)
            .fetch_all(pool)
            .await
        }
    }
}
