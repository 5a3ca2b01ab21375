use chrono::NaiveDateTime;
use sqlx::MySqlPool;
use tracing::debug;

use crate::model::call_event::CallEvent;

/// Call events with `timestamp` in `[start, end)`, ascending.
pub async fn list_by_user_in_range(
    pool: &MySqlPool,
    user_id: i64,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<Vec<CallEvent>, sqlx::Error> {
    let rows = sqlx::query_as::<_, CallEvent>(
        r#"
        SELECT id, user_id, timestamp, call_type, duration
        FROM call_history
        WHERE user_id = ?
        AND timestamp IS NOT NULL
        AND timestamp >= ?
        AND timestamp < ?
        ORDER BY timestamp ASC, id ASC
        "#,
    )
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    debug!(user_id, %start, %end, rows = rows.len(), "Loaded call events");
    Ok(rows)
}

/// `(all calls, calls with a non-zero duration)` over the user's whole history.
pub async fn answer_counts(pool: &MySqlPool, user_id: i64) -> Result<(i64, i64), sqlx::Error> {
    sqlx::query_as::<_, (i64, i64)>(
        r#"
        SELECT
            COUNT(*),
            COUNT(CASE WHEN duration > 0 THEN 1 END)
        FROM call_history
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}
