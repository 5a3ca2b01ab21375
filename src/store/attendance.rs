use chrono::NaiveDateTime;
use sqlx::MySqlPool;
use tracing::debug;

use crate::model::attendance::AttendanceRecord;

/// Attendance rows with `check_in` in `[start, end)`.
pub async fn list_by_user_in_range(
    pool: &MySqlPool,
    user_id: i64,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
    let rows = sqlx::query_as::<_, AttendanceRecord>(
        r#"
        SELECT id, user_id, check_in, check_out, status
        FROM attendance
        WHERE user_id = ?
        AND check_in >= ?
        AND check_in < ?
        ORDER BY check_in ASC
        "#,
    )
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    debug!(user_id, %start, %end, rows = rows.len(), "Loaded attendance");
    Ok(rows)
}

/// `(all check-ins, on-time check-ins)` over the user's whole history.
pub async fn punctuality_counts(pool: &MySqlPool, user_id: i64) -> Result<(i64, i64), sqlx::Error> {
    sqlx::query_as::<_, (i64, i64)>(
        r#"
        SELECT
            COUNT(*),
            COUNT(CASE WHEN status = 'on-time' THEN 1 END)
        FROM attendance
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}
