use crate::{
    analytics::engagement::{EngagementInputs, EngagementScore},
    auth::auth::AuthUser,
    error::ApiError,
    store::{
        attendance, call_event,
        user::{self, UserSelector},
    },
};
use actix_web::{HttpResponse, web};
use serde::Serialize;
use sqlx::MySqlPool;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct EngagementResponse {
    pub user_id: i64,
    pub name: String,
    #[serde(flatten)]
    pub score: EngagementScore,
}

/// Punctuality / answer-rate score of one user
///
/// A separate metric from the activity performance ratio, computed over the
/// user's whole history.
#[utoipa::path(
    get,
    path = "/api/admin/engagement-score/{user_id}",
    params(
        ("user_id", Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Engagement score", body = EngagementResponse, example = json!({
            "user_id": 12,
            "name": "Asha",
            "punctuality": 90.0,
            "answer_rate": 75.5,
            "engagement_score": 84.2
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Engagement"
)]
pub async fn engagement_score(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    auth.require_admin()?;

    let user_id = path.into_inner();
    let user = user::list_roster(pool.get_ref(), auth.admin_id(), UserSelector::One(user_id))
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::not_found("User"))?;

    let ((check_ins, on_time_check_ins), (calls, answered_calls)) = futures::try_join!(
        attendance::punctuality_counts(pool.get_ref(), user.id),
        call_event::answer_counts(pool.get_ref(), user.id),
    )?;

    let score = EngagementScore::from_inputs(EngagementInputs {
        check_ins,
        on_time_check_ins,
        calls,
        answered_calls,
    });

    tracing::debug!(user_id = user.id, score = score.engagement_score, "Engagement score computed");

    Ok(HttpResponse::Ok().json(EngagementResponse {
        user_id: user.id,
        name: user.name,
        score,
    }))
}
