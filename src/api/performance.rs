use crate::{
    analytics::{self, AnalyticsConfig, PerformanceResult, score::SessionDetail},
    auth::auth::AuthUser,
    config::Config,
    error::ApiError,
    model::user::RosterUser,
    store::{
        attendance, call_event,
        user::{self, UserSelector},
    },
};
use actix_web::{HttpResponse, web};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use strum_macros::{Display, EnumString};
use tracing::{debug, info};
use utoipa::{IntoParams, ToSchema};

/// Raw query string values. Anything unparsable falls back to a default
/// instead of failing the request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PerformanceQuery {
    /// today | week | month | all (default today)
    pub filter: Option<String>,
    /// A user id or "all" (default all)
    pub user_id: Option<String>,
    /// asc | desc (default desc)
    pub sort: Option<String>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DateFilter {
    #[default]
    Today,
    Week,
    Month,
    All,
}

impl DateFilter {
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        raw.and_then(|r| r.trim().parse().ok()).unwrap_or_default()
    }

    /// Half-open `[start, end)` window the filter covers at `now`.
    pub fn range(self, now: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
        match self {
            DateFilter::Today => {
                let start = now.date().and_time(NaiveTime::MIN);
                (start, start + Duration::days(1))
            }
            DateFilter::Week => (now - Duration::days(7), now),
            DateFilter::Month => (now - Duration::days(30), now),
            DateFilter::All => {
                let epoch = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default();
                (epoch.and_time(NaiveTime::MIN), now)
            }
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }
}

/// Malformed ids read as "all".
pub fn parse_user_selector(raw: Option<&str>) -> UserSelector {
    match raw.map(str::trim).and_then(|s| s.parse::<i64>().ok()) {
        Some(id) => UserSelector::One(id),
        None => UserSelector::All,
    }
}

/// Column-oriented payload consumed by the dashboard chart and table.
#[derive(Debug, Default, Serialize, ToSchema)]
#[schema(example = json!({
    "labels": ["Asha", "Ravi"],
    "values": [82.5, 40.0],
    "user_ids": [12, 9],
    "statuses": ["Excellent", "Poor"],
    "details": [{
        "active_time": "5.8h", "inactive_time": "1.2h", "work_time": "7.0h",
        "check_in": "09:00 AM", "check_out": "05:00 PM"
    }, {
        "active_time": "2.8h", "inactive_time": "4.2h", "work_time": "7.0h",
        "check_in": "09:10 AM", "check_out": "-"
    }],
    "incoming": [14, 3],
    "outgoing": [22, 5],
    "missed": [1, 4],
    "rejected": [0, 2],
    "total_calls": [37, 14]
}))]
pub struct PerformanceResponse {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub user_ids: Vec<i64>,
    pub statuses: Vec<String>,
    pub details: Vec<SessionDetail>,
    pub incoming: Vec<u32>,
    pub outgoing: Vec<u32>,
    pub missed: Vec<u32>,
    pub rejected: Vec<u32>,
    pub total_calls: Vec<u32>,
}

impl PerformanceResponse {
    /// Sorts by percentage; ties keep roster order.
    pub fn build(mut rows: Vec<(RosterUser, PerformanceResult)>, order: SortOrder) -> Self {
        rows.sort_by(|(_, a), (_, b)| match order {
            SortOrder::Asc => a.percentage.total_cmp(&b.percentage),
            SortOrder::Desc => b.percentage.total_cmp(&a.percentage),
        });

        let mut resp = PerformanceResponse::default();
        for (user, result) in rows {
            resp.labels.push(user.name);
            resp.values.push(result.percentage);
            resp.user_ids.push(user.id);
            resp.statuses.push(result.status.to_string());
            resp.incoming.push(result.calls.incoming);
            resp.outgoing.push(result.calls.outgoing);
            resp.missed.push(result.calls.missed);
            resp.rejected.push(result.calls.rejected);
            resp.total_calls.push(result.calls.total);
            resp.details.push(result.detail);
        }
        resp
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserPerformanceResponse {
    pub user_id: i64,
    pub name: String,
    #[schema(example = "week")]
    pub filter: String,
    #[schema(value_type = String, format = "date-time")]
    pub range_start: NaiveDateTime,
    #[schema(value_type = String, format = "date-time")]
    pub range_end: NaiveDateTime,
    pub performance: PerformanceResult,
}

/// Loads one user's rows for the window and runs the engine.
async fn evaluate_user(
    pool: &MySqlPool,
    user_id: i64,
    (start, end): (NaiveDateTime, NaiveDateTime),
    now: NaiveDateTime,
    config: &AnalyticsConfig,
) -> Result<PerformanceResult, sqlx::Error> {
    let (records, calls) = futures::try_join!(
        attendance::list_by_user_in_range(pool, user_id, start, end),
        call_event::list_by_user_in_range(pool, user_id, start, end),
    )?;

    Ok(analytics::evaluate(&records, &calls, now, config))
}

/// Activity performance of the admin's users
#[utoipa::path(
    get,
    path = "/api/admin/performance",
    params(PerformanceQuery),
    responses(
        (status = 200, description = "Per-user activity scores, ordered by percentage", body = PerformanceResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden", body = Object, example = json!({
            "message": "Admin only"
        })),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "message": "Internal server error",
            "correlation_id": "6f1c1e0e-3f5e-4a53-9d59-2f4b8d0c7a11"
        }))
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Performance"
)]
pub async fn performance(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    query: web::Query<PerformanceQuery>,
) -> Result<HttpResponse, ApiError> {
    auth.require_admin()?;

    let filter = DateFilter::parse_lenient(query.filter.as_deref());
    let selector = parse_user_selector(query.user_id.as_deref());
    let order = SortOrder::parse_lenient(query.sort.as_deref());

    let now = Utc::now().naive_utc();
    let range = filter.range(now);
    let analytics = config.analytics();

    let roster = user::list_roster(pool.get_ref(), auth.admin_id(), selector).await?;
    debug!(admin = %auth.username, %filter, ?selector, users = roster.len(), "Computing performance");

    // users are independent; fan out and join before assembling
    let results = try_join_all(
        roster
            .iter()
            .map(|u| evaluate_user(pool.get_ref(), u.id, range, now, &analytics)),
    )
    .await?;

    info!(admin_id = auth.admin_id(), %filter, users = results.len(), "Performance computed");

    let rows = roster.into_iter().zip(results).collect();
    Ok(HttpResponse::Ok().json(PerformanceResponse::build(rows, order)))
}

/// Activity drill-down for one user
#[utoipa::path(
    get,
    path = "/api/admin/performance/{user_id}",
    params(
        ("user_id", Path, description = "User ID"),
        PerformanceQuery
    ),
    responses(
        (status = 200, description = "Full activity breakdown", body = UserPerformanceResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found", body = Object, example = json!({
            "message": "User not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Performance"
)]
pub async fn user_performance(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    path: web::Path<i64>,
    query: web::Query<PerformanceQuery>,
) -> Result<HttpResponse, ApiError> {
    auth.require_admin()?;

    let user_id = path.into_inner();
    let filter = DateFilter::parse_lenient(query.filter.as_deref());
    let now = Utc::now().naive_utc();
    let (range_start, range_end) = filter.range(now);

    let user = user::list_roster(pool.get_ref(), auth.admin_id(), UserSelector::One(user_id))
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::not_found("User"))?;

    let performance = evaluate_user(
        pool.get_ref(),
        user.id,
        (range_start, range_end),
        now,
        &config.analytics(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(UserPerformanceResponse {
        user_id: user.id,
        name: user.name,
        filter: filter.to_string(),
        range_start,
        range_end,
        performance,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::score::{CallCounts, PerformanceStatus};
    use crate::auth::jwt::test_tokens::token;
    use crate::models::TokenType;
    use crate::routes;
    use actix_web::{App, http::StatusCode, test as atest};
    use sqlx::mysql::MySqlPoolOptions;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 4)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn filter_defaults_to_today() {
        assert_eq!(DateFilter::parse_lenient(None), DateFilter::Today);
        assert_eq!(DateFilter::parse_lenient(Some("yearly")), DateFilter::Today);
        assert_eq!(DateFilter::parse_lenient(Some("WEEK")), DateFilter::Week);
        assert_eq!(DateFilter::parse_lenient(Some("all")), DateFilter::All);
    }

    #[test]
    fn filter_windows() {
        let now = at(15, 20);

        assert_eq!(DateFilter::Today.range(now), (at(0, 0), at(0, 0) + Duration::days(1)));
        assert_eq!(DateFilter::Week.range(now), (now - Duration::days(7), now));
        assert_eq!(DateFilter::Month.range(now), (now - Duration::days(30), now));

        let (start, end) = DateFilter::All.range(now);
        assert_eq!(start.date(), NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
        assert_eq!(end, now);
    }

    #[test]
    fn malformed_user_id_means_all() {
        assert_eq!(parse_user_selector(None), UserSelector::All);
        assert_eq!(parse_user_selector(Some("all")), UserSelector::All);
        assert_eq!(parse_user_selector(Some("12abc")), UserSelector::All);
        assert_eq!(parse_user_selector(Some(" 12 ")), UserSelector::One(12));
    }

    #[test]
    fn sort_defaults_to_descending() {
        assert_eq!(SortOrder::parse_lenient(Some("asc")), SortOrder::Asc);
        assert_eq!(SortOrder::parse_lenient(Some("sideways")), SortOrder::Desc);
        assert_eq!(SortOrder::parse_lenient(None), SortOrder::Desc);
    }

    fn row(id: i64, name: &str, percentage: f64, incoming: u32) -> (RosterUser, PerformanceResult) {
        (
            RosterUser {
                id,
                name: name.to_string(),
            },
            PerformanceResult {
                total_work_seconds: 3600,
                total_active_seconds: 0,
                total_inactive_seconds: 0,
                total_dropped_seconds: 0,
                ratio: percentage / 100.0,
                percentage,
                status: PerformanceStatus::from_ratio(percentage / 100.0, 3600),
                detail: SessionDetail::empty(),
                calls: CallCounts {
                    incoming,
                    total: incoming,
                    ..CallCounts::default()
                },
                days: Vec::new(),
            },
        )
    }

    #[test]
    fn response_columns_follow_sort_order() {
        let rows = vec![row(1, "Asha", 40.0, 3), row(2, "Ravi", 90.0, 7), row(3, "Mina", 60.0, 1)];

        let desc = PerformanceResponse::build(rows.clone(), SortOrder::Desc);
        assert_eq!(desc.labels, vec!["Ravi", "Mina", "Asha"]);
        assert_eq!(desc.user_ids, vec![2, 3, 1]);
        assert_eq!(desc.values, vec![90.0, 60.0, 40.0]);
        assert_eq!(desc.statuses, vec!["Excellent", "Moderate", "Poor"]);
        assert_eq!(desc.incoming, vec![7, 1, 3]);
        assert_eq!(desc.total_calls, vec![7, 1, 3]);
        assert_eq!(desc.details.len(), 3);

        let asc = PerformanceResponse::build(rows, SortOrder::Asc);
        assert_eq!(asc.user_ids, vec![1, 3, 2]);
    }

    #[test]
    fn empty_roster_gives_empty_columns() {
        let resp = PerformanceResponse::build(Vec::new(), SortOrder::Desc);
        let body = serde_json::to_value(&resp).unwrap();
        assert_eq!(body["labels"], serde_json::json!([]));
        assert_eq!(body["details"], serde_json::json!([]));
    }

    const SECRET: &str = "test-secret";

    fn test_config() -> Config {
        Config {
            database_url: "mysql://root@127.0.0.1:9/callwatch".into(),
            jwt_secret: SECRET.into(),
            server_addr: "127.0.0.1:0".into(),
            rate_protected_per_min: 1000,
            api_prefix: "/api".into(),
            lunch_start: NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
            lunch_duration_minutes: 60,
            active_gap_seconds: 600,
            work_deduction_minutes: 60,
        }
    }

    async fn get(uri: &str, bearer: Option<String>) -> actix_web::dev::ServiceResponse {
        let config = test_config();
        let pool = MySqlPoolOptions::new()
            .acquire_timeout(std::time::Duration::from_millis(300))
            .connect_lazy(&config.database_url)
            .unwrap();

        let app = atest::init_service(
            App::new()
                .app_data(web::Data::new(pool))
                .app_data(web::Data::new(config.clone()))
                .configure(|cfg| routes::configure(cfg, config.clone())),
        )
        .await;

        let mut req = atest::TestRequest::get()
            .uri(uri)
            .peer_addr("127.0.0.1:40000".parse().unwrap());
        if let Some(t) = bearer {
            req = req.insert_header(("Authorization", format!("Bearer {t}")));
        }

        atest::call_service(&app, req.to_request()).await
    }

    #[actix_web::test]
    async fn missing_token_is_unauthorized() {
        let resp = get("/api/admin/performance", None).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn refresh_token_is_unauthorized() {
        let resp = get(
            "/api/admin/performance",
            Some(token(1, 2, TokenType::Refresh, SECRET)),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn non_admin_is_forbidden() {
        let resp = get(
            "/api/admin/performance?filter=week",
            Some(token(5, 3, TokenType::Access, SECRET)),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn database_failure_is_opaque_500() {
        let resp = get(
            "/api/admin/performance?filter=bogus&user_id=x&sort=up",
            Some(token(1, 2, TokenType::Access, SECRET)),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = atest::read_body_json(resp).await;
        assert_eq!(body["message"], "Internal server error");
        assert!(body["correlation_id"].as_str().is_some());
    }
}
