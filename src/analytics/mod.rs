//! Activity & performance analytics.
//!
//! Turns a user's attendance rows and call events for a period into an
//! activity timeline, classifies the elapsed time and scores it. Everything
//! here is pure: callers load the rows and pass an explicit `now`.
//!
//! ```text
//! attendance ──> session::resolve_sessions ──┐
//!                                            ├─> bucket::attach_calls ──> work_time::account ──> score
//! calls ─────────────────────────────────────┘        (gap::classify_session per day)
//! ```

pub mod bucket;
pub mod engagement;
pub mod gap;
pub mod score;
pub mod session;
pub mod work_time;

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::{attendance::AttendanceRecord, call_event::CallEvent};
use score::{CallCounts, PerformanceStatus, SessionDetail};
use work_time::DaySummary;

/// Tunables of the gap classifier and work-time accountant.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsConfig {
    pub lunch_start: NaiveTime,
    pub lunch_duration: Duration,
    /// Gaps up to and including this long count as active.
    pub active_gap_threshold: Duration,
    /// Subtracted from every session span.
    pub work_deduction: Duration,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            lunch_start: NaiveTime::from_hms_opt(13, 0, 0).unwrap_or(NaiveTime::MIN),
            lunch_duration: Duration::hours(1),
            active_gap_threshold: Duration::seconds(600),
            work_deduction: Duration::hours(1),
        }
    }
}

/// Scored activity of one user over one period. Never persisted.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PerformanceResult {
    pub total_work_seconds: i64,
    pub total_active_seconds: i64,
    pub total_inactive_seconds: i64,
    pub total_dropped_seconds: i64,
    #[schema(example = 0.82)]
    pub ratio: f64,
    #[schema(example = 82.0)]
    pub percentage: f64,
    pub status: PerformanceStatus,
    pub detail: SessionDetail,
    pub calls: CallCounts,
    pub days: Vec<DaySummary>,
}

/// Runs the full pipeline for one user.
///
/// `calls` should cover the same range as `records`; calls on days without
/// attendance only reach the per-type counts.
pub fn evaluate(
    records: &[AttendanceRecord],
    calls: &[CallEvent],
    now: NaiveDateTime,
    config: &AnalyticsConfig,
) -> PerformanceResult {
    let mut sessions = session::resolve_sessions(records);
    let attached = bucket::attach_calls(&mut sessions, calls);
    let totals = work_time::account(&sessions, now, config);

    let ratio = score::activity_ratio(totals.active_seconds, totals.work_seconds);
    let status = PerformanceStatus::from_ratio(ratio, totals.work_seconds);

    tracing::debug!(
        sessions = sessions.len(),
        included = totals.days.len(),
        calls = calls.len(),
        attached,
        ratio,
        %status,
        "evaluated activity"
    );

    PerformanceResult {
        total_work_seconds: totals.work_seconds,
        total_active_seconds: totals.active_seconds,
        total_inactive_seconds: totals.inactive_seconds,
        total_dropped_seconds: totals.dropped_seconds,
        ratio,
        percentage: score::percentage(ratio),
        status,
        detail: SessionDetail::latest(&totals.days),
        calls: CallCounts::tally(calls),
        days: totals.days,
    }
}
