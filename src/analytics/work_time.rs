use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;
use utoipa::ToSchema;

use crate::analytics::AnalyticsConfig;
use crate::analytics::gap::classify_session;
use crate::analytics::session::DailySession;

/// Accounted figures for one included session.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DaySummary {
    #[schema(example = "2026-03-02", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "2026-03-02T09:00:00", value_type = String, format = "date-time")]
    pub check_in: NaiveDateTime,
    /// Measured end of the session; "now" while the session is open.
    #[schema(example = "2026-03-02T17:00:00", value_type = String, format = "date-time")]
    pub check_out: NaiveDateTime,
    pub open: bool,
    pub work_seconds: i64,
    pub active_seconds: i64,
    pub inactive_seconds: i64,
    /// Time swallowed by calls made during lunch, in neither bucket.
    pub dropped_seconds: i64,
}

/// Sums over every included session of a period.
#[derive(Debug, Clone, Default)]
pub struct PeriodTotals {
    pub work_seconds: i64,
    pub active_seconds: i64,
    pub inactive_seconds: i64,
    pub dropped_seconds: i64,
    /// Ascending by date.
    pub days: Vec<DaySummary>,
}

/// Session span minus the fixed deduction, never negative.
///
/// The deduction applies whether or not the session touched lunch.
pub fn work_time(check_in: NaiveDateTime, check_out: NaiveDateTime, config: &AnalyticsConfig) -> Duration {
    (check_out - check_in - config.work_deduction).max(Duration::zero())
}

pub fn summarize_day(session: &DailySession, check_out: NaiveDateTime, config: &AnalyticsConfig) -> DaySummary {
    let tally = classify_session(session, check_out, config);

    DaySummary {
        date: session.date,
        check_in: session.check_in,
        check_out,
        open: session.is_open(),
        work_seconds: work_time(session.check_in, check_out, config).num_seconds(),
        active_seconds: tally.active.num_seconds(),
        inactive_seconds: tally.inactive.num_seconds(),
        dropped_seconds: tally.dropped.num_seconds(),
    }
}

/// Accounts every session with a resolvable check-out; open sessions from
/// past days are skipped entirely rather than counted as zero.
pub fn account(
    sessions: &BTreeMap<NaiveDate, DailySession>,
    now: NaiveDateTime,
    config: &AnalyticsConfig,
) -> PeriodTotals {
    let today = now.date();
    let mut totals = PeriodTotals::default();

    for session in sessions.values() {
        let Some(check_out) = session.effective_checkout(today, now) else {
            tracing::debug!(date = %session.date, "skipping open session without check-out");
            continue;
        };

        let day = summarize_day(session, check_out, config);
        totals.work_seconds += day.work_seconds;
        totals.active_seconds += day.active_seconds;
        totals.inactive_seconds += day.inactive_seconds;
        totals.dropped_seconds += day.dropped_seconds;
        totals.days.push(day);
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::session::resolve_sessions;
    use crate::model::attendance::AttendanceRecord;

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn record(check_in: NaiveDateTime, check_out: Option<NaiveDateTime>) -> AttendanceRecord {
        AttendanceRecord {
            id: format!("{check_in}"),
            user_id: 1,
            check_in,
            check_out,
            status: None,
        }
    }

    #[test]
    fn hour_long_session_has_no_work_time() {
        let config = AnalyticsConfig::default();
        assert_eq!(work_time(at(2, 9, 0), at(2, 10, 0), &config), Duration::zero());
        assert_eq!(work_time(at(2, 9, 0), at(2, 9, 40), &config), Duration::zero());
        assert_eq!(work_time(at(2, 9, 0), at(2, 10, 30), &config), Duration::minutes(30));
    }

    #[test]
    fn deduction_applies_even_without_lunch_overlap() {
        let config = AnalyticsConfig::default();
        assert_eq!(work_time(at(2, 6, 0), at(2, 11, 0), &config), Duration::hours(4));
    }

    #[test]
    fn sums_days_and_skips_stale_open_sessions() {
        let sessions = resolve_sessions(&[
            record(at(2, 9, 0), Some(at(2, 17, 0))),
            record(at(3, 9, 0), None),
            record(at(4, 9, 0), Some(at(4, 12, 0))),
        ]);

        let totals = account(&sessions, at(6, 10, 0), &AnalyticsConfig::default());

        assert_eq!(totals.days.len(), 2);
        assert_eq!(totals.work_seconds, 7 * 3600 + 2 * 3600);
        assert_eq!(totals.inactive_seconds, 7 * 3600 + 3 * 3600);
        assert_eq!(totals.active_seconds, 0);
    }

    #[test]
    fn open_session_today_grows_with_now() {
        let sessions = resolve_sessions(&[record(at(2, 9, 0), None)]);
        let config = AnalyticsConfig::default();

        let early = account(&sessions, at(2, 11, 0), &config);
        let late = account(&sessions, at(2, 12, 0), &config);

        assert_eq!(early.work_seconds, 3600);
        assert_eq!(late.work_seconds, 2 * 3600);
        assert!(late.inactive_seconds > early.inactive_seconds);
        assert!(late.days[0].open);
    }
}
