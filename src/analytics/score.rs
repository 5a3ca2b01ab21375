use chrono::NaiveDateTime;
use serde::Serialize;
use strum_macros::Display;
use utoipa::ToSchema;

use crate::analytics::work_time::DaySummary;
use crate::model::call_event::{CallEvent, CallType};

const EXCELLENT_RATIO: f64 = 0.75;
const MODERATE_RATIO: f64 = 0.50;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Display, ToSchema)]
pub enum PerformanceStatus {
    Excellent,
    Moderate,
    Poor,
    Inactive,
}

impl PerformanceStatus {
    /// Tiers are checked top-down; `Inactive` only when there was no work time at all.
    pub fn from_ratio(ratio: f64, work_seconds: i64) -> Self {
        if ratio >= EXCELLENT_RATIO {
            PerformanceStatus::Excellent
        } else if ratio >= MODERATE_RATIO {
            PerformanceStatus::Moderate
        } else if work_seconds == 0 {
            PerformanceStatus::Inactive
        } else {
            PerformanceStatus::Poor
        }
    }
}

/// Active share of work time, clamped to `[0, 1]`.
pub fn activity_ratio(active_seconds: i64, work_seconds: i64) -> f64 {
    if work_seconds <= 0 {
        return 0.0;
    }
    (active_seconds as f64 / work_seconds as f64).clamp(0.0, 1.0)
}

/// Ratio as a percentage with one decimal, ties to even.
pub fn percentage(ratio: f64) -> f64 {
    (ratio * 1000.0).round_ties_even() / 10.0
}

/// Per-type call totals over a whole range, attendance or not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct CallCounts {
    pub incoming: u32,
    pub outgoing: u32,
    pub missed: u32,
    pub rejected: u32,
    /// Includes calls of unknown type.
    pub total: u32,
    pub total_duration_seconds: i64,
}

impl CallCounts {
    pub fn tally(calls: &[CallEvent]) -> Self {
        let mut counts = CallCounts::default();

        for call in calls {
            match call.kind() {
                Some(CallType::Incoming) => counts.incoming += 1,
                Some(CallType::Outgoing) => counts.outgoing += 1,
                Some(CallType::Missed) => counts.missed += 1,
                Some(CallType::Rejected) => counts.rejected += 1,
                None => {}
            }
            counts.total += 1;
            counts.total_duration_seconds += call.duration.unwrap_or(0).max(0);
        }

        counts
    }
}

/// Drill-down snapshot of a single session, formatted for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SessionDetail {
    #[schema(example = "5.2h")]
    pub active_time: String,
    #[schema(example = "1.8h")]
    pub inactive_time: String,
    #[schema(example = "7.0h")]
    pub work_time: String,
    #[schema(example = "09:00 AM")]
    pub check_in: String,
    /// "-" while the session is still open.
    #[schema(example = "05:00 PM")]
    pub check_out: String,
}

impl SessionDetail {
    pub fn from_day(day: &DaySummary) -> Self {
        Self {
            active_time: format_hours(day.active_seconds),
            inactive_time: format_hours(day.inactive_seconds),
            work_time: format_hours(day.work_seconds),
            check_in: format_clock(day.check_in),
            check_out: if day.open {
                "-".to_string()
            } else {
                format_clock(day.check_out)
            },
        }
    }

    /// Most recent accounted day, or a zeroed placeholder.
    pub fn latest(days: &[DaySummary]) -> Self {
        days.iter()
            .max_by_key(|d| d.date)
            .map(Self::from_day)
            .unwrap_or_else(Self::empty)
    }

    pub fn empty() -> Self {
        Self {
            active_time: format_hours(0),
            inactive_time: format_hours(0),
            work_time: format_hours(0),
            check_in: "-".to_string(),
            check_out: "-".to_string(),
        }
    }
}

pub fn format_clock(ts: NaiveDateTime) -> String {
    ts.format("%I:%M %p").to_string()
}

pub fn format_hours(seconds: i64) -> String {
    format!("{:.1}h", seconds as f64 / 3600.0)
}
