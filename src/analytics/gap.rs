use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::analytics::AnalyticsConfig;
use crate::analytics::session::DailySession;

/// The unmonitored meal break of one session date.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LunchWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl LunchWindow {
    /// Anchored to the session's own date, not to when lunch was taken.
    pub fn on(date: NaiveDate, config: &AnalyticsConfig) -> Self {
        let start = date.and_time(config.lunch_start);
        Self {
            start,
            end: start + config.lunch_duration,
        }
    }

    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        ts >= self.start && ts < self.end
    }

    /// Portion of `[from, to]` that falls inside the window.
    pub fn overlap(&self, from: NaiveDateTime, to: NaiveDateTime) -> Duration {
        let overlap = to.min(self.end) - from.max(self.start);
        overlap.max(Duration::zero())
    }
}

/// What happened to the elapsed time leading up to one reference point.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GapOutcome {
    Active(Duration),
    Inactive(Duration),
    /// A call landed inside the lunch window. The gap before it is counted
    /// as neither active nor inactive and the cursor jumps to the call.
    DroppedDuringLunchEntry(Duration),
    /// Call timestamp outside the session bounds; cursor untouched.
    OutOfSession,
}

#[derive(Debug, Clone)]
pub struct GapTally {
    pub active: Duration,
    pub inactive: Duration,
    pub dropped: Duration,
    pub outcomes: Vec<GapOutcome>,
}

impl Default for GapTally {
    fn default() -> Self {
        Self {
            active: Duration::zero(),
            inactive: Duration::zero(),
            dropped: Duration::zero(),
            outcomes: Vec::new(),
        }
    }
}

impl GapTally {
    fn record(&mut self, outcome: GapOutcome) {
        match outcome {
            GapOutcome::Active(d) => self.active = self.active + d,
            GapOutcome::Inactive(d) => self.inactive = self.inactive + d,
            GapOutcome::DroppedDuringLunchEntry(d) => self.dropped = self.dropped + d,
            GapOutcome::OutOfSession => {}
        }
        self.outcomes.push(outcome);
    }
}

/// Lunch overlap is subtracted before the threshold is applied.
pub fn classify_gap(
    from: NaiveDateTime,
    to: NaiveDateTime,
    lunch: &LunchWindow,
    config: &AnalyticsConfig,
) -> GapOutcome {
    let raw = to - from;
    let effective = (raw - lunch.overlap(from, to)).max(Duration::zero());

    if effective <= config.active_gap_threshold {
        GapOutcome::Active(effective)
    } else {
        GapOutcome::Inactive(effective)
    }
}

/// Walks a session's calls between check-in and `check_out`, then closes
/// with the tail gap from the last reference point to `check_out`.
pub fn classify_session(
    session: &DailySession,
    check_out: NaiveDateTime,
    config: &AnalyticsConfig,
) -> GapTally {
    let lunch = LunchWindow::on(session.date, config);
    let mut tally = GapTally::default();
    let mut cursor = session.check_in;

    for call in &session.calls {
        let ts = call.timestamp;

        if ts < session.check_in || ts > check_out {
            tally.record(GapOutcome::OutOfSession);
            continue;
        }

        if lunch.contains(ts) {
            tally.record(GapOutcome::DroppedDuringLunchEntry((ts - cursor).max(Duration::zero())));
            cursor = ts;
            continue;
        }

        tally.record(classify_gap(cursor, ts, &lunch, config));
        cursor = ts;
    }

    tally.record(classify_gap(cursor, check_out, &lunch, config));
    tally
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::session::Checkout;
    use crate::model::call_event::CallEvent;
    use chrono::NaiveTime;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn session(check_in: NaiveDateTime, check_out: NaiveDateTime, calls: &[NaiveDateTime]) -> DailySession {
        DailySession {
            date: check_in.date(),
            check_in,
            check_out: Checkout::Resolved(check_out),
            calls: calls
                .iter()
                .enumerate()
                .map(|(i, ts)| CallEvent {
                    id: i as i64,
                    user_id: 1,
                    timestamp: *ts,
                    call_type: Some("incoming".into()),
                    duration: Some(60),
                })
                .collect(),
        }
    }

    #[test]
    fn lunch_window_defaults_to_one_o_clock_hour() {
        let lunch = LunchWindow::on(at(0, 0).date(), &AnalyticsConfig::default());
        assert_eq!(lunch.start, at(13, 0));
        assert_eq!(lunch.end, at(14, 0));
        assert!(lunch.contains(at(13, 59)));
        assert!(!lunch.contains(at(14, 0)));
    }

    #[test]
    fn overlap_is_clipped_to_window() {
        let lunch = LunchWindow::on(at(0, 0).date(), &AnalyticsConfig::default());
        assert_eq!(lunch.overlap(at(9, 0), at(17, 0)), Duration::hours(1));
        assert_eq!(lunch.overlap(at(13, 30), at(15, 0)), Duration::minutes(30));
        assert_eq!(lunch.overlap(at(9, 0), at(12, 0)), Duration::zero());
    }

    #[test]
    fn idle_day_is_one_inactive_tail_minus_lunch() {
        let s = session(at(9, 0), at(17, 0), &[]);
        let tally = classify_session(&s, at(17, 0), &AnalyticsConfig::default());

        assert_eq!(tally.active, Duration::zero());
        assert_eq!(tally.inactive, Duration::seconds(25_200));
        assert_eq!(tally.outcomes.len(), 1);
    }

    #[test]
    fn gap_of_exactly_ten_minutes_is_active() {
        let s = session(at(9, 0), at(9, 20), &[at(9, 10)]);
        let tally = classify_session(&s, at(9, 20), &AnalyticsConfig::default());

        assert_eq!(tally.active, Duration::minutes(20));
        assert_eq!(tally.inactive, Duration::zero());
    }

    #[test]
    fn gap_spanning_lunch_loses_the_lunch_hour() {
        // 12:55 -> 14:05 is 70 minutes, 60 of them lunch: 10 minutes effective
        let s = session(at(12, 50), at(14, 10), &[at(12, 55), at(14, 5)]);
        let tally = classify_session(&s, at(14, 10), &AnalyticsConfig::default());

        assert_eq!(tally.inactive, Duration::zero());
        assert_eq!(tally.active, Duration::minutes(5 + 10 + 5));
    }

    #[test]
    fn call_during_lunch_drops_the_preceding_gap() {
        let s = session(at(12, 0), at(14, 30), &[at(12, 5), at(13, 20), at(14, 25)]);
        let tally = classify_session(&s, at(14, 30), &AnalyticsConfig::default());

        assert_eq!(
            tally.outcomes[1],
            GapOutcome::DroppedDuringLunchEntry(Duration::minutes(75))
        );
        // 13:20 -> 14:25 minus 40 lunch minutes = 25 minutes, inactive
        assert_eq!(tally.inactive, Duration::minutes(25));
        assert_eq!(tally.active, Duration::minutes(5 + 5));

        let wall_clock = at(14, 30) - at(12, 0);
        assert_eq!(
            tally.active + tally.inactive + tally.dropped,
            wall_clock - Duration::minutes(40)
        );
    }

    #[test]
    fn calls_outside_session_do_not_move_the_cursor() {
        let s = session(at(9, 0), at(9, 30), &[at(8, 50), at(9, 5), at(9, 45)]);
        let tally = classify_session(&s, at(9, 30), &AnalyticsConfig::default());

        assert_eq!(tally.outcomes[0], GapOutcome::OutOfSession);
        assert_eq!(tally.outcomes[2], GapOutcome::OutOfSession);
        assert_eq!(tally.active, Duration::minutes(5));
        assert_eq!(tally.inactive, Duration::minutes(25));
    }

    #[test]
    fn lunch_window_follows_configuration() {
        let config = AnalyticsConfig {
            lunch_start: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            lunch_duration: Duration::minutes(30),
            ..AnalyticsConfig::default()
        };
        let s = session(at(11, 0), at(13, 0), &[at(12, 10)]);
        let tally = classify_session(&s, at(13, 0), &config);

        assert_eq!(tally.outcomes[0], GapOutcome::DroppedDuringLunchEntry(Duration::minutes(70)));
        // 12:10 -> 13:00 minus 20 minutes of lunch
        assert_eq!(tally.inactive, Duration::minutes(30));
    }
}
