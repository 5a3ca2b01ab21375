use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};

use crate::model::{attendance::AttendanceRecord, call_event::CallEvent};

/// How a day's session ended, as far as the stored rows tell.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Checkout {
    Resolved(NaiveDateTime),
    /// No row of that day carries a check-out yet.
    StillOpen,
}

/// One user's collapsed attendance for a calendar day.
#[derive(Debug, Clone)]
pub struct DailySession {
    pub date: NaiveDate,
    pub check_in: NaiveDateTime,
    pub check_out: Checkout,
    /// Calls on `date`, ascending by timestamp. Filled by the bucketer.
    pub calls: Vec<CallEvent>,
}

impl DailySession {
    /// The instant the session is measured up to.
    ///
    /// An open session only counts on `today`, where `now` stands in for the
    /// check-out. Open sessions on any other day yield `None` and are left
    /// out of every aggregate.
    pub fn effective_checkout(&self, today: NaiveDate, now: NaiveDateTime) -> Option<NaiveDateTime> {
        match self.check_out {
            Checkout::Resolved(ts) => Some(ts),
            Checkout::StillOpen if self.date == today => Some(now),
            Checkout::StillOpen => None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.check_out == Checkout::StillOpen
    }
}

/// Collapses attendance rows into one session per check-in date.
///
/// Earliest check-in wins; the latest non-null check-out wins.
pub fn resolve_sessions(records: &[AttendanceRecord]) -> BTreeMap<NaiveDate, DailySession> {
    let mut sessions: BTreeMap<NaiveDate, DailySession> = BTreeMap::new();

    for record in records {
        let date = record.check_in.date();
        let session = sessions.entry(date).or_insert_with(|| DailySession {
            date,
            check_in: record.check_in,
            check_out: Checkout::StillOpen,
            calls: Vec::new(),
        });

        if record.check_in < session.check_in {
            session.check_in = record.check_in;
        }

        if let Some(out) = record.check_out {
            session.check_out = match session.check_out {
                Checkout::Resolved(current) if current >= out => Checkout::Resolved(current),
                _ => Checkout::Resolved(out),
            };
        }
    }

    sessions
}
