use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::analytics::session::DailySession;
use crate::model::call_event::CallEvent;

/// Appends each call to the session of its calendar date.
///
/// Calls on a date without a session are discarded here; they still show up
/// in the per-type call counts, which are tallied over the raw range.
/// Returns how many calls were attached.
pub fn attach_calls(sessions: &mut BTreeMap<NaiveDate, DailySession>, calls: &[CallEvent]) -> usize {
    let mut attached = 0;

    for call in calls {
        if let Some(session) = sessions.get_mut(&call.timestamp.date()) {
            session.calls.push(call.clone());
            attached += 1;
        }
    }

    // the store returns calls ascending, but corrections can arrive out of order
    for session in sessions.values_mut() {
        session.calls.sort_by_key(|c| c.timestamp);
    }

    attached
}
