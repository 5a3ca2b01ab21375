//! Attendance/answer-rate heuristic shown on the user profile.
//!
//! Unrelated to the gap-based activity ratio; reported under its own name.

use serde::Serialize;
use utoipa::ToSchema;

const PUNCTUALITY_WEIGHT: f64 = 0.6;
const ANSWER_RATE_WEIGHT: f64 = 0.4;

/// Raw counts the heuristic is derived from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngagementInputs {
    pub check_ins: i64,
    pub on_time_check_ins: i64,
    pub calls: i64,
    pub answered_calls: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EngagementScore {
    /// Share of check-ins marked on-time, 0-100.
    pub punctuality: f64,
    /// Share of calls with a non-zero duration, 0-100.
    pub answer_rate: f64,
    /// Weighted blend, 0-100.
    pub engagement_score: f64,
}

fn share(part: i64, whole: i64) -> f64 {
    if whole <= 0 {
        return 0.0;
    }
    (part as f64 / whole as f64 * 100.0).clamp(0.0, 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl EngagementScore {
    pub fn from_inputs(inputs: EngagementInputs) -> Self {
        let punctuality = share(inputs.on_time_check_ins, inputs.check_ins);
        let answer_rate = share(inputs.answered_calls, inputs.calls);

        Self {
            punctuality: round2(punctuality),
            answer_rate: round2(answer_rate),
            engagement_score: round2(punctuality * PUNCTUALITY_WEIGHT + answer_rate * ANSWER_RATE_WEIGHT),
        }
    }
}
