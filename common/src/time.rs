// A simple module to define the time types used in the project
//
// KYC status is evaluated at day granularity in UTC: stored dates carry no
// time of day, so the evaluation instant is reduced to the current UTC date.

use chrono::{NaiveDate, Utc};

// Calendar date used for every status evaluation
pub type EvaluationDate = NaiveDate;

// Return the current calendar date in UTC
#[inline]
pub fn get_current_date() -> EvaluationDate {
    Utc::now().date_naive()
}

/// Source of the evaluation date used by queries
///
/// Injected into the dispatcher so tests and replays can pin "today".
pub trait Clock: Send + Sync {
    fn today(&self) -> EvaluationDate;
}

/// Clock backed by the system time (UTC)
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> EvaluationDate {
        get_current_date()
    }
}

/// Clock that always returns the same date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(EvaluationDate);

impl FixedClock {
    pub fn new(date: EvaluationDate) -> Self {
        Self(date)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> EvaluationDate {
        self.0
    }
}
