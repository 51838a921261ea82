use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::schedule::{DayOfWeek, monday_of};

/// Hour range within a day. `end` uses the 24 end-hour convention: a range
/// running to midnight is `end == 24`, never `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: u32,
    pub end: u32,
}

/// One chore recurring on specific days within one specific week. The week
/// is identified by its Monday date, a natural key, not an opaque row id.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub id: String,
    pub user_id: String,
    pub room_id: String,
    pub task_id: String,
    pub days: Vec<DayOfWeek>,
    pub time_range: Option<TimeRange>,
    pub week_start: NaiveDate,
    pub created_at: Option<String>,
}

impl Assignment {
    /// Whether this assignment falls on the given calendar date.
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        self.week_start == monday_of(date) && self.days.contains(&DayOfWeek::from_date(date))
    }
}
