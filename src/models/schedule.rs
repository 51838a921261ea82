use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

/// Day of week as the backend tags it ("mon".."sun"), Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Mon,
        DayOfWeek::Tue,
        DayOfWeek::Wed,
        DayOfWeek::Thu,
        DayOfWeek::Fri,
        DayOfWeek::Sat,
        DayOfWeek::Sun,
    ];

    /// 0 = Monday .. 6 = Sunday.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayOfWeek::Mon,
            Weekday::Tue => DayOfWeek::Tue,
            Weekday::Wed => DayOfWeek::Wed,
            Weekday::Thu => DayOfWeek::Thu,
            Weekday::Fri => DayOfWeek::Fri,
            Weekday::Sat => DayOfWeek::Sat,
            Weekday::Sun => DayOfWeek::Sun,
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self::from_weekday(date.weekday())
    }
}

/// Monday of the week the given date falls in. Weeks are identified by this
/// date throughout the API ("weekStart", YYYY-MM-DD).
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - chrono::Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// State a user declared for one hour slot. A free hour is `None` in the
/// grid, never a missing entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotType {
    Quiet,
    Out,
}

/// Wire tag of a schedule block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Quiet,
    Out,
    Task,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInfo {
    pub title: String,
}

/// One contiguous interval of a user's declared or assigned state, with the
/// timestamp's written clock-face fields already extracted (no timezone
/// conversion happens downstream).
#[derive(Debug, Clone, PartialEq)]
pub struct TimeBlock {
    pub user_id: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub block_type: BlockType,
    pub task_info: Option<TaskInfo>,
}

/// 24 hour slots of one day. All slots exist; default is free.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DaySchedule {
    slots: [Option<SlotType>; 24],
}

impl DaySchedule {
    pub fn slot(&self, hour: usize) -> Option<SlotType> {
        self.slots.get(hour).copied().flatten()
    }

    pub fn set(&mut self, hour: usize, slot: Option<SlotType>) {
        if hour < 24 {
            self.slots[hour] = slot;
        }
    }

    pub fn is_free(&self, hour: usize) -> bool {
        self.slot(hour).is_none()
    }

    pub fn hours(&self) -> impl Iterator<Item = (usize, Option<SlotType>)> + '_ {
        self.slots.iter().copied().enumerate()
    }
}

/// 7x24 slot grid. Every one of the 168 slots is present; absence is not
/// representable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklySchedule {
    days: [DaySchedule; 7],
}

impl WeeklySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn day(&self, day: DayOfWeek) -> &DaySchedule {
        &self.days[day.index()]
    }

    pub fn day_mut(&mut self, day: DayOfWeek) -> &mut DaySchedule {
        &mut self.days[day.index()]
    }

    pub fn set(&mut self, day: DayOfWeek, hour: usize, slot: Option<SlotType>) {
        self.days[day.index()].set(hour, slot);
    }

    pub fn slot(&self, day: DayOfWeek, hour: usize) -> Option<SlotType> {
        self.days[day.index()].slot(hour)
    }

    pub fn is_empty(&self) -> bool {
        self.days
            .iter()
            .all(|d| d.hours().all(|(_, slot)| slot.is_none()))
    }
}
