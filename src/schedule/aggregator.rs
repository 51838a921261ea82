//! Merges multiple users' decoded schedules into per-hour membership lists
//! for one calendar day.

use std::collections::HashMap;

use crate::models::{DayOfWeek, SlotType, User};

use super::decoder::DecodedSchedule;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourOverlap {
    /// Users in quiet state this hour.
    pub quiet: Vec<String>,
    /// Users with an active task this hour.
    pub task: Vec<String>,
}

/// Dominant category of an hour, used for color selection only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dominant {
    Task,
    Quiet,
    Free,
}

impl HourOverlap {
    pub fn dominant(&self) -> Dominant {
        if !self.task.is_empty() {
            Dominant::Task
        } else if !self.quiet.is_empty() {
            Dominant::Quiet
        } else {
            Dominant::Free
        }
    }
}

#[derive(Debug, Clone)]
pub struct DayOverlap {
    hours: [HourOverlap; 24],
}

impl DayOverlap {
    fn new() -> Self {
        Self {
            hours: std::array::from_fn(|_| HourOverlap::default()),
        }
    }

    pub fn hour(&self, hour: usize) -> &HourOverlap {
        &self.hours[hour.min(23)]
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &HourOverlap)> {
        self.hours.iter().enumerate()
    }
}

/// For each hour of `day`, collects which of `users` are quiet and which
/// have a task. A task dominates: a user with a task that hour never lands
/// in the quiet list. Users without a schedule contribute nothing. Out
/// hours are not part of the combined view and count as free.
pub fn overlaps_for_day(
    users: &[User],
    schedules: &HashMap<String, DecodedSchedule>,
    day: DayOfWeek,
) -> DayOverlap {
    let mut overlap = DayOverlap::new();

    for hour in 0..24 {
        for user in users {
            let Some(decoded) = schedules.get(&user.id) else {
                continue;
            };

            if decoded.tasks.has_task(day, hour) {
                overlap.hours[hour].task.push(user.id.clone());
                continue;
            }

            if decoded.grid.slot(day, hour) == Some(SlotType::Quiet) {
                overlap.hours[hour].quiet.push(user.id.clone());
            }
        }
    }

    overlap
}

/// Color intensity tier for a membership count, capped at 4.
pub fn intensity_tier(count: usize) -> u8 {
    count.min(4) as u8
}
