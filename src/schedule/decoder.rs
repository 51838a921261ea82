//! Expands backend interval records into day-indexed, hour-indexed slot
//! grids.

use std::collections::HashMap;

use chrono::Timelike;

use crate::models::{BlockType, DayOfWeek, SlotType, TimeBlock, WeeklySchedule};

/// Task blocks per (day, hour). Kept separate from the slot grid so that
/// simultaneous task blocks stay individually inspectable.
#[derive(Debug, Clone, Default)]
pub struct TaskHours {
    by_slot: HashMap<(DayOfWeek, usize), Vec<TimeBlock>>,
}

impl TaskHours {
    pub fn insert(&mut self, day: DayOfWeek, hour: usize, block: &TimeBlock) {
        self.by_slot
            .entry((day, hour))
            .or_default()
            .push(block.clone());
    }

    pub fn blocks_at(&self, day: DayOfWeek, hour: usize) -> &[TimeBlock] {
        self.by_slot
            .get(&(day, hour))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_task(&self, day: DayOfWeek, hour: usize) -> bool {
        !self.blocks_at(day, hour).is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.by_slot.is_empty()
    }
}

/// One user's decoded week: the quiet/out slot grid plus the task multimap.
#[derive(Debug, Clone, Default)]
pub struct DecodedSchedule {
    pub grid: WeeklySchedule,
    pub tasks: TaskHours,
}

/// Hour span of a block within its day. An end hour of 0 means the block
/// runs to midnight and is normalized to 24.
fn block_hours(block: &TimeBlock) -> (usize, usize) {
    let start = block.start_time.time().hour() as usize;
    let mut end = block.end_time.time().hour() as usize;
    if end == 0 {
        end = 24;
    }
    (start, end)
}

/// Decodes one user's (or one day's) blocks into a grid. Every hour in
/// `[start, end)` is stamped with the block's type; overlapping blocks of
/// different types resolve last-write-wins in input order. Task blocks go
/// into the multimap only, never into the grid.
pub fn decode_blocks(blocks: &[TimeBlock]) -> DecodedSchedule {
    let mut decoded = DecodedSchedule::default();

    for block in blocks {
        let day = DayOfWeek::from_date(block.start_time.date());
        let (start, end) = block_hours(block);

        for hour in start..end.min(24) {
            match block.block_type {
                BlockType::Quiet => decoded.grid.set(day, hour, Some(SlotType::Quiet)),
                BlockType::Out => decoded.grid.set(day, hour, Some(SlotType::Out)),
                BlockType::Task => decoded.tasks.insert(day, hour, block),
            }
        }
    }

    decoded
}

/// Groups a mixed-member block list by user and decodes each group.
pub fn decode_by_user(blocks: &[TimeBlock]) -> HashMap<String, DecodedSchedule> {
    let mut by_user: HashMap<String, Vec<TimeBlock>> = HashMap::new();
    for block in blocks {
        by_user
            .entry(block.user_id.clone())
            .or_default()
            .push(block.clone());
    }

    by_user
        .into_iter()
        .map(|(user_id, user_blocks)| (user_id, decode_blocks(&user_blocks)))
        .collect()
}
