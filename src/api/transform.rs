//! Conversions between the backend's block-list wire format and the
//! client-side weekly grid.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::warn;

use crate::models::{
    BlockType, DayOfWeek, SlotType, TaskInfo, TimeBlock, WeeklySchedule,
};

use super::dto::TimeBlockDto;

/// Parses a block timestamp keeping the written clock-face fields. The
/// backend stores UTC-aligned times, so the raw date/hour digits are the
/// source of truth and no offset conversion is applied.
pub fn parse_block_time(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").ok()
}

/// Decodes wire blocks into domain blocks. Records with unparseable
/// timestamps are skipped with a warning rather than failing the response.
pub fn from_wire_blocks(blocks: &[TimeBlockDto]) -> Vec<TimeBlock> {
    let mut decoded = Vec::with_capacity(blocks.len());

    for dto in blocks {
        let (Some(start_time), Some(end_time)) = (
            parse_block_time(&dto.start_time),
            parse_block_time(&dto.end_time),
        ) else {
            warn!(
                "Skipping block with malformed timestamps: {} / {}",
                dto.start_time, dto.end_time
            );
            continue;
        };

        decoded.push(TimeBlock {
            user_id: dto.user_id.clone(),
            start_time,
            end_time,
            block_type: dto.block_type,
            task_info: dto.task_info.as_ref().map(|info| TaskInfo {
                title: info.title.clone(),
            }),
        });
    }

    decoded
}

/// Encodes a weekly grid as the block list POST /schedules expects, keyed
/// to the week's Monday. Consecutive hours of the same type collapse into
/// one block; a run ending at hour 24 becomes a block ending 00:00 of the
/// next calendar day.
pub fn to_wire_schedule(schedule: &WeeklySchedule, week_start: NaiveDate) -> Vec<TimeBlockDto> {
    let mut blocks = Vec::new();

    for day in DayOfWeek::ALL {
        let date = week_start + Duration::days(day.index() as i64);
        let day_schedule = schedule.day(day);

        let mut run: Option<(SlotType, usize)> = None;
        for hour in 0..=24 {
            let slot = if hour < 24 { day_schedule.slot(hour) } else { None };
            match (run, slot) {
                (None, Some(state)) => run = Some((state, hour)),
                (Some((state, start)), current) if current != Some(state) => {
                    blocks.push(block_dto(state, date, start, hour));
                    run = current.map(|s| (s, hour));
                }
                _ => {}
            }
        }
    }

    blocks
}

fn block_dto(state: SlotType, date: NaiveDate, start_hour: usize, end_hour: usize) -> TimeBlockDto {
    let block_type = match state {
        SlotType::Quiet => BlockType::Quiet,
        SlotType::Out => BlockType::Out,
    };

    let start = date.and_time(hour_time(start_hour));
    let end = if end_hour >= 24 {
        (date + Duration::days(1)).and_time(NaiveTime::MIN)
    } else {
        date.and_time(hour_time(end_hour))
    };

    TimeBlockDto {
        user_id: String::new(),
        start_time: format_block_time(start),
        end_time: format_block_time(end),
        block_type,
        task_info: None,
    }
}

fn hour_time(hour: usize) -> NaiveTime {
    NaiveTime::from_hms_opt(hour as u32, 0, 0).unwrap_or(NaiveTime::MIN)
}

fn format_block_time(time: NaiveDateTime) -> String {
    time.format("%Y-%m-%dT%H:%M:%S").to_string()
}
