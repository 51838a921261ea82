//! Best-effort join of display names in assignment records back to stable
//! user identities. The backend does not expose a foreign key here, so this
//! is a heuristic: misses drop the record, they never error.

use chrono::Timelike;
use tracing::warn;

use crate::api::dto::MemberTaskRecordDto;
use crate::api::transform::parse_block_time;
use crate::models::{Assignment, DayOfWeek, TimeRange, User, monday_of};

pub struct NameResolver {
    /// (real_name, id) for room members plus the current user.
    names: Vec<(String, String)>,
    current_id: String,
    current_name: String,
}

impl NameResolver {
    pub fn new(members: &[User], current: &User) -> Self {
        let mut names: Vec<(String, String)> = members
            .iter()
            .filter(|m| !m.real_name.is_empty())
            .map(|m| (m.real_name.clone(), m.id.clone()))
            .collect();

        if !current.real_name.is_empty() && !names.iter().any(|(_, id)| *id == current.id) {
            names.push((current.real_name.clone(), current.id.clone()));
        }

        Self {
            names,
            current_id: current.id.clone(),
            current_name: current.real_name.clone(),
        }
    }

    /// Exact match, then substring containment in either direction, then
    /// the current user as a last resort. Empty names never match.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        if name.is_empty() {
            return None;
        }

        if let Some((_, id)) = self.names.iter().find(|(n, _)| n.as_str() == name) {
            return Some(id.as_str());
        }

        if let Some((_, id)) = self
            .names
            .iter()
            .find(|(n, _)| n.contains(name) || name.contains(n.as_str()))
        {
            return Some(id.as_str());
        }

        if !self.current_name.is_empty()
            && (name.contains(self.current_name.as_str()) || self.current_name.contains(name))
        {
            return Some(self.current_id.as_str());
        }

        None
    }
}

/// Joins raw weekly-assignment records to identities and real time ranges.
/// Records whose name resolves to nobody, or whose timestamps do not parse,
/// are dropped silently.
pub fn resolve_assignments(
    records: &[MemberTaskRecordDto],
    resolver: &NameResolver,
    room_id: &str,
) -> Vec<Assignment> {
    let mut assignments = Vec::new();

    for record in records {
        let Some(user_id) = resolver.resolve(&record.user.name) else {
            warn!(
                "Dropping assignment {}: no member matches name {:?}",
                record.id, record.user.name
            );
            continue;
        };

        let (Some(start), Some(end)) = (
            parse_block_time(&record.start_time),
            parse_block_time(&record.end_time),
        ) else {
            warn!("Dropping assignment {}: malformed timestamps", record.id);
            continue;
        };

        let end_hour = match end.hour() {
            0 => 24,
            hour => hour,
        };
        let date = start.date();

        assignments.push(Assignment {
            id: record.id.clone(),
            user_id: user_id.to_string(),
            room_id: room_id.to_string(),
            task_id: record.room_task.title.clone(),
            days: vec![DayOfWeek::from_date(date)],
            time_range: Some(TimeRange {
                start: start.hour(),
                end: end_hour,
            }),
            week_start: monday_of(date),
            created_at: None,
        });
    }

    assignments
}
