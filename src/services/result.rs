use tracing::warn;

use crate::api::dto::MemberTaskRecordDto;
use crate::api::transform::parse_block_time;
use crate::models::{DayOfWeek, User};
use crate::schedule::NameResolver;
use crate::view;

/// One assignment row on the weekly result page, display strings included.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignedTaskRow {
    pub id: String,
    pub task_title: String,
    pub day_label: &'static str,
    pub date_string: String,
    pub time_string: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserTaskGroup {
    pub user_id: String,
    pub user_name: String,
    pub tasks: Vec<AssignedTaskRow>,
}

/// Groups weekly assignment records per member in first-seen order.
/// Records that resolve to nobody, or with malformed timestamps, are
/// skipped; input order is preserved within each group.
pub fn group_by_user(
    records: &[MemberTaskRecordDto],
    resolver: &NameResolver,
    users: &[User],
) -> Vec<UserTaskGroup> {
    let mut groups: Vec<UserTaskGroup> = Vec::new();

    for record in records {
        let Some(user_id) = resolver.resolve(&record.user.name) else {
            warn!(
                "Skipping assignment {}: unknown member {:?}",
                record.id, record.user.name
            );
            continue;
        };

        let (Some(start), Some(end)) = (
            parse_block_time(&record.start_time),
            parse_block_time(&record.end_time),
        ) else {
            warn!("Skipping assignment {}: malformed timestamps", record.id);
            continue;
        };

        let user_id = user_id.to_string();
        let user_name = users
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| u.real_name.clone())
            .unwrap_or_else(|| "알 수 없음".to_string());

        let row = AssignedTaskRow {
            id: record.id.clone(),
            task_title: record.room_task.title.clone(),
            day_label: view::day_label(DayOfWeek::from_date(start.date())),
            date_string: view::format_month_day(start.date()),
            time_string: view::format_time_range(start, end),
        };

        if let Some(group) = groups.iter_mut().find(|g| g.user_id == user_id) {
            group.tasks.push(row);
        } else {
            groups.push(UserTaskGroup {
                user_id,
                user_name,
                tasks: vec![row],
            });
        }
    }

    groups
}
