use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::api::PeaceHubApi;
use crate::error::AppError;
use crate::models::{Assignment, DayOfWeek, DaySchedule, IdentitySource, User};
use crate::schedule::{
    DayOverlap, DecodedSchedule, NameResolver, decode_by_user, overlaps_for_day,
    resolve_assignments,
};

/// Assembles everything the dashboard page renders for one selected date.
pub struct DashboardService {
    api: Arc<dyn PeaceHubApi>,
}

pub struct DashboardView {
    pub date: NaiveDate,
    pub current_user: User,
    pub identity: IdentitySource,
    /// Users shown on the combined timeline, derived from `identity`.
    pub users: Vec<User>,
    pub overlaps: DayOverlap,
    /// The current user's own 24-hour slot row for the date.
    pub my_day: DaySchedule,
    pub assignments: Vec<Assignment>,
}

impl DashboardService {
    pub fn new(api: Arc<dyn PeaceHubApi>) -> Self {
        Self { api }
    }

    /// Fetches the current user first, then the remaining requests
    /// concurrently. The user and own-schedule fetches are required and
    /// propagate their errors; member data degrades to empty.
    pub async fn load(&self, date: NaiveDate) -> Result<DashboardView, AppError> {
        let current = self.api.get_current_user().await?;

        let members_fut = async {
            match &current.room_id {
                Some(room_id) => self.api.get_room_members(room_id).await,
                None => Ok(Vec::new()),
            }
        };

        let (members, member_blocks, my_schedule, task_records) = tokio::join!(
            members_fut,
            self.api.get_member_daily_schedule(date),
            self.api.get_daily_schedule(date),
            self.api.get_member_task_schedule(),
        );
        let members = members?;
        let member_blocks = member_blocks?;
        let my_schedule = my_schedule?;
        let task_records = task_records?;

        let mut block_user_ids: Vec<String> = Vec::new();
        for block in &member_blocks {
            if !block_user_ids.contains(&block.user_id) {
                block_user_ids.push(block.user_id.clone());
            }
        }

        let day = DayOfWeek::from_date(date);
        let my_day = *my_schedule.day(day);

        let mut schedules: HashMap<String, DecodedSchedule> = decode_by_user(&member_blocks);
        if schedules.is_empty() {
            // No member blocks came back; show at least my own schedule.
            schedules.insert(
                current.id.clone(),
                DecodedSchedule {
                    grid: my_schedule,
                    tasks: Default::default(),
                },
            );
        }

        let identity = IdentitySource::from_parts(members, block_user_ids, &current);
        let users = identity.display_users(&current);

        let resolver = NameResolver::new(&users, &current);
        let room_id = current.room_id.clone().unwrap_or_default();
        let assignments = resolve_assignments(&task_records, &resolver, &room_id);

        let overlaps = overlaps_for_day(&users, &schedules, day);

        info!(
            "Dashboard loaded: {} users, {} assignments for {}",
            users.len(),
            assignments.len(),
            date
        );

        Ok(DashboardView {
            date,
            current_user: current,
            identity,
            users,
            overlaps,
            my_day,
            assignments,
        })
    }
}
