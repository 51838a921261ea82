use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use peacehub_client::AppError;
use peacehub_client::api::dto::{
    MemberTaskRecordDto, PreferenceEntry, RoomTaskDto, TaskPreferenceDto, TaskTitleDto,
    UserNameDto,
};
use peacehub_client::api::{NoopApiClient, PeaceHubApi};
use peacehub_client::models::{
    BlockType, IdentitySource, Room, TaskInfo, TimeBlock, User, WeeklySchedule,
};
use peacehub_client::schedule::NameResolver;
use peacehub_client::services::{
    DashboardService, PreferenceForm, group_by_user, group_room_preferences, submit_preferences,
};

fn user(id: &str, real_name: &str) -> User {
    User {
        id: id.to_string(),
        email: String::new(),
        real_name: real_name.to_string(),
        profile_image: String::new(),
        country: String::new(),
        language: String::new(),
        room_id: Some("room-1".to_string()),
        work_load: 0,
        created_at: String::new(),
    }
}

fn block(
    user_id: &str,
    start: (i32, u32, u32, u32),
    end: (i32, u32, u32, u32),
    block_type: BlockType,
    title: Option<&str>,
) -> TimeBlock {
    let (sy, sm, sd, sh) = start;
    let (ey, em, ed, eh) = end;
    TimeBlock {
        user_id: user_id.to_string(),
        start_time: NaiveDate::from_ymd_opt(sy, sm, sd)
            .unwrap()
            .and_hms_opt(sh, 0, 0)
            .unwrap(),
        end_time: NaiveDate::from_ymd_opt(ey, em, ed)
            .unwrap()
            .and_hms_opt(eh, 0, 0)
            .unwrap(),
        block_type,
        task_info: title.map(|t| TaskInfo {
            title: t.to_string(),
        }),
    }
}

/// Fixed-data client standing in for the backend on the dashboard path.
struct FixtureApi {
    members: Vec<User>,
}

#[async_trait]
impl PeaceHubApi for FixtureApi {
    async fn get_current_user(&self) -> Result<User, AppError> {
        Ok(user("u9", "허주환"))
    }

    async fn update_profile(&self, _real_name: &str) -> Result<User, AppError> {
        Ok(user("u9", "허주환"))
    }

    async fn create_room(&self, _name: &str) -> Result<Room, AppError> {
        Err(AppError::BadRequest("not used".to_string()))
    }

    async fn join_room(&self, _invite_code: &str) -> Result<Room, AppError> {
        Err(AppError::BadRequest("not used".to_string()))
    }

    async fn get_my_room(&self) -> Result<Option<Room>, AppError> {
        Ok(None)
    }

    async fn get_room_members(&self, _room_id: &str) -> Result<Vec<User>, AppError> {
        Ok(self.members.clone())
    }

    async fn get_active_schedule(&self) -> Result<WeeklySchedule, AppError> {
        Ok(WeeklySchedule::new())
    }

    async fn get_temporary_schedule(&self) -> Result<WeeklySchedule, AppError> {
        Ok(WeeklySchedule::new())
    }

    async fn get_daily_schedule(&self, _date: NaiveDate) -> Result<WeeklySchedule, AppError> {
        Ok(WeeklySchedule::new())
    }

    async fn get_member_daily_schedule(
        &self,
        _date: NaiveDate,
    ) -> Result<Vec<TimeBlock>, AppError> {
        Ok(vec![
            block("u1", (2025, 1, 6, 0), (2025, 1, 6, 6), BlockType::Quiet, None),
            block(
                "u1",
                (2025, 1, 6, 5),
                (2025, 1, 6, 6),
                BlockType::Task,
                Some("화장실 청소"),
            ),
            block("u2", (2025, 1, 6, 3), (2025, 1, 6, 9), BlockType::Quiet, None),
        ])
    }

    async fn save_schedule(
        &self,
        _schedule: &WeeklySchedule,
        _week_start: NaiveDate,
    ) -> Result<(), AppError> {
        Ok(())
    }

    async fn get_tasks(&self) -> Result<Vec<RoomTaskDto>, AppError> {
        Ok(Vec::new())
    }

    async fn save_preferences(&self, entries: &[PreferenceEntry]) -> Result<usize, AppError> {
        Ok(entries.len())
    }

    async fn get_member_task_schedule(&self) -> Result<Vec<MemberTaskRecordDto>, AppError> {
        Ok(vec![
            MemberTaskRecordDto {
                id: "a1".to_string(),
                user: UserNameDto {
                    name: "Kim".to_string(),
                },
                room_task: TaskTitleDto {
                    title: "화장실 청소".to_string(),
                },
                start_time: "2025-01-06T05:00:00Z".to_string(),
                end_time: "2025-01-06T06:00:00Z".to_string(),
            },
            MemberTaskRecordDto {
                id: "a2".to_string(),
                user: UserNameDto {
                    name: "Unknown".to_string(),
                },
                room_task: TaskTitleDto {
                    title: "설거지".to_string(),
                },
                start_time: "2025-01-06T18:00:00Z".to_string(),
                end_time: "2025-01-06T20:00:00Z".to_string(),
            },
        ])
    }
}

#[tokio::test]
async fn dashboard_load_with_noop_client_degrades_to_single_user() {
    let service = DashboardService::new(Arc::new(NoopApiClient));
    let view = service
        .load(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap())
        .await
        .expect("load should not fail");

    assert!(matches!(view.identity, IdentitySource::SingleUser(_)));
    assert_eq!(view.users.len(), 1);
    assert!(view.assignments.is_empty());
    for (hour, info) in view.overlaps.iter() {
        assert!(info.quiet.is_empty() && info.task.is_empty(), "hour {hour}");
    }
}

#[tokio::test]
async fn dashboard_load_builds_combined_view() {
    let service = DashboardService::new(Arc::new(FixtureApi {
        members: vec![user("u1", "Kim"), user("u2", "Lee")],
    }));
    let view = service
        .load(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap())
        .await
        .expect("load should not fail");

    assert!(matches!(view.identity, IdentitySource::Authoritative(_)));
    assert_eq!(view.users.len(), 2);

    // Task dominates quiet for u1 at hour 5; u2 stays quiet.
    assert_eq!(view.overlaps.hour(5).task, vec!["u1".to_string()]);
    assert_eq!(view.overlaps.hour(5).quiet, vec!["u2".to_string()]);
    assert_eq!(view.overlaps.hour(0).quiet, vec!["u1".to_string()]);
    assert!(view.overlaps.hour(9).quiet.is_empty());

    // The unmatched record was dropped.
    assert_eq!(view.assignments.len(), 1);
    assert_eq!(view.assignments[0].user_id, "u1");
    assert_eq!(
        view.assignments[0].week_start,
        NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
    );
}

#[tokio::test]
async fn dashboard_load_infers_members_from_blocks_when_member_list_is_empty() {
    let service = DashboardService::new(Arc::new(FixtureApi {
        members: Vec::new(),
    }));
    let view = service
        .load(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap())
        .await
        .expect("load should not fail");

    assert!(matches!(view.identity, IdentitySource::Inferred(_)));

    // Users come from the ids seen in the schedule blocks, in block order,
    // with synthetic display names.
    assert_eq!(view.users.len(), 2);
    assert_eq!(view.users[0].id, "u1");
    assert_eq!(view.users[0].real_name, "사용자 u1");
    assert_eq!(view.users[1].real_name, "사용자 u2");

    // The combined timeline still aggregates against the inferred users.
    assert_eq!(view.overlaps.hour(5).task, vec!["u1".to_string()]);
    assert_eq!(view.overlaps.hour(5).quiet, vec!["u2".to_string()]);

    // Synthetic names match no assignment record names.
    assert!(view.assignments.is_empty());
}

#[test]
fn inferred_identity_keeps_the_current_users_real_name() {
    let current = user("u9", "허주환");
    let source = IdentitySource::from_parts(
        Vec::new(),
        vec!["member-abc-123".to_string(), "u9".to_string()],
        &current,
    );
    assert!(matches!(source, IdentitySource::Inferred(_)));

    let users = source.display_users(&current);
    assert_eq!(users[0].real_name, "사용자 member-a");
    assert_eq!(users[1].id, "u9");
    assert_eq!(users[1].real_name, "허주환");
}

/// Counts network submissions so validation can be shown to run first.
struct CountingApi {
    submissions: AtomicUsize,
}

#[async_trait]
impl PeaceHubApi for CountingApi {
    async fn get_current_user(&self) -> Result<User, AppError> {
        Ok(user("u9", ""))
    }

    async fn update_profile(&self, _real_name: &str) -> Result<User, AppError> {
        Ok(user("u9", ""))
    }

    async fn create_room(&self, _name: &str) -> Result<Room, AppError> {
        Err(AppError::BadRequest("not used".to_string()))
    }

    async fn join_room(&self, _invite_code: &str) -> Result<Room, AppError> {
        Err(AppError::BadRequest("not used".to_string()))
    }

    async fn get_my_room(&self) -> Result<Option<Room>, AppError> {
        Ok(None)
    }

    async fn get_room_members(&self, _room_id: &str) -> Result<Vec<User>, AppError> {
        Ok(Vec::new())
    }

    async fn get_active_schedule(&self) -> Result<WeeklySchedule, AppError> {
        Ok(WeeklySchedule::new())
    }

    async fn get_temporary_schedule(&self) -> Result<WeeklySchedule, AppError> {
        Ok(WeeklySchedule::new())
    }

    async fn get_daily_schedule(&self, _date: NaiveDate) -> Result<WeeklySchedule, AppError> {
        Ok(WeeklySchedule::new())
    }

    async fn get_member_daily_schedule(
        &self,
        _date: NaiveDate,
    ) -> Result<Vec<TimeBlock>, AppError> {
        Ok(Vec::new())
    }

    async fn save_schedule(
        &self,
        _schedule: &WeeklySchedule,
        _week_start: NaiveDate,
    ) -> Result<(), AppError> {
        Ok(())
    }

    async fn get_tasks(&self) -> Result<Vec<RoomTaskDto>, AppError> {
        Ok(Vec::new())
    }

    async fn save_preferences(&self, entries: &[PreferenceEntry]) -> Result<usize, AppError> {
        self.submissions.fetch_add(1, Ordering::SeqCst);
        Ok(entries.len())
    }

    async fn get_member_task_schedule(&self) -> Result<Vec<MemberTaskRecordDto>, AppError> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn duplicate_preference_fails_before_any_network_call() {
    let api = CountingApi {
        submissions: AtomicUsize::new(0),
    };
    let form = PreferenceForm {
        first: "bathroom".to_string(),
        second: "bathroom".to_string(),
    };

    let result = submit_preferences(&api, &form).await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(api.submissions.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn valid_preference_submits_both_priorities() {
    let api = CountingApi {
        submissions: AtomicUsize::new(0),
    };
    let form = PreferenceForm {
        first: "bathroom".to_string(),
        second: "trash".to_string(),
    };

    let saved = submit_preferences(&api, &form).await.expect("should submit");

    assert_eq!(saved, 2);
    assert_eq!(api.submissions.load(Ordering::SeqCst), 1);

    let entries = form.entries();
    assert_eq!(entries[0].priority, 1);
    assert_eq!(entries[0].task_id, "bathroom");
    assert_eq!(entries[1].priority, 2);
    assert_eq!(entries[1].task_id, "trash");
}

#[test]
fn missing_choices_fail_validation() {
    let empty = PreferenceForm::default();
    assert!(empty.validate().is_err());

    let only_first = PreferenceForm {
        first: "dishes".to_string(),
        second: String::new(),
    };
    assert!(only_first.validate().is_err());

    let valid = PreferenceForm {
        first: "dishes".to_string(),
        second: "laundry".to_string(),
    };
    assert!(valid.validate().is_ok());
}

fn room_task(id: &str, title: &str, prefs: Vec<(&str, &str, u8)>) -> RoomTaskDto {
    RoomTaskDto {
        id: id.to_string(),
        title: title.to_string(),
        preferences: prefs
            .into_iter()
            .map(|(user_id, name, priority)| TaskPreferenceDto {
                user_id: user_id.to_string(),
                priority,
                user: UserNameDto {
                    name: name.to_string(),
                },
            })
            .collect(),
    }
}

#[test]
fn room_preferences_group_per_member() {
    let tasks = vec![
        room_task("bathroom", "화장실 청소", vec![("u1", "Kim", 1)]),
        room_task("trash", "쓰레기 버리기", vec![("u1", "Kim", 2), ("u2", "Lee", 1)]),
    ];

    let summaries = group_room_preferences(&tasks);

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].user_name, "Kim");
    assert_eq!(summaries[0].first.as_deref(), Some("화장실 청소"));
    assert_eq!(summaries[0].second.as_deref(), Some("쓰레기 버리기"));
    assert_eq!(summaries[1].user_name, "Lee");
    assert_eq!(summaries[1].first.as_deref(), Some("쓰레기 버리기"));
    assert_eq!(summaries[1].second, None);
}

#[test]
fn result_groups_assignments_per_member_with_display_strings() {
    let users = vec![user("u1", "Kim"), user("u2", "Lee")];
    let resolver = NameResolver::new(&users, &user("u9", "Heo"));

    let records = vec![
        MemberTaskRecordDto {
            id: "a1".to_string(),
            user: UserNameDto {
                name: "Kim".to_string(),
            },
            room_task: TaskTitleDto {
                title: "화장실 청소".to_string(),
            },
            start_time: "2025-01-08T09:00:00Z".to_string(),
            end_time: "2025-01-08T11:00:00Z".to_string(),
        },
        MemberTaskRecordDto {
            id: "a2".to_string(),
            user: UserNameDto {
                name: "Kim".to_string(),
            },
            room_task: TaskTitleDto {
                title: "설거지".to_string(),
            },
            start_time: "2025-01-11T22:00:00Z".to_string(),
            end_time: "2025-01-12T00:00:00Z".to_string(),
        },
        MemberTaskRecordDto {
            id: "a3".to_string(),
            user: UserNameDto {
                name: "Nobody".to_string(),
            },
            room_task: TaskTitleDto {
                title: "빨래하기".to_string(),
            },
            start_time: "2025-01-09T19:00:00Z".to_string(),
            end_time: "2025-01-09T21:00:00Z".to_string(),
        },
    ];

    let groups = group_by_user(&records, &resolver, &users);

    assert_eq!(groups.len(), 1);
    let kim = &groups[0];
    assert_eq!(kim.user_id, "u1");
    assert_eq!(kim.user_name, "Kim");
    assert_eq!(kim.tasks.len(), 2);

    assert_eq!(kim.tasks[0].day_label, "수");
    assert_eq!(kim.tasks[0].date_string, "1/8");
    assert_eq!(kim.tasks[0].time_string, "09:00-11:00");

    assert_eq!(kim.tasks[1].day_label, "토");
    assert_eq!(kim.tasks[1].date_string, "1/11");
    assert_eq!(kim.tasks[1].time_string, "22:00-24:00");
}
