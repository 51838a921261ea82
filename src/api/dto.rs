use serde::{Deserialize, Serialize};

use crate::models::BlockType;

/// Schedule block as the backend sends and accepts it. Timestamps are
/// ISO-8601 strings whose written date/hour fields are the source of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBlockDto {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user_id: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_info: Option<TaskInfoDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskInfoDto {
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub real_name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub room_id: Option<String>,
    #[serde(default)]
    pub work_load: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDto {
    pub id: String,
    pub name: String,
    pub invite_code: String,
    pub owner_id: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoomRequest {
    pub invite_code: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateProfileRequest {
    pub name: String,
}

/// Room chore with the preferences submitted for it so far
/// (GET /tasks response element).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomTaskDto {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub preferences: Vec<TaskPreferenceDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPreferenceDto {
    pub user_id: String,
    pub priority: u8,
    pub user: UserNameDto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserNameDto {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskTitleDto {
    pub title: String,
}

/// One entry of a preference submission (POST /tasks/preferences).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceEntry {
    pub task_id: String,
    pub priority: u8,
}

/// Weekly assignment record (GET /schedules/memberTask response element).
/// Carries a display name rather than a stable user id; the resolver joins
/// it back to an identity best-effort.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberTaskRecordDto {
    pub id: String,
    pub user: UserNameDto,
    pub room_task: TaskTitleDto,
    pub start_time: String,
    pub end_time: String,
}

/// Error body the backend attaches to non-success responses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
}
