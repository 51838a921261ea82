pub mod dto;
pub mod transform;

use std::env;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::error::AppError;
use crate::models::{Room, TimeBlock, User, WeeklySchedule};
use crate::schedule::decoder;

use dto::{
    CreateRoomRequest, ErrorBody, JoinRoomRequest, MemberTaskRecordDto, PreferenceEntry,
    RoomDto, RoomTaskDto, TimeBlockDto, UpdateProfileRequest, UserDto,
};

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    /// Reads `PEACEHUB_API_BASE_URL`, falling back to the local dev server.
    pub fn new_from_env() -> Self {
        let base_url = env::var("PEACEHUB_API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8080/api".to_string());
        Self { base_url }
    }
}

/// The backend surface this client consumes. Session credentials ride on
/// cookies; every method maps 401 to `AppError::Unauthorized` and the
/// room-membership 403 to `AppError::NotInRoom`. Methods documented as
/// best-effort degrade to empty data instead of failing.
#[async_trait]
pub trait PeaceHubApi: Send + Sync {
    async fn get_current_user(&self) -> Result<User, AppError>;
    async fn update_profile(&self, real_name: &str) -> Result<User, AppError>;
    async fn create_room(&self, name: &str) -> Result<Room, AppError>;
    async fn join_room(&self, invite_code: &str) -> Result<Room, AppError>;
    /// Best-effort: `None` when the user has no room or the call fails.
    async fn get_my_room(&self) -> Result<Option<Room>, AppError>;
    /// Best-effort: empty when the endpoint is unavailable.
    async fn get_room_members(&self, room_id: &str) -> Result<Vec<User>, AppError>;
    async fn get_active_schedule(&self) -> Result<WeeklySchedule, AppError>;
    async fn get_temporary_schedule(&self) -> Result<WeeklySchedule, AppError>;
    async fn get_daily_schedule(&self, date: NaiveDate) -> Result<WeeklySchedule, AppError>;
    /// Best-effort: empty when the call fails.
    async fn get_member_daily_schedule(&self, date: NaiveDate)
    -> Result<Vec<TimeBlock>, AppError>;
    async fn save_schedule(
        &self,
        schedule: &WeeklySchedule,
        week_start: NaiveDate,
    ) -> Result<(), AppError>;
    async fn get_tasks(&self) -> Result<Vec<RoomTaskDto>, AppError>;
    async fn save_preferences(&self, entries: &[PreferenceEntry]) -> Result<usize, AppError>;
    /// Best-effort: empty when the call fails.
    async fn get_member_task_schedule(&self) -> Result<Vec<MemberTaskRecordDto>, AppError>;
}

pub struct HttpApiClient {
    client: Client,
    config: ApiConfig,
}

impl HttpApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| AppError::BadRequest(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self.client.get(self.url(path)).send().await?;
        read_json(response).await
    }

    async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        read_json(response).await
    }

    async fn post_empty<B>(&self, path: &str, body: &B) -> Result<(), AppError>
    where
        B: Serialize + ?Sized,
    {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        check_status(response).await.map(|_| ())
    }

    async fn put_json<T, B>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.client.put(self.url(path)).json(body).send().await?;
        read_json(response).await
    }

    async fn fetch_schedule(&self, path: &str) -> Result<WeeklySchedule, AppError> {
        let blocks: Vec<TimeBlockDto> = self.get_json(path).await?;
        info!("GET {} - {} blocks", path, blocks.len());
        let decoded = transform::from_wire_blocks(&blocks);
        Ok(decoder::decode_blocks(&decoded).grid)
    }
}

async fn check_status(response: Response) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::UNAUTHORIZED {
        return Err(AppError::Unauthorized);
    }

    let message = response
        .text()
        .await
        .ok()
        .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
        .map(|b| b.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("HTTP {}", status));

    if status == StatusCode::FORBIDDEN && message == "not participate in room" {
        return Err(AppError::NotInRoom);
    }

    Err(AppError::Api {
        status: status.as_u16(),
        message,
    })
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let response = check_status(response).await?;
    let body = response.text().await.unwrap_or_default();
    serde_json::from_str(&body).map_err(|e| AppError::Parse(format!("{}", e)))
}

fn user_from_dto(dto: UserDto) -> User {
    User {
        id: dto.id,
        email: dto.email,
        real_name: dto.real_name.or(dto.name).unwrap_or_default(),
        profile_image: dto.picture.unwrap_or_default(),
        country: dto.country.unwrap_or_default(),
        language: dto.language.unwrap_or_default(),
        room_id: dto.room_id,
        work_load: dto.work_load.unwrap_or(0),
        created_at: dto.created_at.unwrap_or_default(),
    }
}

fn room_from_dto(dto: RoomDto) -> Room {
    Room {
        id: dto.id,
        name: dto.name,
        invite_code: dto.invite_code,
        owner_id: dto.owner_id,
        created_at: dto.created_at.unwrap_or_default(),
    }
}

#[async_trait]
impl PeaceHubApi for HttpApiClient {
    async fn get_current_user(&self) -> Result<User, AppError> {
        let dto: UserDto = self.get_json("/users/me").await?;
        Ok(user_from_dto(dto))
    }

    async fn update_profile(&self, real_name: &str) -> Result<User, AppError> {
        let request = UpdateProfileRequest {
            name: real_name.to_string(),
        };
        let dto: UserDto = self.put_json("/users/profile", &request).await?;
        Ok(user_from_dto(dto))
    }

    async fn create_room(&self, name: &str) -> Result<Room, AppError> {
        let request = CreateRoomRequest {
            name: name.to_string(),
        };
        let dto: RoomDto = self.post_json("/rooms", &request).await?;
        Ok(room_from_dto(dto))
    }

    async fn join_room(&self, invite_code: &str) -> Result<Room, AppError> {
        let request = JoinRoomRequest {
            invite_code: invite_code.to_string(),
        };
        let dto: RoomDto = self.post_json("/rooms/join", &request).await?;
        Ok(room_from_dto(dto))
    }

    async fn get_my_room(&self) -> Result<Option<Room>, AppError> {
        match self.get_json::<RoomDto>("/rooms/my").await {
            Ok(dto) => Ok(Some(room_from_dto(dto))),
            Err(e) => {
                warn!("GET /rooms/my failed, treating as no room: {}", e);
                Ok(None)
            }
        }
    }

    async fn get_room_members(&self, room_id: &str) -> Result<Vec<User>, AppError> {
        let path = format!("/rooms/{}/members", room_id);
        match self.get_json::<Vec<UserDto>>(&path).await {
            Ok(dtos) => Ok(dtos.into_iter().map(user_from_dto).collect()),
            Err(e) => {
                warn!("GET {} failed, returning no members: {}", path, e);
                Ok(Vec::new())
            }
        }
    }

    async fn get_active_schedule(&self) -> Result<WeeklySchedule, AppError> {
        self.fetch_schedule("/schedules/activeSchedules").await
    }

    async fn get_temporary_schedule(&self) -> Result<WeeklySchedule, AppError> {
        self.fetch_schedule("/schedules/temporarySchedules").await
    }

    async fn get_daily_schedule(&self, date: NaiveDate) -> Result<WeeklySchedule, AppError> {
        let path = format!("/schedules/daily?date={}", date.format("%Y-%m-%d"));
        self.fetch_schedule(&path).await
    }

    async fn get_member_daily_schedule(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<TimeBlock>, AppError> {
        let path = format!("/schedules/memberDaily?date={}", date.format("%Y-%m-%d"));
        match self.get_json::<Vec<TimeBlockDto>>(&path).await {
            Ok(blocks) => {
                let decoded = transform::from_wire_blocks(&blocks);
                info!("GET {} - {} blocks", path, decoded.len());
                Ok(decoded)
            }
            Err(e) => {
                warn!("GET {} failed, returning no blocks: {}", path, e);
                Ok(Vec::new())
            }
        }
    }

    async fn save_schedule(
        &self,
        schedule: &WeeklySchedule,
        week_start: NaiveDate,
    ) -> Result<(), AppError> {
        let blocks = transform::to_wire_schedule(schedule, week_start);
        info!(
            "POST /schedules - {} blocks for week {}",
            blocks.len(),
            week_start.format("%Y-%m-%d")
        );
        self.post_empty("/schedules", &blocks).await
    }

    async fn get_tasks(&self) -> Result<Vec<RoomTaskDto>, AppError> {
        let tasks: Vec<RoomTaskDto> = self.get_json("/tasks").await?;
        let with_prefs = tasks.iter().filter(|t| !t.preferences.is_empty()).count();
        info!(
            "GET /tasks - {} tasks, {} with preferences",
            tasks.len(),
            with_prefs
        );
        Ok(tasks)
    }

    async fn save_preferences(&self, entries: &[PreferenceEntry]) -> Result<usize, AppError> {
        let saved: Vec<serde_json::Value> =
            self.post_json("/tasks/preferences", entries).await?;
        info!("POST /tasks/preferences - saved {} preferences", saved.len());
        Ok(saved.len())
    }

    async fn get_member_task_schedule(&self) -> Result<Vec<MemberTaskRecordDto>, AppError> {
        match self
            .get_json::<Vec<MemberTaskRecordDto>>("/schedules/memberTask")
            .await
        {
            Ok(records) => {
                info!("GET /schedules/memberTask - {} assignments", records.len());
                Ok(records)
            }
            Err(e) => {
                warn!("GET /schedules/memberTask failed, returning no assignments: {}", e);
                Ok(Vec::new())
            }
        }
    }
}

/// Client that never talks to the network. Used by tests and offline runs.
pub struct NoopApiClient;

impl NoopApiClient {
    fn local_user() -> User {
        User {
            id: "local-user".to_string(),
            email: String::new(),
            real_name: String::new(),
            profile_image: String::new(),
            country: String::new(),
            language: String::new(),
            room_id: None,
            work_load: 0,
            created_at: String::new(),
        }
    }
}

#[async_trait]
impl PeaceHubApi for NoopApiClient {
    async fn get_current_user(&self) -> Result<User, AppError> {
        Ok(Self::local_user())
    }

    async fn update_profile(&self, real_name: &str) -> Result<User, AppError> {
        let mut user = Self::local_user();
        user.real_name = real_name.to_string();
        Ok(user)
    }

    async fn create_room(&self, name: &str) -> Result<Room, AppError> {
        Ok(Room {
            id: "local-room".to_string(),
            name: name.to_string(),
            invite_code: String::new(),
            owner_id: Self::local_user().id,
            created_at: String::new(),
        })
    }

    async fn join_room(&self, _invite_code: &str) -> Result<Room, AppError> {
        Ok(Room {
            id: "local-room".to_string(),
            name: String::new(),
            invite_code: String::new(),
            owner_id: String::new(),
            created_at: String::new(),
        })
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
        Ok(entries.len())
    }

    async fn get_member_task_schedule(&self) -> Result<Vec<MemberTaskRecordDto>, AppError> {
        Ok(Vec::new())
    }
}
