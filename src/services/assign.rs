use tracing::info;

use crate::api::PeaceHubApi;
use crate::api::dto::{PreferenceEntry, RoomTaskDto};
use crate::error::AppError;

/// First/second chore choice as entered on the preference form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreferenceForm {
    pub first: String,
    pub second: String,
}

impl PreferenceForm {
    /// Both choices must be present and distinct. Runs before any network
    /// call.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.first.is_empty() {
            return Err(AppError::Validation("1지망을 선택해주세요".to_string()));
        }
        if self.second.is_empty() {
            return Err(AppError::Validation("2지망을 선택해주세요".to_string()));
        }
        if self.first == self.second {
            return Err(AppError::Validation(
                "1지망과 다른 집안일을 선택해주세요".to_string(),
            ));
        }
        Ok(())
    }

    pub fn entries(&self) -> Vec<PreferenceEntry> {
        vec![
            PreferenceEntry {
                task_id: self.first.clone(),
                priority: 1,
            },
            PreferenceEntry {
                task_id: self.second.clone(),
                priority: 2,
            },
        ]
    }
}

pub async fn submit_preferences(
    api: &dyn PeaceHubApi,
    form: &PreferenceForm,
) -> Result<usize, AppError> {
    form.validate()?;
    let saved = api.save_preferences(&form.entries()).await?;
    info!(
        "Submitted preferences: first={}, second={}",
        form.first, form.second
    );
    Ok(saved)
}

/// What each member has submitted so far, in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberPreferenceSummary {
    pub user_id: String,
    pub user_name: String,
    pub first: Option<String>,
    pub second: Option<String>,
}

pub fn group_room_preferences(tasks: &[RoomTaskDto]) -> Vec<MemberPreferenceSummary> {
    let mut summaries: Vec<MemberPreferenceSummary> = Vec::new();

    for task in tasks {
        for pref in &task.preferences {
            if !summaries.iter().any(|s| s.user_id == pref.user_id) {
                summaries.push(MemberPreferenceSummary {
                    user_id: pref.user_id.clone(),
                    user_name: pref.user.name.clone(),
                    first: None,
                    second: None,
                });
            }

            if let Some(summary) = summaries.iter_mut().find(|s| s.user_id == pref.user_id) {
                match pref.priority {
                    1 => summary.first = Some(task.title.clone()),
                    2 => summary.second = Some(task.title.clone()),
                    _ => {}
                }
            }
        }
    }

    summaries
}
