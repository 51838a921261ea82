use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: String,
    /// Display name. Secondary, non-unique attribute; identity is `id`.
    #[serde(default)]
    pub real_name: String,
    #[serde(default)]
    pub profile_image: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub room_id: Option<String>,
    /// Last week's workload as reported by the backend.
    #[serde(default)]
    pub work_load: i64,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub name: String,
    pub invite_code: String,
    pub owner_id: String,
    #[serde(default)]
    pub created_at: String,
}

/// Where the member list shown in the combined timeline came from.
///
/// Room membership data can be unavailable; instead of probing array
/// lengths, the view layer branches on this tag.
#[derive(Debug, Clone, PartialEq)]
pub enum IdentitySource {
    /// The backend returned the room's member list.
    Authoritative(Vec<User>),
    /// No member list; user ids were inferred from schedule blocks.
    Inferred(Vec<String>),
    /// Nothing but the logged-in user is known.
    SingleUser(User),
}

impl IdentitySource {
    /// Picks the source the way the dashboard does: members if present,
    /// otherwise the ids seen in schedule blocks, otherwise just the
    /// current user.
    pub fn from_parts(members: Vec<User>, block_user_ids: Vec<String>, current: &User) -> Self {
        if !members.is_empty() {
            IdentitySource::Authoritative(members)
        } else if !block_user_ids.is_empty() {
            IdentitySource::Inferred(block_user_ids)
        } else {
            IdentitySource::SingleUser(current.clone())
        }
    }

    /// Users to render. Inferred members get a synthetic display name from
    /// the id prefix; the current user keeps their real name.
    pub fn display_users(&self, current: &User) -> Vec<User> {
        match self {
            IdentitySource::Authoritative(members) => members.clone(),
            IdentitySource::Inferred(user_ids) => user_ids
                .iter()
                .map(|user_id| {
                    let real_name = if *user_id == current.id {
                        current.real_name.clone()
                    } else {
                        let prefix: String = user_id.chars().take(8).collect();
                        format!("사용자 {prefix}")
                    };
                    User {
                        id: user_id.clone(),
                        real_name,
                        email: String::new(),
                        profile_image: String::new(),
                        country: String::new(),
                        language: String::new(),
                        room_id: None,
                        work_load: 0,
                        created_at: String::new(),
                    }
                })
                .collect(),
            IdentitySource::SingleUser(user) => vec![user.clone()],
        }
    }
}
