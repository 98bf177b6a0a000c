use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    // Argon2id hash, never sent to clients
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub email: String,
    pub full_name: String,
    pub is_organizer: bool,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub full_name: String,
    pub is_organizer: bool,
    pub avatar_url: Option<String>,
}
