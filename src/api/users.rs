//! Собранные ботами записи конечных пользователей (/users/...).

use crate::client::{ApiClient, ApiError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct BotUser {
    pub id: i64,
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub language_code: Option<String>,
    pub source_bot_id: i64,
    pub is_blocked: bool,
    pub first_seen_at: String,
    pub last_seen_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedUsers {
    pub users: Vec<BotUser>,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserQuery {
    pub page: i64,
    pub limit: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot_id: Option<i64>,
}

impl Default for UserQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 20,
            search: None,
            bot_id: None,
        }
    }
}

pub async fn list(client: &ApiClient, query: &UserQuery) -> Result<PaginatedUsers, ApiError> {
    client.get_query("/users/", query).await
}

pub async fn remove(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client.delete(&format!("/users/{}", id)).await
}
