//! Рассылки (/broadcasts/...). Переходы статусов draft -> sending ->
//! {completed, cancelled} выполняет backend; клиент их только отражает.

use crate::api::bots::Button;
use crate::client::{ApiClient, ApiError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BroadcastStatus {
    Draft,
    Sending,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Broadcast {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub text: Option<String>,
    // media-поля backend отдаёт, но форма создания их не заполняет
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub media_file_id: Option<String>,
    #[serde(default)]
    pub buttons: Option<Vec<Button>>,
    #[serde(default)]
    pub target_bots: Vec<i64>,
    pub status: BroadcastStatus,
    pub total_users: i64,
    pub sent_count: i64,
    pub failed_count: i64,
    pub created_at: String,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
}

impl Broadcast {
    /// Процент обработанных получателей; None при total_users == 0
    /// (в панели это «нет данных», а не 0%).
    pub fn progress_percent(&self) -> Option<u8> {
        if self.total_users == 0 {
            return None;
        }
        let done = (self.sent_count + self.failed_count) as f64;
        Some((done / self.total_users as f64 * 100.0).round() as u8)
    }

    pub fn is_sending(&self) -> bool {
        self.status == BroadcastStatus::Sending
    }
}

#[derive(Debug, Serialize)]
pub struct NewBroadcast<'a> {
    pub title: &'a str,
    pub text: &'a str,
    pub buttons: Vec<Button>,
    pub target_bots: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<&'a str>,
}

pub async fn list(client: &ApiClient) -> Result<Vec<Broadcast>, ApiError> {
    client.get("/broadcasts/").await
}

pub async fn get(client: &ApiClient, id: i64) -> Result<Broadcast, ApiError> {
    client.get(&format!("/broadcasts/{}", id)).await
}

pub async fn create(
    client: &ApiClient,
    broadcast: &NewBroadcast<'_>,
) -> Result<Broadcast, ApiError> {
    client.post("/broadcasts/", broadcast).await
}

pub async fn start(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client.post_empty(&format!("/broadcasts/{}/start", id)).await
}

pub async fn cancel(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client.post_empty(&format!("/broadcasts/{}/cancel", id)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn broadcast(total: i64, sent: i64, failed: i64) -> Broadcast {
        Broadcast {
            id: 1,
            title: "test".to_string(),
            text: None,
            media_type: None,
            media_file_id: None,
            buttons: None,
            target_bots: vec![],
            status: BroadcastStatus::Sending,
            total_users: total,
            sent_count: sent,
            failed_count: failed,
            created_at: "2024-01-01T00:00:00".to_string(),
            started_at: None,
            completed_at: None,
        }
    }

    #[test]
    fn progress_counts_sent_and_failed() {
        assert_eq!(broadcast(200, 99, 1).progress_percent(), Some(50));
        assert_eq!(broadcast(100, 100, 0).progress_percent(), Some(100));
        assert_eq!(broadcast(3, 1, 0).progress_percent(), Some(33));
        assert_eq!(broadcast(3, 2, 0).progress_percent(), Some(67));
    }

    #[test]
    fn progress_without_recipients_is_no_data() {
        assert_eq!(broadcast(0, 0, 0).progress_percent(), None);
    }

    #[test]
    fn status_parses_from_wire_strings() {
        for (raw, expected) in [
            ("\"draft\"", BroadcastStatus::Draft),
            ("\"sending\"", BroadcastStatus::Sending),
            ("\"completed\"", BroadcastStatus::Completed),
            ("\"cancelled\"", BroadcastStatus::Cancelled),
        ] {
            let parsed: BroadcastStatus = serde_json::from_str(raw).unwrap();
            assert_eq!(parsed, expected);
        }
    }
}
