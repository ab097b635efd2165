//! Боты и их приветственные шаблоны (/bots/... и /bots/{id}/messages/...).

use crate::client::{ApiClient, ApiError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct Bot {
    pub id: i64,
    pub name: String,
    pub bot_username: String,
    pub is_active: bool,
    #[serde(default)]
    pub display_order: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub text: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageTemplate {
    pub id: i64,
    pub bot_id: i64,
    pub language_code: String,
    pub text: String,
    #[serde(default)]
    pub buttons: Vec<Button>,
}

#[derive(Debug, Serialize)]
pub struct NewBot<'a> {
    pub name: &'a str,
    pub token: &'a str,
}

#[derive(Debug, Default, Serialize)]
pub struct BotPatch<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReorderItem {
    pub id: i64,
    pub display_order: i64,
}

#[derive(Debug, Serialize)]
pub struct NewTemplate<'a> {
    pub language_code: &'a str,
    pub text: &'a str,
    pub buttons: Vec<Button>,
}

#[derive(Debug, Default, Serialize)]
pub struct TemplatePatch<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buttons: Option<Vec<Button>>,
}

/// Новый визуальный порядок ботов -> тело запроса /bots/reorder:
/// display_order — позиция в списке, всегда перестановка 0..N-1.
pub fn reorder_payload(ids: &[i64]) -> Vec<ReorderItem> {
    ids.iter()
        .enumerate()
        .map(|(position, &id)| ReorderItem {
            id,
            display_order: position as i64,
        })
        .collect()
}

pub async fn list(client: &ApiClient) -> Result<Vec<Bot>, ApiError> {
    client.get("/bots/").await
}

pub async fn get(client: &ApiClient, id: i64) -> Result<Bot, ApiError> {
    client.get(&format!("/bots/{}", id)).await
}

pub async fn create(client: &ApiClient, name: &str, token: &str) -> Result<Bot, ApiError> {
    client.post("/bots/", &NewBot { name, token }).await
}

pub async fn update(client: &ApiClient, id: i64, patch: &BotPatch<'_>) -> Result<Bot, ApiError> {
    client.patch(&format!("/bots/{}", id), patch).await
}

pub async fn remove(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client.delete(&format!("/bots/{}", id)).await
}

pub async fn start(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client.post_empty(&format!("/bots/{}/start", id)).await
}

pub async fn stop(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client.post_empty(&format!("/bots/{}/stop", id)).await
}

pub async fn reorder(client: &ApiClient, items: &[ReorderItem]) -> Result<(), ApiError> {
    client.post_unit("/bots/reorder", items).await
}

pub async fn list_templates(
    client: &ApiClient,
    bot_id: i64,
) -> Result<Vec<MessageTemplate>, ApiError> {
    client.get(&format!("/bots/{}/messages/", bot_id)).await
}

pub async fn create_template(
    client: &ApiClient,
    bot_id: i64,
    template: &NewTemplate<'_>,
) -> Result<MessageTemplate, ApiError> {
    client
        .post(&format!("/bots/{}/messages/", bot_id), template)
        .await
}

pub async fn update_template(
    client: &ApiClient,
    bot_id: i64,
    message_id: i64,
    patch: &TemplatePatch<'_>,
) -> Result<MessageTemplate, ApiError> {
    client
        .patch(&format!("/bots/{}/messages/{}", bot_id, message_id), patch)
        .await
}

pub async fn delete_template(
    client: &ApiClient,
    bot_id: i64,
    message_id: i64,
) -> Result<(), ApiError> {
    client
        .delete(&format!("/bots/{}/messages/{}", bot_id, message_id))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reorder_payload_is_zero_based_permutation() {
        let payload = reorder_payload(&[42, 7, 19]);
        assert_eq!(
            payload,
            vec![
                ReorderItem { id: 42, display_order: 0 },
                ReorderItem { id: 7, display_order: 1 },
                ReorderItem { id: 19, display_order: 2 },
            ]
        );

        let mut orders: Vec<i64> = payload.iter().map(|item| item.display_order).collect();
        orders.sort_unstable();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn reorder_payload_empty_list() {
        assert!(reorder_payload(&[]).is_empty());
    }

    #[test]
    fn bot_patch_serializes_only_set_fields() {
        let patch = BotPatch {
            is_active: Some(false),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({"is_active": false})
        );
    }
}
