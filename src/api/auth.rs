use crate::client::{ApiClient, ApiError};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Me {
    pub username: String,
}

/// Вход: backend ждёт form-encoded поля, а не JSON.
pub async fn login(
    client: &ApiClient,
    username: &str,
    password: &str,
) -> Result<Token, ApiError> {
    let form = [("username", username), ("password", password)];
    client.post_form("/auth/login", &form).await
}

pub async fn me(client: &ApiClient) -> Result<Me, ApiError> {
    client.get("/auth/me").await
}
