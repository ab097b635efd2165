use crate::client::{ApiClient, ApiError};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct StatsOverview {
    pub total_users: i64,
    pub new_today: i64,
    pub new_week: i64,
    pub active_bots: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyStat {
    pub date: String,
    pub count: i64,
}

pub async fn overview(client: &ApiClient) -> Result<StatsOverview, ApiError> {
    client.get("/stats/overview").await
}

pub async fn daily(client: &ApiClient, days: u32) -> Result<Vec<DailyStat>, ApiError> {
    client.get_query("/stats/daily", &[("days", days)]).await
}
