//! Конфигурация консоли: TOML-файл, путь передаётся через --config.

use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Базовый URL backend API, включая префикс /api.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Файл с сессионным токеном.
    #[serde(default = "default_token_path")]
    pub token_path: PathBuf,
    #[serde(default = "default_users_page_size")]
    pub users_page_size: i64,
    /// Интервал опроса активных рассылок, секунды.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

fn default_api_url() -> String {
    "http://127.0.0.1:8000/api".to_string()
}

fn default_token_path() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".botforge-admin")
        .join("token")
}

fn default_users_page_size() -> i64 {
    20
}

fn default_poll_interval_secs() -> u64 {
    3
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token_path: default_token_path(),
            users_page_size: default_users_page_size(),
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

impl Config {
    /// Загружает конфиг; отсутствующий файл означает «все значения по
    /// умолчанию», отсутствующие поля дополняются по умолчанию.
    pub fn load(path: &Path) -> Result<Self, anyhow::Error> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Не удалось прочитать конфиг {}: {}", path.display(), e))?;
        toml::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("Некорректный конфиг {}: {}", path.display(), e))
    }
}
