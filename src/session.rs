//! Хранилище сессионного токена: файл на диске вместо localStorage панели.
//!
//! Срок действия проверяется локально по claim `exp` — подпись не
//! проверяется и backend не опрашивается (отзыв токена заметим только
//! по 401 от самого backend).

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Authenticated,
    Unauthenticated,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("токен не похож на JWT")]
    Malformed,
    #[error("не удалось разобрать payload токена: {0}")]
    Payload(String),
}

#[derive(Debug, Deserialize)]
struct Claims {
    exp: i64,
}

/// Достаёт claim `exp` (epoch-секунды) из JWT без проверки подписи.
pub fn decode_expiry(token: &str) -> Result<i64, TokenError> {
    let mut parts = token.split('.');
    let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => return Err(TokenError::Malformed),
    };
    let raw = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| TokenError::Payload(e.to_string()))?;
    let claims: Claims =
        serde_json::from_slice(&raw).map_err(|e| TokenError::Payload(e.to_string()))?;
    Ok(claims.exp)
}

#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Сохранённый токен, если он есть.
    pub fn token(&self) -> Option<String> {
        std::fs::read_to_string(&self.path)
            .ok()
            .map(|raw| raw.trim().to_string())
            .filter(|token| !token.is_empty())
    }

    /// Сохраняет токен после успешного входа.
    pub fn login(&self, token: &str) -> Result<(), anyhow::Error> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                anyhow::anyhow!("Не удалось создать директорию для токена: {}", e)
            })?;
        }
        std::fs::write(&self.path, token)
            .map_err(|e| anyhow::anyhow!("Не удалось сохранить токен: {}", e))
    }

    pub fn logout(&self) {
        self.clear();
    }

    /// Удаляет токен. Возвращает true, только если токен действительно был:
    /// на этом держится правило «401 сбрасывает сессию ровно один раз».
    pub fn clear(&self) -> bool {
        std::fs::remove_file(&self.path).is_ok()
    }

    /// Локальная проверка сессии: токен есть и его `exp` в будущем.
    /// Просроченный или нечитаемый токен сразу удаляется.
    pub fn check(&self) -> AuthState {
        let Some(token) = self.token() else {
            return AuthState::Unauthenticated;
        };
        let now = chrono::Utc::now().timestamp();
        match decode_expiry(&token) {
            Ok(exp) if exp > now => AuthState::Authenticated,
            Ok(exp) => {
                tracing::info!(exp, now, "Токен просрочен, сессия сброшена");
                self.clear();
                AuthState::Unauthenticated
            }
            Err(error) => {
                tracing::warn!(error = %error, "Нечитаемый токен, сессия сброшена");
                self.clear();
                AuthState::Unauthenticated
            }
        }
    }
}
