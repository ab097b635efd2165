//! HTTP-обёртка над backend API: Bearer-заголовок на каждом запросе
//! и единственное сквозное поведение — сброс сессии при 401.
//!
//! Никаких повторов, кэширования и таймаутов здесь нет: каждая функция
//! ресурсных клиентов делает ровно один сетевой вызов.

use crate::session::SessionStore;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Backend ответил 401: сессия уже сброшена, нужен повторный вход.
    #[error("сессия недействительна, требуется повторный вход")]
    Unauthorized,
    /// Любой другой не-2xx статус с описанием из тела `{"detail": ...}`.
    #[error("backend вернул {status}: {detail}")]
    Api { status: u16, detail: String },
    #[error("сетевая ошибка: {0}")]
    Network(#[source] reqwest::Error),
    #[error("не удалось разобрать ответ backend: {0}")]
    Decode(#[source] reqwest::Error),
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ApiError::Decode(error)
        } else {
            ApiError::Network(error)
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

type UnauthorizedHook = Box<dyn Fn() + Send + Sync>;

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: Arc<SessionStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
            on_unauthorized: None,
        }
    }

    /// Явный обработчик «сессия истекла» — вместо неявного редиректа панели.
    pub fn with_on_unauthorized(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_unauthorized = Some(Box::new(hook));
        self
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Отправляет запрос с Bearer-токеном (если он есть) и разбирает статус.
    async fn execute(&self, req: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let req = match self.session.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        };
        let resp = req.send().await.map_err(ApiError::Network)?;

        if resp.status() == StatusCode::UNAUTHORIZED {
            // clear() истинен только при реально удалённом токене, поэтому
            // несколько одновременных 401 сбрасывают сессию один раз.
            if self.session.clear() {
                tracing::warn!("backend ответил 401, сессия сброшена");
                if let Some(hook) = &self.on_unauthorized {
                    hook();
                }
            }
            return Err(ApiError::Unauthorized);
        }

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let detail = resp
                .json::<ErrorBody>()
                .await
                .map(|body| body.detail)
                .unwrap_or_else(|_| "ответ без описания ошибки".to_string());
            tracing::debug!(status, detail = %detail, "Запрос отклонён backend");
            return Err(ApiError::Api { status, detail });
        }

        Ok(resp)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = self.execute(self.http.get(self.url(path))).await?;
        resp.json().await.map_err(ApiError::Decode)
    }

    pub async fn get_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let resp = self
            .execute(self.http.get(self.url(path)).query(query))
            .await?;
        resp.json().await.map_err(ApiError::Decode)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self
            .execute(self.http.post(self.url(path)).json(body))
            .await?;
        resp.json().await.map_err(ApiError::Decode)
    }

    /// POST с JSON-телом, когда ответное тело не интересует (reorder).
    pub async fn post_unit<B>(&self, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.execute(self.http.post(self.url(path)).json(body))
            .await?;
        Ok(())
    }

    /// POST без тела — переключатели вида /bots/{id}/start.
    pub async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        self.execute(self.http.post(self.url(path))).await?;
        Ok(())
    }

    /// POST с form-encoded телом — так устроен /auth/login.
    pub async fn post_form<B, T>(&self, path: &str, form: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self
            .execute(self.http.post(self.url(path)).form(form))
            .await?;
        resp.json().await.map_err(ApiError::Decode)
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self
            .execute(self.http.patch(self.url(path)).json(body))
            .await?;
        resp.json().await.map_err(ApiError::Decode)
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(self.http.delete(self.url(path))).await?;
        Ok(())
    }
}
