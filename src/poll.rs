//! Повторяющийся опрос backend с фиксированным интервалом.
//!
//! Продолжать или остановиться решает предикат по последнему снимку,
//! как в списке рассылок панели: опрос идёт, пока в снимке есть рассылка
//! в статусе «sending». Переход в «sending» между опросами будет замечен
//! только при следующем независимом запросе.

use std::future::Future;
use std::time::Duration;

pub struct Poller {
    interval: Duration,
}

impl Poller {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Первый запрос выполняется сразу, дальше — раз в интервал, пока
    /// `keep_polling` по свежему снимку истинен. Возвращает последний
    /// снимок; ошибка любого запроса прекращает опрос.
    pub async fn run<S, E, Fut>(
        &self,
        mut fetch: impl FnMut() -> Fut,
        keep_polling: impl Fn(&S) -> bool,
        mut on_snapshot: impl FnMut(&S),
    ) -> Result<S, E>
    where
        Fut: Future<Output = Result<S, E>>,
    {
        loop {
            let snapshot = fetch().await?;
            on_snapshot(&snapshot);
            if !keep_polling(&snapshot) {
                return Ok(snapshot);
            }
            tokio::time::sleep(self.interval).await;
        }
    }
}
