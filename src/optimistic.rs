//! Оптимистичное обновление локального снимка с откатом.
//!
//! Панель сначала показывает предсказанное состояние (бот «запущен»),
//! затем подтверждает его ответом backend или откатывается к последнему
//! подтверждённому снимку и перечитывает список.

#[derive(Debug, Clone)]
pub struct Optimistic<S: Clone> {
    confirmed: S,
    staged: Option<S>,
}

impl<S: Clone> Optimistic<S> {
    pub fn new(confirmed: S) -> Self {
        Self {
            confirmed,
            staged: None,
        }
    }

    /// Видимое состояние: предсказание, если оно есть, иначе подтверждённое.
    pub fn current(&self) -> &S {
        self.staged.as_ref().unwrap_or(&self.confirmed)
    }

    pub fn confirmed(&self) -> &S {
        &self.confirmed
    }

    /// Ставит предсказание поверх подтверждённого снимка.
    pub fn apply(&mut self, predicted: S) {
        self.staged = Some(predicted);
    }

    /// Backend подтвердил операцию: предсказание становится снимком.
    pub fn confirm(&mut self) {
        if let Some(staged) = self.staged.take() {
            self.confirmed = staged;
        }
    }

    /// Откат к последнему подтверждённому снимку. Идемпотентен:
    /// повторный вызов ничего не меняет.
    pub fn rollback(&mut self) -> &S {
        self.staged = None;
        &self.confirmed
    }

    /// Замена подтверждённого снимка свежими данными backend.
    pub fn reset(&mut self, fresh: S) {
        self.confirmed = fresh;
        self.staged = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_changes_visible_state_immediately() {
        let mut state = Optimistic::new(vec![false]);
        state.apply(vec![true]);
        assert_eq!(state.current(), &vec![true]);
        assert_eq!(state.confirmed(), &vec![false]);
    }

    #[test]
    fn confirm_promotes_prediction() {
        let mut state = Optimistic::new(1);
        state.apply(2);
        state.confirm();
        assert_eq!(*state.current(), 2);
        assert_eq!(*state.confirmed(), 2);
    }

    #[test]
    fn rollback_restores_confirmed_snapshot() {
        let mut state = Optimistic::new("server".to_string());
        state.apply("predicted".to_string());
        assert_eq!(state.rollback(), "server");
        assert_eq!(state.current(), "server");
    }

    #[test]
    fn rollback_is_idempotent() {
        let mut state = Optimistic::new(10);
        state.apply(20);
        state.rollback();
        state.rollback();
        assert_eq!(*state.current(), 10);
    }

    #[test]
    fn confirm_without_prediction_is_noop() {
        let mut state = Optimistic::new(5);
        state.confirm();
        assert_eq!(*state.current(), 5);
    }

    #[test]
    fn reset_drops_stale_prediction() {
        let mut state = Optimistic::new(1);
        state.apply(2);
        state.reset(3);
        assert_eq!(*state.current(), 3);
        state.rollback();
        assert_eq!(*state.current(), 3);
    }
}
