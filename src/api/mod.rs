//! Ресурсные клиенты backend API: по одной функции на endpoint,
//! без собственного состояния и без повторов.

pub mod auth;
pub mod bots;
pub mod broadcast;
pub mod stats;
pub mod users;
