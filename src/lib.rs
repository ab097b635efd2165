//! Клиент backend API платформы BotForge и консоль администратора.
//!
//! Библиотека — это контракт панели управления: хранилище сессии,
//! HTTP-обёртка с Bearer-авторизацией и обработкой 401, плоские
//! ресурсные клиенты и вспомогательные примитивы (оптимистичные
//! обновления, опрос по предикату). Бинарник поверх неё — терминальная
//! консоль оператора.

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod optimistic;
pub mod poll;
pub mod session;
