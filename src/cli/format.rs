//! Отображение сущностей backend в терминале — в тех же форматах,
//! что и панель (даты как DD.MM.YYYY HH:mm, прогресс в процентах).

use crate::api::bots::{Bot, MessageTemplate};
use crate::api::broadcast::{Broadcast, BroadcastStatus};
use crate::api::users::BotUser;
use chrono::NaiveDateTime;

pub fn format_date(raw: &str) -> String {
    raw.parse::<NaiveDateTime>()
        .map(|dt| dt.format("%d.%m.%Y %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

pub fn format_opt_date(raw: Option<&str>) -> String {
    raw.map(format_date).unwrap_or_else(|| "—".to_string())
}

pub fn status_label(status: BroadcastStatus) -> &'static str {
    match status {
        BroadcastStatus::Draft => "черновик",
        BroadcastStatus::Sending => "отправляется",
        BroadcastStatus::Completed => "завершена",
        BroadcastStatus::Cancelled => "отменена",
    }
}

/// Прогресс рассылки; «—» при total_users == 0.
pub fn render_progress(broadcast: &Broadcast) -> String {
    match broadcast.progress_percent() {
        Some(percent) => format!(
            "{}% ({} из {}, ошибок {})",
            percent,
            broadcast.sent_count + broadcast.failed_count,
            broadcast.total_users,
            broadcast.failed_count
        ),
        None => "—".to_string(),
    }
}

pub fn render_bot_line(bot: &Bot) -> String {
    format!(
        "#{} {} (@{}) — {} | порядок {} | создан {}",
        bot.id,
        bot.name,
        bot.bot_username,
        if bot.is_active { "запущен" } else { "остановлен" },
        bot.display_order,
        format_date(&bot.created_at)
    )
}

pub fn render_bot_card(bot: &Bot) -> String {
    format!(
        "Бот #{}\n\
         Имя: {}\n\
         Username: @{}\n\
         Статус: {}\n\
         Порядок отображения: {}\n\
         Создан: {}\n\
         Обновлён: {}",
        bot.id,
        bot.name,
        bot.bot_username,
        if bot.is_active { "запущен" } else { "остановлен" },
        bot.display_order,
        format_date(&bot.created_at),
        format_date(&bot.updated_at)
    )
}

pub fn render_template(template: &MessageTemplate) -> String {
    let buttons = if template.buttons.is_empty() {
        "без кнопок".to_string()
    } else {
        template
            .buttons
            .iter()
            .map(|button| format!("[{} -> {}]", button.text, button.url))
            .collect::<Vec<_>>()
            .join(" ")
    };
    format!(
        "{} (id {}): {} | {}",
        template.language_code, template.id, template.text, buttons
    )
}

pub fn render_broadcast_line(broadcast: &Broadcast) -> String {
    format!(
        "#{} «{}» — {} | {} | боты {:?} | создана {}",
        broadcast.id,
        broadcast.title,
        status_label(broadcast.status),
        render_progress(broadcast),
        broadcast.target_bots,
        format_date(&broadcast.created_at)
    )
}

pub fn render_broadcast_card(broadcast: &Broadcast) -> String {
    format!(
        "Рассылка #{}\n\
         Заголовок: {}\n\
         Текст: {}\n\
         Статус: {}\n\
         Прогресс: {}\n\
         Целевые боты: {:?}\n\
         Создана: {}\n\
         Запущена: {}\n\
         Завершена: {}",
        broadcast.id,
        broadcast.title,
        broadcast.text.as_deref().unwrap_or("—"),
        status_label(broadcast.status),
        render_progress(broadcast),
        broadcast.target_bots,
        format_date(&broadcast.created_at),
        format_opt_date(broadcast.started_at.as_deref()),
        format_opt_date(broadcast.completed_at.as_deref())
    )
}

pub fn user_display_name(user: &BotUser) -> String {
    let full_name = [user.first_name.as_deref(), user.last_name.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    if !full_name.is_empty() {
        return full_name;
    }
    user.username
        .as_ref()
        .map(|username| format!("@{}", username))
        .unwrap_or_else(|| format!("tg_{}", user.telegram_id))
}

pub fn render_user_line(user: &BotUser) -> String {
    format!(
        "#{} {} | tg {} | язык {} | бот {} | {} | впервые {} | последний раз {}",
        user.id,
        user_display_name(user),
        user.telegram_id,
        user.language_code.as_deref().unwrap_or("—"),
        user.source_bot_id,
        if user.is_blocked { "заблокировал бота" } else { "активен" },
        format_date(&user.first_seen_at),
        format_date(&user.last_seen_at)
    )
}
