//! Обработчики команд консоли: запрос к backend и вывод результата.
//! Ошибки каждой команды обрабатываются на месте вызова; откат
//! оптимистичных изменений — перечитыванием списка у backend.

use super::format;
use super::{BotsCommand, BroadcastCommand, MessagesCommand, StatsCommand, UsersCommand};
use crate::api;
use crate::api::bots::{Bot, BotPatch, Button, NewTemplate, TemplatePatch, reorder_payload};
use crate::api::broadcast::{Broadcast, NewBroadcast};
use crate::api::users::UserQuery;
use crate::client::ApiClient;
use crate::config::Config;
use crate::optimistic::Optimistic;
use crate::poll::Poller;
use std::collections::HashSet;
use std::io::Write;
use std::time::Duration;

fn confirm(prompt: &str, assume_yes: bool) -> Result<bool, anyhow::Error> {
    if assume_yes {
        return Ok(true);
    }
    print!("{} [y/N]: ", prompt);
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(matches!(
        line.trim().to_lowercase().as_str(),
        "y" | "yes" | "д" | "да"
    ))
}

fn read_password() -> Result<String, anyhow::Error> {
    print!("Пароль: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn parse_button(raw: &str) -> Result<Button, anyhow::Error> {
    let (text, url) = raw
        .split_once('|')
        .ok_or_else(|| anyhow::anyhow!("Кнопка задаётся как «текст|url», получено: {}", raw))?;
    let (text, url) = (text.trim(), url.trim());
    if text.is_empty() || url.is_empty() {
        anyhow::bail!("Кнопка задаётся как «текст|url», получено: {}", raw);
    }
    Ok(Button {
        text: text.to_string(),
        url: url.to_string(),
    })
}

fn parse_buttons(raw: &[String]) -> Result<Vec<Button>, anyhow::Error> {
    raw.iter().map(|item| parse_button(item)).collect()
}

pub async fn login(
    client: &ApiClient,
    username: &str,
    password: Option<String>,
) -> Result<(), anyhow::Error> {
    let password = match password {
        Some(password) => password,
        None => read_password()?,
    };
    let token = api::auth::login(client, username, &password).await?;
    client.session().login(&token.access_token)?;
    let me = api::auth::me(client).await?;
    println!("Вход выполнен: {}.", me.username);
    Ok(())
}

pub async fn whoami(client: &ApiClient) -> Result<(), anyhow::Error> {
    let me = api::auth::me(client).await?;
    println!("{}", me.username);
    Ok(())
}

pub async fn bots(
    client: &ApiClient,
    command: BotsCommand,
    assume_yes: bool,
) -> Result<(), anyhow::Error> {
    match command {
        BotsCommand::List => {
            let bots = api::bots::list(client).await?;
            print_bot_list(&bots);
        }
        BotsCommand::Show { id } => {
            let bot = api::bots::get(client, id).await?;
            println!("{}", format::render_bot_card(&bot));
        }
        BotsCommand::Add { name, token } => {
            let bot = api::bots::create(client, &name, &token).await?;
            println!("Бот добавлен: {}", format::render_bot_line(&bot));
        }
        BotsCommand::Rename { id, name } => {
            let bot = api::bots::update(
                client,
                id,
                &BotPatch {
                    name: Some(&name),
                    ..Default::default()
                },
            )
            .await?;
            println!("Бот переименован: {}", format::render_bot_line(&bot));
        }
        BotsCommand::Start { id } => toggle_bot(client, id, true).await?,
        BotsCommand::Stop { id } => toggle_bot(client, id, false).await?,
        BotsCommand::Delete { id } => {
            let bot = api::bots::get(client, id).await?;
            if !confirm(&format!("Удалить бота «{}»?", bot.name), assume_yes)? {
                println!("Отменено.");
                return Ok(());
            }
            api::bots::remove(client, id).await?;
            println!("Бот «{}» удалён.", bot.name);
        }
        BotsCommand::Reorder { ids } => reorder_bots(client, &ids).await?,
        BotsCommand::Messages(command) => messages(client, command, assume_yes).await?,
    }
    Ok(())
}

fn print_bot_list(bots: &[Bot]) {
    if bots.is_empty() {
        println!("Ботов нет. Добавьте первого: `bots add <имя> <токен>`.");
        return;
    }
    for bot in bots {
        println!("{}", format::render_bot_line(bot));
    }
}

/// Оптимистичное переключение: список показывается с предсказанным
/// статусом сразу; при ошибке — откат и перечитывание у backend.
async fn toggle_bot(client: &ApiClient, id: i64, activate: bool) -> Result<(), anyhow::Error> {
    let bots = api::bots::list(client).await?;
    if !bots.iter().any(|bot| bot.id == id) {
        anyhow::bail!("Бот {} не найден", id);
    }

    let mut state = Optimistic::new(bots);
    let predicted: Vec<Bot> = state
        .current()
        .iter()
        .cloned()
        .map(|mut bot| {
            if bot.id == id {
                bot.is_active = activate;
            }
            bot
        })
        .collect();
    state.apply(predicted);
    print_bot_list(state.current());

    let result = if activate {
        api::bots::start(client, id).await
    } else {
        api::bots::stop(client, id).await
    };

    match result {
        Ok(()) => {
            state.confirm();
            println!("{}", if activate { "Бот запущен." } else { "Бот остановлен." });
            Ok(())
        }
        Err(error) => {
            state.rollback();
            let fresh = api::bots::list(client).await?;
            state.reset(fresh);
            println!("Не удалось изменить статус, актуальный список:");
            print_bot_list(state.current());
            Err(error.into())
        }
    }
}

async fn reorder_bots(client: &ApiClient, ids: &[i64]) -> Result<(), anyhow::Error> {
    let bots = api::bots::list(client).await?;
    let known: HashSet<i64> = bots.iter().map(|bot| bot.id).collect();
    let requested: HashSet<i64> = ids.iter().copied().collect();
    if requested.len() != ids.len() || requested != known {
        let mut registered: Vec<i64> = known.into_iter().collect();
        registered.sort_unstable();
        anyhow::bail!(
            "Нужно перечислить все id ботов ровно по одному разу (сейчас зарегистрированы: {:?})",
            registered
        );
    }
    api::bots::reorder(client, &reorder_payload(ids)).await?;
    println!("Порядок сохранён.");
    Ok(())
}

async fn messages(
    client: &ApiClient,
    command: MessagesCommand,
    assume_yes: bool,
) -> Result<(), anyhow::Error> {
    match command {
        MessagesCommand::List { bot_id } => {
            let templates = api::bots::list_templates(client, bot_id).await?;
            if templates.is_empty() {
                println!("Шаблонов нет.");
            }
            for template in &templates {
                println!("{}", format::render_template(template));
            }
        }
        MessagesCommand::Set {
            bot_id,
            language_code,
            text,
            buttons,
        } => {
            let buttons = parse_buttons(&buttons)?;
            let existing = api::bots::list_templates(client, bot_id)
                .await?
                .into_iter()
                .find(|template| template.language_code == language_code);
            let template = match existing {
                Some(template) => {
                    api::bots::update_template(
                        client,
                        bot_id,
                        template.id,
                        &TemplatePatch {
                            text: Some(&text),
                            buttons: Some(buttons),
                        },
                    )
                    .await?
                }
                None => {
                    api::bots::create_template(
                        client,
                        bot_id,
                        &NewTemplate {
                            language_code: &language_code,
                            text: &text,
                            buttons,
                        },
                    )
                    .await?
                }
            };
            println!(
                "Шаблон «{}» сохранён (id {}).",
                template.language_code, template.id
            );
        }
        MessagesCommand::Delete { bot_id, message_id } => {
            if !confirm(&format!("Удалить шаблон {}?", message_id), assume_yes)? {
                println!("Отменено.");
                return Ok(());
            }
            api::bots::delete_template(client, bot_id, message_id).await?;
            println!("Шаблон удалён.");
        }
    }
    Ok(())
}

pub async fn broadcast(
    client: &ApiClient,
    config: &Config,
    command: BroadcastCommand,
    assume_yes: bool,
) -> Result<(), anyhow::Error> {
    match command {
        BroadcastCommand::List => {
            let broadcasts = api::broadcast::list(client).await?;
            if broadcasts.is_empty() {
                println!("Рассылок нет.");
            }
            for broadcast in &broadcasts {
                println!("{}", format::render_broadcast_line(broadcast));
            }
        }
        BroadcastCommand::Show { id } => {
            let broadcast = api::broadcast::get(client, id).await?;
            println!("{}", format::render_broadcast_card(&broadcast));
        }
        BroadcastCommand::Create {
            title,
            text,
            bots,
            buttons,
        } => {
            let broadcast = api::broadcast::create(
                client,
                &NewBroadcast {
                    title: &title,
                    text: &text,
                    buttons: parse_buttons(&buttons)?,
                    target_bots: bots,
                    media_type: None,
                },
            )
            .await?;
            println!(
                "Черновик создан: #{} «{}». Запуск: `broadcast start {}`.",
                broadcast.id, broadcast.title, broadcast.id
            );
        }
        BroadcastCommand::Start { id } => {
            api::broadcast::start(client, id).await?;
            println!("Рассылка #{} запущена.", id);
        }
        BroadcastCommand::Cancel { id } => {
            if !confirm(&format!("Отменить рассылку #{}?", id), assume_yes)? {
                println!("Отменено.");
                return Ok(());
            }
            api::broadcast::cancel(client, id).await?;
            println!("Рассылка #{} отменена.", id);
        }
        BroadcastCommand::Watch => watch_broadcasts(client, config).await?,
    }
    Ok(())
}

/// Опрос /broadcasts/ раз в интервал, пока хоть одна рассылка «sending».
async fn watch_broadcasts(client: &ApiClient, config: &Config) -> Result<(), anyhow::Error> {
    let poller = Poller::new(Duration::from_secs(config.poll_interval_secs));
    let last = poller
        .run(
            || api::broadcast::list(client),
            |broadcasts: &Vec<Broadcast>| broadcasts.iter().any(Broadcast::is_sending),
            |broadcasts| {
                for broadcast in broadcasts.iter().filter(|b| b.is_sending()) {
                    println!(
                        "#{} «{}»: {}",
                        broadcast.id,
                        broadcast.title,
                        format::render_progress(broadcast)
                    );
                }
            },
        )
        .await?;
    println!("Активных рассылок нет.");
    for broadcast in &last {
        println!("{}", format::render_broadcast_line(broadcast));
    }
    Ok(())
}

pub async fn users(
    client: &ApiClient,
    config: &Config,
    command: UsersCommand,
    assume_yes: bool,
) -> Result<(), anyhow::Error> {
    match command {
        UsersCommand::List {
            page,
            limit,
            search,
            bot_id,
        } => {
            let query = UserQuery {
                page,
                limit: limit.unwrap_or(config.users_page_size).max(1),
                search,
                bot_id,
            };
            let result = api::users::list(client, &query).await?;
            for user in &result.users {
                println!("{}", format::render_user_line(user));
            }
            let pages = (result.total + query.limit - 1) / query.limit;
            println!(
                "Страница {} из {}, всего пользователей: {}.",
                query.page,
                pages.max(1),
                result.total
            );
        }
        UsersCommand::Delete { id } => {
            if !confirm(&format!("Удалить запись пользователя {}?", id), assume_yes)? {
                println!("Отменено.");
                return Ok(());
            }
            api::users::remove(client, id).await?;
            println!("Запись удалена.");
        }
    }
    Ok(())
}

pub async fn stats(client: &ApiClient, command: StatsCommand) -> Result<(), anyhow::Error> {
    match command {
        StatsCommand::Overview => {
            let overview = api::stats::overview(client).await?;
            println!("Всего пользователей: {}", overview.total_users);
            println!("Новых сегодня:       {}", overview.new_today);
            println!("Новых за неделю:     {}", overview.new_week);
            println!("Активных ботов:      {}", overview.active_bots);
        }
        StatsCommand::Daily { days } => {
            let daily = api::stats::daily(client, days).await?;
            for stat in &daily {
                println!("{} {:>6}", stat.date, stat.count);
            }
        }
    }
    Ok(())
}
