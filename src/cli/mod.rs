//! Командная строка консоли администратора.

mod commands;
pub mod format;

use crate::client::ApiClient;
use crate::config::Config;
use crate::session::{AuthState, SessionStore};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(
    name = "botforge-admin",
    about = "Консоль администратора платформы BotForge",
    version
)]
pub struct Cli {
    /// Путь к TOML-конфигу
    #[arg(long, default_value = "/etc/botforge-admin.toml")]
    pub config: PathBuf,
    /// Не спрашивать подтверждения разрушительных операций
    #[arg(long, global = true)]
    pub yes: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Вход в панель: получает и сохраняет токен
    Login {
        username: String,
        /// Пароль; если не задан, будет запрошен со stdin
        #[arg(long)]
        password: Option<String>,
    },
    /// Сброс сессии
    Logout,
    /// Имя текущего администратора
    Whoami,
    /// Управление ботами
    #[command(subcommand)]
    Bots(BotsCommand),
    /// Рассылки
    #[command(subcommand)]
    Broadcast(BroadcastCommand),
    /// Пользователи ботов
    #[command(subcommand)]
    Users(UsersCommand),
    /// Статистика платформы
    #[command(subcommand)]
    Stats(StatsCommand),
}

#[derive(Debug, Subcommand)]
pub enum BotsCommand {
    /// Список ботов в порядке отображения
    List,
    /// Карточка бота
    Show { id: i64 },
    /// Регистрация бота по имени и токену BotFather
    Add { name: String, token: String },
    /// Переименование бота
    Rename { id: i64, name: String },
    /// Запуск бота
    Start { id: i64 },
    /// Остановка бота
    Stop { id: i64 },
    /// Удаление бота
    Delete { id: i64 },
    /// Новый порядок отображения: все id через пробел
    Reorder { ids: Vec<i64> },
    /// Приветственные шаблоны бота
    #[command(subcommand)]
    Messages(MessagesCommand),
}

#[derive(Debug, Subcommand)]
pub enum MessagesCommand {
    /// Шаблоны по языкам
    List { bot_id: i64 },
    /// Создаёт или обновляет шаблон для языка
    Set {
        bot_id: i64,
        language_code: String,
        text: String,
        /// Inline-кнопка в формате «текст|url», можно несколько
        #[arg(long = "button")]
        buttons: Vec<String>,
    },
    /// Удаляет шаблон
    Delete { bot_id: i64, message_id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum BroadcastCommand {
    /// Список рассылок
    List,
    /// Карточка рассылки
    Show { id: i64 },
    /// Создаёт черновик рассылки
    Create {
        title: String,
        text: String,
        /// id целевого бота, можно несколько
        #[arg(long = "bot", required = true)]
        bots: Vec<i64>,
        /// Inline-кнопка в формате «текст|url», можно несколько
        #[arg(long = "button")]
        buttons: Vec<String>,
    },
    /// Запускает черновик
    Start { id: i64 },
    /// Отменяет активную рассылку
    Cancel { id: i64 },
    /// Следит за прогрессом, пока есть активные рассылки
    Watch,
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// Страница пользователей
    List {
        #[arg(long, default_value_t = 1)]
        page: i64,
        /// Размер страницы; по умолчанию из конфига
        #[arg(long)]
        limit: Option<i64>,
        /// Поиск по username и имени
        #[arg(long)]
        search: Option<String>,
        /// Только пользователи конкретного бота
        #[arg(long)]
        bot_id: Option<i64>,
    },
    /// Удаляет запись пользователя
    Delete { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum StatsCommand {
    /// Сводные счётчики
    Overview,
    /// Новые пользователи по дням
    Daily {
        #[arg(long, default_value_t = 30)]
        days: u32,
    },
}

pub async fn run() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    tracing::debug!(
        api_url = %config.api_url,
        token_path = %config.token_path.display(),
        "Configuration loaded"
    );

    let session = Arc::new(SessionStore::new(&config.token_path));
    let client = ApiClient::new(config.api_url.as_str(), session.clone()).with_on_unauthorized(|| {
        eprintln!("Сессия истекла. Выполните `botforge-admin login`.");
    });

    // Аналог checkAuth при старте панели: без валидного токена любая
    // команда, кроме входа и выхода, не имеет смысла.
    if !matches!(cli.command, Command::Login { .. } | Command::Logout)
        && session.check() == AuthState::Unauthenticated
    {
        anyhow::bail!("Нет активной сессии. Выполните `botforge-admin login <username>`.");
    }

    match cli.command {
        Command::Login { username, password } => {
            commands::login(&client, &username, password).await
        }
        Command::Logout => {
            session.logout();
            println!("Сессия сброшена.");
            Ok(())
        }
        Command::Whoami => commands::whoami(&client).await,
        Command::Bots(command) => commands::bots(&client, command, cli.yes).await,
        Command::Broadcast(command) => {
            commands::broadcast(&client, &config, command, cli.yes).await
        }
        Command::Users(command) => commands::users(&client, &config, command, cli.yes).await,
        Command::Stats(command) => commands::stats(&client, command).await,
    }
}
