use std::fs;
use std::io;
use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use feed_client::{FeedClient, FeedClientError, Post};
use feed_core::{Pager, Settled, VirtualSeq, time_ago_now};

const SESSION_FILE: &str = ".feed_session";
const DEFAULT_SERVER: &str = "http://127.0.0.1:8080";

#[derive(Debug, Parser)]
#[command(name = "feed-cli", version, about = "CLI клиент для ленты pill.city через feed-server")]
struct Cli {
    /// Адрес feed-server (по умолчанию FEED_SERVER или http://127.0.0.1:8080).
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Вход; cookie сессии сохраняется в .feed_session.
    Login {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        password: String,
    },
    /// Выход и удаление сохранённой сессии.
    Logout,
    /// Загрузка ленты страницами по курсору.
    Feed {
        /// Сколько страниц загрузить.
        #[arg(long, default_value_t = 1)]
        pages: usize,
        /// С какого поста (по порядку) начинать вывод.
        #[arg(long, default_value_t = 0)]
        offset: usize,
        /// Сколько постов вывести.
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let server = resolve_server(cli.server, std::env::var("FEED_SERVER").ok());
    let client = FeedClient::new(&server).map_err(map_client_error)?;

    if let Some(cookie) = load_session().context("не удалось прочитать .feed_session")? {
        client.restore_session(&cookie).map_err(map_client_error)?;
    }

    match cli.command {
        Command::Login { user_id, password } => {
            client
                .login(&user_id, &password)
                .await
                .map_err(map_client_error)?;
            persist_session(&client).context("не удалось сохранить сессию")?;
            println!("Вход выполнен: {user_id}");
        }
        Command::Logout => {
            client.logout().await.map_err(map_client_error)?;
            clear_session().context("не удалось удалить .feed_session")?;
            println!("Выход выполнен");
        }
        Command::Feed {
            pages,
            offset,
            limit,
        } => {
            let pager = load_pages(&client, pages).await?;
            let view = select(pager.view(), offset, limit);
            print_feed(&view, pager.is_exhausted());
        }
    }

    Ok(())
}

async fn load_pages(client: &FeedClient, pages: usize) -> Result<Pager<Post>> {
    let mut pager = Pager::new();
    for _ in 0..pages {
        match pager.load_next(client).await {
            Some(Settled::Appended { .. }) => {}
            Some(Settled::Failed(err)) => return Err(map_client_error(err)),
            Some(Settled::Exhausted | Settled::Discarded) | None => break,
        }
    }
    Ok(pager)
}

fn select(view: VirtualSeq<'_, Post>, offset: usize, limit: Option<usize>) -> VirtualSeq<'_, Post> {
    let offset = offset.min(view.len());
    let end = limit.map(|limit| offset.saturating_add(limit).min(view.len()));
    view.slice(offset, end)
}

fn resolve_server(flag: Option<String>, env: Option<String>) -> String {
    let raw = flag
        .or(env)
        .filter(|server| !server.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SERVER.to_string());
    normalize_server(raw.trim().to_string())
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn parse_session_content(raw: &str) -> Option<String> {
    let cookie = raw.trim();
    if !cookie.starts_with("session=") || cookie.len() == "session=".len() {
        return None;
    }
    Some(cookie.to_string())
}

fn load_session() -> io::Result<Option<String>> {
    if !Path::new(SESSION_FILE).exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(SESSION_FILE)?;
    Ok(parse_session_content(&raw))
}

fn persist_session(client: &FeedClient) -> io::Result<()> {
    if let Some(cookie) = client.session_cookie() {
        fs::write(SESSION_FILE, cookie)?;
    }
    Ok(())
}

fn clear_session() -> io::Result<()> {
    match fs::remove_file(SESSION_FILE) {
        Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
        _ => Ok(()),
    }
}

fn map_client_error(err: FeedClientError) -> anyhow::Error {
    let message = match err {
        FeedClientError::Unauthorized => {
            "требуется авторизация: выполните `feed-cli login --user-id ... --password ...`"
                .to_string()
        }
        FeedClientError::Api { code, message } => format!("сервер вернул код {code}: {message}"),
        FeedClientError::InvalidRequest(message) => format!("некорректный запрос: {message}"),
        FeedClientError::Http(err) => format!("ошибка HTTP: {err}"),
    };
    anyhow::anyhow!(message)
}

fn format_post(post: &Post) -> String {
    let mut line = format!(
        "- [{}] @{} · {}\n  avatar: {}\n  {}",
        post.id,
        post.author.id,
        time_ago_now(post.created_at_seconds),
        post.avatar_or_default(),
        post.content
    );
    if !post.media_urls.is_empty() {
        line.push_str(&format!("\n  media: {}", post.media_urls.join(", ")));
    }
    line
}

fn print_feed(view: &VirtualSeq<'_, Post>, exhausted: bool) {
    println!("Постов: {}", view.len());
    for post in view {
        println!("{}", format_post(post));
    }
    if exhausted {
        println!("Лента закончилась");
    }
}
