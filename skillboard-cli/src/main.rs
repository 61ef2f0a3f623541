use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use skillboard_client::{BoardClient, BoardClientError, Post, PostPayload, Suggestion};

const DEFAULT_HTTP_SERVER: &str = "http://127.0.0.1:3000";

#[derive(Debug, Parser)]
#[command(name = "skillboard-cli", version, about = "CLI клиент для skillboard-server")]
struct Cli {
    /// Адрес сервера; иначе SKILLBOARD_HTTP_URL, затем локальный адрес по умолчанию.
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Список всех постов, новые первыми.
    List,
    /// Получение поста по id.
    Get {
        #[arg(long)]
        id: i64,
    },
    /// Поиск по заголовку, описанию и категории. Без --query выводит все посты.
    Search {
        #[arg(long)]
        query: Option<String>,
    },
    /// Подсказки живого поиска (только заголовок и категория, не больше 10).
    Suggest {
        #[arg(long)]
        query: String,
    },
    /// Посты, категория которых содержит указанный текст.
    Category {
        #[arg(long)]
        name: String,
    },
    /// Создание поста.
    Create {
        #[arg(long)]
        title: String,
        /// `request` или `offer`.
        #[arg(long = "type")]
        kind: String,
        /// По умолчанию сервер ставит `other`.
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        description: String,
    },
    /// Обновление поста.
    ///
    /// Неуказанные поля сохраняют текущие значения.
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Удаление поста.
    Delete {
        #[arg(long)]
        id: i64,
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

    let server = resolve_server(cli.server, std::env::var("SKILLBOARD_HTTP_URL").ok());
    let client = BoardClient::new(server).map_err(map_client_error)?;

    match cli.command {
        Command::List => {
            let posts = client.list_posts().await.map_err(map_client_error)?;
            print_posts(&posts);
        }
        Command::Get { id } => {
            let post = client.get_post(id).await.map_err(map_client_error)?;
            print_post("Post", &post);
        }
        Command::Search { query } => {
            let posts = client
                .search_posts(query.as_deref())
                .await
                .map_err(map_client_error)?;
            print_posts(&posts);
        }
        Command::Suggest { query } => {
            let suggestions = client.suggest(&query).await.map_err(map_client_error)?;
            print_suggestions(&suggestions);
        }
        Command::Category { name } => {
            let posts = client
                .posts_by_category(&name)
                .await
                .map_err(map_client_error)?;
            print_posts(&posts);
        }
        Command::Create {
            title,
            kind,
            category,
            description,
        } => {
            let payload = PostPayload {
                title,
                kind,
                category,
                description,
            };
            let post = client
                .create_post(&payload)
                .await
                .map_err(map_client_error)?;
            print_post("Post created", &post);
        }
        Command::Update {
            id,
            title,
            kind,
            category,
            description,
        } => {
            let current = client.get_post(id).await.map_err(map_client_error)?;
            let payload = merge_update(&current, title, kind, category, description);

            let post = client
                .update_post(id, &payload)
                .await
                .map_err(map_client_error)?;
            print_post("Post updated", &post);
        }
        Command::Delete { id } => {
            client.delete_post(id).await.map_err(map_client_error)?;
            println!("Post deleted: id={id}");
        }
    }

    Ok(())
}

fn resolve_server(flag: Option<String>, env: Option<String>) -> String {
    let raw = flag
        .or(env)
        .filter(|server| !server.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_HTTP_SERVER.to_string());
    normalize_server(raw.trim().to_string())
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn merge_update(
    current: &Post,
    title: Option<String>,
    kind: Option<String>,
    category: Option<String>,
    description: Option<String>,
) -> PostPayload {
    let base = PostPayload::from(current);
    PostPayload {
        title: title.unwrap_or(base.title),
        kind: kind.unwrap_or(base.kind),
        category: category.or(base.category),
        description: description.unwrap_or(base.description),
    }
}

fn map_client_error(err: BoardClientError) -> anyhow::Error {
    let message = match err {
        BoardClientError::NotFound => "post not found".to_string(),
        BoardClientError::InvalidRequest(message) => format!("invalid request: {message}"),
        BoardClientError::Server(message) => format!("server error: {message}"),
        BoardClientError::Http(err) => format!("HTTP error: {err}"),
    };
    anyhow::anyhow!(message)
}

fn print_post(heading: &str, post: &Post) {
    println!("{heading}");
    println!("id: {}", post.id);
    println!("title: {}", post.title);
    println!("type: {}", post.kind);
    println!("category: {}", post.category);
    println!("description: {}", post.description);
    println!("color: {}", post.color);
    println!("created_at: {}", post.created_at);
}

fn print_posts(posts: &[Post]) {
    println!("Posts: {}", posts.len());

    for post in posts {
        println!(
            "- [{}] {} ({} / {})",
            post.id, post.title, post.kind, post.category
        );
    }
}

fn print_suggestions(suggestions: &[Suggestion]) {
    println!("Suggestions: {}", suggestions.len());

    for suggestion in suggestions {
        println!("- {} [{}]", suggestion.title, suggestion.category);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> Post {
        Post {
            id: 3,
            title: "Need calculus help".to_string(),
            kind: "request".to_string(),
            category: "math".to_string(),
            description: "Struggling with derivatives".to_string(),
            color: "hsl(10, 96%, 97%)".to_string(),
            created_at: Default::default(),
        }
    }

    #[test]
    fn normalize_server_keeps_scheme() {
        let s = normalize_server("https://example.com:3000".to_string());
        assert_eq!(s, "https://example.com:3000");
    }

    #[test]
    fn normalize_server_adds_http_scheme() {
        let s = normalize_server("127.0.0.1:3000".to_string());
        assert_eq!(s, "http://127.0.0.1:3000");
    }

    #[test]
    fn resolve_server_prefers_flag_then_env_then_default() {
        assert_eq!(
            resolve_server(Some("localhost:9999".into()), Some("http://env:1".into())),
            "http://localhost:9999"
        );
        assert_eq!(resolve_server(None, Some("http://env:1".into())), "http://env:1");
        assert_eq!(resolve_server(None, None), DEFAULT_HTTP_SERVER);
        assert_eq!(resolve_server(Some("  ".into()), None), DEFAULT_HTTP_SERVER);
    }

    #[test]
    fn merge_update_keeps_unspecified_fields() {
        let current = sample_post();
        let payload = merge_update(&current, Some("Need calc help NOW".into()), None, None, None);

        assert_eq!(payload.title, "Need calc help NOW");
        assert_eq!(payload.kind, "request");
        assert_eq!(payload.category.as_deref(), Some("math"));
        assert_eq!(payload.description, "Struggling with derivatives");
    }

    #[test]
    fn not_found_maps_to_readable_message() {
        let err = map_client_error(BoardClientError::NotFound);
        assert_eq!(err.to_string(), "post not found");
    }

    #[test]
    fn cli_parses_update_with_partial_fields() {
        let cli = Cli::try_parse_from(["skillboard-cli", "update", "--id", "4", "--type", "offer"])
            .expect("arguments must parse");
        match cli.command {
            Command::Update { id, kind, title, .. } => {
                assert_eq!(id, 4);
                assert_eq!(kind.as_deref(), Some("offer"));
                assert!(title.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
