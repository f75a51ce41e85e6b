use std::process;

use anyhow::{Result, anyhow, bail};
use clap::{Parser, Subcommand};
use igpost_client::view::{PostCard, format_date};
use igpost_client::{
    ApiError, CarouselApi, CarouselDraft, CarouselPost, DEFAULT_BASE_URL, DraftField,
    FailureCause, HttpClient, ListFilters, NotificationKind, PostListStore, PostStatus, PostType,
    SubmissionFlow, SubmitOutcome, validate_carousel,
};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

const SERVER_ENV: &str = "IGPOST_API_URL";

#[derive(Debug, Parser)]
#[command(name = "igpost-cli", version, about = "CLI для demo API постов Instagram")]
struct Cli {
    /// Адрес сервера; без флага берётся из IGPOST_API_URL.
    #[arg(long, global = true)]
    server: Option<String>,

    /// Подробный лог в stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Список постов.
    List {
        #[arg(long)]
        status: Option<PostStatus>,
        #[arg(long)]
        post_type: Option<PostType>,
    },
    /// Создание поста через ту же форму, что и в дашборде.
    ///
    /// Тип не разбирается clap'ом: неверное значение покажет ошибку поля формы.
    Create {
        #[arg(long)]
        text_prompt: String,
        #[arg(long, default_value = "photo")]
        post_type: String,
        /// RFC 3339 или `YYYY-MM-DDTHH:MM`.
        #[arg(long)]
        scheduled_time: Option<String>,
    },
    /// Создание карусели из 5-7 изображений.
    Carousel {
        #[arg(long)]
        text_prompt: String,
        #[arg(long, default_value_t = 5)]
        images: u8,
        /// Сразу пометить карусель как готовую.
        #[arg(long)]
        ready: bool,
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
    init_logging(cli.verbose)?;

    let server = resolve_server(cli.server, std::env::var(SERVER_ENV).ok());
    debug!(%server, "using API server");
    let client = HttpClient::new(server)?;

    match cli.command {
        Command::List { status, post_type } => {
            let filters = ListFilters {
                status,
                post_type,
            };
            let mut store = PostListStore::new();
            store.set_filters(filters);
            store.refresh(&client).await.map_err(map_api_error)?;
            print_list(&store);
        }
        Command::Create {
            text_prompt,
            post_type,
            scheduled_time,
        } => {
            let mut flow = SubmissionFlow::default();
            flow.set_field(DraftField::TextPrompt, text_prompt);
            flow.set_field(DraftField::PostType, post_type);
            flow.set_field(DraftField::ScheduledTime, scheduled_time.unwrap_or_default());

            let outcome = flow.submit(&client).await;
            for notification in flow.take_notifications() {
                match notification.kind {
                    NotificationKind::Success => println!("{}", notification.text),
                    NotificationKind::Error => eprintln!("{}", notification.text),
                }
            }

            match outcome {
                SubmitOutcome::Created { post, refresh } => {
                    print_card(&PostCard::from(&post));
                    if refresh.is_ok() {
                        print_list(flow.posts());
                    }
                }
                SubmitOutcome::Invalid(errors) => {
                    for (field, message) in &errors {
                        eprintln!("  {field}: {message}");
                    }
                    bail!("форма заполнена с ошибками");
                }
                SubmitOutcome::Failed(err) => return Err(map_api_error(err)),
                SubmitOutcome::Ignored => bail!("предыдущая отправка ещё не завершена"),
            }
        }
        Command::Carousel {
            text_prompt,
            images,
            ready,
        } => {
            let request = validate_carousel(&CarouselDraft {
                text_prompt,
                number_of_images: images,
                ready,
            })?;
            let post = client
                .create_carousel_post(&request)
                .await
                .map_err(map_api_error)?;
            print_carousel(&post);
        }
    }

    Ok(())
}

/// Лог идёт в stderr, чтобы не смешиваться с выводом команд.
fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow!("failed to init logging: {err}"))
}

fn resolve_server(flag: Option<String>, env: Option<String>) -> String {
    let raw = flag
        .or(env)
        .map(|server| server.trim().to_string())
        .filter(|server| !server.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    normalize_server(raw)
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn map_api_error(err: ApiError) -> anyhow::Error {
    let message = match err.cause() {
        FailureCause::Network => format!("сервер недоступен: {}", err.message()),
        FailureCause::Server { status } => format!("ошибка сервера ({status}): {}", err.message()),
        FailureCause::Format { status } => {
            format!("неожиданный ответ сервера ({status}): {}", err.message())
        }
    };
    anyhow!(message)
}

fn print_card(card: &PostCard) {
    println!(
        "- [{}] {} #{}: {}",
        card.badge.label, card.type_label, card.key, card.title
    );
    if let Some(caption) = &card.caption {
        println!("    {caption}");
    }
    if let Some(created) = &card.created {
        println!("    {created}");
    }
    if let Some(scheduled) = &card.scheduled {
        println!("    {scheduled}");
    }
    if let Some(url) = &card.preview_url {
        println!("    {url}");
    }
}

fn carousel_lines(post: &CarouselPost) -> Vec<String> {
    vec![
        "Карусель создана".to_string(),
        format!("id: {}", post.id),
        format!("text_prompt: {}", post.text_prompt),
        format!("number_of_images: {}", post.number_of_images),
        format!("status: {}", post.status.as_str()),
        format!("created: {}", format_date(post.created_at)),
    ]
}

fn print_carousel(post: &CarouselPost) {
    for line in carousel_lines(post) {
        println!("{line}");
    }
}

fn print_list(store: &PostListStore) {
    println!("Постов: {}", store.len());
    for post in store.posts() {
        print_card(&PostCard::from(post));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_server_keeps_scheme() {
        let s = normalize_server("https://example.com:8000".to_string());
        assert_eq!(s, "https://example.com:8000");
    }

    #[test]
    fn normalize_server_adds_http_scheme() {
        let s = normalize_server("127.0.0.1:8000".to_string());
        assert_eq!(s, "http://127.0.0.1:8000");
    }

    #[test]
    fn resolve_server_defaults_to_local_demo() {
        assert_eq!(resolve_server(None, None), DEFAULT_BASE_URL);
        assert_eq!(
            resolve_server(None, Some("   ".to_string())),
            DEFAULT_BASE_URL
        );
    }

    #[test]
    fn resolve_server_prefers_flag_over_env() {
        let server = resolve_server(
            Some("localhost:9000".to_string()),
            Some("http://env:8000".to_string()),
        );
        assert_eq!(server, "http://localhost:9000");

        let server = resolve_server(None, Some("http://env:8000".to_string()));
        assert_eq!(server, "http://env:8000");
    }

    #[test]
    fn cli_parses_create_with_defaults() {
        let cli = Cli::try_parse_from(["igpost-cli", "create", "--text-prompt", "Hello"])
            .expect("must parse");
        match cli.command {
            Command::Create {
                text_prompt,
                post_type,
                scheduled_time,
            } => {
                assert_eq!(text_prompt, "Hello");
                assert_eq!(post_type, "photo");
                assert!(scheduled_time.is_none());
            }
            other => panic!("expected create, got {other:?}"),
        }
    }

    #[test]
    fn cli_parses_list_filters() {
        let cli = Cli::try_parse_from([
            "igpost-cli",
            "--server",
            "localhost:8000",
            "list",
            "--status",
            "ready",
            "--post-type",
            "reel",
        ])
        .expect("must parse");
        assert_eq!(cli.server.as_deref(), Some("localhost:8000"));
        match cli.command {
            Command::List { status, post_type } => {
                assert_eq!(status, Some(PostStatus::Ready));
                assert_eq!(post_type, Some(PostType::Reel));
            }
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn unknown_status_filter_is_rejected_by_parser() {
        let err = Cli::try_parse_from(["igpost-cli", "list", "--status", "archived"])
            .expect_err("must fail");
        assert!(err.to_string().contains("archived"));
    }

    #[test]
    fn carousel_summary_uses_compact_date() {
        let post: CarouselPost = serde_json::from_value(serde_json::json!({
            "id": 4,
            "text_prompt": "city",
            "number_of_images": 6,
            "status": "Not Ready",
            "created_at": "2026-10-16T09:05:00Z"
        }))
        .expect("carousel must parse");

        let lines = carousel_lines(&post);
        assert!(lines.contains(&"status: Not Ready".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("created: Oct 16, 2026"));
    }

    #[test]
    fn api_errors_keep_server_message() {
        let err = ApiError::server(
            igpost_client::ApiOperation::CreatePost,
            500,
            igpost_client::ErrorBody::parse(r#"{"message":"boom"}"#).as_ref(),
        );
        let mapped = map_api_error(err).to_string();
        assert!(mapped.contains("500"));
        assert!(mapped.contains("boom"));
    }
}
