use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use maud::{html, Markup};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use usernest::api::{ApiClient, LoginRequest, PostQuery, ReactionSymbol, RegisterRequest};
use usernest::auth;
use usernest::binder::{Msg, Patch, PostController};
use usernest::components::{Alert, BaseLayout};
use usernest::config::{Config, LogFormat};
use usernest::feed::{search_posts, FeedFilter, FeedPage, NewPostForm, PostLimit};
use usernest::session::{FileSessionStore, Session, SessionStore};

#[derive(Parser, Debug)]
#[command(name = "usernest", version, about = "Client for the UserNest social posts API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Register a new account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Render the post feed
    Feed {
        /// Only show posts matching this text
        #[arg(long)]
        search: Option<String>,
        /// Number of posts to show, or "all"
        #[arg(long, default_value = "all")]
        limit: PostLimit,
        /// Tag to filter by, or "all"
        #[arg(long, default_value = "all")]
        tag: String,
        /// Only show active posts
        #[arg(long)]
        active: bool,
        /// Write the page here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Render a single post
    Post {
        id: u64,
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Create a post
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        body: String,
        /// Space-separated tags
        #[arg(long, default_value = "")]
        tags: String,
        #[arg(long, default_value = "")]
        media: String,
    },
    /// Comment on a post
    Comment {
        id: u64,
        text: String,
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// React to a post with an emoji or its name (thumbsup, heart, smile, wow, thumbsdown)
    React {
        id: u64,
        symbol: String,
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Delete one of your posts
    Delete { id: u64 },
    /// Edit the title and body of one of your posts
    Update {
        id: u64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

#[allow(clippy::too_many_lines)]
async fn run() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging before config so config errors are reported
    init_tracing(LogFormat::from_env_or_default())?;

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    info!(api_base_url = %config.api_base_url, "Configuration loaded");

    let store = FileSessionStore::new(config.session_path.clone());
    let session = store.load().await.context("Failed to load session")?;
    let api = ApiClient::new(&config)
        .context("Failed to create API client")?
        .with_session(session.clone());

    match cli.command {
        Command::Login { email, password } => {
            let session = auth::login(&api, &store, &LoginRequest { email, password })
                .await
                .context("Login failed")?;
            info!(email = ?session.email(), path = %store.path().display(), "Session stored");
        }
        Command::Register {
            name,
            email,
            password,
        } => {
            let profile = auth::register(
                &api,
                &RegisterRequest {
                    name,
                    email,
                    password,
                },
            )
            .await
            .context("Registration failed")?;
            info!(name = %profile.name, email = %profile.email, "Account created, log in to continue");
        }
        Command::Logout => auth::logout(&store).await.context("Logout failed")?,
        Command::Feed {
            search,
            limit,
            tag,
            active,
            out,
        } => {
            let filter = FeedFilter::new(&tag, active);
            let posts = api
                .list_posts(&filter.to_query())
                .await
                .context("Failed to fetch posts")?;
            let found = match search.as_deref() {
                Some(query) => search_posts(&posts, query),
                None => posts.iter().collect(),
            };
            let shown = limit.apply(&found).to_vec();
            info!(total = posts.len(), shown = shown.len(), "Feed loaded");

            let page = FeedPage::new(shown).with_viewer(session.email()).render();
            write_output(out, &page).await?;
        }
        Command::Post { id, out } => {
            let controller = load_controller(&api, &session, id).await?;
            write_output(out, &post_page(&controller, &session, &[])).await?;
        }
        Command::Create {
            title,
            body,
            tags,
            media,
        } => {
            let request = NewPostForm {
                title,
                body,
                tags,
                media,
            }
            .into_request();
            let post = api
                .create_post(&request)
                .await
                .context("Failed to create post")?;
            info!(post_id = post.id, "Post created successfully!");
        }
        Command::Comment { id, text, out } => {
            let mut controller = load_controller(&api, &session, id).await?;
            let patches = controller.dispatch(&api, Msg::SubmitComment(text)).await;
            write_output(out, &post_page(&controller, &session, &patches)).await?;
            report(&patches)?;
        }
        Command::React { id, symbol, out } => {
            let Some(symbol) = ReactionSymbol::parse(&symbol) else {
                bail!("Unknown reaction '{symbol}'");
            };
            let mut controller = load_controller(&api, &session, id).await?;
            let patches = controller.dispatch(&api, Msg::React(symbol)).await;
            write_output(out, &post_page(&controller, &session, &patches)).await?;
            report(&patches)?;
        }
        Command::Delete { id } => {
            let mut controller = load_controller(&api, &session, id).await?;
            if !controller.is_owner() {
                bail!("Post {id} belongs to someone else");
            }
            let patches = controller.dispatch(&api, Msg::Delete).await;
            report(&patches)?;
        }
        Command::Update {
            id,
            title,
            body,
            out,
        } => {
            let mut controller = load_controller(&api, &session, id).await?;
            if !controller.is_owner() {
                bail!("Post {id} belongs to someone else");
            }
            let mut patches = controller.dispatch(&api, Msg::OpenEdit).await;
            patches.extend(controller.dispatch(&api, Msg::SubmitEdit { title, body }).await);
            write_output(out, &post_page(&controller, &session, &patches)).await?;
            report(&patches)?;
        }
    }

    Ok(())
}

async fn load_controller(api: &ApiClient, session: &Session, id: u64) -> Result<PostController> {
    let post = api
        .get_post(id, &PostQuery::full())
        .await
        .with_context(|| format!("Failed to fetch post {id}"))?;
    PostController::new(post, session).context("Log in first")
}

/// The post page, with the outcome of the last command shown above the post.
fn post_page(controller: &PostController, session: &Session, patches: &[Patch]) -> Markup {
    let content = html! {
        @for patch in patches {
            @match patch {
                Patch::Alert(message) => { (Alert::error(message)) }
                Patch::Notice(message) => { (Alert::success(message)) }
                _ => {}
            }
        }
        (controller.render())
    };
    BaseLayout::new(&controller.post().title)
        .with_viewer(session.email())
        .render(content)
}

/// Log user-facing patches; an alert fails the command.
fn report(patches: &[Patch]) -> Result<()> {
    for patch in patches {
        match patch {
            Patch::Notice(message) => info!("{message}"),
            Patch::Alert(message) => {
                warn!("{message}");
                bail!("{message}");
            }
            _ => {}
        }
    }
    Ok(())
}

async fn write_output(out: Option<PathBuf>, page: &Markup) -> Result<()> {
    match out {
        Some(path) => {
            tokio::fs::write(&path, page.0.as_bytes())
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "Page written");
        }
        None => println!("{}", page.0),
    }
    Ok(())
}

fn init_tracing(format: LogFormat) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,usernest=debug"));

    // Logs go to stderr; stdout carries rendered pages
    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?,
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?,
    }

    Ok(())
}
