/**
 * ReWear CLI Entry Point
 *
 * Command-line front end for the clothing exchange. Every invocation
 * restores the persisted session first, then runs one command.
 */
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rewear::client::credential_store::SqliteCredentialStore;
use rewear::client::{ApiClient, Config, SessionManager, Theme};
use rewear::shared::marketplace::SwapAction;
use uuid::Uuid;

mod commands;
mod render;

use render::Renderer;

#[derive(Parser)]
#[command(name = "rewear")]
#[command(version)]
#[command(about = "Swap, list and redeem clothing on ReWear")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Backend URL (overrides config file and REWEAR_API_URL)
    #[arg(long, global = true)]
    server: Option<String>,

    /// Color theme: plain, eco or cyber
    #[arg(long, global = true)]
    theme: Option<String>,

    /// Config file (default: <config dir>/rewear/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Credential database (default: <data dir>/rewear/client.db)
    #[arg(long, global = true, value_name = "PATH")]
    state_db: Option<PathBuf>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Sign in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "REWEAR_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account and sign in
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long, env = "REWEAR_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the signed-in user and points balance
    Whoami,

    /// Featured items from the landing page
    Featured,

    /// Browse available items
    Browse {
        #[arg(long, default_value_t = 0)]
        skip: u32,
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },

    /// Items listed by one user
    Closet {
        #[arg(value_name = "USER_ID")]
        user: Uuid,
    },

    /// Show one item, with swap options when signed in
    Show {
        #[arg(value_name = "ITEM_ID")]
        id: Uuid,
    },

    /// List a new item
    List {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// tops, bottoms, dresses, outerwear, shoes or accessories
        #[arg(long)]
        category: String,
        #[arg(long)]
        size: String,
        /// excellent, good, fair or poor
        #[arg(long)]
        condition: String,
        /// Comma-separated tags
        #[arg(long, default_value = "")]
        tags: String,
        /// Points required to redeem
        #[arg(long, default_value_t = 50)]
        points: i64,
        /// Image file to upload (repeatable)
        #[arg(long = "image", value_name = "PATH")]
        images: Vec<PathBuf>,
    },

    /// Request an item, with points or by offering one of your items
    Request {
        #[arg(value_name = "ITEM_ID")]
        item: Uuid,
        /// Redeem with points
        #[arg(long, conflicts_with = "offer")]
        points: bool,
        /// Offer one of your own items
        #[arg(long, value_name = "ITEM_ID")]
        offer: Option<Uuid>,
        #[arg(long)]
        message: Option<String>,
    },

    /// Your items and swap requests
    Dashboard,

    /// Accept a pending request on one of your items
    Accept {
        #[arg(value_name = "SWAP_ID")]
        id: Uuid,
    },

    /// Reject a pending request on one of your items
    Reject {
        #[arg(value_name = "SWAP_ID")]
        id: Uuid,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli).await })
}

fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.as_deref()).context("load config")?;

    if let Some(server) = &cli.server {
        config.set_server_url(server.clone()).context("--server")?;
    }
    if let Some(theme) = &cli.theme {
        config.set_theme(theme.parse::<Theme>().context("--theme")?);
    }
    if let Some(path) = &cli.state_db {
        config.set_state_db(path.clone());
    }
    Ok(config)
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = build_config(&cli)?;
    let renderer = Renderer::new(config.theme());

    let store = SqliteCredentialStore::open(&config.state_db_path())
        .await
        .context("open credential store")?;
    let mut sessions = SessionManager::new(ApiClient::new(config), store);
    sessions.restore().await;

    match cli.command {
        Commands::Login { email, password } => {
            commands::login(&mut sessions, &renderer, &email, &password).await
        }
        Commands::Register {
            email,
            username,
            password,
        } => commands::register(&mut sessions, &renderer, &email, &username, &password).await,
        Commands::Logout => commands::logout(&mut sessions, &renderer).await,
        Commands::Whoami => commands::whoami(&mut sessions, &renderer).await,
        Commands::Featured => commands::featured(&sessions, &renderer).await,
        Commands::Browse { skip, limit } => commands::browse(&sessions, &renderer, skip, limit).await,
        Commands::Closet { user } => commands::closet(&sessions, &renderer, user).await,
        Commands::Show { id } => commands::show(&mut sessions, &renderer, id).await,
        Commands::List {
            title,
            description,
            category,
            size,
            condition,
            tags,
            points,
            images,
        } => {
            let listing = commands::ListingArgs {
                title,
                description,
                category,
                size,
                condition,
                tags,
                points,
                images,
            };
            commands::list_item(&mut sessions, &renderer, listing).await
        }
        Commands::Request {
            item,
            points,
            offer,
            message,
        } => commands::request(&mut sessions, &renderer, item, points, offer, message).await,
        Commands::Dashboard => commands::dashboard(&mut sessions, &renderer).await,
        Commands::Accept { id } => commands::respond(&mut sessions, &renderer, id, SwapAction::Accept).await,
        Commands::Reject { id } => commands::respond(&mut sessions, &renderer, id, SwapAction::Reject).await,
    }
}
