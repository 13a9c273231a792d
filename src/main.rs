use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use watchify::api::{CatalogApi, CatalogClient};
use watchify::config::Config;
use watchify::hero::HeroCarousel;
use watchify::home::{HomePage, ScrollRequest};
use watchify::models::{Category, Title};
use watchify::nav::NavState;
use watchify::session::{Frontend, Session, UiEvent};
use watchify::view::{card_line, card_poster, Screen};

/// Terminal client for the Watchify catalog
#[derive(Parser, Debug)]
#[command(name = "watchify", about = "Browse the Watchify catalog from a terminal")]
struct Args {
    /// Catalog API base URL (overrides WATCHIFY_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load and print the home page
    Home,
    /// Print the full grid for one category (movies, tv-series, anime)
    Browse { category: String },
    /// Search titles by name or genre
    Search { query: String },
    /// Titles similar to the given one
    Recommend {
        name: String,
        #[arg(long)]
        category: Option<String>,
    },
    /// Resolve a stored poster path to its URL
    Poster {
        path: String,
        /// Request the URL and fall back to the placeholder if it fails
        #[arg(long)]
        check: bool,
    },
    /// Show the API status message
    Status,
    /// Ask the API to reload its catalog
    Refresh,
    /// Interactive session reading commands and searches from stdin
    Interactive,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv_result = dotenv();
    init_tracing();
    match dotenv_result {
        Ok(path) => info!("Loaded environment from {:?}", path),
        Err(e) => warn!("No .env file loaded ({}) - relying on environment", e),
    }

    let args = Args::parse();
    let mut config = Config::from_env()?;
    if let Some(url) = args.api_url.as_deref() {
        config = config.with_api_url(url);
    }
    info!("Using catalog API at {}", config.api_base_url);

    let client = CatalogClient::new(&config)?;
    match args.command.unwrap_or(Command::Home) {
        Command::Home => print_page(Arc::new(client), &config, "home").await,
        Command::Browse { category } => {
            if !matches!(category.as_str(), "movies" | "tv-series" | "anime") {
                bail!("Unknown category '{}': use movies, tv-series or anime", category);
            }
            print_page(Arc::new(client), &config, &category).await
        }
        Command::Search { query } => {
            let mut page = HomePage::new(Arc::new(client), &config);
            page.search(&query).await;
            if !page.state().is_searching {
                bail!("Search needs more than two characters");
            }
            print_titles(&page.state().search_results);
            Ok(())
        }
        Command::Recommend { name, category } => {
            let category = category.as_deref().map(Category::parse);
            let titles = client.get_recommendations(&name, category.as_ref()).await?;
            print_titles(&titles);
            Ok(())
        }
        Command::Poster { path, check } => {
            let title = Title {
                poster_path: path,
                ..Default::default()
            };
            let url = client.poster_url(&title.poster_path);
            let failed = check && !client.poster_loads(&url).await;
            println!("{}", card_poster(&client, &title, failed));
            Ok(())
        }
        Command::Status => {
            let status = client.status().await?;
            println!("{} ({})", status.message, status.status);
            println!("Categories: {}", status.categories.join(", "));
            Ok(())
        }
        Command::Refresh => {
            let status = client.refresh().await?;
            if !status.succeeded() {
                bail!("Catalog refresh failed");
            }
            println!("Catalog reloaded");
            Ok(())
        }
        Command::Interactive => run_interactive(Arc::new(client), &config).await,
    }
}

async fn print_page(api: Arc<dyn CatalogApi>, config: &Config, category: &str) -> Result<()> {
    let mut page = HomePage::new(Arc::clone(&api), config);
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    page.load(&mut rng).await;
    page.select_category(category);

    let nav = NavState::default();
    let hero = HeroCarousel::new(page.state().hero_titles().len());
    let screen = Screen {
        state: page.state(),
        nav: &nav,
        hero: &hero,
        api: api.as_ref(),
        section_size: config.section_size,
    };
    print!("{}", screen.render());
    Ok(())
}

fn print_titles(titles: &[Title]) {
    if titles.is_empty() {
        println!("No titles found");
    }
    for (i, title) in titles.iter().enumerate() {
        println!("{:>3}. {}", i + 1, card_line(title));
    }
}

struct TerminalFrontend;

impl Frontend for TerminalFrontend {
    fn present(&mut self, screen: &Screen<'_>) {
        println!("\n{}", "=".repeat(60));
        print!("{}", screen.render());
    }

    fn scroll_to(&mut self, request: &ScrollRequest) {
        match request {
            ScrollRequest::Top => println!("(back to top)"),
            ScrollRequest::Anchor(anchor) => println!("(jumped to #{anchor})"),
        }
    }
}

async fn run_interactive(api: Arc<dyn CatalogApi>, config: &Config) -> Result<()> {
    let (tx, rx) = mpsc::channel(32);

    let stdin_tx = tx.clone();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            match UiEvent::from_line(&line) {
                Some(event) => {
                    if stdin_tx.send(event).await.is_err() {
                        break;
                    }
                }
                None => eprintln!("Unknown command: {line}"),
            }
        }
        let _ = stdin_tx.send(UiEvent::Quit).await;
    });

    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = tx.send(UiEvent::Quit).await;
    });

    let page = HomePage::new(api, config);
    Session::new(page, config).run(rx, TerminalFrontend).await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Shutdown signal received (Ctrl+C)");
        }
        _ = terminate => {
            info!("Shutdown signal received (SIGTERM)");
        }
    }
}
