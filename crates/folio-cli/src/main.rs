mod config;
mod feed;
mod render;
mod server;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::Timelike;
use clap::{Parser, Subcommand};
use folio_core::{FeedPanel, FeedState, Field, Page, ProjectManager, Theme, Transition, ViewMode};
use folio_store::PrefStore;

use crate::config::FolioConfig;
use crate::feed::GitHubFeed;

#[derive(Parser)]
#[command(name = "folio", about = "Portfolio page engine: projects, preferences, feed and contact")]
struct Cli {
    /// Project catalog (TOML) to use instead of the configured one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List projects with the given filter and sort
    Projects {
        /// Category to show, or "all"
        #[arg(long)]
        filter: Option<String>,

        /// newest, oldest or name
        #[arg(long)]
        sort: Option<String>,

        /// Switch layout (grid or list) before listing
        #[arg(long)]
        view: Option<String>,
    },

    /// Set and persist the project layout
    View {
        /// grid or list
        mode: String,
    },

    /// Toggle the colour theme, or set it explicitly
    Theme {
        /// light or dark; toggles when omitted
        mode: Option<String>,
    },

    /// Print the greeting and visit count
    Greet,

    /// List stored preferences, or remove one
    Prefs {
        /// Preference key to remove (e.g. projectView, theme)
        #[arg(long)]
        unset: Option<String>,
    },

    /// Fetch the most recently updated public repositories
    Repos {
        /// Account to list instead of the configured one
        #[arg(long)]
        user: Option<String>,

        /// API base URL
        #[arg(long)]
        api_base: Option<String>,
    },

    /// Validate and send a contact message
    Contact {
        #[arg(long, default_value = "")]
        name: String,

        #[arg(long, default_value = "")]
        email: String,

        #[arg(long, default_value = "")]
        message: String,
    },

    /// Serve the page over HTTP
    Serve {
        /// Address to bind, e.g. 127.0.0.1:8080
        #[arg(long)]
        bind: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn load_config() -> Result<FolioConfig> {
    FolioConfig::load(&folio_store::data_dir()).context("failed to load configuration")
}

fn open_page(cli: &Cli, config: &FolioConfig) -> Result<Page<PrefStore>> {
    let catalog = config.load_catalog(cli.catalog.as_deref())?;
    tracing::debug!("catalog has {} projects", catalog.len());
    let store = PrefStore::open_default().context("failed to open preference store")?;
    Ok(Page::boot(catalog, store, config.transition.timing()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = load_config()?;

    match &cli.command {
        Commands::Projects { filter, sort, view } => {
            cmd_projects(&cli, &config, filter.as_deref(), sort.as_deref(), view.as_deref()).await
        }
        Commands::View { mode } => cmd_view(&cli, &config, mode),
        Commands::Theme { mode } => cmd_theme(&cli, &config, mode.as_deref()),
        Commands::Greet => cmd_greet(&cli, &config),
        Commands::Prefs { unset } => cmd_prefs(unset.as_deref()),
        Commands::Repos { user, api_base } => {
            cmd_repos(config, user.as_deref(), api_base.as_deref()).await
        }
        Commands::Contact {
            name,
            email,
            message,
        } => cmd_contact(&cli, &config, name, email, message).await,
        Commands::Serve { bind } => cmd_serve(&cli, config, bind.as_deref()).await,
    }
}

fn parse_view(mode: &str) -> Result<ViewMode> {
    match ViewMode::parse(mode) {
        Some(mode) => Ok(mode),
        None => bail!("unknown view mode '{mode}' (expected grid or list)"),
    }
}

/// Wait out the leaving phase, then settle.
async fn play(manager: &mut ProjectManager, transition: Transition) {
    tokio::time::sleep(transition.delay()).await;
    manager.settle(&transition);
}

fn print_projects(manager: &ProjectManager) {
    let state = manager.state();
    println!(
        "filter: {}  sort: {}  view: {}",
        state.filter, state.sort, state.view
    );

    let visible = manager.visible_records();
    if visible.is_empty() {
        println!("No projects found");
        return;
    }
    for (position, record) in visible.iter().enumerate() {
        println!(
            "{:>2}. {} [{}] {}",
            position + 1,
            record.name,
            record.category,
            record.date
        );
    }
}

async fn cmd_projects(
    cli: &Cli,
    config: &FolioConfig,
    filter: Option<&str>,
    sort: Option<&str>,
    view: Option<&str>,
) -> Result<()> {
    let mut page = open_page(cli, config)?;

    if let Some(view) = view {
        page.set_view(parse_view(view)?);
    }
    if let Some(filter) = filter {
        let transition = page.projects.set_filter(filter);
        play(&mut page.projects, transition).await;
    }
    if let Some(sort) = sort {
        let transition = page.projects.set_sort(sort);
        play(&mut page.projects, transition).await;
    }

    print_projects(&page.projects);
    Ok(())
}

fn cmd_view(cli: &Cli, config: &FolioConfig, mode: &str) -> Result<()> {
    let mode = parse_view(mode)?;
    let mut page = open_page(cli, config)?;
    if page.set_view(mode) {
        println!("view: {mode}");
    } else {
        println!("view: {mode} (unchanged)");
    }
    Ok(())
}

fn cmd_theme(cli: &Cli, config: &FolioConfig, mode: Option<&str>) -> Result<()> {
    let mut page = open_page(cli, config)?;
    let theme = match mode {
        None => page.toggle_theme(),
        Some(value) => match Theme::parse(value) {
            Some(theme) => page.set_theme(theme),
            None => bail!("unknown theme '{value}' (expected light or dark)"),
        },
    };
    println!("theme: {} {}", theme.as_str(), theme.icon());
    Ok(())
}

fn cmd_greet(cli: &Cli, config: &FolioConfig) -> Result<()> {
    let page = open_page(cli, config)?;
    println!("{}", page.greeting(chrono::Local::now().hour()));
    println!("visit #{}", page.visits.visits());
    Ok(())
}

fn cmd_prefs(unset: Option<&str>) -> Result<()> {
    let store = PrefStore::open_default().context("failed to open preference store")?;

    if let Some(key) = unset {
        if store.remove_pref(key).context("failed to remove preference")? {
            println!("removed {key}");
        } else {
            println!("{key} is not set");
        }
        return Ok(());
    }

    let prefs = store.all_prefs().context("failed to list preferences")?;
    if prefs.is_empty() {
        println!("(no preferences stored)");
    }
    for (key, value) in prefs {
        println!("{key:<12} {value}");
    }
    Ok(())
}

async fn cmd_repos(mut config: FolioConfig, user: Option<&str>, api_base: Option<&str>) -> Result<()> {
    if let Some(user) = user {
        config.feed.user = user.to_string();
    }
    if let Some(api_base) = api_base {
        config.feed.api_base = api_base.to_string();
    }

    let feed = GitHubFeed::new(&config.feed)?;
    tracing::debug!("listing repositories for {}", feed.user());
    let mut panel = FeedPanel::new();
    match feed.load(&mut panel).await {
        FeedState::Ready(cards) => {
            for card in cards {
                let language = card.language.as_deref().unwrap_or("-");
                println!("{}  ({language})", card.name);
                println!("    {}", card.description);
                println!("    {}", card.url);
            }
        }
        FeedState::Empty => println!("No repositories found"),
        FeedState::Failed(_) => {
            println!("Failed to load GitHub repositories");
            println!("Run `folio repos` again to retry.");
        }
        FeedState::Loading => {}
    }
    Ok(())
}

async fn cmd_contact(
    cli: &Cli,
    config: &FolioConfig,
    name: &str,
    email: &str,
    message: &str,
) -> Result<()> {
    let mut page = open_page(cli, config)?;
    page.contact.edit(Field::Name, name);
    page.contact.edit(Field::Email, email);
    page.contact.edit(Field::Message, message);

    let submission = match page.contact.submit() {
        Ok(submission) => submission,
        Err(errors) => {
            for (field, msg) in &errors {
                eprintln!("{}: {msg}", field.as_str());
            }
            bail!("contact form has {} invalid field(s)", errors.len());
        }
    };

    println!("Sending...");
    tokio::time::sleep(config.contact.delay()).await;
    println!("{}", page.complete_contact(&submission));
    Ok(())
}

async fn cmd_serve(cli: &Cli, config: FolioConfig, bind: Option<&str>) -> Result<()> {
    let page = open_page(cli, &config)?;
    let feed = GitHubFeed::new(&config.feed)?;
    let state = server::AppState::new(page, feed, config.contact.delay());

    let addr = bind.unwrap_or(&config.server.bind);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("serving on http://{}", listener.local_addr()?);
    eprintln!("serving on http://{}", listener.local_addr()?);

    axum::serve(listener, server::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
    }
}
