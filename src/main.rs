use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::sync::mpsc;

use isonews::app::{build_http_client, App, AppEvent, ViewState};
use isonews::config::Config;
use isonews::feed::load_articles;
use isonews::ui;

/// Get the default config file path (~/.config/isonews/config.toml)
fn default_config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("isonews")
        .join("config.toml"))
}

#[derive(Parser, Debug)]
#[command(name = "isonews", about = "Terminal viewer for the ISOTools daily news feed")]
struct Args {
    /// URL of the news JSON document (overrides the config file)
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Config file to use instead of ~/.config/isonews/config.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Color theme
    #[arg(long, value_parser = ["dark", "light"])]
    theme: Option<String>,

    /// Maximum number of card columns
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    columns: Option<u16>,

    /// Load once, print the view as text and exit
    #[arg(long)]
    plain: bool,
}

impl Args {
    /// Command-line flags take precedence over the config file.
    fn apply_to(&self, config: &mut Config) {
        if let Some(url) = &self.url {
            config.feed_url = url.clone();
        }
        if let Some(theme) = &self.theme {
            config.theme = theme.clone();
        }
        if let Some(columns) = self.columns {
            config.columns = columns;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never mix with the TUI or --plain output
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };
    let mut config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    args.apply_to(&mut config);

    if args.plain {
        let client = build_http_client().context("Failed to build HTTP client")?;
        let result = load_articles(&client, &config.feed_url, config.request_timeout()).await;
        let state = ViewState::from_load(result);
        print!("{}", ui::render_plain(&state));
        if matches!(state, ViewState::Error(_)) {
            std::process::exit(1);
        }
        return Ok(());
    }

    let mut app = App::new(config).context("Failed to create application")?;

    // Create event channel for background tasks
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(8);

    ui::run(&mut app, event_tx, event_rx).await?;

    Ok(())
}
