use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::sync::mpsc;

use backbar::api::ApiClient;
use backbar::app::{App, AppEvent};
use backbar::config::Config;
use backbar::theme::ThemeVariant;
use backbar::ui;
use backbar::util::validate_server_url;

/// Get the config directory path (~/.config/backbar/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("backbar"))
}

#[derive(Parser, Debug)]
#[command(name = "backbar", about = "Terminal client for the bar inventory service")]
struct Args {
    /// Server base URL (overrides config.toml)
    #[arg(long, value_name = "URL")]
    server: Option<String>,

    /// Theme variant: dark or light (overrides config.toml)
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    // Load optional configuration
    let config_dir = get_config_dir()?;
    let config_path = config_dir.join("config.toml");
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    // CLI flags beat config values
    let server_raw = args.server.unwrap_or_else(|| config.server_url.clone());
    let server_url = validate_server_url(&server_raw)
        .with_context(|| format!("Invalid server URL '{}'", server_raw))?;

    let theme_name = args.theme.unwrap_or_else(|| config.theme.clone());
    let theme = match ThemeVariant::from_str_name(&theme_name) {
        Some(variant) => variant,
        None => {
            tracing::warn!(theme = %theme_name, "Unknown theme name, using dark");
            ThemeVariant::Dark
        }
    };

    let client = ApiClient::new(server_url.clone()).context("Failed to build HTTP client")?;

    // Load the initial inventory before entering the TUI so a dead server
    // fails with a readable message instead of an empty screen.
    let snapshot = match client.fetch_snapshot().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("Error: could not reach the bar service at {}", server_url);
            eprintln!("  {}", e);
            eprintln!();
            eprintln!("Start the service, or point backbar at it:");
            eprintln!("  backbar --server http://host:port");
            eprintln!("or set server_url in {}", config_path.display());
            std::process::exit(1);
        }
    };
    println!(
        "Loaded {} items and {} master ingredients from {}",
        snapshot.items.len(),
        snapshot.possible_names.len(),
        server_url
    );

    // Create app state
    let mut app = App::new(client);
    app.set_theme(theme);
    app.keybindings.apply_overrides(&config.keybindings);
    app.apply_snapshot(snapshot);

    // Create event channel for background tasks
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    // Run the TUI
    ui::run(&mut app, event_tx, event_rx).await?;

    println!("Goodbye!");
    Ok(())
}
