//! `zonedesk`, a terminal console for a DNS zone and a short-URL service.
//!
//! One API key, saved in the key panel, unlocks two panels: the records of
//! a PowerDNS-style zone and the short-URL table. Each panel lists its
//! resource and offers a form to create, replace or delete entries.
//!
//! Logs are written to a file (default `/tmp/zonedesk.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app launch.

mod action;
mod app;
mod component;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use zonedesk_config::Config;
use zonedesk_core::ApiConsole;

use crate::app::App;

/// Terminal console for a DNS zone and a short-URL service.
#[derive(Parser, Debug)]
#[command(name = "zonedesk", version, about)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Proxy URL both services are mounted under (e.g., http://localhost:8000)
    #[arg(short = 'u', long)]
    base_url: Option<String>,

    /// Zone to manage (trailing dot optional)
    #[arg(short = 'z', long)]
    zone: Option<String>,

    /// API key to start with. Kept in memory only.
    #[arg(short = 'k', long, env = "ZONEDESK_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Accept invalid TLS certificates
    #[arg(long)]
    insecure: bool,

    /// Write the effective configuration to the config file and exit
    #[arg(long)]
    init_config: bool,

    /// Log file path (defaults to /tmp/zonedesk.log)
    #[arg(long, default_value = "/tmp/zonedesk.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr, which
/// would corrupt the TUI output. The returned guard flushes on drop.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "zonedesk={log_level},zonedesk_core={log_level},zonedesk_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("zonedesk.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// File and environment first, then command-line overrides.
fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = zonedesk_config::load_config(cli.config.as_deref())?;
    if let Some(base_url) = &cli.base_url {
        config.base_url.clone_from(base_url);
    }
    if let Some(zone) = &cli.zone {
        config.zone.clone_from(zone);
    }
    if cli.insecure {
        config.insecure = true;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    let config = resolve_config(&cli)?;
    let console_config = config.to_console_config()?;

    if cli.init_config {
        let path = zonedesk_config::save_config(&config, cli.config.as_deref())?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    // Tracing to file; hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    info!(
        base_url = %console_config.base_url,
        zone = %console_config.zone,
        "starting zonedesk"
    );

    let (mut console, console_rx) = ApiConsole::from_config(&console_config)?;
    if let Some(key) = cli.api_key.as_deref().filter(|k| !k.is_empty()) {
        console.set_api_key(key);
    }

    let mut app = App::new(console, console_rx, &console_config);
    app.run().await?;

    Ok(())
}
