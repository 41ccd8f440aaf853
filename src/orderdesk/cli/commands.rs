//! # CLI Layer
//!
//! This module is **one possible UI client** for orderdesk, not the application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr, stdin)
//! - Handles argument parsing
//! - Formats output for human consumption
//! - Installs the tracing subscriber
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Builds `AppContext` from config and seed data
//! - `handle_*()`: Per-command handlers that call the API and format output
//! - `shell::run()`: The interactive session
//!
//! Config lives in `$ORDERDESK_HOME` when set, otherwise in the platform config dir.

use super::render::{print_messages, render_config, render_view};
use super::setup::{Cli, Commands};
use super::shell;
use chrono::Utc;
use clap::Parser;
use directories::ProjectDirs;
use orderdesk::api::OrderDesk;
use orderdesk::commands::CmdMessage;
use orderdesk::config::OrderDeskConfig;
use orderdesk::error::{OrderDeskError, Result};
use orderdesk::seed::{default_orders, load_seed_file};
use orderdesk::store::memory::InMemoryStore;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const HOME_ENV: &str = "ORDERDESK_HOME";
const LOG_ENV: &str = "ORDERDESK_LOG";

struct AppContext {
    desk: OrderDesk<InMemoryStore>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_dir = config_dir()?;
    tracing::debug!(dir = %config_dir.display(), "using config dir");

    match cli.command {
        Some(Commands::Config { key, value }) => handle_config(&config_dir, key, value),
        Some(Commands::List { search, page }) => {
            let mut ctx = init_context(&config_dir, cli.seed.as_deref())?;
            handle_list(&mut ctx, search, page)
        }
        Some(Commands::Shell) | None => {
            let mut ctx = init_context(&config_dir, cli.seed.as_deref())?;
            handle_shell(&mut ctx)
        }
    }
}

/// Logs go to stderr so they never mix with table output.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "orderdesk=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn config_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "orderdesk", "orderdesk")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| OrderDeskError::Config("Could not determine config dir".to_string()))
}

fn init_context(config_dir: &Path, seed: Option<&Path>) -> Result<AppContext> {
    let config = OrderDeskConfig::load(config_dir)?;
    let records = match seed {
        Some(path) => load_seed_file(path)?,
        None => default_orders(Utc::now()),
    };

    let mut desk = OrderDesk::new(InMemoryStore::new(), config);
    desk.load(records)?;

    Ok(AppContext { desk })
}

fn handle_list(ctx: &mut AppContext, search: Option<String>, page: usize) -> Result<()> {
    ctx.desk.set_query(search.unwrap_or_default());
    ctx.desk.go_to_page(page);

    let result = ctx.desk.list()?;
    if let Some(view) = &result.view {
        print!("{}", render_view(view, ctx.desk.query(), Utc::now()));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_shell(ctx: &mut AppContext) -> Result<()> {
    let stdin = std::io::stdin();
    shell::run(&mut ctx.desk, stdin.lock())
}

fn handle_config(config_dir: &Path, key: Option<String>, value: Option<String>) -> Result<()> {
    let mut config = OrderDeskConfig::load(config_dir)?;

    match (key, value) {
        (None, _) => print!("{}", render_config(&config)),
        (Some(key), None) => match config.get(&key) {
            Some(value) => println!("{}", value),
            None => print_messages(&[CmdMessage::error(format!("Unknown config key: {}", key))]),
        },
        (Some(key), Some(value)) => {
            if let Err(e) = config.set(&key, &value) {
                print_messages(&[CmdMessage::error(e)]);
                return Ok(());
            }
            config.save(config_dir)?;
            let display_val = config.get(&key).unwrap_or(value);
            print_messages(&[CmdMessage::success(format!(
                "{} set to {}",
                key, display_val
            ))]);
        }
    }
    Ok(())
}
