//! tablewatch CLI — weekly league-table watcher.
//!
//! Commands:
//! - `run` — one scheduled tick: post if inside the weekly window and this
//!   ISO week has not been posted yet (this is what cron invokes)
//! - `preview` — fetch, extract, and print the message without posting
//! - `status` — show the current period key, window verdict, and state

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tablewatch_core::config::BotConfig;
use tablewatch_core::extract::extract_standings;
use tablewatch_core::fetch::{HttpFetcher, PageFetcher};
use tablewatch_core::format::format_message;
use tablewatch_core::period::{already_published, period_key};
use tablewatch_core::publish::WebhookPublisher;
use tablewatch_core::run::{run_once, RunOutcome};
use tablewatch_core::state::StateStore;

#[derive(Parser)]
#[command(
    name = "tablewatch",
    about = "tablewatch — posts a league standings table to a webhook once per week"
)]
struct Cli {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// One scheduled tick: fetch, format, and post if the weekly gate allows.
    Run {
        /// Post even outside the weekly window. Duplicate suppression for
        /// the current week still applies.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Fetch and print the formatted message without posting or touching state.
    Preview,
    /// Show the current period key, window verdict, and persisted state.
    Status,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let cli = Cli::parse();
    let config = BotConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Run { force } => run_tick(&config, force),
        Commands::Preview => run_preview(&config),
        Commands::Status => run_status(&config),
    }
}

fn run_tick(config: &BotConfig, force: bool) -> Result<()> {
    // Webhook validation happens before any collaborator is constructed or
    // any network request goes out.
    let webhook_url = config.require_webhook()?.to_string();

    let fetcher = HttpFetcher::new(config.http_timeout());
    let publisher = WebhookPublisher::new(webhook_url, config.http_timeout());

    match run_once(config, &fetcher, &publisher, Utc::now(), force)? {
        RunOutcome::OutsideWindow => println!("outside posting window, nothing to do"),
        RunOutcome::AlreadyPosted { period } => println!("{period} already posted"),
        RunOutcome::Posted { period } => println!("posted {period}"),
    }
    Ok(())
}

fn run_preview(config: &BotConfig) -> Result<()> {
    let fetcher = HttpFetcher::new(config.http_timeout());
    let html = fetcher.fetch(&config.league_url)?;

    let now = Utc::now().with_timezone(&config.timezone);
    let extraction = extract_standings(&html, &config.team_query);
    let message = format_message(
        &extraction,
        &period_key(now),
        now,
        &config.team_query,
        &config.title,
    );
    println!("{message}");
    Ok(())
}

fn run_status(config: &BotConfig) -> Result<()> {
    let now = Utc::now().with_timezone(&config.timezone);
    let period = period_key(now);
    let state = StateStore::new(&config.state_file).load();

    println!("now:            {}", now.format("%a %d %b %H:%M %Z"));
    println!("period:         {period}");
    println!(
        "window:         {}",
        if config.post_window.should_attempt(now) {
            "open"
        } else {
            "closed"
        }
    );
    println!(
        "last posted:    {}",
        if state.last_posted_period.is_empty() {
            "never"
        } else {
            &state.last_posted_period
        }
    );
    println!(
        "this week:      {}",
        if already_published(&state, &period) {
            "already posted"
        } else {
            "pending"
        }
    );
    Ok(())
}
