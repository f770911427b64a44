//! # herald-agent
//!
//! Herald engagement agents binary: loads settings, wires collaborators and
//! runs a decision cycle for every agent on a fixed interval.

#![deny(unsafe_code)]

mod wiring;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::Parser;
use herald_core::logging::init_subscriber;
use herald_engagement::AgentManager;
use herald_settings::{HeraldSettings, load_settings_from_path, settings_path, validate};
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

/// Herald engagement agents.
#[derive(Parser, Debug)]
#[command(name = "herald-agent", about = "Autonomous social engagement agents")]
struct Cli {
    /// Settings file (defaults to `~/.herald/settings.json`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run a single cycle and exit.
    #[arg(long)]
    once: bool,

    /// Use the in-memory platform and echo generator; nothing is published.
    #[arg(long)]
    dry_run: bool,

    /// Platform fixture (JSON) for `--dry-run`.
    #[arg(long, requires = "dry_run")]
    fixture: Option<PathBuf>,

    /// Environment snapshot file (JSON), re-read every cycle.
    #[arg(long)]
    context: Option<PathBuf>,

    /// Log filter (overrides settings; `RUST_LOG` still wins).
    #[arg(long)]
    log_level: Option<String>,

    /// Print the ranked discovery candidates for one agent as JSON and exit.
    #[arg(long, value_name = "AGENT_ID")]
    discover: Option<String>,
}

impl Cli {
    fn load_settings(&self) -> Result<HeraldSettings> {
        let path = self.config.clone().unwrap_or_else(settings_path);
        let mut settings = load_settings_from_path(&path)
            .with_context(|| format!("Failed to load settings: {}", path.display()))?;
        if let Some(level) = &self.log_level {
            settings.logging.level.clone_from(level);
        }
        if self.once {
            settings.scheduler.run_once = true;
        }
        Ok(settings)
    }
}

/// Run cycles every `interval` until Ctrl-C, or once.
///
/// A cycle interrupted by Ctrl-C is abandoned; nothing is recorded for it.
async fn run_loop(manager: &mut AgentManager, interval: Duration, run_once: bool) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = &mut shutdown => break,
        }
        tokio::select! {
            () = run_tick(manager) => {}
            _ = &mut shutdown => {
                info!("cycle abandoned on shutdown");
                break;
            }
        }
        if run_once {
            break;
        }
    }

    for (agent_id, summary) in manager.analyze_performance() {
        info!(
            %agent_id,
            posts = summary.total_posts,
            replies = summary.total_replies,
            success_rate = summary.success_rate,
            top_post_type = summary.top_post_type.as_deref(),
            "agent performance"
        );
    }
}

async fn run_tick(manager: &mut AgentManager) {
    match manager.run_cycle(Utc::now()).await {
        Ok(reports) => info!(agents = reports.len(), "cycle complete"),
        Err(e) => warn!(error = %e, "cycle skipped"),
    }
}

async fn discover(manager: &AgentManager, agent_id: &str) -> Result<()> {
    let Some(agent) = manager.agents().iter().find(|a| a.id().as_str() == agent_id) else {
        bail!("No enabled agent with id {agent_id}");
    };
    let candidates = agent.discover(Utc::now()).await?;
    println!("{}", serde_json::to_string_pretty(&candidates)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = cli.load_settings()?;
    init_subscriber(&settings.logging.level, settings.logging.format);
    validate(&settings).context("Invalid settings")?;

    let platform = wiring::build_platform(&settings, cli.dry_run, cli.fixture.as_deref())?;
    let context = wiring::build_context(cli.context.as_deref());
    let mut manager = wiring::build_manager(&settings, &platform, context, cli.dry_run)?;

    if let Some(agent_id) = &cli.discover {
        return discover(&manager, agent_id).await;
    }

    info!(
        settings_version = %settings.version,
        agents = manager.agents().len(),
        interval_secs = settings.scheduler.cycle_interval_secs,
        run_once = settings.scheduler.run_once,
        dry_run = cli.dry_run,
        "herald starting"
    );
    run_loop(
        &mut manager,
        Duration::from_secs(settings.scheduler.cycle_interval_secs),
        settings.scheduler.run_once,
    )
    .await;
    info!("herald stopped");
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
