/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};

use signage_scheduler::clock::{Clock, FixedClock, SystemClock};
use signage_scheduler::config::SignageConfig;
use signage_scheduler::service::PlaybackService;
use signage_scheduler::store::MemoryStore;

// ── CLI argument definition ───────────────────────────────────────────────────

/// Signage scheduler: resolves the playlist each screen should display.
///
/// Example:
///   signage-scheduler --store demos/store.yaml --screen S1 --screen S2 \
///                     --at 2026-10-19T11:00
#[derive(Debug, Parser)]
#[command(
    name = "signage-scheduler",
    about = "Signage scheduler – resolves screen playlists from schedule rules",
    long_about = None,
)]
struct Cli {
    /// Path to the YAML record-store fixture (screens, schedules, playlists, ...).
    #[arg(short = 's', long = "store")]
    store: PathBuf,

    /// Screen id to poll.  May be given several times.
    #[arg(short = 'i', long = "screen", required = true)]
    screens: Vec<String>,

    /// Path to the YAML service configuration file.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Resolve at a fixed local time (`YYYY-MM-DDTHH:MM`) instead of now.
    #[arg(short = 'a', long = "at")]
    at: Option<String>,

    /// Number of poll rounds, spaced by the configured poll interval.
    #[arg(short = 'n', long = "polls", default_value_t = 1)]
    polls: u32,
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Signage scheduler starting up...");

    // ── Parse CLI arguments ───────────────────────────────────────────────────
    let cli = Cli::parse();

    info!(
        store   = %cli.store.display(),
        screens = ?cli.screens,
        config  = ?cli.config,
        at      = ?cli.at,
        polls   = cli.polls,
        "Configuration"
    );

    // ── Load service configuration ────────────────────────────────────────────
    let config = match &cli.config {
        Some(path) => match SignageConfig::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load configuration: {:#}", e);
                process::exit(1);
            }
        },
        None => {
            warn!("No configuration file provided, using default settings");
            SignageConfig::default()
        }
    };

    // ── Load record store ─────────────────────────────────────────────────────
    let store = match MemoryStore::load_from_file(&cli.store) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!("Failed to load store fixture: {:#}", e);
            process::exit(1);
        }
    };

    let clock: Arc<dyn Clock> = match &cli.at {
        Some(at) => match FixedClock::parse(at) {
            Ok(clock) => Arc::new(clock),
            Err(e) => {
                error!("Invalid --at value '{}': {}", at, e);
                process::exit(1);
            }
        },
        None => Arc::new(SystemClock),
    };

    let service = Arc::new(PlaybackService::new(store, clock, &config));

    // ── Poll rounds ───────────────────────────────────────────────────────────
    let mut failures = 0usize;
    for round in 1..=cli.polls {
        if round > 1 {
            tokio::time::sleep(config.poll_interval()).await;
        }
        info!(round, "Polling {} screen(s)", cli.screens.len());

        let handles: Vec<_> = cli
            .screens
            .iter()
            .cloned()
            .map(|screen_id| {
                let service = Arc::clone(&service);
                tokio::spawn(async move {
                    let result = service.poll(&screen_id).await;
                    (screen_id, result)
                })
            })
            .collect();

        for handle in handles {
            match handle.await {
                Ok((screen_id, Ok(assignment))) => match serde_json::to_string_pretty(&assignment) {
                    Ok(json) => println!("{screen_id}: {json}"),
                    Err(e) => {
                        error!(%screen_id, "Failed to serialise assignment: {}", e);
                        failures += 1;
                    }
                },
                // The device keeps playing its current content on failure.
                Ok((screen_id, Err(e))) => {
                    warn!(%screen_id, "Poll failed: {}", e);
                    failures += 1;
                }
                Err(e) => {
                    error!("Poll task panicked: {}", e);
                    failures += 1;
                }
            }
        }
    }

    if failures > 0 {
        error!(failures, "Some polls failed");
        process::exit(1);
    }
}
