//! GeoAlert: host entry point.
//!
//! Replays one or more JSON-lines fix/selection files through the engine,
//! one reader thread per file (one file per provider, typically), and logs
//! every Entered/Left alert.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  ReplayParser ×N   LogEventSink   PrefsAdapter   SystemClock │
//! │  (reader threads)  (EventSink)    (Config+Store) (clock)     │
//! │         │                                                    │
//! │         ▼                                                    │
//! │       Inbox  ─────────── Port Trait Boundary ────────────    │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │             AppService (pure logic)                    │  │
//! │  │  FixArbiter · GeofenceMonitor                          │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{info, warn};

use geoalert::adapters::log_sink::LogEventSink;
use geoalert::adapters::prefs::PrefsAdapter;
use geoalert::adapters::replay::ReplayParser;
use geoalert::adapters::time::SystemClock;
use geoalert::app::inbox::Inbox;
use geoalert::app::ports::{ConfigError, ConfigPort};
use geoalert::app::service::AppService;
use geoalert::config::{ConfigOverrides, SystemConfig};

#[derive(Parser, Debug)]
#[command(version, about = "Geofence enter/leave alerts from replayed location fixes")]
struct Cli {
    /// JSON-lines replay file; repeat for several providers.
    #[arg(long = "replay", value_name = "FILE", required = true)]
    replay: Vec<PathBuf>,

    /// Preference store (saved target, config).  In-memory when omitted.
    #[arg(long, value_name = "FILE")]
    prefs: Option<PathBuf>,

    /// Target radius in metres (saved to the preference store).
    #[arg(long, value_name = "M")]
    radius: Option<f64>,

    /// Time gap after which a fix is judged on recency alone (ms, saved).
    #[arg(long, value_name = "MS")]
    stale_ms: Option<u32>,

    /// Accuracy loss still accepted from the same provider (m, saved).
    #[arg(long, value_name = "M")]
    accuracy_loss: Option<f32>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            alert_radius_m: self.radius,
            stale_fix_ms: self.stale_ms,
            significant_accuracy_loss_m: self.accuracy_loss,
        }
    }
}

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    info!("GeoAlert v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Preference store + config ──────────────────────────
    let mut prefs = match cli.prefs.as_ref() {
        Some(path) => PrefsAdapter::open(path).unwrap_or_else(|e| {
            warn!(
                "Preference store {} unusable ({}), running without persistence",
                path.display(),
                e
            );
            PrefsAdapter::new()
        }),
        None => PrefsAdapter::new(),
    };
    let mut config = match prefs.load() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("Config load failed ({}), using defaults", e);
            SystemConfig::default()
        }
    };
    let overrides = cli.overrides();
    if !overrides.is_empty() {
        overrides.apply(&mut config);
        match prefs.save(&config) {
            Ok(()) => info!("Config updated from command line"),
            Err(ConfigError::ValidationFailed(why)) => bail!("invalid config: {why}"),
            Err(e) => warn!("Config not persisted ({}), using it for this run", e),
        }
    }

    // ── 3. App service ────────────────────────────────────────
    let mut sink = LogEventSink::new();
    let mut app = AppService::new(config);
    app.start(&mut sink);
    app.restore_target(&prefs, &mut sink);

    // ── 4. Readers → inbox → control loop ─────────────────────
    // Open everything up front so a bad path fails before any reader runs.
    let files = cli
        .replay
        .iter()
        .map(|path| {
            File::open(path).with_context(|| format!("opening replay file {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let inbox = Inbox::new();
    let parser = ReplayParser::new(SystemClock::new());

    std::thread::scope(|scope| {
        let readers: Vec<_> = files
            .into_iter()
            .map(|file| {
                let sender = inbox.sender();
                scope.spawn(move || parser.replay(BufReader::new(file), |cmd| sender.post(cmd)))
            })
            .collect();

        let handled = inbox.serve(|cmd| app.handle_command(cmd, &mut prefs, &mut sink));
        info!("All readers finished, {} commands handled", handled);

        for (reader, path) in readers.into_iter().zip(&cli.replay) {
            match reader.join() {
                Ok(Ok(summary)) => info!(
                    "{}: {} records, {} skipped",
                    path.display(),
                    summary.commands,
                    summary.skipped
                ),
                Ok(Err(e)) => warn!("{}: replay aborted: {}", path.display(), e),
                Err(_) => warn!("{}: reader thread panicked", path.display()),
            }
        }
    });

    // ── 5. Summary ────────────────────────────────────────────
    let stats = app.stats();
    info!(
        "Done: {} fixes seen, {} adopted, {} dropped while paused, {} alerts",
        stats.fixes_seen, stats.fixes_adopted, stats.fixes_dropped, stats.alerts
    );
    if let Some(d) = app.distance_to_target() {
        info!(
            "Final distance to target: {:.0}m ({})",
            d,
            if app.is_within() { "inside" } else { "outside" }
        );
    }
    Ok(())
}
