//! # Sana Booking Host
//!
//! Plays the host page for the booking wizard: loads the service
//! configuration, owns the booking session and answers UI commands.
//!
//! ## Module Organization
//! ```text
//! sana_booking_lib/
//! ├── lib.rs          ◄─── You are here (logging setup & command loop)
//! ├── config.rs       ◄─── HostConfig (currency, services, logging)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   └── session.rs  ◄─── SessionState / BookingSession
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── booking.rs  ◄─── Command parsing and dispatch
//! │   └── view.rs     ◄─── FlowView rendering
//! └── error.rs        ◄─── HostError / ApiError
//! ```
//!
//! ## Transport
//! One JSON command per stdin line, one JSON response per stdout line.
//! Logs go to stderr so stdout stays a clean protocol stream.

pub mod commands;
pub mod config;
pub mod error;
pub mod state;

use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use commands::handle_line;
use config::{HostConfig, DEFAULT_LOG_FILTER};
use error::HostResult;
use state::SessionState;

/// Runs the host on stdin/stdout until stdin closes.
///
/// ## Startup Sequence
/// 1. Load configuration (defaults → file → env), logging with the default filter
/// 2. Initialize tracing with the configured filter
/// 3. Serve commands
pub fn run(config_path: Option<PathBuf>) -> HostResult<()> {
    let config = load_config(config_path, env_filter(DEFAULT_LOG_FILTER), std::io::stderr)?;
    init_tracing(&config.logging.filter);

    info!(
        currency = %config.currency.code,
        shrink = %config.services.shrink.base_price,
        trimming = %config.services.trimming.base_price,
        "Starting Sana booking host"
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let handled = run_with(stdin.lock(), stdout.lock(), &config)?;

    info!(commands = handled, "Input closed, shutting down");
    Ok(())
}

/// Serves commands from `reader`, writing one response line per command.
///
/// Blank lines are skipped. Returns the number of commands handled.
pub fn run_with<R, W>(reader: R, mut writer: W, config: &HostConfig) -> HostResult<usize>
where
    R: BufRead,
    W: Write,
{
    let mut state = SessionState::new();
    let mut handled = 0;

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = handle_line(&mut state, config, line);
        serde_json::to_writer(&mut writer, &response)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        handled += 1;
    }

    if state.is_active() {
        debug!("Input closed with a booking still open");
    }

    Ok(handled)
}

/// Loads the config under a scoped subscriber so load-time logs are not lost
/// before the configured filter is known.
fn load_config<W>(config_path: Option<PathBuf>, filter: EnvFilter, writer: W) -> HostResult<HostConfig>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let bootstrap = log_subscriber(filter, writer);
    tracing::subscriber::with_default(bootstrap, || HostConfig::load(config_path))
}

/// Initializes the global tracing subscriber, writing to stderr.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=sana=trace` - Show trace for sana crates only
/// - Default: the `[logging] filter` from the config
fn init_tracing(default_filter: &str) {
    log_subscriber(env_filter(default_filter), std::io::stderr).init();
}

/// `RUST_LOG` wins over the given default.
fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

fn log_subscriber<W>(filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .finish()
}
