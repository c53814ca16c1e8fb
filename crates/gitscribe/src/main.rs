//! gitscribe - AI commit messages and incremental changelogs

mod cli;

use std::path::PathBuf;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_tracing(console_level(&cli));

    cli.execute()
}

/// Console level when RUST_LOG is unset
fn console_level(cli: &Cli) -> &'static str {
    if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Console output follows RUST_LOG (falling back to `default_level`); a
/// debug-level JSON log is always written under ~/.gitscribe/logs/ when the
/// directory is usable.
fn init_tracing(default_level: &str) -> Option<WorkerGuard> {
    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        );

    let Some(log_dir) = log_directory() else {
        tracing_subscriber::registry().with(console_layer).init();
        return None;
    };

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&log_dir, "gitscribe.log"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_target(true)
                .with_filter(EnvFilter::new("debug")),
        )
        .init();

    Some(guard)
}

fn log_directory() -> Option<PathBuf> {
    let log_dir = dirs::home_dir()?.join(".gitscribe").join("logs");
    std::fs::create_dir_all(&log_dir).ok()?;
    Some(log_dir)
}
