//! Log setup for the flickboard binary
//!
//! The engine reports every pointer transition (press, swipe, latch, lock,
//! unlatch, release, cancel) at `debug`, and timer traffic at `trace`. That
//! is usually enough to reconstruct why a modifier stuck or a repeat stuttered.
//!
//! `RUST_LOG` drives stderr, e.g. `RUST_LOG=flickboard::pointers=debug` or
//! `RUST_LOG=flickboard::timer=trace`. Independently, `debug` and above always
//! land in `logs/flickboard.log` under the config directory, rotated daily.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Install the stderr and log-file subscribers
///
/// Stdout is left to replay output. Without a writable config directory the
/// file layer is skipped and a note goes to stderr.
pub fn init() {
    let stderr_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(stderr_filter);

    let file_layer = crate::config_paths::ensure_logs_dir()
        .map_err(|e| eprintln!("flickboard: file logging disabled: {}", e))
        .ok()
        .map(|logs_dir| {
            fmt::layer()
                .with_writer(tracing_appender::rolling::daily(logs_dir, "flickboard.log"))
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true)
                .with_filter(EnvFilter::new("debug"))
        });

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();
}
