//! Logging to stderr using env_logger
//!
//! stdout carries the JSON output, so every log line goes to stderr.
//! The level is taken from `RUST_LOG` and defaults to `warn`.

use env_logger::{Env, Target};

/// Initialize stderr logging
///
/// `verbose` raises the default level to `debug` when `RUST_LOG` is unset.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .target(Target::Stderr)
        .format_timestamp_millis()
        .init();
}
