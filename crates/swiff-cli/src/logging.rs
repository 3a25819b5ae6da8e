//! Diagnostics go to stderr through `tracing-subscriber`.
//!
//! `SWIFF_LOG` takes an `EnvFilter` directive string (e.g. `swiff_tags=debug`).
//! Without it the level comes from the `-v` count.

use tracing_subscriber::filter::EnvFilter;

pub const LOG_ENV: &str = "SWIFF_LOG";

pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
