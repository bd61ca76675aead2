//! Process-wide logging setup (§5 "Logging", §10 ambient stack).
//!
//! `tracing`'s dispatcher already serializes formatted events emitted from
//! multiple worker threads, which is what satisfies the "serialized on a
//! single process-wide mutex" requirement in §5 — no bespoke mutex is
//! introduced on top of it.

use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber once, before the build driver runs.
///
/// `silent` drops the default level to `warn` (progress logs are `info` and
/// below); `RUST_LOG` always takes precedence when set, so a developer can
/// still turn on `debug`/`trace` output in silent mode.
pub fn init(silent: bool) {
    let default_level = if silent { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("autoserialize={default_level}")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
