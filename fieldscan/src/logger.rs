// fieldscan/src/logger.rs
//! Logger bootstrap for the fieldscan binary and its tests.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes `env_logger`.
///
/// `RUST_LOG` is honoured (default `info`); an explicit `level` overrides it.
/// Safe to call more than once: later calls are no-ops.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.format_timestamp_millis();
    let _ = builder.try_init();
}
