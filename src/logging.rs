//! File logging for the game.
//!
//! The terminal is in raw mode on the alternate screen while the game runs,
//! so log records cannot go to stderr without tearing the picture. They go
//! to `skyward.log` in the data directory, truncated at every start.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;
use std::fs::File;
use std::path::Path;

pub const LOG_FILE: &str = "skyward.log";

/// Install the global logger writing to `dir/skyward.log`.
///
/// `RUST_LOG` wins when set; otherwise `verbose` picks debug over info.
/// If the log file cannot be created, records fall back to stderr.
pub fn init(verbose: bool, dir: &Path) {
    let default_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let mut builder =
        Builder::from_env(Env::default().default_filter_or(default_level.to_string()));

    match File::create(dir.join(LOG_FILE)) {
        Ok(file) => {
            builder.target(Target::Pipe(Box::new(file)));
        }
        Err(e) => eprintln!("Warning: logging to stderr, {}: {}", LOG_FILE, e),
    }

    // A second call keeps the first logger
    let _ = builder.try_init();
}
