//! Log setup for the product scraper TUI.
//!
//! Raw mode owns stdout while the app runs, so anything a `TermLogger` prints
//! lands inside the drawn frame. `File` is the default for that reason;
//! `Terminal` is only useful with the UI disabled or redirected stderr.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

pub(crate) const LOG_PATH: &str = "./product_scraper.log";

/// Where the `log_destination` setting sends records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogDestination {
    #[default]
    File,
    Terminal,
    Both,
}

impl LogDestination {
    fn wants_file(self) -> bool {
        matches!(self, LogDestination::File | LogDestination::Both)
    }

    fn wants_terminal(self) -> bool {
        matches!(self, LogDestination::Terminal | LogDestination::Both)
    }
}

/// Install the global logger. A second call is ignored by `log`.
pub fn initialize(destination: LogDestination, level: LevelFilter) {
    let loggers = build_loggers(destination, level, Path::new(LOG_PATH));
    if loggers.is_empty() {
        return;
    }
    let _ = CombinedLogger::init(loggers);
}

/// The log file is truncated on every start; only the current session is kept.
fn build_loggers(
    destination: LogDestination,
    level: LevelFilter,
    log_path: &Path,
) -> Vec<Box<dyn SharedLogger>> {
    let config = request_log_config();
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    if destination.wants_terminal() {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    if destination.wants_file() {
        match File::create(log_path) {
            Ok(file) => loggers.push(WriteLogger::new(level, config, file)),
            Err(err) => eprintln!("Warning: cannot write log file {:?}: {}", log_path, err),
        }
    }
    loggers
}

fn request_log_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        // Connection-pool and TLS chatter from reqwest's stack.
        .add_filter_ignore_str("hyper")
        .add_filter_ignore_str("rustls")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_destination_creates_only_the_log_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.log");

        let loggers = build_loggers(LogDestination::File, LevelFilter::Debug, &path);
        assert_eq!(loggers.len(), 1);
        assert!(path.exists());
    }

    #[test]
    fn both_falls_back_to_terminal_when_file_is_unwritable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("session.log");

        let loggers = build_loggers(LogDestination::Both, LevelFilter::Info, &path);
        assert_eq!(loggers.len(), 1);
        assert!(!path.exists());
    }

    #[test]
    fn destination_reads_from_settings_names() {
        let destination: LogDestination = ron::from_str("Both").expect("ron");
        assert!(destination.wants_file() && destination.wants_terminal());
        assert_eq!(LogDestination::default(), LogDestination::File);
    }
}
