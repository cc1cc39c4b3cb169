//! A small colored logger for the `log` facade, read from `RUST_LOG` the
//! way `env_logger` does, without pulling in `env_logger` itself.

use colored::{Color, Colorize};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::env;

struct Logger {
    filter: LevelFilter,
}

fn level_color(lvl: Level) -> Color {
    match lvl {
        Level::Error => Color::Red,
        Level::Warn => Color::Yellow,
        Level::Info => Color::Green,
        Level::Debug => Color::Blue,
        Level::Trace => Color::Magenta,
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.filter
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let lvl = record.level();
        eprintln!(
            "[{}][{}] {}",
            lvl.to_string().color(level_color(lvl)),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {}
}

fn filter_from_env() -> LevelFilter {
    match env::var("RUST_LOG") {
        Ok(s) => s.parse().unwrap_or(LevelFilter::Info),
        Err(_) => LevelFilter::Info,
    }
}

/// Install this crate's logger as the global `log` backend. Idempotent:
/// a second call is a harmless no-op (matches `log::set_logger`'s own
/// contract of failing quietly after the first).
pub fn init() {
    let filter = filter_from_env();
    let logger = Box::new(Logger { filter });
    log::set_boxed_logger(logger).ok();
    log::set_max_level(filter);
}

/// Install the logger at a fixed level, ignoring `RUST_LOG` — handy in
/// tests that want deterministic output regardless of the environment.
pub fn init_with_level(filter: LevelFilter) {
    log::set_boxed_logger(Box::new(Logger { filter })).ok();
    log::set_max_level(filter);
}
