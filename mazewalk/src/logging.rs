use std::{
    io::{self, Write as _},
    sync::{OnceLock, PoisonError, RwLock},
};

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

static LOGGER: OnceLock<AppLogger> = OnceLock::new();

pub fn get_logger() -> &'static AppLogger {
    LOGGER.get_or_init(|| AppLogger::new(LevelFilter::Warn))
}

/// Installs the stderr logger, can only succeed once per process.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = get_logger();
    logger.set_min_level(level);
    log::set_logger(logger)?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}

/// `level` made more verbose by `steps` notches, as `-vv` does.
pub fn raise_level(level: LevelFilter, steps: u8) -> LevelFilter {
    (0..steps).fold(level, |level, _| match level {
        LevelFilter::Off => LevelFilter::Error,
        LevelFilter::Error => LevelFilter::Warn,
        LevelFilter::Warn => LevelFilter::Info,
        LevelFilter::Info => LevelFilter::Debug,
        LevelFilter::Debug | LevelFilter::Trace => LevelFilter::Trace,
    })
}

pub struct AppLogger {
    min_level: RwLock<LevelFilter>,
}

impl AppLogger {
    fn new(min_level: LevelFilter) -> Self {
        Self {
            min_level: RwLock::new(min_level),
        }
    }

    pub fn min_level(&self) -> LevelFilter {
        *self.min_level.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_min_level(&self, level: LevelFilter) {
        *self.min_level.write().unwrap_or_else(PoisonError::into_inner) = level;
    }

    fn format(record: &Record) -> String {
        format!(
            "[{}] {}: {}",
            record.level(),
            record.module_path().unwrap_or(record.target()),
            record.args()
        )
    }
}

impl Log for AppLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.min_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let _ = writeln!(io::stderr().lock(), "{}", Self::format(record));
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

#[cfg(test)]
mod tests {
    use log::Level;

    use super::*;

    #[test]
    fn verbosity_raises_the_level() {
        assert_eq!(raise_level(LevelFilter::Warn, 0), LevelFilter::Warn);
        assert_eq!(raise_level(LevelFilter::Warn, 2), LevelFilter::Debug);
        assert_eq!(raise_level(LevelFilter::Off, 9), LevelFilter::Trace);
    }

    #[test]
    fn filters_by_min_level() {
        let logger = AppLogger::new(LevelFilter::Info);
        let meta = |level| Metadata::builder().level(level).build();
        assert!(logger.enabled(&meta(Level::Warn)));
        assert!(logger.enabled(&meta(Level::Info)));
        assert!(!logger.enabled(&meta(Level::Debug)));

        logger.set_min_level(LevelFilter::Off);
        assert!(!logger.enabled(&meta(Level::Error)));
    }

    #[test]
    fn line_format() {
        let line = AppLogger::format(
            &Record::builder()
                .args(format_args!("paved {} cells", 12))
                .level(Level::Debug)
                .module_path(Some("mazecore::generator"))
                .build(),
        );
        assert_eq!(line, "[DEBUG] mazecore::generator: paved 12 cells");
    }
}
