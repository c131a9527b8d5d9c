//! Leveled diagnostic logging for the tracing client.
//!
//! The facade and the tracer core report through an injected [`Logger`]
//! rather than a fixed backend: applications either hand in their own
//! implementation or configure a verbosity level, in which case the default
//! [`ConsoleLogger`] is constructed via [`logger`].

use std::fmt;
use std::sync::Arc;

/// Verbosity of a [`Logger`], ordered from quietest to chattiest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    /// Nothing is emitted.
    Silent = 0,
    /// Errors only.
    Error = 1,
    /// Errors and warnings.
    Warn = 2,
    /// Informational messages and below.
    Info = 3,
    /// Everything, including debug output.
    Debug = 4,
}

impl LogLevel {
    /// Resolve a numeric verbosity value into a level.
    pub fn from_value(value: u8) -> Option<LogLevel> {
        match value {
            0 => Some(LogLevel::Silent),
            1 => Some(LogLevel::Error),
            2 => Some(LogLevel::Warn),
            3 => Some(LogLevel::Info),
            4 => Some(LogLevel::Debug),
            _ => None,
        }
    }

    /// The lowercase name of the level.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Silent => "silent",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Error
    }
}

/// A sink for diagnostic messages emitted by the tracing client.
///
/// [`log`](Logger::log) emits unconditionally; the leveled convenience
/// methods gate on [`level`](Logger::level) first, so implementations only
/// need to decide where a line goes, not whether it should.
pub trait Logger: fmt::Debug + Send + Sync {
    /// The verbosity this logger was configured with.
    fn level(&self) -> LogLevel;

    /// Write a message at the given level.
    fn log(&self, level: LogLevel, args: fmt::Arguments<'_>);

    /// Log an error message.
    fn error(&self, args: fmt::Arguments<'_>) {
        if LogLevel::Error <= self.level() {
            self.log(LogLevel::Error, args);
        }
    }

    /// Log a warning.
    fn warn(&self, args: fmt::Arguments<'_>) {
        if LogLevel::Warn <= self.level() {
            self.log(LogLevel::Warn, args);
        }
    }

    /// Log an informational message.
    fn info(&self, args: fmt::Arguments<'_>) {
        if LogLevel::Info <= self.level() {
            self.log(LogLevel::Info, args);
        }
    }

    /// Log a debug message.
    fn debug(&self, args: fmt::Arguments<'_>) {
        if LogLevel::Debug <= self.level() {
            self.log(LogLevel::Debug, args);
        }
    }
}

/// A [`Logger`] that writes level-tagged lines to stderr.
#[derive(Clone, Debug)]
pub struct ConsoleLogger {
    level: LogLevel,
}

impl ConsoleLogger {
    /// Create a console logger filtering at `level`.
    pub fn new(level: LogLevel) -> Self {
        ConsoleLogger { level }
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        ConsoleLogger::new(LogLevel::default())
    }
}

impl Logger for ConsoleLogger {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        eprintln!("[{level}] {args}");
    }
}

/// A [`Logger`] that discards everything.
///
/// Used by the tracer core until a configuration is applied.
#[derive(Clone, Debug, Default)]
pub struct NoopLogger {
    _private: (),
}

impl NoopLogger {
    /// Create a new no-op logger.
    pub fn new() -> Self {
        NoopLogger { _private: () }
    }
}

impl Logger for NoopLogger {
    fn level(&self) -> LogLevel {
        LogLevel::Silent
    }

    fn log(&self, _level: LogLevel, _args: fmt::Arguments<'_>) {
        // Ignored
    }
}

/// Construct the default logger at the given verbosity.
pub fn logger(level: LogLevel) -> Arc<dyn Logger> {
    Arc::new(ConsoleLogger::new(level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered() {
        assert!(LogLevel::Silent < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Debug);
    }

    #[test]
    fn level_from_value() {
        assert_eq!(LogLevel::from_value(3), Some(LogLevel::Info));
        assert_eq!(LogLevel::from_value(4), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_value(5), None);
    }

    #[test]
    fn level_names() {
        assert_eq!(LogLevel::Info.to_string(), "info");
        assert_eq!(LogLevel::Debug.as_str(), "debug");
        assert_eq!(LogLevel::default(), LogLevel::Error);
    }

    #[test]
    fn factory_applies_level() {
        let logger = logger(LogLevel::Debug);
        assert_eq!(logger.level(), LogLevel::Debug);
    }

    #[test]
    fn noop_logger_is_silent() {
        let logger = NoopLogger::new();
        assert_eq!(logger.level(), LogLevel::Silent);
        // A no-op logger swallows even unconditional writes.
        logger.log(LogLevel::Error, format_args!("dropped"));
    }
}
