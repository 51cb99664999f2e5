// src/logging.rs

//! Two-sink run logger.
//!
//! Warnings and errors always go to the configured log file (stderr when no
//! file is configured). Debug and info lines go to stdout, but only in
//! verbose mode. The logger is an explicit handle passed into each component
//! rather than a global, so tests can run with a silent instance.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use chrono::Local;

use crate::error::Result;

/// Log level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

/// Logger handle scoped to one run.
pub struct Logger {
    verbose: bool,
    file: Option<Mutex<File>>,
}

impl Logger {
    /// Create a logger for a run.
    ///
    /// When `logfile` is set, its parent directory is created and the file is
    /// opened in append mode; failures here are startup errors.
    pub fn for_run(verbose: bool, logfile: Option<&Path>) -> Result<Self> {
        let file = match logfile {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                Some(Mutex::new(file))
            }
            None => None,
        };

        Ok(Self { verbose, file })
    }

    /// Create a silent logger (no console output, no file).
    pub fn quiet() -> Self {
        Self {
            verbose: false,
            file: None,
        }
    }

    /// Format a log line with timestamp and level.
    fn format_line(level: LogLevel, message: &str) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        format!("[{}] [{}] {}", timestamp, level.as_str(), message)
    }

    /// Write a warn/error line to the file sink, or stderr without one.
    fn to_file_sink(&self, line: &str) {
        match &self.file {
            Some(file) => {
                if let Ok(mut file) = file.lock() {
                    let _ = writeln!(file, "{}", line);
                }
            }
            None => eprintln!("{}", line),
        }
    }

    /// Log a debug message (console, verbose only).
    pub fn debug(&self, message: &str) {
        if self.verbose {
            println!("{}", Self::format_line(LogLevel::Debug, message));
        }
    }

    /// Log an info message (console, verbose only).
    pub fn info(&self, message: &str) {
        if self.verbose {
            println!("{}", Self::format_line(LogLevel::Info, message));
        }
    }

    /// Log a warning (file sink, echoed to console in verbose mode).
    pub fn warn(&self, message: &str) {
        let line = Self::format_line(LogLevel::Warn, message);
        self.to_file_sink(&line);
        if self.verbose && self.file.is_some() {
            println!("{}", line);
        }
    }

    /// Log an error (file sink, echoed to console in verbose mode).
    pub fn error(&self, message: &str) {
        let line = Self::format_line(LogLevel::Error, message);
        self.to_file_sink(&line);
        if self.verbose && self.file.is_some() {
            println!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn warn_lines_append_to_logfile() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("logs/run.log");

        let logger = Logger::for_run(false, Some(path.as_path())).unwrap();
        logger.warn("first");
        logger.error("second");

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[WARN] first"));
        assert!(content.contains("[ERROR] second"));
    }

    #[test]
    fn logfile_parent_dir_is_created() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("deep/nested/run.log");

        let logger = Logger::for_run(true, Some(path.as_path())).unwrap();
        logger.warn("hello");
        assert!(path.exists());
    }
}
