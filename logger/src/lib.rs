use chrono::Utc;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
enum LogLevel {
    Info(Color),
    Warn,
    Error,
}

impl LogLevel {
    fn tag(&self) -> &'static str {
        match self {
            LogLevel::Info(_) => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    fn ansi_code(&self) -> &'static str {
        match self {
            LogLevel::Info(color) => color.to_ansi_code(),
            LogLevel::Warn => "\x1b[93m",  // Bright Yellow
            LogLevel::Error => "\x1b[91m", // Bright Red
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    Cyan,
    Magenta,
    White,
}

impl Color {
    fn to_ansi_code(self) -> &'static str {
        match self {
            Color::Red => "\x1b[31m",
            Color::Green => "\x1b[32m",
            Color::Blue => "\x1b[34m",
            Color::Yellow => "\x1b[33m",
            Color::Cyan => "\x1b[36m",
            Color::Magenta => "\x1b[35m",
            Color::White => "\x1b[37m",
        }
    }
}

/// Writes timestamped log lines to a file and, optionally, to the console.
///
/// Cloning a `Logger` is cheap: clones append to the same file.
#[derive(Debug, Clone)]
pub struct Logger {
    log_file: Option<PathBuf>,
    echo: bool,
}

impl Logger {
    /// Creates a new `Logger` writing to `<log_dir>/<name>.log`.
    ///
    /// # Parameters
    /// - `log_dir`: Directory where the log file lives. It is created if missing.
    /// - `name`: Base name of the log file, usually the application name.
    /// - `echo`: Whether every line is also printed to the console.
    ///
    /// The log file is truncated when the logger is created.
    pub fn new(log_dir: &Path, name: &str, echo: bool) -> Result<Self, LoggerError> {
        if log_dir.exists() && !log_dir.is_dir() {
            return Err(LoggerError::InvalidPath(format!(
                "{} is not a directory.",
                log_dir.display()
            )));
        }
        std::fs::create_dir_all(log_dir)?;

        let sanitized = name.replace([':', '/', '\\'], "_");
        let log_file = log_dir.join(format!("{}.log", sanitized));

        OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&log_file)?;

        Ok(Logger {
            log_file: Some(log_file),
            echo,
        })
    }

    /// Creates a `Logger` without a backing file. With `echo` disabled every
    /// call is a no-op.
    pub fn console(echo: bool) -> Self {
        Logger {
            log_file: None,
            echo,
        }
    }

    /// Path of the backing log file, if any.
    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    fn log(&self, level: LogLevel, message: &str) -> Result<(), LoggerError> {
        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S");
        let log_message = format!("[{}] [{}]: {}\n", level.tag(), timestamp, message);

        if self.echo {
            let mut stdout = io::stdout().lock();
            write!(stdout, "{}{}\x1b[0m", level.ansi_code(), log_message)?;
            stdout.flush()?;
        }

        if let Some(path) = &self.log_file {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            file.write_all(log_message.as_bytes())?;
            file.flush()?;
        }

        Ok(())
    }

    /// Logs an informational message with the given console color.
    pub fn info(&self, message: &str, color: Color) -> Result<(), LoggerError> {
        self.log(LogLevel::Info(color), message)
    }

    /// Logs a warning message.
    pub fn warn(&self, message: &str) -> Result<(), LoggerError> {
        self.log(LogLevel::Warn, message)
    }

    /// Logs an error message.
    pub fn error(&self, message: &str) -> Result<(), LoggerError> {
        self.log(LogLevel::Error, message)
    }
}

#[derive(Debug)]
pub enum LoggerError {
    IoError(std::io::Error),
    InvalidPath(String),
}

impl std::fmt::Display for LoggerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggerError::IoError(e) => write!(f, "I/O Error: {}", e),
            LoggerError::InvalidPath(msg) => write!(f, "Invalid Path: {}", msg),
        }
    }
}

impl std::error::Error for LoggerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoggerError::IoError(e) => Some(e),
            LoggerError::InvalidPath(_) => None,
        }
    }
}

impl From<std::io::Error> for LoggerError {
    fn from(err: std::io::Error) -> Self {
        LoggerError::IoError(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("logger_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_logger_creation_and_logging() {
        let log_dir = scratch_dir("creation");

        let logger = Logger::new(&log_dir, "toilet-map", false).expect("Failed to create logger");

        logger
            .info("Test log message.", Color::Green)
            .expect("Failed to log message");
        logger.warn("Something odd.").expect("Failed to log warning");

        let log_contents =
            fs::read_to_string(log_dir.join("toilet-map.log")).expect("Failed to read log file");

        assert!(log_contents.contains("[INFO]"), "INFO level missing in log");
        assert!(log_contents.contains("Test log message."));
        assert!(log_contents.contains("[WARN]"), "WARN level missing in log");
        assert_eq!(log_contents.lines().count(), 2);

        fs::remove_dir_all(&log_dir).expect("Failed to remove test directory");
    }

    #[test]
    fn test_name_is_sanitized() {
        let log_dir = scratch_dir("sanitize");

        let logger = Logger::new(&log_dir, "127.0.0.1:5000", false).expect("Failed to create logger");

        assert_eq!(
            logger.log_file(),
            Some(log_dir.join("127.0.0.1_5000.log").as_path())
        );

        fs::remove_dir_all(&log_dir).expect("Failed to remove test directory");
    }

    #[test]
    fn test_file_as_directory_is_rejected() {
        let log_dir = scratch_dir("not_a_dir");
        fs::create_dir_all(&log_dir).expect("Failed to create test directory");
        let file_path = log_dir.join("plain-file");
        fs::write(&file_path, b"x").expect("Failed to create file");

        let result = Logger::new(&file_path, "toilet-map", false);
        assert!(matches!(result, Err(LoggerError::InvalidPath(_))));

        fs::remove_dir_all(&log_dir).expect("Failed to remove test directory");
    }

    #[test]
    fn test_console_logger_without_echo_is_silent() {
        let logger = Logger::console(false);
        assert!(logger.log_file().is_none());
        assert!(logger.error("ignored").is_ok());
    }
}
