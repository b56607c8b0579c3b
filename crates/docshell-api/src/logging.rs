//! Logging configuration for docshell
//!
//! Builders and the shell evaluator emit `tracing` events; this module sets
//! up a subscriber for them with level filtering, pretty or compact output,
//! and optional daily-rotated log files.

use std::path::{Path, PathBuf};

use docshell_core::{Error, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

const DEFAULT_LOG_FILE: &str = "docshell.log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Log output destination
#[derive(Debug, Clone)]
pub enum LogOutput {
    /// Output to stdout
    Stdout,
    /// Output to a file with rotation
    File(PathBuf),
    /// Output to both stdout and file
    Both(PathBuf),
}

/// Log format style
#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    /// Human-readable multi-line format (default)
    Pretty,
    /// Compact single-line format
    Compact,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Filter directive, e.g. `info` or `docshell_core=trace`
    pub level: String,
    /// Output destination
    pub output: LogOutput,
    /// Format style
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            output: LogOutput::Stdout,
            format: LogFormat::Pretty,
        }
    }
}

impl LogConfig {
    /// Create config with info level and stdout output
    pub fn info() -> Self {
        Self::default()
    }

    /// Create config with debug level
    pub fn debug() -> Self {
        Self {
            level: "debug".to_string(),
            ..Default::default()
        }
    }

    /// Create config with trace level, which includes every chained call
    pub fn trace() -> Self {
        Self {
            level: "trace".to_string(),
            ..Default::default()
        }
    }

    /// Set log output to file with rotation
    pub fn with_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output = LogOutput::File(path.into());
        self
    }

    /// Set log output to both stdout and file
    pub fn with_both<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output = LogOutput::Both(path.into());
        self
    }

    /// Set log format
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set log level filter
    pub fn with_level<S: Into<String>>(mut self, level: S) -> Self {
        self.level = level.into();
        self
    }

    /// Initialize global logging with this configuration
    ///
    /// `RUST_LOG` overrides the configured level when set. For file output
    /// the returned guard must be kept alive; dropping it shuts down the
    /// writer thread.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use docshell::logging::LogConfig;
    ///
    /// let _guard = LogConfig::debug().init()?;
    /// # Ok::<(), docshell::Error>(())
    /// ```
    pub fn init(self) -> Result<Option<WorkerGuard>> {
        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .map_err(|e| Error::InvalidInput(format!("invalid log level '{}': {}", self.level, e)))?;

        let mut layers: Vec<BoxedLayer> = Vec::new();
        let mut guard = None;

        match &self.output {
            LogOutput::Stdout => layers.push(fmt_layer(self.format, std::io::stdout)),
            LogOutput::File(path) => {
                let (writer, file_guard) = file_writer(path);
                layers.push(fmt_layer(self.format, writer));
                guard = Some(file_guard);
            }
            LogOutput::Both(path) => {
                let (writer, file_guard) = file_writer(path);
                layers.push(fmt_layer(self.format, std::io::stdout));
                layers.push(fmt_layer(LogFormat::Compact, writer));
                guard = Some(file_guard);
            }
        }

        tracing_subscriber::registry()
            .with(layers)
            .with(env_filter)
            .try_init()
            .map_err(|e| Error::InvalidOperation(format!("logging already initialized: {}", e)))?;

        Ok(guard)
    }
}

fn fmt_layer<W>(format: LogFormat, writer: W) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    match format {
        LogFormat::Pretty => fmt::layer().with_writer(writer).pretty().boxed(),
        LogFormat::Compact => fmt::layer().with_writer(writer).compact().boxed(),
    }
}

fn file_writer(path: &Path) -> (tracing_appender::non_blocking::NonBlocking, WorkerGuard) {
    let file_appender = tracing_appender::rolling::daily(
        path.parent().unwrap_or_else(|| Path::new(".")),
        path.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(DEFAULT_LOG_FILE),
    );
    tracing_appender::non_blocking(file_appender)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_defaults() {
        let config = LogConfig::default();
        assert_eq!(config.level, "info");
        assert!(matches!(config.output, LogOutput::Stdout));
    }

    #[test]
    fn test_log_config_builders() {
        let config = LogConfig::trace()
            .with_file("/tmp/docshell-test.log")
            .with_format(LogFormat::Compact);
        assert_eq!(config.level, "trace");
        assert!(matches!(config.output, LogOutput::File(_)));
        assert!(matches!(config.format, LogFormat::Compact));

        let config = LogConfig::debug().with_both("shell.log").with_level("warn");
        assert_eq!(config.level, "warn");
        assert!(matches!(config.output, LogOutput::Both(_)));
    }
}
