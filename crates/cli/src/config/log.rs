//! Logging configuration for the kubegen binaries.
//!
//! [`LogConfig`] describes where log events go (stdout, stderr, journald or a
//! file), how verbose they are and how they are formatted.
//! [`LogConfig::registry`] turns it into a global `tracing` subscriber.
use std::{fs::OpenOptions, path::PathBuf};

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use tracing_subscriber::{
    Layer, fmt::MakeWriter, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt,
};

/// Where and how log events are emitted.
///
/// Generated manifests may be written to standard output, so events go to
/// standard error unless configured otherwise.
#[serde_as]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogConfig {
    /// Optional file that receives log events in addition to the other
    /// targets.
    #[serde(default = "LogConfig::default_file_path")]
    pub file_path: Option<PathBuf>,

    #[serde(default = "LogConfig::default_emit_journald")]
    pub emit_journald: bool,

    #[serde(default = "LogConfig::default_emit_stdout")]
    pub emit_stdout: bool,

    #[serde(default = "LogConfig::default_emit_stderr")]
    pub emit_stderr: bool,

    #[serde(default)]
    pub format: LogFormat,

    /// Events below this level are dropped.
    #[serde(default = "LogConfig::default_log_level")]
    #[serde_as(as = "DisplayFromStr")]
    pub level: tracing::Level,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file_path: Self::default_file_path(),
            emit_journald: Self::default_emit_journald(),
            emit_stdout: Self::default_emit_stdout(),
            emit_stderr: Self::default_emit_stderr(),
            format: LogFormat::default(),
            level: Self::default_log_level(),
        }
    }
}

impl LogConfig {
    #[inline]
    #[must_use]
    pub const fn default_log_level() -> tracing::Level { tracing::Level::WARN }

    #[inline]
    #[must_use]
    pub const fn default_file_path() -> Option<PathBuf> { None }

    #[inline]
    #[must_use]
    pub const fn default_emit_journald() -> bool { false }

    #[inline]
    #[must_use]
    pub const fn default_emit_stdout() -> bool { false }

    #[inline]
    #[must_use]
    pub const fn default_emit_stderr() -> bool { true }

    /// Installs the global `tracing` subscriber described by this
    /// configuration.
    ///
    /// # Panics
    ///
    /// Panics when a global subscriber has already been installed.
    pub fn registry(&self) {
        let Self { emit_journald, file_path, emit_stdout, emit_stderr, format, level } = self;

        let filter_layer = tracing_subscriber::filter::LevelFilter::from_level(*level);

        tracing_subscriber::registry()
            .with(filter_layer)
            .with(emit_journald.then(|| LogDriver::Journald.layer(*format)))
            .with(file_path.clone().map(|path| LogDriver::File(path).layer(*format)))
            .with(emit_stdout.then(|| LogDriver::Stdout.layer(*format)))
            .with(emit_stderr.then(|| LogDriver::Stderr.layer(*format)))
            .init();
    }
}

/// Line layout of formatted log events.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line output with thread information.
    Pretty,
    /// One line per event.
    #[default]
    Compact,
}

#[derive(Clone, Debug)]
enum LogDriver {
    Stdout,
    Stderr,
    Journald,
    File(PathBuf),
}

impl LogDriver {
    /// Builds the layer for this target, or `None` when the target cannot be
    /// opened (unwritable file, no journald socket).
    #[allow(clippy::type_repetition_in_bounds)]
    fn layer<S>(self, format: LogFormat) -> Option<Box<dyn Layer<S> + Send + Sync + 'static>>
    where
        S: tracing::Subscriber,
        for<'a> S: LookupSpan<'a>,
    {
        match self {
            Self::Stdout => Some(formatted(format, std::io::stdout, true)),
            Self::Stderr => Some(formatted(format, std::io::stderr, true)),
            Self::File(path) => {
                let file = OpenOptions::new().create(true).append(true).open(path).ok()?;
                Some(formatted(format, file, false))
            }
            Self::Journald => Some(Box::new(tracing_journald::layer().ok()?)),
        }
    }
}

#[allow(clippy::type_repetition_in_bounds)]
fn formatted<S, W>(
    format: LogFormat,
    writer: W,
    ansi: bool,
) -> Box<dyn Layer<S> + Send + Sync + 'static>
where
    S: tracing::Subscriber,
    for<'a> S: LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer().with_ansi(ansi).with_writer(writer);
    match format {
        LogFormat::Pretty => {
            Box::new(layer.pretty().with_thread_ids(true).with_thread_names(true))
        }
        LogFormat::Compact => Box::new(layer.compact()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_logs_to_stderr_only() {
        let config = LogConfig::default();
        assert!(config.emit_stderr);
        assert!(!config.emit_stdout);
        assert!(!config.emit_journald);
        assert!(config.file_path.is_none());
        assert_eq!(config.level, tracing::Level::WARN);
        assert_eq!(config.format, LogFormat::Compact);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: LogConfig =
            serde_yaml::from_str("level: DEBUG\nformat: pretty\nemitStdout: true\n").unwrap();
        assert_eq!(config.level, tracing::Level::DEBUG);
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.emit_stdout);
        assert!(config.emit_stderr);
    }
}
