//! Telemetry and tracing utilities
//!
//! Initializes a `tracing-subscriber` registry with console and/or file output.
//!
//! ## Example
//!
//! ```rust,ignore
//! use leetbuddy::telemetry::{init_subscriber, OutputFormat, SubscriberConfig};
//!
//! let config = SubscriberConfig::builder()
//!     .log_level(tracing::Level::DEBUG)
//!     .output_format(OutputFormat::Json)
//!     .build();
//! let _guard = init_subscriber(config)?;
//! ```

use leetbuddy_core::error::{BuddyError, Result, keys};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Environment variable names read by [`SubscriberConfig::from_lookup`].
pub mod vars {
    pub const LOG_LEVEL: &str = "LEETBUDDY_LOG_LEVEL";
    pub const LOG_FORMAT: &str = "LEETBUDDY_LOG_FORMAT";
    pub const LOG_FILE: &str = "LEETBUDDY_LOG_FILE";
}

/// Output format for tracing logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON, one object per event
    Json,
    /// JSON with event fields flattened to the top level
    JsonCompact,
}

impl std::str::FromStr for OutputFormat {
    type Err = BuddyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "json-compact" | "json_compact" => Ok(Self::JsonCompact),
            _ => Err(BuddyError::configuration(format!(
                "Invalid log format: {s}. Valid options: text, json, json-compact"
            ))
            .with_context(keys::VARIABLE, vars::LOG_FORMAT)),
        }
    }
}

/// Configuration for the tracing subscriber
#[derive(Debug, Clone)]
pub struct SubscriberConfig {
    pub log_level: tracing::Level,
    pub output_format: OutputFormat,
    /// Write to stdout
    pub enable_console: bool,
    /// Also write to this file (never rotated)
    pub log_file: Option<PathBuf>,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            log_level: tracing::Level::INFO,
            output_format: OutputFormat::Text,
            enable_console: true,
            log_file: None,
        }
    }
}

impl SubscriberConfig {
    pub fn builder() -> SubscriberConfigBuilder {
        SubscriberConfigBuilder::default()
    }

    pub fn debug() -> Self {
        Self {
            log_level: tracing::Level::DEBUG,
            ..Self::default()
        }
    }

    /// Structured JSON to stdout at INFO.
    pub fn production() -> Self {
        Self {
            log_level: tracing::Level::INFO,
            output_format: OutputFormat::Json,
            enable_console: true,
            log_file: None,
        }
    }

    /// Build from `LEETBUDDY_LOG_LEVEL`, `LEETBUDDY_LOG_FORMAT` and
    /// `LEETBUDDY_LOG_FILE` read through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut builder = Self::builder();
        if let Some(level) = lookup(vars::LOG_LEVEL) {
            builder = builder.log_level_str(&level)?;
        }
        if let Some(format) = lookup(vars::LOG_FORMAT) {
            builder = builder.output_format(format.parse()?);
        }
        if let Some(path) = lookup(vars::LOG_FILE).filter(|p| !p.trim().is_empty()) {
            builder = builder.log_file(PathBuf::from(path));
        }
        Ok(builder.build())
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }
}

/// Builder for `SubscriberConfig`
#[derive(Debug, Default)]
pub struct SubscriberConfigBuilder {
    log_level: Option<tracing::Level>,
    output_format: Option<OutputFormat>,
    enable_console: Option<bool>,
    log_file: Option<PathBuf>,
}

impl SubscriberConfigBuilder {
    pub fn log_level(mut self, level: tracing::Level) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Set the log level from `trace`, `debug`, `info`, `warn` or `error`.
    pub fn log_level_str(mut self, level: &str) -> Result<Self> {
        let level = match level.trim().to_ascii_lowercase().as_str() {
            "trace" => tracing::Level::TRACE,
            "debug" => tracing::Level::DEBUG,
            "info" => tracing::Level::INFO,
            "warn" => tracing::Level::WARN,
            "error" => tracing::Level::ERROR,
            _ => {
                return Err(BuddyError::configuration(format!(
                    "Invalid log level: {level}. Valid options: trace, debug, info, warn, error"
                ))
                .with_context(keys::VARIABLE, vars::LOG_LEVEL));
            }
        };
        self.log_level = Some(level);
        Ok(self)
    }

    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    pub fn enable_console(mut self, enable: bool) -> Self {
        self.enable_console = Some(enable);
        self
    }

    pub fn log_file(mut self, path: PathBuf) -> Self {
        self.log_file = Some(path);
        self
    }

    pub fn build(self) -> SubscriberConfig {
        SubscriberConfig {
            log_level: self.log_level.unwrap_or(tracing::Level::INFO),
            output_format: self.output_format.unwrap_or_default(),
            enable_console: self.enable_console.unwrap_or(true),
            log_file: self.log_file,
        }
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

fn fmt_layer<W>(format: OutputFormat, writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_ansi(ansi);
    match format {
        OutputFormat::Text => layer.boxed(),
        OutputFormat::Json => layer
            .json()
            .with_thread_ids(true)
            .with_thread_names(true)
            .boxed(),
        OutputFormat::JsonCompact => layer
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .boxed(),
    }
}

/// Directive used when `RUST_LOG` is unset.
fn default_directive(level: tracing::Level) -> String {
    format!("leetbuddy={}", level.as_str().to_ascii_lowercase())
}

fn split_log_path(path: &Path) -> Result<(PathBuf, PathBuf)> {
    let file_name = path.file_name().ok_or_else(|| {
        BuddyError::configuration(format!("log file path has no file name: {}", path.display()))
    })?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    Ok((dir, PathBuf::from(file_name)))
}

/// Initialize the global tracing subscriber.
///
/// Returns the file writer's `WorkerGuard` when `log_file` is set; keep it
/// alive for the life of the program. Calling this when a subscriber is
/// already installed is not an error.
pub fn init_subscriber(config: SubscriberConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config.log_level)));

    let mut layers: Vec<BoxedLayer> = Vec::new();
    if config.enable_console {
        layers.push(fmt_layer(config.output_format, std::io::stdout, true));
    }

    let guard = match &config.log_file {
        Some(path) => {
            let (dir, file_name) = split_log_path(path)?;
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            layers.push(fmt_layer(config.output_format, writer, false));
            Some(guard)
        }
        None => None,
    };

    match tracing_subscriber::registry().with(layers).with(filter).try_init() {
        Ok(()) => Ok(guard),
        Err(e) => {
            let message = e.to_string();
            if message.contains("already been set") || message.contains("already initialized") {
                Ok(None)
            } else {
                Err(BuddyError::configuration(format!("Failed to initialize tracing: {e}")))
            }
        }
    }
}

/// Text output at INFO.
pub fn init_default() -> Result<Option<WorkerGuard>> {
    init_subscriber(SubscriberConfig::default())
}

/// Configured from `LEETBUDDY_LOG_*` environment variables.
pub fn init_from_env() -> Result<Option<WorkerGuard>> {
    init_subscriber(SubscriberConfig::from_env()?)
}
