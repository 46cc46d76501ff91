//! Logging setup for toolsets applications and tools.
//!
//! Libraries in this workspace only emit [`tracing`] events. Binaries call
//! [`configure_logging`] once at start-up to install a formatted subscriber:
//!
//! ```no_run
//! use toolsets_logging::{LogLevel, LoggingConfig, configure_logging};
//!
//! configure_logging(LoggingConfig::new().with_level(LogLevel::Debug)).unwrap();
//! tracing::info!("ready");
//! ```
//!
//! A `RUST_LOG` environment variable, when set, takes precedence over the
//! configured level. Calling [`configure_logging`] again swaps in the new
//! level and target filter.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, reload};

static FILTER_HANDLE: OnceLock<reload::Handle<EnvFilter, Registry>> = OnceLock::new();

/// Errors raised while configuring logging.
#[derive(Debug, Error)]
pub enum LoggingError {
	/// The level name is not one of DEBUG, INFO, WARNING, ERROR or CRITICAL.
	#[error("Invalid log level: {0}")]
	InvalidLevel(String),

	/// The target filter could not be parsed.
	#[error("Invalid log filter '{directive}': {message}")]
	InvalidFilter {
		/// Directive that failed to parse.
		directive: String,
		/// Parser message.
		message: String,
	},

	/// The subscriber could not be installed.
	#[error("Failed to initialise logging: {0}")]
	Init(String),
}

/// Log level names accepted by [`LoggingConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
	/// Debug output.
	Debug,
	/// Informational output.
	#[default]
	Info,
	/// Warnings.
	Warning,
	/// Errors.
	Error,
	/// Critical errors. Maps to the error level.
	Critical,
}

impl LogLevel {
	/// Returns the closest `tracing` level.
	pub fn as_tracing_level(&self) -> tracing::Level {
		match self {
			LogLevel::Debug => tracing::Level::DEBUG,
			LogLevel::Info => tracing::Level::INFO,
			LogLevel::Warning => tracing::Level::WARN,
			LogLevel::Error | LogLevel::Critical => tracing::Level::ERROR,
		}
	}

	fn directive(&self) -> &'static str {
		match self {
			LogLevel::Debug => "debug",
			LogLevel::Info => "info",
			LogLevel::Warning => "warn",
			LogLevel::Error | LogLevel::Critical => "error",
		}
	}
}

impl fmt::Display for LogLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			LogLevel::Debug => "DEBUG",
			LogLevel::Info => "INFO",
			LogLevel::Warning => "WARNING",
			LogLevel::Error => "ERROR",
			LogLevel::Critical => "CRITICAL",
		};
		f.write_str(name)
	}
}

impl FromStr for LogLevel {
	type Err = LoggingError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_uppercase().as_str() {
			"DEBUG" => Ok(LogLevel::Debug),
			"INFO" => Ok(LogLevel::Info),
			"WARNING" | "WARN" => Ok(LogLevel::Warning),
			"ERROR" => Ok(LogLevel::Error),
			"CRITICAL" => Ok(LogLevel::Critical),
			_ => Err(LoggingError::InvalidLevel(s.to_string())),
		}
	}
}

/// Options for [`configure_logging`].
#[derive(Debug, Clone)]
pub struct LoggingConfig {
	/// Minimum level to emit.
	pub level: LogLevel,

	/// Restrict output to this target (for example `toolsets_fixtures`).
	pub target: Option<String>,

	/// Include the event target in each line.
	pub show_target: bool,

	/// Use ANSI colours.
	pub ansi: bool,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			level: LogLevel::default(),
			target: None,
			show_target: true,
			ansi: true,
		}
	}
}

impl LoggingConfig {
	/// Creates new default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the level.
	pub fn with_level(mut self, level: LogLevel) -> Self {
		self.level = level;
		self
	}

	/// Restricts output to one target.
	pub fn with_target(mut self, target: impl Into<String>) -> Self {
		self.target = Some(target.into());
		self
	}

	/// Sets whether targets are printed.
	pub fn with_show_target(mut self, show: bool) -> Self {
		self.show_target = show;
		self
	}

	/// Sets whether ANSI colours are used.
	pub fn with_ansi(mut self, ansi: bool) -> Self {
		self.ansi = ansi;
		self
	}

	/// Returns the filter directive for this configuration.
	pub fn filter_directive(&self) -> String {
		match &self.target {
			Some(target) => format!("{}={}", target, self.level.directive()),
			None => self.level.directive().to_string(),
		}
	}

	fn env_filter(&self) -> Result<EnvFilter, LoggingError> {
		if let Ok(filter) = EnvFilter::try_from_default_env() {
			return Ok(filter);
		}
		let directive = self.filter_directive();
		EnvFilter::try_new(&directive).map_err(|e| LoggingError::InvalidFilter {
			directive,
			message: e.to_string(),
		})
	}
}

/// Installs a formatted subscriber as the global default.
///
/// Returns `Ok(true)` when the subscriber was installed. Later calls replace
/// the level and target filter of the installed subscriber and return
/// `Ok(false)`; the output format (`show_target`, `ansi`) is fixed by the first
/// call. When another library installed the global subscriber, nothing is
/// changed and `Ok(false)` is returned.
pub fn configure_logging(config: LoggingConfig) -> Result<bool, LoggingError> {
	let filter = config.env_filter()?;

	if let Some(handle) = FILTER_HANDLE.get() {
		handle
			.reload(filter)
			.map_err(|e| LoggingError::Init(e.to_string()))?;
		tracing::debug!(level = %config.level, "logging reconfigured");
		return Ok(false);
	}

	if tracing::dispatcher::has_been_set() {
		return Ok(false);
	}

	let (filter, handle) = reload::Layer::new(filter);
	tracing_subscriber::registry()
		.with(filter)
		.with(
			tracing_subscriber::fmt::layer()
				.with_target(config.show_target)
				.with_ansi(config.ansi),
		)
		.try_init()
		.map_err(|e| LoggingError::Init(e.to_string()))?;
	FILTER_HANDLE.get_or_init(|| handle);

	tracing::debug!(level = %config.level, "logging configured");
	Ok(true)
}
