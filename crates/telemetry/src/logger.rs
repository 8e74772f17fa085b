use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Errors raised while setting up logging
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TelemetryError {
	#[error("Invalid log level: {0}")]
	InvalidLogLevel(String),

	#[error("Logger initialization failed: {0}")]
	InitFailed(String),
}

/// Custom time formatter that displays time as "YYYY-MM-DD HH:MM:SS.micros"
struct CustomTimeFormat;

impl FormatTime for CustomTimeFormat {
	fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
		let now = std::time::SystemTime::now();
		let datetime: chrono::DateTime<chrono::Local> = now.into();
		write!(w, "{}", datetime.format("[%Y-%m-%d %H:%M:%S%.6f]"))
	}
}

/// Initialize the console logger with the provided log level
///
/// This sets up a console logger with:
/// - The log level from the `level` parameter
/// - Timestamps in format: YYYY-MM-DD HH:MM:SS.micros
/// - Target/module information
///
/// Records emitted through the `log` facade (as `resp_codec` does) are
/// forwarded to the same subscriber.
///
/// # Example
///
/// ```no_run
/// telemetry::init("debug").unwrap();
/// ```
///
/// # Errors
///
/// Returns an error if the level is not one of trace, debug, info, warn,
/// error, or if a global logger is already installed.
pub fn init(level: &str) -> Result<(), TelemetryError> {
	let level = validate_level(level)?;

	tracing_subscriber::registry()
		.with(EnvFilter::new(&level))
		.with(
			fmt::layer()
				.with_timer(CustomTimeFormat)
				.with_target(true)
				.with_thread_ids(true)
				.with_line_number(false)
				.with_file(false),
		)
		.try_init()
		.map_err(|e| TelemetryError::InitFailed(e.to_string()))
}

fn validate_level(level: &str) -> Result<String, TelemetryError> {
	const VALID_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
	let level_lower = level.to_lowercase();

	if !VALID_LEVELS.contains(&level_lower.as_str()) {
		return Err(TelemetryError::InvalidLogLevel(level.to_string()));
	}
	Ok(level_lower)
}
