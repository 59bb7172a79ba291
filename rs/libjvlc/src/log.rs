use tracing_subscriber::EnvFilter;

const DEFAULT_LEVEL: &str = "info";

/// Logging configuration.
///
/// Diagnostics are written to stderr, which the JVM inherits.
#[derive(Clone, Debug, Default, clap::Args, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
#[non_exhaustive]
pub struct Log {
	/// The log filter, for example "warn" or "jvlc=debug".
	#[serde(skip_serializing_if = "Option::is_none")]
	#[arg(id = "log-level", long = "log-level", env = "JVLC_LOG_LEVEL")]
	pub level: Option<String>,
}

impl Log {
	pub fn level(&self) -> &str {
		self.level.as_deref().unwrap_or(DEFAULT_LEVEL)
	}

	/// Install the global subscriber.
	///
	/// Only the first call has an effect; the host application may also own a subscriber.
	pub fn init(&self) {
		let filter = EnvFilter::try_new(self.level()).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

		let res = tracing_subscriber::fmt()
			.with_env_filter(filter)
			.with_writer(std::io::stderr)
			.try_init();

		if res.is_ok() {
			tracing::debug!(level = self.level(), "logging initialized");
		}
	}
}
