use std::path::PathBuf;
use std::sync::LazyLock;

use anyhow::Context;
use clap::Parser;

use crate::{Log, SurfacePolicy};

/// Environment variable naming an optional TOML configuration file.
pub const CONFIG_PATH_ENV: &str = "JVLC_CONFIG";

pub const DEFAULT_INSTANCE_FIELD: &str = "_instance";
pub const DEFAULT_EXCEPTION_CLASS: &str = "org/videolan/jvlc/VLCException";

static CONFIG: LazyLock<Config> = LazyLock::new(|| {
	Config::load().unwrap_or_else(|err| {
		Log::default().init();
		tracing::warn!(?err, "invalid configuration, using defaults");
		Config::default()
	})
});

/// The process-wide configuration, loaded on first use.
pub fn config() -> &'static Config {
	&CONFIG
}

/// Configuration for the native library.
///
/// There is no command line inside the JVM: values come from `JVLC_*`
/// environment variables, layered over the TOML file named by `JVLC_CONFIG`.
#[derive(Clone, Debug, Default, clap::Parser, serde::Serialize, serde::Deserialize)]
#[command(name = "jvlc")]
#[serde(default, deny_unknown_fields)]
#[non_exhaustive]
pub struct Config {
	/// Load libvlc from this path instead of the platform default.
	#[serde(skip_serializing_if = "Option::is_none")]
	#[arg(id = "vlc-library", long = "vlc-library", env = "JVLC_VLC_LIBRARY")]
	pub vlc_library: Option<PathBuf>,

	/// Load JAWT from this path instead of the platform default.
	#[serde(skip_serializing_if = "Option::is_none")]
	#[arg(id = "jawt-library", long = "jawt-library", env = "JVLC_JAWT_LIBRARY")]
	pub jawt_library: Option<PathBuf>,

	/// Load Xlib from this path instead of the platform default.
	#[serde(skip_serializing_if = "Option::is_none")]
	#[arg(id = "x11-library", long = "x11-library", env = "JVLC_X11_LIBRARY")]
	pub x11_library: Option<PathBuf>,

	/// The `long` field of the Java object holding the libvlc instance.
	#[serde(skip_serializing_if = "Option::is_none")]
	#[arg(id = "instance-field", long = "instance-field", env = "JVLC_INSTANCE_FIELD")]
	pub instance_field: Option<String>,

	/// The Java exception class thrown on failure, in JNI notation.
	#[serde(skip_serializing_if = "Option::is_none")]
	#[arg(id = "exception-class", long = "exception-class", env = "JVLC_EXCEPTION_CLASS")]
	pub exception_class: Option<String>,

	/// Throw when the AWT drawing surface can't be acquired, instead of only logging.
	#[serde(skip_serializing_if = "Option::is_none")]
	#[arg(
		id = "throw-surface-errors",
		long = "throw-surface-errors",
		env = "JVLC_THROW_SURFACE_ERRORS",
		default_missing_value = "true",
		num_args = 0..=1,
		value_parser = clap::value_parser!(bool),
	)]
	pub throw_surface_errors: Option<bool>,

	#[command(flatten)]
	#[serde(default)]
	pub log: Log,
}

impl Config {
	/// Read the TOML file (if any), then apply the environment on top.
	pub fn load() -> anyhow::Result<Self> {
		let mut config = match std::env::var_os(CONFIG_PATH_ENV) {
			Some(path) => {
				let toml = std::fs::read_to_string(&path)
					.with_context(|| format!("failed to read {}", PathBuf::from(&path).display()))?;
				toml::from_str(&toml).context("failed to parse config")?
			}
			None => Config::default(),
		};

		config
			.try_update_from(["jvlc"])
			.context("invalid environment")?;

		Ok(config)
	}

	pub fn instance_field(&self) -> &str {
		self.instance_field.as_deref().unwrap_or(DEFAULT_INSTANCE_FIELD)
	}

	pub fn exception_class(&self) -> &str {
		self.exception_class.as_deref().unwrap_or(DEFAULT_EXCEPTION_CLASS)
	}

	pub fn surface_policy(&self) -> SurfacePolicy {
		match self.throw_surface_errors {
			Some(true) => SurfacePolicy::Throw,
			_ => SurfacePolicy::Warn,
		}
	}
}
