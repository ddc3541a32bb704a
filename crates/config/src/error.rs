//! Error types for configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading or reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax.
	#[error("TOML parse error: {0}")]
	Parse(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A key was present but its value has the wrong shape.
	#[error("invalid value for '{key}': {reason}")]
	InvalidValue {
		/// Dotted key path of the offending value.
		key: String,
		/// What was expected instead.
		reason: String,
	},
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
