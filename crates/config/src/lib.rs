//! Configuration for accolade.
//!
//! Settings are written in TOML and read back through [`ConfigLookup`] using
//! dotted key paths, so consumers only ever ask for the one value they need:
//!
//! ```toml
//! [rules]
//! # Seconds a rebuilt rule catalog stays in the cache.
//! cache_expire = 86400
//! ```
//!
//! A missing file is not an error; every key has a default owned by the
//! consumer that reads it (see [`RulesConfig`]).

pub mod error;
pub mod rules;

use std::path::Path;

pub use error::{ConfigError, Result};
pub use rules::{CACHE_EXPIRE_KEY, DEFAULT_CACHE_EXPIRE_SECS, RulesConfig};

/// Read access to configuration values by named key.
pub trait ConfigLookup {
	/// Returns the value stored under a dotted key path such as `rules.cache_expire`.
	fn lookup(&self, key: &str) -> Option<&toml::Value>;
}

/// Parsed configuration document.
#[derive(Debug, Clone, Default)]
pub struct Settings {
	root: toml::Table,
}

impl Settings {
	/// Parse a TOML string into [`Settings`].
	pub fn parse(input: &str) -> Result<Self> {
		let root: toml::Table = toml::from_str(input)?;
		Ok(Self { root })
	}

	/// Load settings from a file.
	///
	/// A file that does not exist yields default settings.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		if !path.exists() {
			tracing::debug!(path = %path.display(), "no config file, using defaults");
			return Ok(Self::default());
		}

		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		Self::parse(&content)
	}

	/// Merge another settings document into this one.
	///
	/// Values from `other` override values in `self`; nested tables merge key by key.
	pub fn merge(&mut self, other: Settings) {
		merge_tables(&mut self.root, other.root);
	}
}

impl ConfigLookup for Settings {
	fn lookup(&self, key: &str) -> Option<&toml::Value> {
		let mut segments = key.split('.');
		let mut current = self.root.get(segments.next()?)?;
		for segment in segments {
			current = current.as_table()?.get(segment)?;
		}
		Some(current)
	}
}

fn merge_tables(base: &mut toml::Table, other: toml::Table) {
	for (key, value) in other {
		match (base.get_mut(&key), value) {
			(Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
				merge_tables(existing, incoming);
			}
			(_, value) => {
				base.insert(key, value);
			}
		}
	}
}
