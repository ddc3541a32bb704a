//! Settings consumed by the rule registry.

use std::time::Duration;

use crate::{ConfigError, ConfigLookup, Result};

/// Key holding the catalog cache lifetime, in seconds.
pub const CACHE_EXPIRE_KEY: &str = "rules.cache_expire";

/// Catalog cache lifetime used when [`CACHE_EXPIRE_KEY`] is unset.
pub const DEFAULT_CACHE_EXPIRE_SECS: u64 = 86_400;

/// Resolved rule registry settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RulesConfig {
	/// Lifetime of both the full catalog and the interaction subset in the cache.
	pub cache_expire: Duration,
}

impl Default for RulesConfig {
	fn default() -> Self {
		Self {
			cache_expire: Duration::from_secs(DEFAULT_CACHE_EXPIRE_SECS),
		}
	}
}

impl RulesConfig {
	/// Reads rule settings from `lookup`, falling back to defaults for absent keys.
	pub fn from_lookup(lookup: &impl ConfigLookup) -> Result<Self> {
		let Some(value) = lookup.lookup(CACHE_EXPIRE_KEY) else {
			return Ok(Self::default());
		};

		let secs = value
			.as_integer()
			.ok_or_else(|| ConfigError::InvalidValue {
				key: CACHE_EXPIRE_KEY.to_string(),
				reason: format!("expected integer seconds, found {}", value.type_str()),
			})?;
		let secs = u64::try_from(secs).map_err(|_| ConfigError::InvalidValue {
			key: CACHE_EXPIRE_KEY.to_string(),
			reason: format!("expected non-negative seconds, found {secs}"),
		})?;

		Ok(Self {
			cache_expire: Duration::from_secs(secs),
		})
	}
}
