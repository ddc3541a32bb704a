//! Keyed cache stores with time-based expiry.
//!
//! The rule registry treats its cache as an external service reached through
//! [`CacheStore`]. Values are opaque byte blobs; a missing or expired key is a
//! miss, never an error.
//!
//! Two stores ship with the crate:
//!
//! - [`MemoryCache`] - process-local map, expired entries dropped on read
//! - [`FileCache`] - one file per key, survives process restarts

mod file;
mod memory;

use std::time::Duration;

use thiserror::Error;

pub use file::FileCache;
pub use memory::MemoryCache;

/// Per-write options for [`CacheStore::store`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
	/// How long the value stays readable after it is written.
	///
	/// A zero expiry writes a value that is already stale.
	pub expiry: Duration,
}

impl StoreOptions {
	/// Options expiring after `expiry`.
	pub const fn expiring(expiry: Duration) -> Self {
		Self { expiry }
	}
}

/// Errors raised when writing to a cache store.
#[derive(Debug, Error)]
pub enum CacheError {
	/// Backing storage failed.
	#[error("cache I/O error: {0}")]
	Io(#[from] std::io::Error),
	/// The entry envelope could not be serialized.
	#[error("cache encode error: {0}")]
	Encode(String),
}

/// A keyed blob store with per-entry expiry.
pub trait CacheStore: Send + Sync {
	/// Returns the live value stored under `key`, or `None` on a miss.
	fn get(&self, key: &str) -> Option<Vec<u8>>;

	/// Stores `value` under `key`, replacing any previous value.
	fn store(&self, key: &str, value: Vec<u8>, options: StoreOptions) -> Result<(), CacheError>;
}

impl<T: CacheStore + ?Sized> CacheStore for std::sync::Arc<T> {
	fn get(&self, key: &str) -> Option<Vec<u8>> {
		(**self).get(key)
	}

	fn store(&self, key: &str, value: Vec<u8>, options: StoreOptions) -> Result<(), CacheError> {
		(**self).store(key, value, options)
	}
}
