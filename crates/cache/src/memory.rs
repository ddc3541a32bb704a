use std::time::Instant;

use parking_lot::RwLock;
use rustc_hash::FxHashMap as HashMap;

use crate::{CacheError, CacheStore, StoreOptions};

struct Entry {
	value: Vec<u8>,
	/// `None` when the expiry overflows the clock.
	expires_at: Option<Instant>,
}

impl Entry {
	fn is_live(&self, now: Instant) -> bool {
		self.expires_at.is_none_or(|deadline| now < deadline)
	}
}

/// Process-local cache store.
///
/// Expired entries are dropped lazily when read.
#[derive(Default)]
pub struct MemoryCache {
	entries: RwLock<HashMap<Box<str>, Entry>>,
}

impl MemoryCache {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the number of live entries.
	pub fn len(&self) -> usize {
		let now = Instant::now();
		self.entries.read().values().filter(|e| e.is_live(now)).count()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Drops every entry.
	pub fn clear(&self) {
		self.entries.write().clear();
	}
}

impl CacheStore for MemoryCache {
	fn get(&self, key: &str) -> Option<Vec<u8>> {
		let now = Instant::now();
		{
			let entries = self.entries.read();
			match entries.get(key) {
				Some(entry) if entry.is_live(now) => return Some(entry.value.clone()),
				Some(_) => {}
				None => return None,
			}
		}

		let mut entries = self.entries.write();
		if entries.get(key).is_some_and(|e| !e.is_live(now)) {
			entries.remove(key);
		}
		None
	}

	fn store(&self, key: &str, value: Vec<u8>, options: StoreOptions) -> Result<(), CacheError> {
		let entry = Entry {
			value,
			expires_at: Instant::now().checked_add(options.expiry),
		};
		self.entries.write().insert(key.into(), entry);
		Ok(())
	}
}
