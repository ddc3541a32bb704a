use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::{CacheError, CacheStore, StoreOptions};

/// On-disk envelope around a cached value.
#[derive(Serialize, Deserialize)]
struct FileEntry {
	/// Unix time in milliseconds after which the entry is stale.
	expires_at_ms: u64,
	value: Vec<u8>,
}

/// Cache store keeping one file per key under a directory.
///
/// File names are the key with every byte outside `[A-Za-z0-9_-]` escaped as
/// `%XX`, so distinct keys never share a file.
///
/// Unlike [`MemoryCache`](crate::MemoryCache) the contents outlive the
/// process, so separate invocations share rebuilt values until they expire.
/// Each write goes through its own uniquely named temporary file and a
/// rename; concurrent writers race last-writer-wins. A failed rename leaves
/// no temporary file behind.
pub struct FileCache {
	dir: PathBuf,
}

impl FileCache {
	/// Opens a cache rooted at `dir`. The directory is created on first write.
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self { dir: dir.into() }
	}

	pub fn dir(&self) -> &Path {
		&self.dir
	}

	fn path_for(&self, key: &str) -> PathBuf {
		let mut name = String::with_capacity(key.len());
		for byte in key.bytes() {
			if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
				name.push(char::from(byte));
			} else {
				name.push_str(&format!("%{byte:02X}"));
			}
		}
		self.dir.join(format!("{name}.bin"))
	}

	fn discard(path: &Path) {
		if let Err(error) = std::fs::remove_file(path)
			&& error.kind() != ErrorKind::NotFound
		{
			tracing::warn!(path = %path.display(), %error, "failed to remove stale cache file");
		}
	}
}

fn now_ms() -> u64 {
	let elapsed = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
	u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

impl CacheStore for FileCache {
	fn get(&self, key: &str) -> Option<Vec<u8>> {
		let path = self.path_for(key);
		let bytes = match std::fs::read(&path) {
			Ok(bytes) => bytes,
			Err(error) if error.kind() == ErrorKind::NotFound => return None,
			Err(error) => {
				tracing::warn!(path = %path.display(), %error, "failed to read cache file");
				return None;
			}
		};

		let entry: FileEntry = match postcard::from_bytes(&bytes) {
			Ok(entry) => entry,
			Err(error) => {
				tracing::warn!(path = %path.display(), %error, "discarding unreadable cache file");
				Self::discard(&path);
				return None;
			}
		};

		if now_ms() >= entry.expires_at_ms {
			tracing::trace!(key, "cache file expired");
			Self::discard(&path);
			return None;
		}

		Some(entry.value)
	}

	fn store(&self, key: &str, value: Vec<u8>, options: StoreOptions) -> Result<(), CacheError> {
		let expiry_ms = u64::try_from(options.expiry.as_millis()).unwrap_or(u64::MAX);
		let entry = FileEntry {
			expires_at_ms: now_ms().saturating_add(expiry_ms),
			value,
		};
		let bytes = postcard::to_stdvec(&entry).map_err(|e| CacheError::Encode(e.to_string()))?;

		std::fs::create_dir_all(&self.dir)?;
		let mut tmp = NamedTempFile::new_in(&self.dir)?;
		tmp.write_all(&bytes)?;
		tmp.persist(self.path_for(key)).map_err(|e| e.error)?;
		Ok(())
	}
}
