//! Cache blob format for rule catalogs.
//!
//! A blob is [`MAGIC`] followed by a postcard-encoded body. Empty catalogs
//! encode to a dedicated sentinel variant so a stored "no rules" result is
//! distinguishable from a cache miss.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::RuleCatalog;

/// Magic bytes identifying an encoded rule catalog.
pub const MAGIC: &[u8; 8] = b"ACLDCTLG";

/// Schema version for blob format compatibility.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
	#[error("blob does not start with the catalog magic")]
	BadMagic,
	#[error("unsupported catalog schema version {found} (expected {expected})")]
	Version { found: u32, expected: u32 },
	#[error("postcard: {0}")]
	Postcard(String),
}

impl From<postcard::Error> for CodecError {
	fn from(error: postcard::Error) -> Self {
		Self::Postcard(error.to_string())
	}
}

#[derive(Serialize, Deserialize)]
struct CatalogBlob {
	schema_version: u32,
	body: BlobBody,
}

#[derive(Serialize, Deserialize)]
enum BlobBody {
	/// Sentinel for a catalog with no entries.
	Empty,
	Rules(Vec<(String, String)>),
}

/// Encodes `catalog`, using the empty sentinel when it has no entries.
pub fn encode(catalog: &RuleCatalog) -> Result<Vec<u8>, CodecError> {
	let body = if catalog.is_empty() {
		BlobBody::Empty
	} else {
		BlobBody::Rules(
			catalog
				.iter()
				.map(|(id, name)| (id.to_string(), name.to_string()))
				.collect(),
		)
	};
	let blob = CatalogBlob {
		schema_version: SCHEMA_VERSION,
		body,
	};

	let mut out = MAGIC.to_vec();
	out.extend(postcard::to_stdvec(&blob)?);
	Ok(out)
}

/// Decodes a blob produced by [`encode`]. The sentinel decodes to an empty catalog.
pub fn decode(bytes: &[u8]) -> Result<RuleCatalog, CodecError> {
	let payload = bytes.strip_prefix(MAGIC.as_slice()).ok_or(CodecError::BadMagic)?;
	let blob: CatalogBlob = postcard::from_bytes(payload)?;
	if blob.schema_version != SCHEMA_VERSION {
		return Err(CodecError::Version {
			found: blob.schema_version,
			expected: SCHEMA_VERSION,
		});
	}

	Ok(match blob.body {
		BlobBody::Empty => RuleCatalog::new(),
		BlobBody::Rules(pairs) => RuleCatalog::from_ordered(pairs),
	})
}
