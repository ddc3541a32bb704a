//! The rule catalog service.

use std::sync::Arc;

use accolade_cache::{CacheStore, StoreOptions};
use accolade_config::RulesConfig;
use parking_lot::Mutex;

use crate::transform::{CatalogTransform, TransformChain};
use crate::{DraftCatalog, Rule, RuleCatalog, RuleError, RuleTypes, codec};

/// Cache key of the encoded full catalog.
pub const CATALOG_CACHE_KEY: &str = "badges.rules";

/// Produces the name-sorted catalog of installed rule types, cache-aside.
///
/// On a miss every registered type is constructed once to read its display
/// name, the draft runs through the registered transforms, and the sorted
/// result is written back with the configured expiry.
pub struct RuleRegistry {
	types: Arc<RuleTypes>,
	cache: Arc<dyn CacheStore>,
	config: RulesConfig,
	transforms: TransformChain,
	/// Serializes rebuilds so concurrent misses on this instance rebuild once.
	rebuild: Mutex<()>,
}

/// Builder for [`RuleRegistry`].
pub struct RuleRegistryBuilder {
	types: Arc<RuleTypes>,
	cache: Arc<dyn CacheStore>,
	config: RulesConfig,
	transforms: TransformChain,
}

impl RuleRegistryBuilder {
	pub fn config(mut self, config: RulesConfig) -> Self {
		self.config = config;
		self
	}

	/// Appends a transform run on every rebuild, after the ones already added.
	pub fn transform<F>(mut self, transform: F) -> Self
	where
		F: Fn(DraftCatalog) -> DraftCatalog + Send + Sync + 'static,
	{
		self.transforms.push(Arc::new(transform) as CatalogTransform);
		self
	}

	pub fn build(self) -> RuleRegistry {
		RuleRegistry {
			types: self.types,
			cache: self.cache,
			config: self.config,
			transforms: self.transforms,
			rebuild: Mutex::new(()),
		}
	}
}

impl RuleRegistry {
	pub fn builder(types: Arc<RuleTypes>, cache: Arc<dyn CacheStore>) -> RuleRegistryBuilder {
		RuleRegistryBuilder {
			types,
			cache,
			config: RulesConfig::default(),
			transforms: TransformChain::default(),
		}
	}

	pub fn types(&self) -> &Arc<RuleTypes> {
		&self.types
	}

	pub fn cache(&self) -> &Arc<dyn CacheStore> {
		&self.cache
	}

	pub fn config(&self) -> RulesConfig {
		self.config
	}

	/// Returns the catalog of all rule types, sorted by display name.
	///
	/// Rule sources are reloaded first, even when the cache will answer.
	/// An empty catalog is returned as an empty mapping.
	pub fn catalog(&self) -> Result<RuleCatalog, RuleError> {
		self.types.load_sources();

		if let Some(catalog) = self.read_cached(CATALOG_CACHE_KEY) {
			return Ok(catalog);
		}

		let _rebuild = self.rebuild.lock();
		if let Some(catalog) = self.read_cached(CATALOG_CACHE_KEY) {
			return Ok(catalog);
		}

		let draft = self.transforms.apply(self.discover()?);
		if let Some((id, _)) = draft.iter().find(|(id, _)| !self.types.contains(id)) {
			return Err(RuleError::NotFound(id.to_string()));
		}

		let catalog = draft.into_sorted();
		tracing::info!(rules = catalog.len(), "rebuilt rule catalog");
		self.write_back(CATALOG_CACHE_KEY, &catalog)
	}

	/// Constructs a fresh instance of the rule type `id`.
	pub fn instantiate(&self, id: &str) -> Result<Box<dyn Rule>, RuleError> {
		let def = self.types.get(id).ok_or_else(|| RuleError::NotFound(id.to_string()))?;
		def.instantiate()
	}

	/// Builds the unsorted draft, one construction per registered type.
	fn discover(&self) -> Result<DraftCatalog, RuleError> {
		let mut draft = DraftCatalog::new();
		for def in self.types.all() {
			let rule = def.instantiate()?;
			draft.insert(def.id, rule.name());
		}
		Ok(draft)
	}

	pub(crate) fn store_options(&self) -> StoreOptions {
		StoreOptions::expiring(self.config.cache_expire)
	}

	/// Reads and decodes a cached catalog. Undecodable blobs count as a miss.
	pub(crate) fn read_cached(&self, key: &str) -> Option<RuleCatalog> {
		let Some(blob) = self.cache.get(key) else {
			tracing::debug!(key, "rule cache miss");
			return None;
		};

		match codec::decode(&blob) {
			Ok(catalog) => {
				tracing::debug!(key, rules = catalog.len(), "rule cache hit");
				Some(catalog)
			}
			Err(error) => {
				tracing::warn!(key, %error, "discarding undecodable cached catalog");
				None
			}
		}
	}

	/// Encodes and stores `catalog`, then returns the decoded stored blob.
	///
	/// A failed cache write is logged; the caller still gets the catalog.
	pub(crate) fn write_back(&self, key: &str, catalog: &RuleCatalog) -> Result<RuleCatalog, RuleError> {
		let blob = codec::encode(catalog)?;
		if let Err(error) = self.cache.store(key, blob.clone(), self.store_options()) {
			tracing::warn!(key, %error, "failed to store rule catalog");
		}
		Ok(codec::decode(&blob)?)
	}
}

#[cfg(test)]
mod tests;
