//! The interactive subset of the rule catalog.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{RuleCatalog, RuleError, RuleRegistry};

/// Cache key of the encoded interactive subset.
pub const INTERACTIVE_CACHE_KEY: &str = "badges.interaction_rules";

/// Rules one user's action can trigger for another user.
///
/// The subset is cached under its own key with the registry's expiry, and
/// additionally memoized on this instance. The memo is filled at most once and
/// never invalidated, so a filter sees one answer for its whole lifetime;
/// scope instances to the unit of work that should share that answer.
///
/// The subset is not rebuilt when the full catalog changes. It catches up
/// only once its own cache entry expires.
pub struct InteractionFilter {
	registry: Arc<RuleRegistry>,
	memo: Mutex<Option<Arc<RuleCatalog>>>,
}

impl InteractionFilter {
	pub fn new(registry: Arc<RuleRegistry>) -> Self {
		Self {
			registry,
			memo: Mutex::new(None),
		}
	}

	pub fn registry(&self) -> &Arc<RuleRegistry> {
		&self.registry
	}

	/// Whether a subset has been memoized on this instance.
	pub fn is_memoized(&self) -> bool {
		self.memo.lock().is_some()
	}

	/// Returns the interactive rules, in catalog order.
	///
	/// Concurrent first calls on one instance are serialized; a failed rebuild
	/// leaves the memo empty.
	pub fn interactive(&self) -> Result<Arc<RuleCatalog>, RuleError> {
		let mut memo = self.memo.lock();
		if let Some(subset) = memo.as_ref() {
			return Ok(Arc::clone(subset));
		}

		let subset = match self.registry.read_cached(INTERACTIVE_CACHE_KEY) {
			Some(subset) => subset,
			None => self.rebuild()?,
		};

		let subset = Arc::new(subset);
		*memo = Some(Arc::clone(&subset));
		Ok(subset)
	}

	fn rebuild(&self) -> Result<RuleCatalog, RuleError> {
		let catalog = self.registry.catalog()?;

		let mut interactive = Vec::new();
		for id in catalog.ids() {
			if self.registry.instantiate(id)?.interacts() {
				interactive.push(id);
			}
		}
		let subset = catalog.filter(|id, _| interactive.contains(&id));

		tracing::info!(rules = subset.len(), of = catalog.len(), "rebuilt interactive rule subset");
		self.registry.write_back(INTERACTIVE_CACHE_KEY, &subset)
	}
}
