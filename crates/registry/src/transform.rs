//! Extension point run on the draft catalog before it is sorted and cached.

use std::sync::Arc;

use crate::DraftCatalog;

/// Event name transforms run under.
pub const AFTER_GET_RULES: &str = "AfterGetRules";

/// A transform applied to the draft catalog during a rebuild.
///
/// Receives the draft and returns the possibly modified draft. Identities it
/// adds must be registered rule types.
pub type CatalogTransform = Arc<dyn Fn(DraftCatalog) -> DraftCatalog + Send + Sync>;

/// Ordered list of catalog transforms.
#[derive(Clone, Default)]
pub struct TransformChain {
	transforms: Vec<CatalogTransform>,
}

impl TransformChain {
	pub fn push(&mut self, transform: CatalogTransform) {
		self.transforms.push(transform);
	}

	pub fn len(&self) -> usize {
		self.transforms.len()
	}

	pub fn is_empty(&self) -> bool {
		self.transforms.is_empty()
	}

	/// Runs every transform in registration order.
	pub fn apply(&self, draft: DraftCatalog) -> DraftCatalog {
		if !self.transforms.is_empty() {
			tracing::trace!(event = AFTER_GET_RULES, transforms = self.transforms.len(), "running catalog transforms");
		}
		self.transforms.iter().fold(draft, |draft, transform| transform(draft))
	}
}

impl std::fmt::Debug for TransformChain {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TransformChain").field("len", &self.transforms.len()).finish()
	}
}
