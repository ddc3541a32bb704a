//! Name-sorted views over the registered rule types.

use indexmap::IndexMap;
use serde::Serialize;

/// Ordered mapping from rule identity to display name.
///
/// Catalogs produced by the registry are sorted ascending by display name.
/// Equality is order-sensitive.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct RuleCatalog {
	entries: IndexMap<String, String>,
}

impl RuleCatalog {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a catalog keeping the given order.
	pub(crate) fn from_ordered(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
		Self {
			entries: pairs.into_iter().collect(),
		}
	}

	/// Returns the display name for `id`.
	pub fn get(&self, id: &str) -> Option<&str> {
		self.entries.get(id).map(String::as_str)
	}

	pub fn contains(&self, id: &str) -> bool {
		self.entries.contains_key(id)
	}

	/// Iterates `(id, name)` pairs in catalog order.
	pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &str)> + '_ {
		self.entries.iter().map(|(id, name)| (id.as_str(), name.as_str()))
	}

	pub fn ids(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
		self.entries.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// True if every entry of `self` appears in `other` under the same name.
	pub fn is_subset_of(&self, other: &RuleCatalog) -> bool {
		self.iter().all(|(id, name)| other.get(id) == Some(name))
	}

	/// Keeps the entries for which `keep` returns true, preserving order.
	pub fn filter(&self, mut keep: impl FnMut(&str, &str) -> bool) -> RuleCatalog {
		Self::from_ordered(
			self.iter()
				.filter(|(id, name)| keep(id, name))
				.map(|(id, name)| (id.to_string(), name.to_string())),
		)
	}
}

impl PartialEq for RuleCatalog {
	fn eq(&self, other: &Self) -> bool {
		self.entries.iter().eq(other.entries.iter())
	}
}

impl Eq for RuleCatalog {}

/// Insertion-ordered working copy of a catalog before sorting.
///
/// Handed to catalog transforms so they can add, rename or drop entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftCatalog {
	entries: IndexMap<String, String>,
}

impl DraftCatalog {
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts or renames an entry. Returns the previous name.
	///
	/// A new identity goes to the end; a renamed one keeps its position.
	pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) -> Option<String> {
		self.entries.insert(id.into(), name.into())
	}

	/// Removes an entry, keeping the order of the rest.
	pub fn remove(&mut self, id: &str) -> Option<String> {
		self.entries.shift_remove(id)
	}

	pub fn retain(&mut self, mut keep: impl FnMut(&str, &str) -> bool) {
		self.entries.retain(|id, name| keep(id, name));
	}

	pub fn get(&self, id: &str) -> Option<&str> {
		self.entries.get(id).map(String::as_str)
	}

	pub fn contains(&self, id: &str) -> bool {
		self.entries.contains_key(id)
	}

	pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &str)> + '_ {
		self.entries.iter().map(|(id, name)| (id.as_str(), name.as_str()))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Sorts by display name and freezes the draft.
	///
	/// The sort is stable and byte-wise, so equal names keep draft order and
	/// uppercase sorts before lowercase.
	pub fn into_sorted(mut self) -> RuleCatalog {
		self.entries.sort_by(|_, a, _, b| a.cmp(b));
		RuleCatalog {
			entries: self.entries,
		}
	}
}
