//! Rule type discovery.
//!
//! [`RuleTypes`] is the set of rule definitions the process knows about. It is
//! filled from [`RuleSource`]s, re-run before every catalog request so sources
//! that gained definitions since the last request are picked up, and from
//! explicit [`RuleTypes::register`] calls.

use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use rustc_hash::FxHashMap as HashMap;

use crate::RuleDef;

/// A provider of rule definitions, such as [`builtin_rules`](crate::builtin_rules).
pub type RuleSource = fn() -> Vec<&'static RuleDef>;

#[derive(Clone, Default)]
struct TypesSnapshot {
	by_id: HashMap<&'static str, &'static RuleDef>,
	/// Registration order.
	order: Vec<&'static RuleDef>,
}

/// Registry of known rule types, keyed by identity.
///
/// Reads are lock-free snapshot loads; writers serialize on an internal lock
/// and publish a new snapshot.
pub struct RuleTypes {
	snap: ArcSwap<TypesSnapshot>,
	sources: Vec<RuleSource>,
	write: Mutex<()>,
}

impl Default for RuleTypes {
	fn default() -> Self {
		Self::new()
	}
}

impl RuleTypes {
	/// Creates an empty registry with no sources.
	pub fn new() -> Self {
		Self {
			snap: ArcSwap::from_pointee(TypesSnapshot::default()),
			sources: Vec::new(),
			write: Mutex::new(()),
		}
	}

	/// Creates a registry sourcing every rule submitted with [`rule!`](crate::rule).
	pub fn with_builtins() -> Self {
		Self::new().with_source(crate::builtin_rules)
	}

	/// Adds a source consulted by [`Self::load_sources`].
	pub fn with_source(mut self, source: RuleSource) -> Self {
		self.sources.push(source);
		self
	}

	/// Runs every source and registers what it yields.
	///
	/// Idempotent: definitions already present are skipped. Returns the number
	/// of newly registered types.
	pub fn load_sources(&self) -> usize {
		let mut added = 0;
		for source in &self.sources {
			added += self.register_many(source());
		}
		if added > 0 {
			tracing::debug!(added, total = self.len(), "loaded rule types");
		}
		added
	}

	/// Registers a single definition. Returns `false` if its identity is taken.
	pub fn register(&self, def: &'static RuleDef) -> bool {
		self.register_many([def]) == 1
	}

	fn register_many(&self, defs: impl IntoIterator<Item = &'static RuleDef>) -> usize {
		let current = self.snap.load();
		let pending: Vec<_> = defs
			.into_iter()
			.filter(|def| !current.by_id.contains_key(def.id))
			.collect();
		if pending.is_empty() {
			return 0;
		}

		let _guard = self.write.lock();
		let mut next = TypesSnapshot::clone(&self.snap.load());
		let mut added = 0;
		for def in pending {
			match next.by_id.get(def.id) {
				Some(existing) if std::ptr::eq(*existing, def) => {}
				Some(existing) => {
					tracing::warn!(
						id = def.id,
						existing_crate = existing.crate_name,
						new_crate = def.crate_name,
						"duplicate rule identity, keeping first registration"
					);
				}
				None => {
					next.by_id.insert(def.id, def);
					next.order.push(def);
					added += 1;
				}
			}
		}
		if added > 0 {
			self.snap.store(Arc::new(next));
		}
		added
	}

	/// Returns the definition registered under `id`.
	pub fn get(&self, id: &str) -> Option<&'static RuleDef> {
		self.snap.load().by_id.get(id).copied()
	}

	pub fn contains(&self, id: &str) -> bool {
		self.snap.load().by_id.contains_key(id)
	}

	/// Returns all definitions in registration order.
	pub fn all(&self) -> Vec<&'static RuleDef> {
		self.snap.load().order.clone()
	}

	pub fn len(&self) -> usize {
		self.snap.load().order.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
