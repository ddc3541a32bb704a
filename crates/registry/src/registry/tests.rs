use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use accolade_cache::{CacheStore, StoreOptions};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::test_rules::{BADGE_AWARD, BROKEN, COMMENT_REACTION, CountingCache, POOL, pair_source};
use crate::{RuleDef, codec};

fn registry_with(types: RuleTypes, cache: Arc<CountingCache>) -> RuleRegistry {
	RuleRegistry::builder(Arc::new(types), cache).build()
}

fn pairs(catalog: &RuleCatalog) -> Vec<(&str, &str)> {
	catalog.iter().collect()
}

#[test]
fn catalog_is_sorted_by_display_name() {
	let cache = Arc::new(CountingCache::default());
	let registry = registry_with(RuleTypes::new().with_source(|| vec![&COMMENT_REACTION, &BADGE_AWARD]), cache);

	let catalog = registry.catalog().unwrap();
	assert_eq!(
		pairs(&catalog),
		[("test::RuleA", "Badge Award"), ("test::RuleB", "Comment Reaction")]
	);
}

#[test]
fn second_call_is_served_from_cache() {
	static BUILDS: AtomicUsize = AtomicUsize::new(0);
	static COUNTED: RuleDef = RuleDef::new("test::Counted", "fixtures", || {
		BUILDS.fetch_add(1, Ordering::SeqCst);
		crate::construct_default::<crate::test_rules::BadgeAward>()
	});

	let cache = Arc::new(CountingCache::default());
	let registry = registry_with(RuleTypes::new().with_source(|| vec![&COUNTED]), cache.clone());

	let first = registry.catalog().unwrap();
	let stored = cache.inner.get(CATALOG_CACHE_KEY).unwrap();
	let second = registry.catalog().unwrap();

	assert_eq!(first, second);
	assert_eq!(cache.inner.get(CATALOG_CACHE_KEY).unwrap(), stored);
	assert_eq!(cache.stores(CATALOG_CACHE_KEY), 1);
	assert_eq!(BUILDS.load(Ordering::SeqCst), 1);
}

#[test]
fn empty_rule_set_yields_empty_catalog() {
	let cache = Arc::new(CountingCache::default());
	let registry = registry_with(RuleTypes::new(), cache.clone());

	let catalog = registry.catalog().unwrap();
	assert!(catalog.is_empty());

	let blob = cache.inner.get(CATALOG_CACHE_KEY).expect("empty result is still cached");
	assert_eq!(blob, codec::encode(&RuleCatalog::new()).unwrap());

	assert!(registry.catalog().unwrap().is_empty());
	assert_eq!(cache.stores(CATALOG_CACHE_KEY), 1);
}

#[test]
fn sources_load_before_every_request() {
	let cache = Arc::new(CountingCache::default());
	let registry = registry_with(RuleTypes::new().with_source(pair_source), cache);
	assert!(registry.types().is_empty());

	registry.catalog().unwrap();
	assert_eq!(registry.types().len(), 2);
}

#[test]
fn instantiation_failure_aborts_rebuild() {
	let cache = Arc::new(CountingCache::default());
	let registry = registry_with(
		RuleTypes::new().with_source(|| vec![&BADGE_AWARD, &BROKEN, &COMMENT_REACTION]),
		cache.clone(),
	);

	let err = registry.catalog().unwrap_err();
	assert!(matches!(err, RuleError::Instantiation { ref id, ref reason } if id == "test::Broken" && reason == "database unavailable"));
	assert_eq!(cache.stores(CATALOG_CACHE_KEY), 0);
	assert!(cache.inner.get(CATALOG_CACHE_KEY).is_none());
}

#[test]
fn transforms_run_in_order_before_sorting() {
	let cache = Arc::new(CountingCache::default());
	let types = Arc::new(RuleTypes::new().with_source(pair_source));
	let registry = RuleRegistry::builder(types, cache)
		.transform(|mut draft| {
			draft.insert("test::RuleA", "Zebra Badge");
			draft
		})
		.transform(|mut draft| {
			let renamed = draft.get("test::RuleA").map(|name| format!("{name} (renamed)"));
			if let Some(name) = renamed {
				draft.insert("test::RuleA", name);
			}
			draft
		})
		.build();

	let catalog = registry.catalog().unwrap();
	assert_eq!(
		pairs(&catalog),
		[("test::RuleB", "Comment Reaction"), ("test::RuleA", "Zebra Badge (renamed)")]
	);
}

#[test]
fn transforms_can_drop_entries() {
	let cache = Arc::new(CountingCache::default());
	let types = Arc::new(RuleTypes::new().with_source(pair_source));
	let registry = RuleRegistry::builder(types, cache)
		.transform(|mut draft| {
			draft.retain(|_, name| name != "Badge Award");
			draft
		})
		.build();

	assert_eq!(pairs(&registry.catalog().unwrap()), [("test::RuleB", "Comment Reaction")]);
}

#[test]
fn transform_adding_unknown_rule_fails() {
	let cache = Arc::new(CountingCache::default());
	let types = Arc::new(RuleTypes::new().with_source(pair_source));
	let registry = RuleRegistry::builder(types, cache.clone())
		.transform(|mut draft| {
			draft.insert("test::Ghost", "Ghost");
			draft
		})
		.build();

	assert!(matches!(registry.catalog(), Err(RuleError::NotFound(ref id)) if id == "test::Ghost"));
	assert_eq!(cache.stores(CATALOG_CACHE_KEY), 0);
}

#[test]
fn undecodable_cache_entry_is_rebuilt() {
	let cache = Arc::new(CountingCache::default());
	cache
		.inner
		.store(CATALOG_CACHE_KEY, b"garbage".to_vec(), StoreOptions::expiring(Duration::from_secs(60)))
		.unwrap();
	let registry = registry_with(RuleTypes::new().with_source(pair_source), cache.clone());

	assert_eq!(registry.catalog().unwrap().len(), 2);
	assert_eq!(cache.stores(CATALOG_CACHE_KEY), 1);
}

#[test]
fn failed_cache_write_still_returns_catalog() {
	let cache = Arc::new(CountingCache::failing());
	let registry = registry_with(RuleTypes::new().with_source(pair_source), cache.clone());

	assert_eq!(registry.catalog().unwrap().len(), 2);
	assert_eq!(registry.catalog().unwrap().len(), 2);
	assert_eq!(cache.stores(CATALOG_CACHE_KEY), 2);
}

#[test]
fn configured_expiry_is_applied() {
	let cache = Arc::new(CountingCache::default());
	let registry = RuleRegistry::builder(Arc::new(RuleTypes::new().with_source(pair_source)), cache.clone())
		.config(RulesConfig {
			cache_expire: Duration::ZERO,
		})
		.build();

	registry.catalog().unwrap();
	registry.catalog().unwrap();
	assert_eq!(cache.stores(CATALOG_CACHE_KEY), 2);
}

#[test]
fn concurrent_misses_rebuild_once() {
	let cache = Arc::new(CountingCache::default());
	let registry = registry_with(RuleTypes::new().with_source(pair_source), cache.clone());

	std::thread::scope(|s| {
		for _ in 0..8 {
			s.spawn(|| registry.catalog().unwrap());
		}
	});

	assert_eq!(cache.stores(CATALOG_CACHE_KEY), 1);
}

#[test]
fn instantiate_unknown_is_not_found() {
	let cache = Arc::new(CountingCache::default());
	let registry = registry_with(RuleTypes::new(), cache);
	assert!(matches!(registry.instantiate("test::RuleA"), Err(RuleError::NotFound(_))));
}

proptest! {
	#[test]
	fn prop_catalog_covers_exactly_the_registered_rules(
		defs in prop::sample::subsequence(POOL.to_vec(), 0..=POOL.len()).prop_shuffle()
	) {
		let types = RuleTypes::new();
		for &def in &defs {
			types.register(def);
		}
		let registry = registry_with(types, Arc::new(CountingCache::default()));
		let catalog = registry.catalog().unwrap();

		let mut expected: Vec<_> = defs.iter().map(|d| d.id).collect();
		let mut actual: Vec<_> = catalog.ids().collect();
		expected.sort_unstable();
		actual.sort_unstable();
		prop_assert_eq!(actual, expected);

		let names: Vec<_> = catalog.iter().map(|(_, name)| name).collect();
		prop_assert!(names.windows(2).all(|w| w[0] <= w[1]));
	}
}
