use std::sync::Arc;

use accolade_cache::{CacheStore, FileCache, MemoryCache};
use accolade_config::{RulesConfig, Settings};
use accolade_registry::{InteractionFilter, RuleRegistry, RuleTypes};
use anyhow::Context;

use crate::cli::{Cli, Command};

/// Wires the registry from command-line options.
pub fn build_filter(cli: &Cli) -> anyhow::Result<InteractionFilter> {
	let settings = match &cli.config {
		Some(path) => Settings::load(path).with_context(|| format!("loading {}", path.display()))?,
		None => Settings::default(),
	};
	let config = RulesConfig::from_lookup(&settings)?;

	let cache: Arc<dyn CacheStore> = match &cli.cache_dir {
		Some(dir) => Arc::new(FileCache::new(dir)),
		None => Arc::new(MemoryCache::new()),
	};

	let registry = RuleRegistry::builder(Arc::new(RuleTypes::with_builtins()), cache)
		.config(config)
		.build();
	tracing::debug!(expiry_secs = config.cache_expire.as_secs(), "rule registry ready");

	Ok(InteractionFilter::new(Arc::new(registry)))
}

/// Executes `cli.command`, returning the JSON to print.
pub fn run(cli: &Cli) -> anyhow::Result<String> {
	let filter = build_filter(cli)?;

	let output = match &cli.command {
		Command::Catalog => serde_json::to_string_pretty(&filter.registry().catalog()?)?,
		Command::Interactive => serde_json::to_string_pretty(&*filter.interactive()?)?,
		Command::Form { rule } => serde_json::to_string_pretty(&filter.registry().criteria_form(rule)?)?,
	};
	Ok(output)
}
