//! Pluggable badge rule registry.
//!
//! Rules are units of logic that award badges from forum events. This crate
//! discovers the installed rule types and serves two cached views of them:
//!
//! - [`RuleRegistry::catalog`] - every rule type, `identity -> display name`,
//!   sorted by display name
//! - [`InteractionFilter::interactive`] - the rules one user's action can
//!   trigger for another user
//!
//! # Registering rules
//!
//! Implement [`Rule`] and submit the type with [`rule!`]:
//!
//! ```ignore
//! #[derive(Default)]
//! pub struct FirstPost;
//!
//! impl accolade_registry::Rule for FirstPost { /* ... */ }
//!
//! accolade_registry::rule!(FirstPost);
//! ```
//!
//! Rules can also come from any [`RuleSource`] handed to [`RuleTypes`], or be
//! registered at runtime with [`RuleTypes::register`].
//!
//! # Caching
//!
//! Both views are cache-aside over an [`accolade_cache::CacheStore`], encoded
//! with [`codec`] and expiring after [`RulesConfig::cache_expire`]. The two
//! entries expire independently.

#[cfg(feature = "builtins")]
pub mod builtins;
pub mod catalog;
pub mod codec;
pub mod def;
pub mod discovery;
mod error;
pub mod form;
pub mod interaction;
pub mod registry;
pub mod rule;
pub mod transform;

#[cfg(test)]
mod test_rules;

pub use accolade_config::RulesConfig;
pub use catalog::{DraftCatalog, RuleCatalog};
pub use codec::CodecError;
pub use def::{RuleCtor, RuleDef, RuleReg, builtin_rules, construct_default};
pub use discovery::{RuleSource, RuleTypes};
pub use error::RuleError;
pub use form::{CriteriaForm, FieldKind, FormBuilder, FormField, FormSpec};
pub use interaction::{INTERACTIVE_CACHE_KEY, InteractionFilter};
pub use registry::{CATALOG_CACHE_KEY, RuleRegistry, RuleRegistryBuilder};
pub use rule::{Criteria, EventKind, Rule, RuleEvent, UserId, UserStats};
pub use transform::{AFTER_GET_RULES, CatalogTransform, TransformChain};

#[doc(hidden)]
pub mod __private {
	pub use {inventory, paste};
}
