//! Fixture rule types and a call-counting cache shared by unit tests.

use accolade_cache::{CacheError, CacheStore, MemoryCache, StoreOptions};
use parking_lot::Mutex;

use crate::{Criteria, EventKind, FormBuilder, Rule, RuleDef, RuleError, RuleEvent, UserId, construct_default};

macro_rules! fixture_rule {
	($ty:ident, $name:literal, interacts: $interacts:literal) => {
		#[derive(Default)]
		pub struct $ty;

		impl Rule for $ty {
			fn name(&self) -> &str {
				$name
			}

			fn description(&self) -> &str {
				concat!("Fixture rule ", $name, ".")
			}

			fn interacts(&self) -> bool {
				$interacts
			}

			fn hooks(&self) -> &'static [EventKind] {
				&[]
			}

			fn form(&self, _form: &mut FormBuilder) {}

			fn award(&self, _event: &RuleEvent, _criteria: &Criteria) -> Result<Option<UserId>, RuleError> {
				Ok(None)
			}
		}
	};
}

fixture_rule!(BadgeAward, "Badge Award", interacts: false);
fixture_rule!(AnswerAccepted, "Answer Accepted", interacts: true);
fixture_rule!(LowercaseName, "accepted answer", interacts: false);

#[derive(Default)]
pub struct CommentReaction;

impl Rule for CommentReaction {
	fn name(&self) -> &str {
		"Comment Reaction"
	}

	fn description(&self) -> &str {
		"Awarded when someone reacts to your comment."
	}

	fn interacts(&self) -> bool {
		true
	}

	fn hooks(&self) -> &'static [EventKind] {
		&[EventKind::ReactionAdded]
	}

	fn form(&self, form: &mut FormBuilder) {
		form.number("target", "Reactions");
	}

	fn award(&self, event: &RuleEvent, _criteria: &Criteria) -> Result<Option<UserId>, RuleError> {
		Ok(event.subject.as_ref().map(|s| s.user_id))
	}
}

pub static BADGE_AWARD: RuleDef = RuleDef::new("test::RuleA", "fixtures", construct_default::<BadgeAward>);
pub static COMMENT_REACTION: RuleDef = RuleDef::new("test::RuleB", "fixtures", construct_default::<CommentReaction>);
pub static ANSWER_ACCEPTED: RuleDef = RuleDef::new("test::RuleC", "fixtures", construct_default::<AnswerAccepted>);
pub static LOWERCASE_NAME: RuleDef = RuleDef::new("test::RuleD", "fixtures", construct_default::<LowercaseName>);

fn construct_broken() -> Result<Box<dyn Rule>, String> {
	Err("database unavailable".to_string())
}

/// Rule type whose constructor always fails.
pub static BROKEN: RuleDef = RuleDef::new("test::Broken", "fixtures", construct_broken);

/// Every well-behaved fixture.
pub static POOL: [&RuleDef; 4] = [&BADGE_AWARD, &COMMENT_REACTION, &ANSWER_ACCEPTED, &LOWERCASE_NAME];

/// The two-rule set: one plain, one interactive.
pub fn pair_source() -> Vec<&'static RuleDef> {
	vec![&BADGE_AWARD, &COMMENT_REACTION]
}

/// [`MemoryCache`] that records every call per key.
#[derive(Default)]
pub struct CountingCache {
	pub inner: MemoryCache,
	gets: Mutex<Vec<String>>,
	stores: Mutex<Vec<String>>,
	fail_stores: bool,
}

impl CountingCache {
	/// A cache whose writes always fail.
	pub fn failing() -> Self {
		Self {
			fail_stores: true,
			..Self::default()
		}
	}

	pub fn gets(&self, key: &str) -> usize {
		self.gets.lock().iter().filter(|k| *k == key).count()
	}

	pub fn stores(&self, key: &str) -> usize {
		self.stores.lock().iter().filter(|k| *k == key).count()
	}
}

impl CacheStore for CountingCache {
	fn get(&self, key: &str) -> Option<Vec<u8>> {
		self.gets.lock().push(key.to_string());
		self.inner.get(key)
	}

	fn store(&self, key: &str, value: Vec<u8>, options: StoreOptions) -> Result<(), CacheError> {
		self.stores.lock().push(key.to_string());
		if self.fail_stores {
			return Err(CacheError::Io(std::io::Error::other("disk full")));
		}
		self.inner.store(key, value, options)
	}
}
