//! The rule capability and the event model rules evaluate against.

use serde::{Deserialize, Serialize};

use crate::RuleError;
use crate::form::FormBuilder;

/// Forum user identifier.
pub type UserId = u64;

/// Admin-configured criteria for one badge, as stored alongside it.
pub type Criteria = serde_json::Map<String, serde_json::Value>;

/// Forum events a rule can listen to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
	/// A user posted a comment.
	CommentPosted,
	/// A user started a discussion.
	DiscussionPosted,
	/// A user reacted to someone else's post.
	ReactionAdded,
	/// A user signed in.
	SignIn,
}

/// Activity counters for one user at the time of an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
	pub user_id: UserId,
	pub comments: u64,
	pub discussions: u64,
	pub reactions_received: u64,
	pub account_age_days: u64,
}

impl UserStats {
	pub fn new(user_id: UserId) -> Self {
		Self {
			user_id,
			..Self::default()
		}
	}
}

/// A forum event offered to rules for evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEvent {
	pub kind: EventKind,
	/// The user whose action raised the event.
	pub actor: UserStats,
	/// The user on the receiving end of an interaction.
	pub subject: Option<UserStats>,
	/// Reaction total of the post involved, for post-level events.
	pub post_reactions: Option<u64>,
}

impl RuleEvent {
	/// An event raised by `actor` alone.
	pub fn solo(kind: EventKind, actor: UserStats) -> Self {
		Self {
			kind,
			actor,
			subject: None,
			post_reactions: None,
		}
	}

	/// An event where `actor` acts on `subject`.
	pub fn interaction(kind: EventKind, actor: UserStats, subject: UserStats) -> Self {
		Self {
			kind,
			actor,
			subject: Some(subject),
			post_reactions: None,
		}
	}

	pub fn with_post_reactions(mut self, count: u64) -> Self {
		self.post_reactions = Some(count);
		self
	}
}

/// A pluggable unit of badge-awarding logic.
///
/// Implementations are registered with [`rule!`](crate::rule) or through a
/// [`RuleSource`](crate::RuleSource) and constructed fresh whenever the
/// registry needs to ask them something.
pub trait Rule: Send + Sync {
	/// Human-readable name shown in the catalog.
	fn name(&self) -> &str;

	/// Help text shown next to the criteria form.
	fn description(&self) -> &str;

	/// Whether one user's action can trigger this rule for another user.
	fn interacts(&self) -> bool {
		false
	}

	/// Events this rule wants to be evaluated on.
	fn hooks(&self) -> &'static [EventKind];

	/// Describes the criteria inputs for this rule.
	fn form(&self, form: &mut FormBuilder);

	/// Evaluates `event` against `criteria`.
	///
	/// Returns the user who earned the badge, if any.
	fn award(&self, event: &RuleEvent, criteria: &Criteria) -> Result<Option<UserId>, RuleError>;
}
