use super::{Comparison, criterion_u64};
use crate::{Criteria, EventKind, FormBuilder, Rule, RuleError, RuleEvent, UserId, rule};

/// Awards the commenter once their comment count meets the target.
#[derive(Debug, Default)]
pub struct CommentCount;

impl Rule for CommentCount {
	fn name(&self) -> &str {
		"Comment Count"
	}

	fn description(&self) -> &str {
		"Awarded based on the number of comments a user has posted."
	}

	fn hooks(&self) -> &'static [EventKind] {
		&[EventKind::CommentPosted]
	}

	fn form(&self, form: &mut FormBuilder) {
		Comparison::add_to(form);
		form.number("target", "Comments");
	}

	fn award(&self, event: &RuleEvent, criteria: &Criteria) -> Result<Option<UserId>, RuleError> {
		if event.kind != EventKind::CommentPosted {
			return Ok(None);
		}
		let comparison = Comparison::from_criteria(self.name(), criteria)?;
		let target = criterion_u64(self.name(), criteria, "target")?;
		Ok(comparison
			.holds(event.actor.comments, target)
			.then_some(event.actor.user_id))
	}
}

rule!(CommentCount);

/// Awards the author once their discussion count meets the target.
#[derive(Debug, Default)]
pub struct DiscussionCount;

impl Rule for DiscussionCount {
	fn name(&self) -> &str {
		"Discussion Count"
	}

	fn description(&self) -> &str {
		"Awarded based on the number of discussions a user has started."
	}

	fn hooks(&self) -> &'static [EventKind] {
		&[EventKind::DiscussionPosted]
	}

	fn form(&self, form: &mut FormBuilder) {
		Comparison::add_to(form);
		form.number("target", "Discussions");
	}

	fn award(&self, event: &RuleEvent, criteria: &Criteria) -> Result<Option<UserId>, RuleError> {
		if event.kind != EventKind::DiscussionPosted {
			return Ok(None);
		}
		let comparison = Comparison::from_criteria(self.name(), criteria)?;
		let target = criterion_u64(self.name(), criteria, "target")?;
		Ok(comparison
			.holds(event.actor.discussions, target)
			.then_some(event.actor.user_id))
	}
}

rule!(DiscussionCount);
