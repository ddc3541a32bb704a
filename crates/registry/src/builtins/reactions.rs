use super::criterion_u64;
use crate::{Criteria, EventKind, FormBuilder, Rule, RuleError, RuleEvent, UserId, rule};

/// Awards the reacted-to user once their received reactions meet the target.
#[derive(Debug, Default)]
pub struct ReactionCount;

impl Rule for ReactionCount {
	fn name(&self) -> &str {
		"Reaction Count"
	}

	fn description(&self) -> &str {
		"Awarded based on the total reactions a user has received."
	}

	fn interacts(&self) -> bool {
		true
	}

	fn hooks(&self) -> &'static [EventKind] {
		&[EventKind::ReactionAdded]
	}

	fn form(&self, form: &mut FormBuilder) {
		form.number("target", "Reactions received");
	}

	fn award(&self, event: &RuleEvent, criteria: &Criteria) -> Result<Option<UserId>, RuleError> {
		let (EventKind::ReactionAdded, Some(subject)) = (event.kind, &event.subject) else {
			return Ok(None);
		};
		let target = criterion_u64(self.name(), criteria, "target")?;
		Ok((subject.reactions_received >= target).then_some(subject.user_id))
	}
}

rule!(ReactionCount);

/// Awards a post's author once that single post collects enough reactions.
#[derive(Debug, Default)]
pub struct PostReactions;

impl Rule for PostReactions {
	fn name(&self) -> &str {
		"Post Reactions"
	}

	fn description(&self) -> &str {
		"Awarded when one post receives the given number of reactions."
	}

	fn interacts(&self) -> bool {
		true
	}

	fn hooks(&self) -> &'static [EventKind] {
		&[EventKind::ReactionAdded]
	}

	fn form(&self, form: &mut FormBuilder) {
		form.number("target", "Reactions on one post");
	}

	fn award(&self, event: &RuleEvent, criteria: &Criteria) -> Result<Option<UserId>, RuleError> {
		let (EventKind::ReactionAdded, Some(author), Some(count)) =
			(event.kind, &event.subject, event.post_reactions)
		else {
			return Ok(None);
		};
		let target = criterion_u64(self.name(), criteria, "target")?;
		Ok((count >= target).then_some(author.user_id))
	}
}

rule!(PostReactions);
