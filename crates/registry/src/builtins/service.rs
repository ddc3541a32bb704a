use super::criterion_u64;
use crate::{Criteria, EventKind, FormBuilder, Rule, RuleError, RuleEvent, UserId, rule};

/// Awards members whose account is at least `target` days old.
#[derive(Debug, Default)]
pub struct LengthOfService;

impl Rule for LengthOfService {
	fn name(&self) -> &str {
		"Length of Service"
	}

	fn description(&self) -> &str {
		"Awarded once a user has been a member for the given number of days."
	}

	fn hooks(&self) -> &'static [EventKind] {
		&[EventKind::SignIn]
	}

	fn form(&self, form: &mut FormBuilder) {
		form.number("target", "Days");
	}

	fn award(&self, event: &RuleEvent, criteria: &Criteria) -> Result<Option<UserId>, RuleError> {
		if event.kind != EventKind::SignIn {
			return Ok(None);
		}
		let days = criterion_u64(self.name(), criteria, "target")?;
		Ok((event.actor.account_age_days >= days).then_some(event.actor.user_id))
	}
}

rule!(LengthOfService);
