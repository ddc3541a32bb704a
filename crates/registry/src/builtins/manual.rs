use crate::{Criteria, EventKind, FormBuilder, Rule, RuleError, RuleEvent, UserId, rule};

/// Badges handed out by moderators. Never awards on its own.
#[derive(Debug, Default)]
pub struct ManualAward;

impl Rule for ManualAward {
	fn name(&self) -> &str {
		"Manual Award"
	}

	fn description(&self) -> &str {
		"This badge is only given out by moderators."
	}

	fn hooks(&self) -> &'static [EventKind] {
		&[]
	}

	fn form(&self, _form: &mut FormBuilder) {}

	fn award(&self, _event: &RuleEvent, _criteria: &Criteria) -> Result<Option<UserId>, RuleError> {
		Ok(None)
	}
}

rule!(ManualAward);
