//! Bundled rule library.

mod counts;
mod manual;
mod reactions;
mod service;

pub use counts::{CommentCount, DiscussionCount};
pub use manual::ManualAward;
pub use reactions::{PostReactions, ReactionCount};
pub use service::LengthOfService;

use crate::{Criteria, FormBuilder, RuleError};

/// Reads a non-negative integer criterion.
fn criterion_u64(rule: &str, criteria: &Criteria, key: &str) -> Result<u64, RuleError> {
	criteria
		.get(key)
		.and_then(serde_json::Value::as_u64)
		.ok_or_else(|| RuleError::InvalidCriteria {
			rule: rule.to_string(),
			reason: format!("'{key}' must be a non-negative integer"),
		})
}

/// How a counter is compared against its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comparison {
	AtLeast,
	MoreThan,
	FewerThan,
}

impl Comparison {
	const OPTIONS: [(&'static str, &'static str); 3] =
		[("gte", "At least"), ("gt", "More than"), ("lt", "Fewer than")];

	/// Reads the `comparison` criterion, defaulting to [`Comparison::AtLeast`].
	fn from_criteria(rule: &str, criteria: &Criteria) -> Result<Self, RuleError> {
		match criteria.get("comparison").map(|v| v.as_str()) {
			None => Ok(Self::AtLeast),
			Some(Some("gte")) => Ok(Self::AtLeast),
			Some(Some("gt")) => Ok(Self::MoreThan),
			Some(Some("lt")) => Ok(Self::FewerThan),
			Some(other) => Err(RuleError::InvalidCriteria {
				rule: rule.to_string(),
				reason: format!("unknown comparison {other:?}"),
			}),
		}
	}

	fn holds(self, value: u64, target: u64) -> bool {
		match self {
			Self::AtLeast => value >= target,
			Self::MoreThan => value > target,
			Self::FewerThan => value < target,
		}
	}

	fn add_to(form: &mut FormBuilder) {
		form.select("comparison", "Comparison", Self::OPTIONS);
	}
}
