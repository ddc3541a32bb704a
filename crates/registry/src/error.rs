use thiserror::Error;

use crate::codec::CodecError;

/// Errors raised by rule discovery, catalog building and rule evaluation.
#[derive(Error, Debug)]
pub enum RuleError {
	/// The identity does not name a registered rule type.
	///
	/// The display text is the user-facing message.
	#[error("rule not found: {0}")]
	NotFound(String),
	/// A registered rule type failed to construct.
	///
	/// Aborts the whole rebuild pass; nothing is cached.
	#[error("failed to instantiate rule {id}: {reason}")]
	Instantiation {
		/// Identity of the rule type.
		id: String,
		/// Constructor failure message.
		reason: String,
	},
	/// Criteria handed to [`Rule::award`](crate::Rule::award) are missing or malformed.
	#[error("invalid criteria for {rule}: {reason}")]
	InvalidCriteria {
		/// Display name of the rule.
		rule: String,
		/// Which criterion was wrong and how.
		reason: String,
	},
	/// A freshly built catalog could not be encoded or decoded.
	#[error("catalog codec error: {0}")]
	Codec(#[from] CodecError),
}
