//! Rule type definitions and static registration via `inventory`.

use crate::{Rule, RuleError};

/// Constructor for a rule type. An `Err` carries the failure message.
pub type RuleCtor = fn() -> Result<Box<dyn Rule>, String>;

/// A registered rule type.
pub struct RuleDef {
	/// Unique identity (typically `"crate::module::Type"`).
	pub id: &'static str,
	/// Crate that defined this rule.
	pub crate_name: &'static str,
	pub construct: RuleCtor,
}

impl RuleDef {
	pub const fn new(id: &'static str, crate_name: &'static str, construct: RuleCtor) -> Self {
		Self {
			id,
			crate_name,
			construct,
		}
	}

	/// Constructs a fresh instance of this rule.
	pub fn instantiate(&self) -> Result<Box<dyn Rule>, RuleError> {
		(self.construct)().map_err(|reason| RuleError::Instantiation {
			id: self.id.to_string(),
			reason,
		})
	}
}

impl std::fmt::Debug for RuleDef {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RuleDef")
			.field("id", &self.id)
			.field("crate_name", &self.crate_name)
			.finish_non_exhaustive()
	}
}

/// [`RuleCtor`] for rule types with a `Default` impl.
pub fn construct_default<T: Rule + Default + 'static>() -> Result<Box<dyn Rule>, String> {
	Ok(Box::new(T::default()))
}

/// Wrapper for `inventory::collect!`.
pub struct RuleReg(pub &'static RuleDef);

inventory::collect!(RuleReg);

/// Every rule type submitted with [`rule!`](crate::rule) across the binary.
///
/// Order follows `inventory` iteration and is not meaningful; catalogs sort by
/// display name.
pub fn builtin_rules() -> Vec<&'static RuleDef> {
	inventory::iter::<RuleReg>.into_iter().map(|r| r.0).collect()
}

/// Registers a `Default`-constructible [`Rule`] type for static discovery.
///
/// The rule's identity is its module path joined with the type name.
#[macro_export]
macro_rules! rule {
	($ty:ident) => {
		$crate::__private::paste::paste! {
			#[allow(non_upper_case_globals)]
			pub(crate) static [<RULE_DEF_ $ty>]: $crate::RuleDef = $crate::RuleDef::new(
				concat!(module_path!(), "::", stringify!($ty)),
				env!("CARGO_PKG_NAME"),
				$crate::construct_default::<$ty>,
			);

			$crate::__private::inventory::submit!($crate::RuleReg(&[<RULE_DEF_ $ty>]));
		}
	};
}
