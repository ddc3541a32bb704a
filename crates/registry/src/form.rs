//! Criteria form definitions and the criteria-form endpoint.

use serde::Serialize;

use crate::{RuleError, RuleRegistry};

/// Input widget for a criteria field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
	Text,
	Number,
	Checkbox,
	/// Dropdown of `(value, label)` pairs.
	Select { options: Vec<(String, String)> },
}

/// One criteria input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
	/// Criteria key the value is stored under.
	pub name: String,
	pub label: String,
	pub kind: FieldKind,
}

/// A rule's criteria form definition, ready for the host to render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormSpec {
	pub fields: Vec<FormField>,
}

impl FormSpec {
	pub fn field(&self, name: &str) -> Option<&FormField> {
		self.fields.iter().find(|f| f.name == name)
	}
}

/// Collects fields while a rule describes its form.
#[derive(Debug, Default)]
pub struct FormBuilder {
	fields: Vec<FormField>,
}

impl FormBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	fn push(&mut self, name: &str, label: &str, kind: FieldKind) -> &mut Self {
		self.fields.push(FormField {
			name: name.to_string(),
			label: label.to_string(),
			kind,
		});
		self
	}

	pub fn text(&mut self, name: &str, label: &str) -> &mut Self {
		self.push(name, label, FieldKind::Text)
	}

	pub fn number(&mut self, name: &str, label: &str) -> &mut Self {
		self.push(name, label, FieldKind::Number)
	}

	pub fn checkbox(&mut self, name: &str, label: &str) -> &mut Self {
		self.push(name, label, FieldKind::Checkbox)
	}

	pub fn select<'a>(
		&mut self,
		name: &str,
		label: &str,
		options: impl IntoIterator<Item = (&'a str, &'a str)>,
	) -> &mut Self {
		let options = options
			.into_iter()
			.map(|(value, label)| (value.to_string(), label.to_string()))
			.collect();
		self.push(name, label, FieldKind::Select { options })
	}

	pub fn finish(self) -> FormSpec {
		FormSpec {
			fields: self.fields,
		}
	}
}

/// Presentation payload for a rule's criteria form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriteriaForm {
	/// Identity of the rule type.
	pub rule: String,
	pub name: String,
	pub description: String,
	pub form: FormSpec,
}

impl RuleRegistry {
	/// Builds the criteria form payload for the rule type `id`.
	///
	/// Fails with [`RuleError::NotFound`] when `id` is not a registered rule type.
	pub fn criteria_form(&self, id: &str) -> Result<CriteriaForm, RuleError> {
		self.types().load_sources();
		let rule = self.instantiate(id)?;

		let mut builder = FormBuilder::new();
		rule.form(&mut builder);

		Ok(CriteriaForm {
			rule: id.to_string(),
			name: rule.name().to_string(),
			description: rule.description().to_string(),
			form: builder.finish(),
		})
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use accolade_cache::MemoryCache;
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::RuleTypes;
	use crate::test_rules::pair_source;

	fn registry() -> RuleRegistry {
		let types = Arc::new(RuleTypes::new().with_source(pair_source));
		RuleRegistry::builder(types, Arc::new(MemoryCache::new())).build()
	}

	#[test]
	fn form_for_registered_rule() {
		let form = registry().criteria_form("test::RuleB").unwrap();
		assert_eq!(
			form,
			CriteriaForm {
				rule: "test::RuleB".to_string(),
				name: "Comment Reaction".to_string(),
				description: "Awarded when someone reacts to your comment.".to_string(),
				form: FormSpec {
					fields: vec![FormField {
						name: "target".to_string(),
						label: "Reactions".to_string(),
						kind: FieldKind::Number,
					}],
				},
			}
		);
	}

	#[test]
	fn unknown_identity_is_not_found() {
		let err = registry().criteria_form("test::NotARule").unwrap_err();
		assert!(matches!(err, RuleError::NotFound(ref id) if id == "test::NotARule"));
		assert_eq!(err.to_string(), "rule not found: test::NotARule");
	}

	#[test]
	fn builder_collects_fields_in_order() {
		let mut builder = FormBuilder::new();
		builder
			.number("target", "Target")
			.select("comparison", "Comparison", [("gte", "At least"), ("lt", "Fewer than")])
			.checkbox("notify", "Notify")
			.text("note", "Note");
		let spec = builder.finish();

		let names: Vec<_> = spec.fields.iter().map(|f| f.name.as_str()).collect();
		assert_eq!(names, ["target", "comparison", "notify", "note"]);
		assert_eq!(
			spec.field("comparison").map(|f| &f.kind),
			Some(&FieldKind::Select {
				options: vec![
					("gte".to_string(), "At least".to_string()),
					("lt".to_string(), "Fewer than".to_string())
				]
			})
		);
	}

	#[test]
	fn select_serializes_with_type_tag_and_options() {
		let kind = FieldKind::Select {
			options: vec![("gt".to_string(), "More than".to_string())],
		};
		assert_eq!(
			serde_json::to_value(&kind).unwrap(),
			serde_json::json!({"type": "select", "options": [["gt", "More than"]]})
		);
		assert_eq!(serde_json::to_value(FieldKind::Number).unwrap(), serde_json::json!({"type": "number"}));
	}
}
