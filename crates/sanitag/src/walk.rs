//! Recursive record walk and per-field handler dispatch.

use tracing::{debug, trace};

use crate::config::UnknownAnnotationPolicy;
use crate::error::{FieldPath, Result, SanitizeError};
use crate::record::{FieldDef, FieldRef, Record};
use crate::registry::Sanitizer;
use crate::value::{AsField, FieldValue};

/// Stack-linked field path; rendered only when an error needs it.
struct PathNode<'p> {
	parent: Option<&'p PathNode<'p>>,
	name: &'static str,
}

impl PathNode<'_> {
	fn render(&self) -> FieldPath {
		let mut segments = vec![self.name];
		let mut cursor = self.parent;
		while let Some(node) = cursor {
			segments.push(node.name);
			cursor = node.parent;
		}
		segments.reverse();
		FieldPath::from(segments.join("."))
	}
}

impl Sanitizer {
	/// Walks `value` and dispatches every registered annotation on its leaf fields.
	///
	/// `value` may be a record or any reference, smart pointer or `Option`
	/// wrapping one. Anything else fails with [`SanitizeError::InvalidRecord`].
	/// The first handler error aborts the walk.
	pub fn sanitize<V: AsField + ?Sized>(&self, value: &V) -> Result<()> {
		let result = match value.as_field() {
			FieldRef::Record(record) => self.walk(record, None),
			FieldRef::Absent => Err(SanitizeError::InvalidRecord {
				path: FieldPath::root(),
				reason: "record reference is empty".to_string(),
			}),
			FieldRef::Leaf(leaf) => Err(SanitizeError::InvalidRecord {
				path: FieldPath::root(),
				reason: format!("expected a record, found {}", leaf.type_name()),
			}),
		};

		if let Err(err) = &result {
			debug!(error = %err, "sanitize failed");
		}
		result
	}

	fn walk(&self, record: &dyn Record, parent: Option<&PathNode<'_>>) -> Result<()> {
		let schema = record.schema();
		trace!(record = schema.type_name, fields = schema.fields.len(), "walking record");

		for (index, def) in schema.fields.iter().enumerate() {
			if !def.is_annotated() && !record.is_nested(index) {
				continue;
			}

			let node = PathNode {
				parent,
				name: def.name,
			};

			match record.field(index) {
				FieldRef::Record(nested) => {
					self.check_nested(def, schema.type_name, &node)?;
					self.walk(nested, Some(&node))?;
				}
				FieldRef::Absent => {
					return Err(SanitizeError::InvalidRecord {
						path: node.render(),
						reason: format!(
							"nested record reference in {} is empty",
							schema.type_name
						),
					});
				}
				FieldRef::Leaf(value) => self.check_leaf(def, &value, &node)?,
			}
		}
		Ok(())
	}

	/// Annotations on a field holding a record are never dispatched; the
	/// strict policy refuses them instead of dropping them.
	fn check_nested(&self, def: &FieldDef, owner: &str, node: &PathNode<'_>) -> Result<()> {
		match def.annotations.first() {
			Some(annotation) if self.is_strict() => Err(SanitizeError::InvalidRecord {
				path: node.render(),
				reason: format!(
					"annotation `{}` on nested record field of {owner} is never dispatched",
					annotation.name
				),
			}),
			_ => Ok(()),
		}
	}

	fn is_strict(&self) -> bool {
		self.config().unknown_annotations == UnknownAnnotationPolicy::Reject
	}

	fn check_leaf(&self, def: &FieldDef, value: &FieldValue<'_>, node: &PathNode<'_>) -> Result<()> {
		if !def.is_annotated() {
			return Ok(());
		}

		if self.is_strict()
			&& let Some(unknown) = def.annotations.iter().find(|a| !self.contains(a.name))
		{
			return Err(SanitizeError::UnknownAnnotation {
				name: unknown.name.to_string(),
				path: node.render(),
			});
		}

		for name in self.names() {
			debug_assert!(self.contains(name), "dispatch order names unregistered `{name}`");
			if let Some(argument) = def.annotation(name) {
				self.dispatch_at(name, argument, value, || node.render())?;
			}
		}
		Ok(())
	}
}
