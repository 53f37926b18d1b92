//! Static field schemas and the [`Record`] trait.

use std::fmt;

use crate::value::FieldValue;

/// A `(name, argument)` pair attached to a field at type definition time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Annotation {
	pub name: &'static str,
	/// Argument string; empty for bare flags such as `#[sanitag(required)]`.
	pub argument: &'static str,
}

impl Annotation {
	pub const fn new(name: &'static str, argument: &'static str) -> Self {
		Self { name, argument }
	}
}

/// Descriptor of one walkable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
	/// Field name, or its position for tuple structs.
	pub name: &'static str,
	pub annotations: &'static [Annotation],
}

impl FieldDef {
	pub const fn new(name: &'static str, annotations: &'static [Annotation]) -> Self {
		Self { name, annotations }
	}

	/// Returns the argument of the annotation named `name`, if declared.
	pub fn annotation(&self, name: &str) -> Option<&'static str> {
		self.annotations
			.iter()
			.find(|a| a.name == name)
			.map(|a| a.argument)
	}

	pub fn is_annotated(&self) -> bool {
		!self.annotations.is_empty()
	}
}

/// Static description of a record type: its name and fields in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
	pub type_name: &'static str,
	pub fields: &'static [FieldDef],
}

impl Schema {
	pub const fn new(type_name: &'static str, fields: &'static [FieldDef]) -> Self {
		Self { type_name, fields }
	}

	/// Looks up a field descriptor by name.
	pub fn field(&self, name: &str) -> Option<&'static FieldDef> {
		self.fields.iter().find(|f| f.name == name)
	}
}

/// A structured value the sanitizer can walk.
///
/// Implemented by `#[derive(Sanitize)]`. A hand-written implementation must
/// keep `field(i)` consistent with `schema().fields[i]` and return
/// [`FieldRef::Absent`] only for empty record references.
pub trait Record {
	fn schema(&self) -> &'static Schema;

	/// Returns the current value of the field at `index` in the schema.
	fn field(&self, index: usize) -> FieldRef<'_>;

	/// Whether the field at `index` holds a nested record.
	///
	/// The walker never reads an unannotated field for which this is `false`.
	/// The default reads every field.
	fn is_nested(&self, index: usize) -> bool {
		let _ = index;
		true
	}
}

/// Current value of a field as seen by the walker.
pub enum FieldRef<'a> {
	/// A leaf value, candidate for handler dispatch.
	Leaf(FieldValue<'a>),
	/// A nested record, walked recursively.
	Record(&'a dyn Record),
	/// An empty reference where a record was expected.
	Absent,
}

impl fmt::Debug for FieldRef<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Leaf(value) => f.debug_tuple("Leaf").field(value).finish(),
			Self::Record(record) => f
				.debug_tuple("Record")
				.field(&record.schema().type_name)
				.finish(),
			Self::Absent => f.write_str("Absent"),
		}
	}
}
