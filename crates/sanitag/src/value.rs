//! Field values and the conversions that expose them to the walker.

use std::borrow::Cow;
use std::rc::Rc;
use std::sync::Arc;

use crate::record::{FieldRef, Record};

/// Borrowed view of a leaf field's current value, as passed to handlers.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
	/// An empty optional value.
	Null,
	/// Boolean value.
	Bool(bool),
	/// Signed integer of any width.
	Int(i64),
	/// Unsigned integer of any width.
	Uint(u64),
	/// Floating point value.
	Float(f64),
	/// Single character.
	Char(char),
	/// String value.
	Str(&'a str),
	/// Sequence of leaf values.
	Seq(Vec<FieldValue<'a>>),
}

impl<'a> FieldValue<'a> {
	/// Returns the boolean value if this is a `Bool` variant.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			FieldValue::Bool(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the value as `i64` if it is an integer that fits.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			FieldValue::Int(v) => Some(*v),
			FieldValue::Uint(v) => i64::try_from(*v).ok(),
			_ => None,
		}
	}

	/// Returns the value as `u64` if it is a non-negative integer.
	pub fn as_uint(&self) -> Option<u64> {
		match self {
			FieldValue::Uint(v) => Some(*v),
			FieldValue::Int(v) => u64::try_from(*v).ok(),
			_ => None,
		}
	}

	/// Returns the floating point value if this is a `Float` variant.
	pub fn as_float(&self) -> Option<f64> {
		match self {
			FieldValue::Float(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the string value if this is a `Str` variant.
	pub fn as_str(&self) -> Option<&'a str> {
		match self {
			FieldValue::Str(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the elements if this is a `Seq` variant.
	pub fn as_seq(&self) -> Option<&[FieldValue<'a>]> {
		match self {
			FieldValue::Seq(v) => Some(v),
			_ => None,
		}
	}

	pub fn is_null(&self) -> bool {
		matches!(self, FieldValue::Null)
	}

	/// Returns the type name of this value.
	pub fn type_name(&self) -> &'static str {
		match self {
			FieldValue::Null => "null",
			FieldValue::Bool(_) => "bool",
			FieldValue::Int(_) => "int",
			FieldValue::Uint(_) => "uint",
			FieldValue::Float(_) => "float",
			FieldValue::Char(_) => "char",
			FieldValue::Str(_) => "string",
			FieldValue::Seq(_) => "sequence",
		}
	}
}

/// Types that can appear as a field of a walkable record.
///
/// Leaf types produce [`FieldRef::Leaf`]; record types (usually through
/// `#[derive(Sanitize)]`) produce [`FieldRef::Record`]. References and smart
/// pointers forward to their target.
pub trait AsField {
	/// Whether values of this type are walked as nested records.
	///
	/// Decides how an empty `Option<Self>` is treated: a `None` record is
	/// [`FieldRef::Absent`], a `None` leaf is [`FieldValue::Null`].
	const NESTED: bool;

	fn as_field(&self) -> FieldRef<'_>;
}

/// Scalar types that can be elements of a sequence field.
pub trait LeafValue {
	fn leaf_value(&self) -> FieldValue<'_>;
}

macro_rules! leaf_scalars {
	($($ty:ty => |$v:ident| $value:expr),* $(,)?) => {
		$(
			impl LeafValue for $ty {
				fn leaf_value(&self) -> FieldValue<'_> {
					let $v = self;
					$value
				}
			}

			impl AsField for $ty {
				const NESTED: bool = false;

				fn as_field(&self) -> FieldRef<'_> {
					FieldRef::Leaf(self.leaf_value())
				}
			}
		)*
	};
}

leaf_scalars! {
	bool => |v| FieldValue::Bool(*v),
	i8 => |v| FieldValue::Int(i64::from(*v)),
	i16 => |v| FieldValue::Int(i64::from(*v)),
	i32 => |v| FieldValue::Int(i64::from(*v)),
	i64 => |v| FieldValue::Int(*v),
	isize => |v| FieldValue::Int(*v as i64),
	u8 => |v| FieldValue::Uint(u64::from(*v)),
	u16 => |v| FieldValue::Uint(u64::from(*v)),
	u32 => |v| FieldValue::Uint(u64::from(*v)),
	u64 => |v| FieldValue::Uint(*v),
	usize => |v| FieldValue::Uint(*v as u64),
	f32 => |v| FieldValue::Float(f64::from(*v)),
	f64 => |v| FieldValue::Float(*v),
	char => |v| FieldValue::Char(*v),
	str => |v| FieldValue::Str(v),
	String => |v| FieldValue::Str(v.as_str()),
	Cow<'_, str> => |v| FieldValue::Str(v.as_ref()),
}

impl<T: LeafValue + ?Sized> LeafValue for &T {
	fn leaf_value(&self) -> FieldValue<'_> {
		(**self).leaf_value()
	}
}

impl<T: LeafValue> LeafValue for Option<T> {
	fn leaf_value(&self) -> FieldValue<'_> {
		match self {
			Some(v) => v.leaf_value(),
			None => FieldValue::Null,
		}
	}
}

impl<T: LeafValue> LeafValue for [T] {
	fn leaf_value(&self) -> FieldValue<'_> {
		FieldValue::Seq(self.iter().map(LeafValue::leaf_value).collect())
	}
}

impl<T: LeafValue> LeafValue for Vec<T> {
	fn leaf_value(&self) -> FieldValue<'_> {
		self.as_slice().leaf_value()
	}
}

impl<T: LeafValue, const N: usize> LeafValue for [T; N] {
	fn leaf_value(&self) -> FieldValue<'_> {
		self.as_slice().leaf_value()
	}
}

impl<T: LeafValue> AsField for [T] {
	const NESTED: bool = false;

	fn as_field(&self) -> FieldRef<'_> {
		FieldRef::Leaf(self.leaf_value())
	}
}

impl<T: LeafValue> AsField for Vec<T> {
	const NESTED: bool = false;

	fn as_field(&self) -> FieldRef<'_> {
		FieldRef::Leaf(self.leaf_value())
	}
}

impl<T: LeafValue, const N: usize> AsField for [T; N] {
	const NESTED: bool = false;

	fn as_field(&self) -> FieldRef<'_> {
		FieldRef::Leaf(self.leaf_value())
	}
}

impl<T: AsField> AsField for Option<T> {
	const NESTED: bool = T::NESTED;

	fn as_field(&self) -> FieldRef<'_> {
		match self {
			Some(v) => v.as_field(),
			None if T::NESTED => FieldRef::Absent,
			None => FieldRef::Leaf(FieldValue::Null),
		}
	}
}

macro_rules! forward_pointer {
	($($ptr:ident),*) => {
		$(
			impl<T: AsField + ?Sized> AsField for $ptr<T> {
				const NESTED: bool = T::NESTED;

				fn as_field(&self) -> FieldRef<'_> {
					(**self).as_field()
				}
			}
		)*
	};
}

forward_pointer!(Box, Rc, Arc);

impl AsField for dyn Record + '_ {
	const NESTED: bool = true;

	fn as_field(&self) -> FieldRef<'_> {
		FieldRef::Record(self)
	}
}

impl<T: AsField + ?Sized> AsField for &T {
	const NESTED: bool = T::NESTED;

	fn as_field(&self) -> FieldRef<'_> {
		(**self).as_field()
	}
}
