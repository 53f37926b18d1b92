//! Procedural macros for sanitag.
//!
//! Provides `#[derive(Sanitize)]`, which turns per-field `#[sanitag(...)]`
//! attributes into a static field schema and an indexed field accessor.

use proc_macro::TokenStream;

/// Sanitize derive macro implementation.
mod record;

/// Derives `sanitag::Record` and `sanitag::AsField` for a struct.
///
/// Every field attribute `#[sanitag(...)]` contributes annotations to that
/// field. `name = "argument"` declares an annotation with an argument, a bare
/// `name` declares one with an empty argument, and `skip` removes the field
/// from the schema entirely.
///
/// ```ignore
/// #[derive(Deserialize, Sanitize)]
/// struct Contact {
///     name: String,
///     #[sanitag(phone = "ru", required)]
///     phone: String,
///     address: Address,
///     #[sanitag(skip)]
///     cache: Vec<Address>,
/// }
/// ```
///
/// Fields are walked in declaration order. Field types must implement
/// `sanitag::AsField`: scalars, strings, sequences of scalars, options,
/// smart pointers and other derived records all do.
#[proc_macro_derive(Sanitize, attributes(sanitag))]
pub fn derive_sanitize(input: TokenStream) -> TokenStream {
	record::derive_sanitize(input)
}
