//! Declarative field sanitization.
//!
//! A [`Sanitizer`] maps annotation names to caller-supplied handlers. Record
//! types declare which of their fields carry which annotations, normally via
//! `#[derive(Sanitize)]`, and [`Sanitizer::sanitize`] walks a record,
//! invoking the matching handler for every annotated leaf field.
//!
//! ```ignore
//! use sanitag::{FieldValue, Sanitize, Sanitizer};
//!
//! #[derive(serde::Deserialize, Sanitize)]
//! struct Contact {
//!     name: String,
//!     #[sanitag(phone = "ru")]
//!     phone: String,
//! }
//!
//! let mut sanitizer = Sanitizer::new();
//! sanitizer.register("phone", |country, value: &FieldValue<'_>| {
//!     match (country, value.as_str()) {
//!         ("ru", Some(number)) if number.starts_with("+7") => Ok(()),
//!         _ => Err("not a valid phone number".into()),
//!     }
//! })?;
//!
//! let contact: Contact = sanitizer.decode_and_sanitize(br#"{"name": "a", "phone": "+79261234567"}"#)?;
//! ```
//!
//! # Dispatch order
//!
//! Fields are visited in declaration order and nested records are walked
//! depth-first. Within one leaf field, handlers run in registration order,
//! not in the order the annotations were written. The first error aborts
//! the walk.
//!
//! An annotation with no registered handler fails the walk with
//! [`SanitizeError::UnknownAnnotation`] unless the sanitizer is configured
//! with [`UnknownAnnotationPolicy::Ignore`].
//!
//! # Sharing
//!
//! Registration takes `&mut self`; walking takes `&self`. A fully populated
//! sanitizer can be shared between threads, and no walk mutates it.

mod config;
mod decode;
mod error;
mod record;
mod registry;
mod value;
mod walk;

pub use config::{DuplicatePolicy, SanitizerConfig, UnknownAnnotationPolicy};
pub use decode::{Decoder, JsonDecoder, TomlDecoder};
pub use error::{
	ConfigError, DecodeError, FieldPath, HandlerError, RegistryError, Result, SanitizeError,
};
pub use record::{Annotation, FieldDef, FieldRef, Record, Schema};
pub use registry::{Handler, RegisterAction, Sanitizer};
#[cfg(feature = "derive")]
pub use sanitag_macros::Sanitize;
pub use value::{AsField, FieldValue, LeafValue};
