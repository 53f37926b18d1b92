//! Error types for registration, decoding and sanitization.

use std::fmt;

use thiserror::Error;

/// Failure produced by a caller-supplied handler.
///
/// The sanitizer never inspects it; it is relayed as the `source` of
/// [`SanitizeError::Handler`].
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Dotted location of a field inside a record tree, e.g. `owner.contact.phone`.
///
/// The empty path denotes the top-level value itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(String);

impl FieldPath {
	/// Path of the top-level value.
	pub fn root() -> Self {
		Self(String::new())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn is_root(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<&str> for FieldPath {
	fn from(path: &str) -> Self {
		Self(path.to_string())
	}
}

impl From<String> for FieldPath {
	fn from(path: String) -> Self {
		Self(path)
	}
}

impl fmt::Display for FieldPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.0.is_empty() {
			f.write_str("<root>")
		} else {
			f.write_str(&self.0)
		}
	}
}

/// Failure of the external decode step.
///
/// Displays exactly as the underlying format error.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct DecodeError(Box<dyn std::error::Error + Send + Sync>);

impl DecodeError {
	pub fn new(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
		Self(error.into())
	}

	/// Returns the underlying format error.
	pub fn get_ref(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
		&*self.0
	}

	pub fn into_inner(self) -> Box<dyn std::error::Error + Send + Sync> {
		self.0
	}
}

impl From<serde_json::Error> for DecodeError {
	fn from(error: serde_json::Error) -> Self {
		Self::new(error)
	}
}

/// Errors returned by [`Sanitizer::sanitize`](crate::Sanitizer::sanitize) and friends.
#[derive(Debug, Error)]
pub enum SanitizeError {
	/// The raw input could not be decoded into the target record.
	#[error(transparent)]
	Decode(#[from] DecodeError),

	/// The value is not a walkable record, or a nested record reference is empty.
	#[error("invalid record at {path}: {reason}")]
	InvalidRecord {
		/// Location of the offending value.
		path: FieldPath,
		/// What was found instead of a record.
		reason: String,
	},

	/// No handler is registered under the requested annotation name.
	#[error("no handler registered for annotation `{name}` (at {path})")]
	UnknownAnnotation {
		/// The unregistered annotation name.
		name: String,
		/// Field declaring the annotation.
		path: FieldPath,
	},

	/// A handler rejected a field value.
	#[error("field {path} failed `{annotation}`: {source}")]
	Handler {
		/// Field whose value was rejected.
		path: FieldPath,
		/// Annotation whose handler failed.
		annotation: String,
		/// The handler's own error.
		source: HandlerError,
	},
}

impl SanitizeError {
	/// Location the error refers to, if any.
	pub fn path(&self) -> Option<&FieldPath> {
		match self {
			Self::Decode(_) => None,
			Self::InvalidRecord { path, .. }
			| Self::UnknownAnnotation { path, .. }
			| Self::Handler { path, .. } => Some(path),
		}
	}

	/// The handler's error when a handler rejected a value.
	pub fn handler_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
		match self {
			Self::Handler { source, .. } => Some(&**source),
			_ => None,
		}
	}
}

/// Errors returned when registering handlers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
	/// Annotation names must be non-empty.
	#[error("annotation name must not be empty")]
	EmptyName,

	/// The name is already registered and the policy is
	/// [`DuplicatePolicy::Reject`](crate::DuplicatePolicy::Reject).
	#[error("annotation `{name}` is already registered")]
	Duplicate { name: String },
}

/// Errors that can occur when parsing sanitizer configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or an unexpected key.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),
}

/// Result type for sanitization.
pub type Result<T> = std::result::Result<T, SanitizeError>;
