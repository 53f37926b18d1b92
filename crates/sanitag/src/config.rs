//! Sanitizer behaviour knobs.
//!
//! The defaults suit most callers. A configuration can also be loaded from
//! TOML:
//!
//! ```toml
//! duplicates = "reject"
//! unknown-annotations = "ignore"
//! ```

use serde::Deserialize;

use crate::error::ConfigError;

/// What [`Sanitizer::register`](crate::Sanitizer::register) does with a name
/// that is already registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
	/// Swap the handler, keep the name's original dispatch position.
	#[default]
	Replace,
	/// Fail with [`RegistryError::Duplicate`](crate::RegistryError::Duplicate).
	Reject,
	/// Swap the handler and append the name again, so annotated fields are
	/// dispatched once per registration.
	Append,
}

/// How the walker treats annotations that have no registered handler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownAnnotationPolicy {
	/// Unregistered annotations, and annotations on nested record fields,
	/// are silently not dispatched.
	Ignore,
	/// A leaf declaring an unregistered annotation fails with
	/// [`SanitizeError::UnknownAnnotation`](crate::SanitizeError::UnknownAnnotation);
	/// an annotated nested record field fails with
	/// [`SanitizeError::InvalidRecord`](crate::SanitizeError::InvalidRecord).
	#[default]
	Reject,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct SanitizerConfig {
	pub duplicates: DuplicatePolicy,
	pub unknown_annotations: UnknownAnnotationPolicy,
}

impl SanitizerConfig {
	/// Parses a configuration from TOML. Missing keys take their defaults.
	pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(input)?)
	}

	pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
		self.duplicates = policy;
		self
	}

	pub fn with_unknown_annotations(mut self, policy: UnknownAnnotationPolicy) -> Self {
		self.unknown_annotations = policy;
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_config_uses_defaults() {
		let config = SanitizerConfig::from_toml_str("").unwrap();
		assert_eq!(config, SanitizerConfig::default());
		assert_eq!(config.duplicates, DuplicatePolicy::Replace);
		assert_eq!(config.unknown_annotations, UnknownAnnotationPolicy::Reject);
	}

	#[test]
	fn parses_kebab_case_keys() {
		let config = SanitizerConfig::from_toml_str(
			"duplicates = \"append\"\nunknown-annotations = \"ignore\"\n",
		)
		.unwrap();
		assert_eq!(config.duplicates, DuplicatePolicy::Append);
		assert_eq!(config.unknown_annotations, UnknownAnnotationPolicy::Ignore);
	}

	#[test]
	fn rejects_unknown_keys() {
		let err = SanitizerConfig::from_toml_str("strict = true").unwrap_err();
		assert!(matches!(err, ConfigError::Toml(_)));
	}

	#[test]
	fn rejects_unknown_policy() {
		assert!(SanitizerConfig::from_toml_str("duplicates = \"panic\"").is_err());
	}
}
