//! Annotation handler registry.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap as HashMap;
use tracing::{debug, trace};

use crate::config::{DuplicatePolicy, SanitizerConfig};
use crate::error::{FieldPath, HandlerError, RegistryError, Result, SanitizeError};
use crate::value::FieldValue;

/// Shared handler callback: `(argument, value) -> Result`.
pub type Handler =
	Arc<dyn Fn(&str, &FieldValue<'_>) -> std::result::Result<(), HandlerError> + Send + Sync>;

/// Outcome of a successful registration.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RegisterAction {
	/// Name was new; handler inserted at the end of the dispatch order.
	Inserted,
	/// Name existed; handler replaced in place.
	Replaced,
	/// Name existed; handler replaced and the name appended to the dispatch
	/// order again ([`DuplicatePolicy::Append`]).
	Appended,
}

/// Registry of annotation handlers and the walker that dispatches them.
///
/// Handlers are dispatched in registration order. Populate the registry
/// completely before sharing it; walks only need `&self`.
#[derive(Default)]
pub struct Sanitizer {
	handlers: HashMap<Box<str>, Handler>,
	/// Dispatch order. Every entry is a key of `handlers`.
	names: Vec<Box<str>>,
	config: SanitizerConfig,
}

impl fmt::Debug for Sanitizer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Sanitizer")
			.field("names", &self.names)
			.field("config", &self.config)
			.finish_non_exhaustive()
	}
}

impl Sanitizer {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_config(config: SanitizerConfig) -> Self {
		Self {
			config,
			..Self::default()
		}
	}

	pub fn config(&self) -> &SanitizerConfig {
		&self.config
	}

	/// Registers `handler` under `name`.
	///
	/// An existing name is handled according to the configured
	/// [`DuplicatePolicy`].
	pub fn register<F>(
		&mut self,
		name: impl Into<String>,
		handler: F,
	) -> std::result::Result<RegisterAction, RegistryError>
	where
		F: Fn(&str, &FieldValue<'_>) -> std::result::Result<(), HandlerError>
			+ Send
			+ Sync
			+ 'static,
	{
		self.register_shared(name, Arc::new(handler))
	}

	/// Registers an already shared handler, e.g. one also held by the caller
	/// or registered under several names.
	pub fn register_shared(
		&mut self,
		name: impl Into<String>,
		handler: Handler,
	) -> std::result::Result<RegisterAction, RegistryError> {
		let name = name.into();
		if name.is_empty() {
			return Err(RegistryError::EmptyName);
		}

		let name: Box<str> = name.into_boxed_str();
		let action = match self.handlers.get_mut(&name) {
			None => {
				self.names.push(name.clone());
				self.handlers.insert(name.clone(), handler);
				RegisterAction::Inserted
			}
			Some(existing) => match self.config.duplicates {
				DuplicatePolicy::Reject => {
					return Err(RegistryError::Duplicate {
						name: name.into_string(),
					});
				}
				DuplicatePolicy::Replace => {
					*existing = handler;
					RegisterAction::Replaced
				}
				DuplicatePolicy::Append => {
					*existing = handler;
					self.names.push(name.clone());
					RegisterAction::Appended
				}
			},
		};

		debug!(annotation = %name, ?action, "registered annotation handler");
		Ok(action)
	}

	/// Invokes the handler registered under `name`.
	///
	/// Fails with [`SanitizeError::UnknownAnnotation`] if none is registered.
	pub fn dispatch(&self, name: &str, argument: &str, value: &FieldValue<'_>) -> Result<()> {
		self.dispatch_at(name, argument, value, FieldPath::root)
	}

	pub(crate) fn dispatch_at(
		&self,
		name: &str,
		argument: &str,
		value: &FieldValue<'_>,
		path: impl FnOnce() -> FieldPath,
	) -> Result<()> {
		let Some(handler) = self.handlers.get(name) else {
			return Err(SanitizeError::UnknownAnnotation {
				name: name.to_string(),
				path: path(),
			});
		};

		trace!(annotation = name, argument, kind = value.type_name(), "dispatching");
		handler(argument, value).map_err(|source| SanitizeError::Handler {
			path: path(),
			annotation: name.to_string(),
			source,
		})
	}

	/// Annotation names in dispatch order.
	///
	/// Contains repeats only under [`DuplicatePolicy::Append`].
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.names.iter().map(|name| &**name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.handlers.contains_key(name)
	}

	/// Number of distinct registered annotation names.
	pub fn len(&self) -> usize {
		self.handlers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.handlers.is_empty()
	}
}
