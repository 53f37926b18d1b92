//! Decoding raw input before sanitization.

use serde::de::DeserializeOwned;

use crate::error::{DecodeError, Result};
use crate::registry::Sanitizer;
use crate::value::AsField;

/// A serialization format able to populate a record from raw bytes.
pub trait Decoder {
	fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> std::result::Result<T, DecodeError>;
}

/// JSON via `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl Decoder for JsonDecoder {
	fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> std::result::Result<T, DecodeError> {
		Ok(serde_json::from_slice(bytes)?)
	}
}

/// TOML via the `toml` crate. Input must be UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlDecoder;

impl Decoder for TomlDecoder {
	fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> std::result::Result<T, DecodeError> {
		let text = std::str::from_utf8(bytes).map_err(DecodeError::new)?;
		toml::from_str(text).map_err(DecodeError::new)
	}
}

impl Sanitizer {
	/// Decodes JSON `bytes` into a `T` and sanitizes it.
	///
	/// Returns the decode error if decoding fails, otherwise the first
	/// sanitize error.
	pub fn decode_and_sanitize<T>(&self, bytes: &[u8]) -> Result<T>
	where
		T: DeserializeOwned + AsField,
	{
		self.decode_and_sanitize_with(&JsonDecoder, bytes)
	}

	/// Like [`decode_and_sanitize`](Self::decode_and_sanitize) with any [`Decoder`].
	pub fn decode_and_sanitize_with<D, T>(&self, decoder: &D, bytes: &[u8]) -> Result<T>
	where
		D: Decoder,
		T: DeserializeOwned + AsField,
	{
		let record: T = decoder.decode(bytes)?;
		self.sanitize(&record)?;
		Ok(record)
	}

	/// Decodes JSON `bytes` into `target`, then sanitizes it.
	///
	/// `target` is overwritten only when decoding succeeds. After a sanitize
	/// failure it holds the decoded (rejected) value.
	pub fn decode_and_sanitize_into<T>(&self, bytes: &[u8], target: &mut T) -> Result<()>
	where
		T: DeserializeOwned + AsField,
	{
		*target = JsonDecoder.decode(bytes)?;
		self.sanitize(target)
	}
}
