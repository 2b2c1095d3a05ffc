//! JSON text in and out, through [`serde_json`] and the token buffer.
//!
//! # Examples
//!
//! ```
//! use vc_record::{Record, TriState, json};
//!
//! #[derive(Record, Default, Debug, PartialEq)]
//! #[record(default, rename_all = "camelCase")]
//! struct Patch {
//!     display_name: TriState<String>,
//!     avatar_url: TriState<String>,
//! }
//!
//! let patch: Patch = json::from_str(r#"{"displayName":"Ada","avatarUrl":null}"#).unwrap();
//! assert_eq!(patch.display_name, TriState::Value("Ada".to_owned()));
//! assert_eq!(patch.avatar_url, TriState::Null);
//! assert_eq!(json::to_string(&patch).unwrap(), r#"{"displayName":"Ada","avatarUrl":null}"#);
//! ```

use alloc::string::String;

use vc_token::TokenBuffer;

use crate::codec::{self, DecodeError, DecodeOptions, EncodeError, Poly};
use crate::registry::{AnyRecord, Record};
use crate::value::Wire;

pub fn to_string<T: Wire>(value: &T) -> Result<String, EncodeError> {
    Ok(serde_json::to_string(&codec::encode(value)?)?)
}

pub fn to_string_pretty<T: Wire>(value: &T) -> Result<String, EncodeError> {
    Ok(serde_json::to_string_pretty(&codec::encode(value)?)?)
}

/// Writes a record through its runtime type's model.
pub fn to_string_dyn(value: &dyn AnyRecord) -> Result<String, EncodeError> {
    Ok(serde_json::to_string(&codec::encode_dyn(value)?)?)
}

/// Parses JSON text into a token buffer.
pub fn to_tokens(text: &str) -> Result<TokenBuffer, DecodeError> {
    Ok(serde_json::from_str(text)?)
}

/// Decodes with default options.
#[inline]
pub fn from_str<T: Wire>(text: &str) -> Result<T, DecodeError> {
    from_str_with(text, &DecodeOptions::new())
}

pub fn from_str_with<T: Wire>(text: &str, options: &DecodeOptions) -> Result<T, DecodeError> {
    codec::decode(&to_tokens(text)?, options)
}

/// Decodes a `T` or a registered descendant of it.
pub fn from_str_poly<T: Record>(text: &str, options: &DecodeOptions) -> Result<Poly<T>, DecodeError> {
    codec::decode_poly(&to_tokens(text)?, options)
}
