use alloc::string::{String, ToString};
use alloc::vec::Vec;

use vc_token::{TokenBuffer, TokenKind, TokenReader, TokenWriter};

use super::Wire;
use crate::codec::{DecodeError, DecodeOptions, EncodeError};

// -----------------------------------------------------------------------------
// RawValue

/// One undecoded value, kept as its tokens.
///
/// Writing a `RawValue` reproduces the exact tokens it was read from.
#[derive(Clone, PartialEq, Debug)]
pub struct RawValue(TokenBuffer);

impl RawValue {
    /// Wraps a buffer holding exactly one value.
    #[inline]
    pub fn new(tokens: TokenBuffer) -> Self {
        Self(tokens)
    }

    /// A raw `null`.
    #[inline]
    pub fn null_value() -> Self {
        Self(TokenBuffer::null())
    }

    #[inline]
    pub fn tokens(&self) -> &TokenBuffer {
        &self.0
    }

    #[inline]
    pub fn into_tokens(self) -> TokenBuffer {
        self.0
    }

    /// Decodes the held value as `T`.
    pub fn decode_as<T: Wire>(&self, options: &DecodeOptions) -> Result<T, DecodeError> {
        crate::codec::decode(&self.0, options)
    }
}

impl Wire for RawValue {
    const NULLABLE: bool = true;

    #[inline]
    fn encode(&self, writer: &mut TokenWriter) -> Result<(), EncodeError> {
        Ok(writer.write_raw(&self.0)?)
    }

    #[inline]
    fn decode(reader: &mut TokenReader<'_>, _: &DecodeOptions) -> Result<Self, DecodeError> {
        Ok(Self(reader.read_raw()?))
    }

    #[inline]
    fn is_null(&self) -> bool {
        self.0.len() == 1 && self.0.kind_at(0) == Some(TokenKind::Null)
    }

    #[inline]
    fn null() -> Option<Self> {
        Some(Self::null_value())
    }
}

// -----------------------------------------------------------------------------
// CaptureMap

/// Keys a record did not recognize, with their raw values, in input order.
///
/// A record field of this type marked as the capture slot collects unknown
/// keys on decode; encoding writes them back after the modeled members.
#[derive(Clone, Default, PartialEq, Debug)]
pub struct CaptureMap {
    entries: Vec<(String, RawValue)>,
}

impl CaptureMap {
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Inserts or replaces `key`, keeping the position of an existing entry.
    pub fn insert(&mut self, key: impl Into<String>, value: RawValue) -> Option<RawValue> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(core::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<RawValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &RawValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Wire for CaptureMap {
    fn encode(&self, writer: &mut TokenWriter) -> Result<(), EncodeError> {
        writer.begin_object()?;
        for (key, value) in &self.entries {
            writer.write_name(key)?;
            value.encode(writer)?;
        }
        Ok(writer.end_object()?)
    }

    fn decode(reader: &mut TokenReader<'_>, _: &DecodeOptions) -> Result<Self, DecodeError> {
        reader.begin_object()?;
        let mut map = Self::new();
        while let Some(key) = reader.read_name()? {
            let value = RawValue(reader.read_raw()?);
            map.insert(key.to_string(), value);
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::{CaptureMap, RawValue};
    use crate::value::Wire;

    #[test]
    fn insert_keeps_order() {
        let mut map = CaptureMap::new();
        map.insert("b", RawValue::null_value());
        map.insert("a", RawValue::null_value());
        assert!(map.insert("b", RawValue::null_value()).is_some());
        let keys: Vec<_> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["b", "a"]);
        assert!(map.remove("b").is_some());
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn raw_null() {
        assert!(RawValue::null_value().is_null());
    }
}
