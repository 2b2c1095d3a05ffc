use core::any::type_name;

use vc_token::{TokenBuffer, TokenReader, TokenWriter};

use super::decode::decode_model;
use super::dispatch::resolve_model;
use super::encode::encode_model;
use super::{DecodeError, DecodeOptions, EncodeError, Poly};
use crate::registry::{AnyRecord, Record};
use crate::value::Wire;

// -----------------------------------------------------------------------------
// Buffers

/// Encodes `value` into a new token buffer.
///
/// # Examples
///
/// ```
/// let tokens = vc_record::encode(&vec![1_u8, 2]).unwrap();
/// assert_eq!(vc_record::decode::<Vec<u8>>(&tokens, &Default::default()).unwrap(), [1, 2]);
/// ```
pub fn encode<T: Wire>(value: &T) -> Result<TokenBuffer, EncodeError> {
    let mut writer = TokenWriter::new();
    value.encode(&mut writer)?;
    Ok(writer.finish()?)
}

/// Encodes a record through its runtime type's model.
pub fn encode_dyn(value: &dyn AnyRecord) -> Result<TokenBuffer, EncodeError> {
    let mut writer = TokenWriter::new();
    encode_record_dyn(value, &mut writer)?;
    Ok(writer.finish()?)
}

/// Decodes one value spanning the whole buffer.
///
/// Decoding a record whose input resolves to a subtype fails with
/// [`DecodeError::RequiresPoly`]; use [`decode_poly`] for hierarchies.
pub fn decode<T: Wire>(tokens: &TokenBuffer, options: &DecodeOptions) -> Result<T, DecodeError> {
    let mut reader = tokens.reader();
    let value = T::decode(&mut reader, options)?;
    if !reader.is_finished() {
        return Err(DecodeError::TrailingTokens {
            position: reader.position(),
        });
    }
    Ok(value)
}

/// Decodes a `T` or any registered descendant of it.
#[inline]
pub fn decode_poly<T: Record>(tokens: &TokenBuffer, options: &DecodeOptions) -> Result<Poly<T>, DecodeError> {
    decode::<Poly<T>>(tokens, options)
}

// -----------------------------------------------------------------------------
// Streams

/// Writes a record as an object. Used by `#[derive(Record)]` for
/// [`Wire::encode`].
pub fn encode_record<T: Record>(value: &T, writer: &mut TokenWriter) -> Result<(), EncodeError> {
    encode_model(T::type_model()?, value, writer)
}

/// Writes a record through its runtime type's model.
pub fn encode_record_dyn(value: &dyn AnyRecord, writer: &mut TokenWriter) -> Result<(), EncodeError> {
    encode_model(value.record_model()?, value.as_any(), writer)
}

/// Reads an object as exactly a `T`. Used by `#[derive(Record)]` for
/// [`Wire::decode`].
pub fn decode_record<T: Record>(reader: &mut TokenReader<'_>, options: &DecodeOptions) -> Result<T, DecodeError> {
    let requested = T::type_model()?;
    let model = resolve_model(requested, reader, options)?;
    if model.type_id() != requested.type_id() {
        return Err(DecodeError::RequiresPoly {
            requested: requested.type_name(),
            resolved: model.type_name(),
        });
    }
    let value = decode_model(model, reader, options)?;
    value
        .into_any()
        .downcast::<T>()
        .map(|value| *value)
        .map_err(|_| DecodeError::Mismatch {
            expected: type_name::<T>(),
        })
}

/// Reads an object as a `T` or a descendant selected by its discriminator.
pub fn decode_record_poly<T: Record>(
    reader: &mut TokenReader<'_>,
    options: &DecodeOptions,
) -> Result<Poly<T>, DecodeError> {
    let requested = T::type_model()?;
    let model = resolve_model(requested, reader, options)?;
    Poly::from_boxed(decode_model(model, reader, options)?)
}
