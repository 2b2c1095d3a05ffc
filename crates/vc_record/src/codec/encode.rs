use core::any::Any;

use vc_token::TokenWriter;

use super::EncodeError;
use crate::TriState;
use crate::info::{IgnorePolicy, TypeModel};

/// Writes `value`, an instance of `model`'s type, as an object.
///
/// Members are written in model order: `Unset` leaves the key out, `Null`
/// writes `null` unless the member ignores nulls. Captured entries follow,
/// except those whose key a member now claims.
pub(crate) fn encode_model(
    model: &TypeModel,
    value: &dyn Any,
    writer: &mut TokenWriter,
) -> Result<(), EncodeError> {
    let mismatch = || EncodeError::Mismatch {
        expected: model.type_name(),
    };

    writer.begin_object()?;
    for member in model.members().iter().filter(|m| m.can_read()) {
        match member.read(value).ok_or_else(mismatch)? {
            TriState::Unset => {}
            TriState::Null => {
                if member.ignore_policy() != IgnorePolicy::WhenWritingNull {
                    writer.write_name(member.key())?;
                    writer.write_null()?;
                }
            }
            TriState::Value(v) => {
                writer.write_name(member.key())?;
                v.encode_erased(writer)?;
            }
        }
    }

    if let Some(slot) = model.capture() {
        let captured = slot.get(value).ok_or_else(mismatch)?;
        for (key, raw) in captured.iter() {
            if model.names.contains(key) {
                log::trace!("dropping captured `{key}` of `{}`: now a member", model.type_name());
                continue;
            }
            writer.write_name(key)?;
            writer.write_raw(raw.tokens())?;
        }
    }
    writer.end_object()?;
    Ok(())
}
