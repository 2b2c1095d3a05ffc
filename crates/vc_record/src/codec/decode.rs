use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;

use vc_token::TokenReader;

use super::{DecodeError, DecodeOptions, scratch};
use crate::info::{ConstructorArgs, TypeModel};
use crate::registry::AnyRecord;
use crate::value::RawValue;

/// Decodes the object at the reader into a new instance of `model`'s type.
///
/// With a parameterless constructor the instance is created up front and
/// filled in one pass. Otherwise the object is scanned twice: once for the
/// constructor arguments, then from its start again for the other members.
pub(crate) fn decode_model(
    model: &'static TypeModel,
    reader: &mut TokenReader<'_>,
    options: &DecodeOptions,
) -> Result<Box<dyn AnyRecord>, DecodeError> {
    let start = reader.checkpoint();
    let mut instance = construct(model, reader, options)?;
    reader.restore(start);
    apply_members(model, instance.as_any_mut(), reader, options)?;
    Ok(instance)
}

/// Stages constructor arguments from the object and invokes the constructor.
fn construct(
    model: &TypeModel,
    reader: &mut TokenReader<'_>,
    options: &DecodeOptions,
) -> Result<Box<dyn AnyRecord>, DecodeError> {
    let ctor = model.constructor();
    let params = ctor.params();
    if params.is_empty() {
        return ctor.invoke(&mut ConstructorArgs::new(model.type_name(), params, &mut []));
    }

    let mut slots = scratch::arg_slots(params.len());
    for (slot, param) in slots.iter_mut().zip(params) {
        if let Some(default) = param.default_value() {
            slot.fill(default);
        }
    }

    let mut seen = scratch::seen_set(params.len());
    let mut key_buf = scratch::key_buffer();
    // Defaults only pre-fill slots; a key in the object still overrides them.
    let mut unread = params.len();

    reader.begin_object()?;
    while unread > 0 {
        let Some(key) = reader.read_name()? else {
            break;
        };
        let bound = model
            .names
            .lookup(key, options.key_matching, &mut key_buf)
            .and_then(|index| model.members()[index].parameter());
        match bound {
            Some(index) if !seen.contains(index) => {
                let member = &model.members()[params[index].member()];
                member
                    .access()
                    .decode_slot(&mut slots[index], reader, options)
                    .map_err(|e| e.in_member(model.type_name(), member.name()))?;
                seen.insert(index);
                unread -= 1;
            }
            _ => reader.skip_value()?,
        }
    }

    if let Some(missing) = slots.iter().position(|slot| !slot.is_filled()) {
        return Err(DecodeError::MissingParameter {
            type_name: model.type_name(),
            parameter: params[missing].name(),
        });
    }
    ctor.invoke(&mut ConstructorArgs::new(model.type_name(), params, &mut slots[..]))
}

/// Applies every writable member not bound to a constructor parameter.
///
/// Unknown keys go to the capture slot or are skipped. Required members
/// absent from the object are reported together.
fn apply_members(
    model: &TypeModel,
    owner: &mut dyn Any,
    reader: &mut TokenReader<'_>,
    options: &DecodeOptions,
) -> Result<(), DecodeError> {
    let members = model.members();
    let capture = model.capture().filter(|_| options.capture_unmatched);
    let mut seen = scratch::seen_set(members.len());
    let mut key_buf = scratch::key_buffer();

    reader.begin_object()?;
    while let Some(key) = reader.read_name()? {
        let Some(index) = model.names.lookup(key, options.key_matching, &mut key_buf) else {
            let captured = match capture {
                Some(slot) => slot.get_mut(owner),
                None => None,
            };
            match captured {
                Some(captured) => {
                    log::trace!("capturing unknown key `{key}` of `{}`", model.type_name());
                    captured.insert(key, RawValue::new(reader.read_raw()?));
                }
                None => {
                    log::trace!("skipping unknown key `{key}` of `{}`", model.type_name());
                    reader.skip_value()?;
                }
            }
            continue;
        };

        let member = &members[index];
        seen.insert(index);
        if member.parameter().is_some() || !member.can_write() {
            reader.skip_value()?;
            continue;
        }
        member
            .access()
            .decode_into(owner, reader, options)
            .map_err(|e| e.in_member(model.type_name(), member.name()))?;
    }

    let missing: Vec<String> = members
        .iter()
        .enumerate()
        .filter(|(i, m)| m.is_required() && m.parameter().is_none() && !seen.contains(*i))
        .map(|(_, m)| String::from(m.key()))
        .collect();
    if !missing.is_empty() {
        return Err(DecodeError::MissingMembers {
            type_name: model.type_name(),
            members: missing,
        });
    }
    Ok(())
}
