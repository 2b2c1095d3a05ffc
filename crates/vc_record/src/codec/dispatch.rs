use vc_token::{TokenKind, TokenReader};

use super::{DecodeError, DecodeOptions, scratch};
use crate::TriState;
use crate::info::TypeModel;

/// Selects the model to decode the object at the reader into, when
/// `requested` is asked for.
///
/// Outside a polymorphic hierarchy this is `requested` itself. Inside one,
/// the object's discriminator is looked up in the root's variant table
/// without consuming anything. An absent, null, or unmapped tag selects
/// the root itself. Either way the selected model must be `requested` or
/// a descendant of it.
pub(crate) fn resolve_model(
    requested: &'static TypeModel,
    reader: &TokenReader<'_>,
    options: &DecodeOptions,
) -> Result<&'static TypeModel, DecodeError> {
    let Some(root) = requested.polymorphic_root() else {
        return Ok(requested);
    };
    let Some(polymorphism) = root.polymorphism() else {
        return Ok(requested);
    };
    if reader.peek_kind() != Some(TokenKind::BeginObject) {
        return Ok(requested);
    }

    let discriminator = &root.members()[polymorphism.discriminator()];
    let mut lookahead = reader.clone();
    let mut key_buf = scratch::key_buffer();

    lookahead.begin_object()?;
    let state = loop {
        let Some(key) = lookahead.read_name()? else {
            break TriState::Unset;
        };
        if root.names.lookup(key, options.key_matching, &mut key_buf) == Some(polymorphism.discriminator()) {
            break discriminator
                .access()
                .decode_value(&mut lookahead, options)
                .map_err(|e| e.in_member(root.type_name(), discriminator.name()))?;
        }
        lookahead.skip_value()?;
    };

    let resolved = match state.value().and_then(|v| discriminator.tag_of(&**v)) {
        Some(tag) => match polymorphism.resolve(tag)? {
            Some(model) => model,
            None => {
                log::debug!("tag `{tag}` has no variant in `{}`; falling back to it", root.type_name());
                root
            }
        },
        None => root,
    };

    if !resolved.is_assignable_to(requested) {
        return Err(DecodeError::IncompatibleType {
            requested: requested.type_name(),
            resolved: resolved.type_name(),
        });
    }
    Ok(resolved)
}
