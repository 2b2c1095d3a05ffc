use syn::meta::ParseNestedMeta;
use syn::{Attribute, LitStr, Path, Token};

use super::RECORD_ATTRIBUTE_NAME;

/// `default` or `default = path::to_fn`.
#[derive(Debug)]
pub(crate) enum DefaultValue {
    Trait,
    Path(Path),
}

/// Field-level `#[record(...)]` attributes.
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    pub rename: Option<LitStr>,
    pub default: Option<DefaultValue>,
    pub required: bool,
    pub ignore: bool,
    pub ignore_null: bool,
    pub read_only: bool,
    pub discriminator: bool,
    pub capture: bool,
    pub parent: bool,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident(RECORD_ATTRIBUTE_NAME)) {
            attr.parse_nested_meta(|meta| this.parse_meta(meta))?;
        }
        Ok(this)
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        let flag = if meta.path.is_ident("rename") {
            self.rename = Some(meta.value()?.parse()?);
            return Ok(());
        } else if meta.path.is_ident("default") {
            self.default = Some(if meta.input.peek(Token![=]) {
                DefaultValue::Path(meta.value()?.parse()?)
            } else {
                DefaultValue::Trait
            });
            return Ok(());
        } else if meta.path.is_ident("required") {
            &mut self.required
        } else if meta.path.is_ident("ignore") {
            &mut self.ignore
        } else if meta.path.is_ident("ignore_null") {
            &mut self.ignore_null
        } else if meta.path.is_ident("read_only") {
            &mut self.read_only
        } else if meta.path.is_ident("discriminator") {
            &mut self.discriminator
        } else if meta.path.is_ident("capture") {
            &mut self.capture
        } else if meta.path.is_ident("parent") {
            &mut self.parent
        } else {
            return Err(meta.error(
                "unknown record attribute, expected one of: rename, default, required, ignore, \
                 ignore_null, read_only, discriminator, capture, parent",
            ));
        };
        *flag = true;
        Ok(())
    }
}

/// Variant-level `#[record(...)]` attributes of a `WireEnum`.
#[derive(Default, Debug)]
pub(crate) struct VariantAttributes {
    pub rename: Option<LitStr>,
}

impl VariantAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident(RECORD_ATTRIBUTE_NAME)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    this.rename = Some(meta.value()?.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("expected `rename = \"...\"`"))
                }
            })?;
        }
        Ok(this)
    }
}
