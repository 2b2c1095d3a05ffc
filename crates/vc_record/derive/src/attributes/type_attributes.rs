use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Ident, LitStr, Path, Token, Type, parenthesized};

use super::RECORD_ATTRIBUTE_NAME;
use crate::case::RenameRule;

/// `constructor(call = new, params(a, b), preferred)`
#[derive(Debug)]
pub(crate) struct ConstructorAttribute {
    pub call: Path,
    pub params: Vec<Ident>,
    pub preferred: bool,
}

/// Type-level `#[record(...)]` attributes.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    pub rename_all: Option<RenameRule>,
    /// `default`: register `Default::default` as a constructor.
    pub default: Option<Span>,
    pub constructors: Vec<ConstructorAttribute>,
    pub polymorphic: Option<Span>,
    /// `variant(Type, "tag", ...)`, one entry per tag.
    pub variants: Vec<(Type, LitStr)>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident(RECORD_ATTRIBUTE_NAME)) {
            attr.parse_nested_meta(|meta| this.parse_meta(meta))?;
        }
        Ok(this)
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("rename_all") {
            let lit: LitStr = meta.value()?.parse()?;
            self.rename_all = Some(RenameRule::parse(&lit.value(), lit.span())?);
        } else if meta.path.is_ident("default") {
            self.default = Some(meta.input.span());
        } else if meta.path.is_ident("polymorphic") {
            self.polymorphic = Some(meta.input.span());
        } else if meta.path.is_ident("constructor") {
            self.constructors.push(parse_constructor(&meta)?);
        } else if meta.path.is_ident("variant") {
            let content;
            parenthesized!(content in meta.input);
            let ty: Type = content.parse()?;
            let mut tags = 0;
            while !content.is_empty() {
                content.parse::<Token![,]>()?;
                if content.is_empty() {
                    break;
                }
                self.variants.push((ty.clone(), content.parse()?));
                tags += 1;
            }
            if tags == 0 {
                return Err(meta.error("expected `variant(Type, \"tag\", ...)`"));
            }
        } else {
            return Err(meta.error(
                "unknown record attribute, expected one of: rename_all, default, constructor, \
                 polymorphic, variant",
            ));
        }
        Ok(())
    }
}

fn parse_constructor(meta: &ParseNestedMeta) -> syn::Result<ConstructorAttribute> {
    let mut call = None;
    let mut params = Vec::new();
    let mut preferred = false;
    meta.parse_nested_meta(|inner| {
        if inner.path.is_ident("call") {
            call = Some(inner.value()?.parse::<Path>()?);
        } else if inner.path.is_ident("params") {
            inner.parse_nested_meta(|param| {
                let ident = param
                    .path
                    .get_ident()
                    .ok_or_else(|| param.error("expected a member name"))?;
                params.push(ident.clone());
                Ok(())
            })?;
        } else if inner.path.is_ident("preferred") {
            preferred = true;
        } else {
            return Err(inner.error("expected `call`, `params`, or `preferred`"));
        }
        Ok(())
    })?;
    let call = call.ok_or_else(|| meta.error("`constructor` needs `call = path`"))?;
    Ok(ConstructorAttribute {
        call,
        params,
        preferred,
    })
}
