use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr};

use crate::attributes::{TypeAttributes, VariantAttributes};
use crate::case::RenameRule;
use crate::path;

pub(crate) fn impl_wire_enum(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let Data::Enum(data) = &ast.data else {
        return Err(syn::Error::new(
            ast.ident.span(),
            "`WireEnum` can only be derived for enums",
        ));
    };
    if !ast.generics.params.is_empty() {
        return Err(syn::Error::new(
            ast.ident.span(),
            "`WireEnum` cannot be derived for generic types",
        ));
    }

    let attrs = TypeAttributes::parse_attrs(&ast.attrs)?;
    let rule = attrs.rename_all.unwrap_or(RenameRule::Verbatim);

    let mut idents = Vec::with_capacity(data.variants.len());
    let mut tags: Vec<LitStr> = Vec::with_capacity(data.variants.len());
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new(
                variant.ident.span(),
                "`WireEnum` variants cannot carry data",
            ));
        }
        let tag = match VariantAttributes::parse_attrs(&variant.attrs)?.rename {
            Some(tag) => tag,
            None => LitStr::new(&rule.apply(&variant.ident.to_string()), variant.ident.span()),
        };
        if let Some(prev) = tags.iter().find(|t| t.value() == tag.value()) {
            return Err(syn::Error::new(
                tag.span(),
                format!("tag `{}` is used twice", prev.value()),
            ));
        }
        idents.push(&variant.ident);
        tags.push(tag);
    }

    let vc_record = path::vc_record();
    let tag_ = path::tag_(&vc_record);
    let wire_ = path::wire_(&vc_record);
    let token_reader_ = path::token_reader_(&vc_record);
    let token_writer_ = path::token_writer_(&vc_record);
    let decode_error_ = path::decode_error_(&vc_record);
    let encode_error_ = path::encode_error_(&vc_record);
    let decode_options_ = path::decode_options_(&vc_record);
    let result_ = path::result_();
    let option_ = path::option_();
    let ident = &ast.ident;

    Ok(quote! {
        const _: () = {
            impl #tag_ for #ident {
                fn tag(&self) -> &str {
                    match self {
                        #(Self::#idents => #tags,)*
                    }
                }

                fn from_tag(tag: &str) -> #option_<Self> {
                    match tag {
                        #(#tags => #option_::Some(Self::#idents),)*
                        _ => #option_::None,
                    }
                }
            }

            impl #wire_ for #ident {
                fn encode(&self, writer: &mut #token_writer_) -> #result_<(), #encode_error_> {
                    writer.write_str(#tag_::tag(self))?;
                    #result_::Ok(())
                }

                fn decode(
                    reader: &mut #token_reader_<'_>,
                    _options: &#decode_options_,
                ) -> #result_<Self, #decode_error_> {
                    let tag = reader.read_str()?;
                    <Self as #tag_>::from_tag(tag).ok_or_else(|| #decode_error_::UnknownVariant {
                        type_name: ::core::any::type_name::<Self>(),
                        value: ::core::convert::Into::into(tag),
                    })
                }
            }
        };
    })
}
