use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, GenericArgument, Ident, PathArguments, Type};

use crate::attributes::{ConstructorAttribute, DefaultValue, FieldAttributes, TypeAttributes};
use crate::path;

/// Returns `U` if `ty` is written as `TriState<U>`.
///
/// The check is syntactic: any path ending in `TriState` with one type
/// argument counts.
fn tri_state_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != "TriState" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first() {
        Some(GenericArgument::Type(inner)) if args.args.len() == 1 => Some(inner),
        _ => None,
    }
}

fn member_name(ident: &Ident) -> String {
    let name = ident.to_string();
    match name.strip_prefix("r#") {
        Some(raw) => raw.to_owned(),
        None => name,
    }
}

fn constructor_expr(vc_record: &syn::Path, ctor: &ConstructorAttribute) -> TokenStream {
    let constructor_ = path::constructor_(vc_record);
    let call = match ctor.call.get_ident() {
        Some(ident) => quote! { Self::#ident },
        None => ctor.call.to_token_stream(),
    };
    let preferred = ctor.preferred.then(|| quote! { .preferred() });

    if ctor.params.is_empty() {
        return quote! { #constructor_::parameterless(#call) #preferred };
    }

    let args = (0..ctor.params.len()).map(|i| quote! { args.take(#i)? });
    let params = ctor.params.iter().map(|p| {
        let name = member_name(p);
        quote! { .param(#name) }
    });
    let result_ = path::result_();
    quote! {
        #constructor_::new(|args| #result_::Ok(#call(#(#args),*)))
            #(#params)*
            #preferred
    }
}

pub(crate) fn impl_record(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let Data::Struct(data) = &ast.data else {
        return Err(syn::Error::new(
            ast.ident.span(),
            "`Record` can only be derived for structs with named fields",
        ));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new(
            data.fields.span(),
            "`Record` can only be derived for structs with named fields",
        ));
    };
    if !ast.generics.params.is_empty() {
        return Err(syn::Error::new(
            ast.generics.span(),
            "`Record` cannot be derived for generic types",
        ));
    }

    let attrs = TypeAttributes::parse_attrs(&ast.attrs)?;
    let vc_record = path::vc_record();
    let record_ = path::record_(&vc_record);
    let wire_ = path::wire_(&vc_record);
    let model_builder_ = path::model_builder_(&vc_record);
    let parent_link_ = path::parent_link_(&vc_record);
    let result_ = path::result_();
    let option_ = path::option_();

    let mut describe = Vec::new();

    if let Some(rule) = attrs.rename_all {
        let naming_policy_ = path::naming_policy_(&vc_record);
        let variant = Ident::new(rule.policy_variant(), proc_macro2::Span::call_site());
        describe.push(quote! { builder.naming(#naming_policy_::#variant); });
    }
    if attrs.default.is_some() {
        describe.push(quote! { builder.default_constructor(); });
    }
    for ctor in &attrs.constructors {
        let expr = constructor_expr(&vc_record, ctor);
        describe.push(quote! { builder.constructor(#expr); });
    }

    let mut parent = None;
    for field in &fields.named {
        let field_attrs = FieldAttributes::parse_attrs(&field.attrs)?;
        if field_attrs.ignore {
            continue;
        }
        let Some(ident) = &field.ident else {
            continue;
        };
        let ty = &field.ty;
        let name = member_name(ident);

        if field_attrs.parent {
            if parent.is_some() {
                return Err(syn::Error::new(ident.span(), "a record has at most one parent"));
            }
            parent = Some(quote! {
                #option_::Some(#parent_link_::new::<Self, #ty>(|v| &v.#ident, |v| &mut v.#ident))
            });
            continue;
        }
        if field_attrs.capture {
            describe.push(quote! {
                builder.capture::<#ty>(#name, |v| &v.#ident, |v| &mut v.#ident);
            });
            continue;
        }

        let (method, value_ty) = match (tri_state_inner(ty), field_attrs.discriminator) {
            (Some(inner), false) => (quote! { wrapped }, inner),
            (Some(inner), true) => (quote! { wrapped_discriminator }, inner),
            (None, false) => (quote! { plain }, ty),
            (None, true) => (quote! { discriminator }, ty),
        };

        let mut options = Vec::new();
        if field_attrs.required {
            options.push(quote! { .required() });
        }
        if let Some(key) = &field_attrs.rename {
            options.push(quote! { .rename(#key) });
        }
        if field_attrs.read_only {
            options.push(quote! { .read_only() });
        }
        if field_attrs.ignore_null {
            options.push(quote! { .ignore_null() });
        }
        match &field_attrs.default {
            Some(DefaultValue::Trait) => {
                options.push(quote! { .default_value(<#ty as ::core::default::Default>::default) });
            }
            Some(DefaultValue::Path(default)) => options.push(quote! { .default_value(#default) }),
            None => {}
        }

        describe.push(quote! {
            builder.#method::<#value_ty>(#name, |v| &v.#ident, |v| &mut v.#ident) #(#options)*;
        });
    }

    if attrs.polymorphic.is_some() {
        describe.push(quote! { builder.polymorphic(); });
    }
    for (ty, tag) in &attrs.variants {
        describe.push(quote! { builder.variant::<#ty>(#tag); });
    }

    let parent_fn = parent.map(|link| {
        quote! {
            fn parent() -> #option_<#parent_link_> {
                #link
            }
        }
    });

    let ident = &ast.ident;
    let token_reader_ = path::token_reader_(&vc_record);
    let token_writer_ = path::token_writer_(&vc_record);
    let decode_error_ = path::decode_error_(&vc_record);
    let encode_error_ = path::encode_error_(&vc_record);
    let decode_options_ = path::decode_options_(&vc_record);

    Ok(quote! {
        const _: () = {
            impl #record_ for #ident {
                fn describe(builder: &mut #model_builder_<Self>) {
                    #(#describe)*
                }

                #parent_fn
            }

            impl #wire_ for #ident {
                #[inline]
                fn encode(&self, writer: &mut #token_writer_) -> #result_<(), #encode_error_> {
                    #vc_record::encode_record(self, writer)
                }

                #[inline]
                fn decode(
                    reader: &mut #token_reader_<'_>,
                    options: &#decode_options_,
                ) -> #result_<Self, #decode_error_> {
                    #vc_record::decode_record(reader, options)
                }
            }
        };
    })
}
