//! Paths into `vc_record` used by the generated code.

use proc_macro2::TokenStream;
use quote::quote;

/// The path of `vc_record` as seen from the crate being expanded.
///
/// Resolving it reads the caller's manifest, so it is computed once per
/// macro invocation and passed around.
pub(crate) fn vc_record() -> syn::Path {
    vc_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("vc_record"))
}

#[inline(always)]
pub(crate) fn record_(vc_record: &syn::Path) -> TokenStream {
    quote! { #vc_record::Record }
}

#[inline(always)]
pub(crate) fn wire_(vc_record: &syn::Path) -> TokenStream {
    quote! { #vc_record::Wire }
}

#[inline(always)]
pub(crate) fn tag_(vc_record: &syn::Path) -> TokenStream {
    quote! { #vc_record::Tag }
}

#[inline(always)]
pub(crate) fn model_builder_(vc_record: &syn::Path) -> TokenStream {
    quote! { #vc_record::ModelBuilder }
}

#[inline(always)]
pub(crate) fn constructor_(vc_record: &syn::Path) -> TokenStream {
    quote! { #vc_record::Constructor }
}

#[inline(always)]
pub(crate) fn naming_policy_(vc_record: &syn::Path) -> TokenStream {
    quote! { #vc_record::NamingPolicy }
}

#[inline(always)]
pub(crate) fn parent_link_(vc_record: &syn::Path) -> TokenStream {
    quote! { #vc_record::ParentLink }
}

#[inline(always)]
pub(crate) fn decode_error_(vc_record: &syn::Path) -> TokenStream {
    quote! { #vc_record::DecodeError }
}

#[inline(always)]
pub(crate) fn encode_error_(vc_record: &syn::Path) -> TokenStream {
    quote! { #vc_record::EncodeError }
}

#[inline(always)]
pub(crate) fn decode_options_(vc_record: &syn::Path) -> TokenStream {
    quote! { #vc_record::DecodeOptions }
}

#[inline(always)]
pub(crate) fn token_reader_(vc_record: &syn::Path) -> TokenStream {
    quote! { #vc_record::__macro_exports::TokenReader }
}

#[inline(always)]
pub(crate) fn token_writer_(vc_record: &syn::Path) -> TokenStream {
    quote! { #vc_record::__macro_exports::TokenWriter }
}

#[inline(always)]
pub(crate) fn result_() -> TokenStream {
    quote! { ::core::result::Result }
}

#[inline(always)]
pub(crate) fn option_() -> TokenStream {
    quote! { ::core::option::Option }
}
