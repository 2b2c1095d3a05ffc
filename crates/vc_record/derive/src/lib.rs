//! Derive macros for `vc_record`:
//!
//! - [`Record`]
//! - [`WireEnum`]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod case;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// Implements `Record` and `Wire` for a struct with named fields.
///
/// Every field becomes a member named after it. A field written as
/// `TriState<T>` becomes a wrapped member, anything else a plain one.
///
/// ## Type attributes
///
/// - `rename_all = "camelCase"`: the naming policy for wire keys. Accepts
///   `verbatim`, `camelCase`, `PascalCase`, `snake_case`, `kebab-case`,
///   `SCREAMING_SNAKE_CASE`.
/// - `default`: `Default::default` is a parameterless constructor.
/// - `constructor(call = new, params(a, b), preferred)`: `Self::new(a, b)`
///   is a constructor whose parameters bind the members `a` and `b`. May be
///   repeated; `preferred` picks one among several.
/// - `polymorphic`: this type is the root of a hierarchy.
/// - `variant(Type, "tag", ...)`: registers `Type` under each tag. Implies
///   `polymorphic`.
///
/// ## Field attributes
///
/// - `rename = "key"`, `required`, `read_only`, `ignore_null`.
/// - `ignore`: not a member.
/// - `default` / `default = path::to_fn`: value of a bound constructor
///   parameter when its key is absent.
/// - `discriminator`: the member whose tag selects the concrete type.
/// - `capture`: a `CaptureMap` field receiving unmatched keys.
/// - `parent`: the embedded parent record; its members are inherited.
///
/// ```rust, ignore
/// #[derive(Record)]
/// #[record(rename_all = "camelCase", constructor(call = new, params(user_id)))]
/// struct Profile {
///     user_id: u64,
///     #[record(required)]
///     display_name: String,
///     bio: TriState<String>,
///     #[record(capture)]
///     extra: CaptureMap,
/// }
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    impls::impl_record(&ast)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Implements `Tag` and `Wire` for a field-less enum, encoded as a string.
///
/// Variant names are converted by `#[record(rename_all = "...")]`, or set
/// one by one with `#[record(rename = "...")]`.
///
/// ```rust, ignore
/// #[derive(WireEnum)]
/// #[record(rename_all = "kebab-case")]
/// enum PartyType {
///     Person,       // "person"
///     Organization, // "organization"
///     #[record(rename = "org-unit")]
///     Unit,
/// }
/// ```
#[proc_macro_derive(WireEnum, attributes(record))]
pub fn derive_wire_enum(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    impls::impl_wire_enum(&ast)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
