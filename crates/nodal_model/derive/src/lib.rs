//! Derive macro of `nodal_model`, see [`Reflect`].
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{Data, DeriveInput, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod generics;
mod object;
mod path;
mod unit_enum;

// -----------------------------------------------------------------------------
// Macros

/// # Derive `Reflect`
///
/// Implements `Typed` and `Reflect`, plus the shape traits matching the type:
///
/// - structs with named fields become objects (`Object`),
///   or lists/dictionaries with members when a field is marked `items`/`entries`;
/// - enums with unit variants only become simple values mapped by variant name.
///
/// Generic type parameters are bounded by `Reflect + Typed`.
///
/// ## Type attributes
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// #[reflect(rename = "person", default, parent = Team)]
/// struct Person { /* ... */ }
/// ```
///
/// - `rename = "..."`: wire name of the type (root element names, array item names).
/// - `default`: parameterless construction through `Default`.
/// - `parent = Type`: construction through `FromParent<Type>` when the enclosing
///   object is a `Type`.
///
/// A struct without any construction attribute cannot be deserialized
/// unless the mapper options register a factory for it.
///
/// ## Field attributes
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// #[reflect(default)]
/// struct Account {
///     #[reflect(rename = "id")]
///     account_id: u64,
///     #[reflect(read_only)]
///     balance: i64,
///     #[reflect(write_only)]
///     password: String,
///     #[reflect(ignore)]
///     cached_total: i64,
///     #[reflect(skip)]
///     session: Option<std::sync::Arc<()>>,
/// }
/// ```
///
/// - `rename = "..."`: wire name of the member.
/// - `read_only`: serialized but never deserialized.
/// - `write_only`: deserialized but never serialized.
/// - `ignore`: listed as a member, skipped by the mapper.
/// - `skip`: not a member at all, the field type needs no `Reflect`.
/// - `items`: the field (a `TypedList`) is the type's list content; requires `default`.
/// - `entries`: the field (a `TypedDictionary`) is the type's dictionary content;
///   requires `default`.
///
/// ## Enums
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// enum Level {
///     Low,
///     #[reflect(rename = "mid")]
///     Medium,
///     High,
/// }
/// ```
///
/// The first variant is the zero value.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let result = match &ast.data {
        Data::Struct(data) => object::impl_object(&ast, data),
        Data::Enum(data) => unit_enum::impl_unit_enum(&ast, data),
        Data::Union(_) => Err(syn::Error::new_spanned(
            &ast.ident,
            "#[derive(Reflect)] does not support unions",
        )),
    };

    match result {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}
