//! Paths into `nodal_model` used by the generated code.

use proc_macro2::TokenStream;
use quote::quote;

/// Access path of the `nodal_model` crate from the caller.
///
/// Resolved from the caller's `Cargo.toml`: `::nodal_model` for direct
/// dependents, `::nodal::model` for dependents of the facade crate.
/// Reading the manifest is not cheap, fetch it once per derive.
pub(crate) fn nodal_model() -> syn::Path {
    nodal_macro_utils::Manifest::crate_path("nodal_model")
}

#[inline(always)]
pub(crate) fn reflect_(model: &syn::Path) -> TokenStream {
    quote! { #model::Reflect }
}

#[inline(always)]
pub(crate) fn typed_(model: &syn::Path) -> TokenStream {
    quote! { #model::info::Typed }
}

#[inline(always)]
pub(crate) fn type_info_(model: &syn::Path) -> TokenStream {
    quote! { #model::info::TypeInfo }
}

#[inline(always)]
pub(crate) fn info_(model: &syn::Path) -> TokenStream {
    quote! { #model::info }
}

#[inline(always)]
pub(crate) fn ops_(model: &syn::Path) -> TokenStream {
    quote! { #model::ops }
}

#[inline(always)]
pub(crate) fn impls_(model: &syn::Path) -> TokenStream {
    quote! { #model::impls }
}

/// The info cell expression body for a `Typed` implementation.
pub(crate) fn info_cell(model: &syn::Path, generic: bool, info: TokenStream) -> TokenStream {
    let impls_ = impls_(model);
    if generic {
        quote! {
            static CELL: #impls_::GenericTypeInfoCell = #impls_::GenericTypeInfoCell::new();
            CELL.get_or_insert::<Self>(|| { #info })
        }
    } else {
        quote! {
            static CELL: #impls_::NonGenericTypeInfoCell = #impls_::NonGenericTypeInfoCell::new();
            CELL.get_or_init(|| { #info })
        }
    }
}
