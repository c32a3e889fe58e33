use syn::{Generics, parse_quote};

use crate::path;

/// Returns `generics` with every type parameter bounded by `Reflect + Typed`.
///
/// Lifetime parameters are rejected, reflected types are `'static`.
pub(crate) fn with_reflect_bounds(generics: &Generics, model: &syn::Path) -> syn::Result<Generics> {
    if let Some(lifetime) = generics.lifetimes().next() {
        return Err(syn::Error::new_spanned(
            lifetime,
            "#[derive(Reflect)] does not support lifetime parameters",
        ));
    }

    let reflect_ = path::reflect_(model);
    let typed_ = path::typed_(model);

    let mut generics = generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(#reflect_));
        param.bounds.push(parse_quote!(#typed_));
    }
    Ok(generics)
}

/// Whether the type needs one info per instantiation.
#[inline]
pub(crate) fn is_generic(generics: &Generics) -> bool {
    !generics.params.is_empty()
}

/// Adds `predicate` to the where clause of `generics`.
pub(crate) fn push_predicate(generics: &mut Generics, predicate: proc_macro2::TokenStream) {
    generics
        .make_where_clause()
        .predicates
        .push(parse_quote!(#predicate));
}

