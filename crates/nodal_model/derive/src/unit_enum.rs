use proc_macro2::TokenStream;
use quote::quote;
use syn::{DataEnum, DeriveInput, Fields};

use crate::attributes::{TypeAttributes, VariantAttributes};
use crate::path;

/// Unit-only enums reflect as simple values named after their variants.
pub(crate) fn impl_unit_enum(ast: &DeriveInput, data: &DataEnum) -> syn::Result<TokenStream> {
    if !ast.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &ast.generics,
            "#[derive(Reflect)] does not support generic enums",
        ));
    }
    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            &ast.ident,
            "#[derive(Reflect)] requires at least one variant",
        ));
    }

    let type_attrs = TypeAttributes::parse(&ast.attrs)?;
    if type_attrs.rename.is_some() || type_attrs.parent.is_some() || type_attrs.default {
        return Err(syn::Error::new_spanned(
            &ast.ident,
            "enums take no type attribute, the first variant is the default",
        ));
    }

    let mut variant_infos = Vec::with_capacity(data.variants.len());
    let mut variant_idents = Vec::with_capacity(data.variants.len());
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "#[derive(Reflect)] supports enums with unit variants only",
            ));
        }
        let attrs = VariantAttributes::parse(&variant.attrs)?;
        let name = variant.ident.to_string();
        let rename = attrs.rename.map(|rename| quote! { .with_rename(#rename) });
        variant_infos.push(quote! { VariantInfo::new(#name) #rename });
        variant_idents.push(&variant.ident);
    }

    let model = path::nodal_model();
    let reflect_ = path::reflect_(&model);
    let typed_ = path::typed_(&model);
    let type_info_ = path::type_info_(&model);
    let info_ = path::info_(&model);
    let ops_ = path::ops_(&model);

    let ident = &ast.ident;
    let ident_str = ident.to_string();
    let indices = 0..variant_idents.len();
    let indices_back = 0..variant_idents.len();
    let first = variant_idents[0];

    let info = quote! {
        use #info_::{SimpleInfo, ValueKind, VariantInfo, Variants};

        let variants = Variants::new(
            ::std::boxed::Box::new([#(#variant_infos),*]),
            |index: usize| -> ::core::option::Option<::std::boxed::Box<dyn #reflect_>> {
                match index {
                    #(#indices => ::core::option::Option::Some(::std::boxed::Box::new(Self::#variant_idents)),)*
                    _ => ::core::option::Option::None,
                }
            },
            |value: &dyn #reflect_| -> ::core::option::Option<usize> {
                match value.downcast_ref::<Self>()? {
                    #(Self::#variant_idents => ::core::option::Option::Some(#indices_back),)*
                }
            },
        );

        #type_info_::Simple(
            SimpleInfo::new::<Self>(#ident_str, ValueKind::String)
                .with_default(|| -> ::std::boxed::Box<dyn #reflect_> {
                    ::std::boxed::Box::new(Self::#first)
                })
                .with_variants(variants),
        )
    };

    let cell = path::info_cell(&model, false, info);

    Ok(quote! {
        impl #typed_ for #ident {
            fn type_info() -> &'static #type_info_ {
                #cell
            }
        }

        impl #reflect_ for #ident {
            fn set(
                &mut self,
                value: ::std::boxed::Box<dyn #reflect_>,
            ) -> ::core::result::Result<(), ::std::boxed::Box<dyn #reflect_>> {
                *self = value.take::<Self>()?;
                ::core::result::Result::Ok(())
            }

            #[inline]
            fn reflect_ref(&self) -> #ops_::ReflectRef<'_> {
                #ops_::ReflectRef::Simple(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> #ops_::ReflectMut<'_> {
                #ops_::ReflectMut::Simple(self)
            }
        }
    })
}
