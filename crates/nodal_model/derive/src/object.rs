use proc_macro2::TokenStream;
use quote::quote;
use syn::{DataStruct, DeriveInput, Fields, spanned::Spanned};

use crate::attributes::{FieldAttributes, TypeAttributes};
use crate::{generics, path};

// -----------------------------------------------------------------------------
// Field analysis

struct Member<'a> {
    ident: &'a syn::Ident,
    ty: &'a syn::Type,
    attrs: FieldAttributes,
}

enum Content<'a> {
    None,
    Items(&'a syn::Ident, &'a syn::Type),
    Entries(&'a syn::Ident, &'a syn::Type),
}

fn analyze<'a>(data: &'a DataStruct) -> syn::Result<(Vec<Member<'a>>, Content<'a>)> {
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new(
            data.fields.span(),
            "#[derive(Reflect)] supports structs with named fields only",
        ));
    };

    let mut members = Vec::new();
    let mut content = Content::None;

    for field in &fields.named {
        let attrs = FieldAttributes::parse(field)?;
        // Named fields always carry an ident.
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };

        if attrs.items || attrs.entries {
            if !matches!(content, Content::None) {
                return Err(syn::Error::new(
                    field.span(),
                    "only one field can be marked `items` or `entries`",
                ));
            }
            content = if attrs.items {
                Content::Items(ident, &field.ty)
            } else {
                Content::Entries(ident, &field.ty)
            };
            continue;
        }

        if attrs.is_member() {
            members.push(Member {
                ident,
                ty: &field.ty,
                attrs,
            });
        }
    }

    Ok((members, content))
}

// -----------------------------------------------------------------------------
// impl_object

pub(crate) fn impl_object(ast: &DeriveInput, data: &DataStruct) -> syn::Result<TokenStream> {
    let model = path::nodal_model();
    let type_attrs = TypeAttributes::parse(&ast.attrs)?;
    let (members, content) = analyze(data)?;

    if !matches!(content, Content::None) && !type_attrs.default {
        return Err(syn::Error::new_spanned(
            &ast.ident,
            "a type with an `items` or `entries` field requires #[reflect(default)]",
        ));
    }

    let reflect_ = path::reflect_(&model);
    let typed_ = path::typed_(&model);
    let type_info_ = path::type_info_(&model);
    let info_ = path::info_(&model);
    let ops_ = path::ops_(&model);
    let impls_ = path::impls_(&model);

    let ident = &ast.ident;
    let ident_str = ident.to_string();

    let mut bounded = generics::with_reflect_bounds(&ast.generics, &model)?;
    {
        let (_, ty_generics, _) = ast.generics.split_for_impl();
        if type_attrs.default {
            generics::push_predicate(
                &mut bounded,
                quote! { #ident #ty_generics: ::core::default::Default },
            );
        }
        if let Some(parent) = &type_attrs.parent {
            generics::push_predicate(
                &mut bounded,
                quote! { #ident #ty_generics: #model::FromParent<#parent> },
            );
        }
    }
    let (impl_generics, ty_generics, where_clause) = bounded.split_for_impl();

    // ---------------------------------------------------------------------
    // Typed

    let member_infos = members.iter().map(|member| {
        let name = member.ident.to_string();
        let ty = member.ty;
        let mut tokens = quote! { #info_::MemberInfo::new::<#ty>(#name) };
        if let Some(rename) = &member.attrs.rename {
            tokens.extend(quote! { .with_rename(#rename) });
        }
        if member.attrs.read_only {
            tokens.extend(quote! { .read_only() });
        }
        if member.attrs.write_only {
            tokens.extend(quote! { .write_only() });
        }
        if member.attrs.ignore {
            tokens.extend(quote! { .ignored() });
        }
        tokens
    });

    let mut constructors = quote! { #info_::Constructors::none() };
    if type_attrs.default {
        constructors.extend(quote! { .with_default(#impls_::default_of::<Self>) });
    }
    if let Some(parent) = &type_attrs.parent {
        constructors.extend(quote! {
            .with_parent(#info_::ParentConstructor::new::<#parent>(
                #impls_::from_parent_of::<Self, #parent>
            ))
        });
    }

    let rename = type_attrs
        .rename
        .as_ref()
        .map(|rename| quote! { .with_rename(#rename) });

    let object_info = quote! {
        #info_::ObjectInfo::new::<Self>(#ident_str, &[#(#member_infos),*])
            #rename
            .with_constructors(#constructors)
    };

    let type_info = match &content {
        Content::None => quote! { #type_info_::Object(#object_info) },
        Content::Items(_, field_ty) => quote! {
            #type_info_::List(
                #info_::ListInfo::new::<Self, <#field_ty as #info_::TypedList>::Item>(
                    #ident_str,
                    #impls_::default_of::<Self>,
                )
                .with_object(#object_info)
            )
        },
        Content::Entries(_, field_ty) => quote! {
            #type_info_::Dictionary(
                #info_::DictionaryInfo::new::<
                    Self,
                    <#field_ty as #info_::TypedDictionary>::Key,
                    <#field_ty as #info_::TypedDictionary>::Value,
                >(
                    #ident_str,
                    #impls_::default_of::<Self>,
                )
                .with_object(#object_info)
            )
        },
    };

    let cell = path::info_cell(&model, generics::is_generic(&ast.generics), type_info);

    let typed_impl = quote! {
        impl #impl_generics #typed_ for #ident #ty_generics #where_clause {
            fn type_info() -> &'static #type_info_ {
                #cell
            }
        }
    };

    // ---------------------------------------------------------------------
    // Reflect

    let (ref_shape, mut_shape, object_access) = match &content {
        Content::None => (
            quote! { #ops_::ReflectRef::Object(self) },
            quote! { #ops_::ReflectMut::Object(self) },
            quote! {},
        ),
        Content::Items(..) => (
            quote! { #ops_::ReflectRef::List(self) },
            quote! { #ops_::ReflectMut::List(self) },
            object_accessors(&ops_),
        ),
        Content::Entries(..) => (
            quote! { #ops_::ReflectRef::Dictionary(self) },
            quote! { #ops_::ReflectMut::Dictionary(self) },
            object_accessors(&ops_),
        ),
    };

    let reflect_impl = quote! {
        impl #impl_generics #reflect_ for #ident #ty_generics #where_clause {
            fn set(
                &mut self,
                value: ::std::boxed::Box<dyn #reflect_>,
            ) -> ::core::result::Result<(), ::std::boxed::Box<dyn #reflect_>> {
                *self = value.take::<Self>()?;
                ::core::result::Result::Ok(())
            }

            #[inline]
            fn reflect_ref(&self) -> #ops_::ReflectRef<'_> {
                #ref_shape
            }

            #[inline]
            fn reflect_mut(&mut self) -> #ops_::ReflectMut<'_> {
                #mut_shape
            }

            #object_access
        }
    };

    // ---------------------------------------------------------------------
    // Object

    let names: Vec<String> = members.iter().map(|m| m.ident.to_string()).collect();
    let fields: Vec<&syn::Ident> = members.iter().map(|m| m.ident).collect();

    let object_impl = quote! {
        impl #impl_generics #ops_::Object for #ident #ty_generics #where_clause {
            fn member(&self, name: &str) -> ::core::option::Option<&dyn #reflect_> {
                match name {
                    #(#names => ::core::option::Option::Some(&self.#fields as &dyn #reflect_),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn member_mut(&mut self, name: &str) -> ::core::option::Option<&mut dyn #reflect_> {
                match name {
                    #(#names => ::core::option::Option::Some(&mut self.#fields as &mut dyn #reflect_),)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    };

    // ---------------------------------------------------------------------
    // Content

    let content_impl = match &content {
        Content::None => quote! {},
        Content::Items(field, _) => quote! {
            impl #impl_generics #ops_::List for #ident #ty_generics #where_clause {
                #[inline]
                fn len(&self) -> usize {
                    #ops_::List::len(&self.#field)
                }

                #[inline]
                fn get(&self, index: usize) -> ::core::option::Option<&dyn #reflect_> {
                    #ops_::List::get(&self.#field, index)
                }

                #[inline]
                fn push(
                    &mut self,
                    value: ::std::boxed::Box<dyn #reflect_>,
                ) -> ::core::result::Result<(), ::std::boxed::Box<dyn #reflect_>> {
                    #ops_::List::push(&mut self.#field, value)
                }
            }
        },
        Content::Entries(field, _) => quote! {
            impl #impl_generics #ops_::Dictionary for #ident #ty_generics #where_clause {
                #[inline]
                fn len(&self) -> usize {
                    #ops_::Dictionary::len(&self.#field)
                }

                #[inline]
                fn iter(&self) -> #ops_::DictionaryIter<'_> {
                    #ops_::Dictionary::iter(&self.#field)
                }

                #[inline]
                fn insert(
                    &mut self,
                    key: ::std::boxed::Box<dyn #reflect_>,
                    value: ::std::boxed::Box<dyn #reflect_>,
                ) -> ::core::result::Result<(), ::std::boxed::Box<dyn #reflect_>> {
                    #ops_::Dictionary::insert(&mut self.#field, key, value)
                }
            }
        },
    };

    Ok(quote! {
        #typed_impl
        #reflect_impl
        #object_impl
        #content_impl
    })
}

/// Member access of a collection shaped type.
fn object_accessors(ops_: &TokenStream) -> TokenStream {
    quote! {
        #[inline]
        fn as_object(&self) -> ::core::option::Option<&dyn #ops_::Object> {
            ::core::option::Option::Some(self)
        }

        #[inline]
        fn as_object_mut(&mut self) -> ::core::option::Option<&mut dyn #ops_::Object> {
            ::core::option::Option::Some(self)
        }
    }
}
