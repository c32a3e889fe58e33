//! Parsing of `#[reflect(...)]` attributes.

use syn::{Attribute, LitStr, meta::ParseNestedMeta, spanned::Spanned};

use crate::REFLECT_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// Helpers

fn for_each_reflect_attr(
    attrs: &[Attribute],
    mut f: impl FnMut(ParseNestedMeta) -> syn::Result<()>,
) -> syn::Result<()> {
    for attr in attrs {
        if attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
            attr.parse_nested_meta(&mut f)?;
        }
    }
    Ok(())
}

fn parse_rename(meta: &ParseNestedMeta, slot: &mut Option<LitStr>) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error("duplicate `rename`"));
    }
    let lit: LitStr = meta.value()?.parse()?;
    if lit.value().is_empty() {
        return Err(syn::Error::new(lit.span(), "`rename` cannot be empty"));
    }
    *slot = Some(lit);
    Ok(())
}

fn set_flag(meta: &ParseNestedMeta, flag: &mut bool, name: &str) -> syn::Result<()> {
    if *flag {
        return Err(meta.error(format!("duplicate `{name}`")));
    }
    *flag = true;
    Ok(())
}

// -----------------------------------------------------------------------------
// TypeAttributes

/// `#[reflect(...)]` on a struct or enum.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    pub rename: Option<LitStr>,
    pub default: bool,
    pub parent: Option<syn::Type>,
}

impl TypeAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for_each_reflect_attr(attrs, |meta| {
            if meta.path.is_ident("rename") {
                parse_rename(&meta, &mut this.rename)
            } else if meta.path.is_ident("default") {
                set_flag(&meta, &mut this.default, "default")
            } else if meta.path.is_ident("parent") {
                if this.parent.is_some() {
                    return Err(meta.error("duplicate `parent`"));
                }
                this.parent = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("unknown type attribute, expected `rename`, `default` or `parent`"))
            }
        })?;
        Ok(this)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// `#[reflect(...)]` on a named field.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    pub rename: Option<LitStr>,
    pub ignore: bool,
    pub skip: bool,
    pub read_only: bool,
    pub write_only: bool,
    pub items: bool,
    pub entries: bool,
}

impl FieldAttributes {
    pub fn parse(field: &syn::Field) -> syn::Result<Self> {
        let mut this = Self::default();
        for_each_reflect_attr(&field.attrs, |meta| {
            let path = &meta.path;
            if path.is_ident("rename") {
                parse_rename(&meta, &mut this.rename)
            } else if path.is_ident("ignore") {
                set_flag(&meta, &mut this.ignore, "ignore")
            } else if path.is_ident("skip") {
                set_flag(&meta, &mut this.skip, "skip")
            } else if path.is_ident("read_only") {
                set_flag(&meta, &mut this.read_only, "read_only")
            } else if path.is_ident("write_only") {
                set_flag(&meta, &mut this.write_only, "write_only")
            } else if path.is_ident("items") {
                set_flag(&meta, &mut this.items, "items")
            } else if path.is_ident("entries") {
                set_flag(&meta, &mut this.entries, "entries")
            } else {
                Err(meta.error("unknown field attribute"))
            }
        })?;
        this.validate(field)?;
        Ok(this)
    }

    fn validate(&self, field: &syn::Field) -> syn::Result<()> {
        let conflict = |msg: &str| Err(syn::Error::new(field.span(), msg));
        if self.read_only && self.write_only {
            return conflict("`read_only` and `write_only` are exclusive");
        }
        if self.items && self.entries {
            return conflict("`items` and `entries` are exclusive");
        }
        if self.skip && (self.rename.is_some() || self.ignore || self.read_only || self.write_only) {
            return conflict("a `skip` field takes no other attribute");
        }
        if (self.items || self.entries) && (self.skip || self.ignore || self.rename.is_some()) {
            return conflict("a content field cannot be skipped, ignored or renamed");
        }
        Ok(())
    }

    /// Content fields and skipped fields are not members.
    #[inline]
    pub fn is_member(&self) -> bool {
        !(self.skip || self.items || self.entries)
    }
}

// -----------------------------------------------------------------------------
// VariantAttributes

/// `#[reflect(...)]` on an enum variant.
#[derive(Default)]
pub(crate) struct VariantAttributes {
    pub rename: Option<LitStr>,
}

impl VariantAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for_each_reflect_attr(attrs, |meta| {
            if meta.path.is_ident("rename") {
                parse_rename(&meta, &mut this.rename)
            } else {
                Err(meta.error("unknown variant attribute, expected `rename`"))
            }
        })?;
        Ok(this)
    }
}

