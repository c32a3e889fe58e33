use alloc::boxed::Box;
use alloc::string::String;
use core::any::Any;
use core::error::Error;
use core::fmt;

use crate::Reflect;
use crate::info::Type;

/// Type-erased error returned by text parsers.
pub type ParseError = Box<dyn Error + Send + Sync>;

// -----------------------------------------------------------------------------
// ValueKind

/// How a simple value is represented on the wire.
///
/// Formats with typed scalars (JSON) write numbers and booleans unquoted;
/// textual formats ignore the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValueKind {
    #[default]
    String,
    Number,
    Boolean,
}

// -----------------------------------------------------------------------------
// Variants

/// A unit variant of an enum mapped as a simple value.
#[derive(Debug, Clone, Copy)]
pub struct VariantInfo {
    name: &'static str,
    rename: Option<&'static str>,
}

impl VariantInfo {
    /// Creates a variant with its declared name.
    #[inline]
    pub const fn new(name: &'static str) -> Self {
        Self { name, rename: None }
    }

    /// Sets the wire name override.
    #[inline]
    pub const fn with_rename(self, rename: &'static str) -> Self {
        Self {
            rename: Some(rename),
            ..self
        }
    }

    /// Returns the declared variant name.
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the wire name override, if any.
    #[inline(always)]
    pub const fn rename(&self) -> Option<&'static str> {
        self.rename
    }

    /// Returns the rename if present, otherwise the declared name.
    #[inline]
    pub const fn wire_name(&self) -> &'static str {
        match self.rename {
            Some(rename) => rename,
            None => self.name,
        }
    }
}

/// Variant table of a unit-only enum.
pub struct Variants {
    variants: Box<[VariantInfo]>,
    from_index: fn(usize) -> Option<Box<dyn Reflect>>,
    index_of: fn(&dyn Reflect) -> Option<usize>,
}

impl Variants {
    /// Creates a variant table.
    ///
    /// `from_index` builds the variant at a position of `variants`,
    /// `index_of` returns the position of a value's variant.
    pub fn new(
        variants: Box<[VariantInfo]>,
        from_index: fn(usize) -> Option<Box<dyn Reflect>>,
        index_of: fn(&dyn Reflect) -> Option<usize>,
    ) -> Self {
        Self {
            variants,
            from_index,
            index_of,
        }
    }

    /// Returns the variants in declaration order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &VariantInfo> {
        self.variants.iter()
    }

    /// Returns the variant at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&VariantInfo> {
        self.variants.get(index)
    }

    /// Returns the number of variants.
    #[inline]
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Creates the value of the variant at `index`.
    #[inline]
    pub fn create(&self, index: usize) -> Option<Box<dyn Reflect>> {
        (self.from_index)(index)
    }

    /// Returns the index of `value`'s variant.
    #[inline]
    pub fn index_of(&self, value: &dyn Reflect) -> Option<usize> {
        (self.index_of)(value)
    }
}

impl fmt::Debug for Variants {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.variants.iter()).finish()
    }
}

// -----------------------------------------------------------------------------
// SimpleInfo

/// Information of a simple type.
///
/// A simple value maps to a single wire string. The text form is provided by
/// the parser/formatter pair or, for unit enums, by the variant table.
pub struct SimpleInfo {
    ty: Type,
    value_kind: ValueKind,
    default: Option<fn() -> Box<dyn Reflect>>,
    parser: Option<fn(&str) -> Result<Box<dyn Reflect>, ParseError>>,
    formatter: Option<fn(&dyn Reflect) -> Option<String>>,
    variants: Option<Variants>,
}

impl SimpleInfo {
    /// Creates info without text functions.
    pub fn new<T: Any>(ident: &'static str, value_kind: ValueKind) -> Self {
        Self {
            ty: Type::of::<T>(ident),
            value_kind,
            default: None,
            parser: None,
            formatter: None,
            variants: None,
        }
    }

    /// Sets the zero-value constructor.
    pub fn with_default(self, default: fn() -> Box<dyn Reflect>) -> Self {
        Self {
            default: Some(default),
            ..self
        }
    }

    /// Sets the text parser.
    pub fn with_parser(self, parser: fn(&str) -> Result<Box<dyn Reflect>, ParseError>) -> Self {
        Self {
            parser: Some(parser),
            ..self
        }
    }

    /// Sets the text formatter.
    pub fn with_formatter(self, formatter: fn(&dyn Reflect) -> Option<String>) -> Self {
        Self {
            formatter: Some(formatter),
            ..self
        }
    }

    /// Sets the variant table of a unit enum.
    pub fn with_variants(self, variants: Variants) -> Self {
        Self {
            variants: Some(variants),
            ..self
        }
    }

    /// Returns the [`Type`].
    #[inline(always)]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns the wire value kind.
    #[inline(always)]
    pub fn value_kind(&self) -> ValueKind {
        self.value_kind
    }

    /// Creates the zero value, if the type has one.
    #[inline]
    pub fn zero_value(&self) -> Option<Box<dyn Reflect>> {
        self.default.map(|f| f())
    }

    /// Returns `true` if the type has a zero value.
    #[inline]
    pub fn has_zero_value(&self) -> bool {
        self.default.is_some()
    }

    /// Parses `text` with the type's own parser.
    ///
    /// Returns `None` if the type has no parser.
    #[inline]
    pub fn parse(&self, text: &str) -> Option<Result<Box<dyn Reflect>, ParseError>> {
        self.parser.map(|f| f(text))
    }

    /// Formats `value` with the type's own formatter.
    ///
    /// Returns `None` if the type has no formatter or `value` is another type.
    #[inline]
    pub fn format(&self, value: &dyn Reflect) -> Option<String> {
        self.formatter.and_then(|f| f(value))
    }

    /// Returns the variant table of a unit enum.
    #[inline]
    pub fn variants(&self) -> Option<&Variants> {
        self.variants.as_ref()
    }
}

impl fmt::Debug for SimpleInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleInfo")
            .field("ty", &self.ty)
            .field("value_kind", &self.value_kind)
            .field("variants", &self.variants)
            .finish_non_exhaustive()
    }
}
