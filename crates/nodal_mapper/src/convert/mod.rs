//! Value conversion between raw wire text and simple values.
//!
//! Lookup order for a type `T` in format `F`:
//!
//! 1. a reader/writer registered for `T` in `F`;
//! 2. a reader/writer registered for `T` in every format;
//! 3. the built-in table (`Vec<u8>` as base64, `bool`);
//! 4. the parser/formatter of `T`'s [`SimpleInfo`];
//! 5. the variant table of a unit enum, through the enum naming chain.
//!
//! Anything else is not a simple value.

use alloc::sync::Arc;
use core::any::TypeId;
use core::fmt;

use nodal_model::Reflect;
use nodal_model::cache::{CachedMember, CachedType};
use nodal_model::info::{ParseError, SimpleInfo, ValueKind, Variants};
use nodal_utils::hash::HashMap;
use thiserror::Error;

use crate::error::{MappingError, Result};
use crate::naming::EnumValueNameContext;
use crate::node::{Format, NodePath};
use crate::options::Options;

// -----------------------------------------------------------------------------
// Modules

mod builtin;

// -----------------------------------------------------------------------------
// ValueContext

/// Where a value is being converted.
#[derive(Clone, Copy)]
pub struct ValueContext<'a> {
    pub(crate) format: Format,
    pub(crate) ty: &'a Arc<CachedType>,
    pub(crate) member: Option<&'a CachedMember>,
    pub(crate) path: &'a NodePath,
}

impl<'a> ValueContext<'a> {
    #[inline]
    pub fn format(&self) -> Format {
        self.format
    }

    /// The type being converted.
    #[inline]
    pub fn ty(&self) -> &'a Arc<CachedType> {
        self.ty
    }

    /// The member holding the value, `None` for list items at the root.
    #[inline]
    pub fn member(&self) -> Option<&'a CachedMember> {
        self.member
    }

    #[inline]
    pub fn path(&self) -> &'a NodePath {
        self.path
    }
}

impl fmt::Debug for ValueContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueContext")
            .field("format", &self.format)
            .field("type", self.ty.ty())
            .field("member", &self.member)
            .field("path", &self.path.render(self.format))
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Converters

/// A type-erased reader: raw text to a value of the registered type.
pub type Reader = Arc<dyn Fn(&str, &ValueContext<'_>) -> Result<Box<dyn Reflect>, ParseError> + Send + Sync>;

/// A type-erased writer: a value of the registered type to raw text,
/// `None` writes null.
pub type Writer = Arc<dyn Fn(&dyn Reflect, &ValueContext<'_>) -> Option<String> + Send + Sync>;

type Key = (TypeId, Option<Format>);

/// User registered readers and writers, keyed by exact type and
/// optionally by format.
#[derive(Clone, Default)]
pub struct Converters {
    readers: HashMap<Key, Reader>,
    writers: HashMap<Key, Writer>,
}

impl Converters {
    pub(crate) fn insert_reader(&mut self, ty: TypeId, format: Option<Format>, reader: Reader) {
        self.readers.insert((ty, format), reader);
    }

    pub(crate) fn insert_writer(&mut self, ty: TypeId, format: Option<Format>, writer: Writer) {
        self.writers.insert((ty, format), writer);
    }

    /// Returns the user reader of `ty` in `format`.
    pub fn reader(&self, ty: TypeId, format: Format) -> Option<&Reader> {
        self.readers
            .get(&(ty, Some(format)))
            .or_else(|| self.readers.get(&(ty, None)))
    }

    /// Returns the user writer of `ty` in `format`.
    pub fn writer(&self, ty: TypeId, format: Format) -> Option<&Writer> {
        self.writers
            .get(&(ty, Some(format)))
            .or_else(|| self.writers.get(&(ty, None)))
    }

    /// Whether `ty` is read as a simple value regardless of its shape.
    pub fn reads_as_simple(&self, ty: TypeId, format: Format) -> bool {
        self.reader(ty, format).is_some() || builtin::handles(ty)
    }

    /// Whether `ty` is written as a simple value regardless of its shape.
    pub fn writes_as_simple(&self, ty: TypeId, format: Format) -> bool {
        self.writer(ty, format).is_some() || builtin::handles(ty)
    }
}

impl fmt::Debug for Converters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converters")
            .field("readers", &self.readers.len())
            .field("writers", &self.writers.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Pipeline

#[derive(Debug, Error)]
#[error("`{value}` is not a variant of `{ty}`")]
struct UnknownVariant {
    value: String,
    ty: &'static str,
}

/// Reads `text` as a value of `cx.ty`.
pub(crate) fn read_value(options: &Options, text: &str, cx: &ValueContext<'_>) -> Result<Box<dyn Reflect>> {
    let ty = cx.ty;
    let type_id = ty.type_id();

    let parsed = if let Some(reader) = options.converters().reader(type_id, cx.format) {
        reader(text, cx)
    } else if let Some(result) = builtin::read(type_id, text) {
        result
    } else if let Some(simple) = ty.simple() {
        match simple.parse(text) {
            Some(result) => result,
            None => match simple.variants() {
                Some(variants) => read_variant(options, variants, text, cx),
                None => return Err(not_convertible(ty)),
            },
        }
    } else {
        return Err(not_convertible(ty));
    };

    parsed.map_err(|source| {
        MappingError::value_parse(
            text,
            ty.type_path(),
            options.friendly_parse_message(type_id),
            source,
        )
    })
}

/// Writes `value` of type `cx.ty` as raw text, `None` is null.
pub(crate) fn write_value(
    options: &Options,
    value: &dyn Reflect,
    cx: &ValueContext<'_>,
) -> Result<(Option<String>, ValueKind)> {
    let ty = cx.ty;

    if let Some(writer) = options.converters().writer(ty.type_id(), cx.format) {
        return Ok((writer(value, cx), ValueKind::String));
    }
    if let Some((text, kind)) = builtin::write(value) {
        return Ok((Some(text), kind));
    }
    let Some(simple) = ty.simple() else {
        return Err(not_convertible(ty));
    };
    if let Some(text) = simple.format(value) {
        return Ok((Some(text), simple.value_kind()));
    }
    match simple.variants() {
        Some(variants) => write_variant(options, simple, variants, value, cx),
        None => Err(not_convertible(ty)),
    }
}

fn not_convertible(ty: &CachedType) -> MappingError {
    MappingError::type_not_supported(ty.type_path(), "no reader, writer or text form")
}

fn variant_name(options: &Options, index: usize, variants: &'static Variants, cx: &ValueContext<'_>) -> Option<String> {
    let variant = variants.get(index)?;
    let context = EnumValueNameContext {
        ty: cx.ty.clone(),
        variant,
        format: cx.format,
    };
    Some(options.enum_naming().resolve(variant.wire_name(), &context))
}

fn read_variant(
    options: &Options,
    variants: &'static Variants,
    text: &str,
    cx: &ValueContext<'_>,
) -> Result<Box<dyn Reflect>, ParseError> {
    for index in 0..variants.len() {
        if let Some(name) = variant_name(options, index, variants, cx)
            && options.names_match(&name, text)
            && let Some(value) = variants.create(index)
        {
            return Ok(value);
        }
    }
    // Declaration index as a fallback.
    if let Ok(index) = text.parse::<usize>()
        && let Some(value) = variants.create(index)
    {
        return Ok(value);
    }
    Err(UnknownVariant {
        value: String::from(text),
        ty: cx.ty.type_path(),
    }
    .into())
}

fn write_variant(
    options: &Options,
    simple: &SimpleInfo,
    variants: &'static Variants,
    value: &dyn Reflect,
    cx: &ValueContext<'_>,
) -> Result<(Option<String>, ValueKind)> {
    variants
        .index_of(value)
        .and_then(|index| variant_name(options, index, variants, cx))
        .map(|name| (Some(name), simple.value_kind()))
        .ok_or_else(|| MappingError::type_not_supported(cx.ty.type_path(), "value is not a declared variant"))
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;

    use nodal_model::Reflect;
    use nodal_model::cache::{CachedType, TypeCache};
    use nodal_model::info::{Typed, ValueKind};

    use super::{ValueContext, read_value, write_value};
    use crate::error::ErrorKind;
    use crate::naming::Case;
    use crate::node::{Format, NodePath};
    use crate::options::Options;

    #[derive(Reflect, Debug, PartialEq)]
    enum Level {
        Low,
        #[reflect(rename = "HIGH")]
        High,
    }

    fn cached<T: Typed>() -> Arc<CachedType> {
        TypeCache::new().of::<T>()
    }

    fn read<T: Typed>(options: &Options, format: Format, text: &str) -> crate::Result<Box<dyn Reflect>> {
        let ty = cached::<T>();
        let path = NodePath::new("Root");
        let cx = ValueContext {
            format,
            ty: &ty,
            member: None,
            path: &path,
        };
        read_value(options, text, &cx)
    }

    fn write<T: Typed + Reflect>(options: &Options, value: &T) -> (Option<String>, ValueKind) {
        let ty = cached::<T>();
        let path = NodePath::new("Root");
        let cx = ValueContext {
            format: Format::Json,
            ty: &ty,
            member: None,
            path: &path,
        };
        write_value(options, value, &cx).unwrap()
    }

    #[test]
    fn own_text_form() {
        let options = Options::default();
        let value = read::<i64>(&options, Format::Json, "-42").unwrap();
        assert_eq!(value.take::<i64>().unwrap(), -42);

        assert_eq!(write(&options, &7_u16), (Some("7".into()), ValueKind::Number));
        assert_eq!(write(&options, &String::from("x")), (Some("x".into()), ValueKind::String));
    }

    #[test]
    fn format_specific_reader_wins() {
        let options = Options::builder()
            .with_reader(|text: &str, _: &ValueContext<'_>| text.parse::<u8>().map(|n| n + 1))
            .with_reader_in(Format::Xml, |text: &str, _: &ValueContext<'_>| {
                text.parse::<u8>().map(|n| n + 100)
            })
            .build();

        let json = read::<u8>(&options, Format::Json, "1").unwrap();
        let xml = read::<u8>(&options, Format::Xml, "1").unwrap();
        assert_eq!(*json.downcast_ref::<u8>().unwrap(), 2);
        assert_eq!(*xml.downcast_ref::<u8>().unwrap(), 101);
    }

    #[test]
    fn builtin_table() {
        let options = Options::default();
        let flag = read::<bool>(&options, Format::Form, "TRUE").unwrap();
        assert!(flag.take::<bool>().unwrap());

        let bytes = read::<Vec<u8>>(&options, Format::Json, "aGFp").unwrap();
        assert_eq!(bytes.take::<Vec<u8>>().unwrap(), b"hai");
        assert_eq!(write(&options, &vec![1_u8, 2]), (Some("AQI=".into()), ValueKind::String));
    }

    #[test]
    fn parse_failure_carries_friendly_message() {
        let options = Options::builder()
            .friendly_parse_message::<u8>("'{value}' is not a small number.")
            .build();

        let err = read::<u8>(&options, Format::Json, "300").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueParse);
        assert_eq!(err.friendly_message(), "'300' is not a small number.");
        assert!(err.message().contains("u8"));
    }

    #[test]
    fn enum_values_use_the_naming_chain() {
        let plain = Options::default();
        let value = read::<Level>(&plain, Format::Json, "HIGH").unwrap();
        assert_eq!(value.take::<Level>().unwrap(), Level::High);
        assert_eq!(write(&plain, &Level::Low), (Some("Low".into()), ValueKind::String));

        let lower = Options::builder().enum_value_case(Case::Lower).build();
        assert_eq!(write(&lower, &Level::High), (Some("high".into()), ValueKind::String));
        let value = read::<Level>(&lower, Format::Json, "low").unwrap();
        assert_eq!(value.take::<Level>().unwrap(), Level::Low);

        // Declaration index as a fallback.
        let value = read::<Level>(&plain, Format::Json, "1").unwrap();
        assert_eq!(value.take::<Level>().unwrap(), Level::High);

        let err = read::<Level>(&plain, Format::Json, "Medium").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueParse);
    }

    #[test]
    fn user_writer_produces_strings() {
        let options = Options::builder()
            .with_writer(|value: &u32, _: &ValueContext<'_>| format!("#{value}"))
            .build();
        assert_eq!(write(&options, &5_u32), (Some("#5".into()), ValueKind::String));
    }

    #[test]
    fn objects_are_not_convertible() {
        let options = Options::default();
        let err = read::<Vec<String>>(&options, Format::Json, "a").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeNotSupported);
    }
}
