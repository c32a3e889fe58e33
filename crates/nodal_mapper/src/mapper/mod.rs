//! The node mapper.
//!
//! A mapping call walks a value and a node tree in parallel. Every frame
//! classifies the current type (simple, optional, object, array or
//! dictionary), applies naming, filters and visitors, delegates leaf values
//! to the [conversion pipeline](crate::convert) and recurses into children.
//!
//! The mapper holds no state besides its [`TypeCache`]; calls are
//! independent and may run concurrently.

use alloc::sync::Arc;

use nodal_model::Reflect;
use nodal_model::cache::{CachedType, TypeCache};
use nodal_model::info::{TypeInfo, Typed};

use crate::error::{MappingError, Result};
use crate::node::{Format, Node, NodePath};
use crate::options::{Mode, Options};

// -----------------------------------------------------------------------------
// Modules

mod context;
mod de;
mod ser;

use context::{Context, Frame, present};

// -----------------------------------------------------------------------------
// Mapper

/// Maps reflected values to format node trees and back.
///
/// # Example
///
/// ```
/// use nodal_mapper::{Format, Mapper, Options};
/// use nodal_model::Reflect;
///
/// #[derive(Reflect, Default, Debug, PartialEq)]
/// #[reflect(default)]
/// struct Tag {
///     name: String,
///     weight: Option<u8>,
/// }
///
/// let mapper = Mapper::new();
/// let options = Options::default();
///
/// let tag = Tag { name: "rust".into(), weight: None };
/// let node = mapper.serialize(&tag, Format::Json, &options).unwrap();
/// assert_eq!(node.name(), "Tag");
///
/// let back: Tag = mapper.deserialize(&*node, &options).unwrap();
/// assert_eq!(back, tag);
/// ```
#[derive(Debug, Clone)]
pub struct Mapper {
    cache: Arc<TypeCache>,
}

impl Default for Mapper {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Mapper {
    /// Creates a mapper sharing the process-wide [`TypeCache::global`].
    #[inline]
    pub fn new() -> Self {
        Self::with_cache(TypeCache::global())
    }

    /// Creates a mapper on its own type cache.
    #[inline]
    pub fn with_cache(cache: Arc<TypeCache>) -> Self {
        Self { cache }
    }

    #[inline]
    pub fn cache(&self) -> &Arc<TypeCache> {
        &self.cache
    }

    // -------------------------------------------------------------------------
    // Serialize

    /// Writes `value` into a new node tree of `format`.
    ///
    /// The root must be an object, list or dictionary; its name comes from
    /// [`Options::root_name`] or the type naming chain.
    pub fn serialize(&self, value: &dyn Reflect, format: Format, options: &Options) -> Result<Box<dyn Node>> {
        let (value, ty) = self.root_value(value)?;
        log::debug!("serialize `{}` as {format}", ty.type_path());

        let mut cx = Context::new(&self.cache, options, format, Mode::Serialize, "");
        let frame = root_frame(&cx, &ty)?;
        let name = cx.type_name(&ty, true);
        cx.path = NodePath::new(&name);

        let kind = cx.node_kind(value, &ty, frame)?;
        let mut root = format.new_root(kind, &name)?;
        cx.write(value, &ty, frame, &mut *root, None)?;
        Ok(root)
    }

    /// Writes `value` into the existing `node`, keeping its name.
    pub fn serialize_into(&self, value: &dyn Reflect, node: &mut dyn Node, options: &Options) -> Result<()> {
        let (value, ty) = self.root_value(value)?;
        let format = node.format();
        log::debug!("serialize `{}` as {format}", ty.type_path());

        let mut cx = Context::new(&self.cache, options, format, Mode::Serialize, node.name());
        let frame = root_frame(&cx, &ty)?;
        let kind = cx.node_kind(value, &ty, frame)?;
        if !node.can_be(kind) {
            return Err(MappingError::node_type_mismatch(ty.type_path(), format_args!("{kind} node")));
        }
        cx.write(value, &ty, frame, node, None)
    }

    fn root_value<'v>(&self, value: &'v dyn Reflect) -> Result<(&'v dyn Reflect, Arc<CachedType>)> {
        let ty = self.cache.get(value.reflect_type_info());
        if !ty.is_nullable() {
            return Ok((value, ty));
        }
        match present(value) {
            Some(inner) => Ok((inner, self.cache.get(inner.reflect_type_info()))),
            None => Err(MappingError::value_cannot_be_null(ty.type_path())),
        }
    }

    // -------------------------------------------------------------------------
    // Deserialize

    /// Reads a `T` from `node`.
    pub fn deserialize<T: Reflect + Typed>(&self, node: &dyn Node, options: &Options) -> Result<T> {
        let info = T::type_info();
        self.deserialize_as(node, info, options)?
            .take::<T>()
            .map_err(|_| MappingError::object_creation(info.type_path(), "produced a value of another type"))
    }

    /// Reads a value of the type described by `info` from `node`.
    pub fn deserialize_as(
        &self,
        node: &dyn Node,
        info: &'static TypeInfo,
        options: &Options,
    ) -> Result<Box<dyn Reflect>> {
        let format = node.format();
        log::debug!("deserialize `{}` as {format}", info.type_path());

        let ty = self.cache.get(info);
        let mut cx = Context::new(&self.cache, options, format, Mode::Deserialize, node.name());
        let frame = match cx.classify(&ty)? {
            Frame::Optional => {
                let TypeInfo::Optional(optional) = info else {
                    return Err(MappingError::type_not_supported(info.type_path(), "not an option"));
                };
                root_frame(&cx, &cx.cached(optional.inner()))?;
                Frame::Optional
            }
            _ => root_frame(&cx, &ty)?,
        };
        cx.read(node, &ty, frame, None, None)
    }

    // -------------------------------------------------------------------------
    // JSON text

    /// Parses JSON text and reads a `T` from it.
    #[cfg(feature = "json")]
    pub fn from_json_str<T: Reflect + Typed>(&self, text: &str, options: &Options) -> Result<T> {
        let node: crate::node::JsonNode =
            serde_json::from_str(text).map_err(|err| MappingError::source_parse(Format::Json, err))?;
        self.deserialize(&node, options)
    }

    /// Writes `value` as JSON text, indented under [`Options::pretty_print`].
    #[cfg(feature = "json")]
    pub fn to_json_string(&self, value: &dyn Reflect, options: &Options) -> Result<String> {
        use crate::node::JsonNode;

        let root = self.serialize(value, Format::Json, options)?;
        let Some(root) = (*root).downcast_ref::<JsonNode>() else {
            return Err(MappingError::type_not_supported(
                value.reflect_type_info().type_path(),
                "json roots are json nodes",
            ));
        };
        let text = if options.pretty_print() {
            serde_json::to_string_pretty(root)
        } else {
            serde_json::to_string(root)
        };
        text.map_err(|err| MappingError::source_write(Format::Json, err))
    }
}

/// Classifies a root type, which must not be a simple value.
fn root_frame(cx: &Context<'_>, ty: &CachedType) -> Result<Frame> {
    match cx.classify(ty)? {
        Frame::Simple | Frame::Optional => Err(MappingError::type_not_supported(
            ty.type_path(),
            "roots must be objects, lists or dictionaries",
        )),
        frame => Ok(frame),
    }
}
