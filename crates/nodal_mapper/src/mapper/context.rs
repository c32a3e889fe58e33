use alloc::sync::Arc;

use nodal_model::Reflect;
use nodal_model::cache::{CachedMember, CachedType, TypeCache};
use nodal_model::info::TypeInfo;
use nodal_model::ops::ReflectRef;

use crate::convert::ValueContext;
use crate::error::{MappingError, Result};
use crate::naming::TypeNameContext;
use crate::node::{Format, NodePath};
use crate::options::{Mode, Options, VisitContext};

// -----------------------------------------------------------------------------
// Frame

/// Effective classification of a type within one call.
///
/// The intrinsic shape, adjusted by the options: a registered converter
/// makes any type simple, `treat_as_object` turns a collection with
/// members into an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Frame {
    Simple,
    Optional,
    Object,
    Array,
    Dictionary,
}

// -----------------------------------------------------------------------------
// Context

/// State of one mapping call.
pub(super) struct Context<'a> {
    pub cache: &'a TypeCache,
    pub options: &'a Options,
    pub format: Format,
    pub mode: Mode,
    pub path: NodePath,
}

impl<'a> Context<'a> {
    pub fn new(cache: &'a TypeCache, options: &'a Options, format: Format, mode: Mode, root: &str) -> Self {
        Self {
            cache,
            options,
            format,
            mode,
            path: NodePath::new(root),
        }
    }

    #[inline]
    pub fn cached(&self, info: &'static TypeInfo) -> Arc<CachedType> {
        self.cache.get(info)
    }

    /// The current path, rendered for the call's format.
    #[inline]
    pub fn render_path(&self) -> String {
        self.path.render(self.format)
    }

    pub fn classify(&self, ty: &CachedType) -> Result<Frame> {
        let converters = self.options.converters();
        let converted = match self.mode {
            Mode::Serialize => converters.writes_as_simple(ty.type_id(), self.format),
            Mode::Deserialize => converters.reads_as_simple(ty.type_id(), self.format),
        };
        if converted {
            return Ok(Frame::Simple);
        }
        if ty.is_untyped_collection() {
            return Err(MappingError::type_not_supported(
                ty.type_path(),
                "collections without a declared item type cannot be mapped",
            ));
        }

        Ok(match ty.info() {
            TypeInfo::Simple(_) => Frame::Simple,
            TypeInfo::Optional(_) => Frame::Optional,
            TypeInfo::Object(_) => Frame::Object,
            TypeInfo::List(_) if self.as_object(ty) => Frame::Object,
            TypeInfo::List(_) => Frame::Array,
            TypeInfo::Dictionary(_) if self.as_object(ty) => Frame::Object,
            TypeInfo::Dictionary(_) => Frame::Dictionary,
        })
    }

    fn as_object(&self, ty: &CachedType) -> bool {
        ty.has_members() && self.options.treats_as_object(ty)
    }

    /// Whether `member` of `declaring` takes part in mapping at all.
    pub fn maps_member(&self, member: &CachedMember, declaring: &CachedType) -> bool {
        !member.is_ignored()
            && self.options.includes_member(member, declaring)
            && self.options.includes_type(&self.cached(member.type_info()))
    }

    // -------------------------------------------------------------------------
    // Names

    /// Resolves the wire name of `ty` through the type naming chain.
    pub fn type_name(&self, ty: &Arc<CachedType>, is_root: bool) -> String {
        if is_root && let Some(name) = self.options.root_name() {
            return String::from(name);
        }
        let context = TypeNameContext {
            ty: ty.clone(),
            is_root,
            format: self.format,
        };
        self.options.type_naming().resolve(ty.default_name(), &context)
    }

    // -------------------------------------------------------------------------
    // Sub contexts

    pub fn value_context<'b>(
        &'b self,
        ty: &'b Arc<CachedType>,
        member: Option<&'b CachedMember>,
    ) -> ValueContext<'b> {
        ValueContext {
            format: self.format,
            ty,
            member,
            path: &self.path,
        }
    }

    pub fn visit_context<'b>(
        &'b self,
        ty: &'b Arc<CachedType>,
        member: Option<&'b CachedMember>,
    ) -> VisitContext<'b> {
        VisitContext {
            format: self.format,
            mode: self.mode,
            ty,
            member,
            path: &self.path,
        }
    }
}

// -----------------------------------------------------------------------------
// Helpers

/// The present value of an `Option<T>`, `None` for null.
///
/// Values without the optional shape are returned as they are.
pub(super) fn present(value: &dyn Reflect) -> Option<&dyn Reflect> {
    match value.reflect_ref() {
        ReflectRef::Optional(optional) => optional.value(),
        _ => Some(value),
    }
}

/// Whether `value` is a null `Option<T>`.
#[inline]
pub(super) fn is_null(value: &dyn Reflect) -> bool {
    present(value).is_none()
}
