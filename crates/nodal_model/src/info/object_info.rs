use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::Reflect;
use crate::info::{Type, TypeInfo, Typed};

// -----------------------------------------------------------------------------
// MemberInfo

/// A gettable/settable member of an object.
#[derive(Clone, Copy)]
pub struct MemberInfo {
    name: &'static str,
    type_info: fn() -> &'static TypeInfo,
    rename: Option<&'static str>,
    readable: bool,
    writable: bool,
    ignore: bool,
}

impl MemberInfo {
    /// Creates a readable and writable member of type `T`.
    #[inline]
    pub const fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            name,
            type_info: T::type_info,
            rename: None,
            readable: true,
            writable: true,
            ignore: false,
        }
    }

    /// Sets the wire name override.
    #[inline]
    pub const fn with_rename(self, rename: &'static str) -> Self {
        Self {
            rename: Some(rename),
            ..self
        }
    }

    /// Marks the member as never deserialized.
    #[inline]
    pub const fn read_only(self) -> Self {
        Self {
            writable: false,
            ..self
        }
    }

    /// Marks the member as never serialized.
    #[inline]
    pub const fn write_only(self) -> Self {
        Self {
            readable: false,
            ..self
        }
    }

    /// Marks the member as ignored by the mapper.
    #[inline]
    pub const fn ignored(self) -> Self {
        Self {
            ignore: true,
            ..self
        }
    }

    /// Returns the declared member name.
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the member's [`TypeInfo`].
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    /// Returns the wire name override, if any.
    #[inline(always)]
    pub const fn rename(&self) -> Option<&'static str> {
        self.rename
    }

    /// Returns `true` if the member can be serialized.
    #[inline(always)]
    pub const fn is_readable(&self) -> bool {
        self.readable
    }

    /// Returns `true` if the member can be deserialized.
    #[inline(always)]
    pub const fn is_writable(&self) -> bool {
        self.writable
    }

    /// Returns `true` if the mapper skips this member.
    #[inline(always)]
    pub const fn is_ignored(&self) -> bool {
        self.ignore
    }
}

impl fmt::Debug for MemberInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberInfo")
            .field("name", &self.name)
            .field("type", self.type_info().ty())
            .field("rename", &self.rename)
            .field("readable", &self.readable)
            .field("writable", &self.writable)
            .field("ignore", &self.ignore)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Constructors

/// A constructor taking the enclosing instance.
#[derive(Clone, Copy)]
pub struct ParentConstructor {
    parent: TypeId,
    construct: fn(&dyn Reflect) -> Option<Box<dyn Reflect>>,
}

impl ParentConstructor {
    /// Creates a constructor accepting a parent of type `P`.
    ///
    /// `construct` returns `None` if the given value is not a `P`.
    #[inline]
    pub fn new<P: Any>(construct: fn(&dyn Reflect) -> Option<Box<dyn Reflect>>) -> Self {
        Self {
            parent: TypeId::of::<P>(),
            construct,
        }
    }

    /// Returns the [`TypeId`] of the accepted parent.
    #[inline(always)]
    pub fn parent(&self) -> TypeId {
        self.parent
    }

    /// Returns `true` if `parent` is accepted by this constructor.
    #[inline]
    pub fn accepts(&self, parent: &dyn Reflect) -> bool {
        parent.ty_id() == self.parent
    }

    /// Constructs an instance from `parent`.
    #[inline]
    pub fn construct(&self, parent: &dyn Reflect) -> Option<Box<dyn Reflect>> {
        (self.construct)(parent)
    }
}

/// Construction strategies of an object.
#[derive(Clone, Copy, Default)]
pub struct Constructors {
    default: Option<fn() -> Box<dyn Reflect>>,
    with_parent: Option<ParentConstructor>,
}

impl Constructors {
    /// No construction strategy.
    #[inline]
    pub const fn none() -> Self {
        Self {
            default: None,
            with_parent: None,
        }
    }

    /// Sets the parameterless constructor.
    #[inline]
    pub const fn with_default(self, default: fn() -> Box<dyn Reflect>) -> Self {
        Self {
            default: Some(default),
            ..self
        }
    }

    /// Sets the single-parent constructor.
    #[inline]
    pub const fn with_parent(self, ctor: ParentConstructor) -> Self {
        Self {
            with_parent: Some(ctor),
            ..self
        }
    }

    /// Returns the parameterless constructor.
    #[inline]
    pub fn default_fn(&self) -> Option<fn() -> Box<dyn Reflect>> {
        self.default
    }

    /// Returns the single-parent constructor.
    #[inline]
    pub fn parent_fn(&self) -> Option<&ParentConstructor> {
        self.with_parent.as_ref()
    }

    /// Returns `true` if no strategy is available.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.default.is_none() && self.with_parent.is_none()
    }
}

impl fmt::Debug for Constructors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructors")
            .field("default", &self.default.is_some())
            .field("with_parent", &self.with_parent.map(|c| c.parent))
            .finish()
    }
}

// -----------------------------------------------------------------------------
// ObjectInfo

/// Information of a type with named members.
///
/// Members are kept in declaration order.
pub struct ObjectInfo {
    ty: Type,
    rename: Option<&'static str>,
    members: Box<[MemberInfo]>,
    constructors: Constructors,
}

impl ObjectInfo {
    /// Creates object info for `T`.
    pub fn new<T: Any>(ident: &'static str, members: &[MemberInfo]) -> Self {
        Self {
            ty: Type::of::<T>(ident),
            rename: None,
            members: members.into(),
            constructors: Constructors::none(),
        }
    }

    /// Sets the wire name override of the type.
    pub fn with_rename(self, rename: &'static str) -> Self {
        Self {
            rename: Some(rename),
            ..self
        }
    }

    /// Sets the construction strategies.
    pub fn with_constructors(self, constructors: Constructors) -> Self {
        Self {
            constructors,
            ..self
        }
    }

    /// Returns the [`Type`].
    #[inline(always)]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns the wire name override, if any.
    #[inline(always)]
    pub fn rename(&self) -> Option<&'static str> {
        self.rename
    }

    /// Returns the members in declaration order.
    #[inline(always)]
    pub fn members(&self) -> &[MemberInfo] {
        &self.members
    }

    /// Returns the member declared as `name`.
    pub fn member(&self, name: &str) -> Option<&MemberInfo> {
        self.members.iter().find(|m| m.name == name)
    }

    /// Returns the construction strategies.
    #[inline(always)]
    pub fn constructors(&self) -> &Constructors {
        &self.constructors
    }
}

impl fmt::Debug for ObjectInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectInfo")
            .field("ty", &self.ty)
            .field("rename", &self.rename)
            .field("members", &self.members)
            .field("constructors", &self.constructors)
            .finish()
    }
}
