use alloc::boxed::Box;
use alloc::string::String;
use core::any::TypeId;
use core::fmt;

use crate::Reflect;
use crate::info::{Constructors, MemberInfo, Shape, SimpleInfo, Type, TypeInfo};

// -----------------------------------------------------------------------------
// CachedMember

/// A member of a cached object type, with its declaring type.
#[derive(Clone, Copy)]
pub struct CachedMember {
    info: &'static MemberInfo,
    declaring: &'static Type,
}

impl CachedMember {
    /// Returns the underlying [`MemberInfo`].
    #[inline(always)]
    pub fn info(&self) -> &'static MemberInfo {
        self.info
    }

    /// Returns the declared member name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.info.name()
    }

    /// Returns the wire name override, if any.
    #[inline]
    pub fn rename(&self) -> Option<&'static str> {
        self.info.rename()
    }

    /// Returns the default wire name: the rename if present, else the member name.
    #[inline]
    pub fn default_name(&self) -> &'static str {
        self.info.rename().unwrap_or(self.info.name())
    }

    /// Returns the member's declared type.
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        self.info.type_info()
    }

    /// Returns the type declaring the member.
    #[inline(always)]
    pub fn declaring(&self) -> &'static Type {
        self.declaring
    }

    #[inline]
    pub fn is_readable(&self) -> bool {
        self.info.is_readable()
    }

    #[inline]
    pub fn is_writable(&self) -> bool {
        self.info.is_writable()
    }

    #[inline]
    pub fn is_ignored(&self) -> bool {
        self.info.is_ignored()
    }
}

impl fmt::Display for CachedMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.declaring.ident(), self.info.name())
    }
}

impl fmt::Debug for CachedMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedMember")
            .field("declaring", self.declaring)
            .field("info", self.info)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// CachedType

/// Precomputed metadata of a mapped type.
///
/// The shape stored here is intrinsic; the mapper may still treat a type
/// as simple (a custom converter is registered) or as an object
/// (a collection with members forced to object shape).
pub struct CachedType {
    info: &'static TypeInfo,
    shape: Shape,
    underlying: Option<&'static TypeInfo>,
    item: Option<&'static TypeInfo>,
    entry: Option<(&'static TypeInfo, &'static TypeInfo)>,
    members: Box<[CachedMember]>,
    constructors: Constructors,
    default_name: String,
}

impl CachedType {
    /// Computes the record of the type described by `info`.
    pub fn new(info: &'static TypeInfo) -> Self {
        let (item, entry, underlying) = match info {
            TypeInfo::List(list) => (list.item(), None, None),
            TypeInfo::Dictionary(dict) => (None, dict.key().zip(dict.value()), None),
            TypeInfo::Optional(optional) => (None, None, Some(optional.inner())),
            _ => (None, None, None),
        };

        let (members, constructors) = match info.object() {
            Some(object) => (
                object
                    .members()
                    .iter()
                    .map(|member| CachedMember {
                        info: member,
                        declaring: object.ty(),
                    })
                    .collect(),
                *object.constructors(),
            ),
            None => (Box::default(), Constructors::none()),
        };

        Self {
            info,
            shape: info.shape(),
            underlying,
            item,
            entry,
            members,
            constructors,
            default_name: default_name(info),
        }
    }

    #[inline(always)]
    pub fn info(&self) -> &'static TypeInfo {
        self.info
    }

    #[inline]
    pub fn ty(&self) -> &'static Type {
        self.info.ty()
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.info.type_id()
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.info.type_path()
    }

    /// Returns the intrinsic shape, looking through `Option<T>`.
    #[inline(always)]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Returns `true` for `Option<T>`.
    #[inline]
    pub fn is_nullable(&self) -> bool {
        self.underlying.is_some()
    }

    /// Returns `T` of `Option<T>`.
    #[inline]
    pub fn underlying(&self) -> Option<&'static TypeInfo> {
        self.underlying
    }

    /// Returns the declared item type of a list.
    #[inline]
    pub fn item(&self) -> Option<&'static TypeInfo> {
        self.item
    }

    /// Returns the declared key type of a dictionary.
    #[inline]
    pub fn key(&self) -> Option<&'static TypeInfo> {
        self.entry.map(|(key, _)| key)
    }

    /// Returns the declared value type of a dictionary.
    #[inline]
    pub fn value(&self) -> Option<&'static TypeInfo> {
        self.entry.map(|(_, value)| value)
    }

    /// Returns `true` for collections without declared item types.
    pub fn is_untyped_collection(&self) -> bool {
        match self.info {
            TypeInfo::List(_) => self.item.is_none(),
            TypeInfo::Dictionary(_) => self.entry.is_none(),
            _ => false,
        }
    }

    /// Returns the members in declaration order.
    #[inline(always)]
    pub fn members(&self) -> &[CachedMember] {
        &self.members
    }

    /// Returns the member declared as `name`.
    pub fn member(&self, name: &str) -> Option<&CachedMember> {
        self.members.iter().find(|m| m.name() == name)
    }

    /// Returns `true` if the type has a member facet.
    #[inline]
    pub fn has_members(&self) -> bool {
        self.info.object().is_some()
    }

    /// Returns the object construction strategies.
    #[inline(always)]
    pub fn constructors(&self) -> &Constructors {
        &self.constructors
    }

    /// Returns the simple info of a simple type.
    #[inline]
    pub fn simple(&self) -> Option<&'static SimpleInfo> {
        match self.info {
            TypeInfo::Simple(info) => Some(info),
            _ => None,
        }
    }

    /// Creates an empty list or dictionary.
    pub fn construct_collection(&self) -> Option<Box<dyn Reflect>> {
        match self.info {
            TypeInfo::List(list) => Some(list.construct()),
            TypeInfo::Dictionary(dict) => Some(dict.construct()),
            _ => None,
        }
    }

    /// Returns the type's own wire name before naming conventions run.
    ///
    /// The rename attribute or type ident; plain lists are `ArrayOf{Item}`,
    /// plain dictionaries `DictionaryOf{Value}`.
    #[inline]
    pub fn default_name(&self) -> &str {
        &self.default_name
    }
}

fn default_name(info: &'static TypeInfo) -> String {
    if let Some(object) = info.object() {
        return String::from(object.rename().unwrap_or(object.ty().ident()));
    }
    match info {
        TypeInfo::List(list) => match list.item() {
            Some(item) => alloc::format!("ArrayOf{}", default_name(item)),
            None => String::from(info.type_ident()),
        },
        TypeInfo::Dictionary(dict) => match dict.value() {
            Some(value) => alloc::format!("DictionaryOf{}", default_name(value)),
            None => String::from(info.type_ident()),
        },
        TypeInfo::Optional(optional) => default_name(optional.inner()),
        _ => String::from(info.type_ident()),
    }
}

impl fmt::Debug for CachedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedType")
            .field("type", self.ty())
            .field("shape", &self.shape)
            .field("nullable", &self.is_nullable())
            .field("members", &self.members)
            .field("default_name", &self.default_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;

    use crate::cache::TypeCache;
    use crate::impls::{UntypedDictionary, UntypedList};
    use crate::info::Shape;

    #[test]
    fn collection_records() {
        let cache = TypeCache::new();

        let list = cache.of::<Vec<Option<u8>>>();
        assert_eq!(list.shape(), Shape::Array);
        assert!(list.item().unwrap().type_is::<Option<u8>>());
        assert_eq!(list.default_name(), "ArrayOfu8");

        let dict = cache.of::<BTreeMap<String, Vec<bool>>>();
        assert_eq!(dict.shape(), Shape::Dictionary);
        assert!(dict.key().unwrap().type_is::<String>());
        assert_eq!(dict.default_name(), "DictionaryOfArrayOfbool");
    }

    #[test]
    fn optional_takes_inner_shape() {
        let cache = TypeCache::new();
        let optional = cache.of::<Option<Vec<i32>>>();
        assert_eq!(optional.shape(), Shape::Array);
        assert!(optional.is_nullable());
        assert!(optional.underlying().unwrap().type_is::<Vec<i32>>());
    }

    #[test]
    fn untyped_collections_are_flagged() {
        let cache = TypeCache::new();
        assert!(cache.of::<UntypedList>().is_untyped_collection());
        assert!(cache.of::<UntypedDictionary>().is_untyped_collection());
        assert!(!cache.of::<Vec<u8>>().is_untyped_collection());
    }
}
