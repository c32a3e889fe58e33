//! Mapping options.
//!
//! [`Options`] is an immutable snapshot built with [`OptionsBuilder`].
//! It is cheap to clone and can be shared between threads and calls.

use alloc::sync::Arc;
use core::any::TypeId;
use core::fmt;

use nodal_model::Reflect;
use nodal_model::cache::{CachedMember, CachedType};
use nodal_utils::hash::HashMap;

use crate::convert::Converters;
use crate::naming::{
    ArrayItemNameContext, EnumValueNameContext, MemberNameContext, NamingConventions,
    TypeNameContext,
};

// -----------------------------------------------------------------------------
// Modules

mod builder;
mod visitor;

// -----------------------------------------------------------------------------
// Exports

pub use builder::OptionsBuilder;
pub use visitor::{DeserializeVisit, Mode, SerializeVisit, VisitContext, VisitPredicate};

pub(crate) use visitor::{Visitor, Visitors};

// -----------------------------------------------------------------------------
// Options

/// Filter over member types.
pub type TypePredicate = Arc<dyn Fn(&CachedType) -> bool + Send + Sync>;

/// Filter over members, with their declaring type.
pub type MemberPredicate = Arc<dyn Fn(&CachedMember, &CachedType) -> bool + Send + Sync>;

/// Creates an object, receives the enclosing instance if any.
///
/// Returning `None` fails the call with an object creation error.
pub type Factory = Arc<dyn Fn(Option<&dyn Reflect>) -> Option<Box<dyn Reflect>> + Send + Sync>;

/// Configuration of mapping calls.
///
/// # Example
///
/// ```
/// use nodal_mapper::Options;
/// use nodal_mapper::naming::Case;
///
/// let options = Options::builder()
///     .ignore_case(true)
///     .exclude_null_values(true)
///     .member_case(Case::Camel)
///     .build();
///
/// assert!(options.ignore_case());
/// assert!(!options.fail_on_unmatched_elements());
/// ```
#[derive(Clone, Default)]
pub struct Options {
    pub(crate) ignore_case: bool,
    pub(crate) fail_on_unmatched_elements: bool,
    pub(crate) fail_on_unmatched_members: bool,
    pub(crate) default_non_nullable_when_empty: bool,
    pub(crate) exclude_null_values: bool,
    pub(crate) pretty_print: bool,
    pub(crate) root_name: Option<String>,

    pub(crate) include_types: Vec<TypePredicate>,
    pub(crate) exclude_types: Vec<TypePredicate>,
    pub(crate) include_members: Vec<MemberPredicate>,
    pub(crate) exclude_members: Vec<MemberPredicate>,
    pub(crate) treat_as_object: Vec<TypePredicate>,

    pub(crate) type_naming: NamingConventions<TypeNameContext>,
    pub(crate) member_naming: NamingConventions<MemberNameContext>,
    pub(crate) array_item_naming: NamingConventions<ArrayItemNameContext>,
    pub(crate) enum_naming: NamingConventions<EnumValueNameContext>,

    pub(crate) converters: Converters,
    pub(crate) friendly_parse_messages: HashMap<TypeId, String>,
    pub(crate) factories: HashMap<TypeId, Factory>,
    pub(crate) visitors: Visitors,
}

impl Options {
    /// Starts building options from the defaults.
    #[inline]
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::new()
    }

    /// Starts building options from a copy of these.
    #[inline]
    pub fn to_builder(&self) -> OptionsBuilder {
        OptionsBuilder::from(self.clone())
    }

    // -------------------------------------------------------------------------
    // Flags

    /// Node names match member names regardless of case.
    #[inline]
    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    /// Source nodes without a matching member fail the call.
    #[inline]
    pub fn fail_on_unmatched_elements(&self) -> bool {
        self.fail_on_unmatched_elements
    }

    /// Writable members without a matching source node fail the call.
    #[inline]
    pub fn fail_on_unmatched_members(&self) -> bool {
        self.fail_on_unmatched_members
    }

    /// Null and empty values read as the zero value of types that have one.
    #[inline]
    pub fn default_non_nullable_when_empty(&self) -> bool {
        self.default_non_nullable_when_empty
    }

    /// Null members are left out when serializing.
    #[inline]
    pub fn exclude_null_values(&self) -> bool {
        self.exclude_null_values
    }

    /// Text output is indented.
    #[inline]
    pub fn pretty_print(&self) -> bool {
        self.pretty_print
    }

    /// Name of serialized roots, overriding the type naming chain.
    #[inline]
    pub fn root_name(&self) -> Option<&str> {
        self.root_name.as_deref()
    }

    // -------------------------------------------------------------------------
    // Naming

    #[inline]
    pub fn type_naming(&self) -> &NamingConventions<TypeNameContext> {
        &self.type_naming
    }

    #[inline]
    pub fn member_naming(&self) -> &NamingConventions<MemberNameContext> {
        &self.member_naming
    }

    #[inline]
    pub fn array_item_naming(&self) -> &NamingConventions<ArrayItemNameContext> {
        &self.array_item_naming
    }

    #[inline]
    pub fn enum_naming(&self) -> &NamingConventions<EnumValueNameContext> {
        &self.enum_naming
    }

    /// Compares a wire name with a node name under [`ignore_case`](Self::ignore_case).
    pub fn names_match(&self, wire: &str, node: &str) -> bool {
        if self.ignore_case {
            wire.to_lowercase() == node.to_lowercase()
        } else {
            wire == node
        }
    }

    // -------------------------------------------------------------------------
    // Conversion

    #[inline]
    pub fn converters(&self) -> &Converters {
        &self.converters
    }

    /// The end-user message of parse failures of `ty`.
    pub fn friendly_parse_message(&self, ty: TypeId) -> Option<&str> {
        self.friendly_parse_messages.get(&ty).map(String::as_str)
    }

    pub(crate) fn factory(&self, ty: TypeId) -> Option<&Factory> {
        self.factories.get(&ty)
    }

    #[inline]
    pub(crate) fn visitors(&self) -> &Visitors {
        &self.visitors
    }

    // -------------------------------------------------------------------------
    // Filters

    /// Whether values of `ty` take part in mapping as members.
    pub fn includes_type(&self, ty: &CachedType) -> bool {
        (self.include_types.is_empty() || self.include_types.iter().any(|p| p(ty)))
            && !self.exclude_types.iter().any(|p| p(ty))
    }

    /// Whether `member` of `declaring` takes part in mapping.
    pub fn includes_member(&self, member: &CachedMember, declaring: &CachedType) -> bool {
        (self.include_members.is_empty() || self.include_members.iter().any(|p| p(member, declaring)))
            && !self.exclude_members.iter().any(|p| p(member, declaring))
    }

    /// Whether a collection with members is mapped as an object.
    pub fn treats_as_object(&self, ty: &CachedType) -> bool {
        self.treat_as_object.iter().any(|p| p(ty))
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("ignore_case", &self.ignore_case)
            .field("fail_on_unmatched_elements", &self.fail_on_unmatched_elements)
            .field("fail_on_unmatched_members", &self.fail_on_unmatched_members)
            .field("default_non_nullable_when_empty", &self.default_non_nullable_when_empty)
            .field("exclude_null_values", &self.exclude_null_values)
            .field("pretty_print", &self.pretty_print)
            .field("root_name", &self.root_name)
            .field("converters", &self.converters)
            .field("visitors", &self.visitors)
            .finish_non_exhaustive()
    }
}
