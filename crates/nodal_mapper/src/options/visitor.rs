use alloc::sync::Arc;
use core::any::TypeId;
use core::fmt;

use nodal_model::Reflect;
use nodal_model::cache::{CachedMember, CachedType};

use crate::node::{Format, Node, NodePath};

// -----------------------------------------------------------------------------
// Mode

/// Direction of a mapping call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Values to nodes.
    Serialize,
    /// Nodes to values.
    Deserialize,
}

// -----------------------------------------------------------------------------
// VisitContext

/// Where a visitor runs.
#[derive(Clone, Copy)]
pub struct VisitContext<'a> {
    pub(crate) format: Format,
    pub(crate) mode: Mode,
    pub(crate) ty: &'a Arc<CachedType>,
    pub(crate) member: Option<&'a CachedMember>,
    pub(crate) path: &'a NodePath,
}

impl<'a> VisitContext<'a> {
    #[inline]
    pub fn format(&self) -> Format {
        self.format
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The type of the visited value.
    #[inline]
    pub fn ty(&self) -> &'a Arc<CachedType> {
        self.ty
    }

    /// The member holding the value, `None` at the root.
    #[inline]
    pub fn member(&self) -> Option<&'a CachedMember> {
        self.member
    }

    #[inline]
    pub fn path(&self) -> &'a NodePath {
        self.path
    }

    /// The path rendered for the current format.
    pub fn path_string(&self) -> String {
        self.path.render(self.format)
    }
}

impl fmt::Debug for VisitContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisitContext")
            .field("format", &self.format)
            .field("mode", &self.mode)
            .field("type", self.ty.ty())
            .field("member", &self.member)
            .field("path", &self.path_string())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Visitors

/// Runs after a value was read from a node.
pub type DeserializeVisit = Arc<dyn Fn(&dyn Node, &mut dyn Reflect, &VisitContext<'_>) + Send + Sync>;

/// Runs after a node was written from a value.
pub type SerializeVisit = Arc<dyn Fn(&dyn Reflect, &mut dyn Node, &VisitContext<'_>) + Send + Sync>;

/// Decides whether a visitor runs, sees the node and the value.
pub type VisitPredicate = Arc<dyn Fn(&dyn Node, &dyn Reflect, &VisitContext<'_>) -> bool + Send + Sync>;

/// A registered visitor and its scope.
#[derive(Clone)]
pub(crate) struct Visitor<F> {
    pub format: Option<Format>,
    pub ty: Option<TypeId>,
    pub predicate: Option<VisitPredicate>,
    pub visit: F,
}

impl<F> Visitor<F> {
    pub fn new(visit: F) -> Self {
        Self {
            format: None,
            ty: None,
            predicate: None,
            visit,
        }
    }

    /// Whether the visitor applies to a value of `ty` in `format`.
    ///
    /// The predicate is checked separately, it needs the node and value.
    pub fn is_scoped_to(&self, format: Format, ty: TypeId) -> bool {
        self.format.is_none_or(|f| f == format) && self.ty.is_none_or(|t| t == ty)
    }
}

/// Visitors of both directions, in registration order.
#[derive(Clone, Default)]
pub(crate) struct Visitors {
    pub deserialize: Vec<Visitor<DeserializeVisit>>,
    pub serialize: Vec<Visitor<SerializeVisit>>,
}

impl Visitors {
    pub fn run_deserialize(&self, node: &dyn Node, value: &mut dyn Reflect, cx: &VisitContext<'_>) {
        let ty = value.ty_id();
        for visitor in &self.deserialize {
            if !visitor.is_scoped_to(cx.format, ty) {
                continue;
            }
            if let Some(predicate) = &visitor.predicate
                && !predicate(node, &*value, cx)
            {
                continue;
            }
            (visitor.visit)(node, &mut *value, cx);
        }
    }

    pub fn run_serialize(&self, value: &dyn Reflect, node: &mut dyn Node, cx: &VisitContext<'_>) {
        let ty = value.ty_id();
        for visitor in &self.serialize {
            if !visitor.is_scoped_to(cx.format, ty) {
                continue;
            }
            if let Some(predicate) = &visitor.predicate
                && !predicate(&*node, value, cx)
            {
                continue;
            }
            (visitor.visit)(value, &mut *node, cx);
        }
    }
}

impl fmt::Debug for Visitors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Visitors")
            .field("deserialize", &self.deserialize.len())
            .field("serialize", &self.serialize.len())
            .finish()
    }
}
