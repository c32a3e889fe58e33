//! Format node trees.
//!
//! Every wire format is read into, and written from, a tree of [`Node`]s.
//! The mapper only talks to this trait; text codecs sit on the other side:
//!
//! - [`JsonNode`] is (de)serializable with any serde codec.
//! - [`XmlNode`] is a plain element tree with optional nil markers.
//! - [`CsvNode`] is a table of rows, see [`CsvNode::records`].
//! - [`FormNode`] is a flat list of fields, see [`FormNode::pairs`].

use core::any::Any;
use core::fmt;

use nodal_model::info::ValueKind;
use thiserror::Error;

// -----------------------------------------------------------------------------
// Modules

mod csv;
mod form;
mod json;
mod path;
mod xml;

// -----------------------------------------------------------------------------
// Exports

pub use csv::CsvNode;
pub use form::FormNode;
pub use json::JsonNode;
pub use path::{NodePath, Segment};
pub use xml::XmlNode;

// -----------------------------------------------------------------------------
// NodeKind

/// Shape of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A leaf holding a single text value or null.
    Value,
    /// Named children.
    Object,
    /// Ordered children, names are not significant.
    Array,
}

impl NodeKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::Object => "object",
            Self::Array => "array",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// -----------------------------------------------------------------------------
// Format

/// Wire format tag of a node tree.
///
/// Used to scope converters, naming rules and visitors to one format,
/// and to render node paths in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Xml,
    Csv,
    Form,
}

impl Format {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
            Self::Csv => "csv",
            Self::Form => "form",
        }
    }

    /// Creates an empty root node of this format.
    ///
    /// CSV roots are tables (arrays), form roots are objects.
    pub fn new_root(self, kind: NodeKind, name: &str) -> Result<Box<dyn Node>, NodeError> {
        match self {
            Self::Json => Ok(Box::new(JsonNode::new(name, kind))),
            Self::Xml => Ok(Box::new(XmlNode::new(name, kind))),
            Self::Csv => Ok(Box::new(CsvNode::table(name, kind)?)),
            Self::Form => Ok(Box::new(FormNode::form(name, kind)?)),
        }
    }

    /// Renders `path` the way this format addresses nodes.
    ///
    /// | format | example         |
    /// |--------|-----------------|
    /// | json   | `$.a.b[0]`      |
    /// | xml    | `/Root/a/b/*[1]`|
    /// | csv    | `[0].column`    |
    /// | form   | `name`          |
    pub fn render_path(self, path: &NodePath) -> String {
        path.render(self)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// -----------------------------------------------------------------------------
// NodeError

/// A node tree constraint was violated while building it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NodeError {
    #[error("{format} cannot hold {kind} nodes at depth {depth}")]
    Unsupported {
        format: Format,
        kind: NodeKind,
        depth: usize,
    },

    #[error("a {0} node cannot hold children")]
    NotAContainer(NodeKind),
}

// -----------------------------------------------------------------------------
// Node

/// Iterator over the children of a [`Node`].
pub type NodeChildren<'a> = Box<dyn Iterator<Item = &'a dyn Node> + 'a>;

/// A position in a format node tree.
///
/// Nodes of one tree all share the same [`Format`].
pub trait Node: Any + fmt::Debug {
    fn format(&self) -> Format;

    fn kind(&self) -> NodeKind;

    /// Whether the node can be read as `kind`.
    ///
    /// Formats without distinct syntax per shape (XML elements) accept
    /// more than their recorded kind.
    #[inline]
    fn can_be(&self, kind: NodeKind) -> bool {
        self.kind() == kind
    }

    fn name(&self) -> &str;

    fn set_name(&mut self, name: &str);

    /// The text of a value node, `None` for null.
    fn value(&self) -> Option<&str>;

    /// Returns `true` for an explicit null.
    #[inline]
    fn is_null(&self) -> bool {
        self.kind() == NodeKind::Value && self.value().is_none()
    }

    /// Sets the text of a value node, `None` writes null.
    ///
    /// `value_kind` lets typed formats emit numbers and booleans unquoted.
    fn set_value(&mut self, value: Option<String>, value_kind: ValueKind);

    fn children(&self) -> NodeChildren<'_>;

    /// Appends a child and returns it.
    fn add_child(&mut self, name: &str, kind: NodeKind) -> Result<&mut dyn Node, NodeError>;

    /// Whether null values must be written even when the options
    /// exclude them.
    #[inline]
    fn requires_null_marker(&self) -> bool {
        false
    }
}

impl dyn Node {
    #[inline]
    pub fn is<T: Node>(&self) -> bool {
        <dyn Any>::is::<T>(self)
    }

    #[inline]
    pub fn downcast_ref<T: Node>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    #[inline]
    pub fn downcast_mut<T: Node>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    pub fn downcast<T: Node>(self: Box<dyn Node>) -> Result<Box<T>, Box<dyn Node>> {
        if self.is::<T>() {
            let any: Box<dyn Any> = self;
            match any.downcast::<T>() {
                Ok(node) => Ok(node),
                Err(_) => unreachable!("type id was checked"),
            }
        } else {
            Err(self)
        }
    }
}
