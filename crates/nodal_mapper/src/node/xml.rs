use nodal_model::info::ValueKind;

use super::{Format, Node, NodeChildren, NodeError, NodeKind};

/// An XML element.
///
/// XML has no distinct syntax for objects and arrays, so an element
/// reports the kind it was created with but [`can_be`] any shape its
/// content allows: an element without children may be a value, an
/// element without text may be an object or an array.
///
/// Nulls are `xsi:nil` elements. With nil markers enabled they are
/// written even when the options exclude null values.
///
/// [`can_be`]: Node::can_be
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    name: String,
    kind: NodeKind,
    text: Option<String>,
    nil: bool,
    nil_markers: bool,
    children: Vec<XmlNode>,
}

impl XmlNode {
    /// Creates an empty element.
    pub fn new(name: &str, kind: NodeKind) -> Self {
        Self {
            name: String::from(name),
            kind,
            text: None,
            nil: false,
            nil_markers: false,
            children: Vec::new(),
        }
    }

    /// Creates a text element.
    pub fn text_element(name: &str, text: &str) -> Self {
        Self {
            text: Some(String::from(text)),
            ..Self::new(name, NodeKind::Value)
        }
    }

    /// Creates a nil element.
    pub fn nil_element(name: &str) -> Self {
        Self {
            nil: true,
            ..Self::new(name, NodeKind::Value)
        }
    }

    /// Writes nulls as nil elements, inherited by children added later.
    pub fn with_nil_markers(mut self) -> Self {
        self.nil_markers = true;
        self
    }

    /// Appends `child` and returns `self`.
    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    #[inline]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    #[inline]
    pub fn is_nil(&self) -> bool {
        self.nil
    }

    #[inline]
    pub fn elements(&self) -> &[XmlNode] {
        &self.children
    }

    fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|text| !text.trim().is_empty())
    }
}

impl Node for XmlNode {
    #[inline]
    fn format(&self) -> Format {
        Format::Xml
    }

    #[inline]
    fn kind(&self) -> NodeKind {
        self.kind
    }

    fn can_be(&self, kind: NodeKind) -> bool {
        match kind {
            NodeKind::Value => self.children.is_empty(),
            NodeKind::Object | NodeKind::Array => !self.has_text(),
        }
    }

    #[inline]
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) {
        name.clone_into(&mut self.name);
    }

    fn value(&self) -> Option<&str> {
        if self.nil {
            None
        } else {
            Some(self.text.as_deref().unwrap_or_default())
        }
    }

    #[inline]
    fn is_null(&self) -> bool {
        self.nil
    }

    fn set_value(&mut self, value: Option<String>, _value_kind: ValueKind) {
        self.nil = value.is_none();
        self.text = value;
    }

    fn children(&self) -> NodeChildren<'_> {
        Box::new(self.children.iter().map(|child| child as &dyn Node))
    }

    fn add_child(&mut self, name: &str, kind: NodeKind) -> Result<&mut dyn Node, NodeError> {
        if self.kind == NodeKind::Value {
            return Err(NodeError::NotAContainer(NodeKind::Value));
        }
        let mut child = XmlNode::new(name, kind);
        child.nil_markers = self.nil_markers;
        let index = self.children.len();
        self.children.push(child);
        Ok(&mut self.children[index])
    }

    #[inline]
    fn requires_null_marker(&self) -> bool {
        self.nil_markers
    }
}

#[cfg(test)]
mod tests {
    use super::XmlNode;
    use crate::node::{Node, NodeKind};

    #[test]
    fn shape_is_ambiguous() {
        let empty = XmlNode::new("e", NodeKind::Object);
        assert!(empty.can_be(NodeKind::Value));
        assert!(empty.can_be(NodeKind::Array));
        assert_eq!(empty.value(), Some(""));

        let text = XmlNode::text_element("t", "12");
        assert!(text.can_be(NodeKind::Value));
        assert!(!text.can_be(NodeKind::Object));

        let parent = XmlNode::new("p", NodeKind::Object).with_child(text);
        assert!(!parent.can_be(NodeKind::Value));
    }

    #[test]
    fn nil_markers_are_inherited() {
        let mut root = XmlNode::new("r", NodeKind::Object).with_nil_markers();
        let child = root.add_child("c", NodeKind::Value).unwrap();
        assert!(child.requires_null_marker());

        child.set_value(None, Default::default());
        assert!(child.is_null());
        assert!(XmlNode::nil_element("n").is_null());
    }
}
