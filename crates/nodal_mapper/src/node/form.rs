use nodal_model::info::ValueKind;

use super::{Format, Node, NodeChildren, NodeError, NodeKind};

/// A node of a URL-encoded form.
///
/// A form is a flat object of value fields.
///
/// # Example
///
/// ```
/// use nodal_mapper::node::{FormNode, Node};
///
/// let form = FormNode::from_pairs([("name", "ann"), ("age", "7")]);
/// assert_eq!(form.children().count(), 2);
/// assert_eq!(form.pairs()[1], (String::from("age"), String::from("7")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormNode {
    name: String,
    kind: NodeKind,
    value: Option<String>,
    children: Vec<FormNode>,
}

impl FormNode {
    fn field(name: &str, value: Option<String>) -> Self {
        Self {
            name: String::from(name),
            kind: NodeKind::Value,
            value,
            children: Vec::new(),
        }
    }

    /// Creates an empty form, `kind` must be [`NodeKind::Object`].
    pub fn form(name: &str, kind: NodeKind) -> Result<Self, NodeError> {
        match kind {
            NodeKind::Object => Ok(Self {
                name: String::from(name),
                kind,
                value: None,
                children: Vec::new(),
            }),
            _ => Err(NodeError::Unsupported {
                format: Format::Form,
                kind,
                depth: 0,
            }),
        }
    }

    /// Builds a form from decoded name/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self {
            name: String::new(),
            kind: NodeKind::Object,
            value: None,
            children: pairs
                .into_iter()
                .map(|(name, value)| Self::field(name.as_ref(), Some(String::from(value.as_ref()))))
                .collect(),
        }
    }

    /// Returns the fields as name/value pairs, null fields are empty.
    pub fn pairs(&self) -> Vec<(String, String)> {
        self.children
            .iter()
            .map(|field| (field.name.clone(), field.value.clone().unwrap_or_default()))
            .collect()
    }
}

impl Node for FormNode {
    #[inline]
    fn format(&self) -> Format {
        Format::Form
    }

    #[inline]
    fn kind(&self) -> NodeKind {
        self.kind
    }

    #[inline]
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) {
        name.clone_into(&mut self.name);
    }

    #[inline]
    fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    fn set_value(&mut self, value: Option<String>, _value_kind: ValueKind) {
        self.value = value;
    }

    fn children(&self) -> NodeChildren<'_> {
        Box::new(self.children.iter().map(|child| child as &dyn Node))
    }

    fn add_child(&mut self, name: &str, kind: NodeKind) -> Result<&mut dyn Node, NodeError> {
        match (self.kind, kind) {
            (NodeKind::Object, NodeKind::Value) => {
                let index = self.children.len();
                self.children.push(Self::field(name, None));
                Ok(&mut self.children[index])
            }
            (NodeKind::Object, _) => Err(NodeError::Unsupported {
                format: Format::Form,
                kind,
                depth: 1,
            }),
            (parent, _) => Err(NodeError::NotAContainer(parent)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FormNode;
    use crate::node::{Node, NodeKind};

    #[test]
    fn flat_only() {
        let mut form = FormNode::form("", NodeKind::Object).unwrap();
        assert!(form.add_child("list", NodeKind::Array).is_err());
        let field = form.add_child("a", NodeKind::Value).unwrap();
        assert!(field.add_child("b", NodeKind::Value).is_err());
        assert!(FormNode::form("", NodeKind::Array).is_err());
    }

    #[test]
    fn null_fields_are_empty() {
        let mut form = FormNode::form("", NodeKind::Object).unwrap();
        form.add_child("a", NodeKind::Value).unwrap();
        assert_eq!(form.pairs(), [(String::from("a"), String::new())]);
        assert!(form.children().next().unwrap().is_null());
    }
}
