use core::fmt;

use nodal_model::info::ValueKind;
use serde_core::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_core::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use super::{Format, Node, NodeChildren, NodeError, NodeKind};

/// A JSON node.
///
/// Implements serde's `Serialize` and `Deserialize`, so any serde codec
/// (`serde_json`, `ron`, ...) reads and writes it. Object members keep
/// their order.
///
/// # Example
///
/// ```
/// use nodal_mapper::node::{JsonNode, Node, NodeKind};
///
/// let node: JsonNode = serde_json::from_str(r#"{"a": [1, true, null]}"#).unwrap();
/// assert_eq!(node.kind(), NodeKind::Object);
///
/// let a = node.children().next().unwrap();
/// assert_eq!(a.name(), "a");
/// assert_eq!(a.children().count(), 3);
///
/// assert_eq!(serde_json::to_string(&node).unwrap(), r#"{"a":[1,true,null]}"#);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct JsonNode {
    name: String,
    kind: NodeKind,
    value: Option<String>,
    value_kind: ValueKind,
    children: Vec<JsonNode>,
}

impl JsonNode {
    /// Creates an empty node, a value node starts as null.
    pub fn new(name: &str, kind: NodeKind) -> Self {
        Self {
            name: String::from(name),
            kind,
            value: None,
            value_kind: ValueKind::String,
            children: Vec::new(),
        }
    }

    /// Creates a value node.
    pub fn value_node(name: &str, value: Option<String>, value_kind: ValueKind) -> Self {
        Self {
            value,
            value_kind,
            ..Self::new(name, NodeKind::Value)
        }
    }

    /// Returns how the value is written.
    #[inline]
    pub fn value_kind(&self) -> ValueKind {
        self.value_kind
    }

    /// Appends `child`, keeping its name.
    pub fn push(&mut self, child: JsonNode) {
        self.children.push(child);
    }

    #[inline]
    pub fn child_nodes(&self) -> &[JsonNode] {
        &self.children
    }
}

impl Node for JsonNode {
    #[inline]
    fn format(&self) -> Format {
        Format::Json
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

    fn set_value(&mut self, value: Option<String>, value_kind: ValueKind) {
        self.value = value;
        self.value_kind = value_kind;
    }

    fn children(&self) -> NodeChildren<'_> {
        Box::new(self.children.iter().map(|child| child as &dyn Node))
    }

    fn add_child(&mut self, name: &str, kind: NodeKind) -> Result<&mut dyn Node, NodeError> {
        if self.kind == NodeKind::Value {
            return Err(NodeError::NotAContainer(NodeKind::Value));
        }
        let index = self.children.len();
        self.children.push(JsonNode::new(name, kind));
        Ok(&mut self.children[index])
    }
}

// -----------------------------------------------------------------------------
// Serialize

impl Serialize for JsonNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.kind {
            NodeKind::Value => serialize_value(self.value.as_deref(), self.value_kind, serializer),
            NodeKind::Object => {
                let mut map = serializer.serialize_map(Some(self.children.len()))?;
                for child in &self.children {
                    map.serialize_entry(&child.name, child)?;
                }
                map.end()
            }
            NodeKind::Array => {
                let mut seq = serializer.serialize_seq(Some(self.children.len()))?;
                for child in &self.children {
                    seq.serialize_element(child)?;
                }
                seq.end()
            }
        }
    }
}

fn serialize_value<S: Serializer>(
    value: Option<&str>,
    kind: ValueKind,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let Some(text) = value else {
        return serializer.serialize_unit();
    };
    match kind {
        ValueKind::Number => {
            if let Ok(n) = text.parse::<i64>() {
                serializer.serialize_i64(n)
            } else if let Ok(n) = text.parse::<u64>() {
                serializer.serialize_u64(n)
            } else if let Ok(n) = text.parse::<f64>()
                && n.is_finite()
            {
                serializer.serialize_f64(n)
            } else {
                serializer.serialize_str(text)
            }
        }
        ValueKind::Boolean => match text {
            "true" => serializer.serialize_bool(true),
            "false" => serializer.serialize_bool(false),
            _ => serializer.serialize_str(text),
        },
        ValueKind::String => serializer.serialize_str(text),
    }
}

// -----------------------------------------------------------------------------
// Deserialize

impl<'de> Deserialize<'de> for JsonNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(JsonNodeVisitor)
    }
}

struct JsonNodeVisitor;

impl JsonNodeVisitor {
    fn number(value: impl fmt::Display) -> JsonNode {
        JsonNode::value_node("", Some(value.to_string()), ValueKind::Number)
    }
}

impl<'de> Visitor<'de> for JsonNodeVisitor {
    type Value = JsonNode;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<JsonNode, E> {
        Ok(JsonNode::value_node("", Some(v.to_string()), ValueKind::Boolean))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<JsonNode, E> {
        Ok(Self::number(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<JsonNode, E> {
        Ok(Self::number(v))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<JsonNode, E> {
        Ok(Self::number(v))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<JsonNode, E> {
        Ok(Self::number(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<JsonNode, E> {
        Ok(Self::number(v))
    }

    fn visit_char<E: de::Error>(self, v: char) -> Result<JsonNode, E> {
        Ok(JsonNode::value_node("", Some(v.to_string()), ValueKind::String))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<JsonNode, E> {
        Ok(JsonNode::value_node("", Some(String::from(v)), ValueKind::String))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<JsonNode, E> {
        Ok(JsonNode::value_node("", Some(v), ValueKind::String))
    }

    fn visit_unit<E: de::Error>(self) -> Result<JsonNode, E> {
        Ok(JsonNode::new("", NodeKind::Value))
    }

    fn visit_none<E: de::Error>(self) -> Result<JsonNode, E> {
        self.visit_unit()
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<JsonNode, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<JsonNode, A::Error> {
        let mut node = JsonNode::new("", NodeKind::Array);
        if let Some(len) = seq.size_hint() {
            node.children.reserve(len);
        }
        while let Some(child) = seq.next_element::<JsonNode>()? {
            node.children.push(child);
        }
        Ok(node)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<JsonNode, A::Error> {
        let mut node = JsonNode::new("", NodeKind::Object);
        while let Some(name) = map.next_key::<String>()? {
            let mut child = map.next_value::<JsonNode>()?;
            child.name = name;
            node.children.push(child);
        }
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use nodal_model::info::ValueKind;

    use super::JsonNode;
    use crate::node::{Node, NodeKind};

    #[test]
    fn keeps_value_kinds() {
        let node: JsonNode =
            serde_json::from_str(r#"{"n": -3, "f": 1.5, "b": false, "s": "7", "z": null}"#).unwrap();
        let kinds: Vec<_> = node
            .child_nodes()
            .iter()
            .map(|child| (child.name(), child.value(), child.value_kind()))
            .collect();
        assert_eq!(
            kinds,
            [
                ("n", Some("-3"), ValueKind::Number),
                ("f", Some("1.5"), ValueKind::Number),
                ("b", Some("false"), ValueKind::Boolean),
                ("s", Some("7"), ValueKind::String),
                ("z", None, ValueKind::String),
            ]
        );
        assert!(node.child_nodes()[4].is_null());
    }

    #[test]
    fn writes_typed_values() {
        let mut root = JsonNode::new("", NodeKind::Object);
        root.add_child("a", NodeKind::Value)
            .unwrap()
            .set_value(Some(String::from("12")), ValueKind::Number);
        root.add_child("b", NodeKind::Value)
            .unwrap()
            .set_value(Some(String::from("not a number")), ValueKind::Number);
        root.add_child("c", NodeKind::Value)
            .unwrap()
            .set_value(Some(String::from("true")), ValueKind::String);
        root.add_child("d", NodeKind::Array).unwrap();
        assert_eq!(
            serde_json::to_string(&root).unwrap(),
            r#"{"a":12,"b":"not a number","c":"true","d":[]}"#
        );
    }

    #[test]
    fn values_hold_no_children() {
        let mut value = JsonNode::new("v", NodeKind::Value);
        assert!(value.add_child("x", NodeKind::Value).is_err());
    }
}
