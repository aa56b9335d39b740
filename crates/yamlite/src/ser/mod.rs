//! Serde integration.
//!
//! Scalars serialize as strings (tags are never interpreted), sequences as
//! seqs of every child, mappings as maps of their keyed entries.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::node::{Node, NodeKind};

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        match self.kind() {
            NodeKind::Null => serializer.serialize_unit(),
            NodeKind::Scalar => serializer.serialize_str(self.as_str()),
            NodeKind::Sequence => {
                let mut seq = serializer.serialize_seq(Some(self.len()))?;
                for child in self.children() {
                    seq.serialize_element(child)?;
                }
                seq.end()
            }
            NodeKind::Mapping => {
                let mut map = serializer.serialize_map(Some(self.entries().count()))?;
                for (key, value) in self.entries() {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

/// Converts a tree into a `serde_json::Value`. Duplicate keys keep the
/// first entry, matching [`Node::get`].
#[cfg(feature = "json")]
pub fn to_json_value(node: &Node) -> serde_json::Value {
    match node.kind() {
        NodeKind::Null => serde_json::Value::Null,
        NodeKind::Scalar => serde_json::Value::String(node.as_str().to_string()),
        NodeKind::Sequence => {
            serde_json::Value::Array(node.children().iter().map(to_json_value).collect())
        }
        NodeKind::Mapping => {
            let mut m = serde_json::Map::new();
            for (key, value) in node.entries() {
                m.entry(key)
                    .or_insert_with(|| to_json_value(value));
            }
            serde_json::Value::Object(m)
        }
    }
}

#[cfg(feature = "json")]
impl From<&Node> for serde_json::Value {
    fn from(node: &Node) -> Self {
        to_json_value(node)
    }
}
