//! Document tree.
//!
//! A [`Node`] owns its children outright; cloning a node deep-copies the
//! whole subtree. Lookups never fail: a missing key or index resolves to a
//! shared Null node, so chained access like `doc["a"]["b"][0]` stays terse.

use core::ops::{Index, IndexMut};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeKind {
    #[default]
    Null,
    Scalar,
    Sequence,
    Mapping,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Node {
    kind: NodeKind,
    tag: Option<String>,
    scalar: Option<String>,
    children: Vec<Node>,
    /// Key side-node for values that live in a mapping.
    key: Option<Box<Node>>,
}

static NULL: Node = Node::null();

impl Node {
    pub const fn null() -> Self {
        Node {
            kind: NodeKind::Null,
            tag: None,
            scalar: None,
            children: Vec::new(),
            key: None,
        }
    }

    pub fn scalar(text: impl Into<String>) -> Self {
        Node {
            kind: NodeKind::Scalar,
            scalar: Some(text.into()),
            ..Node::null()
        }
    }

    pub fn sequence() -> Self {
        Node {
            kind: NodeKind::Sequence,
            ..Node::null()
        }
    }

    pub fn mapping() -> Self {
        Node {
            kind: NodeKind::Mapping,
            ..Node::null()
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub(crate) fn keyed(mut self, key: impl Into<String>) -> Self {
        self.key = Some(Box::new(Node::scalar(key)));
        self
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_null(&self) -> bool {
        self.kind == NodeKind::Null
    }

    pub fn is_scalar(&self) -> bool {
        self.kind == NodeKind::Scalar
    }

    pub fn is_sequence(&self) -> bool {
        self.kind == NodeKind::Sequence
    }

    pub fn is_mapping(&self) -> bool {
        self.kind == NodeKind::Mapping
    }

    /// Type annotation carried by the node. Never interpreted.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.tag = Some(tag.into());
    }

    /// Key text this node is stored under in its parent mapping.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref().and_then(|k| k.scalar.as_deref())
    }

    pub fn key_node(&self) -> Option<&Node> {
        self.key.as_deref()
    }

    /// Scalar text, or `""` for anything that is not a scalar.
    pub fn as_str(&self) -> &str {
        match self.kind {
            NodeKind::Scalar => self.scalar.as_deref().unwrap_or(""),
            _ => "",
        }
    }

    /// Leading decimal integer of the scalar text (`atoi` rules).
    ///
    /// Leading whitespace and one sign are accepted and parsing stops at
    /// the first non-digit, so `"12px"` yields 12. Returns 0 for
    /// non-scalars, text without leading digits, and values that overflow.
    pub fn as_int(&self) -> i64 {
        parse_leading_int(self.as_str())
    }

    /// True iff the scalar text is exactly `true`, `yes` or `1`.
    pub fn as_bool(&self) -> bool {
        matches!(self.as_str(), "true" | "yes" | "1")
    }

    /// Number of positional (unkeyed) children.
    ///
    /// This is the length of a sequence. Keyed mapping entries are not
    /// counted; use [`Node::len`] for the total or [`Node::entries`] to
    /// walk them.
    pub fn size(&self) -> usize {
        self.iter().count()
    }

    /// Total number of children, keyed and unkeyed.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Positional children, in document order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter(|c| c.key.is_none())
    }

    /// Keyed children as `(key, value)` pairs, in document order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.children
            .iter()
            .filter_map(|c| c.key().map(|k| (k, c)))
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn get_index(&self, index: usize) -> Option<&Node> {
        self.iter().nth(index)
    }

    /// First child stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.key() == Some(key))
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Follows a dot-separated path such as `plugins.0.file`.
    ///
    /// Each segment matches a key first and falls back to a positional
    /// index when it is a decimal number. Empty segments are ignored, so
    /// the empty path is the node itself. Keys containing `.` cannot be
    /// reached this way.
    pub fn at(&self, path: &str) -> &Node {
        let mut node = self;
        for segment in segments(path) {
            match node.step(segment) {
                Some(next) => node = next,
                None => return &NULL,
            }
        }
        node
    }

    fn step(&self, segment: &str) -> Option<&Node> {
        self.get(segment).or_else(|| {
            segment
                .parse::<usize>()
                .ok()
                .and_then(|i| self.get_index(i))
        })
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.children.iter_mut().find(|c| c.key() == Some(key))
    }

    pub fn get_index_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.children
            .iter_mut()
            .filter(|c| c.key.is_none())
            .nth(index)
    }

    pub fn at_mut(&mut self, path: &str) -> Option<&mut Node> {
        let mut node = self;
        for segment in segments(path) {
            node = node.step_mut(segment)?;
        }
        Some(node)
    }

    fn step_mut(&mut self, segment: &str) -> Option<&mut Node> {
        if self.has_key(segment) {
            return self.get_mut(segment);
        }
        let index = segment.parse::<usize>().ok()?;
        self.get_index_mut(index)
    }

    /// Appends `node` as a positional child, dropping any key it carried.
    pub fn push(&mut self, mut node: Node) -> &mut Self {
        node.key = None;
        self.append(node);
        self
    }

    pub fn push_scalar(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Node::scalar(text))
    }

    /// Appends `node` under `key`. Existing entries with the same key are
    /// left in place; lookups keep returning the first one.
    pub fn insert(&mut self, key: impl Into<String>, node: Node) -> &mut Self {
        self.append(node.keyed(key));
        self
    }

    /// Replaces this node's value with `value`, keeping its key.
    pub fn set(&mut self, value: Node) -> &mut Self {
        let key = self.key.take();
        *self = value;
        self.key = key;
        self
    }

    pub fn set_str(&mut self, text: impl Into<String>) -> &mut Self {
        self.tag = None;
        self.children.clear();
        self.kind = NodeKind::Scalar;
        self.scalar = Some(text.into());
        self
    }

    pub fn set_int(&mut self, value: i64) -> &mut Self {
        self.set_str(value.to_string())
    }

    pub fn set_bool(&mut self, value: bool) -> &mut Self {
        self.set_str(if value { "true" } else { "false" })
    }

    /// Attaches a child as-is. Null and scalar receivers turn into the
    /// container kind the child implies; an empty container flips kind to
    /// match its first child.
    pub(crate) fn append(&mut self, child: Node) {
        let keyed = child.key.is_some();
        match self.kind {
            NodeKind::Null | NodeKind::Scalar => {
                self.scalar = None;
                self.kind = if keyed {
                    NodeKind::Mapping
                } else {
                    NodeKind::Sequence
                };
            }
            NodeKind::Mapping if !keyed && self.children.is_empty() => {
                self.kind = NodeKind::Sequence;
            }
            NodeKind::Sequence if keyed && self.children.is_empty() => {
                self.kind = NodeKind::Mapping;
            }
            _ => {}
        }
        self.children.push(child);
    }

    /// Whether appending a keyed (or unkeyed) child would mix mapping
    /// entries and sequence items in this container.
    pub(crate) fn would_mix(&self, keyed: bool) -> bool {
        if self.children.is_empty() {
            return false;
        }
        match self.kind {
            NodeKind::Mapping => !keyed,
            NodeKind::Sequence => keyed,
            _ => false,
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('.').filter(|s| !s.is_empty())
}

fn parse_leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        let d = i64::from(b - b'0');
        let next = value.checked_mul(10).and_then(|v| {
            if negative {
                v.checked_sub(d)
            } else {
                v.checked_add(d)
            }
        });
        match next {
            Some(v) => value = v,
            None => return 0,
        }
    }
    value
}

impl Index<usize> for Node {
    type Output = Node;

    fn index(&self, index: usize) -> &Node {
        self.get_index(index).unwrap_or(&NULL)
    }
}

impl Index<&str> for Node {
    type Output = Node;

    fn index(&self, key: &str) -> &Node {
        self.get(key).unwrap_or(&NULL)
    }
}

/// Inserts a Null entry under `key` when it is missing.
impl IndexMut<&str> for Node {
    fn index_mut(&mut self, key: &str) -> &mut Node {
        let pos = match self.children.iter().position(|c| c.key() == Some(key)) {
            Some(pos) => pos,
            None => {
                self.insert(key, Node::null());
                self.children.len() - 1
            }
        };
        &mut self.children[pos]
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::scalar(text)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::scalar(text)
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::scalar(value.to_string())
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Node::scalar(value.to_string())
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::scalar(if value { "true" } else { "false" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_int_follows_atoi() {
        assert_eq!(Node::from("42").as_int(), 42);
        assert_eq!(Node::from("  -7").as_int(), -7);
        assert_eq!(Node::from("+3").as_int(), 3);
        assert_eq!(Node::from("12px").as_int(), 12);
        assert_eq!(Node::from("px").as_int(), 0);
        assert_eq!(Node::from("").as_int(), 0);
        assert_eq!(Node::from("99999999999999999999").as_int(), 0);
        assert_eq!(Node::mapping().as_int(), 0);
    }

    #[test]
    fn as_bool_is_case_sensitive() {
        for yes in ["true", "yes", "1"] {
            assert!(Node::from(yes).as_bool(), "{yes}");
        }
        for no in ["True", "YES", "on", "0", "false", ""] {
            assert!(!Node::from(no).as_bool(), "{no}");
        }
        assert!(!Node::null().as_bool());
    }

    #[test]
    fn append_infers_container_kind() {
        let mut seq = Node::null();
        seq.push_scalar("a");
        assert!(seq.is_sequence());

        let mut map = Node::null();
        map.insert("k", Node::from("v"));
        assert!(map.is_mapping());

        let mut opener = Node::mapping();
        opener.push_scalar("x");
        assert!(opener.is_sequence());
    }

    #[test]
    fn scalar_receiver_drops_its_text() {
        let mut n = Node::from("x");
        n.push_scalar("y");
        assert!(n.is_sequence());
        assert_eq!(n.as_str(), "");
        assert_eq!(n.scalar, None);
        assert_eq!(n.children().len(), 1);
        assert_eq!(n.children()[0].as_str(), "y");

        let mut m = Node::from("x");
        m.insert("k", Node::from("v"));
        assert!(m.is_mapping());
        assert_eq!(m.scalar, None);
        assert_eq!(m.children().len(), 1);
        assert_eq!(m["k"].as_str(), "v");
    }

    #[test]
    fn would_mix_only_for_non_empty_containers() {
        let mut map = Node::mapping();
        assert!(!map.would_mix(false));
        map.insert("a", Node::from("1"));
        assert!(map.would_mix(false));
        assert!(!map.would_mix(true));
    }

    #[test]
    fn index_mut_inserts_missing_keys() {
        let mut root = Node::null();
        root["name"].set_str("x");
        assert!(root.is_mapping());
        assert_eq!(root["name"].as_str(), "x");
        assert_eq!(root.len(), 1);
    }

    #[test]
    fn set_keeps_key() {
        let mut root = Node::null();
        root.insert("count", Node::from(1i64));
        let child = root.get_mut("count").unwrap();
        child.set(Node::from(true));
        assert_eq!(child.key(), Some("count"));
        assert!(root["count"].as_bool());
    }
}
