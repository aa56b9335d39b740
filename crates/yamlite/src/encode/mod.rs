//! Writes a [`Node`] tree back out in the same indentation dialect.
//!
//! Mappings and sequences of scalars round-trip. A few shapes have no
//! spelling in the dialect and come back differently after a reload: a
//! Null or empty container under a key is written as `key:`, which loads
//! as an empty mapping, and a Null sequence item loads as an empty scalar.
//! Collections nested directly inside a sequence, scalar roots and
//! multi-line scalars are rejected.

pub mod primitives;
pub mod writer;

use crate::{
    Result,
    error::Error,
    node::{Node, NodeKind},
    options::Options,
};

use writer::LineWriter;

pub fn encode_node(node: &Node, w: &mut LineWriter, opts: &Options, indent: usize) -> Result<()> {
    match node.kind() {
        NodeKind::Null => Ok(()),
        NodeKind::Scalar => Err(Error::Message(
            "a scalar cannot be written as a document root".to_string(),
        )),
        NodeKind::Sequence | NodeKind::Mapping => encode_children(node, w, opts, indent),
    }
}

fn encode_children(node: &Node, w: &mut LineWriter, opts: &Options, indent: usize) -> Result<()> {
    let step = if opts.indent == 0 { 2 } else { opts.indent };
    for child in node.children() {
        match child.key() {
            Some(key) => {
                let key = primitives::format_key(key)?;
                match child.kind() {
                    NodeKind::Scalar => {
                        let value = primitives::format_value(child.as_str())?;
                        w.line_kv(indent, &key, &value);
                    }
                    NodeKind::Null => w.line_key_only(indent, &key),
                    NodeKind::Sequence | NodeKind::Mapping => {
                        w.line_key_only(indent, &key);
                        encode_children(child, w, opts, indent + step)?;
                    }
                }
            }
            None => match child.kind() {
                NodeKind::Scalar => {
                    let value = primitives::format_value(child.as_str())?;
                    w.line_list_item(indent, &value);
                }
                NodeKind::Null => w.line_list_item(indent, ""),
                NodeKind::Sequence | NodeKind::Mapping => {
                    return Err(Error::Message(
                        "collections nested inside a sequence cannot be written".to_string(),
                    ));
                }
            },
        }
    }
    Ok(())
}

pub fn encode_to_string(node: &Node, options: &Options) -> Result<String> {
    let mut w = LineWriter::new();
    encode_node(node, &mut w, options, 0)?;
    Ok(w.into_string())
}
