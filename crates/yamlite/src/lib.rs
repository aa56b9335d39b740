#![doc = include_str!("../README.md")]

pub mod error;
pub mod options;
pub mod node;
pub mod encode;
pub mod decode;

#[cfg(feature = "serde")]
pub mod ser;

pub use crate::error::{Error, Result};
pub use crate::node::{Node, NodeKind};
pub use crate::options::Options;

#[cfg(feature = "json")]
pub use crate::ser::to_json_value;

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use log::debug;

/// Parses `content` into a document tree.
///
/// Never fails: malformed indentation produces a best-effort tree and the
/// anomalies are logged at `debug` level. Use [`load_with_options`] with
/// `strict` set to have them reported instead.
pub fn load(content: &str) -> Node {
    let root = crate::decode::parser::parse(content);
    debug!(
        "loaded {} bytes into {:?} root with {} children",
        content.len(),
        root.kind(),
        root.len()
    );
    root
}

pub fn load_with_options(content: &str, options: &Options) -> Result<Node> {
    let root = crate::decode::parser::parse_with_options(content, options)?;
    debug!(
        "loaded {} bytes into {:?} root with {} children",
        content.len(),
        root.kind(),
        root.len()
    );
    Ok(root)
}

/// Reads the whole file at `path` and parses it.
///
/// Fails with [`Error::Open`] when the file cannot be opened and with
/// [`Error::Read`] when its contents cannot be read as UTF-8 text.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Node> {
    load_file_with_options(path, &Options::default())
}

pub fn load_file_with_options<P: AsRef<Path>>(path: P, options: &Options) -> Result<Node> {
    let path = path.as_ref();
    debug!("loading {}", path.display());
    let mut file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
    load_with_options(&content, options)
}

pub fn load_from_reader<R: Read>(mut reader: R, options: &Options) -> Result<Node> {
    let mut s = String::new();
    reader.read_to_string(&mut s)?;
    load_with_options(&s, options)
}

pub fn to_string(node: &Node) -> Result<String> {
    crate::encode::encode_to_string(node, &Options::default())
}

pub fn to_string_with_options(node: &Node, options: &Options) -> Result<String> {
    crate::encode::encode_to_string(node, options)
}

pub fn to_writer<W: Write>(mut writer: W, node: &Node, options: &Options) -> Result<()> {
    let s = to_string_with_options(node, options)?;
    writer.write_all(s.as_bytes())?;
    Ok(())
}
