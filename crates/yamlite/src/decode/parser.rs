use std::collections::HashSet;

use log::{debug, trace};

use crate::decode::scalar::{self, Scalar};
use crate::decode::scanner::{Cursor, LineKind, ParsedLine};
use crate::error::{Error, Result};
use crate::node::Node;
use crate::options::Options;

/// One entry of the indentation stack: a mapping opener whose body is
/// still being read.
#[derive(Debug)]
struct Level {
    /// Column of the opener line itself.
    indent: usize,
    /// Column of the first line of the body, once seen.
    child_indent: Option<usize>,
    /// Keys already placed in `node`.
    keys: HashSet<String>,
    node: Node,
}

pub struct Parser<'a> {
    cursor: Cursor<'a>,
    root: Level,
    stack: Vec<Level>,
    strict: bool,
    error: Option<Error>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str, options: &Options) -> Self {
        Self {
            cursor: Cursor::new(input, options.tab_width),
            root: Level {
                indent: 0,
                child_indent: None,
                keys: HashSet::new(),
                node: Node::null(),
            },
            stack: Vec::new(),
            strict: options.strict,
            error: None,
        }
    }

    /// First structural problem seen in strict mode.
    pub fn take_error(&mut self) -> Option<Error> {
        self.error.take()
    }

    /// Reads every remaining line and returns the finished root.
    pub fn parse_document(&mut self) -> Node {
        while let Some(line) = self.cursor.next() {
            self.process_line(line);
        }
        while !self.stack.is_empty() {
            self.close_level();
        }
        core::mem::take(&mut self.root.node)
    }

    fn top(&mut self) -> &mut Level {
        match self.stack.last_mut() {
            Some(level) => level,
            None => &mut self.root,
        }
    }

    fn close_level(&mut self) {
        if let Some(level) = self.stack.pop() {
            self.top().node.append(level.node);
        }
    }

    /// Pops every open level whose opener is at or right of `indent`.
    fn close_levels(&mut self, indent: usize) {
        while let Some(level) = self.stack.last() {
            if indent > level.indent {
                break;
            }
            self.close_level();
        }
    }

    fn process_line(&mut self, line: ParsedLine<'a>) {
        trace!("line {} indent {}: {:?}", line.number, line.indent, line.kind);
        let number = line.number;
        let column = line.column();
        self.close_levels(line.indent);
        self.check_indent(number, line.indent);

        match line.kind {
            LineKind::Item { value } => {
                let text = self.lex(number, column, value);
                self.check_placement(number, column, None);
                self.top().node.append(Node::scalar(text));
            }
            LineKind::Opener { key } => {
                self.check_key(number, column, &key);
                self.check_placement(number, column, Some(&*key));
                let node = Node::mapping().with_tag(&*key).keyed(key);
                self.stack.push(Level {
                    indent: line.indent,
                    child_indent: None,
                    keys: HashSet::new(),
                    node,
                });
            }
            LineKind::Pair { key, value } => {
                self.check_key(number, column, &key);
                let text = self.lex(number, column, value);
                self.check_placement(number, column, Some(&*key));
                self.top().node.append(Node::scalar(text).keyed(key));
            }
            LineKind::Bare(body) => {
                self.report(
                    number,
                    column,
                    format!("expected key or sequence item, found `{body}`"),
                );
                let key = self.lex(number, column, body);
                self.check_placement(number, column, Some(key.as_str()));
                self.top().node.append(Node::scalar("").keyed(key));
            }
        }
    }

    /// Every line in a block must sit at the column of the block's first line.
    fn check_indent(&mut self, number: usize, indent: usize) {
        let top = self.top();
        let expected = top.child_indent;
        let message = match expected {
            None => {
                top.child_indent = Some(indent);
                return;
            }
            Some(expected) if expected == indent => return,
            Some(expected) if indent > expected => format!(
                "unexpected indentation: expected column {}, found {}",
                expected.saturating_add(1),
                indent.saturating_add(1)
            ),
            Some(expected) => format!(
                "inconsistent indentation: expected column {}, found {}",
                expected.saturating_add(1),
                indent.saturating_add(1)
            ),
        };
        self.report(number, indent.saturating_add(1), message);
    }

    fn check_key(&mut self, number: usize, column: usize, key: &str) {
        if key.is_empty() {
            self.report(number, column, "empty key".to_string());
        }
    }

    fn check_placement(&mut self, number: usize, column: usize, key: Option<&str>) {
        let level = self.top();
        let message = if level.node.would_mix(key.is_some()) {
            Some(match key {
                Some(_) => "mapping entry inside sequence".to_string(),
                None => "sequence item inside mapping".to_string(),
            })
        } else {
            key.filter(|k| !level.keys.insert((*k).to_string()))
                .map(|k| format!("duplicate key `{k}`"))
        };
        if let Some(message) = message {
            self.report(number, column, message);
        }
    }

    fn lex(&mut self, number: usize, column: usize, raw: &str) -> String {
        let Scalar { text, issue } = scalar::lex_value(raw);
        if let Some(issue) = issue {
            self.report(number, column, issue.message().to_string());
        }
        text.into_owned()
    }

    /// Strict mode keeps the first problem; otherwise it is only logged and
    /// the best-effort tree stands.
    fn report(&mut self, line: usize, column: usize, message: String) {
        if self.strict {
            if self.error.is_none() {
                self.error = Some(Error::Syntax {
                    line,
                    column,
                    message,
                });
            }
        } else {
            debug!("line {line}, column {column}: {message}");
        }
    }
}

pub fn parse(input: &str) -> Node {
    Parser::new(input, &Options::default()).parse_document()
}

pub fn parse_with_options(input: &str, options: &Options) -> Result<Node> {
    let mut p = Parser::new(input, options);
    let root = p.parse_document();
    match p.take_error() {
        Some(err) => Err(err),
        None => Ok(root),
    }
}
