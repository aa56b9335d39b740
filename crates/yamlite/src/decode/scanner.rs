use std::borrow::Cow;

use crate::decode::scalar;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    /// 1-based physical line number.
    pub number: usize,
    /// Byte offset of the line start.
    pub offset: usize,
    /// Indentation in columns; a tab counts `tab_width` columns.
    pub indent: usize,
    pub kind: LineKind<'a>,
}

impl ParsedLine<'_> {
    /// 1-based column of the first significant character.
    pub fn column(&self) -> usize {
        self.indent.saturating_add(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `- value`, or a lone `-`.
    Item { value: &'a str },
    /// `key:` followed by nothing or a comment; its body is indented below.
    Opener { key: Cow<'a, str> },
    /// `key: value` on one line. `value` is still raw (quotes, comments).
    Pair { key: Cow<'a, str>, value: &'a str },
    /// Neither a key nor an item marker.
    Bare(&'a str),
}

/// Walks the input one physical line at a time, skipping blank and
/// comment lines.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a str,
    offset: usize,
    line: usize,
    tab_width: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str, tab_width: usize) -> Self {
        let offset = if input.starts_with('\u{feff}') { 3 } else { 0 };
        Self {
            input,
            offset,
            line: 0,
            tab_width,
        }
    }

    /// Byte offset of the next unread line.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of physical lines consumed so far.
    pub fn line(&self) -> usize {
        self.line
    }

    fn next_raw(&mut self) -> Option<(usize, &'a str)> {
        if self.offset >= self.input.len() {
            return None;
        }
        let start = self.offset;
        let rest = &self.input[start..];
        let (raw, consumed) = match find_newline(rest) {
            Some(pos) => (&rest[..pos], pos + 1),
            None => (rest, rest.len()),
        };
        self.offset += consumed;
        self.line += 1;
        Some((start, raw.strip_suffix('\r').unwrap_or(raw)))
    }
}

impl<'a> Iterator for Cursor<'a> {
    type Item = ParsedLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((offset, raw)) = self.next_raw() {
            let (indent, body) = measure_indent(raw, self.tab_width);
            let body = body.trim_end();
            if body.is_empty() || body.starts_with('#') {
                continue;
            }
            return Some(ParsedLine {
                number: self.line,
                offset,
                indent,
                kind: classify(body),
            });
        }
        None
    }
}

pub fn scan(input: &str, tab_width: usize) -> Vec<ParsedLine<'_>> {
    Cursor::new(input, tab_width).collect()
}

#[inline]
#[cfg(feature = "perf_memchr")]
fn find_newline(s: &str) -> Option<usize> {
    memchr::memchr(b'\n', s.as_bytes())
}

#[inline]
#[cfg(not(feature = "perf_memchr"))]
fn find_newline(s: &str) -> Option<usize> {
    s.find('\n')
}

/// Leading indentation of `raw` in columns, and the text after it.
/// Spaces and tabs accumulate in the order they appear.
pub fn measure_indent(raw: &str, tab_width: usize) -> (usize, &str) {
    let mut indent = 0usize;
    for (i, b) in raw.bytes().enumerate() {
        match b {
            b' ' => indent = indent.saturating_add(1),
            b'\t' => indent = indent.saturating_add(tab_width),
            _ => return (indent, &raw[i..]),
        }
    }
    (indent, "")
}

/// Sorts an indentation-stripped, non-blank line body into a [`LineKind`].
pub fn classify(body: &str) -> LineKind<'_> {
    if body == "-" {
        return LineKind::Item { value: "" };
    }
    if let Some(rest) = body.strip_prefix("- ").or_else(|| body.strip_prefix("-\t")) {
        return LineKind::Item {
            value: rest.trim_start(),
        };
    }

    if body.starts_with(['"', '\'']) {
        return match scalar::quoted(body) {
            Some(q) if q.terminated => match q.rest.strip_prefix(':') {
                Some(after) => key_line(Cow::Owned(q.text), after),
                None => LineKind::Bare(body),
            },
            _ => LineKind::Bare(body),
        };
    }

    // A key is the run of text up to a colon, stopping at whitespace.
    let end = body
        .find(|c: char| c == ':' || c.is_whitespace())
        .unwrap_or(body.len());
    if let Some(after) = body[end..].strip_prefix(':') {
        return key_line(Cow::Borrowed(&body[..end]), after);
    }

    match body.find(':') {
        Some(idx) => LineKind::Pair {
            key: Cow::Borrowed(body[..idx].trim_end()),
            value: body[idx + 1..].trim_start(),
        },
        None => LineKind::Bare(body),
    }
}

fn key_line<'a>(key: Cow<'a, str>, after: &'a str) -> LineKind<'a> {
    let value = after.trim_start();
    if value.is_empty() || value.starts_with('#') {
        LineKind::Opener { key }
    } else {
        LineKind::Pair { key, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indent_counts_tabs_as_configured() {
        assert_eq!(measure_indent("  a", 4), (2, "a"));
        assert_eq!(measure_indent("\ta", 4), (4, "a"));
        assert_eq!(measure_indent(" \t a", 4), (6, "a"));
        assert_eq!(measure_indent("\ta", 8), (8, "a"));
        assert_eq!(measure_indent("   ", 4), (3, ""));
    }

    #[test]
    fn huge_tab_width_saturates() {
        assert_eq!(measure_indent("\t\t a", usize::MAX), (usize::MAX, "a"));
    }

    #[test]
    fn classify_shapes() {
        assert_eq!(
            classify("name: Test"),
            LineKind::Pair {
                key: Cow::Borrowed("name"),
                value: "Test"
            }
        );
        assert_eq!(
            classify("nested:"),
            LineKind::Opener {
                key: Cow::Borrowed("nested")
            }
        );
        assert_eq!(
            classify("nested:   # comment"),
            LineKind::Opener {
                key: Cow::Borrowed("nested")
            }
        );
        assert_eq!(classify("- alpha"), LineKind::Item { value: "alpha" });
        assert_eq!(classify("-"), LineKind::Item { value: "" });
        assert_eq!(classify("plain"), LineKind::Bare("plain"));
    }

    #[test]
    fn item_marker_wins_over_colon() {
        assert_eq!(classify("- a: b"), LineKind::Item { value: "a: b" });
    }

    #[test]
    fn quoted_keys_are_unescaped() {
        assert_eq!(
            classify(r#""a key: \"x\"": 1"#),
            LineKind::Pair {
                key: Cow::Owned("a key: \"x\"".to_string()),
                value: "1"
            }
        );
    }

    #[test]
    fn colon_after_whitespace_splits_flat_pair() {
        assert_eq!(
            classify("my key: v"),
            LineKind::Pair {
                key: Cow::Borrowed("my key"),
                value: "v"
            }
        );
    }

    #[test]
    fn cursor_skips_blank_and_comment_lines() {
        let lines = scan("# head\n\na: 1\r\n   \n  # note\nb: 2", 4);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].number, 3);
        assert_eq!(lines[0].offset, 8);
        assert_eq!(lines[1].number, 6);
        assert_eq!(
            lines[1].kind,
            LineKind::Pair {
                key: Cow::Borrowed("b"),
                value: "2"
            }
        );
    }

    #[test]
    fn cursor_tracks_offset_and_line() {
        let mut cursor = Cursor::new("a: 1\nb: 2\n", 4);
        assert!(cursor.next().is_some());
        assert_eq!(cursor.line(), 1);
        assert_eq!(cursor.offset(), 5);
        assert!(cursor.next().is_some());
        assert!(cursor.next().is_none());
        assert_eq!(cursor.offset(), 10);
    }
}
