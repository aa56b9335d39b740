//! Scalar lexing shared by keys, flat values and sequence items.

use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quoted<'a> {
    /// Unescaped contents between the quotes.
    pub text: String,
    /// Input following the closing quote.
    pub rest: &'a str,
    pub terminated: bool,
}

/// Extracts a `"..."` or `'...'` string from the start of `s`.
///
/// A backslash makes the next character literal (`\x` becomes `x`) for
/// both quote styles. Without a closing quote the rest of `s` is taken.
pub fn quoted(s: &str) -> Option<Quoted<'_>> {
    let quote = s.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let body = &s[1..];
    let mut text = String::with_capacity(body.len());
    let mut chars = body.char_indices();
    while let Some((i, ch)) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some((_, escaped)) => text.push(escaped),
                None => text.push('\\'),
            }
        } else if ch == quote {
            return Some(Quoted {
                text,
                rest: &body[i + ch.len_utf8()..],
                terminated: true,
            });
        } else {
            text.push(ch);
        }
    }
    Some(Quoted {
        text,
        rest: "",
        terminated: false,
    })
}

/// Unquoted value: everything up to a comment marker, trimmed.
///
/// `#` starts a comment only at the beginning of the value or after
/// whitespace, so `a#b` stays intact.
pub fn bare(s: &str) -> &str {
    let s = s.trim_start();
    let end = comment_start(s).unwrap_or(s.len());
    s[..end].trim_end()
}

fn comment_start(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    bytes
        .iter()
        .enumerate()
        .find(|&(i, &b)| b == b'#' && (i == 0 || matches!(bytes[i - 1], b' ' | b'\t')))
        .map(|(i, _)| i)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarIssue {
    Unterminated,
    TrailingText,
}

impl ScalarIssue {
    pub fn message(self) -> &'static str {
        match self {
            ScalarIssue::Unterminated => "unterminated quoted scalar",
            ScalarIssue::TrailingText => "unexpected text after quoted scalar",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scalar<'a> {
    pub text: Cow<'a, str>,
    pub issue: Option<ScalarIssue>,
}

/// Lexes a raw value as it appears after `key:` or `- `.
pub fn lex_value(raw: &str) -> Scalar<'_> {
    let raw = raw.trim_start();
    if let Some(q) = quoted(raw) {
        let issue = if !q.terminated {
            Some(ScalarIssue::Unterminated)
        } else if !bare(q.rest).is_empty() {
            Some(ScalarIssue::TrailingText)
        } else {
            None
        };
        return Scalar {
            text: Cow::Owned(q.text),
            issue,
        };
    }
    Scalar {
        text: Cow::Borrowed(bare(raw)),
        issue: None,
    }
}
